//! Coupled fluid-structure simulation.
//!
//! This module ties together:
//! - Run parameters ([`FsiParameters`])
//! - The fluid and solid solver collaborators
//! - The per-step coupling sequence ([`FsiSimulation`])
//!
//! # Example
//! ```
//! use fsi_rs::mesh::Mesh2D;
//! use fsi_rs::simulation::{FsiParameters, FsiSimulation};
//! use fsi_rs::solver::{PrescribedFluid, PrescribedSolid};
//!
//! let fluid = PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 4.0, 0.0, 1.0, 8, 2), 1e-3);
//! let solid = PrescribedSolid::new(Mesh2D::uniform_rectangle_colorized(1.0, 1.5, 0.0, 0.5, 2, 2));
//! let params = FsiParameters::default()
//!     .with_end_time(0.03)
//!     .with_time_step(0.01)
//!     .with_solid_dirichlet_bc(2);
//!
//! let mut sim = FsiSimulation::new(fluid, solid, params).unwrap();
//! sim.run_with_callback(|report| println!("t = {:.2}", report.time)).unwrap();
//! ```

mod config;
mod runner;

pub use config::FsiParameters;
pub use runner::{CouplingState, FsiSimulation, SimulationSummary, StepReport};
