//! Fluid-structure coupling.
//!
//! The per-step data exchange between the fixed fluid mesh and the
//! deforming solid mesh:
//! - [`MeshTransform`]: reversible displacement of the solid mesh
//! - [`point_in_mesh`]: brute-force point containment
//! - [`update_indicator`]: marks fluid cells covered by the solid
//! - [`find_fluid_fsi`]: stress and acceleration differences on covered cells
//! - [`find_solid_bc`]: fluid traction on the solid's free boundary
//!
//! # Example
//!
//! ```
//! use fsi_rs::coupling::{find_fluid_fsi, update_indicator, OutsidePointPolicy};
//! use fsi_rs::mesh::Mesh2D;
//! use fsi_rs::solver::{PrescribedFluid, PrescribedSolid};
//! use fsi_rs::types::Point2;
//!
//! let mut fluid = PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 8, 8), 1e-3)
//!     .with_pressure(|_| 1.0);
//! let mut solid = PrescribedSolid::new(Mesh2D::disk(Point2::new(0.5, 0.5), 0.3, 4));
//!
//! let covered = update_indicator(&mut fluid, &mut solid).unwrap();
//! let force = find_fluid_fsi(&fluid, &solid, 0.01, OutsidePointPolicy::Error).unwrap();
//! assert_eq!(force.len(), covered * 4);
//! ```

mod containment;
mod indicator;
mod interface_force;
mod policy;
mod traction;
mod transform;

pub use containment::point_in_mesh;
pub use indicator::update_indicator;
#[cfg(feature = "parallel")]
pub use indicator::update_indicator_parallel;
pub use interface_force::{InterfaceForceSample, find_fluid_fsi};
pub use policy::OutsidePointPolicy;
pub use traction::{TractionSample, find_solid_bc};
pub use transform::{DeformedMesh, MeshTransform};
