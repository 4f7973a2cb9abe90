//! # fsi-rs
//!
//! A partitioned fluid-structure interaction coupling layer.
//!
//! A fixed-background fluid solver and a deforming-mesh solid solver are
//! coupled with a fictitious-domain indicator:
//! - Fluid cells fully covered by the deformed solid are marked as
//!   "artificial fluid"
//! - Covered cells receive stress and acceleration differences as forcing
//! - The solid's free boundary receives the fluid traction
//! - Both solvers advance through synchronized, single-pass time steps
//!
//! This crate provides the building blocks:
//! - Quadrilateral meshes with bilinear geometry and point location
//! - Gauss-Legendre quadrature and Q1 finite-element evaluation
//! - Nodal and cellwise fields with point values and gradients
//! - Solver collaborator traits with prescribed reference implementations
//! - The coupling algorithms and the coupling loop

pub mod coupling;
pub mod error;
pub mod fe;
pub mod field;
pub mod mesh;
pub mod polynomial;
pub mod quadrature;
pub mod simulation;
pub mod solver;
pub mod time;
pub mod types;

// Re-export main types for convenience
pub use coupling::{
    DeformedMesh, InterfaceForceSample, MeshTransform, OutsidePointPolicy, TractionSample,
    find_fluid_fsi, find_solid_bc, point_in_mesh, update_indicator,
};
#[cfg(feature = "parallel")]
pub use coupling::update_indicator_parallel;
pub use error::{FsiError, Result};
pub use fe::{FeFaceValues, FeValues};
pub use field::{
    CellwiseScalarField, FeField, FluidSolution, NodalScalarField, NodalVectorField, StressField,
};
pub use mesh::{BoundaryId, BoundaryIdSet, Mesh2D};
pub use quadrature::{QuadratureRule1D, QuadratureRule2D};
pub use simulation::{CouplingState, FsiParameters, FsiSimulation, SimulationSummary, StepReport};
pub use solver::{
    CellProperty, CellPropertyStore, FluidSolver, Indicator, PrescribedFluid, PrescribedSolid,
    SolidSolver,
};
pub use time::SimulationTime;
pub use types::{ElementIndex, Point2, SymmetricTensor2, Tensor2, Vector2, VertexIndex};
