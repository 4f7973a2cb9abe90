//! Fluid and solid solver collaborators.
//!
//! - [`FluidSolver`], [`SolidSolver`]: the surfaces the coupling layer uses
//! - [`CellPropertyStore`]: per-cell indicator and viscosity of the fluid
//! - [`PrescribedFluid`], [`PrescribedSolid`]: reference collaborators whose
//!   fields are set from closures

mod cell_property;
mod prescribed;
mod traits;

pub use cell_property::{CellProperty, CellPropertyStore, Indicator};
pub use prescribed::{PrescribedFluid, PrescribedSolid, ScalarProfile, TensorProfile, VectorProfile};
pub use traits::{FluidSolver, SolidSolver};
