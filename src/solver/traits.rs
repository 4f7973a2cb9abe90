//! Collaborator traits for the fluid and solid solvers.
//!
//! The coupling layer owns neither solver's state. It reads meshes and
//! fields through these traits and writes back only indicator values,
//! interface-force samples and traction samples.

use crate::coupling::{InterfaceForceSample, TractionSample};
use crate::error::Result;
use crate::field::{FluidSolution, NodalVectorField, StressField};
use crate::mesh::{BoundaryIdSet, Mesh2D};
use crate::quadrature::{QuadratureRule1D, QuadratureRule2D};

use super::cell_property::CellPropertyStore;

// =============================================================================
// FluidSolver Trait
// =============================================================================

/// Fixed-background fluid solver.
///
/// # Ordering contract
///
/// The interface force handed to [`FluidSolver::set_interface_force`] holds
/// one entry per quadrature point of every [`Indicator::Artificial`] cell,
/// cells in index order and points in the order of
/// [`FluidSolver::volume_quadrature`]. The solver must traverse covered cells
/// in the same order when it applies the forcing.
///
/// [`Indicator::Artificial`]: super::Indicator::Artificial
pub trait FluidSolver {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str {
        "fluid"
    }

    /// Background mesh (never deformed).
    fn mesh(&self) -> &Mesh2D;

    /// Refine the mesh globally `times` times. Invalidates all per-cell
    /// data until the next [`FluidSolver::setup`].
    fn refine_global(&mut self, times: usize);

    /// Distribute degrees of freedom and initialize the system on the
    /// current mesh, including a fresh cell property store.
    fn setup(&mut self) -> Result<()>;

    /// Cell quadrature rule used for the indicator and interface force.
    fn volume_quadrature(&self) -> &QuadratureRule2D;

    fn cell_properties(&self) -> &CellPropertyStore;

    fn cell_properties_mut(&mut self) -> &mut CellPropertyStore;

    /// Solution at the end of the last completed step.
    fn present_solution(&self) -> &FluidSolution;

    /// Change of the solution over the last completed step.
    fn solution_increment(&self) -> &FluidSolution;

    /// Receive the interface force for the next step.
    fn set_interface_force(&mut self, force: InterfaceForceSample) -> Result<()>;

    /// Advance by one time step.
    fn run_one_step(&mut self, first_step: bool) -> Result<()>;
}

// =============================================================================
// SolidSolver Trait
// =============================================================================

/// Deforming-mesh solid solver.
///
/// The mesh is stored in the reference configuration. The coupling layer
/// deforms it temporarily and always restores it before returning.
///
/// # Ordering contract
///
/// The traction handed to [`SolidSolver::set_fluid_traction`] holds one
/// entry per quadrature point of every boundary face whose identifier is not
/// a Dirichlet identifier, cells in index order, faces 0..4 within a cell,
/// points in the order of [`SolidSolver::face_quadrature`].
pub trait SolidSolver {
    fn name(&self) -> &'static str {
        "solid"
    }

    /// Solid mesh in its reference configuration.
    fn mesh(&self) -> &Mesh2D;

    fn mesh_mut(&mut self) -> &mut Mesh2D;

    /// Boundary identifiers carrying a prescribed displacement. The coupling
    /// loop hands over its configured set before [`SolidSolver::setup`];
    /// faces with these identifiers receive no traction.
    fn set_dirichlet_boundaries(&mut self, ids: &BoundaryIdSet);

    /// Distribute degrees of freedom and initialize the system.
    fn setup(&mut self) -> Result<()>;

    /// Face quadrature rule used for the traction.
    fn face_quadrature(&self) -> &QuadratureRule1D;

    /// Nodal displacement, indexed by [`NodalVectorField::dof_index`].
    fn current_displacement(&self) -> &NodalVectorField;

    fn current_acceleration(&self) -> &NodalVectorField;

    /// Per-component Cauchy stress.
    fn stress(&self) -> &StressField;

    /// Receive the fluid traction for the next step.
    fn set_fluid_traction(&mut self, traction: TractionSample) -> Result<()>;

    /// Advance by one time step.
    fn run_one_step(&mut self, first_step: bool) -> Result<()>;
}
