//! Reference collaborators with prescribed fields.
//!
//! [`PrescribedFluid`] and [`PrescribedSolid`] implement the solver traits
//! without any assembly or solve: their fields are interpolated from
//! closures on [`setup`](FluidSolver::setup), so they stay valid after mesh
//! refinement. Each step records the `first_step` flag and the last coupling
//! data received, which makes them suitable for driving the coupling loop in
//! tests and benchmarks.

use crate::coupling::{InterfaceForceSample, TractionSample};
use crate::error::{FsiError, Result};
use crate::field::{FluidSolution, NodalScalarField, NodalVectorField, StressField};
use crate::mesh::{BoundaryIdSet, Mesh2D};
use crate::quadrature::{QuadratureRule1D, QuadratureRule2D};
use crate::types::{Point2, Tensor2, Vector2};

use super::cell_property::CellPropertyStore;
use super::traits::{FluidSolver, SolidSolver};

/// Scalar function of position.
pub type ScalarProfile = Box<dyn Fn(Point2) -> f64 + Send + Sync>;

/// Vector function of position.
pub type VectorProfile = Box<dyn Fn(Point2) -> Vector2 + Send + Sync>;

/// Tensor function of position.
pub type TensorProfile = Box<dyn Fn(Point2) -> Tensor2 + Send + Sync>;

fn zero_vector() -> VectorProfile {
    Box::new(|_| Vector2::ZERO)
}

/// Default number of Gauss points per direction.
const DEFAULT_QUADRATURE_POINTS: usize = 2;

// =============================================================================
// PrescribedFluid
// =============================================================================

/// Fluid collaborator whose velocity and pressure are given functions.
pub struct PrescribedFluid {
    mesh: Mesh2D,
    quadrature: QuadratureRule2D,
    viscosity: ScalarProfile,
    velocity: VectorProfile,
    velocity_increment: VectorProfile,
    pressure: ScalarProfile,

    properties: CellPropertyStore,
    present: FluidSolution,
    increment: FluidSolution,

    interface_force: Option<InterfaceForceSample>,
    step_flags: Vec<bool>,
}

impl PrescribedFluid {
    /// Fluid at rest with uniform viscosity on `mesh`.
    pub fn new(mesh: Mesh2D, viscosity: f64) -> Self {
        let mut fluid = Self {
            mesh,
            quadrature: QuadratureRule2D::gauss(DEFAULT_QUADRATURE_POINTS),
            viscosity: Box::new(move |_| viscosity),
            velocity: zero_vector(),
            velocity_increment: zero_vector(),
            pressure: Box::new(|_| 0.0),
            properties: CellPropertyStore::default(),
            present: FluidSolution::zeros(0),
            increment: FluidSolution::zeros(0),
            interface_force: None,
            step_flags: Vec::new(),
        };
        fluid.interpolate();
        fluid
    }

    pub fn with_quadrature(mut self, rule: QuadratureRule2D) -> Self {
        self.quadrature = rule;
        self
    }

    pub fn with_velocity(mut self, f: impl Fn(Point2) -> Vector2 + Send + Sync + 'static) -> Self {
        self.velocity = Box::new(f);
        self.interpolate();
        self
    }

    /// Velocity change over the last step.
    pub fn with_velocity_increment(
        mut self,
        f: impl Fn(Point2) -> Vector2 + Send + Sync + 'static,
    ) -> Self {
        self.velocity_increment = Box::new(f);
        self.interpolate();
        self
    }

    pub fn with_pressure(mut self, f: impl Fn(Point2) -> f64 + Send + Sync + 'static) -> Self {
        self.pressure = Box::new(f);
        self.interpolate();
        self
    }

    /// Per-cell viscosity, sampled at each cell center.
    pub fn with_viscosity(mut self, f: impl Fn(Point2) -> f64 + Send + Sync + 'static) -> Self {
        self.viscosity = Box::new(f);
        self.interpolate();
        self
    }

    /// `first_step` flags of every completed step, in order.
    pub fn step_flags(&self) -> &[bool] {
        &self.step_flags
    }

    pub fn steps_taken(&self) -> usize {
        self.step_flags.len()
    }

    /// Interface force received most recently.
    pub fn last_interface_force(&self) -> Option<&InterfaceForceSample> {
        self.interface_force.as_ref()
    }

    fn interpolate(&mut self) {
        let mesh = &self.mesh;
        self.present = FluidSolution {
            velocity: NodalVectorField::from_fn(mesh, &self.velocity),
            pressure: NodalScalarField::from_fn(mesh, &self.pressure),
        };
        self.increment = FluidSolution {
            velocity: NodalVectorField::from_fn(mesh, &self.velocity_increment),
            pressure: NodalScalarField::zeros(mesh.n_vertices),
        };

        self.properties = CellPropertyStore::new(mesh.n_active_cells(), 0.0);
        for k in 0..mesh.n_elements {
            let center = mesh.reference_to_physical(k, Point2::ZERO);
            self.properties.get_mut(k.into()).viscosity = (self.viscosity)(center);
        }
    }
}

impl FluidSolver for PrescribedFluid {
    fn mesh(&self) -> &Mesh2D {
        &self.mesh
    }

    fn refine_global(&mut self, times: usize) {
        self.mesh.refine_global(times);
    }

    fn setup(&mut self) -> Result<()> {
        self.interpolate();
        self.interface_force = None;
        Ok(())
    }

    fn volume_quadrature(&self) -> &QuadratureRule2D {
        &self.quadrature
    }

    fn cell_properties(&self) -> &CellPropertyStore {
        &self.properties
    }

    fn cell_properties_mut(&mut self) -> &mut CellPropertyStore {
        &mut self.properties
    }

    fn present_solution(&self) -> &FluidSolution {
        &self.present
    }

    fn solution_increment(&self) -> &FluidSolution {
        &self.increment
    }

    fn set_interface_force(&mut self, force: InterfaceForceSample) -> Result<()> {
        let expected = self.properties.n_artificial() * self.quadrature.size();
        if force.len() != expected {
            return Err(FsiError::SampleCountMismatch {
                what: "interface force",
                expected,
                actual: force.len(),
            });
        }
        self.interface_force = Some(force);
        Ok(())
    }

    fn run_one_step(&mut self, first_step: bool) -> Result<()> {
        if self.interface_force.is_none() {
            return Err(FsiError::solver_failure(
                "fluid",
                "step requested before interface force was set",
            ));
        }
        self.step_flags.push(first_step);
        Ok(())
    }
}

// =============================================================================
// PrescribedSolid
// =============================================================================

/// Solid collaborator whose displacement, acceleration and stress are
/// given functions of the reference position.
pub struct PrescribedSolid {
    mesh: Mesh2D,
    quadrature: QuadratureRule1D,
    dirichlet_boundaries: BoundaryIdSet,
    displacement_profile: VectorProfile,
    acceleration_profile: VectorProfile,
    stress_profile: TensorProfile,

    displacement: NodalVectorField,
    acceleration: NodalVectorField,
    stress: StressField,

    traction: Option<TractionSample>,
    step_flags: Vec<bool>,
}

impl PrescribedSolid {
    /// Solid at rest with zero stress on `mesh`.
    pub fn new(mesh: Mesh2D) -> Self {
        let mut solid = Self {
            mesh,
            quadrature: QuadratureRule1D::gauss(DEFAULT_QUADRATURE_POINTS),
            dirichlet_boundaries: BoundaryIdSet::new(),
            displacement_profile: zero_vector(),
            acceleration_profile: zero_vector(),
            stress_profile: Box::new(|_| Tensor2::ZERO),
            displacement: NodalVectorField::zeros(0),
            acceleration: NodalVectorField::zeros(0),
            stress: StressField::zeros(0),
            traction: None,
            step_flags: Vec::new(),
        };
        solid.interpolate();
        solid
    }

    pub fn with_quadrature(mut self, rule: QuadratureRule1D) -> Self {
        self.quadrature = rule;
        self
    }

    pub fn with_displacement(
        mut self,
        f: impl Fn(Point2) -> Vector2 + Send + Sync + 'static,
    ) -> Self {
        self.displacement_profile = Box::new(f);
        self.interpolate();
        self
    }

    pub fn with_acceleration(
        mut self,
        f: impl Fn(Point2) -> Vector2 + Send + Sync + 'static,
    ) -> Self {
        self.acceleration_profile = Box::new(f);
        self.interpolate();
        self
    }

    pub fn with_stress(mut self, f: impl Fn(Point2) -> Tensor2 + Send + Sync + 'static) -> Self {
        self.stress_profile = Box::new(f);
        self.interpolate();
        self
    }

    pub fn step_flags(&self) -> &[bool] {
        &self.step_flags
    }

    pub fn steps_taken(&self) -> usize {
        self.step_flags.len()
    }

    /// Traction received most recently.
    pub fn last_traction(&self) -> Option<&TractionSample> {
        self.traction.as_ref()
    }

    /// Number of traction samples one step must deliver.
    pub fn expected_traction_len(&self) -> usize {
        let mesh = &self.mesh;
        let eligible_faces = (0..mesh.n_elements)
            .flat_map(|k| (0..4).map(move |f| (k, f)))
            .filter(|&(k, f)| {
                mesh.boundary_id(k, f)
                    .is_some_and(|id| !self.dirichlet_boundaries.contains(id))
            })
            .count();
        eligible_faces * self.quadrature.size()
    }

    fn interpolate(&mut self) {
        let mesh = &self.mesh;
        self.displacement = NodalVectorField::from_fn(mesh, &self.displacement_profile);
        self.acceleration = NodalVectorField::from_fn(mesh, &self.acceleration_profile);
        self.stress = StressField::from_fn(mesh, &self.stress_profile);
    }
}

impl SolidSolver for PrescribedSolid {
    fn mesh(&self) -> &Mesh2D {
        &self.mesh
    }

    fn mesh_mut(&mut self) -> &mut Mesh2D {
        &mut self.mesh
    }

    fn set_dirichlet_boundaries(&mut self, ids: &BoundaryIdSet) {
        self.dirichlet_boundaries = ids.clone();
    }

    fn setup(&mut self) -> Result<()> {
        self.interpolate();
        self.traction = None;
        Ok(())
    }

    fn face_quadrature(&self) -> &QuadratureRule1D {
        &self.quadrature
    }

    fn current_displacement(&self) -> &NodalVectorField {
        &self.displacement
    }

    fn current_acceleration(&self) -> &NodalVectorField {
        &self.acceleration
    }

    fn stress(&self) -> &StressField {
        &self.stress
    }

    fn set_fluid_traction(&mut self, traction: TractionSample) -> Result<()> {
        let expected = self.expected_traction_len();
        if traction.len() != expected {
            return Err(FsiError::SampleCountMismatch {
                what: "fluid traction",
                expected,
                actual: traction.len(),
            });
        }
        self.traction = Some(traction);
        Ok(())
    }

    fn run_one_step(&mut self, first_step: bool) -> Result<()> {
        if self.traction.is_none() {
            return Err(FsiError::solver_failure(
                "solid",
                "step requested before fluid traction was set",
            ));
        }
        self.step_flags.push(first_step);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::BoundaryId;
    use crate::types::{ElementIndex, SymmetricTensor2};

    #[test]
    fn test_fluid_setup_after_refinement() {
        let mut fluid = PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 2, 2), 0.1)
            .with_pressure(|p| p.x);
        assert_eq!(fluid.cell_properties().len(), 4);

        fluid.refine_global(1);
        fluid.setup().unwrap();

        assert_eq!(fluid.cell_properties().len(), 16);
        assert_eq!(fluid.present_solution().pressure.n_dofs(), fluid.mesh().n_vertices);
        assert_eq!(fluid.cell_properties().get(ElementIndex::new(15)).viscosity, 0.1);
    }

    #[test]
    fn test_fluid_rejects_wrong_force_length() {
        let mut fluid = PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 2, 2), 0.1);
        fluid
            .cell_properties_mut()
            .set_indicator(ElementIndex::new(0), crate::solver::Indicator::Artificial);

        let force = InterfaceForceSample {
            stress: vec![SymmetricTensor2::ZERO; 3],
            acceleration: vec![Vector2::ZERO; 3],
        };
        let err = fluid.set_interface_force(force).unwrap_err();
        assert!(matches!(
            err,
            FsiError::SampleCountMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_step_before_coupling_data_fails() {
        let mut solid = PrescribedSolid::new(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 1, 1));
        assert!(matches!(
            solid.run_one_step(true),
            Err(FsiError::SolverFailure { .. })
        ));
    }

    #[test]
    fn test_expected_traction_len_excludes_dirichlet() {
        let mesh = Mesh2D::uniform_rectangle_colorized(0.0, 1.0, 0.0, 1.0, 2, 2);
        let mut solid = PrescribedSolid::new(mesh);
        // 8 boundary faces × 2 points
        assert_eq!(solid.expected_traction_len(), 16);

        solid.set_dirichlet_boundaries(&[BoundaryId(0), BoundaryId(2)].into_iter().collect());
        assert_eq!(solid.expected_traction_len(), 8);

        solid.set_dirichlet_boundaries(&BoundaryIdSet::new());
        assert_eq!(solid.expected_traction_len(), 16);
    }
}
