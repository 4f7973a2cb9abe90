//! Immersed-boundary forcing for covered fluid cells.
//!
//! At every quadrature point of a covered cell the fluid-side stress and
//! material acceleration are compared with the solid's:
//!
//! ```text
//! σ_f = -p I + μ sym(∇v)
//! a_f = Δv / Δt + (∇v) v
//! ```
//!
//! and the differences `σ_f - σ_s`, `a_f - a_s` are handed to the fluid
//! solver as forcing.

use crate::error::{FsiError, Result};
use crate::fe::FeValues;
use crate::field::FeField;
use crate::solver::{FluidSolver, SolidSolver};
use crate::types::{SymmetricTensor2, Vector2};

use super::policy::OutsidePointPolicy;

/// Stress and acceleration differences at the quadrature points of all
/// covered fluid cells.
///
/// Entries are ordered by cell index, then by quadrature point in rule
/// order. Both sequences always have the same length and are paired by
/// position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InterfaceForceSample {
    /// `σ_f - σ_s` per point
    pub stress: Vec<SymmetricTensor2>,
    /// `a_f - a_s` per point
    pub acceleration: Vec<Vector2>,
}

impl InterfaceForceSample {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            stress: Vec::with_capacity(n),
            acceleration: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, stress: SymmetricTensor2, acceleration: Vector2) {
        self.stress.push(stress);
        self.acceleration.push(acceleration);
    }

    /// Number of quadrature points sampled.
    #[inline]
    pub fn len(&self) -> usize {
        self.stress.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stress.is_empty()
    }
}

/// Compute the interface force for every fluid cell marked
/// [`Indicator::Artificial`](crate::solver::Indicator::Artificial).
///
/// Cells marked fluid contribute nothing. Viscosity comes from the cell
/// property store. Solid acceleration and stress are evaluated on the solid
/// mesh in its reference configuration; `policy` decides what happens when
/// a point lies outside it.
pub fn find_fluid_fsi<F, S>(
    fluid: &F,
    solid: &S,
    time_step: f64,
    policy: OutsidePointPolicy,
) -> Result<InterfaceForceSample>
where
    F: FluidSolver + ?Sized,
    S: SolidSolver + ?Sized,
{
    if !(time_step > 0.0) {
        return Err(FsiError::invalid_parameter(
            "time_step",
            format!("must be positive, got {}", time_step),
        ));
    }

    let mesh = fluid.mesh();
    let rule = fluid.volume_quadrature();
    let store = fluid.cell_properties();
    if store.len() != mesh.n_active_cells() {
        return Err(FsiError::SampleCountMismatch {
            what: "fluid cell properties",
            expected: mesh.n_active_cells(),
            actual: store.len(),
        });
    }

    let present = fluid.present_solution();
    let increment = fluid.solution_increment();

    let solid_mesh = solid.mesh();
    let solid_acceleration = solid.current_acceleration();
    let solid_stress = solid.stress();

    let mut fe = FeValues::new(rule);
    let mut sample = InterfaceForceSample::with_capacity(store.n_artificial() * rule.size());

    for (cell, property) in store.iter().filter(|(_, p)| p.indicator.is_artificial()) {
        fe.reinit(mesh, cell)?;

        let velocity = fe.vector_values(&present.velocity);
        let velocity_gradient = fe.vector_gradients(&present.velocity);
        let pressure = fe.scalar_values(&present.pressure);
        let velocity_increment = fe.vector_values(&increment.velocity);

        for (q, &x) in fe.quadrature_points().iter().enumerate() {
            let grad_v = velocity_gradient[q];
            let fluid_stress = -pressure[q] * SymmetricTensor2::identity()
                + property.viscosity * grad_v.symmetrize();
            let fluid_acceleration = velocity_increment[q] / time_step + grad_v * velocity[q];

            let solid_state = solid_mesh.find_active_cell(x).map(|(solid_cell, xi)| {
                (
                    solid_acceleration.value_in_cell(solid_mesh, solid_cell, xi),
                    solid_stress.value_in_cell(solid_mesh, solid_cell, xi),
                )
            });
            let (a_s, sigma_s) = policy.resolve(solid_state, "solid", x)?;

            sample.push(fluid_stress - sigma_s, fluid_acceleration - a_s);
        }
    }

    log::trace!("Interface force sampled at {} points", sample.len());
    Ok(sample)
}
