//! Fluid traction on the free boundary of the solid.

use crate::error::Result;
use crate::fe::FeFaceValues;
use crate::field::FeField;
use crate::mesh::BoundaryIdSet;
use crate::solver::{FluidSolver, SolidSolver};
use crate::types::{ElementIndex, SymmetricTensor2, Vector2};

use super::policy::OutsidePointPolicy;

/// Traction vectors at the quadrature points of the solid's free boundary.
///
/// Ordered by solid cell index, then face 0..4, then face quadrature point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TractionSample {
    pub traction: Vec<Vector2>,
}

impl TractionSample {
    #[inline]
    pub fn len(&self) -> usize {
        self.traction.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.traction.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector2> {
        self.traction.iter()
    }
}

/// Compute `σ n` with `σ = -p I + μ sym(∇v)` on every solid boundary face
/// whose identifier is not in `dirichlet_boundaries`.
///
/// Face points and normals are taken on the undeformed solid mesh. The
/// fluid velocity gradient and pressure are evaluated in the first fluid
/// cell containing each point.
pub fn find_solid_bc<F, S>(
    fluid: &F,
    solid: &S,
    viscosity: f64,
    dirichlet_boundaries: &BoundaryIdSet,
    policy: OutsidePointPolicy,
) -> Result<TractionSample>
where
    F: FluidSolver + ?Sized,
    S: SolidSolver + ?Sized,
{
    let fluid_mesh = fluid.mesh();
    let velocity = &fluid.present_solution().velocity;
    let pressure = &fluid.present_solution().pressure;

    let solid_mesh = solid.mesh();
    let mut fe_face = FeFaceValues::new(solid.face_quadrature());
    let mut sample = TractionSample::default();

    for cell in ElementIndex::iter(solid_mesh.n_active_cells()) {
        for face in 0..4 {
            let Some(id) = solid_mesh.boundary_id(cell.as_usize(), face) else {
                continue;
            };
            if dirichlet_boundaries.contains(id) {
                continue;
            }

            fe_face.reinit(solid_mesh, cell, face)?;

            for (q, &x) in fe_face.quadrature_points().iter().enumerate() {
                let fluid_state = match fluid_mesh.find_active_cell(x) {
                    Some((fluid_cell, xi)) => Some((
                        velocity.gradient_in_cell(fluid_mesh, fluid_cell, xi)?,
                        pressure.value_in_cell(fluid_mesh, fluid_cell, xi),
                    )),
                    None => None,
                };
                let (grad_v, p) = policy.resolve(fluid_state, "fluid", x)?;

                let stress = -p * SymmetricTensor2::identity() + viscosity * grad_v.symmetrize();
                sample.traction.push(stress * fe_face.normal_vector(q));
            }
        }
    }

    log::trace!("Fluid traction sampled at {} points", sample.len());
    Ok(sample)
}
