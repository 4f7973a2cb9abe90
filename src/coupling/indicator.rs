//! Fluid cell indicator from the current solid configuration.
//!
//! A fluid cell is covered ("artificial fluid") only if every one of its
//! quadrature points lies inside the deformed solid mesh. Partially covered
//! cells stay fluid.

use crate::error::{FsiError, Result};
use crate::fe::FeValues;
use crate::mesh::Mesh2D;
use crate::quadrature::QuadratureRule2D;
use crate::solver::{FluidSolver, Indicator, SolidSolver};
use crate::types::ElementIndex;

use super::containment::point_in_mesh;
use super::transform::MeshTransform;

/// Recompute the indicator of every fluid cell.
///
/// The solid mesh is deformed by its current displacement for the duration
/// of the containment queries and restored before this function returns,
/// whether or not an error occurred. Returns the number of covered cells.
pub fn update_indicator<F, S>(fluid: &mut F, solid: &mut S) -> Result<usize>
where
    F: FluidSolver + ?Sized,
    S: SolidSolver + ?Sized,
{
    let transform = MeshTransform::new(solid.mesh(), solid.current_displacement())?;
    let covered = {
        let deformed = transform.deform(solid.mesh_mut())?;
        covered_cells(fluid.mesh(), fluid.volume_quadrature(), &deformed)?
    };

    write_indicator(fluid, &covered)
}

/// Parallel version of [`update_indicator`] using Rayon.
///
/// Cells are tested independently and collected in cell order, so the
/// result is identical to the serial update.
#[cfg(feature = "parallel")]
pub fn update_indicator_parallel<F, S>(fluid: &mut F, solid: &mut S) -> Result<usize>
where
    F: FluidSolver + ?Sized,
    S: SolidSolver + ?Sized,
{
    use rayon::prelude::*;

    let transform = MeshTransform::new(solid.mesh(), solid.current_displacement())?;
    let covered = {
        let deformed = transform.deform(solid.mesh_mut())?;
        let solid_mesh: &Mesh2D = &deformed;
        let fluid_mesh = fluid.mesh();
        let rule = fluid.volume_quadrature();

        (0..fluid_mesh.n_active_cells())
            .into_par_iter()
            .map_init(
                || FeValues::new(rule),
                |fe, k| cell_is_covered(fe, fluid_mesh, ElementIndex::new(k), solid_mesh),
            )
            .collect::<Result<Vec<bool>>>()?
    };

    write_indicator(fluid, &covered)
}

/// Coverage flag of every fluid cell, in cell order.
fn covered_cells(
    fluid_mesh: &Mesh2D,
    rule: &QuadratureRule2D,
    solid_mesh: &Mesh2D,
) -> Result<Vec<bool>> {
    let mut fe = FeValues::new(rule);
    ElementIndex::iter(fluid_mesh.n_active_cells())
        .map(|cell| cell_is_covered(&mut fe, fluid_mesh, cell, solid_mesh))
        .collect()
}

fn cell_is_covered(
    fe: &mut FeValues,
    fluid_mesh: &Mesh2D,
    cell: ElementIndex,
    solid_mesh: &Mesh2D,
) -> Result<bool> {
    fe.reinit(fluid_mesh, cell)?;
    Ok(fe
        .quadrature_points()
        .iter()
        .all(|&p| point_in_mesh(solid_mesh, p)))
}

fn write_indicator<F: FluidSolver + ?Sized>(fluid: &mut F, covered: &[bool]) -> Result<usize> {
    let store = fluid.cell_properties_mut();
    if store.len() != covered.len() {
        return Err(FsiError::SampleCountMismatch {
            what: "fluid cell properties",
            expected: covered.len(),
            actual: store.len(),
        });
    }

    for (k, &is_covered) in covered.iter().enumerate() {
        store.set_indicator(ElementIndex::new(k), Indicator::from(is_covered));
    }

    let n_covered = covered.iter().filter(|&&c| c).count();
    log::trace!("Indicator updated: {} of {} fluid cells covered", n_covered, covered.len());
    Ok(n_covered)
}
