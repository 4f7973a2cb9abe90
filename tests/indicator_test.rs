//! Integration tests for the fluid cell indicator and interface force.
//!
//! These tests verify:
//! - A solid disk at rest covers exactly the fluid cells whose quadrature
//!   points all lie inside it
//! - Covered cells receive one force sample per quadrature point
//! - With a solid at rest and stress-free, the force reduces to the fluid's
//!   own stress and acceleration
//! - The solid mesh is back in its reference configuration after the update
//! - A displaced solid covers cells of its deformed shape only
//! - Coverage does not change when the whole problem is moved away from the
//!   origin

use approx::assert_relative_eq;
use fsi_rs::{
    ElementIndex, FeValues, FluidSolver, Indicator, Mesh2D, OutsidePointPolicy, Point2,
    PrescribedFluid, PrescribedSolid, SolidSolver, SymmetricTensor2, Vector2, find_fluid_fsi,
    point_in_mesh, update_indicator,
};

const VISCOSITY: f64 = 0.01;

fn fluid_square() -> PrescribedFluid {
    PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 8, 8), VISCOSITY)
}

fn disk_solid() -> PrescribedSolid {
    PrescribedSolid::new(Mesh2D::disk(Point2::new(0.5, 0.5), 0.3, 4))
}

/// Cells whose quadrature points all lie in `solid`, found independently of
/// the indicator update.
fn expected_cover(fluid: &PrescribedFluid, solid: &Mesh2D) -> Vec<bool> {
    let mut fe = FeValues::new(fluid.volume_quadrature());
    ElementIndex::iter(fluid.mesh().n_active_cells())
        .map(|cell| {
            fe.reinit(fluid.mesh(), cell).unwrap();
            fe.quadrature_points().iter().all(|&x| point_in_mesh(solid, x))
        })
        .collect()
}

/// Scenario: disk at rest in the middle of a square channel.
#[test]
fn test_disk_at_rest_covers_inner_cells() {
    let mut fluid = fluid_square();
    let mut solid = disk_solid();
    fluid.setup().unwrap();
    solid.setup().unwrap();

    let expected = expected_cover(&fluid, solid.mesh());
    let covered = update_indicator(&mut fluid, &mut solid).unwrap();

    assert_eq!(covered, expected.iter().filter(|c| **c).count());
    assert!(covered > 0);
    for (cell, property) in fluid.cell_properties().iter() {
        assert_eq!(
            property.indicator.is_artificial(),
            expected[cell.as_usize()],
            "cell {}",
            cell
        );
    }

    // Cells touching the center point are well inside the disk
    let center_cell = fluid.mesh().find_active_cell(Point2::new(0.45, 0.45)).unwrap().0;
    assert_eq!(fluid.cell_properties().indicator(center_cell), Indicator::Artificial);
    assert_eq!(fluid.cell_properties().indicator(center_cell).value(), 1);

    // Corner cells are far outside the disk
    let corner_cell = fluid.mesh().find_active_cell(Point2::new(0.05, 0.05)).unwrap().0;
    assert_eq!(fluid.cell_properties().indicator(corner_cell), Indicator::Fluid);
    assert_eq!(fluid.cell_properties().indicator(corner_cell).value(), 0);
}

/// With a stress-free solid at rest the force is the fluid's own stress
/// `-p I + μ sym(∇v)` and acceleration `Δv/Δt + (∇v) v`.
#[test]
fn test_force_reduces_to_fluid_state() {
    let dt = 0.1;
    // v = (y, 0): grad v = [[0, 1], [0, 0]], (grad v) v = 0
    let mut fluid = fluid_square()
        .with_velocity(|p| Vector2::new(p.y, 0.0))
        .with_pressure(|p| 1.0 + p.x);
    let mut solid = disk_solid();
    fluid.setup().unwrap();
    solid.setup().unwrap();

    let covered = update_indicator(&mut fluid, &mut solid).unwrap();
    let force = find_fluid_fsi(&fluid, &solid, dt, OutsidePointPolicy::Error).unwrap();

    let nq = fluid.volume_quadrature().size();
    assert_eq!(force.len(), covered * nq);
    assert_eq!(force.acceleration.len(), force.stress.len());

    let mut fe = FeValues::new(fluid.volume_quadrature());
    let mut i = 0;
    for (cell, property) in fluid.cell_properties().iter() {
        if !property.indicator.is_artificial() {
            continue;
        }
        fe.reinit(fluid.mesh(), cell).unwrap();
        for &x in fe.quadrature_points() {
            let p = 1.0 + x.x;
            let viscous = VISCOSITY * SymmetricTensor2::new(0.0, 0.5, 0.0);
            let expected = -p * SymmetricTensor2::identity() + viscous;
            assert_relative_eq!(force.stress[i].xx, expected.xx, epsilon = 1e-10);
            assert_relative_eq!(force.stress[i].xy, expected.xy, epsilon = 1e-10);
            assert_relative_eq!(force.stress[i].yy, expected.yy, epsilon = 1e-10);
            assert_relative_eq!(force.acceleration[i].x, 0.0, epsilon = 1e-10);
            assert_relative_eq!(force.acceleration[i].y, 0.0, epsilon = 1e-10);
            i += 1;
        }
    }
    assert_eq!(i, force.len());
}

#[test]
fn test_solid_mesh_restored_after_update() {
    let mut fluid = fluid_square();
    let mut solid =
        disk_solid().with_displacement(|p| Vector2::new(0.1 * (p.y - 0.5), 0.05 * p.x * p.x));
    fluid.setup().unwrap();
    solid.setup().unwrap();
    let reference = solid.mesh().vertices.clone();

    update_indicator(&mut fluid, &mut solid).unwrap();
    assert_eq!(solid.mesh().vertices, reference);

    // Repeating the update gives the same answer and still restores
    let first: Vec<Indicator> = fluid.cell_properties().iter().map(|(_, p)| p.indicator).collect();
    update_indicator(&mut fluid, &mut solid).unwrap();
    let second: Vec<Indicator> = fluid.cell_properties().iter().map(|(_, p)| p.indicator).collect();
    assert_eq!(first, second);
    assert_eq!(solid.mesh().vertices, reference);
}

#[test]
fn test_translated_disk_covers_deformed_shape() {
    let shift = Vector2::new(0.25, 0.0);
    let mut fluid =
        PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 1.5, 0.0, 1.0, 12, 8), VISCOSITY);
    let mut solid = disk_solid().with_displacement(move |_| shift);
    fluid.setup().unwrap();
    solid.setup().unwrap();

    let mut moved = solid.mesh().clone();
    for v in moved.vertices.iter_mut() {
        *v += shift;
    }
    let expected = expected_cover(&fluid, &moved);
    let unmoved = expected_cover(&fluid, solid.mesh());
    assert_ne!(expected, unmoved);

    let covered = update_indicator(&mut fluid, &mut solid).unwrap();
    assert_eq!(covered, expected.iter().filter(|c| **c).count());
    for (cell, property) in fluid.cell_properties().iter() {
        assert_eq!(property.indicator.is_artificial(), expected[cell.as_usize()]);
    }

    // Nothing left of the translated disk's bounding box is covered
    for (cell, property) in fluid.cell_properties().iter() {
        let bounds = fluid.mesh().element_bounds(cell.as_usize());
        if bounds.x_max < 0.45 {
            assert!(!property.indicator.is_artificial());
        }
    }
}

#[test]
fn test_shifted_problem_covers_same_cells() {
    let indicators_at = |x0: f64| {
        let mut fluid = PrescribedFluid::new(
            Mesh2D::uniform_rectangle(x0, x0 + 1.0, 0.0, 1.0, 8, 8),
            VISCOSITY,
        );
        let mut solid = PrescribedSolid::new(Mesh2D::disk(Point2::new(x0 + 0.5, 0.5), 0.3, 4));
        fluid.setup().unwrap();
        solid.setup().unwrap();

        let covered = update_indicator(&mut fluid, &mut solid).unwrap();
        // Every covered point must also be found in the reference solid
        let force = find_fluid_fsi(&fluid, &solid, 0.01, OutsidePointPolicy::Error).unwrap();
        assert_eq!(force.len(), covered * fluid.volume_quadrature().size());

        let indicators: Vec<Indicator> =
            fluid.cell_properties().iter().map(|(_, p)| p.indicator).collect();
        (covered, indicators)
    };

    let (covered, reference) = indicators_at(0.0);
    assert!(covered > 0);
    for x0 in [1.0, 10.0, 100.0, 1000.0] {
        let (shifted_covered, shifted) = indicators_at(x0);
        assert_eq!(shifted_covered, covered, "x0 = {}", x0);
        assert_eq!(shifted, reference, "x0 = {}", x0);
    }
}

#[test]
fn test_solid_outside_fluid_covers_nothing() {
    let mut fluid = fluid_square();
    let mut solid = PrescribedSolid::new(Mesh2D::disk(Point2::new(3.0, 3.0), 0.5, 2));
    fluid.setup().unwrap();
    solid.setup().unwrap();

    assert_eq!(update_indicator(&mut fluid, &mut solid).unwrap(), 0);
    assert_eq!(fluid.cell_properties().n_artificial(), 0);

    let force = find_fluid_fsi(&fluid, &solid, 0.01, OutsidePointPolicy::Error).unwrap();
    assert!(force.is_empty());
}
