//! Integration tests for the fluid-solid data transfers.
//!
//! These tests verify:
//! - Interface force is the difference of fluid and solid stress and
//!   acceleration at every covered quadrature point
//! - Solid quantities are evaluated on the reference solid configuration
//! - The outside-point policy for points not in the reference solid mesh
//! - Traction on Dirichlet faces is dropped while the remaining samples keep
//!   their order

use approx::assert_relative_eq;
use fsi_rs::{
    BoundaryId, BoundaryIdSet, FeValues, FluidSolver, FsiError, Mesh2D, OutsidePointPolicy,
    Point2, PrescribedFluid, PrescribedSolid, SolidSolver, SymmetricTensor2, Tensor2, Vector2,
    find_fluid_fsi, find_solid_bc, update_indicator,
};

const VISCOSITY: f64 = 0.05;
const DT: f64 = 0.1;

/// v = (x, -y): grad v = diag(1, -1), (grad v) v = (x, y).
fn stagnation_fluid(mesh: Mesh2D) -> PrescribedFluid {
    PrescribedFluid::new(mesh, VISCOSITY)
        .with_velocity(|p| Vector2::new(p.x, -p.y))
        .with_velocity_increment(|_| Vector2::new(0.1, 0.0))
        .with_pressure(|p| 2.0 - p.y)
}

#[test]
fn test_force_is_fluid_minus_solid() {
    let mut fluid = stagnation_fluid(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 8, 8));
    let mut solid = PrescribedSolid::new(Mesh2D::uniform_rectangle(0.2, 0.8, 0.2, 0.8, 3, 3))
        .with_acceleration(|_| Vector2::new(1.0, 2.0))
        .with_stress(|_| Tensor2::new([[1.0, 2.0], [4.0, 3.0]]));
    fluid.setup().unwrap();
    solid.setup().unwrap();

    let covered = update_indicator(&mut fluid, &mut solid).unwrap();
    // Cells inside [0.25, 0.75]²
    assert_eq!(covered, 16);

    let force = find_fluid_fsi(&fluid, &solid, DT, OutsidePointPolicy::Error).unwrap();
    assert_eq!(force.len(), 16 * 4);

    let mut fe = FeValues::new(fluid.volume_quadrature());
    let mut i = 0;
    for (cell, property) in fluid.cell_properties().iter() {
        if !property.indicator.is_artificial() {
            continue;
        }
        fe.reinit(fluid.mesh(), cell).unwrap();
        for &x in fe.quadrature_points() {
            // Solid stress symmetrized: xy = (2 + 4) / 2
            let fluid_stress = -(2.0 - x.y) * SymmetricTensor2::identity()
                + VISCOSITY * SymmetricTensor2::new(1.0, 0.0, -1.0);
            let expected_stress = fluid_stress - SymmetricTensor2::new(1.0, 3.0, 3.0);
            let expected_accel = Vector2::new(1.0 + x.x, x.y) - Vector2::new(1.0, 2.0);

            assert_relative_eq!(force.stress[i].xx, expected_stress.xx, epsilon = 1e-10);
            assert_relative_eq!(force.stress[i].xy, expected_stress.xy, epsilon = 1e-10);
            assert_relative_eq!(force.stress[i].yy, expected_stress.yy, epsilon = 1e-10);
            assert_relative_eq!(force.acceleration[i].x, expected_accel.x, epsilon = 1e-10);
            assert_relative_eq!(force.acceleration[i].y, expected_accel.y, epsilon = 1e-10);
            i += 1;
        }
    }
    assert_eq!(i, force.len());
}

#[test]
fn test_force_ignores_uncovered_cells() {
    let mut fluid = stagnation_fluid(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 4, 4));
    // Thin strip narrower than a fluid cell: touches cells, covers none
    let mut solid = PrescribedSolid::new(Mesh2D::uniform_rectangle(0.3, 0.4, 0.0, 1.0, 1, 4));
    fluid.setup().unwrap();
    solid.setup().unwrap();

    assert_eq!(update_indicator(&mut fluid, &mut solid).unwrap(), 0);
    let force = find_fluid_fsi(&fluid, &solid, DT, OutsidePointPolicy::Error).unwrap();
    assert!(force.is_empty());
}

#[test]
fn test_displaced_solid_uses_reference_configuration() {
    let mut fluid = stagnation_fluid(Mesh2D::uniform_rectangle(0.0, 2.0, 0.0, 1.0, 8, 4));
    // Reference solid covers [0.25, 0.75] x [0.25, 0.75]; displaced by +0.25 in x
    let mut solid = PrescribedSolid::new(Mesh2D::uniform_rectangle(0.25, 0.75, 0.25, 0.75, 2, 2))
        .with_displacement(|_| Vector2::new(0.25, 0.0))
        .with_acceleration(|p| Vector2::new(p.x, 0.0));
    fluid.setup().unwrap();
    solid.setup().unwrap();

    // Covered cells are those of [0.5, 1.0] x [0.25, 0.75]
    assert_eq!(update_indicator(&mut fluid, &mut solid).unwrap(), 4);

    // Half of the covered points lie right of the reference solid
    let err = find_fluid_fsi(&fluid, &solid, DT, OutsidePointPolicy::Error).unwrap_err();
    assert!(matches!(err, FsiError::PointOutsideMesh { mesh: "solid", .. }));

    let force = find_fluid_fsi(&fluid, &solid, DT, OutsidePointPolicy::Zero).unwrap();
    assert_eq!(force.len(), 16);

    let mut fe = FeValues::new(fluid.volume_quadrature());
    let mut i = 0;
    for (cell, property) in fluid.cell_properties().iter() {
        if !property.indicator.is_artificial() {
            continue;
        }
        fe.reinit(fluid.mesh(), cell).unwrap();
        for &x in fe.quadrature_points() {
            let fluid_accel = Vector2::new(1.0 + x.x, x.y);
            // Reference solid acceleration at the point, zero outside it
            let solid_accel = if x.x < 0.75 {
                Vector2::new(x.x, 0.0)
            } else {
                Vector2::ZERO
            };
            let expected = fluid_accel - solid_accel;
            assert_relative_eq!(force.acceleration[i].x, expected.x, epsilon = 1e-10);
            assert_relative_eq!(force.acceleration[i].y, expected.y, epsilon = 1e-10);
            i += 1;
        }
    }
    assert_eq!(i, force.len());
}

#[test]
fn test_dirichlet_exclusion_keeps_order() {
    let fluid = stagnation_fluid(Mesh2D::uniform_rectangle(-1.0, 2.0, -1.0, 2.0, 6, 6));
    let solid_mesh = Mesh2D::uniform_rectangle_colorized(0.0, 1.0, 0.0, 0.5, 3, 2);
    let solid = PrescribedSolid::new(solid_mesh.clone());

    let policy = OutsidePointPolicy::Error;
    let all = find_solid_bc(&fluid, &solid, VISCOSITY, &BoundaryIdSet::new(), policy).unwrap();
    let clamped: BoundaryIdSet = [BoundaryId(0), BoundaryId(2)].into_iter().collect();
    let free = find_solid_bc(&fluid, &solid, VISCOSITY, &clamped, policy).unwrap();

    let nq = solid.face_quadrature().size();
    let mut expected = Vec::new();
    let mut offset = 0;
    for cell in 0..solid_mesh.n_active_cells() {
        for face in 0..4 {
            let Some(id) = solid_mesh.boundary_id(cell, face) else {
                continue;
            };
            if !clamped.contains(id) {
                expected.extend_from_slice(&all.traction[offset..offset + nq]);
            }
            offset += nq;
        }
    }
    assert_eq!(offset, all.len());
    // Right (2 faces) and top (3 faces) remain
    assert_eq!(free.len(), 5 * nq);
    assert_eq!(free.traction, expected);
}

#[test]
fn test_traction_matches_fluid_stress() {
    let fluid = stagnation_fluid(Mesh2D::uniform_rectangle(-1.0, 2.0, -1.0, 2.0, 6, 6));
    let solid =
        PrescribedSolid::new(Mesh2D::uniform_rectangle_colorized(0.0, 1.0, 0.0, 1.0, 1, 1));

    // Only the right face (id 1), outward normal (1, 0), x = 1
    let dirichlet: BoundaryIdSet = [0u32, 2, 3].into_iter().collect();
    let sample = find_solid_bc(&fluid, &solid, VISCOSITY, &dirichlet, OutsidePointPolicy::Error)
        .unwrap();
    assert_eq!(sample.len(), 2);

    let (a, b) = solid.mesh().face_vertices(0, 1);
    let face_points: Vec<Point2> = solid
        .face_quadrature()
        .points
        .iter()
        .map(|&t| a * ((1.0 - t) / 2.0) + b * ((1.0 + t) / 2.0))
        .collect();

    for (t, x) in sample.iter().zip(&face_points) {
        // σ n = (-p + μ, 0)
        assert_relative_eq!(t.x, -(2.0 - x.y) + VISCOSITY, epsilon = 1e-10);
        assert_relative_eq!(t.y, 0.0, epsilon = 1e-10);
    }
}
