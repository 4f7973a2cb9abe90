//! Bilinear (Q1) shape functions on the reference square.
//!
//! Local vertex ordering matches the mesh (counter-clockwise):
//! - N0 at (r, s) = (-1, -1)
//! - N1 at (r, s) = (+1, -1)
//! - N2 at (r, s) = (+1, +1)
//! - N3 at (r, s) = (-1, +1)
//!
//! N_i(r, s) = (1 + r r_i)(1 + s s_i) / 4

use crate::types::{Point2, Vector2};

/// Reference coordinates of the four local vertices.
pub const Q1_VERTICES: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Shape function values at a reference point.
#[inline]
pub fn q1_values(xi: Point2) -> [f64; 4] {
    let (r, s) = (xi.x, xi.y);
    [
        (1.0 - r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 + s) / 4.0,
        (1.0 - r) * (1.0 + s) / 4.0,
    ]
}

/// Shape function gradients with respect to (r, s) at a reference point.
#[inline]
pub fn q1_reference_gradients(xi: Point2) -> [Vector2; 4] {
    let (r, s) = (xi.x, xi.y);
    [
        Vector2::new(-(1.0 - s) / 4.0, -(1.0 - r) / 4.0),
        Vector2::new((1.0 - s) / 4.0, -(1.0 + r) / 4.0),
        Vector2::new((1.0 + s) / 4.0, (1.0 + r) / 4.0),
        Vector2::new(-(1.0 + s) / 4.0, (1.0 - r) / 4.0),
    ]
}
