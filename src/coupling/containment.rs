//! Point containment against the current geometry of a mesh.

use crate::mesh::Mesh2D;
use crate::types::Point2;

/// Check whether `p` lies inside any cell of `mesh`.
///
/// Cells are scanned in index order and the scan stops at the first cell
/// whose containment test succeeds. Cost is linear in the cell count.
pub fn point_in_mesh(mesh: &Mesh2D, p: Point2) -> bool {
    (0..mesh.n_elements).any(|k| mesh.point_inside(k, p))
}
