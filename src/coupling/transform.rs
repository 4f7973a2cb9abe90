//! Reversible displacement of the solid mesh.
//!
//! The solid mesh is stored in its reference configuration. Geometric
//! queries against the current configuration deform it temporarily with a
//! [`MeshTransform`] and must leave it bit-for-bit unchanged afterwards.
//! Forward application records the reference coordinates and backward
//! application writes them back, so restoration never depends on
//! `(x + d) - d == x`, which does not hold in floating point.

use std::ops::Deref;

use crate::error::{FsiError, Result};
use crate::field::NodalVectorField;
use crate::mesh::Mesh2D;
use crate::types::{Point2, Vector2, VertexIndex};

/// Per-vertex displacement of a mesh, applied and undone on demand.
#[derive(Clone, Debug)]
pub struct MeshTransform {
    displacements: Vec<Vector2>,
    reference: Option<Vec<Point2>>,
}

impl MeshTransform {
    /// Gather the nodal displacement of every vertex of `mesh`.
    ///
    /// Cells are walked in index order and each vertex is read once,
    /// however many cells share it. Vertices belonging to no cell keep a
    /// zero displacement.
    pub fn new(mesh: &Mesh2D, displacement: &NodalVectorField) -> Result<Self> {
        if displacement.n_vertices() != mesh.n_vertices {
            return Err(FsiError::SampleCountMismatch {
                what: "solid displacement",
                expected: 2 * mesh.n_vertices,
                actual: displacement.n_dofs(),
            });
        }

        let mut displacements = vec![Vector2::ZERO; mesh.n_vertices];
        let mut visited = vec![false; mesh.n_vertices];
        let mut n_visited = 0;

        for elem in &mesh.elements {
            for &v in elem {
                if visited[v] {
                    continue;
                }
                visited[v] = true;
                n_visited += 1;

                let vertex = VertexIndex::new(v);
                displacements[v] = Vector2::new(
                    displacement.dof(NodalVectorField::dof_index(vertex, 0)),
                    displacement.dof(NodalVectorField::dof_index(vertex, 1)),
                );
            }
        }

        log::trace!(
            "Mesh transform gathered {} of {} vertices",
            n_visited,
            mesh.n_vertices
        );

        Ok(Self {
            displacements,
            reference: None,
        })
    }

    /// Whether the displacement is currently applied.
    #[inline]
    pub fn is_applied(&self) -> bool {
        self.reference.is_some()
    }

    /// Displacement of vertex `v`.
    #[inline]
    pub fn displacement(&self, v: VertexIndex) -> Vector2 {
        self.displacements[v]
    }

    /// Move the mesh to the current configuration (`forward`) or back to
    /// the reference configuration.
    ///
    /// Forward twice, or backward without a preceding forward, is an error
    /// and leaves the mesh untouched.
    pub fn apply_displacement(&mut self, mesh: &mut Mesh2D, forward: bool) -> Result<()> {
        if mesh.n_vertices != self.displacements.len() {
            return Err(FsiError::TransformState("mesh does not match the transform"));
        }

        if forward {
            if self.reference.is_some() {
                return Err(FsiError::TransformState("displacement already applied"));
            }
            self.reference = Some(mesh.vertices.clone());
            for (p, d) in mesh.vertices.iter_mut().zip(&self.displacements) {
                *p += *d;
            }
        } else {
            let reference = self
                .reference
                .take()
                .ok_or(FsiError::TransformState("displacement not applied"))?;
            mesh.vertices.copy_from_slice(&reference);
        }

        Ok(())
    }

    /// Deform `mesh` for the lifetime of the returned guard.
    pub fn deform(mut self, mesh: &mut Mesh2D) -> Result<DeformedMesh<'_>> {
        self.apply_displacement(mesh, true)?;
        Ok(DeformedMesh {
            mesh,
            transform: self,
        })
    }
}

/// A mesh held in its displaced configuration.
///
/// Dropping the guard restores the reference configuration on every exit
/// path, including early returns and unwinding.
#[derive(Debug)]
pub struct DeformedMesh<'a> {
    mesh: &'a mut Mesh2D,
    transform: MeshTransform,
}

impl Deref for DeformedMesh<'_> {
    type Target = Mesh2D;

    fn deref(&self) -> &Mesh2D {
        self.mesh
    }
}

impl Drop for DeformedMesh<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.transform.apply_displacement(self.mesh, false) {
            log::error!("Failed to restore reference mesh: {}", err);
        }
    }
}
