//! Continuous Q1 fields with one value per mesh vertex.

use crate::error::Result;
use crate::fe::{physical_shape_gradients, q1_values};
use crate::mesh::Mesh2D;
use crate::types::{ElementIndex, Point2, Tensor2, Vector2, VertexIndex};

use super::FeField;

/// Scalar field with one degree of freedom per vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct NodalScalarField {
    values: Vec<f64>,
}

impl NodalScalarField {
    pub fn zeros(n_vertices: usize) -> Self {
        Self {
            values: vec![0.0; n_vertices],
        }
    }

    /// Interpolate a function at the mesh vertices.
    pub fn from_fn(mesh: &Mesh2D, f: impl Fn(Point2) -> f64) -> Self {
        Self {
            values: mesh.vertices.iter().map(|&p| f(p)).collect(),
        }
    }

    #[inline]
    pub fn n_dofs(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn value(&self, v: VertexIndex) -> f64 {
        self.values[v]
    }

    #[inline]
    pub fn set(&mut self, v: VertexIndex, value: f64) {
        self.values[v] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl FeField for NodalScalarField {
    type Value = f64;

    fn value_in_cell(&self, mesh: &Mesh2D, cell: ElementIndex, xi: Point2) -> f64 {
        let verts = mesh.elements[cell.as_usize()];
        q1_values(xi)
            .iter()
            .zip(verts.iter())
            .map(|(n, &v)| n * self.values[v])
            .sum()
    }
}

/// Vector field with two degrees of freedom per vertex.
///
/// Degrees of freedom are interleaved: component `d` of vertex `v` lives at
/// [`NodalVectorField::dof_index`]`(v, d) = 2 v + d`.
#[derive(Clone, Debug, PartialEq)]
pub struct NodalVectorField {
    dofs: Vec<f64>,
}

impl NodalVectorField {
    pub fn zeros(n_vertices: usize) -> Self {
        Self {
            dofs: vec![0.0; 2 * n_vertices],
        }
    }

    /// Interpolate a function at the mesh vertices.
    pub fn from_fn(mesh: &Mesh2D, f: impl Fn(Point2) -> Vector2) -> Self {
        let mut dofs = Vec::with_capacity(2 * mesh.n_vertices);
        for &p in &mesh.vertices {
            let value = f(p);
            dofs.push(value.x);
            dofs.push(value.y);
        }
        Self { dofs }
    }

    /// Global dof index of component `d` at vertex `v`.
    #[inline]
    pub fn dof_index(v: VertexIndex, d: usize) -> usize {
        2 * v.as_usize() + d
    }

    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.dofs.len() / 2
    }

    #[inline]
    pub fn n_dofs(&self) -> usize {
        self.dofs.len()
    }

    /// Value of dof `i`.
    #[inline]
    pub fn dof(&self, i: usize) -> f64 {
        self.dofs[i]
    }

    #[inline]
    pub fn value(&self, v: VertexIndex) -> Vector2 {
        Vector2::new(
            self.dofs[Self::dof_index(v, 0)],
            self.dofs[Self::dof_index(v, 1)],
        )
    }

    #[inline]
    pub fn set(&mut self, v: VertexIndex, value: Vector2) {
        self.dofs[Self::dof_index(v, 0)] = value.x;
        self.dofs[Self::dof_index(v, 1)] = value.y;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.dofs
    }

    /// Gradient `∂u_i/∂x_j` inside `cell` at reference point `xi`.
    pub fn gradient_in_cell(
        &self,
        mesh: &Mesh2D,
        cell: ElementIndex,
        xi: Point2,
    ) -> Result<Tensor2> {
        let grads = physical_shape_gradients(mesh, cell, xi)?;
        let verts = mesh.elements[cell.as_usize()];
        Ok(grads
            .iter()
            .zip(verts.iter())
            .fold(Tensor2::ZERO, |acc, (g, &v)| {
                acc + self.value(VertexIndex::new(v)).outer(g)
            }))
    }

    /// Gradient at a physical point, evaluated in the first containing cell.
    pub fn point_gradient(&self, mesh: &Mesh2D, p: Point2) -> Result<Option<Tensor2>> {
        match mesh.find_active_cell(p) {
            Some((cell, xi)) => self.gradient_in_cell(mesh, cell, xi).map(Some),
            None => Ok(None),
        }
    }
}

impl FeField for NodalVectorField {
    type Value = Vector2;

    fn value_in_cell(&self, mesh: &Mesh2D, cell: ElementIndex, xi: Point2) -> Vector2 {
        let verts = mesh.elements[cell.as_usize()];
        q1_values(xi)
            .iter()
            .zip(verts.iter())
            .fold(Vector2::ZERO, |acc, (n, &v)| {
                acc + self.value(VertexIndex::new(v)) * *n
            })
    }
}
