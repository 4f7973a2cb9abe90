//! Finite-element fields on a [`Mesh2D`].
//!
//! - [`NodalScalarField`], [`NodalVectorField`]: continuous Q1 fields
//! - [`CellwiseScalarField`]: discontinuous Q1 field, four values per cell
//! - [`StressField`]: per-component discontinuous stress
//! - [`FluidSolution`]: velocity and pressure of the fluid solver
//!
//! Point evaluation uses the mesh's brute-force cell search, so a point on
//! a shared face or vertex is evaluated in the lowest-numbered cell that
//! contains it.

mod cellwise;
mod nodal;

pub use cellwise::{CellwiseScalarField, StressField};
pub use nodal::{NodalScalarField, NodalVectorField};

use crate::mesh::Mesh2D;
use crate::types::{ElementIndex, Point2};

/// A field that can be evaluated inside a cell of a mesh.
pub trait FeField {
    type Value;

    /// Value in `cell` at reference point `xi`.
    fn value_in_cell(&self, mesh: &Mesh2D, cell: ElementIndex, xi: Point2) -> Self::Value;

    /// Value at a physical point, or `None` if no cell contains it.
    fn point_value(&self, mesh: &Mesh2D, p: Point2) -> Option<Self::Value> {
        mesh.find_active_cell(p)
            .map(|(cell, xi)| self.value_in_cell(mesh, cell, xi))
    }
}

/// Velocity and pressure of the fluid, both nodal Q1.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidSolution {
    pub velocity: NodalVectorField,
    pub pressure: NodalScalarField,
}

impl FluidSolution {
    pub fn zeros(n_vertices: usize) -> Self {
        Self {
            velocity: NodalVectorField::zeros(n_vertices),
            pressure: NodalScalarField::zeros(n_vertices),
        }
    }
}
