//! Discontinuous Q1 fields with four values per cell.

use crate::fe::q1_values;
use crate::mesh::Mesh2D;
use crate::types::{ElementIndex, Point2, SymmetricTensor2, Tensor2};

use super::FeField;

/// Scalar field stored cell by cell at the four cell vertices.
///
/// Values are not shared between neighbours, so the field may jump across
/// faces. Point values take the first containing cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellwiseScalarField {
    values: Vec<[f64; 4]>,
}

impl CellwiseScalarField {
    pub fn zeros(n_cells: usize) -> Self {
        Self {
            values: vec![[0.0; 4]; n_cells],
        }
    }

    /// Interpolate a function at the vertices of every cell.
    pub fn from_fn(mesh: &Mesh2D, f: impl Fn(Point2) -> f64) -> Self {
        Self {
            values: (0..mesh.n_elements)
                .map(|k| mesh.element_vertices(k).map(&f))
                .collect(),
        }
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn cell_values(&self, cell: ElementIndex) -> &[f64; 4] {
        &self.values[cell]
    }

    #[inline]
    pub fn cell_values_mut(&mut self, cell: ElementIndex) -> &mut [f64; 4] {
        &mut self.values[cell]
    }
}

impl FeField for CellwiseScalarField {
    type Value = f64;

    fn value_in_cell(&self, _mesh: &Mesh2D, cell: ElementIndex, xi: Point2) -> f64 {
        q1_values(xi)
            .iter()
            .zip(self.values[cell].iter())
            .map(|(n, u)| n * u)
            .sum()
    }
}

/// Stress stored as one discontinuous field per tensor component.
#[derive(Clone, Debug, PartialEq)]
pub struct StressField {
    pub components: [[CellwiseScalarField; 2]; 2],
}

impl StressField {
    pub fn zeros(n_cells: usize) -> Self {
        let c = || CellwiseScalarField::zeros(n_cells);
        Self {
            components: [[c(), c()], [c(), c()]],
        }
    }

    /// Interpolate a tensor-valued function component by component.
    pub fn from_fn(mesh: &Mesh2D, f: impl Fn(Point2) -> Tensor2) -> Self {
        let component = |i: usize, j: usize| CellwiseScalarField::from_fn(mesh, |p| f(p).t[i][j]);
        Self {
            components: [
                [component(0, 0), component(0, 1)],
                [component(1, 0), component(1, 1)],
            ],
        }
    }

    #[inline]
    pub fn component(&self, i: usize, j: usize) -> &CellwiseScalarField {
        &self.components[i][j]
    }
}

/// Evaluates to the symmetric part; the off-diagonal entry is the mean of
/// the `(0, 1)` and `(1, 0)` components. A non-symmetric stress therefore
/// does not keep either off-diagonal component as stored. Both readings
/// agree when the stored stress is symmetric.
impl FeField for StressField {
    type Value = SymmetricTensor2;

    fn value_in_cell(&self, mesh: &Mesh2D, cell: ElementIndex, xi: Point2) -> SymmetricTensor2 {
        let s = |i: usize, j: usize| self.components[i][j].value_in_cell(mesh, cell, xi);
        Tensor2::new([[s(0, 0), s(0, 1)], [s(1, 0), s(1, 1)]]).symmetrize()
    }
}
