//! Finite-element values on a cell or cell face.
//!
//! For a bilinear cell the Jacobian varies over the element, so the inverse
//! Jacobian entries are evaluated per quadrature point:
//!
//! ∂u/∂x = rx * ∂u/∂r + sx * ∂u/∂s
//! ∂u/∂y = ry * ∂u/∂r + sy * ∂u/∂s
//!
//! where (rx, ry, sx, sy) are the entries of the inverse Jacobian matrix.

use crate::error::{FsiError, Result};
use crate::field::{NodalScalarField, NodalVectorField};
use crate::mesh::{FACE_VERTICES, Mesh2D};
use crate::quadrature::{QuadratureRule1D, QuadratureRule2D};
use crate::types::{ElementIndex, Point2, SymmetricTensor2, Tensor2, Vector2, VertexIndex};

use super::shape::{Q1_VERTICES, q1_reference_gradients, q1_values};

/// Physical gradients of the four shape functions at reference point `xi`.
///
/// Fails with [`FsiError::DegenerateCell`] if the Jacobian determinant is
/// not positive.
pub fn physical_shape_gradients(
    mesh: &Mesh2D,
    cell: ElementIndex,
    xi: Point2,
) -> Result<[Vector2; 4]> {
    let j = mesh.jacobian_at(cell.as_usize(), xi);
    let inverse = InverseJacobian::new(&j).ok_or(FsiError::DegenerateCell {
        cell,
        det: determinant(&j),
    })?;

    Ok(q1_reference_gradients(xi).map(|g| inverse.transform(g)))
}

#[inline]
fn determinant(j: &Tensor2) -> f64 {
    j.t[0][0] * j.t[1][1] - j.t[0][1] * j.t[1][0]
}

/// Inverse Jacobian entries at a point.
#[derive(Clone, Copy, Debug)]
struct InverseJacobian {
    rx: f64,
    ry: f64,
    sx: f64,
    sy: f64,
    det: f64,
}

impl InverseJacobian {
    /// J = [[x_r, x_s], [y_r, y_s]]; `None` unless det(J) > 0.
    fn new(j: &Tensor2) -> Option<Self> {
        let det = determinant(j);
        if !(det > 0.0) {
            return None;
        }
        let (x_r, x_s) = (j.t[0][0], j.t[0][1]);
        let (y_r, y_s) = (j.t[1][0], j.t[1][1]);
        Some(Self {
            rx: y_s / det,
            ry: -x_s / det,
            sx: -y_r / det,
            sy: x_r / det,
            det,
        })
    }

    #[inline]
    fn transform(&self, g: Vector2) -> Vector2 {
        Vector2::new(
            self.rx * g.x + self.sx * g.y,
            self.ry * g.x + self.sy * g.y,
        )
    }
}

// =============================================================================
// Cell values
// =============================================================================

/// Shape function data of one cell at the points of a quadrature rule.
///
/// Reference data is computed once in [`FeValues::new`]; [`FeValues::reinit`]
/// recomputes the physical quantities for a given cell. Quadrature points
/// keep the order of the rule.
#[derive(Clone, Debug)]
pub struct FeValues {
    rule: QuadratureRule2D,
    reference_values: Vec<[f64; 4]>,
    reference_gradients: Vec<[Vector2; 4]>,

    cell: ElementIndex,
    vertices: [VertexIndex; 4],
    quadrature_points: Vec<Point2>,
    jxw: Vec<f64>,
    shape_gradients: Vec<[Vector2; 4]>,
}

impl FeValues {
    pub fn new(rule: &QuadratureRule2D) -> Self {
        let reference_values = rule.points.iter().map(|&xi| q1_values(xi)).collect();
        let reference_gradients = rule
            .points
            .iter()
            .map(|&xi| q1_reference_gradients(xi))
            .collect();
        let n_q = rule.size();

        Self {
            rule: rule.clone(),
            reference_values,
            reference_gradients,
            cell: ElementIndex::ZERO,
            vertices: [VertexIndex::ZERO; 4],
            quadrature_points: vec![Point2::ZERO; n_q],
            jxw: vec![0.0; n_q],
            shape_gradients: vec![[Vector2::ZERO; 4]; n_q],
        }
    }

    /// Recompute physical points, weights and gradients for `cell`.
    pub fn reinit(&mut self, mesh: &Mesh2D, cell: ElementIndex) -> Result<()> {
        let k = cell.as_usize();
        let verts = mesh.element_vertices(k);

        self.cell = cell;
        for (local, vertex) in self.vertices.iter_mut().enumerate() {
            *vertex = mesh.vertex_index(k, local);
        }

        for q in 0..self.rule.size() {
            let n = &self.reference_values[q];

            self.quadrature_points[q] = verts
                .iter()
                .zip(n.iter())
                .fold(Point2::ZERO, |acc, (p, w)| acc + *p * *w);

            let j = self.reference_gradients[q]
                .iter()
                .zip(verts.iter())
                .fold(Tensor2::ZERO, |acc, (g, p)| acc + p.outer(g));
            let inverse = InverseJacobian::new(&j).ok_or(FsiError::DegenerateCell {
                cell,
                det: determinant(&j),
            })?;

            self.jxw[q] = inverse.det * self.rule.weights[q];
            self.shape_gradients[q] = self.reference_gradients[q].map(|g| inverse.transform(g));
        }

        Ok(())
    }

    #[inline]
    pub fn cell(&self) -> ElementIndex {
        self.cell
    }

    #[inline]
    pub fn n_quadrature_points(&self) -> usize {
        self.rule.size()
    }

    /// Physical quadrature points of the current cell, in rule order.
    #[inline]
    pub fn quadrature_points(&self) -> &[Point2] {
        &self.quadrature_points
    }

    /// Jacobian determinant times quadrature weight.
    #[inline]
    pub fn jxw(&self, q: usize) -> f64 {
        self.jxw[q]
    }

    #[inline]
    pub fn shape_value(&self, i: usize, q: usize) -> f64 {
        self.reference_values[q][i]
    }

    #[inline]
    pub fn shape_grad(&self, i: usize, q: usize) -> Vector2 {
        self.shape_gradients[q][i]
    }

    /// Values of a scalar nodal field at the quadrature points.
    pub fn scalar_values(&self, field: &NodalScalarField) -> Vec<f64> {
        self.reference_values
            .iter()
            .map(|n| {
                n.iter()
                    .zip(self.vertices.iter())
                    .map(|(w, &v)| w * field.value(v))
                    .sum()
            })
            .collect()
    }

    /// Values of a vector nodal field at the quadrature points.
    pub fn vector_values(&self, field: &NodalVectorField) -> Vec<Vector2> {
        self.reference_values
            .iter()
            .map(|n| {
                n.iter()
                    .zip(self.vertices.iter())
                    .fold(Vector2::ZERO, |acc, (w, &v)| acc + field.value(v) * *w)
            })
            .collect()
    }

    /// Gradients `∂u_i/∂x_j` of a vector nodal field at the quadrature points.
    pub fn vector_gradients(&self, field: &NodalVectorField) -> Vec<Tensor2> {
        self.shape_gradients
            .iter()
            .map(|grads| {
                grads
                    .iter()
                    .zip(self.vertices.iter())
                    .fold(Tensor2::ZERO, |acc, (g, &v)| acc + field.value(v).outer(g))
            })
            .collect()
    }

    /// Symmetric gradients of a vector nodal field at the quadrature points.
    pub fn vector_symmetric_gradients(&self, field: &NodalVectorField) -> Vec<SymmetricTensor2> {
        self.vector_gradients(field)
            .iter()
            .map(Tensor2::symmetrize)
            .collect()
    }
}

// =============================================================================
// Face values
// =============================================================================

/// Quadrature data on one face of a cell.
///
/// Points run from the first to the second vertex of the face (counter-
/// clockwise), in the order of the 1D rule. Faces are straight, so the
/// outward unit normal is constant along a face: for a face from
/// (x_a, y_a) to (x_b, y_b), n = (dy, -dx) / |d|.
#[derive(Clone, Debug)]
pub struct FeFaceValues {
    rule: QuadratureRule1D,
    cell: ElementIndex,
    face: usize,
    quadrature_points: Vec<Point2>,
    normal: Vector2,
    jxw: Vec<f64>,
}

impl FeFaceValues {
    pub fn new(rule: &QuadratureRule1D) -> Self {
        let n_q = rule.size();
        Self {
            rule: rule.clone(),
            cell: ElementIndex::ZERO,
            face: 0,
            quadrature_points: vec![Point2::ZERO; n_q],
            normal: Vector2::ZERO,
            jxw: vec![0.0; n_q],
        }
    }

    /// Recompute points, normal and weights for `face` of `cell`.
    pub fn reinit(&mut self, mesh: &Mesh2D, cell: ElementIndex, face: usize) -> Result<()> {
        let k = cell.as_usize();
        let (a, b) = FACE_VERTICES[face];
        let xi_a = Point2::from(Q1_VERTICES[a]);
        let xi_b = Point2::from(Q1_VERTICES[b]);

        let (pa, pb) = mesh.face_vertices(k, face);
        let d = pb - pa;
        let length = d.norm();
        if !(length > 0.0) {
            return Err(FsiError::DegenerateCell { cell, det: 0.0 });
        }

        self.cell = cell;
        self.face = face;
        self.normal = Vector2::new(d.y / length, -d.x / length);

        // Reference edge has length 2
        let surface_j = length / 2.0;
        for (q, (&t, &w)) in self.rule.points.iter().zip(self.rule.weights.iter()).enumerate() {
            let xi = xi_a * ((1.0 - t) / 2.0) + xi_b * ((1.0 + t) / 2.0);
            self.quadrature_points[q] = mesh.reference_to_physical(k, xi);
            self.jxw[q] = surface_j * w;
        }

        Ok(())
    }

    #[inline]
    pub fn cell(&self) -> ElementIndex {
        self.cell
    }

    #[inline]
    pub fn face(&self) -> usize {
        self.face
    }

    #[inline]
    pub fn n_quadrature_points(&self) -> usize {
        self.rule.size()
    }

    #[inline]
    pub fn quadrature_points(&self) -> &[Point2] {
        &self.quadrature_points
    }

    /// Outward unit normal at quadrature point `q`.
    #[inline]
    pub fn normal_vector(&self, _q: usize) -> Vector2 {
        self.normal
    }

    #[inline]
    pub fn jxw(&self, q: usize) -> f64 {
        self.jxw[q]
    }
}
