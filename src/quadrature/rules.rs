//! Gauss-Legendre quadrature rules.

use crate::polynomial::{gauss_legendre_nodes, gauss_legendre_weights};
use crate::types::Point2;

/// Quadrature rule on the reference interval [-1, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct QuadratureRule1D {
    /// Reference coordinates
    pub points: Vec<f64>,
    /// Weights (sum to 2)
    pub weights: Vec<f64>,
}

impl QuadratureRule1D {
    /// n-point Gauss-Legendre rule.
    pub fn gauss(n: usize) -> Self {
        let points = gauss_legendre_nodes(n);
        let weights = gauss_legendre_weights(&points);
        Self { points, weights }
    }

    /// Number of quadrature points.
    #[inline]
    pub fn size(&self) -> usize {
        self.points.len()
    }
}

/// Tensor-product quadrature rule on the reference square [-1, 1]².
#[derive(Clone, Debug, PartialEq)]
pub struct QuadratureRule2D {
    /// Reference coordinates (r, s), index `i_r + n * i_s`
    pub points: Vec<Point2>,
    /// Weights (sum to 4)
    pub weights: Vec<f64>,
}

impl QuadratureRule2D {
    /// n×n Gauss-Legendre rule.
    pub fn gauss(n: usize) -> Self {
        Self::tensor_product(&QuadratureRule1D::gauss(n))
    }

    /// Tensor product of a 1D rule with itself.
    pub fn tensor_product(rule: &QuadratureRule1D) -> Self {
        let n = rule.size();
        let mut points = Vec::with_capacity(n * n);
        let mut weights = Vec::with_capacity(n * n);

        for i_s in 0..n {
            for i_r in 0..n {
                points.push(Point2::new(rule.points[i_r], rule.points[i_s]));
                weights.push(rule.weights[i_r] * rule.weights[i_s]);
            }
        }

        Self { points, weights }
    }

    /// Number of quadrature points.
    #[inline]
    pub fn size(&self) -> usize {
        self.points.len()
    }
}
