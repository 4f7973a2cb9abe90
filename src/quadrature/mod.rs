//! Quadrature rules on the reference interval and square.
//!
//! - [`QuadratureRule1D`]: Gauss-Legendre rule on [-1, 1], used on cell faces
//! - [`QuadratureRule2D`]: tensor-product rule on [-1, 1]², used on cells
//!
//! Point ordering of the 2D rule follows the node convention of the mesh
//! module: index `q = i_r + n * i_s`. Every consumer that pairs samples with
//! quadrature points (interface forcing, traction) relies on this order
//! being fixed.

mod rules;

pub use rules::{QuadratureRule1D, QuadratureRule2D};
