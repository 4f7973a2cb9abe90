//! Polynomial evaluation and quadrature node generation.
//!
//! This module provides:
//! - 1D Legendre polynomials and their derivatives
//! - 1D Gauss-Legendre nodes and weights

mod legendre;
mod nodes;

pub use legendre::legendre_and_derivative;
pub use nodes::{gauss_legendre_nodes, gauss_legendre_weights};
