//! Gauss-Legendre nodes and weights.
//!
//! The n Gauss-Legendre nodes are the roots of P_n(x). An n-point rule
//! integrates polynomials up to degree 2n-1 exactly and never samples the
//! endpoints, so quadrature points of a cell are strictly interior to it.

use super::legendre::legendre_and_derivative;
use std::f64::consts::PI;

/// Compute the n Gauss-Legendre nodes in ascending order.
///
/// Uses Newton iteration starting from the asymptotic (Tricomi) guess
/// x_j ≈ cos(π (j + 3/4) / (n + 1/2)).
pub fn gauss_legendre_nodes(n: usize) -> Vec<f64> {
    assert!(n > 0, "Gauss-Legendre rule needs at least one point");

    let mut nodes = Vec::with_capacity(n);
    for j in 0..n {
        let mut x = (PI * (j as f64 + 0.75) / (n as f64 + 0.5)).cos();

        for _ in 0..100 {
            let (p_n, dp_n) = legendre_and_derivative(n, x);
            let update = p_n / dp_n;
            x -= update;
            if update.abs() < 1e-15 {
                break;
            }
        }

        nodes.push(x);
    }

    // Newton guesses run from +1 towards -1
    nodes.reverse();

    // Enforce exact symmetry, and an exact zero for odd n
    for j in 0..n / 2 {
        let avg = (nodes[n - 1 - j] - nodes[j]) / 2.0;
        nodes[j] = -avg;
        nodes[n - 1 - j] = avg;
    }
    if n % 2 == 1 {
        nodes[n / 2] = 0.0;
    }

    nodes
}

/// Compute Gauss-Legendre weights for the given nodes.
///
/// The weights are: w_j = 2 / ((1 - x_j²) [P'_n(x_j)]²)
pub fn gauss_legendre_weights(nodes: &[f64]) -> Vec<f64> {
    let n = nodes.len();
    nodes
        .iter()
        .map(|&x| {
            let (_, dp_n) = legendre_and_derivative(n, x);
            2.0 / ((1.0 - x * x) * dp_n * dp_n)
        })
        .collect()
}
