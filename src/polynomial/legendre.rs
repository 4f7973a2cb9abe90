//! Legendre polynomials on [-1, 1].

/// Evaluate `P_n(x)` and `P'_n(x)`.
///
/// Values follow Bonnet's recurrence
/// `(k+1) P_{k+1} = (2k+1) x P_k - k P_{k-1}` and derivatives
/// `P'_{k+1} = P'_{k-1} + (2k+1) P_k`, which stays valid at `x = ±1`.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    // (P_{k-1}, P_k) and (P'_{k-1}, P'_k), starting at k = 0
    let (mut p_prev, mut p) = (0.0, 1.0);
    let (mut dp_prev, mut dp) = (0.0, 0.0);

    for k in 0..n {
        let kf = k as f64;
        let p_next = ((2.0 * kf + 1.0) * x * p - kf * p_prev) / (kf + 1.0);
        let dp_next = dp_prev + (2.0 * kf + 1.0) * p;
        (p_prev, p) = (p, p_next);
        (dp_prev, dp) = (dp, dp_next);
    }

    (p, dp)
}
