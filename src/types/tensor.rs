//! Small fixed-size tensor algebra for 2D continuum mechanics.
//!
//! Conventions:
//! - [`Tensor2`] stores `t[i][j]`; for a velocity gradient this is `∂v_i/∂x_j`.
//! - `Tensor2 * Vector2` contracts over the second index: `(T·v)_i = Σ_j T_ij v_j`,
//!   so `grad_v * v` is the convective term `(v·∇)v`.
//! - [`SymmetricTensor2`] stores the three independent entries `xx`, `xy`, `yy`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vector2
// =============================================================================

/// A rank-1 tensor (vector) in 2D.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// A point in physical or reference space.
pub type Point2 = Vector2;

impl Vector2 {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component access by index (0 = x, 1 = y).
    #[inline]
    pub fn component(&self, i: usize) -> f64 {
        match i {
            0 => self.x,
            1 => self.y,
            _ => panic!("Vector2 component index {} out of range", i),
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    /// Outer product `a ⊗ b`, i.e. `t[i][j] = a_i b_j`.
    #[inline]
    pub fn outer(&self, other: &Self) -> Tensor2 {
        Tensor2::new([
            [self.x * other.x, self.x * other.y],
            [self.y * other.x, self.y * other.y],
        ])
    }
}

impl Add for Vector2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vector2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    #[inline]
    fn mul(self, c: f64) -> Self {
        Self::new(c * self.x, c * self.y)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;
    #[inline]
    fn mul(self, v: Vector2) -> Vector2 {
        v * self
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;
    #[inline]
    fn div(self, c: f64) -> Self {
        Self::new(self.x / c, self.y / c)
    }
}

impl From<(f64, f64)> for Vector2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Vector2 {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

// =============================================================================
// Tensor2
// =============================================================================

/// A general rank-2 tensor in 2D.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tensor2 {
    pub t: [[f64; 2]; 2],
}

impl Tensor2 {
    pub const ZERO: Self = Self { t: [[0.0; 2]; 2] };

    #[inline]
    pub const fn new(t: [[f64; 2]; 2]) -> Self {
        Self { t }
    }

    /// Build from the gradients of each component: row `i` is `∇v_i`.
    #[inline]
    pub fn from_rows(row0: Vector2, row1: Vector2) -> Self {
        Self::new([[row0.x, row0.y], [row1.x, row1.y]])
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self::new([[self.t[0][0], self.t[1][0]], [self.t[0][1], self.t[1][1]]])
    }

    /// Symmetric part `(T + Tᵀ) / 2`.
    #[inline]
    pub fn symmetrize(&self) -> SymmetricTensor2 {
        SymmetricTensor2::new(
            self.t[0][0],
            (self.t[0][1] + self.t[1][0]) / 2.0,
            self.t[1][1],
        )
    }

    #[inline]
    pub fn trace(&self) -> f64 {
        self.t[0][0] + self.t[1][1]
    }
}

impl Index<usize> for Tensor2 {
    type Output = [f64; 2];
    #[inline]
    fn index(&self, i: usize) -> &[f64; 2] {
        &self.t[i]
    }
}

impl Add for Tensor2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut t = self.t;
        for (row, rhs_row) in t.iter_mut().zip(rhs.t.iter()) {
            for (a, b) in row.iter_mut().zip(rhs_row.iter()) {
                *a += b;
            }
        }
        Self::new(t)
    }
}

impl AddAssign for Tensor2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<Vector2> for Tensor2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, v: Vector2) -> Vector2 {
        Vector2::new(
            self.t[0][0] * v.x + self.t[0][1] * v.y,
            self.t[1][0] * v.x + self.t[1][1] * v.y,
        )
    }
}

impl Mul<f64> for Tensor2 {
    type Output = Self;
    #[inline]
    fn mul(self, c: f64) -> Self {
        Self::new([
            [c * self.t[0][0], c * self.t[0][1]],
            [c * self.t[1][0], c * self.t[1][1]],
        ])
    }
}

// =============================================================================
// SymmetricTensor2
// =============================================================================

/// A symmetric rank-2 tensor in 2D (stress, strain rate).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SymmetricTensor2 {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

impl SymmetricTensor2 {
    pub const ZERO: Self = Self {
        xx: 0.0,
        xy: 0.0,
        yy: 0.0,
    };

    #[inline]
    pub const fn new(xx: f64, xy: f64, yy: f64) -> Self {
        Self { xx, xy, yy }
    }

    /// The identity tensor `I`.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 1.0)
    }

    /// Entry `(i, j)`; `(0, 1)` and `(1, 0)` are the same entry.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        match (i, j) {
            (0, 0) => self.xx,
            (0, 1) | (1, 0) => self.xy,
            (1, 1) => self.yy,
            _ => panic!("SymmetricTensor2 index ({}, {}) out of range", i, j),
        }
    }

    #[inline]
    pub fn trace(&self) -> f64 {
        self.xx + self.yy
    }

    /// Frobenius norm.
    #[inline]
    pub fn norm(&self) -> f64 {
        (self.xx * self.xx + 2.0 * self.xy * self.xy + self.yy * self.yy).sqrt()
    }

    #[inline]
    pub fn to_tensor(&self) -> Tensor2 {
        Tensor2::new([[self.xx, self.xy], [self.xy, self.yy]])
    }
}

impl Add for SymmetricTensor2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.xx + rhs.xx, self.xy + rhs.xy, self.yy + rhs.yy)
    }
}

impl Sub for SymmetricTensor2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.xx - rhs.xx, self.xy - rhs.xy, self.yy - rhs.yy)
    }
}

impl Neg for SymmetricTensor2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.xx, -self.xy, -self.yy)
    }
}

impl Mul<f64> for SymmetricTensor2 {
    type Output = Self;
    #[inline]
    fn mul(self, c: f64) -> Self {
        Self::new(c * self.xx, c * self.xy, c * self.yy)
    }
}

impl Mul<SymmetricTensor2> for f64 {
    type Output = SymmetricTensor2;
    #[inline]
    fn mul(self, s: SymmetricTensor2) -> SymmetricTensor2 {
        s * self
    }
}

/// Projection onto a direction, e.g. traction `σ·n`.
impl Mul<Vector2> for SymmetricTensor2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, n: Vector2) -> Vector2 {
        Vector2::new(
            self.xx * n.x + self.xy * n.y,
            self.xy * n.x + self.yy * n.y,
        )
    }
}

impl fmt::Display for SymmetricTensor2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{:.6}, {:.6}], [{:.6}, {:.6}]]", self.xx, self.xy, self.xy, self.yy)
    }
}
