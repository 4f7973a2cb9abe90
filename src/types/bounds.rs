//! Axis-aligned bounding boxes.

use super::tensor::Point2;

/// 2D axis-aligned bounding box.
///
/// Used as a cheap reject before the exact (inverse-mapping) cell
/// containment test.
///
/// # Example
///
/// ```
/// use fsi_rs::types::{Bounds2D, Point2};
///
/// let bounds = Bounds2D::new(0.0, 100.0, 0.0, 50.0);
/// assert_eq!(bounds.width(), 100.0);
/// assert_eq!(bounds.height(), 50.0);
/// assert!(bounds.contains(Point2::new(10.0, 10.0), 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2D {
    /// Minimum x-coordinate
    pub x_min: f64,
    /// Maximum x-coordinate
    pub x_max: f64,
    /// Minimum y-coordinate
    pub y_min: f64,
    /// Maximum y-coordinate
    pub y_max: f64,
}

impl Bounds2D {
    /// Create new bounds.
    ///
    /// # Panics
    ///
    /// Panics if `x_max < x_min` or `y_max < y_min`.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        assert!(
            x_max >= x_min,
            "x_max ({}) must not be less than x_min ({})",
            x_max,
            x_min
        );
        assert!(
            y_max >= y_min,
            "y_max ({}) must not be less than y_min ({})",
            y_max,
            y_min
        );

        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Smallest box containing all the given points.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn from_points(points: &[Point2]) -> Self {
        assert!(!points.is_empty(), "Need at least one point");
        let mut b = Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        for p in points {
            b.x_min = b.x_min.min(p.x);
            b.x_max = b.x_max.max(p.x);
            b.y_min = b.y_min.min(p.y);
            b.y_max = b.y_max.max(p.y);
        }
        b
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Check if a point is inside the box, enlarged by `tol` on every side.
    #[inline]
    pub fn contains(&self, p: Point2, tol: f64) -> bool {
        p.x >= self.x_min - tol
            && p.x <= self.x_max + tol
            && p.y >= self.y_min - tol
            && p.y <= self.y_max + tol
    }
}
