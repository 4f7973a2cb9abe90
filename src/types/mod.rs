//! Strongly-typed domain types for safer APIs.
//!
//! This module provides index newtypes and the small tensor types used by the
//! coupling algorithms.
//!
//! # Design Philosophy
//!
//! - **Newtypes prevent mix-ups**: `ElementIndex` and `VertexIndex` are distinct types
//! - **Named fields over positional**: `SymmetricTensor2 { xx, xy, yy }`
//! - **Zero-cost abstractions**: index newtypes are `#[repr(transparent)]`
//!
//! # Example
//!
//! ```
//! use fsi_rs::types::{SymmetricTensor2, Vector2};
//!
//! // Newtonian stress with p = 1, μ = 0.1, and zero strain rate
//! let sigma = -1.0 * SymmetricTensor2::identity() + 0.1 * SymmetricTensor2::ZERO;
//! let traction = sigma * Vector2::new(0.0, 1.0);
//! assert_eq!(traction, Vector2::new(0.0, -1.0));
//! ```

mod bounds;
mod indices;
mod tensor;

pub use bounds::Bounds2D;
pub use indices::{ElementIndex, VertexIndex};
pub use tensor::{Point2, SymmetricTensor2, Tensor2, Vector2};
