//! Bilinear finite-element evaluation.
//!
//! - Q1 shape functions on the reference square
//! - [`FeValues`]: physical quadrature points, `JxW`, shape gradients and
//!   field values on a cell
//! - [`FeFaceValues`]: physical points, outward normals and `JxW` on a face

pub mod shape;
mod values;

pub use shape::{Q1_VERTICES, q1_reference_gradients, q1_values};
pub use values::{FeFaceValues, FeValues, physical_shape_gradients};
