//! Mesh representation.
//!
//! Provides the 2D quadrilateral mesh shared by the fluid and solid sides:
//! - Edge-based connectivity with boundary identifiers on boundary edges
//! - Bilinear cell geometry with forward and inverse reference maps
//! - Brute-force point location (first containing cell in index order)
//! - Uniform global refinement

mod boundary_id;
mod mesh2d;

pub use boundary_id::{BoundaryId, BoundaryIdSet};
pub use mesh2d::{CONTAINMENT_TOLERANCE, Edge, ElementFace, FACE_VERTICES, Mesh2D};
