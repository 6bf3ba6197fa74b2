//! 3D geometry primitives on top of `nalgebra`.
//!
//! Purpose
//! - Keep the small set of projections the reciprocation solvers need in one
//!   place: segment, polygon and affine-span nearest points, polygon normals.
//! - Model points at infinity explicitly (`Pt::Ideal`) instead of a sentinel
//!   value on a finite coordinate.
//!
//! Code cross-refs: `mesh::Mesh`, `recip::{dist, dual, radius}`

mod nearest;
mod types;

pub use nearest::{nearest_on_polygon, nearest_on_segment, nearest_on_span, newell_normal};
pub use types::{invert_through, Pt};
