//! Face-vertex polyhedral meshes.
//!
//! Purpose
//! - Hold the primal and dual polyhedra: vertex coordinates, face loops and
//!   explicit edges, with implicit edges derived from the faces.
//! - Provide the topology the reciprocation needs (validity, vertex face-fans,
//!   orientation) plus OFF I/O and a few reference solids.
//!
//! Conventions
//! - Outward orientation = counter-clockwise loops seen from outside, i.e.
//!   positive signed volume.
//! - Implicit edges are `[lo, hi]` index pairs, sorted.
//!
//! Code cross-refs: `geom3`, `recip::dual`, `recip::pipeline`

mod cleanup;
mod off;
pub mod special;
mod topology;
mod types;
mod util;

pub use types::Mesh;
