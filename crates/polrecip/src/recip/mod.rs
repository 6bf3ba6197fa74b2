//! Polar reciprocation with centre and radius solvers.
//!
//! Purpose
//! - Build the dual of a polyhedron about a centre `c` and radius `r`: each
//!   face plane maps to its pole, each vertex fan to a dual face.
//! - Choose `c` and `r` by convention: centroid, circumcentre, midsphere, or a
//!   canonical balance between the polyhedron and its dual.
//!
//! Conventions
//! - The radius is a positive magnitude everywhere; inversion through the
//!   centre is an explicit flag (`CenterMode::Canonical::invert`,
//!   `RecipConfig::invert`).
//! - Solvers take the primal by reference and return `RecipCtx` by value.
//! - Ideal dual vertices are `geom3::Pt::Ideal` until capped or deleted.
//!
//! Code cross-refs: `mesh::Mesh`, `geom3`, `error::{RecipError, RecipWarning}`

pub mod canonical;
pub mod center;
pub mod cfg;
pub mod dist;
pub mod dual;
pub mod pipeline;
pub mod radius;
mod types;

pub use canonical::{balance_terms, canonical, BalanceTerms};
pub use center::{circumcenter, midsphere};
pub use dist::{edge_dist_lims, face_dist_lims, vert_dist_lims, DistLims};
pub use dual::{build_dual, Dual, IdealOpts};
pub use pipeline::{reciprocate, resolve_auto_radius, RecipOutput};
pub use radius::{extremal_radius, span_radius};
pub use types::{
    Balance, CenterMode, Elem, Extreme, InitCenter, IterCfg, RadiusMode, RecipConfig, RecipCtx,
};

#[cfg(test)]
mod tests;
