//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI, the
//!   benches and ad-hoc experiments. Breaking changes are allowed.

// Geometry primitives
pub use crate::geom3::{
    invert_through, nearest_on_polygon, nearest_on_segment, nearest_on_span, newell_normal, Pt,
};
// Meshes and reference solids
pub use crate::mesh::special::{
    cube, cuboctahedron, dodecahedron, hull_mesh, icosahedron, jitter, octahedron, prism,
    tetrahedron,
};
pub use crate::mesh::Mesh;
// Reciprocation
pub use crate::recip::{
    balance_terms, build_dual, canonical, circumcenter, edge_dist_lims, extremal_radius,
    face_dist_lims, midsphere, reciprocate, resolve_auto_radius, span_radius, vert_dist_lims,
    Balance, BalanceTerms, CenterMode, DistLims, Dual, Elem, Extreme, IdealOpts, InitCenter,
    IterCfg, RadiusMode, RecipConfig, RecipCtx, RecipOutput,
};
pub use crate::error::{RecipError, RecipWarning};
