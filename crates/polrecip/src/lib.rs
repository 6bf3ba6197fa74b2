//! Polar reciprocation of polyhedra, with canonical centre solvers.
//!
//! Layout
//! - `geom3`: nearest-point projections, Newell normals, projective points.
//! - `mesh`: face-vertex meshes, topology checks, orientation, OFF I/O, solids.
//! - `recip`: the dual operator, centre/radius solvers and the pipeline.
//! - `error`: `RecipError` (fatal) and `RecipWarning` (reported, non-fatal).
//!
//! API Policy
//! - This crate backs the `pol_recip` binary. There is no stable public API;
//!   `api` is the curated surface for callers inside the workspace.

pub mod api;
pub mod error;
pub mod geom3;
pub mod mesh;
pub mod recip;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{RecipError, RecipWarning};
pub use mesh::Mesh;
pub use nalgebra::{Matrix4 as Mat4, Vector3 as Vec3};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{RecipError, RecipWarning};
    pub use crate::mesh::{special, Mesh};
    pub use crate::recip::{
        reciprocate, Balance, CenterMode, InitCenter, IterCfg, RadiusMode, RecipConfig,
        RecipOutput,
    };
    pub use nalgebra::Vector3 as Vec3;
}
