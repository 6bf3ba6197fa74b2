//! End-to-end reciprocation: validate, solve centre and radius, build the dual.
//!
//! Flow
//! 1. Reject bad options and non-polyhedra.
//! 2. Strip free vertices/edges from a working copy of the primal.
//! 3. Seed and solve the centre; pick the radius.
//! 4. Reciprocate, resolve ideal vertices, optionally append, orient.
//!
//! Warnings are collected in `RecipOutput::warnings` and logged via `tracing`.

use nalgebra::Vector3;

use super::canonical::canonical;
use super::center::{circumcenter, midsphere};
use super::cfg::RADIUS_UNSET_EPS;
use super::dual::{build_dual, IdealOpts};
use super::radius::{extremal_radius, span_radius};
use super::types::{CenterMode, Elem, Extreme, InitCenter, RadiusMode, RecipConfig, RecipCtx};
use crate::error::{RecipError, RecipWarning};
use crate::mesh::Mesh;

/// Result of a reciprocation run.
#[derive(Clone, Debug)]
pub struct RecipOutput {
    /// The dual, or primal followed by dual when appending.
    pub mesh: Mesh,
    pub center: Vector3<f64>,
    pub radius: f64,
    /// Solver state for circumcentre, midsphere and canonical centres.
    pub ctx: Option<RecipCtx>,
    pub warnings: Vec<RecipWarning>,
}

/// Reciprocate `primal` according to `cfg`.
///
/// The input mesh is never modified. Errors are returned before any solving
/// starts, except for a singular circumcentre system.
pub fn reciprocate(primal: &Mesh, cfg: &RecipConfig) -> Result<RecipOutput, RecipError> {
    let mut warnings = cfg.validate()?;
    primal.validate_polyhedron()?;

    let mut geom = primal.clone();
    if geom.strip_free_elements() {
        warnings.push(RecipWarning::StrippedFreeElements);
    }

    let init_radius = cfg.init_radius.map(f64::abs);
    let seed = match cfg.init_center {
        InitCenter::Auto => None,
        InitCenter::Centroid => Some(geom.centroid()),
        InitCenter::Midsphere => {
            let ctx = midsphere(&geom, None, None, cfg.iter);
            warnings.extend(ctx.warning("initial midsphere"));
            Some(ctx.center)
        }
        InitCenter::Point(p) => Some(p),
    };

    let (center, ctx) = match cfg.center {
        CenterMode::Centroid => (geom.centroid(), None),
        CenterMode::Point(p) => (p, None),
        CenterMode::Circumcenter => {
            let ctx = circumcenter(&geom)?;
            (ctx.center, Some(ctx))
        }
        CenterMode::Midsphere => {
            let ctx = midsphere(&geom, seed, init_radius, cfg.iter);
            warnings.extend(ctx.warning("midsphere"));
            (ctx.center, Some(ctx))
        }
        CenterMode::Canonical { balance, invert } => {
            let ctx = canonical(&geom, balance, invert, seed, init_radius, cfg.iter);
            warnings.extend(ctx.warning("canonical"));
            (ctx.center, Some(ctx))
        }
    };

    let radius = match &cfg.radius {
        RadiusMode::Value(r) => r.abs(),
        RadiusMode::Extremal { elem, extreme } => extremal_radius(&geom, center, *elem, *extreme),
        RadiusMode::Span(idxs) => span_radius(&geom, center, idxs)?,
        RadiusMode::Auto => resolve_auto_radius(&geom, center, cfg.center, ctx.as_ref()),
    };
    if radius < RADIUS_UNSET_EPS && !matches!(cfg.radius, RadiusMode::Value(_)) {
        warnings.push(RecipWarning::Config {
            reason: "radius is very small (the reciprocal will be very large)".into(),
        });
    }

    let dual = build_dual(&geom, center, radius);
    let (mut mesh, removed) = dual.finish(
        center,
        IdealOpts {
            cap: cfg.ideal_cap,
            extra_elems: cfg.extra_ideal_elems,
            invert: cfg.invert,
        },
    );
    if !removed.is_empty() {
        warnings.push(RecipWarning::RemovedIdealVertices { indices: removed });
    }
    if cfg.append {
        geom.append(&mesh);
        mesh = geom;
    }
    mesh.orient();

    for w in &warnings {
        tracing::warn!("{w}");
    }
    tracing::debug!(
        ?center,
        radius,
        verts = mesh.verts.len(),
        faces = mesh.faces.len(),
        "reciprocated"
    );
    Ok(RecipOutput {
        mesh,
        center,
        radius,
        ctx,
        warnings,
    })
}

/// Default radius for a centre mode.
///
/// Centroid and midsphere centres use the nearest edge, the circumcentre the
/// nearest vertex, an explicit point 1.0, and canonical centres their solved
/// radius.
pub fn resolve_auto_radius(
    mesh: &Mesh,
    center: Vector3<f64>,
    mode: CenterMode,
    ctx: Option<&RecipCtx>,
) -> f64 {
    match (mode, ctx) {
        (CenterMode::Centroid | CenterMode::Midsphere, _) => {
            extremal_radius(mesh, center, Elem::Edge, Extreme::Nearest)
        }
        (CenterMode::Circumcenter, _) => {
            extremal_radius(mesh, center, Elem::Vertex, Extreme::Nearest)
        }
        (CenterMode::Point(_), _) => 1.0,
        (CenterMode::Canonical { .. }, Some(ctx)) => ctx.radius,
        (CenterMode::Canonical { .. }, None) => {
            extremal_radius(mesh, center, Elem::Edge, Extreme::Nearest)
        }
    }
}
