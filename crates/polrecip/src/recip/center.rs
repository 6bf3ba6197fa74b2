//! Closed-form and midsphere centre solvers.
//!
//! - `circumcenter`: least-squares sphere through the vertices.
//! - `midsphere`: fixed-point iteration toward equal edge distances.
//!
//! Both return a `RecipCtx` by value; nothing here mutates the mesh.

use nalgebra::{Matrix4, Vector3, Vector4, SVD};

use super::cfg::{RADIUS_UNSET_EPS, SINGULAR_EPS};
use super::dist::edge_dist_lims;
use super::types::{IterCfg, RecipCtx};
use crate::error::RecipError;
use crate::geom3::nearest_on_segment;
use crate::mesh::Mesh;

/// Least-squares circumcentre and radius.
///
/// Fits `|v|² = a + b·v` by the normal equations of `[1, x, y, z]`; the
/// centre is `b/2` and the radius `sqrt(|b/2|² + a)`, with vertices taken
/// relative to their centroid. Vertex sets without a unique sphere (coplanar,
/// collinear, too few) are rejected via the smallest relative singular value
/// of the moment matrix.
pub fn circumcenter(mesh: &Mesh) -> Result<RecipCtx, RecipError> {
    let origin = mesh.centroid();
    let mut mat = Matrix4::<f64>::zeros();
    let mut rhs = Vector4::<f64>::zeros();
    for v in mesh.verts.iter().map(|v| v - origin) {
        let row = Vector4::new(1.0, v.x, v.y, v.z);
        mat += row * row.transpose();
        rhs += row * v.norm_squared();
    }
    let s = SVD::new(mat, false, false).singular_values;
    let (smax, smin) = (s.max(), s.min());
    if !(smax > 0.0 && smin > SINGULAR_EPS * smax) {
        return Err(RecipError::SingularCircumcenter);
    }
    let res = mat
        .try_inverse()
        .ok_or(RecipError::SingularCircumcenter)?
        * rhs;
    let local = Vector3::new(res[1], res[2], res[3]) / 2.0;
    let radius = (local.norm_squared() + res[0]).max(0.0).sqrt();
    let center = origin + local;
    tracing::debug!(?center, radius, "circumsphere");
    Ok(RecipCtx::fixed(center, radius))
}

/// Iterate toward the centre whose distances to all implicit edges agree.
///
/// Seeds: `seed` or the vertex centroid; `init_radius` or (if absent or ~0)
/// the mean nearest-edge distance. Each step moves the centre against
/// `Σ(1 − d/r)(P − c)/E²` and sets the radius to the mean edge distance.
/// Hitting `max_iters` leaves `converged == false`; the caller decides how to
/// report it.
pub fn midsphere(
    mesh: &Mesh,
    seed: Option<Vector3<f64>>,
    init_radius: Option<f64>,
    iter: IterCfg,
) -> RecipCtx {
    let edges = mesh.impl_edges();
    let mut c = seed.unwrap_or_else(|| mesh.centroid());
    let mut r = match init_radius {
        Some(r) if r.abs() >= RADIUS_UNSET_EPS => r.abs(),
        _ => edge_dist_lims(mesh, c).mean(),
    };
    let mut ctx = RecipCtx {
        center: c,
        radius: r,
        iters: 0,
        converged: false,
        center_test: f64::INFINITY,
        radius_test: f64::INFINITY,
    };
    if edges.is_empty() || r <= 0.0 {
        return ctx;
    }
    let e = edges.len() as f64;

    for it in 0..iter.max_iters {
        let mut dist_sum = 0.0;
        let mut diff = Vector3::zeros();
        for &[a, b] in &edges {
            let p = nearest_on_segment(c, mesh.verts[a], mesh.verts[b]);
            let d = (p - c).norm();
            dist_sum += d;
            diff += (p - c) * (1.0 - d / r);
        }
        diff /= e;
        let next_c = c - diff / e;
        let next_r = dist_sum / e;

        ctx.center_test = (next_c - c).norm() / next_r;
        ctx.radius_test = (r - next_r) / next_r;
        ctx.iters = it + 1;
        c = next_c;
        r = next_r;
        if ctx.within(iter.epsilon) {
            ctx.converged = true;
            break;
        }
    }
    ctx.center = c;
    ctx.radius = r;
    tracing::debug!(
        iters = ctx.iters,
        converged = ctx.converged,
        center_test = ctx.center_test,
        radius_test = ctx.radius_test,
        radius = ctx.radius,
        "midsphere"
    );
    ctx
}
