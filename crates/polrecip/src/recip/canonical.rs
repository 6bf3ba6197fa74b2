//! Canonical (balanced) centre and radius iteration.
//!
//! Every step reciprocates the primal about the current centre and radius and
//! measures how far the primal/dual pair is from balance:
//! - `Edge`: nearest points on primal and dual implicit edges.
//! - `VertexFace`: primal vertices with dual faces against primal faces with
//!   dual vertices.
//! - `Combined`: both; centre estimates averaged, radius terms summed.
//!
//! Even steps move the radius halfway to `sqrt(g/d)·r`; odd steps move the
//! centre halfway to the balance centre. Each residual is taken from the last
//! update of its own quantity.
//!
//! Code cross-refs: `dual::build_dual`, `dist::{edge_nearest_points, face_nearest_points}`

use nalgebra::Vector3;

use super::cfg::RADIUS_UNSET_EPS;
use super::dist::{edge_dist_lims, edge_nearest_points, face_nearest_points};
use super::dual::build_dual;
use super::types::{Balance, IterCfg, RecipCtx};
use crate::geom3::invert_through;
use crate::mesh::Mesh;

/// Balance estimate at one centre: target centre plus primal and dual radius terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalanceTerms {
    pub center: Vector3<f64>,
    pub primal: f64,
    pub dual: f64,
}

/// Working dual (ideal vertices at the solver far distance), optionally inverted.
pub(crate) fn working_dual(mesh: &Mesh, c: Vector3<f64>, r: f64, invert: bool) -> Mesh {
    let mut dual = build_dual(mesh, c, r).solver_mesh(c);
    if invert {
        dual.map_verts(|p| invert_through(p, c));
    }
    dual
}

fn sum_with_dist(pts: &[Vector3<f64>], c: Vector3<f64>) -> (Vector3<f64>, f64) {
    pts.iter().fold((Vector3::zeros(), 0.0), |(s, d), p| {
        (s + p, d + (p - c).norm())
    })
}

fn edge_terms(primal: &Mesh, dual: &Mesh, c: Vector3<f64>) -> BalanceTerms {
    let (sum_g, rad_g) = sum_with_dist(&edge_nearest_points(primal, c), c);
    let (sum_d, rad_d) = sum_with_dist(&edge_nearest_points(dual, c), c);
    let e = primal.impl_edges().len().max(1) as f64;
    BalanceTerms {
        center: (sum_g + sum_d) / (2.0 * e),
        primal: rad_g,
        dual: rad_d,
    }
}

fn vertex_face_terms(primal: &Mesh, dual: &Mesh, c: Vector3<f64>) -> BalanceTerms {
    let (v_sum_g, v_rad_g) = sum_with_dist(&primal.verts, c);
    let (f_sum_g, f_rad_g) = sum_with_dist(&face_nearest_points(primal, c), c);
    let (v_sum_d, v_rad_d) = sum_with_dist(&dual.verts, c);
    let (f_sum_d, f_rad_d) = sum_with_dist(&face_nearest_points(dual, c), c);
    let n = (primal.verts.len() + primal.faces.len()).max(1) as f64;
    BalanceTerms {
        center: ((v_sum_g + f_sum_g) / n + (v_sum_d + f_sum_d) / n) / 2.0,
        primal: v_rad_g * f_rad_g,
        dual: v_rad_d * f_rad_d,
    }
}

/// Balance terms of `primal` against its working dual `dual`, both about `c`.
pub fn balance_terms(primal: &Mesh, dual: &Mesh, c: Vector3<f64>, balance: Balance) -> BalanceTerms {
    match balance {
        Balance::Edge => edge_terms(primal, dual, c),
        Balance::VertexFace => vertex_face_terms(primal, dual, c),
        Balance::Combined => {
            let e = edge_terms(primal, dual, c);
            let vf = vertex_face_terms(primal, dual, c);
            BalanceTerms {
                center: (e.center + vf.center) / 2.0,
                primal: e.primal + vf.primal,
                dual: e.dual + vf.dual,
            }
        }
    }
}

/// Iterate to the canonical centre and radius for `balance`.
///
/// Seeds as `center::midsphere`. With `invert` the working dual is reflected
/// in the current centre before measuring. On hitting `max_iters` the last
/// iterate is returned with `converged == false`.
pub fn canonical(
    mesh: &Mesh,
    balance: Balance,
    invert: bool,
    seed: Option<Vector3<f64>>,
    init_radius: Option<f64>,
    iter: IterCfg,
) -> RecipCtx {
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
    if mesh.faces.is_empty() || r <= 0.0 {
        return ctx;
    }

    for it in 0..iter.max_iters {
        let dual = working_dual(mesh, c, r, invert);
        let terms = balance_terms(mesh, &dual, c, balance);
        ctx.iters = it + 1;
        if it % 2 == 0 {
            if !(terms.primal > 0.0 && terms.dual > 0.0) {
                break;
            }
            let next_r = 0.5 * r + 0.5 * (terms.primal / terms.dual).sqrt() * r;
            ctx.radius_test = (r - next_r) / next_r;
            r = next_r;
        } else {
            let next_c = 0.5 * c + 0.5 * terms.center;
            ctx.center_test = (next_c - c).norm() / r;
            c = next_c;
        }
        if ctx.within(iter.epsilon) {
            ctx.converged = true;
            break;
        }
    }
    ctx.center = c;
    ctx.radius = r;
    tracing::debug!(
        ?balance,
        invert,
        iters = ctx.iters,
        converged = ctx.converged,
        center_test = ctx.center_test,
        radius_test = ctx.radius_test,
        radius = ctx.radius,
        "canonical"
    );
    ctx
}
