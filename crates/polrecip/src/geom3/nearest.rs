//! Nearest-point projections and small plane helpers.
//!
//! - `nearest_on_segment`: clamp the projection onto a segment.
//! - `nearest_on_polygon`: planar polygon (interior or boundary).
//! - `nearest_on_span`: affine hull of any point set (point/line/plane/space).
//! - `newell_normal`: robust polygon normal (unnormalized).
//!
//! References
//! - Code cross-refs: `recip::dist`, `recip::radius`, `mesh::Mesh::face_normal`
use nalgebra::Vector3;

const DEGEN_EPS: f64 = 1e-12;

/// Nearest point to `p` on the closed segment `[a, b]`.
pub fn nearest_on_segment(p: Vector3<f64>, a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= DEGEN_EPS * DEGEN_EPS {
        return a;
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Newell's method: sum of edge cross terms. Length is twice the area for planar loops.
pub fn newell_normal(loop_pts: &[Vector3<f64>]) -> Vector3<f64> {
    let mut n = Vector3::zeros();
    for (i, cur) in loop_pts.iter().enumerate() {
        let nxt = loop_pts[(i + 1) % loop_pts.len()];
        n.x += (cur.y - nxt.y) * (cur.z + nxt.z);
        n.y += (cur.z - nxt.z) * (cur.x + nxt.x);
        n.z += (cur.x - nxt.x) * (cur.y + nxt.y);
    }
    n
}

/// Nearest point to `p` on a polygon given as a vertex loop.
///
/// One vertex is a point and two a segment. Otherwise the loop is treated as
/// planar (Newell plane through its centroid): the projection is returned when
/// it falls inside, else the nearest boundary point.
pub fn nearest_on_polygon(p: Vector3<f64>, loop_pts: &[Vector3<f64>]) -> Vector3<f64> {
    match loop_pts.len() {
        0 => p,
        1 => loop_pts[0],
        2 => nearest_on_segment(p, loop_pts[0], loop_pts[1]),
        _ => {
            let n = newell_normal(loop_pts);
            let n_len = n.norm();
            if n_len > DEGEN_EPS {
                let n = n / n_len;
                let centroid = loop_pts.iter().sum::<Vector3<f64>>() / loop_pts.len() as f64;
                let proj = p - n * n.dot(&(p - centroid));
                if inside_planar_loop(proj, loop_pts, n) {
                    return proj;
                }
            }
            nearest_on_boundary(p, loop_pts)
        }
    }
}

fn nearest_on_boundary(p: Vector3<f64>, loop_pts: &[Vector3<f64>]) -> Vector3<f64> {
    let mut best = loop_pts[0];
    let mut best_d2 = f64::INFINITY;
    for (i, &a) in loop_pts.iter().enumerate() {
        let b = loop_pts[(i + 1) % loop_pts.len()];
        let q = nearest_on_segment(p, a, b);
        let d2 = (q - p).norm_squared();
        if d2 < best_d2 {
            best_d2 = d2;
            best = q;
        }
    }
    best
}

/// Crossing test in the coordinate plane that drops the dominant normal axis.
fn inside_planar_loop(q: Vector3<f64>, loop_pts: &[Vector3<f64>], n: Vector3<f64>) -> bool {
    let drop = n.iamax();
    let (u, v) = match drop {
        0 => (1, 2),
        1 => (2, 0),
        _ => (0, 1),
    };
    let mut inside = false;
    let len = loop_pts.len();
    for i in 0..len {
        let a = loop_pts[i];
        let b = loop_pts[(i + len - 1) % len];
        if (a[v] > q[v]) != (b[v] > q[v]) {
            let x_cross = a[u] + (q[v] - a[v]) * (b[u] - a[u]) / (b[v] - a[v]);
            if q[u] < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Nearest point to `p` on the affine hull of `pts`.
///
/// Builds an orthonormal basis of the difference vectors (Gram–Schmidt with a
/// relative rank tolerance), so repeated or collinear points reduce the
/// dimension rather than blow up. Empty input returns `p`.
pub fn nearest_on_span(p: Vector3<f64>, pts: &[Vector3<f64>]) -> Vector3<f64> {
    let Some(&origin) = pts.first() else {
        return p;
    };
    let scale = pts
        .iter()
        .map(|q| (q - origin).norm())
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let mut basis: Vec<Vector3<f64>> = Vec::with_capacity(3);
    for q in &pts[1..] {
        let mut w = q - origin;
        for b in &basis {
            w -= b * b.dot(&w);
        }
        let len = w.norm();
        if len > 1e-9 * scale {
            basis.push(w / len);
            if basis.len() == 3 {
                return p;
            }
        }
    }
    let rel = p - origin;
    origin + basis.iter().map(|b| b * b.dot(&rel)).sum::<Vector3<f64>>()
}
