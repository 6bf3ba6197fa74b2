//! Special polyhedra used in tests and benchmarks.
//!
//! Purpose
//! - Canonical solids with known centres and radii (circum-, mid-, in-radius),
//!   all centred at the origin with outward face loops.
//! - A convex-hull builder so vertex-only definitions (icosahedron,
//!   dodecahedron, …) get faces without hand-written index tables.
//! - Seeded vertex jitter for non-canonical but still convex inputs.
//!
//! Reference radii (origin-centred)
//! - Tetrahedron (±1,±1,±1 even):   R = √3,         ρ = 1,     r = 1/√3.
//! - Cube [-1,1]³:                   R = √3,         ρ = √2,    r = 1.
//! - Octahedron (±1,0,0):            R = 1,          ρ = 1/√2,  r = 1/√3.
//! - Icosahedron (0,±1,±φ):          R = √(1+φ²),    ρ = φ.
//! - Dodecahedron (±1,±1,±1)∪…:      R = √3,         ρ = φ.

use std::collections::HashSet;

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Mesh;
use super::util::{combinations, quantize_plane};

/// Golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

const HULL_EPS: f64 = 1e-9;

pub fn tetrahedron() -> Mesh {
    let verts = vec![
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, -1.0, -1.0),
        Vector3::new(-1.0, 1.0, -1.0),
        Vector3::new(-1.0, -1.0, 1.0),
    ];
    let faces = vec![vec![1, 3, 2], vec![0, 2, 3], vec![0, 3, 1], vec![0, 1, 2]];
    Mesh::new(verts, faces)
}

/// Cube [-1,1]³; vertex `i` has coordinate bits (x, y, z) = (i&1, i&2, i&4).
pub fn cube() -> Mesh {
    let verts = (0..8)
        .map(|i| {
            let s = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
            Vector3::new(s(1), s(2), s(4))
        })
        .collect();
    let faces = vec![
        vec![0, 2, 3, 1], // z = -1
        vec![4, 5, 7, 6], // z = +1
        vec![0, 1, 5, 4], // y = -1
        vec![2, 6, 7, 3], // y = +1
        vec![0, 4, 6, 2], // x = -1
        vec![1, 3, 7, 5], // x = +1
    ];
    Mesh::new(verts, faces)
}

pub fn octahedron() -> Mesh {
    let verts = vec![
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 0.0, -1.0),
    ];
    let faces = vec![
        vec![0, 2, 4],
        vec![1, 4, 2],
        vec![0, 4, 3],
        vec![0, 5, 2],
        vec![1, 3, 4],
        vec![1, 2, 5],
        vec![0, 3, 5],
        vec![1, 5, 3],
    ];
    Mesh::new(verts, faces)
}

pub fn icosahedron() -> Mesh {
    let mut pts = Vec::with_capacity(12);
    for &a in &[-1.0, 1.0] {
        for &b in &[-PHI, PHI] {
            pts.push(Vector3::new(0.0, a, b));
            pts.push(Vector3::new(a, b, 0.0));
            pts.push(Vector3::new(b, 0.0, a));
        }
    }
    hull_mesh(&pts)
}

pub fn dodecahedron() -> Mesh {
    let inv = 1.0 / PHI;
    let mut pts = Vec::with_capacity(20);
    for &x in &[-1.0, 1.0] {
        for &y in &[-1.0, 1.0] {
            for &z in &[-1.0, 1.0] {
                pts.push(Vector3::new(x, y, z));
            }
        }
    }
    for &a in &[-inv, inv] {
        for &b in &[-PHI, PHI] {
            pts.push(Vector3::new(0.0, a, b));
            pts.push(Vector3::new(a, b, 0.0));
            pts.push(Vector3::new(b, 0.0, a));
        }
    }
    hull_mesh(&pts)
}

/// Cuboctahedron: permutations of (±1, ±1, 0). Quasi-regular, so its midsphere exists.
pub fn cuboctahedron() -> Mesh {
    let mut pts = Vec::with_capacity(12);
    for &a in &[-1.0, 1.0] {
        for &b in &[-1.0, 1.0] {
            pts.push(Vector3::new(a, b, 0.0));
            pts.push(Vector3::new(a, 0.0, b));
            pts.push(Vector3::new(0.0, a, b));
        }
    }
    hull_mesh(&pts)
}

/// Right prism over a regular `n`-gon of circumradius 1, with half-height `h`.
pub fn prism(n: usize, h: f64) -> Mesh {
    let n = n.max(3);
    let mut pts = Vec::with_capacity(2 * n);
    for k in 0..n {
        let t = std::f64::consts::TAU * k as f64 / n as f64;
        pts.push(Vector3::new(t.cos(), t.sin(), -h));
        pts.push(Vector3::new(t.cos(), t.sin(), h));
    }
    hull_mesh(&pts)
}

/// Convex hull faces of a point set, as a mesh over the same vertex list.
///
/// Complexity: O(V⁴) (supporting planes from all triples). Intended for small
/// solids. Faces are maximal coplanar vertex sets, ordered counter-clockwise
/// about their outward normal. Points strictly inside the hull stay as free
/// vertices.
pub fn hull_mesh(pts: &[Vector3<f64>]) -> Mesh {
    let mut faces = Vec::new();
    if pts.len() < 4 {
        return Mesh::new(pts.to_vec(), faces);
    }
    let idxs: Vec<usize> = (0..pts.len()).collect();
    let mut seen = HashSet::new();
    for comb in combinations(&idxs, 3) {
        let (a, b, c) = (pts[comb[0]], pts[comb[1]], pts[comb[2]]);
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if len < HULL_EPS {
            continue;
        }
        let mut n = n / len;
        let mut off = n.dot(&a);
        let above = pts.iter().any(|p| n.dot(p) > off + HULL_EPS);
        let below = pts.iter().any(|p| n.dot(p) < off - HULL_EPS);
        if above && below {
            continue;
        }
        if above {
            n = -n;
            off = -off;
        }
        if !seen.insert(quantize_plane(n, off, 1e-6)) {
            continue;
        }
        let on_plane: Vec<usize> = idxs
            .iter()
            .copied()
            .filter(|&i| (n.dot(&pts[i]) - off).abs() <= HULL_EPS)
            .collect();
        faces.push(order_ccw(pts, &on_plane, n));
    }
    Mesh::new(pts.to_vec(), faces)
}

/// Sort coplanar vertex indices by angle about their centroid, CCW around `n`.
fn order_ccw(pts: &[Vector3<f64>], face: &[usize], n: Vector3<f64>) -> Vec<usize> {
    let centroid = face.iter().map(|&i| pts[i]).sum::<Vector3<f64>>() / face.len() as f64;
    let u = (pts[face[0]] - centroid).normalize();
    let w = n.cross(&u);
    let mut keyed: Vec<(f64, usize)> = face
        .iter()
        .map(|&i| {
            let rel = pts[i] - centroid;
            (rel.dot(&w).atan2(rel.dot(&u)), i)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    keyed.into_iter().map(|(_, i)| i).collect()
}

/// Move every vertex by an independent uniform offset in `[-amp, amp]³`.
///
/// Faces with more than three vertices stop being exactly planar; small
/// amplitudes keep the solid convex enough for the iterative solvers.
pub fn jitter(mesh: &Mesh, amp: f64, seed: u64) -> Mesh {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = mesh.clone();
    for v in &mut out.verts {
        *v += Vector3::new(
            rng.gen_range(-amp..=amp),
            rng.gen_range(-amp..=amp),
            rng.gen_range(-amp..=amp),
        );
    }
    out
}
