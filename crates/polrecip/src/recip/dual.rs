//! Polar reciprocation operator and ideal-vertex handling.
//!
//! Dual vertex `i` is the pole of primal face `i`'s plane; dual face `v` is the
//! reversed face-fan of primal vertex `v`. Face planes through the centre give
//! ideal dual vertices (`Pt::Ideal`), which are only turned into coordinates
//! by an explicit cap.
//!
//! Code cross-refs: `mesh::Mesh::vertex_face_fans`, `geom3::Pt`

use nalgebra::Vector3;

use super::cfg::{IDEAL_EPS, SOLVER_FAR};
use crate::geom3::{invert_through, Pt};
use crate::mesh::Mesh;

/// Dual polyhedron before ideal vertices are resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Dual {
    pub pts: Vec<Pt>,
    pub faces: Vec<Vec<usize>>,
}

/// How the final dual treats ideal and distant vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealOpts {
    /// Maximum distance from the centre; 0 deletes ideal vertices instead.
    pub cap: f64,
    /// Add an antipodal vertex and joining edge for every capped vertex.
    pub extra_elems: bool,
    /// Reflect the dual in the centre.
    pub invert: bool,
}

/// Reciprocate `mesh` in the sphere of `radius` about `center`.
///
/// Vertex `i` is `c + n̂·r²/d` for face `i` with unit normal `n̂` and signed
/// plane distance `d = n̂·(p − c)` (`p` the face centroid). `|d| < IDEAL_EPS`
/// gives `Pt::Ideal(n̂)`. An outward primal gives an outward dual.
pub fn build_dual(mesh: &Mesh, center: Vector3<f64>, radius: f64) -> Dual {
    let r2 = radius * radius;
    let pts = (0..mesh.faces.len())
        .map(|f| {
            let n = mesh.face_normal(f);
            let d = n.dot(&(mesh.face_centroid(f) - center));
            if d.abs() < IDEAL_EPS {
                Pt::Ideal(n)
            } else {
                Pt::Finite(center + n * (r2 / d))
            }
        })
        .collect();
    let faces = mesh
        .vertex_face_fans()
        .into_iter()
        .filter(|fan| !fan.is_empty())
        .map(|mut fan| {
            fan.reverse();
            fan
        })
        .collect();
    Dual { pts, faces }
}

impl Dual {
    #[inline]
    pub fn num_ideal(&self) -> usize {
        self.pts.iter().filter(|p| p.is_ideal()).count()
    }

    /// Working mesh for the iterative solvers: ideal vertices at `SOLVER_FAR`.
    pub(crate) fn solver_mesh(&self, center: Vector3<f64>) -> Mesh {
        let verts = self
            .pts
            .iter()
            .map(|p| p.capped(center, SOLVER_FAR).0)
            .collect();
        Mesh::new(verts, self.faces.clone())
    }

    /// Resolve ideal vertices and produce the output dual.
    ///
    /// With `cap > 0` every vertex farther than `cap` (ideal ones included)
    /// lands at exactly `cap` along its ray. With `cap == 0` ideal vertices are
    /// deleted along with their faces. Returns the mesh and the original
    /// indices of the deleted vertices.
    pub fn finish(self, center: Vector3<f64>, opts: IdealOpts) -> (Mesh, Vec<usize>) {
        let mut verts = Vec::with_capacity(self.pts.len());
        let mut capped = Vec::new();
        let mut unset = Vec::new();
        for (i, p) in self.pts.iter().enumerate() {
            let v = if opts.cap > 0.0 {
                let (v, moved) = p.capped(center, opts.cap);
                if moved {
                    capped.push(i);
                }
                v
            } else {
                p.finite().unwrap_or_else(|| {
                    unset.push(i);
                    center
                })
            };
            verts.push(if opts.invert {
                invert_through(v, center)
            } else {
                v
            });
        }

        let mut mesh = Mesh::new(verts, self.faces);
        mesh.delete_verts(&unset);
        // `capped` is only filled when nothing was deleted, so indices still hold.
        if opts.extra_elems {
            for i in capped {
                let j = mesh.verts.len();
                mesh.verts.push(invert_through(mesh.verts[i], center));
                mesh.edges.push([i, j]);
            }
        }
        (mesh, unset)
    }
}
