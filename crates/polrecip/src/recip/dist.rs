//! Distance extents from a centre to mesh elements.
//!
//! - `DistLims`: min / max / sum over a set of distances.
//! - Vertex, implicit-edge and face distances use nearest points
//!   (`geom3::{nearest_on_segment, nearest_on_polygon}`).

use nalgebra::Vector3;

use crate::geom3::{nearest_on_polygon, nearest_on_segment};
use crate::mesh::Mesh;

/// Extents of a set of distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistLims {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: usize,
}

impl Default for DistLims {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }
}

impl DistLims {
    #[inline]
    fn push(&mut self, d: f64) {
        self.min = self.min.min(d);
        self.max = self.max.max(d);
        self.sum += d;
        self.count += 1;
    }

    /// Mean distance; 0 for an empty set.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

impl FromIterator<f64> for DistLims {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut lims = DistLims::default();
        for d in iter {
            lims.push(d);
        }
        lims
    }
}

/// Nearest point on each implicit edge, in `impl_edges()` order.
pub(crate) fn edge_nearest_points(mesh: &Mesh, c: Vector3<f64>) -> Vec<Vector3<f64>> {
    mesh.impl_edges()
        .into_iter()
        .map(|[a, b]| nearest_on_segment(c, mesh.verts[a], mesh.verts[b]))
        .collect()
}

/// Nearest point on each face polygon, in face order.
pub(crate) fn face_nearest_points(mesh: &Mesh, c: Vector3<f64>) -> Vec<Vector3<f64>> {
    (0..mesh.faces.len())
        .map(|f| nearest_on_polygon(c, &mesh.face_points(f)))
        .collect()
}

pub fn vert_dist_lims(mesh: &Mesh, c: Vector3<f64>) -> DistLims {
    mesh.verts.iter().map(|v| (v - c).norm()).collect()
}

pub fn edge_dist_lims(mesh: &Mesh, c: Vector3<f64>) -> DistLims {
    edge_nearest_points(mesh, c)
        .into_iter()
        .map(|p| (p - c).norm())
        .collect()
}

pub fn face_dist_lims(mesh: &Mesh, c: Vector3<f64>) -> DistLims {
    face_nearest_points(mesh, c)
        .into_iter()
        .map(|p| (p - c).norm())
        .collect()
}
