//! Core mesh type: vertices, face loops, explicit edges.

use nalgebra::Vector3;

use crate::error::RecipError;
use crate::geom3::newell_normal;

/// Face-vertex polyhedral mesh.
///
/// Invariants:
/// - Faces are cyclic vertex loops; orientation is whatever the producer gave
///   until `orient()` runs.
/// - `edges` holds explicit edges only (free edges, synthesised ideal lines).
///   Face edges are derived on demand by `impl_edges()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub verts: Vec<Vector3<f64>>,
    pub faces: Vec<Vec<usize>>,
    pub edges: Vec<[usize; 2]>,
}

impl Mesh {
    #[inline]
    pub fn new(verts: Vec<Vector3<f64>>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            verts,
            faces,
            edges: Vec::new(),
        }
    }

    /// Check that every face and edge index refers to an existing vertex.
    pub fn check_indices(&self) -> Result<(), RecipError> {
        let num_verts = self.verts.len();
        let all = self
            .faces
            .iter()
            .flat_map(|f| f.iter())
            .chain(self.edges.iter().flat_map(|e| e.iter()));
        for &index in all {
            if index >= num_verts {
                return Err(RecipError::BadVertexIndex { index, num_verts });
            }
        }
        Ok(())
    }

    /// Vertex centroid (mean of all vertex coordinates); zero for an empty mesh.
    pub fn centroid(&self) -> Vector3<f64> {
        if self.verts.is_empty() {
            return Vector3::zeros();
        }
        self.verts.iter().sum::<Vector3<f64>>() / self.verts.len() as f64
    }

    #[inline]
    pub fn face_points(&self, f: usize) -> Vec<Vector3<f64>> {
        self.faces[f].iter().map(|&v| self.verts[v]).collect()
    }

    /// Unit normal of face `f` (Newell); zero for degenerate faces.
    pub fn face_normal(&self, f: usize) -> Vector3<f64> {
        let n = newell_normal(&self.face_points(f));
        let len = n.norm();
        if len > 0.0 && len.is_finite() {
            n / len
        } else {
            Vector3::zeros()
        }
    }

    /// Mean of the face's vertices.
    pub fn face_centroid(&self, f: usize) -> Vector3<f64> {
        let face = &self.faces[f];
        if face.is_empty() {
            return Vector3::zeros();
        }
        face.iter().map(|&v| self.verts[v]).sum::<Vector3<f64>>() / face.len() as f64
    }

    /// Append another mesh; its indices are shifted past our vertices.
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.verts.len();
        self.verts.extend_from_slice(&other.verts);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| f.iter().map(|&v| v + offset).collect()),
        );
        self.edges
            .extend(other.edges.iter().map(|e| [e[0] + offset, e[1] + offset]));
    }

    /// Apply a point map to every vertex.
    pub fn map_verts(&mut self, f: impl Fn(Vector3<f64>) -> Vector3<f64>) {
        for v in &mut self.verts {
            *v = f(*v);
        }
    }

    /// Translate every vertex by `t`.
    #[inline]
    pub fn translate(&mut self, t: Vector3<f64>) {
        self.map_verts(|v| v + t);
    }
}
