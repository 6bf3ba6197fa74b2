//! Reciprocation radius from a centre.

use nalgebra::Vector3;

use super::dist::{edge_dist_lims, face_dist_lims, vert_dist_lims};
use super::types::{Elem, Extreme};
use crate::error::RecipError;
use crate::geom3::nearest_on_span;
use crate::mesh::Mesh;

/// Nearest or farthest distance from `c` to the vertices, implicit edges or faces.
pub fn extremal_radius(mesh: &Mesh, c: Vector3<f64>, elem: Elem, extreme: Extreme) -> f64 {
    let lims = match elem {
        Elem::Vertex => vert_dist_lims(mesh, c),
        Elem::Edge => edge_dist_lims(mesh, c),
        Elem::Face => face_dist_lims(mesh, c),
    };
    match extreme {
        Extreme::Nearest => lims.min,
        Extreme::Farthest => lims.max,
    }
}

/// Distance from `c` to the affine span of the listed vertices.
///
/// One vertex spans a point, two a line, three a plane; four or more in
/// general position span space and give 0.
pub fn span_radius(mesh: &Mesh, c: Vector3<f64>, idxs: &[usize]) -> Result<f64, RecipError> {
    let num_verts = mesh.verts.len();
    let pts = idxs
        .iter()
        .map(|&index| {
            mesh.verts
                .get(index)
                .copied()
                .ok_or(RecipError::BadVertexIndex { index, num_verts })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if pts.is_empty() {
        return Err(RecipError::config("vertex index list is empty"));
    }
    Ok((nearest_on_span(c, &pts) - c).norm())
}
