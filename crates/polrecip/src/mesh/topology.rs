//! Derived connectivity: implicit edges, validity, vertex face-fans, orientation.
//!
//! All queries are recomputed from the face loops on each call; meshes here
//! are small and the solvers cache what they reuse.

use std::collections::{BTreeMap, HashMap, VecDeque};

use nalgebra::Vector3;

use super::types::Mesh;
use crate::error::RecipError;

/// Undirected edge key with the smaller index first.
#[inline]
pub(crate) fn edge_key(a: usize, b: usize) -> [usize; 2] {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}

impl Mesh {
    /// Face-edge multiplicities: each consecutive pair in a face loop, counted once per face side.
    pub fn edge_face_counts(&self) -> BTreeMap<[usize; 2], usize> {
        let mut counts = BTreeMap::new();
        for face in &self.faces {
            let n = face.len();
            if n < 2 {
                continue;
            }
            for i in 0..n {
                let (a, b) = (face[i], face[(i + 1) % n]);
                if a != b {
                    *counts.entry(edge_key(a, b)).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Implicit edges: consecutive face vertex pairs, sorted and deduplicated.
    pub fn impl_edges(&self) -> Vec<[usize; 2]> {
        self.edge_face_counts().into_keys().collect()
    }

    /// First face edge shared by an odd number of faces, if any.
    fn open_edge(counts: &BTreeMap<[usize; 2], usize>) -> Option<[usize; 2]> {
        counts.iter().find(|(_, &c)| c % 2 == 1).map(|(e, _)| *e)
    }

    /// Closed: every face edge is shared by an even, non-zero number of faces.
    pub fn is_closed(&self) -> bool {
        Self::open_edge(&self.edge_face_counts()).is_none()
    }

    /// Validate as a polyhedron: has faces, is closed, every edge shared by exactly two faces.
    pub fn validate_polyhedron(&self) -> Result<(), RecipError> {
        self.check_indices()?;
        if self.faces.is_empty() {
            return Err(RecipError::NoFaces);
        }
        let counts = self.edge_face_counts();
        if let Some(edge) = Self::open_edge(&counts) {
            return Err(RecipError::NotClosed { edge });
        }
        if let Some((edge, &faces)) = counts.iter().find(|(_, &c)| c != 2) {
            return Err(RecipError::AmbiguousConnectivity { edge: *edge, faces });
        }
        Ok(())
    }

    /// Faces around each vertex in fan order.
    ///
    /// The walk starts at the first face containing `v` and crosses the edge
    /// from `v` to its successor in that face. For an outward-oriented closed
    /// mesh the resulting order is clockwise seen from outside. A fan that
    /// meets a boundary stops there.
    pub fn vertex_face_fans(&self) -> Vec<Vec<usize>> {
        let mut edge_faces: HashMap<[usize; 2], Vec<usize>> = HashMap::new();
        let mut vert_faces: Vec<Vec<usize>> = vec![Vec::new(); self.verts.len()];
        for (fi, face) in self.faces.iter().enumerate() {
            let n = face.len();
            for i in 0..n {
                let (a, b) = (face[i], face[(i + 1) % n]);
                edge_faces.entry(edge_key(a, b)).or_default().push(fi);
                if vert_faces[a].last() != Some(&fi) {
                    vert_faces[a].push(fi);
                }
            }
        }

        let mut fans = Vec::with_capacity(self.verts.len());
        for (v, incident) in vert_faces.iter().enumerate() {
            let Some(&start) = incident.first() else {
                fans.push(Vec::new());
                continue;
            };
            let mut fan = vec![start];
            let mut cur = start;
            let Some((_, mut across)) = loop_neighbours(&self.faces[cur], v) else {
                fans.push(fan);
                continue;
            };
            while fan.len() <= incident.len() {
                let Some(next) = edge_faces
                    .get(&edge_key(v, across))
                    .and_then(|fs| fs.iter().copied().find(|&g| g != cur))
                else {
                    break;
                };
                if next == start {
                    break;
                }
                let Some((prev_v, next_v)) = loop_neighbours(&self.faces[next], v) else {
                    break;
                };
                across = if prev_v == across { next_v } else { prev_v };
                fan.push(next);
                cur = next;
            }
            fans.push(fan);
        }
        fans
    }

    /// Make face winding consistent per connected component, then outward.
    ///
    /// Neighbouring faces must traverse their shared edge in opposite
    /// directions. A component whose signed volume (about its own centroid)
    /// comes out negative is reversed as a whole. Returns the number of faces
    /// whose loop was reversed.
    pub fn orient(&mut self) -> usize {
        let nf = self.faces.len();
        let mut edge_faces: HashMap<[usize; 2], Vec<usize>> = HashMap::new();
        for (fi, face) in self.faces.iter().enumerate() {
            let n = face.len();
            for i in 0..n {
                edge_faces
                    .entry(edge_key(face[i], face[(i + 1) % n]))
                    .or_default()
                    .push(fi);
            }
        }

        let mut flipped = vec![false; nf];
        let mut seen = vec![false; nf];
        for seed in 0..nf {
            if seen[seed] {
                continue;
            }
            seen[seed] = true;
            let mut component = vec![seed];
            let mut queue = VecDeque::from([seed]);
            while let Some(f) = queue.pop_front() {
                let face = self.faces[f].clone();
                let n = face.len();
                for i in 0..n {
                    let (a, b) = (face[i], face[(i + 1) % n]);
                    let Some(nbrs) = edge_faces.get(&edge_key(a, b)) else {
                        continue;
                    };
                    for &g in nbrs {
                        if seen[g] {
                            continue;
                        }
                        seen[g] = true;
                        if traverses(&self.faces[g], a, b) {
                            self.faces[g].reverse();
                            flipped[g] = !flipped[g];
                        }
                        component.push(g);
                        queue.push_back(g);
                    }
                }
            }
            if self.signed_volume_of(&component) < 0.0 {
                for &f in &component {
                    self.faces[f].reverse();
                    flipped[f] = !flipped[f];
                }
            }
        }
        flipped.iter().filter(|&&x| x).count()
    }

    /// Signed volume enclosed by all faces (positive for outward winding).
    pub fn signed_volume(&self) -> f64 {
        let all: Vec<usize> = (0..self.faces.len()).collect();
        self.signed_volume_of(&all)
    }

    fn signed_volume_of(&self, faces: &[usize]) -> f64 {
        let mut sum = Vector3::zeros();
        let mut count = 0usize;
        for &f in faces {
            for &v in &self.faces[f] {
                sum += self.verts[v];
                count += 1;
            }
        }
        if count == 0 {
            return 0.0;
        }
        let anchor = sum / count as f64;
        let mut vol = 0.0;
        for &f in faces {
            let face = &self.faces[f];
            if face.len() < 3 {
                continue;
            }
            let p0 = self.verts[face[0]] - anchor;
            for k in 1..face.len() - 1 {
                let p1 = self.verts[face[k]] - anchor;
                let p2 = self.verts[face[k + 1]] - anchor;
                vol += p0.dot(&p1.cross(&p2));
            }
        }
        vol / 6.0
    }
}

/// Predecessor and successor of `v` in a face loop.
fn loop_neighbours(face: &[usize], v: usize) -> Option<(usize, usize)> {
    let n = face.len();
    let i = face.iter().position(|&x| x == v)?;
    Some((face[(i + n - 1) % n], face[(i + 1) % n]))
}

/// Whether the loop contains the directed step `a → b`.
fn traverses(face: &[usize], a: usize, b: usize) -> bool {
    let n = face.len();
    (0..n).any(|i| face[i] == a && face[(i + 1) % n] == b)
}
