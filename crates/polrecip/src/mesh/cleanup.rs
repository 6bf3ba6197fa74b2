//! Element deletion with index compaction, and free-element stripping.

use std::collections::BTreeSet;

use super::topology::edge_key;
use super::types::Mesh;

impl Mesh {
    /// Delete vertices by index, together with every face and edge that uses them.
    ///
    /// Remaining vertices keep their relative order; indices are compacted.
    /// Out-of-range and duplicate indices are ignored.
    pub fn delete_verts(&mut self, idxs: &[usize]) {
        let doomed: BTreeSet<usize> = idxs
            .iter()
            .copied()
            .filter(|&i| i < self.verts.len())
            .collect();
        if doomed.is_empty() {
            return;
        }
        let mut remap: Vec<Option<usize>> = Vec::with_capacity(self.verts.len());
        let mut next = 0usize;
        for i in 0..self.verts.len() {
            if doomed.contains(&i) {
                remap.push(None);
            } else {
                remap.push(Some(next));
                next += 1;
            }
        }
        let mut keep = remap.iter().map(Option::is_some);
        self.verts.retain(|_| keep.next().unwrap_or(false));

        self.faces = std::mem::take(&mut self.faces)
            .into_iter()
            .filter_map(|f| f.iter().map(|&v| remap[v]).collect::<Option<Vec<usize>>>())
            .collect();
        self.edges = std::mem::take(&mut self.edges)
            .into_iter()
            .filter_map(|[a, b]| Some([remap[a]?, remap[b]?]))
            .collect();
    }

    /// Remove explicit edges not implied by a face, then vertices used by nothing.
    ///
    /// Returns whether anything was removed.
    pub fn strip_free_elements(&mut self) -> bool {
        let implicit: BTreeSet<[usize; 2]> = self.impl_edges().into_iter().collect();
        let before = self.edges.len();
        self.edges.retain(|e| implicit.contains(&edge_key(e[0], e[1])));
        let stripped_edges = self.edges.len() != before;

        let mut used = vec![false; self.verts.len()];
        for &v in self.faces.iter().flatten() {
            used[v] = true;
        }
        for e in &self.edges {
            used[e[0]] = true;
            used[e[1]] = true;
        }
        let free: Vec<usize> = (0..self.verts.len()).filter(|&v| !used[v]).collect();
        self.delete_verts(&free);

        stripped_edges || !free.is_empty()
    }
}
