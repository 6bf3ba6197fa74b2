//! OFF text format (read and write).
//!
//! Reading accepts an optional `OFF`/`COFF`/`NOFF` header, `#` comments, and
//! trailing per-element values (colours) which are ignored. A two-index face
//! is an explicit edge; a one-index face (a marked vertex) is dropped.
//! Writing emits faces first and then explicit edges as two-index faces.

use std::fmt::Write as _;

use nalgebra::Vector3;

use super::types::Mesh;
use crate::error::RecipError;

impl Mesh {
    /// Parse OFF text.
    pub fn from_off_str(text: &str) -> Result<Mesh, RecipError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.split('#').next().unwrap_or("").trim()))
            .filter(|(_, l)| !l.is_empty());

        let (mut line_no, mut line) = lines
            .next()
            .ok_or_else(|| RecipError::off(0, "empty input"))?;
        if line.ends_with("OFF") {
            (line_no, line) = lines
                .next()
                .ok_or_else(|| RecipError::off(line_no, "missing element counts"))?;
        }
        let counts = parse_numbers::<usize>(line, line_no)?;
        if counts.len() < 2 {
            return Err(RecipError::off(line_no, "expected vertex and face counts"));
        }
        let (num_verts, num_faces) = (counts[0], counts[1]);

        // Counts come from the file; capacity is bounded by the text itself.
        let mut mesh = Mesh::default();
        mesh.verts.reserve(num_verts.min(text.len()));
        for _ in 0..num_verts {
            let (no, l) = lines
                .next()
                .ok_or_else(|| RecipError::off(line_no, "too few vertex lines"))?;
            line_no = no;
            let xs = parse_numbers::<f64>(l, no)?;
            if xs.len() < 3 {
                return Err(RecipError::off(no, "vertex needs three coordinates"));
            }
            mesh.verts.push(Vector3::new(xs[0], xs[1], xs[2]));
        }

        for _ in 0..num_faces {
            let (no, l) = lines
                .next()
                .ok_or_else(|| RecipError::off(line_no, "too few face lines"))?;
            line_no = no;
            let mut tokens = l.split_whitespace();
            let n: usize = tokens
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or_else(|| RecipError::off(no, "face needs a vertex count"))?;
            let mut idxs = Vec::with_capacity(n.min(l.len()));
            for _ in 0..n {
                let idx: usize = tokens
                    .next()
                    .and_then(|t| t.parse().ok())
                    .ok_or_else(|| RecipError::off(no, "bad or missing face index"))?;
                if idx >= num_verts {
                    return Err(RecipError::off(
                        no,
                        format!("face index {idx} out of range (have {num_verts} vertices)"),
                    ));
                }
                idxs.push(idx);
            }
            match idxs.len() {
                0 | 1 => {}
                2 => mesh.edges.push([idxs[0], idxs[1]]),
                _ => mesh.faces.push(idxs),
            }
        }
        Ok(mesh)
    }

    /// Render as OFF text with full `f64` precision.
    pub fn to_off_string(&self) -> String {
        let mut out = String::new();
        let num_elems = self.faces.len() + self.edges.len();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "OFF\n{} {} 0", self.verts.len(), num_elems);
        for v in &self.verts {
            let _ = writeln!(out, "{} {} {}", v.x, v.y, v.z);
        }
        for f in &self.faces {
            let idxs: Vec<String> = f.iter().map(|i| i.to_string()).collect();
            let _ = writeln!(out, "{} {}", f.len(), idxs.join(" "));
        }
        for e in &self.edges {
            let _ = writeln!(out, "2 {} {}", e[0], e[1]);
        }
        out
    }
}

fn parse_numbers<T: std::str::FromStr>(line: &str, line_no: usize) -> Result<Vec<T>, RecipError> {
    line.split_whitespace()
        .map(|t| {
            t.parse::<T>()
                .map_err(|_| RecipError::off(line_no, format!("cannot parse '{t}'")))
        })
        .collect()
}
