//! Small utilities: combinations and plane quantization for dedup.

use nalgebra::Vector3;

/// k-combinations of items (lexicographic).
pub(crate) fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn rec<T: Copy>(items: &[T], k: usize, start: usize, cur: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if cur.len() == k {
            out.push(cur.clone());
            return;
        }
        for i in start..items.len() {
            cur.push(items[i]);
            rec(items, k, i + 1, cur, out);
            cur.pop();
        }
    }
    let mut out = Vec::new();
    if k == 0 || k > items.len() {
        return out;
    }
    let mut cur = Vec::with_capacity(k);
    rec(items, k, 0, &mut cur, &mut out);
    out
}

/// Integer key for a plane `n·x = c` (unit `n`) at resolution `tol`.
pub(crate) fn quantize_plane(n: Vector3<f64>, c: f64, tol: f64) -> (i64, i64, i64, i64) {
    let s = 1.0 / tol;
    (
        (n.x * s).round() as i64,
        (n.y * s).round() as i64,
        (n.z * s).round() as i64,
        (c * s).round() as i64,
    )
}
