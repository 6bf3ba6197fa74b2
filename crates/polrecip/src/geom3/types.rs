//! Basic 3D types: projective points and the point-inversion map.
//!
//! - `Pt`: a point that is either finite or ideal (a direction at infinity).
//! - `invert_through`: reflection of a point in a centre point.
//!
//! References
//! - Code cross-refs: `recip::dual` (creates `Pt::Ideal`), `recip::canonical`

use nalgebra::Vector3;

/// Projective point in R³.
///
/// Invariants:
/// - `Ideal(dir)` carries a unit direction; it never stands for a coordinate.
/// - Convert to a coordinate only through `finite()` or `capped()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pt {
    Finite(Vector3<f64>),
    Ideal(Vector3<f64>),
}

impl Pt {
    #[inline]
    pub fn finite(&self) -> Option<Vector3<f64>> {
        match *self {
            Pt::Finite(p) => Some(p),
            Pt::Ideal(_) => None,
        }
    }
    #[inline]
    pub fn is_ideal(&self) -> bool {
        matches!(self, Pt::Ideal(_))
    }

    /// Resolve to a coordinate no farther than `cap` from `center`.
    ///
    /// Ideal points land at exactly `cap` along their direction; finite points
    /// beyond `cap` are pulled back onto the ray from `center`. Returns the
    /// coordinate and whether it was moved.
    pub fn capped(&self, center: Vector3<f64>, cap: f64) -> (Vector3<f64>, bool) {
        match *self {
            Pt::Ideal(dir) => (center + dir * cap, true),
            Pt::Finite(p) => {
                let rel = p - center;
                let dist = rel.norm();
                if dist > cap {
                    (center + rel * (cap / dist), true)
                } else {
                    (p, false)
                }
            }
        }
    }
}

/// Point inversion (central reflection) in `center`: `p ↦ 2c − p`.
#[inline]
pub fn invert_through(p: Vector3<f64>, center: Vector3<f64>) -> Vector3<f64> {
    center * 2.0 - p
}
