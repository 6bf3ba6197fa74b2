//! Configuration, mode tags and the iteration context.
//!
//! - `CenterMode` / `InitCenter` / `RadiusMode`: decoded once from their
//!   command-line letters (`FromStr`), never re-parsed in numeric code.
//! - `IterCfg`: iteration cap and termination epsilon shared by solvers.
//! - `RecipCtx`: centre/radius state returned by value from every solver.
//! - `RecipConfig`: the whole pipeline configuration plus `validate()`.

use std::str::FromStr;

use nalgebra::Vector3;

use super::cfg::{
    DEFAULT_EPSILON, DEFAULT_IDEAL_CAP, DEFAULT_MAX_ITERS, MAX_SIG_DIGITS, RADIUS_UNSET_EPS,
};
use crate::error::{RecipError, RecipWarning};

/// Which balance condition the canonical solver drives to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Balance {
    /// Mean nearest-edge distance equal for primal and dual.
    Edge,
    /// Primal vertices + dual faces balanced against primal faces + dual vertices.
    VertexFace,
    /// Equal blend of the two centre estimates; radius terms summed.
    Combined,
}

/// How the reciprocation centre is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CenterMode {
    Centroid,
    Circumcenter,
    Midsphere,
    /// `invert` reflects the live dual in the centre during the iteration.
    Canonical { balance: Balance, invert: bool },
    Point(Vector3<f64>),
}

/// Seed for the iterative centre solvers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InitCenter {
    /// Let the solver pick (vertex centroid).
    Auto,
    Centroid,
    Midsphere,
    Point(Vector3<f64>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Elem {
    Vertex,
    Edge,
    Face,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extreme {
    Nearest,
    Farthest,
}

/// How the reciprocation radius is chosen.
#[derive(Clone, Debug, PartialEq)]
pub enum RadiusMode {
    /// Default for the centre mode (see `pipeline::resolve_auto_radius`).
    Auto,
    Value(f64),
    Extremal { elem: Elem, extreme: Extreme },
    /// Distance to the affine span of these vertex indices.
    Span(Vec<usize>),
}

/// Iteration cap and termination limit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterCfg {
    pub max_iters: usize,
    pub epsilon: f64,
}

impl Default for IterCfg {
    fn default() -> Self {
        Self {
            max_iters: DEFAULT_MAX_ITERS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl IterCfg {
    /// Iteration cap from a signed count; negative counts are a configuration error.
    pub fn max_iters_from(n: i64) -> Result<usize, RecipError> {
        usize::try_from(n)
            .map_err(|_| RecipError::config("number of iterations must be 0 or greater"))
    }

    /// Epsilon `10^-digits`, plus a warning when the limit is implausible.
    pub fn epsilon_from_sig_digits(digits: i32) -> (f64, Option<RecipWarning>) {
        let warning = if digits < 0 {
            Some("termination limit is negative")
        } else if digits > MAX_SIG_DIGITS {
            Some("limit is very small, may not be attainable")
        } else {
            None
        };
        let epsilon = if digits >= 0 {
            1.0 / 10f64.powi(digits)
        } else {
            10f64.powi(-digits)
        };
        (
            epsilon,
            warning.map(|r| RecipWarning::Config { reason: r.into() }),
        )
    }
}

/// Iteration state threaded through the centre/radius solvers.
///
/// `center_test` and `radius_test` are the last relative centre and radius
/// steps (`|Δc|/r`, `Δr/r`); a solver converged when both fell below epsilon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecipCtx {
    pub center: Vector3<f64>,
    pub radius: f64,
    pub iters: usize,
    pub converged: bool,
    pub center_test: f64,
    pub radius_test: f64,
}

impl RecipCtx {
    /// A context that needs no iteration (closed-form centre and radius).
    pub fn fixed(center: Vector3<f64>, radius: f64) -> Self {
        Self {
            center,
            radius,
            iters: 0,
            converged: true,
            center_test: 0.0,
            radius_test: 0.0,
        }
    }

    #[inline]
    pub(crate) fn within(&self, epsilon: f64) -> bool {
        self.center_test.abs() < epsilon && self.radius_test.abs() < epsilon
    }

    /// Non-convergence warning carrying the achieved state, if applicable.
    pub fn warning(&self, solver: &'static str) -> Option<RecipWarning> {
        (!self.converged).then(|| RecipWarning::NotConverged {
            solver,
            iters: self.iters,
            center: self.center,
            radius: self.radius,
            center_test: self.center_test,
            radius_test: self.radius_test,
        })
    }
}

/// Full pipeline configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipConfig {
    pub center: CenterMode,
    pub init_center: InitCenter,
    pub radius: RadiusMode,
    /// Seed radius for the iterative solvers; `None` lets them estimate one.
    pub init_radius: Option<f64>,
    /// Reflect the final dual in the centre.
    pub invert: bool,
    /// Maximum distance for ideal or distant dual vertices; 0 deletes ideal vertices.
    pub ideal_cap: f64,
    /// Add antipodal vertices and edges for capped ideal vertices.
    pub extra_ideal_elems: bool,
    /// Output primal and dual together.
    pub append: bool,
    pub iter: IterCfg,
}

impl Default for RecipConfig {
    fn default() -> Self {
        Self {
            center: CenterMode::Centroid,
            init_center: InitCenter::Auto,
            radius: RadiusMode::Auto,
            init_radius: None,
            invert: false,
            ideal_cap: DEFAULT_IDEAL_CAP,
            extra_ideal_elems: true,
            append: false,
            iter: IterCfg::default(),
        }
    }
}

impl RecipConfig {
    /// Reject out-of-range values; return warnings for suspicious but usable ones.
    pub fn validate(&self) -> Result<Vec<RecipWarning>, RecipError> {
        let mut warnings = Vec::new();
        if !(self.iter.epsilon.is_finite() && self.iter.epsilon > 0.0) {
            return Err(RecipError::config(
                "termination epsilon must be a positive finite number",
            ));
        }
        if !(self.ideal_cap.is_finite() && self.ideal_cap >= 0.0) {
            return Err(RecipError::config("distance must be positive, or 0 to disable"));
        }
        let points = [
            match self.center {
                CenterMode::Point(c) => Some(c),
                _ => None,
            },
            match self.init_center {
                InitCenter::Point(c) => Some(c),
                _ => None,
            },
        ];
        if points.iter().flatten().any(|c| !c.iter().all(|x| x.is_finite())) {
            return Err(RecipError::config("centre coordinates must be finite"));
        }
        match &self.radius {
            RadiusMode::Value(r) => check_radius(*r, &mut warnings)?,
            RadiusMode::Span(idxs) if idxs.is_empty() => {
                return Err(RecipError::config("vertex index list is empty"));
            }
            _ => {}
        }
        if let Some(r) = self.init_radius {
            check_radius(r, &mut warnings)?;
        }
        Ok(warnings)
    }
}

fn check_radius(r: f64, warnings: &mut Vec<RecipWarning>) -> Result<(), RecipError> {
    if !r.is_finite() {
        return Err(RecipError::config("radius must be finite"));
    }
    let reason = if r.abs() < RADIUS_UNSET_EPS {
        Some("radius is very small (the reciprocal will be very large)")
    } else if r < 0.0 {
        Some("radius is negative")
    } else {
        None
    };
    if let Some(reason) = reason {
        warnings.push(RecipWarning::Config {
            reason: reason.into(),
        });
    }
    Ok(())
}

fn parse_point(s: &str) -> Option<Vector3<f64>> {
    if s.trim() == "0" {
        return Some(Vector3::zeros());
    }
    let xs: Vec<f64> = s
        .split(',')
        .map(|t| t.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    match xs.as_slice() {
        &[x, y, z] => Some(Vector3::new(x, y, z)),
        _ => None,
    }
}

impl FromStr for CenterMode {
    type Err = RecipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = |balance, invert| CenterMode::Canonical { balance, invert };
        Ok(match s {
            "C" => CenterMode::Centroid,
            "R" => CenterMode::Circumcenter,
            "M" => CenterMode::Midsphere,
            "e" => canonical(Balance::Edge, false),
            "E" => canonical(Balance::Edge, true),
            "v" => canonical(Balance::VertexFace, false),
            "V" => canonical(Balance::VertexFace, true),
            "a" => canonical(Balance::Combined, false),
            "A" => canonical(Balance::Combined, true),
            _ => CenterMode::Point(parse_point(s).ok_or_else(|| {
                RecipError::config(
                    "centre type must be three coordinates, or letter from CRMeEvVaA",
                )
            })?),
        })
    }
}

impl FromStr for InitCenter {
    type Err = RecipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "C" => InitCenter::Centroid,
            "M" => InitCenter::Midsphere,
            _ => InitCenter::Point(parse_point(s).ok_or_else(|| {
                RecipError::config("initial centre must be three coordinates, C, or M")
            })?),
        })
    }
}

impl FromStr for RadiusMode {
    type Err = RecipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let extremal = |elem, extreme| RadiusMode::Extremal { elem, extreme };
        Ok(match s {
            "v" => extremal(Elem::Vertex, Extreme::Nearest),
            "V" => extremal(Elem::Vertex, Extreme::Farthest),
            "e" => extremal(Elem::Edge, Extreme::Nearest),
            "E" => extremal(Elem::Edge, Extreme::Farthest),
            "f" => extremal(Elem::Face, Extreme::Nearest),
            "F" => extremal(Elem::Face, Extreme::Farthest),
            _ => {
                if let Ok(r) = s.trim().parse::<f64>() {
                    RadiusMode::Value(r)
                } else {
                    let idxs = s
                        .split(',')
                        .map(|t| t.trim().parse::<usize>())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|_| {
                            RecipError::config(
                                "radius must be a radius value, or V,v,E,e,F,f or a list of index numbers",
                            )
                        })?;
                    RadiusMode::Span(idxs)
                }
            }
        })
    }
}
