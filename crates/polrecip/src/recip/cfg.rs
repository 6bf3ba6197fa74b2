//! Tolerance and default constants for reciprocation (internal).
//!
//! Policy
//! - Defaults are fixed constants; the user-facing knobs (iteration cap,
//!   termination epsilon, ideal cap) live on `RecipConfig`.

/// Default termination epsilon for iterative solvers (12 significant digits).
pub const DEFAULT_EPSILON: f64 = 1e-12;
/// Default iteration cap for iterative solvers.
pub const DEFAULT_MAX_ITERS: usize = 10_000;
/// Default maximum distance for ideal / very distant dual vertices.
pub const DEFAULT_IDEAL_CAP: f64 = 1e15;
/// Significant digits beyond which a termination limit is likely unattainable.
pub const MAX_SIG_DIGITS: i32 = 17;

/// Face planes closer than this to the centre reciprocate to ideal points.
pub(crate) const IDEAL_EPS: f64 = 1e-12;
/// Placement distance for ideal dual vertices inside iterative solvers.
pub(crate) const SOLVER_FAR: f64 = 1e15;
/// Relative singular-value floor for the circumcentre normal equations.
pub(crate) const SINGULAR_EPS: f64 = 1e-12;
/// Radii with magnitude below this are treated as "not given".
pub(crate) const RADIUS_UNSET_EPS: f64 = 1e-12;
