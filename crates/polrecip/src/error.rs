//! Errors and warnings surfaced by mesh validation and the reciprocation pipeline.
//!
//! Fatal conditions are `RecipError`; everything the pipeline can recover from
//! is a `RecipWarning`, collected into the output and also logged.

use std::fmt;

use nalgebra::Vector3;

/// Fatal errors: invalid input, invalid configuration, or a degenerate solve.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipError {
    /// The mesh has no faces.
    NoFaces,
    /// Some implicit edge is used by an odd number of faces.
    NotClosed { edge: [usize; 2] },
    /// Some implicit edge is used by more than two faces.
    AmbiguousConnectivity { edge: [usize; 2], faces: usize },
    /// A face or edge references a vertex that does not exist.
    BadVertexIndex { index: usize, num_verts: usize },
    /// Option values that are out of range or contradictory.
    InvalidConfig { reason: String },
    /// The circumcentre normal equations are singular (coplanar/collinear vertices).
    SingularCircumcenter,
    /// OFF text could not be parsed.
    Off { line: usize, reason: String },
}

impl RecipError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn off(line: usize, reason: impl Into<String>) -> Self {
        Self::Off {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RecipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFaces => write!(f, "not a polyhedron, has no faces"),
            Self::NotClosed { edge } => write!(
                f,
                "not a polyhedron, is not closed (edge {}-{} has an odd face count)",
                edge[0], edge[1]
            ),
            Self::AmbiguousConnectivity { edge, faces } => write!(
                f,
                "unknown whether a polyhedron, ambiguous connectivity (edge {}-{} is shared by {} faces)",
                edge[0], edge[1], faces
            ),
            Self::BadVertexIndex { index, num_verts } => write!(
                f,
                "vertex index {index} out of range (mesh has {num_verts} vertices)"
            ),
            Self::InvalidConfig { reason } => write!(f, "invalid option: {reason}"),
            Self::SingularCircumcenter => write!(
                f,
                "circumcentre is undefined (vertices are coplanar or collinear)"
            ),
            Self::Off { line, reason } => write!(f, "OFF line {line}: {reason}"),
        }
    }
}

impl std::error::Error for RecipError {}

/// Non-fatal conditions. The pipeline keeps going and records these.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipWarning {
    /// Vertices or edges that were not part of any face were removed from the input.
    StrippedFreeElements,
    /// An iterative centre solver hit its iteration cap.
    NotConverged {
        solver: &'static str,
        iters: usize,
        center: Vector3<f64>,
        radius: f64,
        center_test: f64,
        radius_test: f64,
    },
    /// Dual vertices at infinity (and their faces) were deleted; original indices.
    RemovedIdealVertices { indices: Vec<usize> },
    /// Option value accepted, but likely to give a poor result.
    Config { reason: String },
}

impl fmt::Display for RecipWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrippedFreeElements => write!(
                f,
                "stripped vertices or edges which were not part of any face"
            ),
            Self::NotConverged {
                solver,
                iters,
                center,
                radius,
                center_test,
                radius_test,
            } => write!(
                f,
                "{solver}: limit not achieved after {iters} iterations \
                 (c_test={center_test:e}, r_test={radius_test:e}), \
                 center=({} {} {}), radius={radius}",
                center.x, center.y, center.z
            ),
            Self::RemovedIdealVertices { indices } => {
                let list: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
                write!(
                    f,
                    "removed invalid vertices (and associated faces) with indices - {}",
                    list.join(",")
                )
            }
            Self::Config { reason } => write!(f, "{reason}"),
        }
    }
}
