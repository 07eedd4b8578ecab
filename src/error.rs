//! Error types for rheo.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`FlowError`].
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors that can occur while computing a flow step.
#[derive(Error, Debug)]
pub enum FlowError {
    /// A zero-length vector was passed where a direction is required.
    #[error("degenerate vector while {context}")]
    DegenerateVector {
        /// What the vector was needed for.
        context: String,
    },

    /// The linear solver hit a near-zero pivot after partial pivoting.
    #[error("linear system has a near-zero pivot in column {column}")]
    SingularSystem {
        /// The pivot column that could not be eliminated.
        column: usize,
    },

    /// Fewer than three planes were given to the intersection solver.
    #[error("plane intersection needs at least 3 planes, got {count}")]
    TooFewPlanes {
        /// Number of planes provided.
        count: usize,
    },

    /// A plane beyond the first three misses the computed intersection point.
    #[error("plane {plane} misses the intersection point by {offset} (tolerance {tolerance})")]
    InconsistentPlanes {
        /// Index of the offending plane.
        plane: usize,
        /// Signed distance from the computed point to the plane.
        offset: f64,
        /// Tolerance the offset was checked against.
        tolerance: f64,
    },

    /// A face's point set does not span a plane.
    #[error("face {face} does not span a plane")]
    FaceWithoutPlane {
        /// The face index.
        face: usize,
    },

    /// A vertex has a number of incident faces that face flow cannot solve.
    #[error("vertex {vertex} has {incident_faces} incident faces (face flow needs 3 or 4)")]
    UnsupportedValence {
        /// The vertex index.
        vertex: usize,
        /// Number of faces incident to the vertex.
        incident_faces: usize,
    },

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A closed polyline was built from too few vertices.
    #[error("a closed polyline needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of distinct vertices provided.
        count: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// A geometry handle did not resolve to the requested kind of object.
    #[error("no {expected} stored under the given handle")]
    MissingObject {
        /// The kind of geometry that was requested.
        expected: &'static str,
    },
}

impl FlowError {
    /// Create a degenerate vector error.
    pub fn degenerate<T: Into<String>>(context: T) -> Self {
        FlowError::DegenerateVector {
            context: context.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        FlowError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Error raised by a frame recorder when a capture fails.
///
/// Capture failures are reported alongside the finished flow run; they never
/// interrupt the geometric iteration itself.
#[derive(Error, Debug, Clone)]
#[error("frame capture failed: {message}")]
pub struct CaptureError {
    /// Description of the capture failure.
    pub message: String,
}

impl CaptureError {
    /// Create a capture error from any displayable reason.
    pub fn new<T: std::fmt::Display>(message: T) -> Self {
        CaptureError {
            message: message.to_string(),
        }
    }
}
