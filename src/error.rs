//! Error types for kernel construction and evaluation.

use thiserror::Error;

/// Result type alias for kernel operations.
pub type GravityResult<T> = Result<T, GravityError>;

/// Errors surfaced by the gravity kernels.
///
/// Numerical degeneracy (two bodies at the same position) is not an error:
/// it shows up as non-finite values in the returned accelerations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GravityError {
    /// Position snapshot length does not match the number of bodies.
    #[error("expected {expected} positions, got {got}")]
    BodyCountMismatch { expected: usize, got: usize },

    /// A position vector has the wrong number of components.
    #[error("position {index} has {got} components, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    /// Runtime parameters were rejected.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Worker pool for the parallel kernel could not be built.
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

impl GravityError {
    /// Create an invalid parameters error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParameters(details.into())
    }
}
