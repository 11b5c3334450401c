//! Error types for grid interpolation.

use thiserror::Error;

/// Result type for interpolation operations.
pub type InterpolateResult<T> = Result<T, InterpolateError>;

/// Errors that can occur while building or evaluating a grid interpolator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolateError {
    /// Input arrays have mismatched lengths.
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Number of dimensions does not agree between inputs.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Input array is too small for the requested operation.
    #[error("Insufficient data for {context}: need at least {required}, got {actual}")]
    InsufficientData {
        required: usize,
        actual: usize,
        context: String,
    },

    /// Query point is outside the grid along one dimension.
    #[error(
        "Point {point} is outside interpolation domain [{min}, {max}] along dimension {dimension} in {context}"
    )]
    OutOfDomainNd {
        dimension: usize,
        point: f64,
        min: f64,
        max: f64,
        context: String,
    },

    /// Grid coordinates are not strictly increasing.
    #[error("Grid coordinates must be strictly increasing in {context}")]
    NotMonotonic { context: String },

    /// Interpolation method name not recognized.
    #[error("Unknown interpolation method '{0}' (expected 'linear' or 'nearest')")]
    UnknownMethod(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },
}
