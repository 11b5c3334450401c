//! Error types for labeled arrays and axes.

use thiserror::Error;

use crate::interpolate::InterpolateError;

/// Result type for axis and labeled array operations.
pub type NdAxesResult<T> = Result<T, NdAxesError>;

/// Errors raised by [`Axis`](crate::Axis) and [`LabeledArray`](crate::LabeledArray).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NdAxesError {
    /// No axis with this name exists on the array.
    #[error("Axis '{name}' not found")]
    AxisNameNotFound { name: String },

    /// Data shape is inconsistent with the axis lengths.
    #[error("Shape mismatch: axes describe {expected:?}, data has {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Axis values are not strictly increasing, or bins overlap.
    #[error("Axis '{name}' is not monotonic: {context}")]
    NonMonotonicAxis { name: String, context: String },

    /// A log-mode axis received a non-positive coordinate.
    #[error("Axis '{name}' is logarithmic and cannot take value {value}")]
    InvalidLogDomain { name: String, value: f64 },

    #[error("Unknown interpolation method '{0}' (expected 'linear' or 'nearest')")]
    UnknownInterpolationMethod(String),

    #[error("Unknown interpolation mode '{0}' (expected 'lin' or 'log')")]
    UnknownInterpolationMode(String),

    /// Query coordinate outside the axis range under a rejecting policy.
    #[error("Value {value} is outside the range [{min}, {max}] of axis '{name}'")]
    OutOfBounds {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Duplicate axis name '{0}'")]
    DuplicateAxisName(String),

    #[error("Axis name must not be empty")]
    EmptyAxisName,

    #[error("Axis '{name}' has no values")]
    EmptyAxis { name: String },

    #[error("A labeled array needs at least one axis")]
    NoAxes,

    /// Bin edges were requested from a point axis.
    #[error("Axis '{name}' is a point axis and has no bins")]
    NotBinned { name: String },

    /// Query unit differs from the axis unit. Conversion is up to the caller.
    #[error("Axis '{name}' expects unit '{expected}', query is in '{actual}'")]
    UnitMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid query for axis '{name}': {message}")]
    InvalidQuery { name: String, message: String },

    #[error(transparent)]
    Interpolate(InterpolateError),
}

impl From<InterpolateError> for NdAxesError {
    fn from(err: InterpolateError) -> Self {
        match err {
            InterpolateError::UnknownMethod(method) => Self::UnknownInterpolationMethod(method),
            other => Self::Interpolate(other),
        }
    }
}

impl NdAxesError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::AxisNameNotFound {
            name: name.to_string(),
        }
    }

    pub(crate) fn non_monotonic(name: &str, context: impl Into<String>) -> Self {
        Self::NonMonotonicAxis {
            name: name.to_string(),
            context: context.into(),
        }
    }
}
