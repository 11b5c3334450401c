//! Interpolation spaces and coordinate lookup along an axis.

use std::fmt;
use std::str::FromStr;

use ndarray::Array1;

use crate::error::{NdAxesError, NdAxesResult};
use crate::interpolate::find_interval;

use super::Axis;

/// How distances along an axis are measured for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    /// Raw coordinates.
    #[default]
    Linear,
    /// Base-10 logarithm of the coordinates. Values must be positive.
    Log,
}

impl InterpolationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "lin",
            Self::Log => "log",
        }
    }

    /// Map a raw coordinate into this space without a domain check.
    pub(crate) fn transform(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log => value.log10(),
        }
    }

    /// Bin centers: arithmetic midpoint or geometric mean.
    pub(crate) fn centers(self, lo: &Array1<f64>, hi: &Array1<f64>) -> Array1<f64> {
        match self {
            Self::Linear => (lo + hi) / 2.0,
            Self::Log => (lo * hi).mapv(f64::sqrt),
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMode {
    type Err = NdAxesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lin" | "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            _ => Err(NdAxesError::UnknownInterpolationMode(s.to_string())),
        }
    }
}

impl Axis {
    /// Map `value` into the space distances are measured in along this axis:
    /// identity for a linear axis, `log10` for a logarithmic one.
    ///
    /// # Errors
    ///
    /// `InvalidLogDomain` if the axis is logarithmic and `value` is not
    /// positive.
    pub fn to_interpolation_space(&self, value: f64) -> NdAxesResult<f64> {
        if self.mode == InterpolationMode::Log && (value.is_nan() || value <= 0.0) {
            return Err(NdAxesError::InvalidLogDomain {
                name: self.name.clone(),
                value,
            });
        }
        Ok(self.mode.transform(value))
    }

    /// Whether `value` lies within the node range, ends included.
    pub fn contains(&self, value: f64) -> bool {
        let (min, max) = self.range();
        value >= min && value <= max
    }

    /// Fractional index of `value` among the nodes, measured in
    /// interpolation space.
    ///
    /// Values outside the node range continue the first or last segment, so
    /// the index drops below zero or exceeds `len() - 1`.
    ///
    /// # Errors
    ///
    /// - `InvalidLogDomain` for a non-positive value on a logarithmic axis
    /// - `InvalidQuery` for NaN or infinite values
    /// - `OutOfBounds` for an out-of-range value on a strict axis
    pub fn lookup_index(&self, value: f64) -> NdAxesResult<f64> {
        let x = self.to_interpolation_space(value)?;
        self.check_finite(value)?;
        self.check_bounds(value)?;

        if self.space_nodes.len() == 1 {
            return Ok(0.0);
        }
        let (idx, frac) = find_interval(self.space_nodes.view(), x);
        Ok(idx as f64 + frac)
    }

    /// Coordinates must be finite numbers.
    pub(crate) fn check_finite(&self, value: f64) -> NdAxesResult<()> {
        if value.is_finite() {
            return Ok(());
        }
        Err(NdAxesError::InvalidQuery {
            name: self.name.clone(),
            message: format!("coordinate {} is not a finite number", value),
        })
    }

    /// Fail with `OutOfBounds` if this axis is strict and `value` is outside
    /// its range.
    pub(crate) fn check_bounds(&self, value: f64) -> NdAxesResult<()> {
        if self.strict && !self.contains(value) {
            let (min, max) = self.range();
            return Err(NdAxesError::OutOfBounds {
                name: self.name.clone(),
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}
