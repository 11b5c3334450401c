//! Evaluation of a labeled array at named coordinates.

use indexmap::IndexMap;
use ndarray::{indices, Array2, ArrayView1, IxDyn};
use tracing::{debug, trace, warn};

use crate::axis::InterpolationMode;
use crate::error::{NdAxesError, NdAxesResult};
use crate::interpolate::{ExtrapolateMode, InterpNdMethod, InterpolateError, RegularGridInterpolator};
use crate::quantity::Quantity;

use super::LabeledArray;

/// Options for [`LabeledArray::evaluate`].
///
/// Defaults to multilinear interpolation with linear extrapolation in each
/// axis's interpolation space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluateOptions {
    /// Interpolation method (default: Linear)
    pub method: InterpNdMethod,

    /// Handling of coordinates outside an axis range (default: Extrapolate)
    pub extrapolate: ExtrapolateMode,
}

impl EvaluateOptions {
    /// Create options with the specified method.
    pub fn with_method(method: InterpNdMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Set the method.
    pub fn method(mut self, method: InterpNdMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the method by name, `"linear"` or `"nearest"`.
    ///
    /// # Errors
    ///
    /// `UnknownInterpolationMethod` for any other name.
    pub fn method_name(mut self, method: &str) -> NdAxesResult<Self> {
        self.method = method.parse::<InterpNdMethod>()?;
        Ok(self)
    }

    /// Set the extrapolation policy.
    pub fn extrapolate(mut self, extrapolate: ExtrapolateMode) -> Self {
        self.extrapolate = extrapolate;
        self
    }
}

/// Named coordinates to evaluate a [`LabeledArray`] at.
///
/// Axes that are not named are evaluated over all their nodes. Names keep
/// their insertion order; it has no influence on the result, which always
/// follows the axis order of the array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationQuery {
    coords: IndexMap<String, Quantity>,
    options: EvaluateOptions,
}

impl EvaluationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the coordinates for one axis.
    pub fn coord(mut self, name: impl Into<String>, values: impl Into<Quantity>) -> Self {
        self.coords.insert(name.into(), values.into());
        self
    }

    pub fn options(mut self, options: EvaluateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn method(mut self, method: InterpNdMethod) -> Self {
        self.options.method = method;
        self
    }

    pub fn extrapolate(mut self, extrapolate: ExtrapolateMode) -> Self {
        self.options.extrapolate = extrapolate;
        self
    }

    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.coords.get(name)
    }

    pub fn coords(&self) -> &IndexMap<String, Quantity> {
        &self.coords
    }

    pub fn evaluate_options(&self) -> EvaluateOptions {
        self.options
    }
}

impl From<IndexMap<String, Quantity>> for EvaluationQuery {
    fn from(coords: IndexMap<String, Quantity>) -> Self {
        Self {
            coords,
            options: EvaluateOptions::default(),
        }
    }
}

/// Coordinates along one axis, already in interpolation space.
struct AxisQuery {
    space: Vec<f64>,
    /// Scalar queries drop their dimension from the result.
    keep_dim: bool,
}

impl LabeledArray {
    /// Interpolate the array at named coordinates.
    ///
    /// Every axis contributes a list of coordinates: the query values if the
    /// axis is named in `query`, or all of its nodes otherwise. The array is
    /// evaluated on the Cartesian product of these lists, interpolating along
    /// each axis in its own interpolation space (so a logarithmic axis is
    /// interpolated linearly in `log10` of its coordinate).
    ///
    /// The result has one dimension per axis in axis order, sized by the
    /// length of its coordinate list, except that axes queried with a scalar
    /// are dropped. It carries the unit of the array data.
    ///
    /// # Errors
    ///
    /// - `AxisNameNotFound` if the query names an unknown axis
    /// - `UnitMismatch` if a query unit differs from the axis unit
    /// - `InvalidQuery` for query values with more than one dimension, or
    ///   values that are NaN or infinite
    /// - `InvalidLogDomain` for non-positive values along a logarithmic axis
    /// - `OutOfBounds` for values outside a strict axis, or outside any axis
    ///   when extrapolation is [`ExtrapolateMode::Error`]
    pub fn evaluate(&self, query: &EvaluationQuery) -> NdAxesResult<Quantity> {
        let options = query.options;
        let mut named: Vec<Option<&Quantity>> = vec![None; self.ndim()];
        for (name, values) in &query.coords {
            let idx = self.axis_index(name)?;
            self.check_query(idx, values)?;
            named[idx] = Some(values);
        }

        let per_axis = named
            .iter()
            .enumerate()
            .map(|(idx, values)| self.axis_query(idx, *values, options.extrapolate))
            .collect::<NdAxesResult<Vec<_>>>()?;

        let grid_shape: Vec<usize> = per_axis.iter().map(|q| q.space.len()).collect();
        let n_points: usize = grid_shape.iter().product();
        debug!(
            axes = self.ndim(),
            points = n_points,
            method = %options.method,
            extrapolate = ?options.extrapolate,
            "evaluating labeled array"
        );

        let mut xi = Array2::<f64>::zeros((n_points, self.ndim()));
        for (row, index) in indices(IxDyn(&grid_shape)).into_iter().enumerate() {
            for (d, q) in per_axis.iter().enumerate() {
                xi[[row, d]] = q.space[index[d]];
            }
        }

        let points: Vec<ArrayView1<'_, f64>> = self
            .axes
            .iter()
            .map(|axis| axis.nodes_in_interpolation_space().view())
            .collect();
        let interp = RegularGridInterpolator::with_extrapolate(
            points,
            self.data.view(),
            options.method,
            options.extrapolate,
        )?;
        let values = interp
            .evaluate(xi.view())
            .map_err(|err| self.out_of_bounds(err))?;

        let out_shape: Vec<usize> = per_axis
            .iter()
            .filter(|q| q.keep_dim)
            .map(|q| q.space.len())
            .collect();
        let result = values
            .into_shape_with_order(IxDyn(&out_shape))
            .map_err(|_| NdAxesError::ShapeMismatch {
                expected: out_shape.clone(),
                actual: vec![n_points],
            })?;

        let quantity = Quantity::new(result);
        Ok(match &self.unit {
            Some(unit) => quantity.with_unit(unit.clone()),
            None => quantity,
        })
    }

    /// Interpolate at a single point given one scalar per axis.
    ///
    /// # Errors
    ///
    /// As [`evaluate`](Self::evaluate), plus `InvalidQuery` if an axis is
    /// left out.
    pub fn evaluate_at(&self, coords: &[(&str, f64)], options: EvaluateOptions) -> NdAxesResult<f64> {
        if let Some(missing) = self
            .axes
            .iter()
            .find(|axis| !coords.iter().any(|(name, _)| *name == axis.name()))
        {
            return Err(NdAxesError::InvalidQuery {
                name: missing.name().to_string(),
                message: "every axis needs a coordinate for a point evaluation".to_string(),
            });
        }

        let query = coords
            .iter()
            .fold(EvaluationQuery::new().options(options), |query, &(name, value)| {
                query.coord(name, value)
            });
        let result = self.evaluate(&query)?;

        result.as_scalar().ok_or_else(|| NdAxesError::InvalidQuery {
            name: self.axes[0].name().to_string(),
            message: "point evaluation did not produce a single value".to_string(),
        })
    }

    fn check_query(&self, idx: usize, values: &Quantity) -> NdAxesResult<()> {
        let axis = &self.axes[idx];

        if let (Some(expected), Some(actual)) = (axis.unit(), values.unit()) {
            if expected != actual {
                return Err(NdAxesError::UnitMismatch {
                    name: axis.name().to_string(),
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        if values.values().ndim() > 1 {
            return Err(NdAxesError::InvalidQuery {
                name: axis.name().to_string(),
                message: format!(
                    "expected a scalar or 1D values, got shape {:?}",
                    values.values().shape()
                ),
            });
        }
        Ok(())
    }

    fn axis_query(
        &self,
        idx: usize,
        values: Option<&Quantity>,
        extrapolate: ExtrapolateMode,
    ) -> NdAxesResult<AxisQuery> {
        let axis = &self.axes[idx];

        let Some(values) = values else {
            return Ok(AxisQuery {
                space: axis.nodes_in_interpolation_space().to_vec(),
                keep_dim: true,
            });
        };

        let mut space = Vec::with_capacity(values.len());
        let mut outside = 0usize;
        for &value in values.values().iter() {
            let x = axis.to_interpolation_space(value)?;
            axis.check_finite(value)?;
            axis.check_bounds(value)?;
            if !axis.contains(value) {
                outside += 1;
            }
            space.push(x);
        }

        if outside > 0 && extrapolate != ExtrapolateMode::Error {
            let (min, max) = axis.range();
            warn!(
                axis = axis.name(),
                outside,
                min,
                max,
                policy = ?extrapolate,
                "query values outside axis range"
            );
        }
        trace!(axis = axis.name(), values = ?space, "axis query in interpolation space");

        Ok(AxisQuery {
            space,
            keep_dim: !values.is_scalar(),
        })
    }

    /// Name the axis and restore the raw coordinate of an out-of-domain
    /// error from the grid interpolator.
    fn out_of_bounds(&self, err: InterpolateError) -> NdAxesError {
        match err {
            InterpolateError::OutOfDomainNd {
                dimension, point, ..
            } => {
                let axis = &self.axes[dimension];
                let (min, max) = axis.range();
                let value = match axis.mode() {
                    InterpolationMode::Linear => point,
                    InterpolationMode::Log => 10f64.powf(point),
                };
                NdAxesError::OutOfBounds {
                    name: axis.name().to_string(),
                    value,
                    min,
                    max,
                }
            }
            other => other.into(),
        }
    }
}
