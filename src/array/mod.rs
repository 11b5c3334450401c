//! Labeled N-dimensional arrays.
//!
//! A [`LabeledArray`] pairs a dense `f64` array with one [`Axis`] per
//! dimension, in dimension order. Axes are looked up by name, and the array
//! can be evaluated at named coordinates (see [`LabeledArray::evaluate`]).
//!
//! # Example
//!
//! ```
//! use ndarray::Array1;
//! use ndaxes::{Axis, EvaluationQuery, LabeledArray, Quantity};
//!
//! let energy = Axis::log_spaced("energy", 10.0, 100.0, 10).unwrap().with_unit("TeV");
//! let data = Array1::from_iter((0..10).map(|i| 20.0 - 2.0 * i as f64));
//! let array = LabeledArray::new([energy], data).unwrap();
//!
//! let query = EvaluationQuery::new().coord("energy", Quantity::scalar(10.0).with_unit("TeV"));
//! let result = array.evaluate(&query).unwrap();
//! assert!((result.as_scalar().unwrap() - 20.0).abs() < 1e-10);
//! ```

mod evaluate;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use ndarray::{Array, ArrayD, Dimension, IxDyn};
use tracing::debug;

use crate::axis::Axis;
use crate::error::{NdAxesError, NdAxesResult};
use crate::quantity::Unit;

pub use evaluate::{EvaluateOptions, EvaluationQuery};

/// Dense data array with named, ordered axes.
///
/// Axes are held behind [`Arc`] so one axis can describe dimensions of
/// several arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    axes: Vec<Arc<Axis>>,
    data: ArrayD<f64>,
    unit: Option<Unit>,
}

impl LabeledArray {
    /// Create a labeled array from its axes and a conforming data array.
    ///
    /// # Errors
    ///
    /// - `NoAxes` if `axes` is empty
    /// - `DuplicateAxisName` if two axes share a name
    /// - `ShapeMismatch` if `data.shape()` differs from the axis lengths
    pub fn new<A, D>(axes: impl IntoIterator<Item = A>, data: Array<f64, D>) -> NdAxesResult<Self>
    where
        A: Into<Arc<Axis>>,
        D: Dimension,
    {
        let axes: Vec<Arc<Axis>> = axes.into_iter().map(Into::into).collect();
        check_axes(&axes)?;

        let expected: Vec<usize> = axes.iter().map(|axis| axis.len()).collect();
        if data.shape() != expected.as_slice() {
            return Err(NdAxesError::ShapeMismatch {
                expected,
                actual: data.shape().to_vec(),
            });
        }

        debug!(
            axes = ?axes.iter().map(|a| a.name()).collect::<Vec<_>>(),
            shape = ?expected,
            "created labeled array"
        );

        Ok(Self {
            axes,
            data: data.into_dyn(),
            unit: None,
        })
    }

    /// Array of a constant value over the given axes.
    pub fn filled<A>(axes: impl IntoIterator<Item = A>, value: f64) -> NdAxesResult<Self>
    where
        A: Into<Arc<Axis>>,
    {
        let axes: Vec<Arc<Axis>> = axes.into_iter().map(Into::into).collect();
        let shape: Vec<usize> = axes.iter().map(|axis| axis.len()).collect();
        Self::new(axes, ArrayD::from_elem(IxDyn(&shape), value))
    }

    /// Attach the unit of the data values.
    pub fn with_unit(mut self, unit: impl Into<Unit>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn axes(&self) -> &[Arc<Axis>] {
        &self.axes
    }

    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|axis| axis.name()).collect()
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// The axis called `name`.
    pub fn axis(&self, name: &str) -> NdAxesResult<&Axis> {
        self.axis_index(name).map(|idx| self.axes[idx].as_ref())
    }

    /// Dimension index of the axis called `name`.
    pub fn axis_index(&self, name: &str) -> NdAxesResult<usize> {
        self.axes
            .iter()
            .position(|axis| axis.name() == name)
            .ok_or_else(|| NdAxesError::not_found(name))
    }

    /// Largest data value and the node coordinates it sits at, keyed by
    /// axis name. NaN entries are ignored; `None` if every entry is NaN.
    pub fn lookup_max(&self) -> Option<(f64, IndexMap<String, f64>)> {
        let (index, value) = self
            .data
            .indexed_iter()
            .filter(|(_, v)| !v.is_nan())
            .fold(None, |best: Option<(IxDyn, f64)>, (idx, &v)| match best {
                Some((_, best_v)) if best_v >= v => best,
                _ => Some((idx, v)),
            })?;

        let coordinates = self
            .axes
            .iter()
            .enumerate()
            .map(|(d, axis)| (axis.name().to_string(), axis.nodes()[index[d]]))
            .collect();

        Some((value, coordinates))
    }

    /// Mask over the same axes: `1.0` where `data >= threshold`, else `0.0`.
    /// The mask carries no unit.
    pub fn threshold(&self, threshold: f64) -> Self {
        Self {
            axes: self.axes.clone(),
            data: self
                .data
                .mapv(|v| if v >= threshold { 1.0 } else { 0.0 }),
            unit: None,
        }
    }
}

impl fmt::Display for LabeledArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LabeledArray")?;
        writeln!(f, "  shape: {:?}", self.shape())?;
        match &self.unit {
            Some(unit) => writeln!(f, "  unit: {}", unit)?,
            None => writeln!(f, "  unit: none")?,
        }
        write!(f, "  axes:")?;
        for axis in &self.axes {
            write!(f, "\n    {}", axis)?;
        }
        Ok(())
    }
}

fn check_axes(axes: &[Arc<Axis>]) -> NdAxesResult<()> {
    if axes.is_empty() {
        return Err(NdAxesError::NoAxes);
    }
    let mut seen = HashSet::with_capacity(axes.len());
    for axis in axes {
        if !seen.insert(axis.name()) {
            return Err(NdAxesError::DuplicateAxisName(axis.name().to_string()));
        }
    }
    Ok(())
}
