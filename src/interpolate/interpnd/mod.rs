//! Interpolation over rectilinear N-dimensional grids.
//!
//! A grid is described by one strictly increasing coordinate array per
//! dimension and a value array whose shape lists the coordinate lengths in
//! the same order. Both are borrowed for the lifetime of the interpolator.
//!
//! # Example
//!
//! ```
//! use ndarray::{array, Array2};
//! use ndaxes::interpolate::{InterpNdMethod, RegularGridInterpolator};
//!
//! let rows = array![0.0, 10.0];
//! let cols = array![0.0, 1.0, 4.0];
//! let table = array![[0.0, 1.0, 4.0], [10.0, 11.0, 14.0]].into_dyn();
//!
//! let interp = RegularGridInterpolator::new(
//!     vec![rows.view(), cols.view()],
//!     table.view(),
//!     InterpNdMethod::Linear,
//! )
//! .unwrap();
//!
//! let xi = Array2::from_shape_vec((1, 2), vec![5.0, 2.5]).unwrap();
//! assert!((interp.evaluate(xi.view()).unwrap()[0] - 7.5).abs() < 1e-10);
//! ```

mod evaluate;

pub(crate) use evaluate::find_interval;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use ndarray::{ArrayView1, ArrayViewD};

use crate::interpolate::error::{InterpolateError, InterpolateResult};

/// Interpolation method for N-dimensional grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpNdMethod {
    /// Value of the closest grid node along every dimension.
    Nearest,
    /// Weighted sum over the corners of the enclosing cell.
    #[default]
    Linear,
}

impl InterpNdMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
        }
    }
}

impl fmt::Display for InterpNdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpNdMethod {
    type Err = InterpolateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "nearest" => Ok(Self::Nearest),
            _ => Err(InterpolateError::UnknownMethod(s.to_string())),
        }
    }
}

/// Policy for query coordinates outside a dimension's range.
///
/// A NaN coordinate is never inside the range: it fails under `Error` and
/// evaluates to NaN under every other policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtrapolateMode {
    /// Fail with `OutOfDomainNd`.
    Error,
    /// Evaluate to NaN.
    Nan,
    /// Move the coordinate onto the nearest end of the range.
    Clamp,
    /// Continue the edge cell linearly. Nearest picks the edge node.
    #[default]
    Extrapolate,
}

/// Interpolator over a rectilinear grid of borrowed coordinates and values.
///
/// Dimensions holding a single coordinate are constant along that
/// dimension.
#[derive(Debug, Clone)]
pub struct RegularGridInterpolator<'a> {
    pub(crate) points: Vec<ArrayView1<'a, f64>>,
    pub(crate) values: ArrayViewD<'a, f64>,
    pub(crate) method: InterpNdMethod,
    pub(crate) extrapolate: ExtrapolateMode,
}

impl<'a> RegularGridInterpolator<'a> {
    /// Interpolator that fails on out-of-range queries.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `points` is empty
    /// - `DimensionMismatch` if `values` has a different number of dimensions
    /// - `InsufficientData` for a dimension without coordinates
    /// - `ShapeMismatch` if a coordinate length differs from the value shape
    /// - `NotMonotonic` unless coordinates strictly increase (NaN included)
    pub fn new(
        points: Vec<ArrayView1<'a, f64>>,
        values: ArrayViewD<'a, f64>,
        method: InterpNdMethod,
    ) -> InterpolateResult<Self> {
        Self::with_extrapolate(points, values, method, ExtrapolateMode::Error)
    }

    /// Interpolator with an explicit out-of-range policy.
    pub fn with_extrapolate(
        points: Vec<ArrayView1<'a, f64>>,
        values: ArrayViewD<'a, f64>,
        method: InterpNdMethod,
        extrapolate: ExtrapolateMode,
    ) -> InterpolateResult<Self> {
        if points.is_empty() {
            return Err(InterpolateError::InvalidParameter {
                parameter: "points".to_string(),
                message: "grid needs at least one dimension".to_string(),
            });
        }
        if values.ndim() != points.len() {
            return Err(InterpolateError::DimensionMismatch {
                expected: points.len(),
                actual: values.ndim(),
                context: "grid values".to_string(),
            });
        }
        for (dim, (coords, &len)) in points.iter().zip(values.shape()).enumerate() {
            check_dimension(dim, coords, len)?;
        }

        Ok(Self {
            points,
            values,
            method,
            extrapolate,
        })
    }

    pub fn ndim(&self) -> usize {
        self.points.len()
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// `(first, last)` coordinate of every dimension.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|coords| (coords[0], coords[coords.len() - 1]))
            .collect()
    }

    pub fn method(&self) -> InterpNdMethod {
        self.method
    }

    pub fn extrapolate_mode(&self) -> ExtrapolateMode {
        self.extrapolate
    }
}

fn check_dimension(dim: usize, coords: &ArrayView1<'_, f64>, len: usize) -> InterpolateResult<()> {
    let context = || format!("grid dimension {}", dim);

    if coords.is_empty() {
        return Err(InterpolateError::InsufficientData {
            required: 1,
            actual: 0,
            context: context(),
        });
    }
    if coords.len() != len {
        return Err(InterpolateError::ShapeMismatch {
            expected: coords.len(),
            actual: len,
            context: context(),
        });
    }
    let increasing = coords
        .iter()
        .zip(coords.iter().skip(1))
        .all(|(lo, hi)| hi.partial_cmp(lo) == Some(Ordering::Greater));
    if !increasing {
        return Err(InterpolateError::NotMonotonic { context: context() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2, ArrayD, IxDyn};

    /// Two-row lookup table over `temperature x pressure`.
    fn table() -> (Array1<f64>, Array1<f64>, ArrayD<f64>) {
        let temperature = array![250.0, 300.0];
        let pressure = array![1.0, 2.0, 5.0];
        let values = array![[1.0, 2.0, 5.0], [3.0, 4.0, 7.0]].into_dyn();
        (temperature, pressure, values)
    }

    #[test]
    fn test_borrows_grid() {
        let (t, p, values) = table();

        let interp = RegularGridInterpolator::new(
            vec![t.view(), p.view()],
            values.view(),
            InterpNdMethod::Nearest,
        )
        .unwrap();

        assert_eq!(interp.ndim(), 2);
        assert_eq!(interp.shape(), &[2, 3]);
        assert_eq!(interp.bounds(), vec![(250.0, 300.0), (1.0, 5.0)]);
        assert_eq!(interp.method(), InterpNdMethod::Nearest);
        assert_eq!(interp.extrapolate_mode(), ExtrapolateMode::Error);

        // A second interpolator over the same storage
        let other = RegularGridInterpolator::with_extrapolate(
            vec![t.view(), p.view()],
            values.view(),
            InterpNdMethod::Linear,
            ExtrapolateMode::Clamp,
        )
        .unwrap();
        assert_eq!(other.extrapolate_mode(), ExtrapolateMode::Clamp);
    }

    #[test]
    fn test_rejects_malformed_grids() {
        let (t, p, values) = table();

        let missing_dim = RegularGridInterpolator::new(vec![t.view()], values.view(), InterpNdMethod::Linear);
        assert!(matches!(
            missing_dim,
            Err(InterpolateError::DimensionMismatch { expected: 1, actual: 2, .. })
        ));

        let swapped = RegularGridInterpolator::new(
            vec![p.view(), t.view()],
            values.view(),
            InterpNdMethod::Linear,
        );
        assert!(matches!(
            swapped,
            Err(InterpolateError::ShapeMismatch { expected: 3, actual: 2, .. })
        ));

        let scalar = ArrayD::from_elem(IxDyn(&[]), 1.0);
        let no_dims = RegularGridInterpolator::new(vec![], scalar.view(), InterpNdMethod::Linear);
        assert!(matches!(no_dims, Err(InterpolateError::InvalidParameter { .. })));

        let empty = Array1::<f64>::zeros(0);
        let flat = ArrayD::<f64>::zeros(IxDyn(&[0]));
        let no_coords = RegularGridInterpolator::new(vec![empty.view()], flat.view(), InterpNdMethod::Linear);
        assert!(matches!(
            no_coords,
            Err(InterpolateError::InsufficientData { required: 1, actual: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_unordered_coordinates() {
        let values = array![1.0, 2.0, 3.0].into_dyn();

        for coords in [array![0.0, 2.0, 1.0], array![0.0, 1.0, 1.0], array![0.0, f64::NAN, 1.0]] {
            let result = RegularGridInterpolator::new(vec![coords.view()], values.view(), InterpNdMethod::Linear);
            assert!(matches!(result, Err(InterpolateError::NotMonotonic { .. })));
        }
    }

    #[test]
    fn test_single_coordinate_dimension() {
        let only = array![7.0];
        let values = array![42.0].into_dyn();

        let interp = RegularGridInterpolator::with_extrapolate(
            vec![only.view()],
            values.view(),
            InterpNdMethod::Linear,
            ExtrapolateMode::Extrapolate,
        )
        .unwrap();

        let xi = Array2::from_shape_vec((3, 1), vec![7.0, -100.0, 100.0]).unwrap();
        let result = interp.evaluate(xi.view()).unwrap();
        assert!(result.iter().all(|&v| v == 42.0));
        assert_eq!(interp.bounds(), vec![(7.0, 7.0)]);
    }

    #[test]
    fn test_out_of_range_policies() {
        let (t, p, values) = table();
        // Below the temperature range, inside the pressure range
        let xi = Array2::from_shape_vec((1, 2), vec![200.0, 2.0]).unwrap();

        let run = |mode| {
            RegularGridInterpolator::with_extrapolate(
                vec![t.view(), p.view()],
                values.view(),
                InterpNdMethod::Linear,
                mode,
            )
            .unwrap()
            .evaluate(xi.view())
        };

        assert!(matches!(
            run(ExtrapolateMode::Error),
            Err(InterpolateError::OutOfDomainNd { dimension: 0, point, .. }) if point == 200.0
        ));
        assert!(run(ExtrapolateMode::Nan).unwrap()[0].is_nan());
        assert!((run(ExtrapolateMode::Clamp).unwrap()[0] - 2.0).abs() < 1e-10);
        // Slope along temperature is 2 per 50 K
        assert!((run(ExtrapolateMode::Extrapolate).unwrap()[0] - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_method_names() {
        assert_eq!("linear".parse::<InterpNdMethod>().unwrap(), InterpNdMethod::Linear);
        assert_eq!(" Nearest ".parse::<InterpNdMethod>().unwrap(), InterpNdMethod::Nearest);
        assert_eq!(InterpNdMethod::Nearest.to_string(), "nearest");
        assert!(matches!(
            "cubic".parse::<InterpNdMethod>(),
            Err(InterpolateError::UnknownMethod(m)) if m == "cubic"
        ));
    }
}
