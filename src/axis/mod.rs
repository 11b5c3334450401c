//! Named coordinate axes.
//!
//! An [`Axis`] describes one dimension of a [`LabeledArray`](crate::LabeledArray):
//! either a set of sample nodes (point axis) or a sequence of bins whose
//! centers act as nodes (binned axis). Every axis declares an
//! [`InterpolationMode`] which decides how distances along it are measured
//! when the array is interpolated.
//!
//! Bin centers follow the axis mode: the arithmetic midpoint of the edges for
//! a linear axis, the geometric mean `sqrt(lo * hi)` for a logarithmic one.
//!
//! # Example
//!
//! ```
//! use ndaxes::{Axis, InterpolationMode};
//!
//! let energy = Axis::log_binned("energy", 1.0, 100.0, 2).unwrap().with_unit("TeV");
//! assert_eq!(energy.bins().unwrap().to_vec(), vec![1.0, 10.0, 100.0]);
//!
//! let centers = energy.nodes();
//! assert!((centers[0] - 10f64.sqrt()).abs() < 1e-12);
//! assert_eq!(energy.mode(), InterpolationMode::Log);
//! ```

mod space;

use std::cmp::Ordering;
use std::fmt;

use ndarray::{s, Array1};
use tracing::debug;

use crate::error::{NdAxesError, NdAxesResult};
use crate::quantity::Unit;

pub use space::InterpolationMode;

#[derive(Debug, Clone, PartialEq)]
enum AxisKind {
    Points,
    /// Per-bin lower and upper bounds, non-overlapping and increasing.
    Bins { lo: Array1<f64>, hi: Array1<f64> },
}

/// One labeled coordinate dimension.
///
/// Axes are validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    name: String,
    kind: AxisKind,
    mode: InterpolationMode,
    unit: Option<Unit>,
    strict: bool,
    /// Raw nodes, or derived centers for a binned axis.
    nodes: Array1<f64>,
    /// `nodes` mapped into interpolation space.
    space_nodes: Array1<f64>,
}

impl Axis {
    /// Create a point axis from strictly increasing sample locations.
    ///
    /// # Errors
    ///
    /// - `EmptyAxisName` / `EmptyAxis` for an empty name or no values
    /// - `InvalidLogDomain` if `mode` is `Log` and a value is not positive
    /// - `NonMonotonicAxis` if values are not strictly increasing
    pub fn points(
        name: impl Into<String>,
        values: impl Into<Array1<f64>>,
        mode: InterpolationMode,
    ) -> NdAxesResult<Self> {
        let name = check_name(name.into())?;
        let values = values.into();
        if values.is_empty() {
            return Err(NdAxesError::EmptyAxis { name });
        }
        check_log_domain(&name, mode, &values)?;
        if !strictly_increasing(&values) {
            return Err(NdAxesError::non_monotonic(
                &name,
                "node values must be strictly increasing",
            ));
        }

        debug!(axis = %name, nodes = values.len(), %mode, "created point axis");
        Self::build(name, AxisKind::Points, mode, values)
    }

    /// Create a binned axis from `n + 1` contiguous, strictly increasing edges.
    pub fn from_edges(
        name: impl Into<String>,
        edges: impl Into<Array1<f64>>,
        mode: InterpolationMode,
    ) -> NdAxesResult<Self> {
        let name = check_name(name.into())?;
        let edges = edges.into();
        if edges.len() < 2 {
            return Err(NdAxesError::EmptyAxis { name });
        }
        check_log_domain(&name, mode, &edges)?;
        if !strictly_increasing(&edges) {
            return Err(NdAxesError::non_monotonic(
                &name,
                "bin edges must be strictly increasing",
            ));
        }

        let n = edges.len() - 1;
        let lo = edges.slice(s![..n]).to_owned();
        let hi = edges.slice(s![1..]).to_owned();

        debug!(axis = %name, bins = n, %mode, "created binned axis from edges");
        let centers = mode.centers(&lo, &hi);
        Self::build(name, AxisKind::Bins { lo, hi }, mode, centers)
    }

    /// Create a binned axis from paired lower and upper bounds.
    ///
    /// Bins must not overlap and must be ordered, but gaps between them are
    /// allowed.
    pub fn from_bounds(
        name: impl Into<String>,
        lo: impl Into<Array1<f64>>,
        hi: impl Into<Array1<f64>>,
        mode: InterpolationMode,
    ) -> NdAxesResult<Self> {
        let name = check_name(name.into())?;
        let (lo, hi) = (lo.into(), hi.into());
        if lo.len() != hi.len() {
            return Err(NdAxesError::ShapeMismatch {
                expected: vec![lo.len()],
                actual: vec![hi.len()],
            });
        }
        if lo.is_empty() {
            return Err(NdAxesError::EmptyAxis { name });
        }
        check_log_domain(&name, mode, &lo)?;
        check_log_domain(&name, mode, &hi)?;

        let inverted = lo
            .iter()
            .zip(hi.iter())
            .any(|(l, h)| h.partial_cmp(l) != Some(Ordering::Greater));
        if inverted {
            return Err(NdAxesError::non_monotonic(
                &name,
                "each bin needs a lower bound below its upper bound",
            ));
        }
        let overlapping = hi
            .iter()
            .zip(lo.iter().skip(1))
            .any(|(h, next_lo)| h > next_lo);
        if overlapping {
            return Err(NdAxesError::non_monotonic(
                &name,
                "bins overlap or are out of order",
            ));
        }

        debug!(axis = %name, bins = lo.len(), %mode, "created binned axis from bounds");
        let centers = mode.centers(&lo, &hi);
        Self::build(name, AxisKind::Bins { lo, hi }, mode, centers)
    }

    /// Point axis of `n` logarithmically spaced nodes from `start` to `stop`.
    pub fn log_spaced(name: impl Into<String>, start: f64, stop: f64, n: usize) -> NdAxesResult<Self> {
        let name = name.into();
        let values = log_space(&name, start, stop, n)?;
        Self::points(name, values, InterpolationMode::Log)
    }

    /// Point axis of `n` evenly spaced nodes from `start` to `stop`.
    pub fn lin_spaced(name: impl Into<String>, start: f64, stop: f64, n: usize) -> NdAxesResult<Self> {
        Self::points(name, Array1::linspace(start, stop, n), InterpolationMode::Linear)
    }

    /// Binned axis of `n_bins` logarithmically spaced bins from `start` to `stop`.
    pub fn log_binned(
        name: impl Into<String>,
        start: f64,
        stop: f64,
        n_bins: usize,
    ) -> NdAxesResult<Self> {
        let name = name.into();
        let edges = log_space(&name, start, stop, n_bins + 1)?;
        Self::from_edges(name, edges, InterpolationMode::Log)
    }

    /// Binned axis of `n_bins` equal-width bins from `start` to `stop`.
    pub fn lin_binned(
        name: impl Into<String>,
        start: f64,
        stop: f64,
        n_bins: usize,
    ) -> NdAxesResult<Self> {
        Self::from_edges(
            name,
            Array1::linspace(start, stop, n_bins + 1),
            InterpolationMode::Linear,
        )
    }

    fn build(
        name: String,
        kind: AxisKind,
        mode: InterpolationMode,
        nodes: Array1<f64>,
    ) -> NdAxesResult<Self> {
        // Nodes were checked against the log domain above; centers of
        // positive edges stay positive.
        let space_nodes = nodes.mapv(|v| mode.transform(v));
        Ok(Self {
            name,
            kind,
            mode,
            unit: None,
            strict: false,
            nodes,
            space_nodes,
        })
    }

    /// Attach the unit coordinates along this axis are expressed in.
    pub fn with_unit(mut self, unit: impl Into<Unit>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Reject lookups outside the node range instead of extrapolating.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    pub fn is_binned(&self) -> bool {
        matches!(self.kind, AxisKind::Bins { .. })
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Number of nodes (point axis) or bins (binned axis).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, axes are never constructed empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Representative coordinates: the nodes of a point axis, or the bin
    /// centers of a binned axis.
    pub fn nodes(&self) -> &Array1<f64> {
        &self.nodes
    }

    /// The nodes mapped into interpolation space.
    pub fn nodes_in_interpolation_space(&self) -> &Array1<f64> {
        &self.space_nodes
    }

    /// Bin edges, `len() + 1` values.
    ///
    /// For bins built from bounds with gaps these are the lower bounds
    /// followed by the last upper bound; use [`bounds`](Self::bounds) for the
    /// exact intervals.
    pub fn bins(&self) -> NdAxesResult<Array1<f64>> {
        match &self.kind {
            AxisKind::Points => Err(NdAxesError::NotBinned {
                name: self.name.clone(),
            }),
            AxisKind::Bins { lo, hi } => {
                let mut edges = lo.to_vec();
                edges.push(hi[hi.len() - 1]);
                Ok(Array1::from(edges))
            }
        }
    }

    /// `(lo, hi)` for every bin.
    pub fn bounds(&self) -> NdAxesResult<Vec<(f64, f64)>> {
        match &self.kind {
            AxisKind::Points => Err(NdAxesError::NotBinned {
                name: self.name.clone(),
            }),
            AxisKind::Bins { lo, hi } => Ok(lo.iter().copied().zip(hi.iter().copied()).collect()),
        }
    }

    /// Smallest and largest node.
    pub fn range(&self) -> (f64, f64) {
        (self.nodes[0], self.nodes[self.nodes.len() - 1])
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = self.range();
        let kind = if self.is_binned() { "bins" } else { "nodes" };
        write!(
            f,
            "{}: {} {}, {} interpolation, range [{}, {}]",
            self.name,
            self.len(),
            kind,
            self.mode,
            min,
            max
        )?;
        if let Some(unit) = &self.unit {
            write!(f, " {}", unit)?;
        }
        if self.strict {
            f.write_str(" (strict)")?;
        }
        Ok(())
    }
}

fn check_name(name: String) -> NdAxesResult<String> {
    if name.trim().is_empty() {
        return Err(NdAxesError::EmptyAxisName);
    }
    Ok(name)
}

fn check_log_domain(name: &str, mode: InterpolationMode, values: &Array1<f64>) -> NdAxesResult<()> {
    if mode != InterpolationMode::Log {
        return Ok(());
    }
    match values.iter().find(|v| v.is_nan() || **v <= 0.0) {
        Some(&value) => Err(NdAxesError::InvalidLogDomain {
            name: name.to_string(),
            value,
        }),
        None => Ok(()),
    }
}

fn strictly_increasing(values: &Array1<f64>) -> bool {
    values
        .iter()
        .zip(values.iter().skip(1))
        .all(|(a, b)| b.partial_cmp(a) == Some(Ordering::Greater))
}

fn log_space(name: &str, start: f64, stop: f64, n: usize) -> NdAxesResult<Array1<f64>> {
    for value in [start, stop] {
        if value.is_nan() || value <= 0.0 {
            return Err(NdAxesError::InvalidLogDomain {
                name: name.to_string(),
                value,
            });
        }
    }
    Ok(Array1::logspace(10.0, start.log10(), stop.log10(), n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_point_axis_nodes() {
        let axis = Axis::points("offset", array![0.0, 0.5, 1.0, 2.0], InterpolationMode::Linear)
            .unwrap();

        assert_eq!(axis.name(), "offset");
        assert_eq!(axis.len(), 4);
        assert!(!axis.is_binned());
        assert_eq!(axis.nodes().to_vec(), vec![0.0, 0.5, 1.0, 2.0]);
        assert_eq!(axis.range(), (0.0, 2.0));
    }

    #[test]
    fn test_point_axis_has_no_bins() {
        let axis = Axis::lin_spaced("x", 0.0, 1.0, 3).unwrap();

        assert!(matches!(axis.bins(), Err(NdAxesError::NotBinned { .. })));
        assert!(matches!(axis.bounds(), Err(NdAxesError::NotBinned { .. })));
    }

    #[test]
    fn test_binned_axis_linear_centers() {
        let axis =
            Axis::from_edges("x", array![0.0, 1.0, 3.0], InterpolationMode::Linear).unwrap();

        assert!(axis.is_binned());
        assert_eq!(axis.len(), 2);
        assert_eq!(axis.bins().unwrap().to_vec(), vec![0.0, 1.0, 3.0]);
        assert_eq!(axis.nodes().to_vec(), vec![0.5, 2.0]);
    }

    #[test]
    fn test_binned_axis_log_centers() {
        let axis = Axis::log_binned("energy", 1.0, 10.0, 50).unwrap();
        let edges = axis.bins().unwrap();
        let nodes = axis.nodes();

        assert_eq!(edges.len(), 51);
        assert_eq!(nodes.len(), 50);
        for i in 0..50 {
            assert!(edges[i] < edges[i + 1]);
            assert!(edges[i] < nodes[i] && nodes[i] < edges[i + 1]);
            assert!((nodes[i] - (edges[i] * edges[i + 1]).sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_from_bounds_with_gap() {
        let axis = Axis::from_bounds(
            "x",
            array![0.0, 2.0],
            array![1.0, 4.0],
            InterpolationMode::Linear,
        )
        .unwrap();

        assert_eq!(axis.nodes().to_vec(), vec![0.5, 3.0]);
        assert_eq!(axis.bins().unwrap().to_vec(), vec![0.0, 2.0, 4.0]);
        assert_eq!(axis.bounds().unwrap(), vec![(0.0, 1.0), (2.0, 4.0)]);
    }

    #[test]
    fn test_from_bounds_rejects_malformed() {
        let unequal = Axis::from_bounds("x", array![0.0, 1.0], array![1.0], InterpolationMode::Linear);
        assert!(matches!(unequal, Err(NdAxesError::ShapeMismatch { .. })));

        let overlapping = Axis::from_bounds(
            "x",
            array![0.0, 1.0],
            array![2.0, 3.0],
            InterpolationMode::Linear,
        );
        assert!(matches!(
            overlapping,
            Err(NdAxesError::NonMonotonicAxis { .. })
        ));

        let inverted =
            Axis::from_bounds("x", array![1.0], array![0.5], InterpolationMode::Linear);
        assert!(matches!(inverted, Err(NdAxesError::NonMonotonicAxis { .. })));
    }

    #[test]
    fn test_non_monotonic_points() {
        let result = Axis::points("x", array![0.0, 2.0, 1.0], InterpolationMode::Linear);
        assert!(matches!(result, Err(NdAxesError::NonMonotonicAxis { .. })));

        let repeated = Axis::points("x", array![0.0, 1.0, 1.0], InterpolationMode::Linear);
        assert!(matches!(repeated, Err(NdAxesError::NonMonotonicAxis { .. })));

        let edges = Axis::from_edges("x", array![0.0, 2.0, 1.0], InterpolationMode::Linear);
        assert!(matches!(edges, Err(NdAxesError::NonMonotonicAxis { .. })));
    }

    #[test]
    fn test_log_domain_rejected_on_construction() {
        let zero = Axis::points("energy", array![0.0, 1.0, 10.0], InterpolationMode::Log);
        assert!(matches!(
            zero,
            Err(NdAxesError::InvalidLogDomain { value, .. }) if value == 0.0
        ));

        let negative = Axis::from_edges("energy", array![-1.0, 1.0], InterpolationMode::Log);
        assert!(matches!(negative, Err(NdAxesError::InvalidLogDomain { .. })));

        let spaced = Axis::log_spaced("energy", 0.0, 10.0, 5);
        assert!(matches!(spaced, Err(NdAxesError::InvalidLogDomain { .. })));

        // Linear axes accept any sign
        assert!(Axis::points("offset", array![-1.0, 0.0, 1.0], InterpolationMode::Linear).is_ok());
    }

    #[test]
    fn test_empty_axis() {
        assert!(matches!(
            Axis::points("", array![1.0], InterpolationMode::Linear),
            Err(NdAxesError::EmptyAxisName)
        ));
        assert!(matches!(
            Axis::points("x", Array1::<f64>::zeros(0), InterpolationMode::Linear),
            Err(NdAxesError::EmptyAxis { .. })
        ));
        assert!(matches!(
            Axis::from_edges("x", array![1.0], InterpolationMode::Linear),
            Err(NdAxesError::EmptyAxis { .. })
        ));
    }

    #[test]
    fn test_log_spaced() {
        let axis = Axis::log_spaced("energy", 10.0, 100.0, 10).unwrap();
        let nodes = axis.nodes();

        assert_eq!(axis.mode(), InterpolationMode::Log);
        assert_eq!(nodes.len(), 10);
        assert!((nodes[0] - 10.0).abs() < 1e-10);
        assert!((nodes[9] - 100.0).abs() < 1e-10);
        // Constant ratio between neighbours
        let ratio = nodes[1] / nodes[0];
        for i in 1..10 {
            assert!((nodes[i] / nodes[i - 1] - ratio).abs() < 1e-10);
        }
    }

    #[test]
    fn test_display() {
        let axis = Axis::points("offset", array![0.0, 0.5, 1.0, 2.0], InterpolationMode::Linear)
            .unwrap()
            .with_unit("deg")
            .strict(true);

        assert_eq!(
            axis.to_string(),
            "offset: 4 nodes, lin interpolation, range [0, 2] deg (strict)"
        );
    }
}
