//! Numeric values with an attached unit tag.
//!
//! Units are opaque labels. Nothing here knows how to convert between them;
//! callers bring their values into the unit an axis declares, either up front
//! or through [`Quantity::rescale`] with a factor they supply.

use std::fmt;

use ndarray::{arr0, Array1, ArrayD, IxDyn};

/// Opaque physical unit label, compared by exact text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unit(String);

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Unit {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Unit {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Scalar or array of `f64` values with an optional unit.
///
/// A scalar is stored as a 0-dimensional array.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    values: ArrayD<f64>,
    unit: Option<Unit>,
}

impl Quantity {
    pub fn new(values: ArrayD<f64>) -> Self {
        Self { values, unit: None }
    }

    pub fn scalar(value: f64) -> Self {
        Self::new(arr0(value).into_dyn())
    }

    /// Attach a unit, replacing any previous one without touching the values.
    pub fn with_unit(mut self, unit: impl Into<Unit>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    pub fn into_values(self) -> ArrayD<f64> {
        self.values
    }

    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    pub fn is_scalar(&self) -> bool {
        self.values.ndim() == 0
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value of a 0-d or single-element quantity.
    pub fn as_scalar(&self) -> Option<f64> {
        if self.values.len() == 1 {
            self.values.iter().next().copied()
        } else {
            None
        }
    }

    /// Multiply by a caller-supplied conversion factor and relabel.
    ///
    /// ```
    /// use ndaxes::Quantity;
    ///
    /// let energy = Quantity::from(vec![1e3, 1e4]).with_unit("GeV");
    /// let energy = energy.rescale(1e-3, "TeV");
    /// assert!((energy.values()[1] - 10.0).abs() < 1e-12);
    /// assert_eq!(energy.unit().unwrap().as_str(), "TeV");
    /// ```
    pub fn rescale(self, factor: f64, unit: impl Into<Unit>) -> Self {
        Self {
            values: self.values * factor,
            unit: Some(unit.into()),
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::scalar(value)
    }
}

impl From<Vec<f64>> for Quantity {
    fn from(values: Vec<f64>) -> Self {
        Self::from(Array1::from(values))
    }
}

impl From<&[f64]> for Quantity {
    fn from(values: &[f64]) -> Self {
        Self::from(values.to_vec())
    }
}

impl From<Array1<f64>> for Quantity {
    fn from(values: Array1<f64>) -> Self {
        Self::new(values.into_dyn())
    }
}

impl From<ArrayD<f64>> for Quantity {
    fn from(values: ArrayD<f64>) -> Self {
        Self::new(values)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scalar() {
            write!(f, "{}", self.values[IxDyn(&[])])?;
        } else {
            write!(f, "{}", self.values)?;
        }
        if let Some(unit) = &self.unit {
            write!(f, " {}", unit)?;
        }
        Ok(())
    }
}
