//! ndaxes - Labeled N-dimensional Arrays with Per-Axis Interpolation
//!
//! ndaxes attaches named, ordered coordinate axes to dense `f64` arrays and
//! evaluates them at arbitrary named coordinates. Each axis chooses whether
//! distances along it are measured linearly or in `log10`, so tabulated
//! quantities spanning decades (energies, rates, fluxes) interpolate the way
//! they are sampled.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   LabeledArray                          │
//! │     (named axes, units, queries, lookup_max, mask)      │
//! └──────────────┬───────────────────────────┬──────────────┘
//!                │ axes                      │ evaluates with
//! ┌──────────────▼─────────────┐ ┌───────────▼──────────────┐
//! │           Axis             │ │ RegularGridInterpolator  │
//! │ (nodes, bins, lin/log,     │ │ (nearest / multilinear,  │
//! │  strict bounds)            │ │  extrapolation policy)   │
//! └────────────────────────────┘ └──────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`axis`] - Node and bin axes, interpolation modes, coordinate lookup
//! - [`array`] - Labeled arrays and their evaluation at named coordinates
//! - [`quantity`] - Values tagged with a unit
//! - [`interpolate`] - Regular-grid interpolation in plain coordinates
//! - [`error`] - Error type shared by the crate
//!
//! # Example
//!
//! ```
//! use ndarray::Array2;
//! use ndaxes::{Axis, EvaluationQuery, LabeledArray, Quantity};
//!
//! let energy = Axis::log_binned("energy", 1.0, 10.0, 50).unwrap().with_unit("TeV");
//! let offset = Axis::lin_spaced("offset", 0.0, 2.0, 4).unwrap().with_unit("deg");
//!
//! let e = energy.nodes().clone();
//! let o = offset.nodes().clone();
//! let data = Array2::from_shape_fn((50, 4), |(i, j)| (-e[i]).exp() * (1.0 - 0.2 * o[j]));
//! let aeff = LabeledArray::new([energy, offset], data).unwrap().with_unit("m2");
//!
//! let query = EvaluationQuery::new()
//!     .coord("offset", Quantity::scalar(0.23).with_unit("deg"))
//!     .coord("energy", Quantity::from(vec![2.0, 3.0, 5.0]).with_unit("TeV"));
//! let result = aeff.evaluate(&query).unwrap();
//!
//! assert_eq!(result.values().shape(), &[3]);
//! assert_eq!(result.unit().unwrap().as_str(), "m2");
//! ```

pub mod array;
pub mod axis;
pub mod error;
pub mod interpolate;
pub mod quantity;

// Re-export main types for convenience
pub use array::{EvaluateOptions, EvaluationQuery, LabeledArray};
pub use axis::{Axis, InterpolationMode};
pub use error::{NdAxesError, NdAxesResult};
pub use interpolate::{
    ExtrapolateMode, InterpNdMethod, InterpolateError, InterpolateResult, RegularGridInterpolator,
};
pub use quantity::{Quantity, Unit};
