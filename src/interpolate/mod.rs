//! Regular-grid interpolation.
//!
//! [`RegularGridInterpolator`] evaluates an N-dimensional array of values
//! sampled on a rectilinear grid (one strictly increasing coordinate array per
//! dimension) at arbitrary query points, using multilinear or nearest-neighbor
//! interpolation. It knows nothing about axis names or logarithmic spaces;
//! [`LabeledArray`](crate::LabeledArray) maps its axes into the coordinate
//! space the grid is built in before handing them over.
//!
//! # Module Organization
//!
//! - [`RegularGridInterpolator`] - the interpolator
//! - [`InterpNdMethod`] - nearest or multilinear
//! - [`ExtrapolateMode`] - behavior for queries outside the grid
//! - [`InterpolateError`] - errors raised while building or evaluating

mod error;
mod interpnd;

pub use error::{InterpolateError, InterpolateResult};
pub(crate) use interpnd::find_interval;
pub use interpnd::{ExtrapolateMode, InterpNdMethod, RegularGridInterpolator};
