//! Point evaluation on a regular grid.

use ndarray::{Array1, ArrayView1, ArrayView2, IxDyn};

use crate::interpolate::error::{InterpolateError, InterpolateResult};

use super::{ExtrapolateMode, InterpNdMethod, RegularGridInterpolator};

/// Position of a query inside the grid along one dimension.
#[derive(Debug, Clone, Copy)]
struct Cell {
    /// Lower node of the enclosing (or edge) interval.
    lower: usize,
    /// Offset from `lower` in units of the interval width.
    frac: f64,
}

impl RegularGridInterpolator<'_> {
    /// Evaluate the interpolant at query points.
    ///
    /// `xi` has shape `[n_points, ndim]`; the result holds one value per row.
    pub fn evaluate(&self, xi: ArrayView2<'_, f64>) -> InterpolateResult<Array1<f64>> {
        if xi.ncols() != self.ndim() {
            return Err(InterpolateError::DimensionMismatch {
                expected: self.ndim(),
                actual: xi.ncols(),
                context: "query points".to_string(),
            });
        }

        let mut cells = Vec::with_capacity(self.ndim());
        xi.rows()
            .into_iter()
            .map(|row| {
                cells.clear();
                for (dim, &x) in row.iter().enumerate() {
                    match self.locate(dim, x)? {
                        Some(cell) => cells.push(cell),
                        None => return Ok(f64::NAN),
                    }
                }
                Ok(match self.method {
                    InterpNdMethod::Nearest => self.interp_nearest(&cells),
                    InterpNdMethod::Linear => self.interp_linear(&cells),
                })
            })
            .collect::<InterpolateResult<Vec<f64>>>()
            .map(Array1::from)
    }

    /// Place `x` along dimension `dim` under the out-of-range policy.
    /// `None` means the point evaluates to NaN.
    fn locate(&self, dim: usize, x: f64) -> InterpolateResult<Option<Cell>> {
        let coords = &self.points[dim];
        let (min, max) = (coords[0], coords[coords.len() - 1]);

        let x = if x.is_nan() || x < min || x > max {
            match self.extrapolate {
                ExtrapolateMode::Error => {
                    return Err(InterpolateError::OutOfDomainNd {
                        dimension: dim,
                        point: x,
                        min,
                        max,
                        context: "query points".to_string(),
                    });
                }
                _ if x.is_nan() => return Ok(None),
                ExtrapolateMode::Nan => return Ok(None),
                ExtrapolateMode::Clamp => x.clamp(min, max),
                ExtrapolateMode::Extrapolate => x,
            }
        } else {
            x
        };

        if coords.len() == 1 {
            return Ok(Some(Cell { lower: 0, frac: 0.0 }));
        }
        let (lower, frac) = find_interval(coords.view(), x);
        Ok(Some(Cell { lower, frac }))
    }

    fn interp_nearest(&self, cells: &[Cell]) -> f64 {
        let idx: Vec<usize> = cells
            .iter()
            .zip(self.shape())
            .map(|(cell, &len)| {
                if cell.frac < 0.5 {
                    cell.lower
                } else {
                    (cell.lower + 1).min(len - 1)
                }
            })
            .collect();
        self.values[IxDyn(&idx)]
    }

    /// Multilinear interpolation over the corners of the enclosing cell.
    ///
    /// Only dimensions with a fractional offset span two nodes; every other
    /// dimension contributes a single node with weight one, so the corner
    /// count is `2^k` for `k` such dimensions rather than `2^ndim`.
    fn interp_linear(&self, cells: &[Cell]) -> f64 {
        let mut base = Vec::with_capacity(cells.len());
        let mut spanning = Vec::new();
        for (dim, (cell, &len)) in cells.iter().zip(self.shape()).enumerate() {
            if cell.frac == 1.0 && cell.lower + 1 < len {
                base.push(cell.lower + 1);
            } else {
                base.push(cell.lower);
                if cell.frac != 0.0 && cell.lower + 1 < len {
                    spanning.push(dim);
                }
            }
        }

        // Each spanning dimension needs a distinct pair of nodes, so
        // `spanning.len()` is bounded by log2 of the number of grid values.
        let mut idx = base.clone();
        let mut result = 0.0;
        for corner in 0..1usize << spanning.len() {
            let mut weight = 1.0;
            for (bit, &dim) in spanning.iter().enumerate() {
                let frac = cells[dim].frac;
                if (corner >> bit) & 1 == 1 {
                    idx[dim] = base[dim] + 1;
                    weight *= frac;
                } else {
                    idx[dim] = base[dim];
                    weight *= 1.0 - frac;
                }
            }
            result += weight * self.values[IxDyn(&idx)];
        }
        result
    }
}

/// Interval index and fractional offset of `x` among increasing `coords`.
///
/// Values left of the grid land in the first interval with a negative
/// offset, values right of it in the last interval with an offset above
/// one. `coords` must hold at least two strictly increasing values.
pub(crate) fn find_interval(coords: ArrayView1<'_, f64>, x: f64) -> (usize, f64) {
    let n = coords.len();
    let mut lo = 0;
    let mut hi = n - 1;

    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if coords[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    if lo == n - 2 && x == coords[n - 1] {
        return (lo, 1.0);
    }
    (lo, (x - coords[lo]) / (coords[lo + 1] - coords[lo]))
}
