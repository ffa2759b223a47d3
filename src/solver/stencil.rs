//! Explicit central-difference stencil
//!
//! # Mathematical Background
//!
//! Discretising ∂T/∂t = alpha ∂²T/∂x² with a forward difference in time and a
//! central difference in space gives:
//!
//! ```text
//! T[n, i] = T[n-1, i] + r (T[n-1, i+1] - 2 T[n-1, i] + T[n-1, i-1])
//! r = alpha dt / dx²
//! ```
//!
//! for every interior index i in [1, Nx - 2].
//!
//! # Row Transform
//!
//! [`step_row`] is a pure function from the previous row to the interior of
//! the next row. Reads only ever target `previous` and writes only ever
//! target `next`; the two are distinct borrows, so the interior updates of a
//! row are independent and may run in parallel ([`step_row_parallel`]).
//!
//! Time stays sequential: row n needs the whole of row n - 1.

use std::convert::Infallible;

use ndarray::{s, Array1, Array2, ArrayView1, ArrayViewMut1};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Stencil value for interior cell `i` given its three neighbours
#[inline]
fn stencil(left: f64, centre: f64, right: f64, r: f64) -> f64 {
    centre + r * (right - 2.0 * centre + left)
}

/// Compute the interior of `next` from `previous`
///
/// Index 0 and Nx - 1 of `next` are left untouched.
///
/// # Panics
///
/// Panics if the two rows differ in length.
pub fn step_row(previous: ArrayView1<'_, f64>, mut next: ArrayViewMut1<'_, f64>, r: f64) {
    assert_eq!(previous.len(), next.len(), "rows must have the same length");
    let nx = previous.len();
    if nx < 3 {
        return;
    }

    if let (Some(prev), Some(out)) = (previous.as_slice(), next.as_slice_mut()) {
        step_slice(prev, out, r);
        return;
    }

    for i in 1..nx - 1 {
        next[i] = stencil(previous[i - 1], previous[i], previous[i + 1], r);
    }
}

fn step_slice(previous: &[f64], next: &mut [f64], r: f64) {
    let nx = previous.len();
    for (i, cell) in next[1..nx - 1].iter_mut().enumerate() {
        // previous[i..i + 3] is the (left, centre, right) window of cell i + 1
        *cell = stencil(previous[i], previous[i + 1], previous[i + 2], r);
    }
}

/// Data-parallel variant of [`step_row`]
///
/// Produces exactly the same values as [`step_row`]: each cell evaluates the
/// same floating-point expression. Without the `parallel` feature this is the
/// sequential sweep.
pub fn step_row_parallel(previous: ArrayView1<'_, f64>, mut next: ArrayViewMut1<'_, f64>, r: f64) {
    #[cfg(feature = "parallel")]
    {
        assert_eq!(previous.len(), next.len(), "rows must have the same length");
        let nx = previous.len();
        if nx < 3 {
            return;
        }
        if let (Some(prev), Some(out)) = (previous.as_slice(), next.as_slice_mut()) {
            out[1..nx - 1]
                .par_iter_mut()
                .zip(prev.par_windows(3))
                .for_each(|(cell, window)| {
                    *cell = stencil(window[0], window[1], window[2], r);
                });
            return;
        }
    }

    step_row(previous, next.view_mut(), r);
}

/// Advance every row of `values` from the one before it
///
/// Row 0 and the boundary columns must already be set. After row n is
/// written, `after_row(n, row)` runs; an `Err` stops the sweep at once and
/// leaves rows n + 1.. untouched. `parallel` selects [`step_row_parallel`].
pub fn sweep_rows<E, F>(values: &mut Array2<f64>, r: f64, parallel: bool, mut after_row: F) -> Result<(), E>
where
    F: FnMut(usize, ArrayView1<'_, f64>) -> Result<(), E>,
{
    for n in 1..values.nrows() {
        let (previous, next) = values.multi_slice_mut((s![n - 1, ..], s![n, ..]));

        if parallel {
            step_row_parallel(previous.view(), next, r);
        } else {
            step_row(previous.view(), next, r);
        }

        after_row(n, values.row(n))?;
    }
    Ok(())
}

/// Sweep `nt` rows starting from `initial`
///
/// Row 0 is `initial`; the boundary values of `initial` are copied to every
/// row. No physical-parameter validation is performed: `r` is used as given.
pub fn march(initial: ArrayView1<'_, f64>, r: f64, nt: usize) -> Array2<f64> {
    let nx = initial.len();
    let mut values = Array2::zeros((nt, nx));
    if nt == 0 || nx == 0 {
        return values;
    }

    values.row_mut(0).assign(&initial);
    let left = initial[0];
    let right = initial[nx - 1];
    for n in 1..nt {
        values[(n, 0)] = left;
        values[(n, nx - 1)] = right;
    }

    let swept: Result<(), Infallible> = sweep_rows(&mut values, r, false, |_, _| Ok(()));
    if let Err(never) = swept {
        match never {}
    }

    values
}

/// One step applied to an owned row, returning the new row
pub fn advance(previous: &Array1<f64>, r: f64) -> Array1<f64> {
    let mut next = previous.clone();
    step_row(previous.view(), next.view_mut(), r);
    next
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_hand_computed_single_step() {
        // r = 0.2, T0 = [0, 1, 2, 3, 0]
        // T1[1] = 1 + 0.2 (2 - 2 + 0) = 1.0
        // T1[2] = 2 + 0.2 (3 - 4 + 1) = 2.0
        // T1[3] = 3 + 0.2 (0 - 6 + 2) = 2.2
        let previous = array![0.0, 1.0, 2.0, 3.0, 0.0];
        let next = advance(&previous, 0.2);

        assert_eq!(next[0], 0.0);
        assert_relative_eq!(next[1], 1.0, epsilon = 1e-15);
        assert_relative_eq!(next[2], 2.0, epsilon = 1e-15);
        assert_relative_eq!(next[3], 2.2, epsilon = 1e-15);
        assert_eq!(next[4], 0.0);
    }

    #[test]
    fn test_boundaries_untouched() {
        let previous = array![7.0, 1.0, 1.0, -3.0];
        let mut next = array![42.0, 0.0, 0.0, 42.0];
        step_row(previous.view(), next.view_mut(), 0.3);
        assert_eq!(next[0], 42.0);
        assert_eq!(next[3], 42.0);
    }

    #[test]
    fn test_two_point_row_is_noop() {
        let previous = array![1.0, 2.0];
        let next = advance(&previous, 0.4);
        assert_eq!(next, previous);
    }

    #[test]
    fn test_zero_r_is_identity() {
        let initial = array![0.0, 0.3, 0.9, 0.1, 0.0];
        let values = march(initial.view(), 0.0, 50);
        for row in values.rows() {
            assert_eq!(row, initial.view());
        }
    }

    #[test]
    fn test_linear_profile_is_steady() {
        // Linear profile between the boundary values is a fixed point
        let initial = array![0.0, 0.25, 0.5, 0.75, 1.0];
        let values = march(initial.view(), 0.45, 20);
        for (a, b) in values.row(19).iter().zip(initial.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_march_keeps_boundaries() {
        let initial = array![2.0, 0.0, 0.0, 0.0, -1.0];
        let values = march(initial.view(), 0.25, 30);
        for row in values.rows() {
            assert_eq!(row[0], 2.0);
            assert_eq!(row[4], -1.0);
        }
    }

    #[test]
    fn test_sweep_stops_when_callback_fails() {
        let mut values = Array2::<f64>::zeros((6, 5));
        values.row_mut(0).assign(&array![0.0, 1.0, 2.0, 3.0, 0.0]);

        let mut seen = Vec::new();
        let outcome = sweep_rows(&mut values, 0.2, false, |n, row| {
            seen.push(n);
            if n == 2 {
                Err(row[3])
            } else {
                Ok(())
            }
        });

        assert_eq!(seen, vec![1, 2]);
        // Row 1 is [0, 1, 2, 2.2, 0]; T[2, 3] = 2.2 + 0.2 (0 - 4.4 + 2) = 1.72
        assert_relative_eq!(outcome.unwrap_err(), 1.72, epsilon = 1e-12);
        for n in 3..6 {
            assert!(values.row(n).iter().all(|&v| v == 0.0), "row {} was written", n);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let previous = Array1::from_shape_fn(2048, |i| ((i as f64) * 0.01).sin());
        let mut sequential = Array1::zeros(2048);
        let mut parallel = Array1::zeros(2048);

        step_row(previous.view(), sequential.view_mut(), 0.37);
        step_row_parallel(previous.view(), parallel.view_mut(), 0.37);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_strided_views() {
        // Non-contiguous views go through the indexed path
        let grid = array![[0.0, 9.0], [1.0, 9.0], [2.0, 9.0], [3.0, 9.0], [0.0, 9.0]];
        let mut out = Array2::<f64>::zeros((5, 2));
        step_row(grid.column(0), out.column_mut(0), 0.2);
        assert_relative_eq!(out[(3, 0)], 2.2, epsilon = 1e-15);
        assert_eq!(out[(0, 0)], 0.0);
    }
}
