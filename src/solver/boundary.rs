//! Dirichlet boundary conditions
//!
//! # Design
//!
//! The temperature at both ends of the rod is prescribed for all time.
//! The stencil never writes the two boundary indices, so once the boundary
//! columns are set on the grid they stay untouched by the time sweep.

use std::fmt;

use ndarray::{Array2, ArrayViewMut1, Axis};

use crate::error::{HeatError, Result};

/// Fixed temperatures at x = 0 and x = L
///
/// # Examples
///
/// ```rust
/// use heat1d::solver::DirichletBoundary;
///
/// // Both ends held at zero
/// let cold = DirichletBoundary::default();
/// assert_eq!(cold.left, 0.0);
///
/// // Same value on both ends
/// let warm = DirichletBoundary::uniform(20.0);
/// assert_eq!(warm.right, 20.0);
///
/// // Different ends
/// let gradient = DirichletBoundary::new(100.0, 0.0);
/// assert!(!gradient.is_uniform());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirichletBoundary {
    /// Temperature at index 0
    pub left: f64,

    /// Temperature at index Nx - 1
    pub right: f64,
}

impl DirichletBoundary {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Same value at both ends
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn is_uniform(&self) -> bool {
        self.left == self.right
    }

    /// Both values must be finite
    pub fn validate(&self) -> Result<()> {
        if !self.left.is_finite() || !self.right.is_finite() {
            return Err(HeatError::invalid(format!(
                "boundary values must be finite, got left = {}, right = {}",
                self.left, self.right
            )));
        }
        Ok(())
    }

    /// Overwrite the two end values of a single row
    pub fn apply_to_row(&self, mut row: ArrayViewMut1<'_, f64>) {
        let last = row.len() - 1;
        row[0] = self.left;
        row[last] = self.right;
    }

    /// Overwrite the boundary columns of every time row
    pub fn apply_to_grid(&self, values: &mut Array2<f64>) {
        for row in values.axis_iter_mut(Axis(0)) {
            self.apply_to_row(row);
        }
    }
}

impl fmt::Display for DirichletBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T(0) = {}, T(L) = {}", self.left, self.right)
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn test_default_is_zero() {
        let boundary = DirichletBoundary::default();
        assert_eq!(boundary, DirichletBoundary::uniform(0.0));
        assert!(boundary.is_uniform());
    }

    #[test]
    fn test_apply_to_row() {
        let mut row = Array1::from_vec(vec![5.0, 1.0, 2.0, 5.0]);
        DirichletBoundary::new(-1.0, 3.0).apply_to_row(row.view_mut());
        assert_eq!(row.to_vec(), vec![-1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_apply_to_grid_touches_only_boundaries() {
        let mut values = array![[9.0, 9.0, 9.0], [9.0, 9.0, 9.0]];
        DirichletBoundary::uniform(0.0).apply_to_grid(&mut values);
        assert_eq!(values, array![[0.0, 9.0, 0.0], [0.0, 9.0, 0.0]]);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(DirichletBoundary::new(f64::NAN, 0.0).validate().is_err());
        assert!(DirichletBoundary::uniform(1.0).validate().is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(DirichletBoundary::new(1.0, 2.0).to_string(), "T(0) = 1, T(L) = 2");
    }
}
