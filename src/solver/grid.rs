//! Temperature grid and its axes
//!
//! The grid is a dense Nt × Nx array indexed by `[time step, spatial index]`
//! and stored row-major (time then space), so every time row is a
//! contiguous slice.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{HeatError, Result};
use crate::physics::DiffusionParameters;

// =================================================================================================
// Axes
// =================================================================================================

/// Uniformly spaced positions over [0, L]
///
/// Position i is computed as `i * dx` directly from the index so the last
/// position is exactly L (up to one rounding) regardless of Nx.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialAxis {
    positions: Array1<f64>,
    dx: f64,
}

impl SpatialAxis {
    /// Build the axis for `nx >= 2` points over [0, length]
    pub fn new(length: f64, nx: usize) -> Result<Self> {
        if nx < 2 {
            return Err(HeatError::invalid(format!(
                "spatial axis needs at least 2 points, got {}",
                nx
            )));
        }
        let dx = length / (nx - 1) as f64;
        let mut positions = Array1::from_shape_fn(nx, |i| i as f64 * dx);
        positions[nx - 1] = length;
        Ok(Self { positions, dx })
    }

    /// Axis matching a parameter set
    pub fn from_parameters(params: &DiffusionParameters) -> Result<Self> {
        Self::new(params.length, params.nx)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Spatial step
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Domain length
    pub fn length(&self) -> f64 {
        self.positions[self.positions.len() - 1]
    }

    pub fn positions(&self) -> ArrayView1<'_, f64> {
        self.positions.view()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.positions.as_slice().unwrap_or(&[])
    }
}

/// Uniformly spaced time values t_n = n * dt, n in [0, Nt)
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalAxis {
    times: Array1<f64>,
    dt: f64,
}

impl TemporalAxis {
    pub fn new(dt: f64, nt: usize) -> Result<Self> {
        if nt == 0 {
            return Err(HeatError::invalid("temporal axis needs at least 1 time row"));
        }
        // Computed from the index to avoid accumulating rounding errors (t += dt)
        let times = Array1::from_shape_fn(nt, |n| n as f64 * dt);
        Ok(Self { times, dt })
    }

    /// Axis matching a parameter set
    pub fn from_parameters(params: &DiffusionParameters) -> Result<Self> {
        Self::new(params.dt, params.nt())
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time step
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time of the last row
    pub fn final_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.times.as_slice().unwrap_or(&[])
    }
}

// =================================================================================================
// Grid
// =================================================================================================

/// Dense temperature field T[time step, spatial index]
///
/// # Invariants
///
/// - `nt() >= 1`
/// - `nx() >= 2`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    values: Array2<f64>,
}

impl Grid {
    /// Zero-filled grid of `nt` rows and `nx` columns
    pub fn zeros(nt: usize, nx: usize) -> Result<Self> {
        Self::check_shape(nt, nx)?;
        Ok(Self { values: Array2::zeros((nt, nx)) })
    }

    /// Wrap an existing array
    pub fn from_array(values: Array2<f64>) -> Result<Self> {
        let (nt, nx) = values.dim();
        Self::check_shape(nt, nx)?;
        Ok(Self { values })
    }

    fn check_shape(nt: usize, nx: usize) -> Result<()> {
        if nt == 0 {
            return Err(HeatError::invalid("grid needs at least 1 time row"));
        }
        if nx < 2 {
            return Err(HeatError::invalid(format!(
                "grid needs at least 2 spatial points, got {}",
                nx
            )));
        }
        Ok(())
    }

    /// Number of time rows
    pub fn nt(&self) -> usize {
        self.values.nrows()
    }

    /// Number of spatial points
    pub fn nx(&self) -> usize {
        self.values.ncols()
    }

    /// Value at `[step, index]`
    pub fn get(&self, step: usize, index: usize) -> Option<f64> {
        self.values.get((step, index)).copied()
    }

    /// Time row `step`
    ///
    /// # Panics
    ///
    /// Panics if `step >= nt()`.
    pub fn row(&self, step: usize) -> ArrayView1<'_, f64> {
        self.values.row(step)
    }

    /// Last time row
    pub fn final_row(&self) -> ArrayView1<'_, f64> {
        self.values.row(self.nt() - 1)
    }

    /// Column `index` (temperature history of one position)
    pub fn column(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.column(index)
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Row-major contiguous storage
    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice().unwrap_or(&[])
    }

    /// Minimum and maximum over the whole grid
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    pub(crate) fn values_mut(&mut self) -> &mut Array2<f64> {
        &mut self.values
    }

    pub fn into_array(self) -> Array2<f64> {
        self.values
    }
}

// =================================================================================================
// Tests
// =================================================================================================
