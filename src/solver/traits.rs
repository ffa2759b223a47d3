//! Solver traits and types
//!
//! # Design Philosophy
//!
//! - `Solver` trait: the numerical method, independent of the physics
//! - `SolverConfiguration`: HOW to solve (stability policy, checks,
//!   cancellation)
//! - `SimulationResult`: the completed grid with its axes, advisory warnings
//!   and metadata
//!
//! The physical problem itself (WHAT to solve) is the
//! [`Scenario`](crate::solver::Scenario).

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nalgebra::DVector;
use ndarray::ArrayView1;

use crate::error::{HeatError, Result};
use crate::physics::STABILITY_LIMIT;
use crate::solver::grid::{Grid, SpatialAxis, TemporalAxis};
use crate::solver::scenario::Scenario;

// =================================================================================================
// Solver Trait
// =================================================================================================

/// Numerical method for a heat conduction scenario
///
/// # Contract
///
/// - Validate the scenario and configuration before computing anything
/// - Return the full Nt × Nx grid
/// - Never mutate the scenario
pub trait Solver {
    /// Solve the scenario
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult>;

    /// Solver name
    fn name(&self) -> &str;
}

// =================================================================================================
// Stability Policy
// =================================================================================================

/// What to do when the stability number exceeds 0.5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StabilityPolicy {
    /// No check at all
    Ignore,

    /// Record a [`SolverWarning::NumericalInstability`] and log it, then solve anyway
    #[default]
    Warn,

    /// Fail with [`HeatError::NumericalInstability`](crate::HeatError::NumericalInstability)
    Reject,
}

/// Non-fatal advisory attached to a result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverWarning {
    /// r = alpha dt / dx² exceeds 0.5; the explicit scheme may oscillate and diverge
    NumericalInstability { r: f64 },

    /// An accepted unstable run overflowed: first NaN/Inf at `[step, index]`.
    /// Rows from `step` on hold non-finite values.
    Diverged { step: usize, index: usize },
}

impl fmt::Display for SolverWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverWarning::NumericalInstability { r } => write!(
                f,
                "stability number r = {:.4} exceeds {}; the explicit scheme may diverge",
                r, STABILITY_LIMIT
            ),
            SolverWarning::Diverged { step, index } => write!(
                f,
                "solution diverged: first non-finite temperature at step {}, index {}",
                step, index
            ),
        }
    }
}

// =================================================================================================
// Cancellation
// =================================================================================================

/// Cooperative cancellation flag, checked once per completed time row
///
/// Clones share the same flag.
///
/// ```rust
/// use heat1d::solver::CancellationFlag;
///
/// let flag = CancellationFlag::new();
/// let handle = flag.clone();
/// handle.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

// =================================================================================================
// Solver Configuration
// =================================================================================================

/// Configuration for the numerical solver
///
/// # Example
///
/// ```rust
/// use heat1d::solver::{SolverConfiguration, StabilityPolicy};
///
/// let config = SolverConfiguration::default()
///     .stability(StabilityPolicy::Reject)
///     .check_finite(false);
///
/// assert_eq!(config.stability, StabilityPolicy::Reject);
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfiguration {
    /// Handling of r > 0.5 (default: warn)
    pub stability: StabilityPolicy,

    /// Check every completed row for NaN/Inf (default: true)
    ///
    /// A non-finite row is an error, except in a run whose r > 0.5 was
    /// accepted (`Warn` or `Ignore`): there it is recorded as
    /// [`SolverWarning::Diverged`] and the sweep goes on.
    pub check_finite: bool,

    /// Optional cooperative cancellation
    pub cancellation: Option<CancellationFlag>,
}

impl Default for SolverConfiguration {
    fn default() -> Self {
        Self {
            stability: StabilityPolicy::Warn,
            check_finite: true,
            cancellation: None,
        }
    }
}

impl SolverConfiguration {
    /// Configuration reproducing the unchecked reference behaviour
    ///
    /// No stability check and no finiteness check.
    pub fn unchecked() -> Self {
        Self {
            stability: StabilityPolicy::Ignore,
            check_finite: false,
            cancellation: None,
        }
    }

    /// Builder pattern: set stability policy
    pub fn stability(mut self, policy: StabilityPolicy) -> Self {
        self.stability = policy;
        self
    }

    /// Builder pattern: enable or disable NaN/Inf checks
    pub fn check_finite(mut self, enabled: bool) -> Self {
        self.check_finite = enabled;
        self
    }

    /// Builder pattern: attach a cancellation flag
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(CancellationFlag::is_cancelled)
    }
}

// =================================================================================================
// Simulation Result
// =================================================================================================

/// Completed simulation, handed read-only to the output consumers
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Temperature field T[time step, spatial index]
    pub grid: Grid,

    /// Positions of the grid columns
    pub spatial_axis: SpatialAxis,

    /// Times of the grid rows
    pub temporal_axis: TemporalAxis,

    /// Stability number r used by the stencil
    pub stability_number: f64,

    /// Advisories raised while solving
    pub warnings: Vec<SolverWarning>,

    /// Free-form diagnostics (solver name, dx, dt, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Assemble a result, checking that the axes match the grid
    ///
    /// # Errors
    ///
    /// [`HeatError::DimensionMismatch`] when the spatial axis length differs
    /// from Nx or the temporal axis length differs from Nt.
    pub fn new(
        grid: Grid,
        spatial_axis: SpatialAxis,
        temporal_axis: TemporalAxis,
        stability_number: f64,
    ) -> Result<Self> {
        if spatial_axis.len() != grid.nx() {
            return Err(HeatError::DimensionMismatch {
                expected: grid.nx(),
                actual: spatial_axis.len(),
            });
        }
        if temporal_axis.len() != grid.nt() {
            return Err(HeatError::DimensionMismatch {
                expected: grid.nt(),
                actual: temporal_axis.len(),
            });
        }

        Ok(Self {
            grid,
            spatial_axis,
            temporal_axis,
            stability_number,
            warnings: Vec::new(),
            metadata: HashMap::new(),
        })
    }

    /// Number of time rows
    pub fn nt(&self) -> usize {
        self.grid.nt()
    }

    /// Number of spatial points
    pub fn nx(&self) -> usize {
        self.grid.nx()
    }

    /// Time row `step`
    pub fn row(&self, step: usize) -> ArrayView1<'_, f64> {
        self.grid.row(step)
    }

    /// Last time row
    pub fn final_row(&self) -> ArrayView1<'_, f64> {
        self.grid.final_row()
    }

    /// Time row `step` as a nalgebra vector
    pub fn row_vector(&self, step: usize) -> DVector<f64> {
        DVector::from_iterator(self.nx(), self.grid.row(step).iter().copied())
    }

    /// Maximum absolute temperature of row `step`
    pub fn max_amplitude(&self, step: usize) -> f64 {
        self.row_vector(step).amax()
    }

    /// Root-mean-square temperature of row `step`
    pub fn rms(&self, step: usize) -> f64 {
        self.row_vector(step).norm() / (self.nx() as f64).sqrt()
    }

    /// Row indices for a line plot of `count` snapshots
    ///
    /// Rows 0, Nt/count, 2·Nt/count, ... below Nt. With fewer rows than
    /// `count` every row is returned.
    pub fn snapshot_indices(&self, count: usize) -> Vec<usize> {
        let nt = self.nt();
        if count == 0 {
            return Vec::new();
        }
        let stride = (nt / count).max(1);
        (0..nt).step_by(stride).collect()
    }

    /// Instability advisory, if one was raised
    pub fn stability_warning(&self) -> Option<&SolverWarning> {
        self.warnings
            .iter()
            .find(|w| matches!(w, SolverWarning::NumericalInstability { .. }))
    }

    /// Divergence advisory, if one was raised
    pub fn divergence_warning(&self) -> Option<&SolverWarning> {
        self.warnings
            .iter()
            .find(|w| matches!(w, SolverWarning::Diverged { .. }))
    }

    /// Add metadata
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn small_result() -> SimulationResult {
        let grid = Grid::from_array(array![
            [0.0, 2.0, -3.0, 0.0],
            [0.0, 1.0, -1.0, 0.0],
            [0.0, 0.5, 0.5, 0.0],
        ])
        .unwrap();
        SimulationResult::new(
            grid,
            SpatialAxis::new(1.0, 4).unwrap(),
            TemporalAxis::new(0.1, 3).unwrap(),
            0.2,
        )
        .unwrap()
    }

    #[test]
    fn test_configuration_defaults() {
        let config = SolverConfiguration::default();
        assert_eq!(config.stability, StabilityPolicy::Warn);
        assert!(config.check_finite);
        assert!(!config.is_cancelled());
    }

    #[test]
    fn test_unchecked_configuration() {
        let config = SolverConfiguration::unchecked();
        assert_eq!(config.stability, StabilityPolicy::Ignore);
        assert!(!config.check_finite);
    }

    #[test]
    fn test_cancellation_is_shared() {
        let flag = CancellationFlag::new();
        let config = SolverConfiguration::default().with_cancellation(flag.clone());
        assert!(!config.is_cancelled());
        flag.cancel();
        assert!(config.is_cancelled());
    }

    #[test]
    fn test_row_diagnostics() {
        let result = small_result();
        assert_eq!(result.max_amplitude(0), 3.0);
        assert_eq!(result.max_amplitude(2), 0.5);
        assert_relative_eq!(result.rms(1), (2.0f64 / 4.0).sqrt(), epsilon = 1e-15);
        assert_eq!(result.row_vector(1).as_slice(), &[0.0, 1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_mismatched_axes_rejected() {
        let grid = Grid::zeros(3, 4).unwrap();
        let err = SimulationResult::new(
            grid.clone(),
            SpatialAxis::new(1.0, 5).unwrap(),
            TemporalAxis::new(0.1, 3).unwrap(),
            0.2,
        )
        .unwrap_err();
        assert!(matches!(err, HeatError::DimensionMismatch { expected: 4, actual: 5 }));

        let err = SimulationResult::new(
            grid,
            SpatialAxis::new(1.0, 4).unwrap(),
            TemporalAxis::new(0.1, 2).unwrap(),
            0.2,
        )
        .unwrap_err();
        assert!(matches!(err, HeatError::DimensionMismatch { expected: 3, actual: 2 }));
    }

    #[test]
    fn test_snapshot_indices() {
        let result = small_result();
        assert_eq!(result.snapshot_indices(5), vec![0, 1, 2]);
        assert_eq!(result.snapshot_indices(2), vec![0, 1, 2]);
        assert_eq!(result.snapshot_indices(0), Vec::<usize>::new());
    }

    #[test]
    fn test_warning_lookup() {
        let mut result = small_result();
        assert!(result.stability_warning().is_none());

        result.warnings.push(SolverWarning::NumericalInstability { r: 0.6 });
        assert_eq!(
            result.stability_warning(),
            Some(&SolverWarning::NumericalInstability { r: 0.6 })
        );
        assert!(result.warnings[0].to_string().contains("0.6000"));
        assert!(result.divergence_warning().is_none());

        result.warnings.push(SolverWarning::Diverged { step: 2, index: 1 });
        assert_eq!(
            result.divergence_warning(),
            Some(&SolverWarning::Diverged { step: 2, index: 1 })
        );
        assert!(result.warnings[1].to_string().contains("step 2, index 1"));
    }
}
