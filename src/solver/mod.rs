//! Numerical solver
//!
//! This module provides the explicit finite-difference stepper and the
//! types around it.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Diffusion parameters
//!    - Initial condition
//!    - Dirichlet boundary values
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Stability policy
//!    - NaN/Inf checks
//!    - Cancellation
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - `ExplicitFdmSolver`: forward Euler in time, central difference in space
//!
//! # Module Organization
//!
//! - **`grid`**: `Grid`, `SpatialAxis`, `TemporalAxis`
//! - **`boundary`**: `DirichletBoundary`
//! - **`initializer`**: `GridInitializer` (row 0 + boundary columns)
//! - **`stencil`**: pure row transform, sequential and data-parallel
//! - **`scenario`**: `Scenario`
//! - **`traits`**: `Solver`, `SolverConfiguration`, `SimulationResult`
//! - **`methods`**: solver implementations
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────────────────┐   ┌─────────────────┐
//! │ DiffusionParameters  │   │ InitialProfile  │
//! └──────────┬───────────┘   └────────┬────────┘
//!            └────────────┬───────────┘
//!                ┌────────▼────────┐
//!                │    Scenario     │ ← WHAT to solve
//!                └────────┬────────┘
//!                ┌────────▼─────────────┐
//!                │ SolverConfiguration  │ ← HOW to solve
//!                └────────┬─────────────┘
//!                ┌────────▼────────┐
//!                │ ExplicitFdmSolver│ ← row-by-row stencil sweep
//!                └────────┬────────┘
//!                ┌────────▼──────────┐
//!                │ SimulationResult  │ ← grid + axes + warnings
//!                └───────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use heat1d::physics::{DiffusionParameters, InitialProfile};
//! use heat1d::solver::{ExplicitFdmSolver, Scenario, Solver, SolverConfiguration};
//!
//! let params = DiffusionParameters::default().with_t_final(0.1);
//! let scenario = Scenario::with_profile(params, InitialProfile::SinPi);
//!
//! let result = ExplicitFdmSolver::new()
//!     .solve(&scenario, &SolverConfiguration::default())
//!     .unwrap();
//!
//! assert_eq!(result.nt(), 100);
//! assert_eq!(result.final_row()[0], 0.0);
//! ```
//!
//! # Error Handling
//!
//! All solver methods return [`crate::Result`]. Common errors:
//! - Invalid parameters (non-positive length, dt, ...)
//! - Numerical instability (r > 0.5 under `StabilityPolicy::Reject`)
//! - NaN or Inf in the temperature field
//! - Cancellation

// =================================================================================================
// Module Declarations
// =================================================================================================
mod boundary;
mod grid;
mod initializer;
mod methods;
mod scenario;
pub mod stencil;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (benchmarks and tests) without a mutex on every solve. Relaxed
// ordering is sufficient: the value is a performance hint, not a
// synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of interior points above which a row is swept in parallel.
///
/// Below that point the overhead of Rayon's thread-pool dispatch outweighs
/// the three-point stencil work.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The stepper sweeps a row sequentially when it has at most this many
/// interior points, and in parallel above it, but only when the crate is
/// compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use heat1d::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use heat1d::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Serialises tests that touch the global threshold.
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// RAII guard that saves the current threshold on construction and restores
/// it on drop. Holds [`THRESHOLD_LOCK`] for its whole lifetime.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use boundary::DirichletBoundary;
pub use grid::{Grid, SpatialAxis, TemporalAxis};
pub use initializer::GridInitializer;
pub use methods::ExplicitFdmSolver;
pub use scenario::Scenario;
pub use traits::{
    CancellationFlag,
    SimulationResult,
    Solver,
    SolverConfiguration,
    SolverWarning,
    StabilityPolicy,
};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{HeatError, Result};
use ndarray::ArrayView1;

/// Validate a time row for numerical issues
///
/// NaN or Inf in a row means the computation has diverged or the initial
/// profile was invalid. Returns the first offending index.
pub(crate) fn validate_row(row: ArrayView1<'_, f64>, step: usize) -> Result<()> {
    match row.iter().position(|v| !v.is_finite()) {
        Some(index) => {
            log::warn!(
                "Non-finite temperature at step {}, index {}: try reducing dt",
                step,
                index
            );
            Err(HeatError::NonFiniteValue { step, index })
        }
        None => Ok(()),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{DiffusionParameters, InitialProfile};
    use ndarray::array;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 999);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
        assert_ne!(guard.previous, 0);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_validate_row() {
        assert!(validate_row(array![0.0, 1.0, -2.0].view(), 3).is_ok());

        match validate_row(array![0.0, f64::INFINITY, f64::NAN].view(), 7) {
            Err(HeatError::NonFiniteValue { step, index }) => {
                assert_eq!(step, 7);
                assert_eq!(index, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_low_threshold_gives_same_grid() {
        // Forces the parallel path (when the feature is enabled) on a small grid
        let params = DiffusionParameters::default().with_nx(64).with_t_final(0.5);
        let scenario = Scenario::with_profile(params, InitialProfile::Composite);
        let config = SolverConfiguration::default();

        let sequential = ExplicitFdmSolver.solve(&scenario, &config).unwrap();
        let parallel = {
            let _guard = ThresholdGuard::save(1);
            ExplicitFdmSolver.solve(&scenario, &config).unwrap()
        };

        assert_eq!(sequential.grid, parallel.grid);
    }
}
