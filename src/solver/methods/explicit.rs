//! Explicit finite-difference solver
//!
//! # Mathematical Background
//!
//! Forward Euler in time combined with a second-order central difference in
//! space (FTCS):
//!
//! ```text
//! T[n, i] = T[n-1, i] + r (T[n-1, i+1] - 2 T[n-1, i] + T[n-1, i-1])
//! r = alpha dt / dx²
//! ```
//!
//! # Characteristics
//!
//! - **Order**: first order in time O(dt), second order in space O(dx²)
//! - **Stability**: conditionally stable, r <= 0.5
//! - **Cost**: one stencil evaluation per interior cell per step
//! - **Memory**: the full Nt × Nx grid is stored
//!
//! # Stability
//!
//! For r > 0.5 the highest spatial mode is amplified by |1 - 4r| > 1 each
//! step: the solution oscillates in sign from one step to the next and grows
//! without bound. The solver does not alter its arithmetic for such
//! parameters; it only reports them according to the configured
//! [`StabilityPolicy`].
//!
//! # Example
//!
//! ```rust
//! use heat1d::physics::{DiffusionParameters, InitialProfile};
//! use heat1d::solver::{ExplicitFdmSolver, Scenario, Solver, SolverConfiguration};
//!
//! let params = DiffusionParameters::default().with_nx(21).with_t_final(1.0).with_dt(0.01);
//! let scenario = Scenario::with_profile(params, InitialProfile::SinPi);
//!
//! let result = ExplicitFdmSolver::new()
//!     .solve(&scenario, &SolverConfiguration::default())
//!     .unwrap();
//!
//! assert_eq!(result.nt(), 100);
//! assert_eq!(result.nx(), 21);
//! ```

use ndarray::ArrayView1;

use crate::error::{HeatError, Result};
use crate::physics::STABILITY_LIMIT;
use crate::solver;
use crate::solver::stencil;
use crate::solver::{
    Scenario, SimulationResult, Solver, SolverConfiguration, SolverWarning, StabilityPolicy,
};

// =================================================================================================
// Explicit FDM Solver
// =================================================================================================

/// Explicit FDM stepper for the 1D heat equation
///
/// # Algorithm
///
/// 1. Validate parameters and configuration, compute r
/// 2. Allocate the Nt × Nx grid: row 0 = initial profile, boundary columns set
/// 3. For n = 1, ..., Nt - 1 (via [`stencil::sweep_rows`]):
///    - split the grid into row n - 1 (read) and row n (write)
///    - apply the stencil to the interior of row n
///    - check row n for NaN/Inf, check for cancellation
/// 4. Return the grid with its axes
///
/// With r > 0.5 accepted, a row that overflows is recorded as
/// [`SolverWarning::Diverged`] rather than failing the solve.
///
/// The interior sweep of one row runs in parallel when the crate is built
/// with the `parallel` feature and the row is longer than
/// [`parallel_threshold()`](crate::solver::parallel_threshold).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitFdmSolver;

impl ExplicitFdmSolver {
    /// Create a new explicit solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use heat1d::solver::{ExplicitFdmSolver, Solver};
    ///
    /// let solver = ExplicitFdmSolver::new();
    /// assert_eq!(solver.name(), "Explicit FDM");
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Apply the stability policy, returning the advisory to record (if any)
    fn check_stability(r: f64, policy: StabilityPolicy) -> Result<Option<SolverWarning>> {
        if r <= STABILITY_LIMIT {
            return Ok(None);
        }
        match policy {
            StabilityPolicy::Ignore => Ok(None),
            StabilityPolicy::Warn => {
                let warning = SolverWarning::NumericalInstability { r };
                log::warn!("{}", warning);
                Ok(Some(warning))
            }
            StabilityPolicy::Reject => Err(HeatError::NumericalInstability { r }),
        }
    }
}

/// Per-row checks run after each row is written
///
/// Finiteness, cancellation and progress logging. A non-finite row in a run
/// whose r > 0.5 was accepted is recorded once as
/// [`SolverWarning::Diverged`] instead of failing the solve.
struct RowMonitor<'a> {
    config: &'a SolverConfiguration,
    nt: usize,
    unstable: bool,
    progress_every: usize,
    divergence: Option<SolverWarning>,
}

impl<'a> RowMonitor<'a> {
    fn new(config: &'a SolverConfiguration, nt: usize, unstable: bool) -> Self {
        Self {
            config,
            nt,
            unstable,
            progress_every: (nt / 10).max(1),
            divergence: None,
        }
    }

    fn after_row(&mut self, n: usize, row: ArrayView1<'_, f64>) -> Result<()> {
        if self.config.check_finite && self.divergence.is_none() {
            match solver::validate_row(row, n) {
                Ok(()) => {}
                Err(HeatError::NonFiniteValue { step, index }) if self.unstable => {
                    let warning = SolverWarning::Diverged { step, index };
                    log::warn!("{}", warning);
                    self.divergence = Some(warning);
                }
                Err(err) => return Err(err),
            }
        }

        if self.config.is_cancelled() {
            log::info!("Simulation cancelled after {} rows", n + 1);
            return Err(HeatError::Cancelled { completed_rows: n + 1 });
        }

        if n % self.progress_every == 0 {
            log::debug!("row {}/{} ({}%)", n, self.nt - 1, 100 * n / (self.nt - 1));
        }

        Ok(())
    }
}

impl Solver for ExplicitFdmSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult> {
        // ====== Step 1: Validation ======

        scenario.validate()?;

        let params = &scenario.parameters;
        let r = params.stability_number();
        let warning = Self::check_stability(r, config.stability)?;

        // ====== Step 2: Setup ======

        let initializer = scenario.initializer()?;
        let mut grid = initializer.allocate(scenario.initial.as_ref())?;
        let (nt, nx) = (grid.nt(), grid.nx());

        log::info!(
            "Solving 1D heat conduction: {} ({} rows x {} points, r = {:.5})",
            scenario.initial_condition_name(),
            nt,
            nx,
            r
        );

        if config.check_finite {
            solver::validate_row(grid.row(0), 0)?;
        }

        // ====== Step 3: Time Sweep ======

        let parallel = nx.saturating_sub(2) > solver::parallel_threshold();
        let mut monitor = RowMonitor::new(config, nt, r > STABILITY_LIMIT);
        stencil::sweep_rows(grid.values_mut(), r, parallel, |n, row| monitor.after_row(n, row))?;

        // ====== Step 4: Build Result ======

        let (spatial_axis, temporal_axis) = initializer.into_axes();
        let mut result = SimulationResult::new(grid, spatial_axis, temporal_axis, r)?;
        result.warnings.extend(warning);
        result.warnings.extend(monitor.divergence);

        result.add_metadata("solver", self.name());
        result.add_metadata("initial condition", scenario.initial_condition_name());
        result.add_metadata("nx", &nx.to_string());
        result.add_metadata("nt", &nt.to_string());
        result.add_metadata("dx", &params.dx().to_string());
        result.add_metadata("dt", &params.dt.to_string());
        result.add_metadata("alpha", &params.alpha.to_string());
        result.add_metadata("r", &r.to_string());

        log::info!("Solve completed: final time {} s", result.temporal_axis.final_time());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Explicit FDM"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{DiffusionParameters, FnProfile, InitialProfile};
    use crate::solver::{CancellationFlag, DirichletBoundary};
    use approx::assert_relative_eq;

    fn params(nx: usize, t_final: f64, dt: f64) -> DiffusionParameters {
        DiffusionParameters::default().with_nx(nx).with_t_final(t_final).with_dt(dt)
    }

    // ====== Solver Creation Tests ======

    #[test]
    fn test_solver_creation() {
        assert_eq!(ExplicitFdmSolver::new().name(), "Explicit FDM");
        assert_eq!(ExplicitFdmSolver::default().name(), "Explicit FDM");
    }

    // ====== Shape Tests ======

    #[test]
    fn test_result_shape_and_axes() {
        let scenario = Scenario::with_profile(params(11, 0.1, 0.01), InitialProfile::SinPi);
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap();

        assert_eq!(result.nt(), 10);
        assert_eq!(result.nx(), 11);
        assert_eq!(result.temporal_axis.len(), 10);
        assert_eq!(result.spatial_axis.len(), 11);
        assert_relative_eq!(result.temporal_axis.final_time(), 0.09, epsilon = 1e-12);
    }

    #[test]
    fn test_single_row_grid() {
        // Nt = 1: only the initial row, no stepping
        let scenario = Scenario::with_profile(params(11, 0.015, 0.01), InitialProfile::SinPi);
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap();
        assert_eq!(result.nt(), 1);
    }

    #[test]
    fn test_two_point_grid_is_boundary_only() {
        let scenario = Scenario::new(
            params(2, 0.05, 0.01),
            Box::new(InitialProfile::SinPi),
            DirichletBoundary::new(1.0, 3.0),
        );
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap();
        for n in 0..result.nt() {
            assert_eq!(result.row(n).to_vec(), vec![1.0, 3.0]);
        }
    }

    // ====== Stencil Tests ======

    #[test]
    fn test_first_step_matches_stencil() {
        let p = params(11, 0.05, 0.01);
        let r = p.stability_number();
        let scenario = Scenario::with_profile(p, InitialProfile::Composite);
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap();

        let t0 = result.row(0);
        let t1 = result.row(1);
        for i in 1..10 {
            let expected = t0[i] + r * (t0[i + 1] - 2.0 * t0[i] + t0[i - 1]);
            assert_eq!(t1[i], expected);
        }
    }

    #[test]
    fn test_boundaries_fixed() {
        let scenario = Scenario::new(
            params(21, 1.0, 0.01),
            Box::new(FnProfile::new("flat", |_| 10.0)),
            DirichletBoundary::uniform(2.5),
        );
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap();
        for n in 0..result.nt() {
            assert_eq!(result.row(n)[0], 2.5);
            assert_eq!(result.row(n)[20], 2.5);
        }
    }

    #[test]
    fn test_sine_mode_decays() {
        let scenario = Scenario::with_profile(params(21, 1.0, 0.01), InitialProfile::SinPi);
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap();

        let mut previous = result.max_amplitude(0);
        for n in 1..result.nt() {
            let current = result.max_amplitude(n);
            assert!(current < previous, "amplitude grew at step {}", n);
            previous = current;
        }
    }

    // ====== Stability Tests ======

    #[test]
    fn test_unstable_parameters_warn_by_default() {
        // dx = 0.05, dt = 0.1275 → r = 0.51
        let scenario = Scenario::with_profile(params(21, 2.55, 0.1275), InitialProfile::SinPi);
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap();

        match result.stability_warning() {
            Some(SolverWarning::NumericalInstability { r }) => assert_relative_eq!(*r, 0.51, epsilon = 1e-12),
            other => panic!("expected instability warning, got {:?}", other),
        }
    }

    #[test]
    fn test_diverging_run_returns_grid_with_advisories() {
        // Default grid with dt = 0.01 → r = 0.9801, overflows well before the last row
        let params = DiffusionParameters::default().with_dt(0.01);
        let scenario = Scenario::with_profile(params, InitialProfile::SinPi);
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap();

        assert_eq!(result.nt(), 1000);
        assert!(matches!(
            result.stability_warning(),
            Some(SolverWarning::NumericalInstability { .. })
        ));

        let step = match result.divergence_warning() {
            Some(SolverWarning::Diverged { step, .. }) => *step,
            other => panic!("expected divergence warning, got {:?}", other),
        };
        assert!(step > 0 && step < result.nt());
        assert!(result.row(step - 1).iter().all(|v| v.is_finite()));
        assert!(result.row(step).iter().any(|v| !v.is_finite()));
        assert_eq!(result.final_row()[0], 0.0);
    }

    #[test]
    fn test_unstable_parameters_rejected() {
        let scenario = Scenario::with_profile(params(21, 2.55, 0.1275), InitialProfile::SinPi);
        let config = SolverConfiguration::default().stability(StabilityPolicy::Reject);
        let err = ExplicitFdmSolver.solve(&scenario, &config).unwrap_err();
        assert!(matches!(err, HeatError::NumericalInstability { .. }));
    }

    #[test]
    fn test_unstable_parameters_ignored() {
        let scenario = Scenario::with_profile(params(21, 2.55, 0.1275), InitialProfile::SinPi);
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::unchecked()).unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_stable_parameters_no_warning() {
        let scenario = Scenario::with_profile(params(21, 1.0, 0.1), InitialProfile::SinPi);
        let config = SolverConfiguration::default().stability(StabilityPolicy::Reject);
        let result = ExplicitFdmSolver.solve(&scenario, &config).unwrap();
        assert!(result.stability_warning().is_none());
    }

    // ====== Validation Tests ======

    #[test]
    fn test_invalid_parameters_fail_fast() {
        let scenario = Scenario::with_profile(params(11, 1.0, 0.0), InitialProfile::SinPi);
        let err = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap_err();
        assert!(matches!(err, HeatError::InvalidParameters(_)));
    }

    #[test]
    fn test_detects_nan_initial_profile() {
        let scenario = Scenario::new(
            params(11, 0.1, 0.01),
            Box::new(FnProfile::new("nan", |x| if x > 0.45 && x < 0.55 { f64::NAN } else { 0.0 })),
            DirichletBoundary::default(),
        );
        let err = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap_err();
        match err {
            HeatError::NonFiniteValue { step, index } => {
                assert_eq!(step, 0);
                assert_eq!(index, 5);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unchecked_propagates_nan() {
        let scenario = Scenario::new(
            params(11, 0.1, 0.01),
            Box::new(FnProfile::new("nan", |x| if x > 0.45 && x < 0.55 { f64::NAN } else { 0.0 })),
            DirichletBoundary::default(),
        );
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::unchecked()).unwrap();
        assert!(result.final_row()[5].is_nan());
        assert_eq!(result.final_row()[0], 0.0);
    }

    // ====== Cancellation Tests ======

    #[test]
    fn test_cancelled_before_start_stops_after_first_row() {
        let flag = CancellationFlag::new();
        flag.cancel();
        let scenario = Scenario::with_profile(params(11, 1.0, 0.01), InitialProfile::SinPi);
        let config = SolverConfiguration::default().with_cancellation(flag);

        let err = ExplicitFdmSolver.solve(&scenario, &config).unwrap_err();
        match err {
            HeatError::Cancelled { completed_rows } => assert_eq!(completed_rows, 2),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_cancellation_during_sweep() {
        let flag = CancellationFlag::new();
        let config = SolverConfiguration::default().with_cancellation(flag.clone());
        let mut monitor = RowMonitor::new(&config, 100, false);
        let row = ndarray::Array1::<f64>::zeros(5);

        for n in 1..=3 {
            assert!(monitor.after_row(n, row.view()).is_ok(), "row {}", n);
        }

        flag.cancel();
        match monitor.after_row(4, row.view()) {
            Err(HeatError::Cancelled { completed_rows }) => assert_eq!(completed_rows, 5),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_cancellation_stops_sweep_midway() {
        let flag = CancellationFlag::new();
        let config = SolverConfiguration::default().with_cancellation(flag.clone());
        let mut monitor = RowMonitor::new(&config, 20, false);

        let mut values = ndarray::Array2::<f64>::zeros((20, 11));
        values.row_mut(0).fill(1.0);
        let outcome = stencil::sweep_rows(&mut values, 0.25, false, |n, row| {
            if n == 7 {
                flag.cancel();
            }
            monitor.after_row(n, row)
        });

        assert!(matches!(outcome, Err(HeatError::Cancelled { completed_rows: 8 })));
        assert!(values.row(7).iter().any(|&v| v != 0.0));
        assert!(values.row(8).iter().all(|&v| v == 0.0));
    }

    // ====== Divergence Tests ======

    #[test]
    fn test_non_finite_row_fails_stable_run() {
        let config = SolverConfiguration::default();
        let mut monitor = RowMonitor::new(&config, 10, false);
        let row = ndarray::array![0.0, f64::INFINITY, 0.0];

        match monitor.after_row(3, row.view()) {
            Err(HeatError::NonFiniteValue { step, index }) => assert_eq!((step, index), (3, 1)),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_row_recorded_once_in_unstable_run() {
        let config = SolverConfiguration::default();
        let mut monitor = RowMonitor::new(&config, 10, true);

        monitor.after_row(4, ndarray::array![0.0, f64::NAN, 0.0].view()).unwrap();
        monitor.after_row(5, ndarray::array![f64::NAN, 0.0, 0.0].view()).unwrap();

        assert_eq!(monitor.divergence, Some(SolverWarning::Diverged { step: 4, index: 1 }));
    }

    // ====== Metadata Tests ======

    #[test]
    fn test_metadata() {
        let scenario = Scenario::with_profile(params(11, 0.1, 0.01), InitialProfile::Sin2Pi);
        let result = ExplicitFdmSolver.solve(&scenario, &SolverConfiguration::default()).unwrap();

        assert_eq!(result.metadata.get("solver"), Some(&"Explicit FDM".to_string()));
        assert_eq!(result.metadata.get("initial condition"), Some(&"sin(2pi * x)".to_string()));
        assert_eq!(result.metadata.get("nx"), Some(&"11".to_string()));
        assert_eq!(result.metadata.get("nt"), Some(&"10".to_string()));

        let r: f64 = result.metadata.get("r").unwrap().parse().unwrap();
        assert_relative_eq!(r, result.stability_number, epsilon = 1e-15);
    }
}
