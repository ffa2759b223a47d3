//! Helper functions for integration tests

use heat1d::physics::{DiffusionParameters, InitialCondition};
use heat1d::solver::{
    DirichletBoundary, ExplicitFdmSolver, Scenario, SimulationResult, Solver, SolverConfiguration,
};
use ndarray::ArrayView1;

/// Default parameters with the given grid size, simulated time and step
pub fn params(nx: usize, t_final: f64, dt: f64) -> DiffusionParameters {
    DiffusionParameters::default()
        .with_nx(nx)
        .with_t_final(t_final)
        .with_dt(dt)
}

/// Solve with the explicit solver and the default configuration
pub fn solve_with(
    parameters: DiffusionParameters,
    initial: Box<dyn InitialCondition>,
    boundary: DirichletBoundary,
) -> SimulationResult {
    let scenario = Scenario::new(parameters, initial, boundary);
    ExplicitFdmSolver::new()
        .solve(&scenario, &SolverConfiguration::default())
        .expect("solve should succeed")
}

/// Assert that two rows are close element by element
pub fn assert_rows_close(
    row1: ArrayView1<'_, f64>,
    row2: ArrayView1<'_, f64>,
    tolerance: f64,
    message: &str,
) {
    assert_eq!(row1.len(), row2.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in row1.iter().zip(row2.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Maximum absolute difference between a row and a reference function of x
pub fn max_error_against<F>(result: &SimulationResult, step: usize, reference: F) -> f64
where
    F: Fn(f64) -> f64,
{
    result
        .spatial_axis
        .as_slice()
        .iter()
        .zip(result.row(step).iter())
        .map(|(&x, &value)| (value - reference(x)).abs())
        .fold(0.0, f64::max)
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
