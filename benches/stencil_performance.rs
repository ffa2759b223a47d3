//! Performance benchmarks for the explicit stepper
//!
//! # What We're Measuring
//!
//! 1. **Row transform** (`stencil::step_row` vs `stencil::step_row_parallel`):
//!    - One three-point stencil per interior cell
//!    - Memory-bound for long rows
//!
//! 2. **Full solve** (`ExplicitFdmSolver`):
//!    - Nt rows × Nx points, plus allocation and NaN checks
//!
//! # Expected Results
//!
//! - Time ∝ Nx for the row transform
//! - Time ∝ Nx × Nt for the full solve
//! - The parallel sweep only pays off for long rows (see
//!   `solver::parallel_threshold`)
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Sequential only
//! cargo bench --bench stencil_performance
//!
//! # With the Rayon sweep
//! cargo bench --bench stencil_performance --features parallel
//!
//! # Only the row transform
//! cargo bench --bench stencil_performance "Row Transform"
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use heat1d::physics::{DiffusionParameters, InitialProfile};
use heat1d::solver::{stencil, ExplicitFdmSolver, Scenario, Solver, SolverConfiguration};
use ndarray::Array1;
use std::f64::consts::PI;
use std::hint::black_box;

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// Row transform, sequential vs data-parallel, for growing rows
///
/// Without the `parallel` feature both variants run the same sequential
/// sweep and should report the same time.
fn benchmark_row_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("Row Transform");

    for nx in [100, 1_000, 10_000, 100_000] {
        let previous = Array1::from_shape_fn(nx, |i| (PI * i as f64 / (nx - 1) as f64).sin());
        let mut next = previous.clone();

        group.throughput(Throughput::Elements(nx as u64));

        group.bench_with_input(BenchmarkId::new("sequential", nx), &nx, |b, _| {
            b.iter(|| stencil::step_row(black_box(previous.view()), next.view_mut(), black_box(0.25)));
        });

        group.bench_with_input(BenchmarkId::new("parallel", nx), &nx, |b, _| {
            b.iter(|| {
                stencil::step_row_parallel(black_box(previous.view()), next.view_mut(), black_box(0.25))
            });
        });
    }

    group.finish();
}

/// Full solve with growing grids at fixed r
///
/// dt is scaled with dx² so every configuration has the same stability
/// number and the same simulated time.
fn benchmark_full_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Explicit FDM Solve");
    group.sample_size(20);

    let config = SolverConfiguration::default();
    let solver = ExplicitFdmSolver::new();

    for nx in [50, 100, 200] {
        let dx = 1.0 / (nx - 1) as f64;
        let params = DiffusionParameters::default()
            .with_nx(nx)
            .with_t_final(1.0)
            .with_dt(0.25 * dx * dx / 0.01);
        let scenario = Scenario::with_profile(params, InitialProfile::Composite);

        group.throughput(Throughput::Elements((nx * params.nt()) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(nx), &scenario, |b, scenario| {
            b.iter(|| solver.solve(black_box(scenario), black_box(&config)).unwrap());
        });
    }

    group.finish();
}

// =================================================================================================
// Criterion Configuration
// =================================================================================================

criterion_group!(benches, benchmark_row_transform, benchmark_full_solve);
criterion_main!(benches);
