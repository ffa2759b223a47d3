//! 1D Transient Heat Conduction
//!
//! ∂T/∂t = alpha·∂²T/∂x²,  T(0, t) = T(L, t) = 0
//!
//! Asks for one of three initial profiles on stdin, solves with the
//! explicit FDM stepper and writes:
//! - temperature profiles at five times
//! - a space × time heatmap
//! - a 3D surface
//! - the full grid as CSV
//!
//! Run with `cargo run --release --example heat_conduction`.
//! An invalid or empty choice falls back to sin(pi * x).

use heat1d::{
    output::export::{CsvConfig, CsvExporter, Exporter},
    output::visualization::{plot_heatmap, plot_profiles, plot_surface, PlotConfig},
    physics::{DiffusionParameters, InitialProfile, SelectionPolicy},
    solver::{ExplicitFdmSolver, Scenario, Solver, SolverConfiguration},
};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::Instant;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== 1D Transient Heat Conduction (explicit FDM) ===\n");

    // ====== Initial condition ======

    println!("Choose an initial condition:");
    for profile in InitialProfile::ALL {
        println!("  {}", profile);
    }
    print!("Enter the number of your choice: ");
    io::stdout().flush()?;

    let mut token = String::new();
    io::stdin().lock().read_line(&mut token)?;

    let selection = InitialProfile::from_selection(&token, SelectionPolicy::FallbackToDefault)?;
    if selection.fell_back {
        println!("Invalid choice, using the default: {}", selection.profile.label());
    }

    // ====== Scenario ======

    let params = DiffusionParameters::default();
    println!("\nParameters:");
    println!("  L       = {} m", params.length);
    println!("  alpha   = {} m²/s", params.alpha);
    println!("  Nx      = {} (dx = {:.6} m)", params.nx, params.dx());
    println!("  T_final = {} s", params.t_final);
    println!("  dt      = {} s (Nt = {})", params.dt, params.nt());
    println!("  r       = {:.5}", params.stability_number());

    let scenario = Scenario::with_profile(params, selection.profile);

    // ====== Solve ======

    let start = Instant::now();
    let result = ExplicitFdmSolver::new().solve(&scenario, &SolverConfiguration::default())?;
    println!("\nSolved {} x {} grid in {:.2?}", result.nt(), result.nx(), start.elapsed());

    if let Some(warning) = result.stability_warning() {
        println!("Warning: {}", warning);
    }

    let last = result.nt() - 1;
    println!(
        "Max |T|: {:.6} at t = 0, {:.6} at t = {:.4} s",
        result.max_amplitude(0),
        result.max_amplitude(last),
        result.temporal_axis.final_time()
    );

    // ====== Output ======

    let out_dir = std::env::temp_dir().join("heat1d");
    std::fs::create_dir_all(&out_dir)?;
    let label = selection.profile.label();

    plot_profiles(
        &result,
        5,
        out_dir.join("profiles.png"),
        Some(&PlotConfig::profiles(format!("Temperature profiles: {}", label))),
    )?;
    plot_heatmap(
        &result,
        out_dir.join("heatmap.png"),
        Some(&PlotConfig::heatmap(format!("Temperature distribution: {}", label))),
    )?;
    plot_surface(
        &result,
        out_dir.join("surface.png"),
        Some(&PlotConfig::surface(format!("Temperature surface: {}", label))),
    )?;

    let exporter = CsvExporter::new(CsvConfig::default().with_result_metadata());
    exporter.export_grid(&result, Some(500), &out_dir.join("temperature.csv"))?;

    println!("\nOutputs written to {}", out_dir.display());

    Ok(())
}
