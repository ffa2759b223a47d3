//! Temperature profile plotting
//!
//! Line plot of T(x) for a handful of time rows, one line per row, labelled
//! with its time.
//!
//! # Usage
//!
//! ```rust,no_run
//! use heat1d::prelude::*;
//! use heat1d::output::visualization::plot_profiles;
//!
//! # fn main() -> heat1d::Result<()> {
//! let scenario = Scenario::with_profile(DiffusionParameters::default(), InitialProfile::SinPi);
//! let result = ExplicitFdmSolver::new().solve(&scenario, &SolverConfiguration::default())?;
//!
//! // Rows 0, Nt/5, 2·Nt/5, ...
//! plot_profiles(&result, 5, "profiles.png", None)?;
//! # Ok(())
//! # }
//! ```

use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::config::{PlotConfig, NO_TITLE};
use super::{padded_range, BackendKind};
use crate::error::{HeatError, Result};
use crate::solver::SimulationResult;

/// One plotted line: label and (x, T) points
type Profile = (String, Vec<(f64, f64)>);

/// Plot temperature profiles at `n_snapshots` evenly spaced time rows
///
/// Rows are chosen with
/// [`SimulationResult::snapshot_indices`](crate::solver::SimulationResult::snapshot_indices)
/// and labelled `Time = {t:.4}s`.
///
/// # Arguments
///
/// * `result` - Completed simulation
/// * `n_snapshots` - Requested number of lines (at least 1)
/// * `output_path` - Path to save the plot (PNG or SVG)
/// * `config` - Optional plot configuration
pub fn plot_profiles(
    result: &SimulationResult,
    n_snapshots: usize,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let indices = result.snapshot_indices(n_snapshots.max(1));
    plot_rows(result, &indices, output_path, config)
}

/// Plot temperature profiles of explicit time rows
///
/// # Errors
///
/// - No rows, or a row index outside the grid
/// - Rendering or file errors
pub fn plot_rows(
    result: &SimulationResult,
    rows: &[usize],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    if rows.is_empty() {
        return Err(HeatError::Plot("no time rows to plot".to_string()));
    }
    if let Some(&bad) = rows.iter().find(|&&n| n >= result.nt()) {
        return Err(HeatError::Plot(format!(
            "time row {} outside grid of {} rows",
            bad,
            result.nt()
        )));
    }

    let default_config = PlotConfig::profiles(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let x = result.spatial_axis.as_slice();
    let times = result.temporal_axis.times();

    let profiles: Vec<Profile> = rows
        .iter()
        .map(|&n| {
            let points = x.iter().copied().zip(result.row(n).iter().copied()).collect();
            (format!("Time = {:.4}s", times[n]), points)
        })
        .collect();

    let (t_min, t_max) = profiles
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(_, t)| t))
        .filter(|t| t.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| (lo.min(t), hi.max(t)));
    let y_range = padded_range(t_min, t_max);
    let x_range = 0.0..result.spatial_axis.length();

    let path = output_path.as_ref();
    let drawn = match BackendKind::from_path(path) {
        BackendKind::Svg => {
            let backend = SVGBackend::new(path, (config.width, config.height));
            plot_profiles_impl(backend, &profiles, config, x_range, y_range)
        }
        BackendKind::Bitmap => {
            let backend = BitMapBackend::new(path, (config.width, config.height));
            plot_profiles_impl(backend, &profiles, config, x_range, y_range)
        }
    };

    drawn.map_err(HeatError::plot)?;
    log::debug!("Profile plot with {} lines written to {}", profiles.len(), path.display());
    Ok(())
}

/// Implementation for profile plotting with concrete backend
fn plot_profiles_impl<DB: DrawingBackend>(
    backend: DB,
    profiles: &[Profile],
    config: &PlotConfig,
    x_range: std::ops::Range<f64>,
    y_range: std::ops::Range<f64>,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    let x_format = |x: &f64| format!("{:.2}", x);
    let y_format = |y: &f64| format!("{:.3}", y);

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&x_format)
        .y_label_formatter(&y_format)
        .draw()?;

    for (index, (label, points)) in profiles.iter().enumerate() {
        let color = config.get_profile_color(index);

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
