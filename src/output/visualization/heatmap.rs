//! Space × time heatmap
//!
//! Colors every grid cell by its temperature: position on the x axis, time
//! on the y axis, with a colorbar on the right.
//!
//! Long runs are downsampled in time to `PlotConfig::max_rows` rows (first
//! and last rows always kept) before drawing.

use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

use super::config::{Colormap, PlotConfig, NO_TITLE};
use super::{padded_range, BackendKind};
use crate::error::{HeatError, Result};
use crate::output::export::downsample_indices;
use crate::solver::SimulationResult;

/// Width of the colorbar area in pixels
const COLORBAR_WIDTH: u32 = 130;

/// Number of bands drawn in the colorbar
const COLORBAR_STEPS: usize = 128;

/// One heatmap cell: x extent, t extent, temperature
struct Cell {
    x: Range<f64>,
    t: Range<f64>,
    value: f64,
}

/// Plot the temperature field as a color-mapped image
///
/// # Example
///
/// ```rust,no_run
/// use heat1d::prelude::*;
/// use heat1d::output::visualization::{plot_heatmap, PlotConfig};
///
/// # fn main() -> heat1d::Result<()> {
/// let scenario = Scenario::with_profile(DiffusionParameters::default(), InitialProfile::Sin2Pi);
/// let result = ExplicitFdmSolver::new().solve(&scenario, &SolverConfiguration::default())?;
///
/// plot_heatmap(&result, "heatmap.png", Some(&PlotConfig::heatmap("sin(2pi * x)")))?;
/// # Ok(())
/// # }
/// ```
pub fn plot_heatmap(
    result: &SimulationResult,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let default_config = PlotConfig::heatmap(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    if config.width <= COLORBAR_WIDTH {
        return Err(HeatError::Plot(format!(
            "heatmap width must exceed {} pixels",
            COLORBAR_WIDTH
        )));
    }

    // ====== Cells ======

    let cells = heatmap_cells(result, config.max_rows, config.max_columns);
    let half_dx = 0.5 * result.spatial_axis.dx();
    let dt = result.temporal_axis.dt();

    let (v_min, v_max) = result.grid.value_range();
    let values = padded_range(v_min, v_max);
    let x_range = -half_dx..(result.spatial_axis.length() + half_dx);
    let t_range = 0.0..(result.temporal_axis.final_time() + dt);

    // ====== Draw ======

    let path = output_path.as_ref();
    let drawn = match BackendKind::from_path(path) {
        BackendKind::Svg => {
            let backend = SVGBackend::new(path, (config.width, config.height));
            plot_heatmap_impl(backend, &cells, config, x_range, t_range, values)
        }
        BackendKind::Bitmap => {
            let backend = BitMapBackend::new(path, (config.width, config.height));
            plot_heatmap_impl(backend, &cells, config, x_range, t_range, values)
        }
    };

    drawn.map_err(HeatError::plot)?;
    log::debug!("Heatmap of {} cells written to {}", cells.len(), path.display());
    Ok(())
}

/// Cells of the downsampled grid
///
/// Rows are reduced to `max_rows` and columns to `max_columns` (first and
/// last kept on both axes). Each cell extends halfway to its neighbouring
/// kept position, and half a spatial step past the domain ends, so the
/// cells tile the plot without gaps.
fn heatmap_cells(result: &SimulationResult, max_rows: usize, max_columns: usize) -> Vec<Cell> {
    let x = result.spatial_axis.as_slice();
    let times = result.temporal_axis.as_slice();
    let half_dx = 0.5 * result.spatial_axis.dx();
    let dt = result.temporal_axis.dt();

    let rows = downsample_indices(result.nt(), max_rows);
    let columns = downsample_indices(result.nx(), max_columns);

    let edges: Vec<Range<f64>> = columns
        .iter()
        .enumerate()
        .map(|(k, &i)| {
            let left = match k {
                0 => x[i] - half_dx,
                _ => 0.5 * (x[columns[k - 1]] + x[i]),
            };
            let right = columns
                .get(k + 1)
                .map_or(x[i] + half_dx, |&next| 0.5 * (x[i] + x[next]));
            left..right
        })
        .collect();

    let mut cells = Vec::with_capacity(rows.len() * columns.len());
    for (k, &n) in rows.iter().enumerate() {
        let t_start = times[n];
        let t_end = rows.get(k + 1).map_or(t_start + dt, |&next| times[next]);
        let row = result.row(n);

        for (edge, &i) in edges.iter().zip(&columns) {
            cells.push(Cell {
                x: edge.clone(),
                t: t_start..t_end,
                value: row[i],
            });
        }
    }
    cells
}

/// Implementation for heatmap plotting with concrete backend
fn plot_heatmap_impl<DB: DrawingBackend>(
    backend: DB,
    cells: &[Cell],
    config: &PlotConfig,
    x_range: Range<f64>,
    t_range: Range<f64>,
    values: Range<f64>,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (main_area, bar_area) = root.split_horizontally(config.width - COLORBAR_WIDTH);
    let colormap = config.colormap;

    // ====== Heatmap ======

    let mut chart = ChartBuilder::on(&main_area)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, t_range)?;

    let x_format = |x: &f64| format!("{:.2}", x);
    let t_format = |t: &f64| format!("{:.2}", t);

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&x_format)
        .y_label_formatter(&t_format)
        .draw()?;

    chart.draw_series(cells.iter().map(|cell| {
        let color = colormap.color_in_range(cell.value, values.start, values.end);
        Rectangle::new(
            [(cell.x.start, cell.t.start), (cell.x.end, cell.t.end)],
            color.filled(),
        )
    }))?;

    // ====== Colorbar ======

    draw_colorbar(&bar_area, colormap, values)?;

    root.present()?;

    Ok(())
}

/// Vertical colorbar spanning `values`
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    colormap: Colormap,
    values: Range<f64>,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let mut bar = ChartBuilder::on(area)
        .margin_top(70)
        .margin_bottom(60)
        .margin_right(15)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, values.clone())?;

    let v_format = |v: &f64| format!("{:.3}", v);

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_label_formatter(&v_format)
        .draw()?;

    let step = (values.end - values.start) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let low = values.start + k as f64 * step;
        let color = colormap.color_in_range(low + 0.5 * step, values.start, values.end);
        Rectangle::new([(0.0, low), (1.0, low + step)], color.filled())
    }))?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
