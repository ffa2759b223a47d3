//! 3D surface of the temperature field
//!
//! Renders T(x, t) as a colored surface over the space × time mesh. The grid
//! is downsampled to at most `PlotConfig::max_rows` time rows and
//! `PlotConfig::max_columns` positions (first and last kept on both axes).

use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

use super::config::{PlotConfig, NO_TITLE};
use super::{padded_range, BackendKind};
use crate::error::{HeatError, Result};
use crate::output::export::downsample_indices;
use crate::solver::SimulationResult;

/// Camera orientation
const YAW: f64 = 0.7;
const PITCH: f64 = 0.35;
const SCALE: f64 = 0.85;

/// Downsampled surface: positions, times, values[row][column]
struct SurfaceMesh {
    x: Vec<f64>,
    t: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl SurfaceMesh {
    fn from_result(result: &SimulationResult, max_rows: usize, max_columns: usize) -> Self {
        let columns = downsample_indices(result.nx(), max_columns);
        let rows = downsample_indices(result.nt(), max_rows);

        let positions = result.spatial_axis.as_slice();
        let times = result.temporal_axis.as_slice();

        Self {
            x: columns.iter().map(|&i| positions[i]).collect(),
            t: rows.iter().map(|&n| times[n]).collect(),
            values: rows
                .iter()
                .map(|&n| {
                    let row = result.row(n);
                    columns.iter().map(|&i| row[i]).collect()
                })
                .collect(),
        }
    }

    /// Quadrilaterals (four corners, mean temperature)
    fn quads(&self) -> Vec<([(f64, f64, f64); 4], f64)> {
        let mut quads = Vec::new();
        for n in 0..self.t.len().saturating_sub(1) {
            for i in 0..self.x.len().saturating_sub(1) {
                let corners = [
                    (self.x[i], self.values[n][i], self.t[n]),
                    (self.x[i + 1], self.values[n][i + 1], self.t[n]),
                    (self.x[i + 1], self.values[n + 1][i + 1], self.t[n + 1]),
                    (self.x[i], self.values[n + 1][i], self.t[n + 1]),
                ];
                let mean = corners.iter().map(|c| c.1).sum::<f64>() / 4.0;
                quads.push((corners, mean));
            }
        }
        quads
    }
}

/// Plot the temperature field as a 3D surface
///
/// Axes: position x, temperature (vertical), time t. With a single time row
/// there is no surface to draw and an error is returned.
///
/// # Example
///
/// ```rust,no_run
/// use heat1d::prelude::*;
/// use heat1d::output::visualization::plot_surface;
///
/// # fn main() -> heat1d::Result<()> {
/// let scenario = Scenario::with_profile(DiffusionParameters::default(), InitialProfile::Composite);
/// let result = ExplicitFdmSolver::new().solve(&scenario, &SolverConfiguration::default())?;
///
/// plot_surface(&result, "surface.png", None)?;
/// # Ok(())
/// # }
/// ```
pub fn plot_surface(
    result: &SimulationResult,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let default_config = PlotConfig::surface(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    if result.nt() < 2 {
        return Err(HeatError::Plot("surface plot needs at least 2 time rows".to_string()));
    }

    let mesh = SurfaceMesh::from_result(result, config.max_rows, config.max_columns);
    let (v_min, v_max) = result.grid.value_range();
    let values = padded_range(v_min, v_max);
    let x_range = 0.0..result.spatial_axis.length();
    let t_range = 0.0..result.temporal_axis.final_time();

    let path = output_path.as_ref();
    let drawn = match BackendKind::from_path(path) {
        BackendKind::Svg => {
            let backend = SVGBackend::new(path, (config.width, config.height));
            plot_surface_impl(backend, &mesh, config, x_range, values, t_range)
        }
        BackendKind::Bitmap => {
            let backend = BitMapBackend::new(path, (config.width, config.height));
            plot_surface_impl(backend, &mesh, config, x_range, values, t_range)
        }
    };

    drawn.map_err(HeatError::plot)?;
    log::debug!(
        "Surface of {} x {} cells written to {}",
        mesh.t.len().saturating_sub(1),
        mesh.x.len().saturating_sub(1),
        path.display()
    );
    Ok(())
}

/// Implementation for surface plotting with concrete backend
fn plot_surface_impl<DB: DrawingBackend>(
    backend: DB,
    mesh: &SurfaceMesh,
    config: &PlotConfig,
    x_range: Range<f64>,
    values: Range<f64>,
    t_range: Range<f64>,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (v_low, v_high) = (values.start, values.end);

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .build_cartesian_3d(x_range, values, t_range)?;

    chart.with_projection(|mut pb| {
        pb.yaw = YAW;
        pb.pitch = PITCH;
        pb.scale = SCALE;
        pb.into_matrix()
    });

    let mut axes = chart.configure_axes();
    if config.show_grid {
        axes.light_grid_style(BLACK.mix(0.15)).max_light_lines(3);
    }
    axes.draw()?;

    let colormap = config.colormap;
    chart.draw_series(mesh.quads().into_iter().map(|(corners, mean)| {
        let color = colormap.color_in_range(mean, v_low, v_high);
        Polygon::new(corners.to_vec(), color.mix(0.9).filled())
    }))?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
