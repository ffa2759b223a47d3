//! Visualization module for heat conduction results
//!
//! This module provides tools to visualize simulation results using the `plotters` library.
//! The backend is chosen by file extension: `.svg` renders SVG, anything
//! else renders a bitmap (PNG).
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`, `Colormap`)
//! - **profiles**: T(x) lines at selected times
//! - **heatmap**: color-mapped space × time grid
//! - **surface**: 3D surface T(x, t)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use heat1d::prelude::*;
//! use heat1d::output::visualization::{plot_heatmap, plot_profiles, plot_surface, PlotConfig};
//!
//! # fn main() -> heat1d::Result<()> {
//! let scenario = Scenario::with_profile(DiffusionParameters::default(), InitialProfile::SinPi);
//! let result = ExplicitFdmSolver::new().solve(&scenario, &SolverConfiguration::default())?;
//!
//! plot_profiles(&result, 5, "profiles.png", None)?;
//! plot_heatmap(&result, "heatmap.png", None)?;
//! plot_surface(&result, "surface.svg", Some(&PlotConfig::surface("T(x, t)")))?;
//! # Ok(())
//! # }
//! ```
//!
//! # When to Use Which Module
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Profiles at a few times | `profiles` | `plot_profiles` |
//! | Profiles at chosen rows | `profiles` | `plot_rows` |
//! | Whole field, flat | `heatmap` | `plot_heatmap` |
//! | Whole field, 3D | `surface` | `plot_surface` |

pub mod config;
pub mod heatmap;
pub mod profiles;
pub mod surface;

pub use config::{Colormap, IntoOptionalTitle, PlotConfig, NO_TITLE};
pub use heatmap::plot_heatmap;
pub use profiles::{plot_profiles, plot_rows};
pub use surface::plot_surface;

use std::ops::Range;
use std::path::Path;

/// Drawing backend selected from the output path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BackendKind {
    Svg,
    Bitmap,
}

impl BackendKind {
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => BackendKind::Svg,
            _ => BackendKind::Bitmap,
        }
    }
}

/// Value range with 5% headroom on both sides
///
/// A flat range is widened so the chart still has a height; a non-finite
/// range (empty or all-NaN data) falls back to [-1, 1].
pub(crate) fn padded_range(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return -1.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 {
        0.05 * span
    } else {
        (0.05 * max.abs()).max(0.5)
    };
    (min - pad)..(max + pad)
}
