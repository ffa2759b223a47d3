//! Output module for simulation results
//!
//! Read-only consumers of a finished [`SimulationResult`](crate::solver::SimulationResult):
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! Nothing here changes the computed temperatures.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── config.rs
//! │   ├── profiles.rs
//! │   ├── heatmap.rs
//! │   └── surface.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```

pub mod export;
pub mod visualization;

pub use export::{export_temperature_csv, CsvConfig, CsvExporter, Exporter};
pub use visualization::{plot_heatmap, plot_profiles, plot_surface, PlotConfig};
