//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so
//! adding a format means adding a file without touching existing ones.
//!
//! # Available formats
//!
//! | Format  | Module   |
//! |---------|----------|
//! | CSV     | [`csv`]  |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use heat1d::prelude::*;
//! use heat1d::output::export::{CsvExporter, Exporter};
//! use std::path::Path;
//!
//! # fn main() -> heat1d::Result<()> {
//! let scenario = Scenario::with_profile(DiffusionParameters::default(), InitialProfile::SinPi);
//! let result = ExplicitFdmSolver::new().solve(&scenario, &SolverConfiguration::default())?;
//!
//! let exporter = CsvExporter::default();
//!
//! // Full export (all time rows)
//! exporter.export_grid(&result, None, Path::new("heat.csv"))?;
//!
//! // Downsampled export to 500 rows
//! exporter.export_grid(&result, Some(500), Path::new("heat_light.csv"))?;
//!
//! // Temperature profile at the final time
//! exporter.export_final_profile(&result, Path::new("final.csv"))?;
//! # Ok(())
//! # }
//! ```

pub mod csv;

pub use csv::{export_temperature_csv, CsvConfig, CsvExporter, CsvMetadata};

use std::path::Path;

use crate::solver::SimulationResult;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can react precisely without boxing.
///
/// # Parameter `n_rows`
///
/// - `None`: exports all time rows (default behaviour)
/// - `Some(n)`: uniformly downsamples to `n` rows, always including the
///   **first and last** rows (initial profile and final state)
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports the space-time temperature grid.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - the grid contains NaN or Inf
    fn export_grid(
        &self,
        result: &SimulationResult,
        n_rows: Option<usize>,
        path: &Path,
    ) -> Result<(), Self::Error>;

    /// Exports the temperature profile of the last time row.
    fn export_final_profile(&self, result: &SimulationResult, path: &Path) -> Result<(), Self::Error>;
}

/// Row indices for a uniform downsampling of `nt` rows to `n` rows
///
/// The first (0) and last (nt - 1) rows are always kept. Requests of at
/// least `nt` rows return every row; requests below 2 are raised to 2.
///
/// ```rust
/// use heat1d::output::export::downsample_indices;
///
/// assert_eq!(downsample_indices(11, 3), vec![0, 5, 10]);
/// assert_eq!(downsample_indices(4, 10), vec![0, 1, 2, 3]);
/// ```
pub fn downsample_indices(nt: usize, n: usize) -> Vec<usize> {
    if nt == 0 {
        return Vec::new();
    }
    if n >= nt || nt == 1 {
        return (0..nt).collect();
    }

    let n = n.max(2);
    let last = nt - 1;
    let mut indices: Vec<usize> = (0..n)
        .map(|k| ((k * last) as f64 / (n - 1) as f64).round() as usize)
        .collect();
    indices.dedup();
    indices
}
