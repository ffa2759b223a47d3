//! CSV export of temperature grids
//!
//! Exports a [`SimulationResult`] to CSV (Comma-Separated Values), readable
//! by spreadsheets, Python pandas, MATLAB and most data analysis tools.
//!
//! # Layout
//!
//! One line per time row. The first column is the time, followed by one
//! column per spatial position:
//!
//! ```csv
//! time,x=0.000000,x=0.250000,x=0.500000,x=0.750000,x=1.000000
//! 0.000000,0.000000,0.707107,1.000000,0.707107,0.000000
//! 0.001000,0.000000,0.707065,0.999941,0.707065,0.000000
//! ...
//! ```
//!
//! # With Metadata
//!
//! ```csv
//! # 1D Heat Conduction Simulation Data
//! # Generated: 2026-10-19T15:30:00+00:00
//! # Initial Condition: sin(pi * x)
//! # Solver: Explicit FDM
//! # Length: 1 m
//! # Alpha: 0.01 m²/s
//! # Nx: 100
//! # Nt: 10000
//! # dt: 0.001 s
//! # r: 0.09801
//! #
//! time,x=0.000000,...
//! ```
//!
//! # Example
//!
//! ```rust
//! use heat1d::prelude::*;
//! use heat1d::output::export::{CsvConfig, CsvExporter, Exporter};
//!
//! # fn main() -> heat1d::Result<()> {
//! let params = DiffusionParameters::default().with_nx(11).with_t_final(0.01);
//! let scenario = Scenario::with_profile(params, InitialProfile::SinPi);
//! let result = ExplicitFdmSolver::new().solve(&scenario, &SolverConfiguration::default())?;
//!
//! let dir = std::env::temp_dir();
//! let exporter = CsvExporter::new(CsvConfig::default().precision(4));
//! exporter.export_grid(&result, Some(3), &dir.join("heat1d_doc.csv"))?;
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{HeatError, Result};
use crate::output::export::{downsample_indices, Exporter};
use crate::solver::SimulationResult;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Number of decimal places (default: 6)
/// - `include_metadata`: Add header comments with simulation info
/// - `metadata`: Simulation metadata to include
/// - `time_header`: Header of the time column (default: "time")
///
/// # Example
///
/// ```rust
/// use heat1d::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header. When `include_metadata` is set and this
    /// is `None`, metadata is derived from the result.
    pub metadata: Option<CsvMetadata>,

    /// Header for the time column (default: "time")
    pub time_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "time".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata derived from the result
    pub fn with_result_metadata(mut self) -> Self {
        self.include_metadata = true;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.delimiter == self.decimal_separator {
            return Err(HeatError::Export(format!(
                "delimiter and decimal separator are both '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Initial condition label (e.g. "sin(pi * x)")
    pub initial_condition: Option<String>,

    /// Solver name (e.g. "Explicit FDM")
    pub solver_name: Option<String>,

    /// Rod length L (m)
    pub length: Option<f64>,

    /// Thermal diffusivity alpha (m²/s)
    pub alpha: Option<f64>,

    /// Number of spatial points
    pub nx: Option<usize>,

    /// Number of time rows
    pub nt: Option<usize>,

    /// Time step (s)
    pub dt: Option<f64>,

    /// Stability number r = alpha dt / dx²
    pub stability_number: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata from a finished simulation
    pub fn from_result(result: &SimulationResult) -> Self {
        let parse = |key: &str| result.metadata.get(key).and_then(|v| v.parse::<f64>().ok());

        Self {
            initial_condition: result.metadata.get("initial condition").cloned(),
            solver_name: result.metadata.get("solver").cloned(),
            length: Some(result.spatial_axis.length()),
            alpha: parse("alpha"),
            nx: Some(result.nx()),
            nt: Some(result.nt()),
            dt: Some(result.temporal_axis.dt()),
            stability_number: Some(result.stability_number),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> Result<()> {
    writeln!(out, "# 1D Heat Conduction Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(profile) = &metadata.initial_condition {
        writeln!(out, "# Initial Condition: {}", profile)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some(length) = metadata.length {
        writeln!(out, "# Length: {} m", length)?;
    }
    if let Some(alpha) = metadata.alpha {
        writeln!(out, "# Alpha: {} m²/s", alpha)?;
    }
    if let Some(nx) = metadata.nx {
        writeln!(out, "# Nx: {}", nx)?;
    }
    if let Some(nt) = metadata.nt {
        writeln!(out, "# Nt: {}", nt)?;
    }
    if let Some(dt) = metadata.dt {
        writeln!(out, "# dt: {} s", dt)?;
    }
    if let Some(r) = metadata.stability_number {
        writeln!(out, "# r: {}", r)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;

    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    fn write_header_block<W: Write>(&self, out: &mut W, result: &SimulationResult) -> Result<()> {
        if self.config.include_metadata {
            match &self.config.metadata {
                Some(metadata) => write_metadata_header(out, metadata)?,
                None => write_metadata_header(out, &CsvMetadata::from_result(result))?,
            }
        }
        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = HeatError;

    fn export_grid(
        &self,
        result: &SimulationResult,
        n_rows: Option<usize>,
        path: &Path,
    ) -> Result<()> {
        // ============================= Validation =============================

        self.config.validate()?;

        if let Some(position) = result.grid.as_slice().iter().position(|v| !v.is_finite()) {
            let nx = result.nx();
            return Err(HeatError::Export(format!(
                "NaN or Inf in grid at step {}, index {}",
                position / nx,
                position % nx
            )));
        }

        let rows = match n_rows {
            Some(n) => downsample_indices(result.nt(), n),
            None => (0..result.nt()).collect(),
        };

        // ============================= Write ==================================

        let config = &self.config;
        let mut out = BufWriter::new(File::create(path)?);

        self.write_header_block(&mut out, result)?;

        write!(out, "{}", config.time_header)?;
        for &x in result.spatial_axis.as_slice() {
            write!(out, "{}x={}", config.delimiter, format_number(x, config))?;
        }
        writeln!(out)?;

        let times = result.temporal_axis.times();
        for &n in &rows {
            write!(out, "{}", format_number(times[n], config))?;
            for &value in result.row(n) {
                write!(out, "{}{}", config.delimiter, format_number(value, config))?;
            }
            writeln!(out)?;
        }

        out.flush()?;

        log::info!("Exported {} of {} rows to {}", rows.len(), result.nt(), path.display());

        Ok(())
    }

    fn export_final_profile(&self, result: &SimulationResult, path: &Path) -> Result<()> {
        self.config.validate()?;

        let final_row = result.final_row();
        if let Some(index) = final_row.iter().position(|v| !v.is_finite()) {
            return Err(HeatError::Export(format!("NaN or Inf in final row at index {}", index)));
        }

        let config = &self.config;
        let mut out = BufWriter::new(File::create(path)?);

        self.write_header_block(&mut out, result)?;

        writeln!(out, "x{}temperature", config.delimiter)?;
        for (&x, &value) in result.spatial_axis.as_slice().iter().zip(final_row.iter()) {
            writeln!(
                out,
                "{}{}{}",
                format_number(x, config),
                config.delimiter,
                format_number(value, config)
            )?;
        }

        out.flush()?;
        Ok(())
    }
}

/// Export the full temperature grid to CSV
///
/// Shorthand for `CsvExporter` with an optional configuration.
pub fn export_temperature_csv(
    result: &SimulationResult,
    path: impl AsRef<Path>,
    config: Option<&CsvConfig>,
) -> Result<()> {
    let exporter = CsvExporter::new(config.cloned().unwrap_or_default());
    exporter.export_grid(result, None, path.as_ref())
}

// =================================================================================================
// Tests
// =================================================================================================
