//! Error types for the heat conduction solver.
//!
//! Every fallible operation of the crate returns [`Result<T>`], an alias for
//! `std::result::Result<T, HeatError>`. Parameter problems are reported
//! before any computation begins; numerical problems are reported with the
//! time step at which they were detected.

use thiserror::Error;

/// Errors that can occur while configuring, running or exporting a simulation.
#[derive(Error, Debug)]
pub enum HeatError {
    /// A physical or numerical parameter is outside its valid domain.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// An initial-condition selection token was rejected (strict policy only).
    #[error("Invalid initial-condition selection {token:?}: expected one of 1, 2 or 3")]
    InvalidSelection { token: String },

    /// Stability number exceeds the explicit-scheme limit and the
    /// configuration asked for rejection.
    #[error("Numerical instability: stability number r = {r:.4} exceeds 0.5")]
    NumericalInstability { r: f64 },

    /// NaN or Inf appeared in the temperature field.
    #[error("Non-finite temperature at step {step}, index {index}")]
    NonFiniteValue { step: usize, index: usize },

    /// The computation was cancelled through a [`CancellationFlag`](crate::solver::CancellationFlag).
    #[error("Simulation cancelled after {completed_rows} completed rows")]
    Cancelled { completed_rows: usize },

    /// Two pieces of data that must agree in length do not.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Exported data failed validation.
    #[error("Export failed: {0}")]
    Export(String),

    /// Plot rendering failed.
    #[error("Plotting failed: {0}")]
    Plot(String),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HeatError {
    /// Create an invalid-parameters error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameters(message.into())
    }

    /// Create a plotting error from any displayable backend error.
    pub fn plot(error: impl std::fmt::Display) -> Self {
        Self::Plot(error.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HeatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameters_message() {
        let err = HeatError::invalid("dt must be positive");
        assert_eq!(err.to_string(), "Invalid parameters: dt must be positive");
    }

    #[test]
    fn test_instability_message_shows_r() {
        let err = HeatError::NumericalInstability { r: 0.51 };
        assert!(err.to_string().contains("0.5100"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: HeatError = io.into();
        assert!(matches!(err, HeatError::Io(_)));
    }
}
