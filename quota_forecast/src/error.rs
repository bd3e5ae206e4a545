//! Error types for the quota_forecast crate

use quota_math::MathError;
use thiserror::Error;

/// Custom error types for the quota_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Caller-supplied configuration violates a documented constraint
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The chosen model needs more observations than were supplied
    #[error("Insufficient data for {model}: need at least {needed} observations, got {got}")]
    InsufficientData {
        model: &'static str,
        needed: usize,
        got: usize,
    },

    /// A computation divided by zero or produced a non-finite value
    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    /// Error from a malformed configuration document
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reported by the upstream catch history source
    #[error("Catch history error: {0}")]
    SourceError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl ForecastError {
    /// Attach a model name to a math-level error
    pub(crate) fn from_math(model: &'static str, err: MathError) -> Self {
        match err {
            MathError::InsufficientData { needed, got } => {
                ForecastError::InsufficientData { model, needed, got }
            }
            MathError::InvalidInput(msg) => ForecastError::InvalidParameter(msg),
            MathError::CalculationError(msg) => {
                tracing::error!(model, "Numeric degeneracy: {}", msg);
                ForecastError::NumericDegeneracy(format!("{}: {}", model, msg))
            }
        }
    }
}

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        ForecastError::from_math("forecast", err)
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}
