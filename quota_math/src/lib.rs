//! # Quota Math
//!
//! Numeric building blocks shared by the quota forecasting models.
//! This crate provides the least-squares line fit used by every trend-based
//! model, plus the smoothing and moving average primitives.

use thiserror::Error;

pub mod moving_averages;
pub mod regression;

pub use regression::{fit_indexed, fit_line, LinearFit};

/// Errors that can occur in forecasting math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Values closer to zero than this are treated as zero divisors.
pub const EPSILON: f64 = 1e-12;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_counts() {
        let err = MathError::InsufficientData { needed: 2, got: 1 };
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: need at least 2, got 1"
        );
    }
}
