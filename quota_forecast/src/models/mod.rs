//! Forecasting models for daily usage series
//!
//! Each model follows the same two-step shape: a configured model is trained on
//! a [`TimeSeries`] and the trained model projects a number of future days. The
//! projections are raw model output; bounding to the quota happens in the
//! facade.

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use std::fmt::Debug;

pub mod change_point;
pub mod exponential_smoothing;
pub mod holt_winters;
pub mod linear_regression;
pub mod moving_average;
pub mod seasonal_decomposition;

/// Default length of the seasonal cycle (one week of daily data)
pub const DEFAULT_PERIOD: usize = 7;

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Project usage for `horizon` days after the last observation
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a usage series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a usage series
    fn train(&self, series: &TimeSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Check that a smoothing factor lies in `(0, 1]`
pub(crate) fn validate_smoothing_factor(label: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ForecastError::InvalidParameter(format!(
            "{} must be in (0, 1], got {}",
            label, value
        )))
    }
}

/// Check that a seasonal period is at least 2
pub(crate) fn validate_period(period: usize) -> Result<()> {
    if period < 2 {
        return Err(ForecastError::InvalidParameter(format!(
            "Seasonal period must be at least 2, got {}",
            period
        )));
    }
    Ok(())
}

/// Fail with `InsufficientData` unless the series holds `needed` observations
pub(crate) fn require_observations(
    model: &'static str,
    series: &TimeSeries,
    needed: usize,
) -> Result<()> {
    if series.len() < needed {
        return Err(ForecastError::InsufficientData {
            model,
            needed,
            got: series.len(),
        });
    }
    Ok(())
}
