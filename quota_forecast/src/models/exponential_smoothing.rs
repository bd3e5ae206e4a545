//! Exponential smoothing model for usage forecasting

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{
    require_observations, validate_smoothing_factor, ForecastModel, TrainedForecastModel,
};
use quota_math::moving_averages::exponential_smooth;

const MODEL: &str = "exponential smoothing";

/// Default smoothing factor
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Simple exponential smoothing model
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    /// Name of the model
    name: String,
    /// Smoothing parameter
    alpha: f64,
}

/// Trained exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedExponentialSmoothing {
    /// Name of the model
    name: String,
    /// Final smoothed level
    level: f64,
}

impl ExponentialSmoothing {
    /// Create a new exponential smoothing model
    pub fn new(alpha: f64) -> Result<Self> {
        validate_smoothing_factor("Alpha", alpha)?;

        Ok(Self {
            name: format!("Exponential Smoothing (alpha={})", alpha),
            alpha,
        })
    }

    /// Smoothing parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self {
            name: format!("Exponential Smoothing (alpha={})", DEFAULT_ALPHA),
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl ForecastModel for ExponentialSmoothing {
    type Trained = TrainedExponentialSmoothing;

    fn train(&self, series: &TimeSeries) -> Result<Self::Trained> {
        require_observations(MODEL, series, 1)?;

        let level = exponential_smooth(&series.values(), self.alpha)
            .map_err(|e| ForecastError::from_math(MODEL, e))?;

        Ok(TrainedExponentialSmoothing {
            name: self.name.clone(),
            level,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedExponentialSmoothing {
    /// Current noise-damped run rate
    pub fn level(&self) -> f64 {
        self.level
    }
}

impl TrainedForecastModel for TrainedExponentialSmoothing {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        // Flat at the final smoothed level
        Ok(vec![self.level.max(0.0); horizon])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
