//! Moving average model for usage forecasting

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{require_observations, ForecastModel, TrainedForecastModel};
use quota_math::moving_averages::trailing_mean;

const MODEL: &str = "moving average";

/// Default number of trailing days averaged
pub const DEFAULT_WINDOW: usize = 7;

/// Simple Moving Average model
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
}

/// Trained Simple Moving Average model
#[derive(Debug, Clone)]
pub struct TrainedMovingAverage {
    /// Name of the model
    name: String,
    /// Number of observations actually averaged
    effective_window: usize,
    /// Mean of the trailing window
    average: f64,
}

impl MovingAverage {
    /// Create a new Simple Moving Average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Simple Moving Average (window={})", window),
            window,
        })
    }

    /// Configured window size
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            name: format!("Simple Moving Average (window={})", DEFAULT_WINDOW),
            window: DEFAULT_WINDOW,
        }
    }
}

impl ForecastModel for MovingAverage {
    type Trained = TrainedMovingAverage;

    fn train(&self, series: &TimeSeries) -> Result<Self::Trained> {
        require_observations(MODEL, series, 1)?;

        // Short series shrink the window rather than fail
        let average = trailing_mean(&series.values(), self.window)
            .map_err(|e| ForecastError::from_math(MODEL, e))?;

        Ok(TrainedMovingAverage {
            name: self.name.clone(),
            effective_window: self.window.min(series.len()),
            average,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedMovingAverage {
    /// Mean of the trailing window
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Number of observations the mean was taken over
    pub fn effective_window(&self) -> usize {
        self.effective_window
    }
}

impl TrainedForecastModel for TrainedMovingAverage {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        Ok(vec![self.average; horizon])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
