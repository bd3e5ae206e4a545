//! Linear trend model for usage forecasting

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{require_observations, ForecastModel, TrainedForecastModel};
use quota_math::{fit_indexed, LinearFit, MathError};
use tracing::debug;

const MODEL: &str = "linear regression";

/// Least-squares linear trend over day index
#[derive(Debug, Clone)]
pub struct LinearRegression {
    /// Name of the model
    name: String,
}

/// Trained linear trend model
#[derive(Debug, Clone)]
pub struct TrainedLinearRegression {
    /// Name of the model
    name: String,
    /// Fitted line, absent when a single observation was supplied
    fit: Option<LinearFit>,
    /// Number of observations the line was fitted on
    observations: usize,
    /// Last observed value
    last_value: f64,
}

impl LinearRegression {
    /// Create a new linear trend model
    pub fn new() -> Self {
        Self {
            name: "Linear Regression".to_string(),
        }
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearRegression {
    type Trained = TrainedLinearRegression;

    fn train(&self, series: &TimeSeries) -> Result<Self::Trained> {
        require_observations(MODEL, series, 1)?;

        let values = series.values();
        let last_value = values[values.len() - 1];

        let fit = match fit_indexed(&values, 0) {
            Ok(fit) => Some(fit),
            Err(MathError::InsufficientData { got, .. }) => {
                debug!(observations = got, "Too few points for a trend, projecting last value");
                None
            }
            Err(e) => return Err(ForecastError::from_math(MODEL, e)),
        };

        if let Some(fit) = fit {
            debug!(slope = fit.slope, intercept = fit.intercept, "Fitted linear trend");
        }

        Ok(TrainedLinearRegression {
            name: self.name.clone(),
            fit,
            observations: values.len(),
            last_value,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedLinearRegression {
    /// Fitted slope, if a trend could be estimated
    pub fn slope(&self) -> Option<f64> {
        self.fit.map(|f| f.slope)
    }

    /// Fitted intercept, if a trend could be estimated
    pub fn intercept(&self) -> Option<f64> {
        self.fit.map(|f| f.intercept)
    }
}

impl TrainedForecastModel for TrainedLinearRegression {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        let values = match self.fit {
            Some(fit) => (1..=horizon)
                .map(|step| fit.value_at((self.observations - 1 + step) as f64).max(0.0))
                .collect(),
            None => vec![self.last_value.max(0.0); horizon],
        };

        Ok(values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
