//! Classical seasonal decomposition with a linear trend
//!
//! A centered moving average estimates the level, the ratio of each observation
//! to it gives a raw seasonal factor, and the factors averaged per phase become
//! the seasonal index. A straight line fitted to the deseasonalized series then
//! carries the trend forward.

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{
    require_observations, validate_period, ForecastModel, TrainedForecastModel, DEFAULT_PERIOD,
};
use quota_math::moving_averages::centered_moving_average;
use quota_math::{fit_line, LinearFit, EPSILON};
use tracing::{debug, error};

const MODEL: &str = "seasonal decomposition";

/// Multiplicative seasonal decomposition model
#[derive(Debug, Clone)]
pub struct SeasonalDecomposition {
    name: String,
    period: usize,
}

/// Trained seasonal decomposition model
#[derive(Debug, Clone)]
pub struct TrainedSeasonalDecomposition {
    name: String,
    seasonal: Vec<f64>,
    trend: LinearFit,
    observations: usize,
}

impl SeasonalDecomposition {
    /// Create a new decomposition model for the given cycle length
    pub fn new(period: usize) -> Result<Self> {
        validate_period(period)?;

        Ok(Self {
            name: format!("Seasonal Decomposition (period={})", period),
            period,
        })
    }

    /// Length of the seasonal cycle
    pub fn period(&self) -> usize {
        self.period
    }

    fn seasonal_indices(&self, values: &[f64]) -> Result<Vec<f64>> {
        let averages = centered_moving_average(values, self.period)
            .map_err(|e| ForecastError::from_math(MODEL, e))?;

        let mut sums = vec![0.0; self.period];
        let mut counts = vec![0usize; self.period];
        for (i, (&value, average)) in values.iter().zip(&averages).enumerate() {
            // Ratios against a zero level are undefined and left out
            if let Some(average) = (*average).filter(|a| *a > EPSILON) {
                sums[i % self.period] += value / average;
                counts[i % self.period] += 1;
            }
        }

        let raw: Vec<f64> = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| if count > 0 { sum / count as f64 } else { 1.0 })
            .collect();

        let mean = raw.iter().sum::<f64>() / self.period as f64;
        if !mean.is_finite() || mean < EPSILON {
            error!(mean, "Seasonal ratios collapsed to zero");
            return Err(ForecastError::NumericDegeneracy(format!(
                "{} seasonal indices cannot be normalized (mean={})",
                MODEL, mean
            )));
        }

        Ok(raw.iter().map(|r| r / mean).collect())
    }
}

impl Default for SeasonalDecomposition {
    fn default() -> Self {
        Self {
            name: format!("Seasonal Decomposition (period={})", DEFAULT_PERIOD),
            period: DEFAULT_PERIOD,
        }
    }
}

impl ForecastModel for SeasonalDecomposition {
    type Trained = TrainedSeasonalDecomposition;

    fn train(&self, series: &TimeSeries) -> Result<Self::Trained> {
        require_observations(MODEL, series, self.period)?;

        let values = series.values();
        let seasonal = self.seasonal_indices(&values)?;

        let deseasonalized: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .filter_map(|(i, &y)| {
                let index = seasonal[i % self.period];
                (index > EPSILON).then(|| (i as f64, y / index))
            })
            .collect();

        // Every phase is observed at least once and the indices average 1, so at
        // least one point survives. A lone point carries a level but no slope.
        let trend = match deseasonalized.as_slice() {
            [(_, level)] => LinearFit {
                slope: 0.0,
                intercept: *level,
            },
            points => fit_line(points).map_err(|e| ForecastError::from_math(MODEL, e))?,
        };

        debug!(
            slope = trend.slope,
            intercept = trend.intercept,
            ?seasonal,
            "Fitted seasonal decomposition"
        );

        Ok(TrainedSeasonalDecomposition {
            name: self.name.clone(),
            seasonal,
            trend,
            observations: values.len(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedSeasonalDecomposition {
    /// Seasonal index per phase, averaging to 1
    pub fn seasonal_indices(&self) -> &[f64] {
        &self.seasonal
    }

    /// Line fitted to the deseasonalized series
    pub fn trend(&self) -> LinearFit {
        self.trend
    }
}

impl TrainedForecastModel for TrainedSeasonalDecomposition {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        let period = self.seasonal.len();
        let values = (1..=horizon)
            .map(|step| {
                let t = self.observations + step;
                let index = self.seasonal[(t - 1) % period];
                (self.trend.value_at(t as f64) * index).max(0.0)
            })
            .collect();

        Ok(values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
