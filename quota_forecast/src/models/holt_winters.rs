//! Holt-Winters triple exponential smoothing
//!
//! Splits daily usage into a level `L`, a trend `T` and a multiplicative
//! seasonal index `C[p]` per phase of the cycle:
//!
//! ```text
//! L_i = alpha * (y_i / C_p) + (1 - alpha) * (L_{i-1} + T_{i-1})
//! T_i = beta * (L_i - L_{i-1}) + (1 - beta) * T_{i-1}
//! C_p = gamma * (y_i / L_i) + (1 - gamma) * C_p
//! ```
//!
//! The forecast for step `h` is `L + T*h + C[(n + h - 1) mod period]`, capped at
//! the configured ceiling. Strong trends extrapolate quickly, so this is the one
//! model that bounds its own output.

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{
    require_observations, validate_period, validate_smoothing_factor, ForecastModel,
    TrainedForecastModel, DEFAULT_PERIOD,
};
use quota_math::EPSILON;
use tracing::{debug, error};

const MODEL: &str = "Holt-Winters";

/// Default level smoothing factor
pub const DEFAULT_ALPHA: f64 = 0.3;
/// Default trend smoothing factor
pub const DEFAULT_BETA: f64 = 0.1;
/// Default seasonal smoothing factor
pub const DEFAULT_GAMMA: f64 = 0.1;

/// Holt-Winters model with multiplicative seasonality
#[derive(Debug, Clone)]
pub struct HoltWinters {
    name: String,
    alpha: f64,
    beta: f64,
    gamma: f64,
    period: usize,
    ceiling: Option<f64>,
}

/// Trained Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    name: String,
    level: f64,
    trend: f64,
    seasonal: Vec<f64>,
    observations: usize,
    ceiling: Option<f64>,
}

impl HoltWinters {
    /// Create a new Holt-Winters model
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        validate_smoothing_factor("Alpha", alpha)?;
        validate_smoothing_factor("Beta", beta)?;
        validate_smoothing_factor("Gamma", gamma)?;
        validate_period(period)?;

        Ok(Self {
            name: format!(
                "Holt-Winters (alpha={}, beta={}, gamma={}, period={})",
                alpha, beta, gamma, period
            ),
            alpha,
            beta,
            gamma,
            period,
            ceiling: None,
        })
    }

    /// Cap every projected value at `ceiling`
    pub fn with_ceiling(mut self, ceiling: f64) -> Result<Self> {
        if !ceiling.is_finite() || ceiling < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Forecast ceiling must be a non-negative number, got {}",
                ceiling
            )));
        }
        self.ceiling = Some(ceiling);
        Ok(self)
    }

    /// Length of the seasonal cycle
    pub fn period(&self) -> usize {
        self.period
    }

    /// Average same-phase observations over whole cycles, normalized to mean 1
    fn seed_seasonal(&self, values: &[f64]) -> Vec<f64> {
        let cycles = values.len() / self.period;
        let phase_means: Vec<f64> = (0..self.period)
            .map(|phase| {
                (0..cycles)
                    .map(|cycle| values[cycle * self.period + phase])
                    .sum::<f64>()
                    / cycles as f64
            })
            .collect();

        let overall = phase_means.iter().sum::<f64>() / self.period as f64;
        if overall < EPSILON {
            // No usage at all carries no seasonal shape
            return vec![1.0; self.period];
        }

        phase_means.iter().map(|m| m / overall).collect()
    }
}

impl Default for HoltWinters {
    fn default() -> Self {
        Self {
            name: format!(
                "Holt-Winters (alpha={}, beta={}, gamma={}, period={})",
                DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_GAMMA, DEFAULT_PERIOD
            ),
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            period: DEFAULT_PERIOD,
            ceiling: None,
        }
    }
}

impl ForecastModel for HoltWinters {
    type Trained = TrainedHoltWinters;

    fn train(&self, series: &TimeSeries) -> Result<Self::Trained> {
        require_observations(MODEL, series, self.period.max(2))?;

        let values = series.values();
        let seeded = self.seed_seasonal(&values);
        let initial_level = values[0];
        let initial_trend = (values[1] - values[0]) / self.period as f64;

        let (level, trend, seasonal) = values.iter().enumerate().skip(1).fold(
            (initial_level, initial_trend, seeded),
            |(level, trend, mut seasonal), (i, &y)| {
                let phase = i % self.period;
                let projected = level + trend;

                // A zero index says nothing about the level on that phase
                let deseasonalized = if seasonal[phase].abs() > EPSILON {
                    y / seasonal[phase]
                } else {
                    projected
                };

                let next_level = self.alpha * deseasonalized + (1.0 - self.alpha) * projected;
                let next_trend = self.beta * (next_level - level) + (1.0 - self.beta) * trend;

                if next_level.abs() > EPSILON {
                    seasonal[phase] =
                        self.gamma * (y / next_level) + (1.0 - self.gamma) * seasonal[phase];
                }

                (next_level, next_trend, seasonal)
            },
        );

        let index_mean = seasonal.iter().sum::<f64>() / self.period as f64;
        if !level.is_finite() || !trend.is_finite() || !index_mean.is_finite() || index_mean < EPSILON
        {
            error!(level, trend, index_mean, "Holt-Winters state degenerated");
            return Err(ForecastError::NumericDegeneracy(format!(
                "{} state is not finite (level={}, trend={}, mean seasonal index={})",
                MODEL, level, trend, index_mean
            )));
        }
        let seasonal: Vec<f64> = seasonal.iter().map(|c| c / index_mean).collect();

        debug!(level, trend, ?seasonal, "Fitted Holt-Winters state");

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            level,
            trend,
            seasonal,
            observations: values.len(),
            ceiling: self.ceiling,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltWinters {
    /// Final smoothed level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Final smoothed trend per day
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Seasonal index per phase, averaging to 1
    pub fn seasonal_indices(&self) -> &[f64] {
        &self.seasonal
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        let period = self.seasonal.len();
        let values = (1..=horizon)
            .map(|step| {
                let phase = (self.observations + step - 1) % period;
                let value = self.level + self.trend * step as f64 + self.seasonal[phase];
                match self.ceiling {
                    Some(ceiling) => value.min(ceiling),
                    None => value,
                }
            })
            .collect();

        Ok(values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
