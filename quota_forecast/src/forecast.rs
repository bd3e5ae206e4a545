//! Forecast facade: the single entry point for projecting quota usage
//!
//! A [`ForecastRequest`] names one of the six models. The facade builds that
//! model from the request's parameters, trains it, projects the horizon and
//! passes every value through the [`QuotaBound`]. Model errors are returned as
//! they are; there is no fallback to a different model.

use crate::bound::QuotaBound;
use crate::data::{QuotaContext, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::change_point::{ChangePoint, DEFAULT_CHANGE_POINT_PRIOR};
use crate::models::exponential_smoothing::{self, ExponentialSmoothing};
use crate::models::holt_winters::{self, HoltWinters};
use crate::models::linear_regression::LinearRegression;
use crate::models::moving_average::{MovingAverage, DEFAULT_WINDOW};
use crate::models::seasonal_decomposition::SeasonalDecomposition;
use crate::models::{ForecastModel, TrainedForecastModel, DEFAULT_PERIOD};
use crate::utils::future_dates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The closed set of forecasting models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelName {
    /// Least-squares linear trend
    #[default]
    Linear,
    /// Simple exponential smoothing, flat projection
    Exponential,
    /// Trailing simple moving average, flat projection
    MovingAverage,
    /// Holt-Winters triple exponential smoothing
    HoltWinters,
    /// Seasonal decomposition with a linear trend
    Seasonal,
    /// Segmented regression around change points
    ChangePoint,
}

impl ModelName {
    /// All models, in declaration order
    pub const ALL: [ModelName; 6] = [
        ModelName::Linear,
        ModelName::Exponential,
        ModelName::MovingAverage,
        ModelName::HoltWinters,
        ModelName::Seasonal,
        ModelName::ChangePoint,
    ];

    /// Wire name of the model
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Linear => "linear",
            ModelName::Exponential => "exponential",
            ModelName::MovingAverage => "movingAverage",
            ModelName::HoltWinters => "holtWinters",
            ModelName::Seasonal => "seasonal",
            ModelName::ChangePoint => "changePoint",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        ModelName::ALL
            .iter()
            .copied()
            .find(|model| model.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ForecastError::InvalidParameter(format!("Unknown model: {}", s)))
    }
}

/// Optional per-model tuning overrides; unset fields use the model defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelParams {
    /// Level smoothing factor in `(0, 1]`
    pub alpha: Option<f64>,
    /// Trend smoothing factor in `(0, 1]`
    pub beta: Option<f64>,
    /// Seasonal smoothing factor in `(0, 1]`
    pub gamma: Option<f64>,
    /// Seasonal cycle length
    pub period: Option<usize>,
    /// Trailing window for the moving average
    pub window_size: Option<usize>,
    /// Change point sensitivity as a fraction of the series maximum
    pub change_point_prior: Option<f64>,
}

/// Everything needed to project one quota's usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub series: TimeSeries,
    pub quota: QuotaContext,
    pub model: ModelName,
    pub horizon_days: usize,
    #[serde(default)]
    pub params: ModelParams,
}

impl ForecastRequest {
    /// Create a request using default model parameters
    pub fn new(
        series: TimeSeries,
        quota: QuotaContext,
        model: ModelName,
        horizon_days: usize,
    ) -> Self {
        Self {
            series,
            quota,
            model,
            horizon_days,
            params: ModelParams::default(),
        }
    }

    /// Override model parameters
    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }
}

/// One projected day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub projected_value: f64,
}

/// Bounded projection for the days following the input series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    model: String,
    points: Vec<ForecastPoint>,
    unconstrained: Vec<f64>,
}

impl ForecastResult {
    /// Descriptive name of the model that produced the projection
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Projected days in date order
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Bounded projected values in date order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.projected_value).collect()
    }

    /// Projected dates
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Model output before the quota bound was applied
    pub fn unconstrained(&self) -> &[f64] {
        &self.unconstrained
    }

    /// Number of projected days
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    /// Serialize the result as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Run the requested model and bound its projection to the remaining quota
pub fn forecast(request: &ForecastRequest) -> Result<ForecastResult> {
    if request.horizon_days == 0 {
        return Err(ForecastError::InvalidParameter(
            "Horizon must be at least one day".to_string(),
        ));
    }

    let last_date = request
        .series
        .last_date()
        .ok_or(ForecastError::InsufficientData {
            model: request.model.as_str(),
            needed: 1,
            got: 0,
        })?;

    let dates = future_dates(last_date, request.horizon_days)?;
    let (model, unconstrained) = run_model(request)?;
    if unconstrained.len() != request.horizon_days {
        return Err(ForecastError::NumericDegeneracy(format!(
            "{} projected {} days, expected {}",
            model,
            unconstrained.len(),
            request.horizon_days
        )));
    }

    let bounded = QuotaBound::for_quota(&request.quota).apply_all(&unconstrained)?;
    let points = dates
        .into_iter()
        .zip(bounded)
        .map(|(date, projected_value)| ForecastPoint {
            date,
            projected_value,
        })
        .collect();

    debug!(
        model = %model,
        horizon = request.horizon_days,
        observations = request.series.len(),
        "Produced bounded forecast"
    );

    Ok(ForecastResult {
        model,
        points,
        unconstrained,
    })
}

fn run_model(request: &ForecastRequest) -> Result<(String, Vec<f64>)> {
    let params = &request.params;
    let series = &request.series;
    let horizon = request.horizon_days;
    let period = params.period.unwrap_or(DEFAULT_PERIOD);

    match request.model {
        ModelName::Linear => project(LinearRegression::new(), series, horizon),
        ModelName::Exponential => {
            let alpha = params.alpha.unwrap_or(exponential_smoothing::DEFAULT_ALPHA);
            project(ExponentialSmoothing::new(alpha)?, series, horizon)
        }
        ModelName::MovingAverage => project(
            MovingAverage::new(params.window_size.unwrap_or(DEFAULT_WINDOW))?,
            series,
            horizon,
        ),
        ModelName::HoltWinters => {
            let model = HoltWinters::new(
                params.alpha.unwrap_or(holt_winters::DEFAULT_ALPHA),
                params.beta.unwrap_or(holt_winters::DEFAULT_BETA),
                params.gamma.unwrap_or(holt_winters::DEFAULT_GAMMA),
                period,
            )?
            .with_ceiling(request.quota.remaining_amount())?;
            project(model, series, horizon)
        }
        ModelName::Seasonal => project(SeasonalDecomposition::new(period)?, series, horizon),
        ModelName::ChangePoint => {
            let prior = params
                .change_point_prior
                .unwrap_or(DEFAULT_CHANGE_POINT_PRIOR);
            project(ChangePoint::new(prior)?, series, horizon)
        }
    }
}

fn project<M: ForecastModel>(
    model: M,
    series: &TimeSeries,
    horizon: usize,
) -> Result<(String, Vec<f64>)> {
    let trained = model.train(series)?;
    let values = trained.forecast(horizon)?;
    Ok((trained.name().to_string(), values))
}
