//! Time series and quota data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of observed catch usage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Catch weight landed on that day
    pub value: f64,
}

impl TimeSeriesPoint {
    /// Create a new point
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Daily usage series with strictly increasing dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimeSeriesPoint>", into = "Vec<TimeSeriesPoint>")]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Create a series from points, rejecting unordered dates and invalid values
    pub fn new(points: Vec<TimeSeriesPoint>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ForecastError::InvalidParameter(format!(
                    "Series dates must be strictly increasing: {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }

        if let Some(bad) = points
            .iter()
            .find(|p| !p.value.is_finite() || p.value < 0.0)
        {
            return Err(ForecastError::InvalidParameter(format!(
                "Usage on {} must be a non-negative number, got {}",
                bad.date, bad.value
            )));
        }

        Ok(Self { points })
    }

    /// Create a series of consecutive days starting at `start`
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Result<Self> {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &value)| TimeSeriesPoint::new(start + Duration::days(i as i64), value))
            .collect();
        Self::new(points)
    }

    /// Get the points in date order
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Get the usage values in date order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Date of the most recent observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Value of the most recent observation
    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl TryFrom<Vec<TimeSeriesPoint>> for TimeSeries {
    type Error = ForecastError;

    fn try_from(points: Vec<TimeSeriesPoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<TimeSeries> for Vec<TimeSeriesPoint> {
    fn from(series: TimeSeries) -> Self {
        series.points
    }
}

/// Current state of the quota being forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuotaFields")]
pub struct QuotaContext {
    remaining_amount: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl QuotaContext {
    /// Create a quota context, validating the remaining amount and the date range
    pub fn new(remaining_amount: f64, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        if !remaining_amount.is_finite() || remaining_amount < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Remaining quota must be a non-negative number, got {}",
                remaining_amount
            )));
        }
        if end_date < start_date {
            return Err(ForecastError::InvalidParameter(format!(
                "Quota ends ({}) before it starts ({})",
                end_date, start_date
            )));
        }

        Ok(Self {
            remaining_amount,
            start_date,
            end_date,
        })
    }

    /// Hard ceiling for every projected value
    pub fn remaining_amount(&self) -> f64 {
        self.remaining_amount
    }

    /// First day the quota is valid
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day the quota is valid
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuotaFields {
    remaining_amount: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<QuotaFields> for QuotaContext {
    type Error = ForecastError;

    fn try_from(fields: QuotaFields) -> Result<Self> {
        Self::new(fields.remaining_amount, fields.start_date, fields.end_date)
    }
}

/// A raw catch record as delivered by the quota administration system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchEvent {
    /// Timestamp of the landing, in any format accepted by `utils::date_parser`
    pub recorded_at: String,
    /// Landed weight
    pub weight: f64,
}

impl CatchEvent {
    /// Create a new catch event
    pub fn new(recorded_at: impl Into<String>, weight: f64) -> Self {
        Self {
            recorded_at: recorded_at.into(),
            weight,
        }
    }
}
