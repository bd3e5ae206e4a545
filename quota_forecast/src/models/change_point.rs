//! Segmented regression around detected trend changes

use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{require_observations, ForecastModel, TrainedForecastModel};
use quota_math::{fit_indexed, LinearFit};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MODEL: &str = "change point";

/// Default sensitivity, as a fraction of the series maximum
pub const DEFAULT_CHANGE_POINT_PRIOR: f64 = 0.05;

/// Piecewise linear trend model
///
/// An interior day `i` is a change point when the jump between the gradients on
/// either side exceeds `change_point_prior * max(y)`. The series is split at
/// each change point, one line is fitted per segment, and the last segment's
/// line is extrapolated.
#[derive(Debug, Clone)]
pub struct ChangePoint {
    name: String,
    change_point_prior: f64,
}

/// Line fitted to one contiguous stretch of the series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First index covered, inclusive
    pub start: usize,
    /// Last index covered, inclusive
    pub end: usize,
    /// Line fitted over the global index positions of the segment
    pub fit: LinearFit,
}

/// Trained change point model
#[derive(Debug, Clone)]
pub struct TrainedChangePoint {
    name: String,
    change_points: Vec<usize>,
    segments: Vec<Segment>,
    observations: usize,
}

impl ChangePoint {
    /// Create a new change point model
    pub fn new(change_point_prior: f64) -> Result<Self> {
        if !change_point_prior.is_finite() || change_point_prior <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Change point prior must be a positive number, got {}",
                change_point_prior
            )));
        }

        Ok(Self {
            name: format!("Change Point Regression (prior={})", change_point_prior),
            change_point_prior,
        })
    }

    /// Indices where the gradient jumps by more than the threshold
    fn detect(&self, values: &[f64]) -> Vec<usize> {
        let peak = values.iter().cloned().fold(0.0, f64::max);
        let threshold = self.change_point_prior * peak;

        (1..values.len().saturating_sub(1))
            .filter(|&i| {
                let before = values[i] - values[i - 1];
                let after = values[i + 1] - values[i];
                (after - before).abs() > threshold
            })
            .collect()
    }
}

impl Default for ChangePoint {
    fn default() -> Self {
        Self {
            name: format!(
                "Change Point Regression (prior={})",
                DEFAULT_CHANGE_POINT_PRIOR
            ),
            change_point_prior: DEFAULT_CHANGE_POINT_PRIOR,
        }
    }
}

impl ForecastModel for ChangePoint {
    type Trained = TrainedChangePoint;

    fn train(&self, series: &TimeSeries) -> Result<Self::Trained> {
        require_observations(MODEL, series, 2)?;

        let values = series.values();
        let change_points = self.detect(&values);

        // Each change point closes one segment and opens the next
        let starts: Vec<usize> = std::iter::once(0).chain(change_points.iter().copied()).collect();
        let segments = starts
            .iter()
            .enumerate()
            .map(|(k, &start)| {
                let end = starts.get(k + 1).copied().unwrap_or(values.len() - 1);
                let fit = fit_indexed(&values[start..=end], start)
                    .map_err(|e| ForecastError::from_math(MODEL, e))?;
                Ok(Segment { start, end, fit })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            ?change_points,
            segments = segments.len(),
            "Fitted segmented regression"
        );

        Ok(TrainedChangePoint {
            name: self.name.clone(),
            change_points,
            segments,
            observations: values.len(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedChangePoint {
    /// Detected change point indices, ascending
    pub fn change_points(&self) -> &[usize] {
        &self.change_points
    }

    /// Fitted segments in series order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl TrainedForecastModel for TrainedChangePoint {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        let last = self.segments.last().ok_or_else(|| {
            ForecastError::NumericDegeneracy(format!("{} model has no fitted segment", MODEL))
        })?;

        Ok((1..=horizon)
            .map(|step| {
                last.fit
                    .value_at((self.observations - 1 + step) as f64)
                    .max(0.0)
            })
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
