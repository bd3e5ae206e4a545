//! # Quota Watch
//!
//! Umbrella crate for the quota usage forecasting workspace.
//!
//! - [`quota_forecast`]: catch aggregation, forecasting models, quota bound and outlook
//! - [`quota_math`]: least-squares fitting and smoothing primitives
//!
//! ## Example
//!
//! ```
//! use quota_watch_workspace::quota_forecast::{
//!     forecast, ForecastRequest, ModelName, ModelParams, QuotaContext, TimeSeries,
//! };
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let series = TimeSeries::from_values(start, &[10.0; 7]).unwrap();
//! let quota = QuotaContext::new(1000.0, start, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
//!     .unwrap();
//!
//! let params = ModelParams {
//!     window_size: Some(7),
//!     ..ModelParams::default()
//! };
//! let request = ForecastRequest::new(series, quota, ModelName::MovingAverage, 3).with_params(params);
//! let result = forecast(&request).unwrap();
//! assert_eq!(result.values(), vec![10.0, 10.0, 10.0]);
//! ```

pub use quota_forecast;
pub use quota_math;

/// Model names accepted by the forecasting facade, in wire format
pub fn supported_models() -> Vec<&'static str> {
    quota_forecast::ModelName::ALL
        .iter()
        .map(|model| model.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_models() {
        assert_eq!(
            supported_models(),
            vec![
                "linear",
                "exponential",
                "movingAverage",
                "holtWinters",
                "seasonal",
                "changePoint"
            ]
        );
    }
}
