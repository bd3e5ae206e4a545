//! # Quota Forecast
//!
//! Projects daily catch usage against a fishing quota's remaining allocation.
//!
//! ## Features
//!
//! - Daily aggregation of raw catch events over a fixed historical window
//! - Forecasting models (Linear Regression, Exponential Smoothing, Moving Average,
//!   Holt-Winters, Seasonal Decomposition, Change Point Regression)
//! - Every projection bounded to `[0, remaining quota]`
//! - Exhaustion outlook for alerting before a quota runs out or expires
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quota_forecast::{forecast, ForecastRequest, ModelName, QuotaContext, TimeSeries};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let series = TimeSeries::from_values(start, &[0.0, 10.0, 20.0, 30.0])?;
//! let quota = QuotaContext::new(
//!     45.0,
//!     start,
//!     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//! )?;
//!
//! let request = ForecastRequest::new(series, quota, ModelName::Linear, 2);
//! let result = forecast(&request)?;
//!
//! assert_eq!(result.values(), vec![40.0, 45.0]);
//! # Ok::<(), quota_forecast::ForecastError>(())
//! ```

pub mod aggregate;
pub mod bound;
pub mod config;
pub mod data;
pub mod error;
pub mod forecast;
pub mod models;
pub mod outlook;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use crate::aggregate::Aggregator;
pub use crate::bound::QuotaBound;
pub use crate::config::ForecastConfig;
pub use crate::data::{CatchEvent, QuotaContext, TimeSeries, TimeSeriesPoint};
pub use crate::error::{ForecastError, Result};
pub use crate::forecast::{
    forecast, ForecastPoint, ForecastRequest, ForecastResult, ModelName, ModelParams,
};
pub use crate::models::{ForecastModel, TrainedForecastModel};
pub use crate::outlook::{QuotaOutlook, QuotaStatus};
pub use crate::pipeline::{CatchHistory, QuotaForecast, QuotaForecaster};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
