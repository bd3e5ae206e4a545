//! End-to-end quota forecasting from raw catch history

use crate::aggregate::Aggregator;
use crate::config::ForecastConfig;
use crate::data::{CatchEvent, QuotaContext, TimeSeries};
use crate::error::Result;
use crate::forecast::{forecast, ForecastRequest, ForecastResult};
use crate::outlook::QuotaOutlook;
use chrono::NaiveDate;
use tracing::info;

/// Source of raw catch records for a quota
pub trait CatchHistory {
    /// Catch events landed against `quota_id` during the last `historical_days` days
    fn catch_events(&self, quota_id: &str, historical_days: i64) -> Result<Vec<CatchEvent>>;
}

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaForecast {
    /// Daily usage the forecast was built from
    pub history: TimeSeries,
    /// Bounded projection
    pub result: ForecastResult,
    /// Exhaustion summary for alerting
    pub outlook: QuotaOutlook,
}

/// Runs aggregation, forecasting and outlook with one configuration
#[derive(Debug, Clone)]
pub struct QuotaForecaster {
    config: ForecastConfig,
    aggregator: Aggregator,
}

impl QuotaForecaster {
    /// Create a forecaster, validating the configuration
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        let aggregator = Aggregator::new(config.historical_days)?;
        Ok(Self { config, aggregator })
    }

    /// Active configuration
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast one quota as of `today`
    pub fn run<S: CatchHistory + ?Sized>(
        &self,
        source: &S,
        quota_id: &str,
        quota: &QuotaContext,
        today: NaiveDate,
    ) -> Result<QuotaForecast> {
        let events = source.catch_events(quota_id, self.config.historical_days)?;
        let history = self.aggregator.daily_usage(&events, today)?;

        let request = ForecastRequest::new(
            history.clone(),
            quota.clone(),
            self.config.model,
            self.config.horizon_days,
        )
        .with_params(self.config.params.clone());
        let result = forecast(&request)?;
        let outlook = QuotaOutlook::assess(&result, quota);

        info!(
            quota_id,
            model = %self.config.model,
            projected_usage = outlook.projected_usage,
            exhausted_on = ?outlook.exhausted_on,
            "Forecast quota usage"
        );

        Ok(QuotaForecast {
            history,
            result,
            outlook,
        })
    }
}
