//! Aggregation of raw catch events into a daily usage series

use crate::data::{CatchEvent, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::utils::date_parser;
use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

/// Builds gap-free daily usage series over a fixed historical window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    historical_days: i64,
}

impl Aggregator {
    /// Create an aggregator covering `historical_days` days before today
    pub fn new(historical_days: i64) -> Result<Self> {
        if historical_days <= 0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Historical window must be a positive number of days, got {}",
                historical_days
            )));
        }

        Ok(Self { historical_days })
    }

    /// Length of the historical window in days
    pub fn historical_days(&self) -> i64 {
        self.historical_days
    }

    /// Sum event weights per day over `[today - historical_days, today]`.
    ///
    /// The result always holds `historical_days + 1` consecutive days. Days without
    /// events are zero. Events with unparseable dates or invalid weights are
    /// skipped with a warning. A window reaching back past the earliest
    /// representable date is an `InvalidParameter`.
    pub fn daily_usage(&self, events: &[CatchEvent], today: NaiveDate) -> Result<TimeSeries> {
        let start = today
            .checked_sub_days(Days::new(self.historical_days as u64))
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Historical window of {} days before {} is out of calendar range",
                    self.historical_days, today
                ))
            })?;
        let mut totals = vec![0.0; self.historical_days as usize + 1];
        let mut skipped = 0usize;

        for event in events {
            let date = match date_parser::parse_date(&event.recorded_at) {
                Ok(date) => date,
                Err(err) => {
                    warn!(recorded_at = %event.recorded_at, "Skipping catch event: {}", err);
                    skipped += 1;
                    continue;
                }
            };

            if !event.weight.is_finite() || event.weight < 0.0 {
                warn!(
                    recorded_at = %event.recorded_at,
                    weight = event.weight,
                    "Skipping catch event with invalid weight"
                );
                skipped += 1;
                continue;
            }

            if date < start || date > today {
                debug!(%date, %start, %today, "Catch event outside historical window");
                continue;
            }

            totals[(date - start).num_days() as usize] += event.weight;
        }

        debug!(
            events = events.len(),
            skipped,
            days = totals.len(),
            "Aggregated catch events into daily usage"
        );

        TimeSeries::from_values(start, &totals)
    }
}

/// Aggregate events for the window ending at `today`
pub fn daily_usage(
    events: &[CatchEvent],
    today: NaiveDate,
    historical_days: i64,
) -> Result<TimeSeries> {
    Aggregator::new(historical_days)?.daily_usage(events, today)
}
