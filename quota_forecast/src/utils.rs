//! Utility functions for the quota_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};

/// Calendar days following `last_date`, one per horizon step.
///
/// Fails with `InvalidParameter` when the last step falls outside the
/// representable calendar.
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    last_date
        .checked_add_days(Days::new(horizon as u64))
        .ok_or_else(|| {
            ForecastError::InvalidParameter(format!(
                "Horizon of {} days after {} is out of calendar range",
                horizon, last_date
            ))
        })?;

    Ok((1..=horizon as u64)
        .filter_map(|step| last_date.checked_add_days(Days::new(step)))
        .collect())
}

/// Parsing of catch record timestamps into calendar days
pub mod date_parser {
    use crate::error::{ForecastError, Result};
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];

    /// Parse a timestamp and drop its time-of-day component
    pub fn parse_date(input: &str) -> Result<NaiveDate> {
        let input = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(dt.date_naive());
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(dt.date());
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                return Ok(date);
            }
        }

        Err(ForecastError::InvalidParameter(format!(
            "Unrecognized date: {:?}",
            input
        )))
    }
}
