//! Exhaustion outlook for alerting on a bounded forecast

use crate::data::QuotaContext;
use crate::forecast::ForecastResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where the quota stands against the projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum QuotaStatus {
    /// Nothing remains to be caught
    Exhausted,
    /// Projected usage uses up the remainder before the quota expires
    ExhaustsBeforeExpiry { date: NaiveDate },
    /// Projected usage stays within the remaining allocation
    WithinAllocation,
}

/// Summary of projected usage against the remaining allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaOutlook {
    /// Total projected usage over the days inside the quota period
    pub projected_usage: f64,
    /// Allocation left when the forecast was made
    pub remaining_amount: f64,
    /// First day cumulative projected usage reaches the remaining allocation
    pub exhausted_on: Option<NaiveDate>,
    /// Forecast days that fall inside the quota period
    pub days_considered: usize,
    pub status: QuotaStatus,
}

impl QuotaOutlook {
    /// Accumulate projected usage day by day up to the quota's end date
    pub fn assess(result: &ForecastResult, quota: &QuotaContext) -> Self {
        let remaining = quota.remaining_amount();

        let mut projected_usage = 0.0;
        let mut exhausted_on = None;
        let mut days_considered = 0;
        for point in result
            .points()
            .iter()
            .filter(|p| p.date >= quota.start_date() && p.date <= quota.end_date())
        {
            projected_usage += point.projected_value;
            days_considered += 1;
            if exhausted_on.is_none() && remaining > 0.0 && projected_usage >= remaining {
                exhausted_on = Some(point.date);
            }
        }

        let status = match exhausted_on {
            _ if remaining <= 0.0 => QuotaStatus::Exhausted,
            Some(date) => QuotaStatus::ExhaustsBeforeExpiry { date },
            None => QuotaStatus::WithinAllocation,
        };

        Self {
            projected_usage,
            remaining_amount: remaining,
            exhausted_on,
            days_considered,
            status,
        }
    }

    /// Whether operators should be warned
    pub fn needs_attention(&self) -> bool {
        !matches!(self.status, QuotaStatus::WithinAllocation)
    }
}
