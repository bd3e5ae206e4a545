//! Bounding of projected usage to the legally available allocation

use crate::data::QuotaContext;
use crate::error::{ForecastError, Result};
use tracing::error;

/// Clamps projections into `[0, remaining_amount]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaBound {
    ceiling: f64,
}

impl QuotaBound {
    /// Bound derived from the quota's remaining allocation
    pub fn for_quota(quota: &QuotaContext) -> Self {
        Self {
            ceiling: quota.remaining_amount(),
        }
    }

    /// Upper limit applied to every value
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Clamp one value; non-finite input is a numeric degeneracy, not a zero
    pub fn apply(&self, raw: f64) -> Result<f64> {
        if !raw.is_finite() {
            error!(raw, "Model produced a non-finite projection");
            return Err(ForecastError::NumericDegeneracy(format!(
                "Projected value is not finite: {}",
                raw
            )));
        }
        Ok(raw.clamp(0.0, self.ceiling))
    }

    /// Clamp every value of a projection
    pub fn apply_all(&self, raw: &[f64]) -> Result<Vec<f64>> {
        raw.iter().map(|&value| self.apply(value)).collect()
    }
}
