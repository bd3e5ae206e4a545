//! Forecast configuration loaded from JSON

use crate::error::{ForecastError, Result};
use crate::forecast::{ModelName, ModelParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of days projected
pub const DEFAULT_HORIZON_DAYS: usize = 30;
/// Default length of the aggregated history window
pub const DEFAULT_HISTORICAL_DAYS: i64 = 90;

/// Which model to run, how far back to look and how far ahead to project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastConfig {
    pub model: ModelName,
    pub horizon_days: usize,
    pub historical_days: i64,
    pub params: ModelParams,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model: ModelName::default(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            historical_days: DEFAULT_HISTORICAL_DAYS,
            params: ModelParams::default(),
        }
    }
}

impl ForecastConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Reject window sizes no forecast could use
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(ForecastError::ConfigError(
                "horizonDays must be at least 1".to_string(),
            ));
        }
        if self.historical_days <= 0 {
            return Err(ForecastError::ConfigError(format!(
                "historicalDays must be positive, got {}",
                self.historical_days
            )));
        }
        Ok(())
    }
}
