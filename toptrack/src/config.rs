//! Sampler bounds and defaults, matching the classic menu-bar meters:
//! refresh between 0.5 and 20 seconds, at most 25 listed processes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const INTERVAL_MIN_SECS: f64 = 0.5;
pub const INTERVAL_MAX_SECS: f64 = 20.0;
pub const INTERVAL_DEFAULT_SECS: f64 = 1.0;

pub const TOP_N_MIN: usize = 0;
pub const TOP_N_MAX: usize = 25;
pub const TOP_N_DEFAULT: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Seconds between sampling passes.
    #[serde(default = "default_interval")]
    pub interval_secs: f64,
    /// Entries kept per snapshot; 0 means "disabled" and yields empty
    /// snapshots.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_interval() -> f64 {
    INTERVAL_DEFAULT_SECS
}

fn default_top_n() -> usize {
    TOP_N_DEFAULT
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_secs: INTERVAL_DEFAULT_SECS,
            top_n: TOP_N_DEFAULT,
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_interval(self.interval_secs)?;
        check_top_n(self.top_n)?;
        Ok(())
    }
}

/// NaN fails the range check like any other out-of-range value.
pub(crate) fn check_interval(secs: f64) -> Result<Duration, ConfigError> {
    if (INTERVAL_MIN_SECS..=INTERVAL_MAX_SECS).contains(&secs) {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err(ConfigError::IntervalOutOfRange(secs))
    }
}

pub(crate) fn check_top_n(n: usize) -> Result<usize, ConfigError> {
    if n <= TOP_N_MAX {
        Ok(n)
    } else {
        Err(ConfigError::TopNOutOfRange(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_bounds() {
        assert!(check_interval(0.5).is_ok());
        assert!(check_interval(20.0).is_ok());
        assert!(check_interval(0.4).is_err());
        assert!(check_interval(20.1).is_err());
        assert!(check_interval(f64::NAN).is_err());
    }

    #[test]
    fn top_n_bounds() {
        assert!(check_top_n(0).is_ok());
        assert!(check_top_n(25).is_ok());
        assert!(check_top_n(26).is_err());
    }

    #[test]
    fn defaults_are_valid() {
        SamplerConfig::default().validate().unwrap();
    }
}
