//! Tracker configuration and fail-fast validation.
//!
//! Lag bounds, window length, update cadence and smoothing depth are all
//! decided here, once, before a session starts. The hot paths never
//! re-validate them.

use std::time::Duration;
use thiserror::Error;

/// Configuration for a pitch tracking session.
///
/// Defaults target a 44.1 kHz microphone signal: a 32768-sample window,
/// a 100–1470 Hz search range (lags 30..441) and a 200 ms update cadence
/// smoothed over the last 5 raw estimates.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Sample rate of the incoming signal in Hz.
    pub sample_rate: f64,
    /// Length of the sample window in samples.
    pub window_len: usize,
    /// Smallest candidate lag in samples (caps the highest detectable frequency).
    pub min_lag: usize,
    /// One past the largest candidate lag in samples (sets the lowest
    /// detectable frequency and the probe length).
    pub max_lag: usize,
    /// Wall-clock interval between pitch pipeline runs.
    pub update_interval: Duration,
    /// Number of recent raw estimates the median smoother holds.
    pub smoothing_window: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            window_len: 32768,
            min_lag: 30,
            max_lag: 441,
            update_interval: Duration::from_millis(200),
            smoothing_window: 5,
        }
    }
}

/// Configuration errors, reported at build time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(f64),

    #[error("lag bounds must satisfy 1 <= min < max, got {min}..{max}")]
    InvalidLagBounds { min: usize, max: usize },

    #[error("window of {window_len} samples is too short for a max lag of {max_lag}, need at least {required}")]
    WindowTooShort {
        window_len: usize,
        max_lag: usize,
        required: usize,
    },

    #[error("smoothing window must hold at least one estimate")]
    EmptySmoothingWindow,
}

impl TrackerConfig {
    /// Minimum window length the lag bounds require: the probe is `max_lag`
    /// samples long and is shifted by up to `max_lag - 1` samples.
    pub fn required_window_len(&self) -> usize {
        self.max_lag * 2
    }

    /// Check the configuration. A misconfigured session never starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.min_lag < 1 || self.min_lag >= self.max_lag {
            return Err(ConfigError::InvalidLagBounds {
                min: self.min_lag,
                max: self.max_lag,
            });
        }
        let required = self.required_window_len();
        if self.window_len < required {
            return Err(ConfigError::WindowTooShort {
                window_len: self.window_len,
                max_lag: self.max_lag,
                required,
            });
        }
        if self.smoothing_window == 0 {
            return Err(ConfigError::EmptySmoothingWindow);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_short_window() {
        let config = TrackerConfig {
            window_len: 500,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WindowTooShort { required: 882, .. })
        ));
    }

    #[test]
    fn rejects_inverted_lag_bounds() {
        let config = TrackerConfig {
            min_lag: 441,
            max_lag: 30,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLagBounds { .. })
        ));
    }

    #[test]
    fn rejects_zero_lag() {
        let config = TrackerConfig {
            min_lag: 0,
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_smoothing_window() {
        let config = TrackerConfig {
            smoothing_window: 0,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySmoothingWindow)
        ));
    }
}
