//! Builder for configuring and constructing a `TrackerEngine`.

use crate::{Result, TrackerEngine};
use std::time::Duration;
use tonetrace_analysis::TrackerConfig;

/// Configures a pitch tracking session.
///
/// All options have working defaults for a 44.1 kHz microphone signal;
/// `build()` validates the combination and fails fast on a configuration
/// the pipeline could not run safely (a window too short for the lag
/// bounds, inverted bounds, an empty smoothing window).
///
/// # Example
///
/// ```
/// use tonetrace::TrackerEngine;
/// use std::time::Duration;
///
/// let engine = TrackerEngine::builder()
///     .sample_rate(48000.0)
///     .lag_bounds(32, 480)
///     .update_interval(Duration::from_millis(100))
///     .build()
///     .unwrap();
/// assert_eq!(engine.sample_rate(), 48000.0);
/// ```
pub struct TrackerEngineBuilder {
    config: TrackerConfig,
}

impl Default for TrackerEngineBuilder {
    fn default() -> Self {
        Self {
            config: TrackerConfig::default(),
        }
    }
}

impl TrackerEngineBuilder {
    /// Sample rate of the incoming signal in Hz. Default: 44100.
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Length of the sample window in samples. Default: 32768.
    pub fn window_len(mut self, window_len: usize) -> Self {
        self.config.window_len = window_len;
        self
    }

    /// Candidate lag range in samples. `min_lag` caps the highest
    /// detectable frequency, `max_lag` the lowest. Default: 30..441.
    pub fn lag_bounds(mut self, min_lag: usize, max_lag: usize) -> Self {
        self.config.min_lag = min_lag;
        self.config.max_lag = max_lag;
        self
    }

    /// Wall-clock interval between pitch pipeline runs. Default: 200 ms.
    pub fn update_interval(mut self, interval: Duration) -> Self {
        self.config.update_interval = interval;
        self
    }

    /// Number of raw estimates the median smoother holds. Default: 5.
    pub fn smoothing_window(mut self, smoothing_window: usize) -> Self {
        self.config.smoothing_window = smoothing_window;
        self
    }

    /// Validate the configuration and construct the engine.
    pub fn build(self) -> Result<TrackerEngine> {
        self.config.validate()?;
        tracing::debug!(config = ?self.config, "tracker engine configured");
        Ok(TrackerEngine::from_config(self.config))
    }
}
