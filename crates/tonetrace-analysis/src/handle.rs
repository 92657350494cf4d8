//! Tracker handle for convenient API access.

use crate::config::TrackerConfig;
use crate::pitch::{AutocorrelationDetector, PitchReading};
use crate::waveform::WaveformSummary;

#[cfg(feature = "live")]
use crate::live::LiveTrackerState;
#[cfg(feature = "live")]
use std::sync::Arc;

/// Read-side handle for a pitch tracking session.
///
/// When live tracking is running, the `live_*()` methods return results
/// published by the tracking thread. The offline methods work on any
/// sample buffer regardless.
pub struct TrackerHandle {
    config: TrackerConfig,
    #[cfg(feature = "live")]
    live: Option<Arc<LiveTrackerState>>,
}

impl TrackerHandle {
    /// Create a handle without live state (offline only).
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            #[cfg(feature = "live")]
            live: None,
        }
    }

    /// Create a handle with live state attached.
    #[cfg(feature = "live")]
    pub fn with_live(config: TrackerConfig, live: Arc<LiveTrackerState>) -> Self {
        Self {
            config,
            live: Some(live),
        }
    }

    /// Whether live tracking results are available.
    #[cfg(feature = "live")]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Whether live tracking results are available.
    #[cfg(not(feature = "live"))]
    pub fn is_live(&self) -> bool {
        false
    }

    /// Latest smoothed pitch reading from the live session.
    ///
    /// Returns a default (unvoiced) reading if live tracking is not running.
    #[cfg(feature = "live")]
    pub fn live_pitch(&self) -> Arc<PitchReading> {
        match &self.live {
            Some(state) => state.pitch.load_full(),
            None => Arc::new(PitchReading::default()),
        }
    }

    /// Latest waveform summary from the live session.
    #[cfg(feature = "live")]
    pub fn live_waveform(&self) -> Arc<WaveformSummary> {
        match &self.live {
            Some(state) => state.waveform.load_full(),
            None => Arc::new(WaveformSummary::new(crate::live::LIVE_WAVEFORM_BLOCK_LEN)),
        }
    }

    /// One-shot pitch detection on a sample buffer, using the session's
    /// lag bounds. No smoothing is applied.
    pub fn detect_pitch(&self, samples: &[f32]) -> PitchReading {
        let mut detector = AutocorrelationDetector::from_config(&self.config);
        PitchReading::from_frequency(detector.detect(samples))
    }

    /// Waveform summary of a sample buffer for display.
    pub fn waveform_summary(&self, samples: &[f32], samples_per_block: usize) -> WaveformSummary {
        crate::waveform::compute_summary(samples, samples_per_block)
    }

    /// Session sample rate.
    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    /// Session configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
