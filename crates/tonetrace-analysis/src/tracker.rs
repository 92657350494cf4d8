//! The per-tick estimation pipeline.
//!
//! A `PitchTracker` is driven by an external frame source (a render loop,
//! a timer, or the live tracking thread): every tick hands it the current
//! sample window and the elapsed session time. The scheduler gate decides
//! whether the estimator and smoother actually run; between runs the
//! previous smoothed value stays current. The raw window itself is the
//! caller's to forward for display; the tracker never throttles or copies
//! that path.

use crate::config::TrackerConfig;
use crate::pitch::{AutocorrelationDetector, PitchReading};
use crate::scheduler::UpdateScheduler;
use crate::smoothing::MedianSmoother;
use std::time::Duration;

/// Estimator, smoother and scheduler composed into one tick function.
pub struct PitchTracker {
    detector: AutocorrelationDetector,
    smoother: MedianSmoother,
    scheduler: UpdateScheduler,
    latest: f32,
}

impl PitchTracker {
    /// Build a tracker from a validated session configuration.
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            detector: AutocorrelationDetector::from_config(config),
            smoother: MedianSmoother::new(config.smoothing_window),
            scheduler: UpdateScheduler::new(config.update_interval),
            latest: 0.0,
        }
    }

    /// Run one tick at elapsed session time `now`.
    ///
    /// Returns `Some(smoothed_hz)` when the scheduler gate opened and the
    /// pipeline ran, `None` when the tick was a render-only pass. Either
    /// way [`latest`](Self::latest) afterwards reports the current
    /// smoothed estimate.
    pub fn tick(&mut self, window: &[f32], now: Duration) -> Option<f32> {
        if !self.scheduler.should_run(now) {
            return None;
        }
        let raw = self.detector.detect(window);
        self.latest = self.smoother.push(raw);
        Some(self.latest)
    }

    /// Current smoothed estimate in Hz (0.0 before the first run or while
    /// no pitch is detected).
    pub fn latest(&self) -> f32 {
        self.latest
    }

    /// Current smoothed estimate with note bookkeeping for display.
    pub fn latest_reading(&self) -> PitchReading {
        PitchReading::from_frequency(self.latest)
    }

    /// Forget smoothing history and cadence state. The configuration and
    /// the detector scratch buffer are kept.
    pub fn reset(&mut self) {
        self.smoother.clear();
        self.scheduler.reset();
        self.latest = 0.0;
    }
}
