//! # Tonetrace - Real-time Pitch Tracking
//!
//! Estimates the fundamental frequency of a live mono audio signal and
//! exposes a temporally smoothed value for display, alongside a raw
//! waveform view.
//!
//! ## Architecture
//!
//! Tonetrace is an umbrella crate coordinating:
//! - **tonetrace-analysis** - the estimation core: time-domain
//!   autocorrelation detection, median smoothing, update scheduling,
//!   waveform summaries, and the live tracking thread
//!
//! Capture (microphone, device negotiation, band-limiting filters) and
//! rendering are external collaborators: the capture side pushes mono
//! samples into a ring buffer tap, the display side reads published
//! results through a [`TrackerHandle`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use tonetrace::prelude::*;
//!
//! let engine = TrackerEngine::builder()
//!     .sample_rate(44100.0)
//!     .build()?;
//!
//! // Capture callback pushes samples into the tap.
//! let mut producer = engine.start_live().expect("no session running yet");
//!
//! // UI reads the smoothed pitch and waveform each frame.
//! let handle = engine.handle();
//! let pitch = handle.live_pitch();
//! let waveform = handle.live_waveform();
//!
//! engine.stop_live();
//! ```
//!
//! ## Feature Flags
//!
//! - `live` (default) - background tracking thread with lock-free
//!   publication (`ringbuf` + `arc-swap`)
//! - `serialization` - serde derives on result types

/// Re-export of tonetrace-analysis for direct access
pub use tonetrace_analysis as analysis;

// Core types
pub use tonetrace_analysis::{
    compute_summary,
    freq_to_midi,
    midi_to_freq,

    // Estimation pipeline
    AutocorrelationDetector,
    ConfigError,
    MedianSmoother,
    PitchReading,
    PitchTracker,

    // Configuration
    TrackerConfig,
    TrackerHandle,
    UpdateScheduler,

    // Waveform view
    WaveformBlock,
    WaveformSummary,
};

#[cfg(feature = "live")]
pub use tonetrace_analysis::{run_tracker_thread, LiveTrackerState};

mod builder;
mod engine;
mod error;

pub use builder::TrackerEngineBuilder;
pub use engine::TrackerEngine;
pub use error::{Error, Result};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{
        PitchReading, PitchTracker, TrackerConfig, TrackerEngine, TrackerEngineBuilder,
        TrackerHandle, WaveformSummary,
    };

    #[cfg(feature = "live")]
    pub use crate::LiveTrackerState;
}
