//! # Tonetrace Analysis
//!
//! Pitch tracking core for live audio applications.
//!
//! This crate provides the estimation pipeline behind a real-time tuner
//! display:
//! - **Autocorrelation detection**: time-domain fundamental frequency
//!   estimation over a bounded lag range
//! - **Median smoothing**: a short FIFO history reduced to its median,
//!   rejecting octave errors and dropout zeros
//! - **Update scheduling**: a wall-clock gate decoupling the expensive
//!   pitch pass from the render cadence
//! - **Waveform summaries**: min/max/RMS blocks for the unthrottled
//!   display path
//! - **Live tracking**: a background thread draining a ring buffer tap,
//!   publishing results lock-free (feature `live`)
//!
//! All algorithms operate on raw `&[f32]` mono sample buffers - no
//! framework dependencies.
//!
//! ## Example
//!
//! ```rust
//! use tonetrace_analysis::{AutocorrelationDetector, MedianSmoother, TrackerConfig};
//!
//! let config = TrackerConfig::default();
//! config.validate().unwrap();
//!
//! // One estimation pass over a window of silence.
//! let window = vec![0.0f32; config.window_len];
//! let mut detector = AutocorrelationDetector::from_config(&config);
//! let raw = detector.detect(&window);
//! assert_eq!(raw, 0.0);
//!
//! // Smoothing turns raw estimates into a display value.
//! let mut smoother = MedianSmoother::new(config.smoothing_window);
//! assert_eq!(smoother.push(raw), 0.0);
//! ```

pub mod config;
pub mod pitch;
pub mod scheduler;
pub mod smoothing;
pub mod tracker;
pub mod waveform;

#[cfg(feature = "live")]
pub mod live;

mod handle;

pub use config::{ConfigError, TrackerConfig};
pub use handle::TrackerHandle;
pub use pitch::{freq_to_midi, midi_to_freq, AutocorrelationDetector, PitchReading};
pub use scheduler::UpdateScheduler;
pub use smoothing::MedianSmoother;
pub use tracker::PitchTracker;
pub use waveform::{compute_summary, WaveformBlock, WaveformSummary};

#[cfg(feature = "live")]
pub use live::{run_tracker_thread, LiveTrackerState};
