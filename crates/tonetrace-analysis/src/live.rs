//! Live pitch tracking via ring buffer tap.
//!
//! Runs the tracking pipeline on a background thread, reading mono samples
//! from a SPSC ring buffer fed by the capture callback. The thread
//! overwrites a fixed-length sample window in place and publishes results
//! via `ArcSwap` for lock-free reads from the UI thread: the waveform
//! summary on every pass, the smoothed pitch only when the update gate
//! opens.

use crate::config::TrackerConfig;
use crate::pitch::PitchReading;
use crate::tracker::PitchTracker;
use crate::waveform::{compute_summary, WaveformSummary};
use arc_swap::ArcSwap;
use core::sync::atomic::{AtomicBool, Ordering};
use ringbuf::{
    traits::{Consumer, Observer},
    HeapCons,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Shared state between the tracking thread and its readers.
///
/// All fields are lock-free for reads from any thread.
pub struct LiveTrackerState {
    /// Latest smoothed pitch reading.
    pub pitch: ArcSwap<PitchReading>,
    /// Latest waveform summary of the sample window.
    pub waveform: ArcSwap<WaveformSummary>,
    /// Set to false to signal the tracking thread to stop.
    running: AtomicBool,
}

impl LiveTrackerState {
    /// Create new state with default (empty) values.
    pub fn new(samples_per_block: usize) -> Self {
        Self {
            pitch: ArcSwap::from_pointee(PitchReading::default()),
            waveform: ArcSwap::from_pointee(WaveformSummary::new(samples_per_block)),
            running: AtomicBool::new(true),
        }
    }

    /// Signal the tracking thread to stop.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Check if the tracking thread should keep running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Waveform block size for live visualization (samples per block).
pub const LIVE_WAVEFORM_BLOCK_LEN: usize = 512;

/// Run the live tracking loop.
///
/// Drains mono samples from `consumer` into a rolling window of
/// `config.window_len` samples. Each pass publishes a waveform summary of
/// the window; the pitch pipeline runs only when the configured update
/// interval has elapsed. Silence on the ring buffer stalls the loop
/// cheaply rather than spinning.
///
/// This function blocks until `state.stop()` is called.
pub fn run_tracker_thread(
    mut consumer: HeapCons<f32>,
    state: Arc<LiveTrackerState>,
    config: TrackerConfig,
) {
    let mut tracker = PitchTracker::new(&config);
    let started = Instant::now();

    // Rolling window, overwritten in place. `filled` saturates at the
    // window length; the pitch pipeline waits for a full window.
    let mut window = vec![0.0f32; config.window_len];
    let mut window_pos = 0usize;
    let mut filled = 0usize;

    // Oldest-first copy of the window, reused across passes.
    let mut contiguous = vec![0.0f32; config.window_len];

    let mut drain_buf = [0.0f32; 1024];

    info!(
        window_len = config.window_len,
        interval_ms = config.update_interval.as_millis() as u64,
        "pitch tracking thread started"
    );

    while state.is_running() {
        let available = consumer.occupied_len();

        if available == 0 {
            std::thread::sleep(std::time::Duration::from_millis(5));
            continue;
        }

        let to_read = available.min(drain_buf.len());
        let read = consumer.pop_slice(&mut drain_buf[..to_read]);

        for &sample in &drain_buf[..read] {
            window[window_pos] = sample;
            window_pos = (window_pos + 1) % window.len();
            if filled < window.len() {
                filled += 1;
            }
        }

        // Reconstruct the window oldest-first from the ring position.
        let split = window_pos;
        contiguous[..window.len() - split].copy_from_slice(&window[split..]);
        contiguous[window.len() - split..].copy_from_slice(&window[..split]);

        // Waveform data flows every pass, independent of the pitch gate.
        state
            .waveform
            .store(Arc::new(compute_summary(&contiguous, LIVE_WAVEFORM_BLOCK_LEN)));

        if filled < window.len() {
            continue;
        }

        if let Some(smoothed_hz) = tracker.tick(&contiguous, started.elapsed()) {
            debug!(smoothed_hz, "pitch update");
            state
                .pitch
                .store(Arc::new(PitchReading::from_frequency(smoothed_hz)));
        }
    }

    info!("pitch tracking thread stopped");
}
