//! TrackerEngine: the session object owning pipeline state and lifecycle.

use crate::TrackerEngineBuilder;
use tonetrace_analysis::{PitchTracker, TrackerConfig, TrackerHandle};

#[cfg(feature = "live")]
use parking_lot::Mutex;
#[cfg(feature = "live")]
use ringbuf::{traits::Split, HeapProd, HeapRb};
#[cfg(feature = "live")]
use std::sync::Arc;
#[cfg(feature = "live")]
use std::thread::JoinHandle;
#[cfg(feature = "live")]
use tonetrace_analysis::live::{run_tracker_thread, LiveTrackerState, LIVE_WAVEFORM_BLOCK_LEN};

/// Pitch tracking session.
///
/// Owns the validated configuration and, when live tracking is started,
/// the tracking thread and its shared state. All pipeline state that a
/// callback-driven loop would otherwise keep in globals lives here, owned
/// by the caller.
///
/// # Example
///
/// ```ignore
/// use tonetrace::prelude::*;
///
/// let engine = TrackerEngine::builder()
///     .sample_rate(44100.0)
///     .build()?;
///
/// // Hand the producer side to the capture callback.
/// let mut producer = engine.start_live().expect("no session running yet");
///
/// // UI thread reads through the handle.
/// let handle = engine.handle();
/// let reading = handle.live_pitch();
///
/// engine.stop_live();
/// ```
pub struct TrackerEngine {
    config: TrackerConfig,

    /// Live state + thread handle (opt-in via start_live)
    #[cfg(feature = "live")]
    live: Mutex<Option<(Arc<LiveTrackerState>, JoinHandle<()>)>>,
}

impl TrackerEngine {
    /// Create a new engine builder.
    pub fn builder() -> TrackerEngineBuilder {
        TrackerEngineBuilder::default()
    }

    pub(crate) fn from_config(config: TrackerConfig) -> Self {
        Self {
            config,
            #[cfg(feature = "live")]
            live: Mutex::new(None),
        }
    }

    /// Session sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    /// Validated session configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// A synchronous tracker for externally driven sessions.
    ///
    /// Use this when a render loop or timer already drives the
    /// application: call [`PitchTracker::tick`] once per frame with the
    /// current sample window and elapsed session time.
    pub fn tracker(&self) -> PitchTracker {
        PitchTracker::new(&self.config)
    }

    /// Read-side handle. Attaches to the live session when one is running.
    pub fn handle(&self) -> TrackerHandle {
        #[cfg(feature = "live")]
        {
            if let Some((state, _)) = &*self.live.lock() {
                return TrackerHandle::with_live(self.config.clone(), state.clone());
            }
        }
        TrackerHandle::new(self.config.clone())
    }

    /// Start the live tracking thread.
    ///
    /// Returns the producer side of the ring buffer tap for the capture
    /// collaborator to push mono samples into, or `None` if a live session
    /// is already running.
    ///
    /// Call [`stop_live`](Self::stop_live) to stop.
    #[cfg(feature = "live")]
    pub fn start_live(&self) -> Option<HeapProd<f32>> {
        let mut guard = self.live.lock();
        if guard.is_some() {
            tracing::warn!("live tracking already running");
            return None;
        }

        // Room for two full windows so a slow drain pass never drops samples.
        let ring = HeapRb::<f32>::new(self.config.window_len * 2);
        let (producer, consumer) = ring.split();

        let state = Arc::new(LiveTrackerState::new(LIVE_WAVEFORM_BLOCK_LEN));
        let state2 = state.clone();
        let config = self.config.clone();

        let handle = std::thread::Builder::new()
            .name("tonetrace-live".into())
            .spawn(move || {
                run_tracker_thread(consumer, state2, config);
            })
            .expect("failed to spawn tracking thread");

        *guard = Some((state, handle));
        Some(producer)
    }

    /// Stop the live tracking thread and wait for it to exit.
    ///
    /// The stop flag is observed at the top of the next loop pass, so an
    /// in-flight pass always finishes. A no-op when no live session is
    /// running.
    #[cfg(feature = "live")]
    pub fn stop_live(&self) {
        let entry = self.live.lock().take();
        if let Some((state, handle)) = entry {
            state.stop();
            if handle.join().is_err() {
                tracing::error!("tracking thread panicked");
            }
        }
    }

    /// Whether a live session is currently running.
    #[cfg(feature = "live")]
    pub fn is_live(&self) -> bool {
        self.live.lock().is_some()
    }
}
