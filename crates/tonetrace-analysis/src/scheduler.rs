//! Update cadence gating.
//!
//! The pitch pipeline is far more expensive than a render pass, so it runs
//! on its own fixed wall-clock cadence while waveform data flows every
//! frame. The gate is plain state driven by caller-supplied elapsed time;
//! it owns no clock, which keeps the session single-threaded and the gate
//! testable with synthetic timestamps.

use std::time::Duration;

/// Elapsed-time gate for the estimation pipeline.
#[derive(Debug, Clone)]
pub struct UpdateScheduler {
    interval: Duration,
    last_run: Option<Duration>,
}

impl UpdateScheduler {
    /// Create a gate that opens every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    /// Whether the pipeline should run at time `now` (monotonic, measured
    /// from session start). The first call always runs.
    ///
    /// On a run the reference advances by whole intervals, so a tick that
    /// arrives late does not shift the cadence grid for later ticks.
    pub fn should_run(&mut self, now: Duration) -> bool {
        match self.last_run {
            None => {
                self.last_run = Some(now);
                true
            }
            Some(last) => {
                let elapsed = now.saturating_sub(last);
                if elapsed < self.interval {
                    return false;
                }
                // A zero interval gates nothing: every tick runs.
                if self.interval.is_zero() {
                    self.last_run = Some(now);
                    return true;
                }
                let periods = (elapsed.as_nanos() / self.interval.as_nanos()) as u32;
                self.last_run = Some(last + self.interval * periods);
                true
            }
        }
    }

    /// Configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Forget the last run, so the next tick fires immediately.
    pub fn reset(&mut self) {
        self.last_run = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn gates_ticks_to_the_configured_interval() {
        let mut scheduler = UpdateScheduler::new(ms(200));

        let fired: Vec<u64> = [0, 50, 120, 210, 400]
            .into_iter()
            .filter(|&t| scheduler.should_run(ms(t)))
            .collect();

        assert_eq!(fired, vec![0, 210, 400]);
    }

    #[test]
    fn first_tick_always_runs() {
        let mut scheduler = UpdateScheduler::new(ms(200));
        assert!(scheduler.should_run(ms(1500)));
        assert!(!scheduler.should_run(ms(1600)));
    }

    #[test]
    fn long_stall_fires_once_and_realigns() {
        let mut scheduler = UpdateScheduler::new(ms(200));
        assert!(scheduler.should_run(ms(0)));
        // 900 ms late: one run, reference lands on the 800 ms grid point.
        assert!(scheduler.should_run(ms(900)));
        assert!(!scheduler.should_run(ms(950)));
        assert!(scheduler.should_run(ms(1000)));
    }

    #[test]
    fn zero_interval_runs_every_tick() {
        let mut scheduler = UpdateScheduler::new(ms(0));
        assert!(scheduler.should_run(ms(0)));
        assert!(scheduler.should_run(ms(0)));
        assert!(scheduler.should_run(ms(1)));
    }

    #[test]
    fn reset_reopens_the_gate() {
        let mut scheduler = UpdateScheduler::new(ms(200));
        assert!(scheduler.should_run(ms(0)));
        scheduler.reset();
        assert!(scheduler.should_run(ms(10)));
    }
}
