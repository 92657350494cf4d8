//! Median smoothing of raw pitch estimates.
//!
//! Raw per-window estimates are noisy: octave errors and spurious zero
//! readings appear for a window or two and vanish. A median over a short
//! history rejects those outliers outright where a mean would be dragged
//! toward them. Zero readings (no pitch found) enter the history like any
//! other value, so sustained silence pulls the median down to zero while a
//! single dropout is ignored.

use std::collections::VecDeque;

/// Bounded FIFO history of raw estimates, reduced to its median.
#[derive(Debug, Clone)]
pub struct MedianSmoother {
    history: VecDeque<f32>,
    capacity: usize,
}

impl MedianSmoother {
    /// Create a smoother holding up to `capacity` recent raw estimates.
    ///
    /// Capacity is validated by the session configuration; a zero capacity
    /// never reaches this point.
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append one raw estimate and return the median of the history.
    ///
    /// The oldest entry is evicted once the history is over capacity. At
    /// most one value is appended per call, so one eviction suffices.
    pub fn push(&mut self, raw_hz: f32) -> f32 {
        self.history.push_back(raw_hz);
        if self.history.len() > self.capacity {
            self.history.pop_front();
        }
        self.smoothed()
    }

    /// Median of the current history without pushing a new value.
    ///
    /// Odd count: middle element. Even count: mean of the two middle
    /// elements. Empty history: 0.0.
    pub fn smoothed(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }

        let mut sorted: Vec<f32> = self.history.iter().copied().collect();
        sorted.sort_by(f32::total_cmp);

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }

    /// Number of estimates currently held.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether no estimate has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Configured history capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all history, returning the smoother to its initial state.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_reports_zero() {
        let smoother = MedianSmoother::new(5);
        assert_eq!(smoother.smoothed(), 0.0);
    }

    #[test]
    fn steady_input_passes_through() {
        let mut smoother = MedianSmoother::new(5);
        let mut last = 0.0;
        for _ in 0..5 {
            last = smoother.push(100.0);
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn rejects_a_single_dropout() {
        let mut smoother = MedianSmoother::new(5);
        for value in [100.0, 0.0, 100.0, 100.0] {
            smoother.push(value);
        }
        assert_eq!(smoother.push(100.0), 100.0);
    }

    #[test]
    fn even_count_averages_the_middle_pair() {
        let mut smoother = MedianSmoother::new(5);
        smoother.push(90.0);
        assert_eq!(smoother.push(100.0), 95.0);
    }

    #[test]
    fn history_is_bounded_with_fifo_eviction() {
        let mut smoother = MedianSmoother::new(5);
        for value in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0] {
            smoother.push(value);
        }
        // The first value is gone; the remaining five are 20..60.
        assert_eq!(smoother.len(), 5);
        assert_eq!(smoother.smoothed(), 40.0);
    }

    #[test]
    fn sustained_silence_pulls_the_median_down() {
        let mut smoother = MedianSmoother::new(5);
        for _ in 0..5 {
            smoother.push(100.0);
        }
        let mut last = smoother.smoothed();
        for _ in 0..3 {
            last = smoother.push(0.0);
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn clear_resets_to_initial_state() {
        let mut smoother = MedianSmoother::new(5);
        smoother.push(100.0);
        smoother.clear();
        assert!(smoother.is_empty());
        assert_eq!(smoother.smoothed(), 0.0);
    }
}
