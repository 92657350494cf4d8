//! Monophonic pitch estimation via time-domain autocorrelation.
//!
//! Suitable for:
//! - Instrument tuners
//! - Vocal pitch display
//! - Single-voice melodic tracking
//!
//! ## Algorithm
//!
//! The detector slides a fixed-length probe of the signal against itself
//! over a bounded range of candidate lags and scores each lag with the
//! unnormalized autocorrelation `sum(x[i] * x[i + lag])`, divided by the
//! probe length. The division normalizes across probe length only, not
//! across amplitude: louder periodic content scores higher, which is what
//! rejects weakly correlated noise. The best lag must strictly beat a
//! running best that starts at zero, so a window with no net-positive
//! periodic correlation reports no pitch at all rather than a spurious lag.
//!
//! ## Performance
//!
//! O(search_range x probe_length) per call. Both ends of the lag range are
//! bounded: the lower end caps the highest detectable frequency, the upper
//! end caps the cost of the nested sum and the lowest detectable frequency.
//! The correlation profile is a pre-sized scratch buffer reset on each
//! call, so the hot loop never allocates.

use crate::config::TrackerConfig;

/// One pitch measurement, with note bookkeeping for display.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PitchReading {
    /// Frequency in Hz (0.0 when no pitch was found).
    pub frequency: f32,
    /// Nearest MIDI note number (if a pitch was found).
    pub midi_note: Option<u8>,
    /// Cents deviation from the nearest note (-50 to +50).
    pub cents_offset: f32,
}

impl PitchReading {
    /// Build a reading from a raw frequency estimate.
    pub fn from_frequency(frequency: f32) -> Self {
        if frequency <= 0.0 {
            return Self::default();
        }
        let (midi_note, cents_offset) = freq_to_midi(frequency);
        Self {
            frequency,
            midi_note: Some(midi_note),
            cents_offset,
        }
    }

    /// Check whether a pitch was detected.
    pub fn is_voiced(&self) -> bool {
        self.frequency > 0.0
    }

    /// Note name with sharp notation (e.g. "A4", "C#5").
    pub fn note_name(&self) -> Option<String> {
        self.midi_note.map(|note| {
            const NAMES: [&str; 12] = [
                "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
            ];
            let name = NAMES[(note % 12) as usize];
            let octave = (note / 12) as i32 - 1;
            format!("{}{}", name, octave)
        })
    }

    /// Note name with flat notation (e.g. "A4", "Db5").
    pub fn note_name_flat(&self) -> Option<String> {
        self.midi_note.map(|note| {
            const NAMES: [&str; 12] = [
                "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
            ];
            let name = NAMES[(note % 12) as usize];
            let octave = (note / 12) as i32 - 1;
            format!("{}{}", name, octave)
        })
    }
}

/// Time-domain autocorrelation pitch detector.
///
/// Owns its correlation-profile scratch buffer, so repeated calls on a
/// session are allocation-free. The input window is never mutated and the
/// detector keeps no state between calls beyond that scratch space:
/// identical windows produce identical estimates.
pub struct AutocorrelationDetector {
    sample_rate: f64,
    min_lag: usize,
    max_lag: usize,

    // Correlation profile, indexed by lag. Reset, not reallocated, per call.
    profile: Vec<f32>,
}

impl AutocorrelationDetector {
    /// Create a detector with the default 100-1470 Hz search range
    /// (lags 30..441 at 44.1 kHz).
    pub fn new(sample_rate: f64) -> Self {
        Self::with_lag_bounds(sample_rate, 30, 441)
    }

    /// Create a detector with custom lag bounds.
    ///
    /// `min_lag` caps the highest detectable frequency
    /// (`sample_rate / min_lag`), `max_lag` the lowest. Bounds are validated
    /// by [`TrackerConfig::validate`] before a session starts, not here.
    pub fn with_lag_bounds(sample_rate: f64, min_lag: usize, max_lag: usize) -> Self {
        Self {
            sample_rate,
            min_lag,
            max_lag,
            profile: vec![0.0; max_lag],
        }
    }

    /// Create a detector from a validated session configuration.
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::with_lag_bounds(config.sample_rate, config.min_lag, config.max_lag)
    }

    /// Minimum window length `detect` needs: the probe is `max_lag` samples
    /// long and is shifted by up to `max_lag - 1` samples.
    pub fn required_window_len(&self) -> usize {
        self.max_lag * 2
    }

    /// Estimate the fundamental frequency of one sample window.
    ///
    /// Returns the frequency in Hz, or `0.0` when no candidate lag produced
    /// a positive correlation (silence, noise, or uniformly negative
    /// correlations across the whole search range).
    pub fn detect(&mut self, samples: &[f32]) -> f32 {
        if samples.len() < self.required_window_len() || self.min_lag >= self.max_lag {
            return 0.0;
        }

        self.profile.fill(0.0);

        let probe_len = self.max_lag;
        let mut best_lag = None;
        let mut best_score = 0.0f32;

        for lag in self.min_lag..self.max_lag {
            let mut correlation = 0.0f32;
            for i in 0..probe_len {
                correlation += samples[i] * samples[i + lag];
            }
            self.profile[lag] = correlation;

            let score = correlation / probe_len as f32;
            if score > best_score {
                best_score = score;
                best_lag = Some(lag);
            }
        }

        match best_lag {
            Some(lag) => (self.sample_rate / lag as f64) as f32,
            None => 0.0,
        }
    }

    /// Estimate pitch over an entire buffer, one raw estimate per hop.
    ///
    /// Offline convenience for pre-recorded material; the live path calls
    /// [`detect`](Self::detect) directly on the rolling window.
    pub fn detect_track(&mut self, samples: &[f32], hop_size: usize) -> Vec<f32> {
        let frame_len = self.required_window_len();
        if samples.len() < frame_len || hop_size == 0 {
            return Vec::new();
        }

        let num_frames = (samples.len() - frame_len) / hop_size + 1;
        let mut track = Vec::with_capacity(num_frames);
        for i in 0..num_frames {
            let start = i * hop_size;
            track.push(self.detect(&samples[start..start + frame_len]));
        }
        track
    }

    /// Correlation profile from the most recent [`detect`](Self::detect)
    /// call, indexed by lag. Useful for plotting the search landscape;
    /// lags outside the search range stay at zero.
    pub fn correlation_profile(&self) -> &[f32] {
        &self.profile
    }

    /// Sample rate this detector was built for.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

/// Convert frequency to MIDI note and cents offset.
pub fn freq_to_midi(freq: f32) -> (u8, f32) {
    if freq <= 0.0 {
        return (0, 0.0);
    }

    let note_float = 69.0 + 12.0 * (freq / 440.0).log2();
    let note = (note_float.round() as i32).clamp(0, 127) as u8;

    let note_freq = 440.0 * 2.0f32.powf((note as f32 - 69.0) / 12.0);
    let cents = 1200.0 * (freq / note_freq).log2();

    (note, cents)
}

/// Convert MIDI note to frequency.
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * 2.0f32.powf((note as f32 - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 44100.0;

    /// Sine with a gentle exponential decay. Real tones decay, and the decay
    /// makes the fundamental lag score strictly above its multiples, so the
    /// detected lag is deterministic.
    fn generate_decaying_sine(freq: f64, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| {
                let t = i as f64 / SAMPLE_RATE;
                let envelope = (-(i as f64) / 80_000.0).exp();
                (2.0 * std::f64::consts::PI * freq * t).sin() as f32 * envelope as f32
            })
            .collect()
    }

    /// One-lag quantization error at the given lag.
    fn lag_resolution(lag: f64) -> f64 {
        SAMPLE_RATE / (lag - 1.0) - SAMPLE_RATE / lag
    }

    #[test]
    fn silence_reports_no_pitch() {
        let mut detector = AutocorrelationDetector::new(SAMPLE_RATE);
        let samples = vec![0.0f32; 4096];
        assert_eq!(detector.detect(&samples), 0.0);
    }

    #[test]
    fn short_window_reports_no_pitch() {
        let mut detector = AutocorrelationDetector::new(SAMPLE_RATE);
        let samples = generate_decaying_sine(441.0, 500);
        assert_eq!(detector.detect(&samples), 0.0);
    }

    #[test]
    fn detects_sine_within_lag_resolution() {
        let mut detector = AutocorrelationDetector::new(SAMPLE_RATE);

        // Whole-sample periods spread over the search range.
        for lag in [45.0, 100.0, 440.0] {
            let freq = SAMPLE_RATE / lag;
            let samples = generate_decaying_sine(freq, 4096);
            let detected = detector.detect(&samples) as f64;
            assert!(
                (detected - freq).abs() <= lag_resolution(lag),
                "expected ~{} Hz, got {} Hz",
                freq,
                detected
            );
        }
    }

    #[test]
    fn correlation_profile_covers_the_search_range_only() {
        let mut detector = AutocorrelationDetector::new(SAMPLE_RATE);
        let samples = generate_decaying_sine(441.0, 4096);
        detector.detect(&samples);

        let profile = detector.correlation_profile();
        assert_eq!(profile.len(), 441);
        assert!(profile[..30].iter().all(|&c| c == 0.0));
        assert!(profile[100] > 0.0);
    }

    #[test]
    fn detection_is_idempotent() {
        let mut detector = AutocorrelationDetector::new(SAMPLE_RATE);
        let samples = generate_decaying_sine(441.0, 4096);

        let first = detector.detect(&samples);
        let second = detector.detect(&samples);
        assert_eq!(first, second);
    }

    #[test]
    fn uniformly_negative_correlations_report_no_pitch() {
        // Probe of ones against a tail of minus ones: every lag in 221..441
        // scores 441 - 2 * lag < 0, so nothing beats the zero threshold.
        let mut detector = AutocorrelationDetector::with_lag_bounds(SAMPLE_RATE, 221, 441);
        let mut samples = vec![1.0f32; 441];
        samples.extend(std::iter::repeat(-1.0f32).take(441));
        assert_eq!(detector.detect(&samples), 0.0);
    }

    #[test]
    fn silent_probe_reports_no_pitch() {
        // Only the probe region drives the correlation; a loud tail cannot
        // produce a positive score on its own.
        let mut detector = AutocorrelationDetector::new(SAMPLE_RATE);
        let mut samples = vec![0.0f32; 441];
        samples.extend(generate_decaying_sine(441.0, 441));
        assert_eq!(detector.detect(&samples), 0.0);
    }

    #[test]
    fn minimal_window_stays_in_bounds() {
        // Exactly 2 * max_lag samples: the largest read is
        // (probe_len - 1) + (max_lag - 1), one short of the window end.
        let mut detector = AutocorrelationDetector::new(SAMPLE_RATE);
        let samples = generate_decaying_sine(441.0, 882);
        let detected = detector.detect(&samples);
        assert!(detected.is_finite());
        assert!(detected >= 0.0);
    }

    #[test]
    fn custom_bounds_shift_the_detectable_range() {
        // 88.2 Hz (a 500-sample period) is below the default floor but
        // inside widened bounds.
        let lag = 500.0;
        let freq = SAMPLE_RATE / lag;
        let samples = generate_decaying_sine(freq, 8192);

        let mut default_detector = AutocorrelationDetector::new(SAMPLE_RATE);
        let mut wide_detector = AutocorrelationDetector::with_lag_bounds(SAMPLE_RATE, 30, 1000);

        let wide = wide_detector.detect(&samples) as f64;
        assert!(
            (wide - freq).abs() <= lag_resolution(lag),
            "expected ~{} Hz, got {} Hz",
            freq,
            wide
        );
        // The default range bottoms out at 100 Hz and cannot report 88.2 Hz.
        let narrow = default_detector.detect(&samples) as f64;
        assert!(narrow == 0.0 || narrow >= SAMPLE_RATE / 441.0);
    }

    #[test]
    fn detect_track_covers_the_buffer() {
        let mut detector = AutocorrelationDetector::new(SAMPLE_RATE);
        let samples = generate_decaying_sine(441.0, 4096);

        let track = detector.detect_track(&samples, 882);
        assert_eq!(track.len(), (4096 - 882) / 882 + 1);
        assert!(track.iter().all(|hz| *hz > 0.0));
    }

    #[test]
    fn reading_from_frequency() {
        let reading = PitchReading::from_frequency(440.0);
        assert!(reading.is_voiced());
        assert_eq!(reading.midi_note, Some(69));
        assert!(reading.cents_offset.abs() < 1.0);
        assert_eq!(reading.note_name(), Some("A4".to_string()));

        let silent = PitchReading::from_frequency(0.0);
        assert!(!silent.is_voiced());
        assert_eq!(silent.midi_note, None);
    }

    #[test]
    fn note_names_sharp_and_flat() {
        let reading = PitchReading::from_frequency(277.18); // C#4 / Db4
        assert_eq!(reading.note_name(), Some("C#4".to_string()));
        assert_eq!(reading.note_name_flat(), Some("Db4".to_string()));
    }

    #[test]
    fn freq_midi_round_trip() {
        for midi in [36, 48, 60, 69, 72, 84, 96] {
            let freq = midi_to_freq(midi);
            let (back, cents) = freq_to_midi(freq);
            assert_eq!(back, midi);
            assert!(cents.abs() < 0.01);
        }
    }
}
