//! Waveform summaries for display.
//!
//! The raw sample window is forwarded for rendering on every tick,
//! unthrottled. Renderers rarely want one point per sample, so the window
//! is reduced to min/max/RMS blocks at a configurable resolution.

/// A single block of waveform summary data.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct WaveformBlock {
    /// Minimum sample value in this block.
    pub min: f32,
    /// Maximum sample value in this block.
    pub max: f32,
    /// RMS level of this block.
    pub rms: f32,
}

/// Waveform summary of one mono sample window.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct WaveformSummary {
    /// Summary blocks, oldest first.
    pub blocks: Vec<WaveformBlock>,
    /// Number of samples per block.
    pub samples_per_block: usize,
    /// Total number of samples summarized.
    pub total_samples: usize,
}

impl WaveformSummary {
    /// Create a new empty summary.
    pub fn new(samples_per_block: usize) -> Self {
        Self {
            blocks: Vec::new(),
            samples_per_block,
            total_samples: 0,
        }
    }

    fn with_capacity(samples_per_block: usize, num_blocks: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(num_blocks),
            samples_per_block,
            total_samples: 0,
        }
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Overall peak level.
    pub fn peak(&self) -> f32 {
        self.blocks
            .iter()
            .map(|b| b.min.abs().max(b.max.abs()))
            .fold(0.0f32, |a, b| a.max(b))
    }

    /// Average RMS level across blocks.
    pub fn average_rms(&self) -> f32 {
        if self.blocks.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.blocks.iter().map(|b| b.rms).sum();
        sum / self.blocks.len() as f32
    }
}

fn compute_block(samples: &[f32]) -> WaveformBlock {
    if samples.is_empty() {
        return WaveformBlock::default();
    }

    let mut min = f32::MAX;
    let mut max = f32::MIN;
    let mut sum_sq = 0.0f32;

    for &sample in samples {
        min = min.min(sample);
        max = max.max(sample);
        sum_sq += sample * sample;
    }

    WaveformBlock {
        min,
        max,
        rms: (sum_sq / samples.len() as f32).sqrt(),
    }
}

/// Summarize a mono sample window into min/max/RMS blocks.
///
/// The final block may cover fewer than `samples_per_block` samples when
/// the window length is not a multiple of the block size.
pub fn compute_summary(samples: &[f32], samples_per_block: usize) -> WaveformSummary {
    if samples.is_empty() || samples_per_block == 0 {
        return WaveformSummary::new(samples_per_block);
    }

    let num_blocks = samples.len().div_ceil(samples_per_block);
    let mut summary = WaveformSummary::with_capacity(samples_per_block, num_blocks);
    summary.total_samples = samples.len();

    for chunk in samples.chunks(samples_per_block) {
        summary.blocks.push(compute_block(chunk));
    }

    summary
}
