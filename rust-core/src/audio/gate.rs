//! Voice envelope with noise gate
//!
//! Tracks the voice level as a moving average of per-block mean absolute
//! values and closes when the level falls below the gate threshold. The
//! resulting level scales the vocoder output and decides whether the LPC
//! model is refreshed for the block.

/// Blocks in the envelope's moving average
pub const ENVELOPE_HISTORY: usize = 4;

/// Make-up gain applied to the averaged level (+12 dB)
const ENVELOPE_GAIN: f32 = 4.0;

/// Block-rate voice envelope follower
#[derive(Debug, Clone)]
pub struct VoiceEnvelope {
    /// Mean absolute value of the last blocks, newest at index 0
    history: [f32; ENVELOPE_HISTORY],

    /// Gate threshold (0.0 = gate off)
    gate_level: f32,

    /// Current envelope level in [0, 1]
    level: f32,
}

impl VoiceEnvelope {
    /// Create a new envelope follower
    ///
    /// # Arguments
    /// * `gate_level` - Threshold below which the envelope is forced to 0
    pub fn new(gate_level: f32) -> Self {
        Self {
            history: [0.0; ENVELOPE_HISTORY],
            gate_level: gate_level.max(0.0),
            level: 0.0,
        }
    }

    /// Mean absolute value of a block
    pub fn mean_abs(block: &[f32]) -> f32 {
        if block.is_empty() {
            return 0.0;
        }
        block.iter().map(|x| x.abs()).sum::<f32>() / block.len() as f32
    }

    /// Push one block's mean absolute value and recompute the level
    ///
    /// # Returns
    /// The gated envelope level
    pub fn update(&mut self, block_mean_abs: f32) -> f32 {
        self.history.rotate_right(1);
        self.history[0] = block_mean_abs;

        let average = self.history.iter().sum::<f32>() / ENVELOPE_HISTORY as f32;
        let level = (average * ENVELOPE_GAIN).min(1.0);

        self.level = if level < self.gate_level { 0.0 } else { level };
        self.level
    }

    /// Set gate threshold (negative values turn the gate off)
    pub fn set_gate_level(&mut self, gate_level: f32) {
        self.gate_level = gate_level.max(0.0);
    }

    /// Get gate threshold
    pub fn gate_level(&self) -> f32 {
        self.gate_level
    }

    /// Get current envelope level (0.0 to 1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Check if the gate is closed for the current block
    pub fn is_gated(&self) -> bool {
        self.level == 0.0
    }

    /// Reset envelope state
    pub fn reset(&mut self) {
        self.history = [0.0; ENVELOPE_HISTORY];
        self.level = 0.0;
    }
}
