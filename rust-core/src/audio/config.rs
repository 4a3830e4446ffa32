//! Engine configuration and runtime parameters

use crate::analysis::MAX_ORDER;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Sample rate must be positive and finite (found: {0} Hz)")]
    InvalidSampleRate(f64),

    #[error("LPC order must be at least 1")]
    ZeroOrder,

    #[error("LPC order {order} exceeds the solver capacity of {max}")]
    OrderTooLarge { order: usize, max: usize },

    #[error("Block length {block_length} is too short for LPC order {order} (need at least order + 1 samples)")]
    BlockTooShort { block_length: usize, order: usize },
}

/// Construction parameters, fixed for the engine's lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// LPC order (number of all-pole taps)
    pub order: usize,

    /// Samples per analysis block
    pub block_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            order: 10,
            block_length: 256,
        }
    }
}

impl EngineConfig {
    pub fn new(sample_rate: f64, order: usize, block_length: usize) -> Self {
        Self {
            sample_rate,
            order,
            block_length,
        }
    }

    /// Check the configuration against the engine's preconditions
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.order == 0 {
            return Err(ConfigError::ZeroOrder);
        }
        if self.order > MAX_ORDER {
            return Err(ConfigError::OrderTooLarge {
                order: self.order,
                max: MAX_ORDER,
            });
        }
        if self.block_length < self.order + 1 {
            return Err(ConfigError::BlockTooShort {
                block_length: self.block_length,
                order: self.order,
            });
        }
        Ok(())
    }
}

/// Runtime-tunable parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TalkBoxParams {
    /// Autocorrelation smoothing time constant in seconds
    pub smoothing_time: f32,

    /// Gate threshold on the voice envelope (0.0 = gate off)
    pub gate_level: f32,

    /// Pre-emphasis cut-off frequency in Hz
    pub preemphasis_hz: f64,
}

impl Default for TalkBoxParams {
    fn default() -> Self {
        Self {
            smoothing_time: 0.03,
            gate_level: 0.0,
            preemphasis_hz: 20000.0,
        }
    }
}

/// ACF smoothing coefficient: `1 - block_length / (tau * fs)`, clamped to ≥ 0
///
/// A non-positive time constant disables smoothing.
pub fn smoothing_coefficient(smoothing_time: f32, block_length: usize, sample_rate: f64) -> f32 {
    if smoothing_time <= 0.0 {
        return 0.0;
    }
    let alpha = 1.0 - block_length as f64 / (smoothing_time as f64 * sample_rate);
    alpha.max(0.0) as f32
}
