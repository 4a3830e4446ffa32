//! Tunable pre-emphasis high-pass
//!
//! First-order allpass `A(z) = (c + z^-1) / (1 + c z^-1)`; the high-pass is
//! `(1 - A(z)) / 2`. The allpass coefficient comes from the bilinear-transform
//! tangent mapping of the cut-off frequency.

use std::f64::consts::PI;

/// Cut-off bounds as fractions of Nyquist
const MIN_CUTOFF_RATIO: f64 = 1e-6;
const MAX_CUTOFF_RATIO: f64 = 0.999;

/// Allpass-derived first-order high-pass
#[derive(Debug, Clone)]
pub struct PreEmphasis {
    /// Allpass coefficient, always in (-1, 1)
    coeff: f64,

    /// [non-recursive state, recursive state]
    mem: [f64; 2],

    sample_rate: f64,
}

impl PreEmphasis {
    /// Create a new high-pass
    ///
    /// # Arguments
    /// * `cutoff_hz` - Cut-off frequency, clamped into (0, sample_rate/2);
    ///   a non-finite value falls back to the highest allowed cut-off
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(cutoff_hz: f64, sample_rate: f64) -> Self {
        let mut filter = Self {
            coeff: Self::coefficient_for(sample_rate / 2.0 * MAX_CUTOFF_RATIO, sample_rate),
            mem: [0.0; 2],
            sample_rate,
        };
        filter.set_cutoff(cutoff_hz);
        filter
    }

    /// Allpass coefficient for a cut-off: `(t - 1) / (t + 1)`, `t = tan(π fc / fs)`
    pub fn coefficient_for(cutoff_hz: f64, sample_rate: f64) -> f64 {
        let t = (PI * cutoff_hz / sample_rate).tan();
        (t - 1.0) / (t + 1.0)
    }

    /// Recompute the coefficient for a new cut-off frequency
    ///
    /// A non-finite cut-off is ignored and the previous coefficient kept.
    ///
    /// # Returns
    /// `true` if the coefficient was updated
    pub fn set_cutoff(&mut self, cutoff_hz: f64) -> bool {
        if !cutoff_hz.is_finite() {
            tracing::warn!(cutoff_hz, "ignoring non-finite pre-emphasis cut-off");
            return false;
        }

        let nyquist = self.sample_rate / 2.0;
        // Keep tan() away from its pole at fs/2 and the coefficient inside (-1, 1)
        let cutoff = cutoff_hz.clamp(nyquist * MIN_CUTOFF_RATIO, nyquist * MAX_CUTOFF_RATIO);
        self.coeff = Self::coefficient_for(cutoff, self.sample_rate);
        true
    }

    /// Current allpass coefficient
    pub fn coefficient(&self) -> f64 {
        self.coeff
    }

    /// Process single sample
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let x = 0.5 * input;
        let y = self.coeff * (x - self.mem[1]) + self.mem[0];

        self.mem[0] = x;
        self.mem[1] = y;

        x - y
    }

    /// Process a block in-place
    pub fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample as f64) as f32;
        }
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.mem = [0.0; 2];
    }
}
