//! Spectral envelope of the current all-pole model
//!
//! Evaluates `gain / |A(e^jω)|` on a real-FFT grid, where
//! `A(z) = 1 + Σ a[i] z^-(i+1)`. The inverse of the denominator's spectrum is
//! the formant envelope the vocoder is imposing on the carrier.

use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;
use thiserror::Error;

/// Floor applied before taking logarithms
const MAGNITUDE_FLOOR: f64 = 1e-10;

#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("FFT size {fft_size} is too small for {order} coefficients")]
    FftTooSmall { fft_size: usize, order: usize },

    #[error("FFT processing failed: {0}")]
    Fft(String),
}

/// FFT-based evaluator for LPC envelopes
pub struct EnvelopeAnalyzer {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer holding the denominator polynomial
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<num_complex::Complex<f64>>,
}

impl EnvelopeAnalyzer {
    /// Create new envelope analyzer
    ///
    /// # Arguments
    /// * `fft_size` - FFT size; resolution is `sample_rate / fft_size`
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        Self {
            fft_size,
            input_buffer: r2c.make_input_vec(),
            output_buffer: r2c.make_output_vec(),
            r2c,
        }
    }

    /// Magnitude response of the all-pole model
    ///
    /// # Arguments
    /// * `coefficients` - Feedback taps `a[0..n]` (leading 1.0 implicit)
    /// * `gain` - Excitation gain (the vocoder's error gain)
    ///
    /// # Returns
    /// `|H[k]|` for k = 0..fft_size/2
    pub fn compute_magnitude(
        &mut self,
        coefficients: &[f32],
        gain: f64,
    ) -> Result<Vec<f64>, EnvelopeError> {
        if coefficients.len() + 1 > self.fft_size {
            return Err(EnvelopeError::FftTooSmall {
                fft_size: self.fft_size,
                order: coefficients.len(),
            });
        }

        self.input_buffer.fill(0.0);
        self.input_buffer[0] = 1.0;
        for (slot, &a) in self.input_buffer[1..].iter_mut().zip(coefficients) {
            *slot = a as f64;
        }

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| EnvelopeError::Fft(e.to_string()))?;

        Ok(self
            .output_buffer
            .iter()
            .map(|c| gain / c.norm().max(MAGNITUDE_FLOOR))
            .collect())
    }

    /// Magnitude response in dB: 20*log10(|H[k]|)
    pub fn compute_db(
        &mut self,
        coefficients: &[f32],
        gain: f64,
    ) -> Result<Vec<f64>, EnvelopeError> {
        let magnitude = self.compute_magnitude(coefficients, gain)?;
        Ok(magnitude
            .iter()
            .map(|&mag| 20.0 * mag.max(MAGNITUDE_FLOOR).log10())
            .collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Frequency of each bin in Hz
    pub fn frequency_axis_hz(&self, sample_rate: f64) -> Vec<f64> {
        (0..self.num_bins())
            .map(|bin| bin as f64 * sample_rate / self.fft_size as f64)
            .collect()
    }
}
