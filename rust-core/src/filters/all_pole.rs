//! All-pole (LPC synthesis) filter
//!
//! Feedback-only filter: `y[n] = x[n] - Σ a[i] · y[n-1-i]`. The coefficients
//! are borrowed per call so the caller decides where they live (the vocoder
//! keeps them behind a lock shared with the block-rate update).

/// All-pole filter delay line
pub struct AllPoleFilter {
    /// Past outputs, most recent at index 0
    memory: Vec<f32>,
}

impl AllPoleFilter {
    /// Create a new filter with a zeroed delay line
    ///
    /// # Arguments
    /// * `order` - Number of feedback taps
    pub fn new(order: usize) -> Self {
        Self {
            memory: vec![0.0; order],
        }
    }

    /// Process single sample (zero-allocation)
    ///
    /// # Arguments
    /// * `input` - Excitation sample
    /// * `coefficients` - Feedback taps, same length as the delay line
    #[inline]
    pub fn process_sample(&mut self, input: f32, coefficients: &[f32]) -> f32 {
        debug_assert_eq!(coefficients.len(), self.memory.len());

        let feedback: f32 = coefficients
            .iter()
            .zip(self.memory.iter())
            .map(|(&a, &m)| a * m)
            .sum();
        let output = input - feedback;

        if !self.memory.is_empty() {
            self.memory.rotate_right(1);
            self.memory[0] = output;
        }

        output
    }

    /// Process a block in-place with fixed coefficients
    pub fn process_block_inplace(&mut self, buffer: &mut [f32], coefficients: &[f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample, coefficients);
        }
    }

    /// Reset filter state (clear delay line)
    pub fn reset(&mut self) {
        self.memory.fill(0.0);
    }

    /// Delay line contents
    pub fn memory(&self) -> &[f32] {
        &self.memory
    }

    /// Mutable delay line, for divergence recovery
    pub fn memory_mut(&mut self) -> &mut [f32] {
        &mut self.memory
    }

    /// Get filter order
    pub fn order(&self) -> usize {
        self.memory.len()
    }
}
