//! Double buffer for the voice signal
//!
//! The sample-rate path fills one buffer while the other holds the last
//! completed block for the block-rate analysis. Completing a block swaps the
//! two and raises the ready flag.

/// Outcome of writing one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Sample stored, block not yet complete
    Pending,

    /// Block completed and handed over for analysis
    BlockReady,

    /// Block completed while the previous one was still pending; the
    /// unconsumed block has been overwritten
    Overrun,
}

/// Fill/drain buffer pair with a ready flag
pub struct DoubleBuffer {
    buffers: [Vec<f32>; 2],

    /// Index of the buffer currently being filled
    filling: usize,

    /// Write position within the filling buffer
    position: usize,

    block_ready: bool,
}

impl DoubleBuffer {
    /// Create a buffer pair
    ///
    /// # Arguments
    /// * `block_length` - Samples per block
    pub fn new(block_length: usize) -> Self {
        Self {
            buffers: [vec![0.0; block_length], vec![0.0; block_length]],
            filling: 0,
            position: 0,
            block_ready: false,
        }
    }

    /// Write one sample into the filling buffer
    #[inline]
    pub fn push(&mut self, sample: f32) -> PushOutcome {
        let block_length = self.buffers[self.filling].len();
        self.buffers[self.filling][self.position] = sample;
        self.position += 1;

        if self.position < block_length {
            return PushOutcome::Pending;
        }

        self.position = 0;
        let overrun = self.block_ready;

        self.filling ^= 1;
        self.block_ready = true;

        if overrun {
            PushOutcome::Overrun
        } else {
            PushOutcome::BlockReady
        }
    }

    /// The completed block, if one is pending
    ///
    /// The block stays pending until [`release`](Self::release) is called.
    pub fn ready_block(&mut self) -> Option<&mut [f32]> {
        if self.block_ready {
            Some(&mut self.buffers[self.filling ^ 1])
        } else {
            None
        }
    }

    /// Mark the pending block as consumed
    pub fn release(&mut self) {
        self.block_ready = false;
    }

    /// Check if a completed block is waiting
    pub fn is_ready(&self) -> bool {
        self.block_ready
    }

    /// Current write position in the filling buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get block length
    pub fn block_length(&self) -> usize {
        self.buffers[0].len()
    }

    /// Rewind to an empty, not-ready state (buffers keep their allocation)
    pub fn reset(&mut self) {
        self.position = 0;
        self.block_ready = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_completes_after_block_length() {
        let mut buffer = DoubleBuffer::new(4);

        for i in 0..3 {
            assert_eq!(buffer.push(i as f32), PushOutcome::Pending);
        }
        assert!(buffer.ready_block().is_none());

        assert_eq!(buffer.push(3.0), PushOutcome::BlockReady);
        assert_eq!(buffer.position(), 0);
        assert_eq!(buffer.ready_block().unwrap(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_filling_continues_in_other_buffer() {
        let mut buffer = DoubleBuffer::new(2);
        buffer.push(1.0);
        buffer.push(2.0);

        buffer.push(3.0);

        // Pending block is not disturbed by the next block's samples
        assert_eq!(buffer.ready_block().unwrap(), &[1.0, 2.0]);
        buffer.release();
        assert!(!buffer.is_ready());

        buffer.push(4.0);
        assert_eq!(buffer.ready_block().unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn test_overrun_when_not_released() {
        let mut buffer = DoubleBuffer::new(3);
        for _ in 0..3 {
            buffer.push(1.0);
        }

        buffer.push(2.0);
        buffer.push(2.0);
        let outcome = buffer.push(2.0);

        assert_eq!(outcome, PushOutcome::Overrun);
        assert!(buffer.is_ready());
        let block = buffer.ready_block().unwrap();
        assert_eq!(block.len(), 3);
        assert_eq!(block, &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_reset() {
        let mut buffer = DoubleBuffer::new(2);
        buffer.push(1.0);
        buffer.push(1.0);
        buffer.push(1.0);

        buffer.reset();

        assert_eq!(buffer.position(), 0);
        assert!(!buffer.is_ready());
        assert_eq!(buffer.block_length(), 2);
    }
}
