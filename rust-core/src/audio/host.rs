//! Single-callback host schedule
//!
//! Runs both rates of a [`TalkBox`] from one audio callback: frames are
//! processed one by one and the block-rate update runs between two frames as
//! soon as a block completes, so the two paths never overlap.

use super::talkbox::TalkBox;

/// Drives a [`TalkBox`] from host audio buffers
pub struct InterleavedHost {
    talkbox: TalkBox,

    /// Blocks analyzed since creation
    blocks_analyzed: u64,
}

impl InterleavedHost {
    pub fn new(talkbox: TalkBox) -> Self {
        Self {
            talkbox,
            blocks_analyzed: 0,
        }
    }

    /// Process an interleaved `[carrier, voice, carrier, voice, ...]` buffer
    ///
    /// Carrier slots are overwritten with the vocoder output. A trailing
    /// unpaired sample is left untouched.
    ///
    /// # Returns
    /// Number of frames processed
    pub fn process_interleaved(&mut self, buffer: &mut [f32]) -> usize {
        let mut frames = 0;
        for pair in buffer.chunks_exact_mut(2) {
            pair[0] = self.talkbox.process_sample(pair[0], pair[1]);
            self.run_pending_update();
            frames += 1;
        }
        frames
    }

    /// Process planar carrier and voice buffers, carrier in place
    ///
    /// Only the common length of both slices is processed.
    ///
    /// # Returns
    /// Number of frames processed
    pub fn process_split(&mut self, carrier: &mut [f32], voice: &[f32]) -> usize {
        let frames = carrier.len().min(voice.len());
        for (c, &v) in carrier.iter_mut().zip(voice.iter()) {
            *c = self.talkbox.process_sample(*c, v);
            self.run_pending_update();
        }
        frames
    }

    #[inline]
    fn run_pending_update(&mut self) {
        if self.talkbox.is_block_ready() && self.talkbox.update_coefficients() {
            self.blocks_analyzed += 1;
        }
    }

    /// Blocks analyzed since creation
    pub fn blocks_analyzed(&self) -> u64 {
        self.blocks_analyzed
    }

    pub fn talkbox(&self) -> &TalkBox {
        &self.talkbox
    }

    /// Mutable access for parameter changes between callbacks
    pub fn talkbox_mut(&mut self) -> &mut TalkBox {
        &mut self.talkbox
    }

    pub fn into_inner(self) -> TalkBox {
        self.talkbox
    }
}
