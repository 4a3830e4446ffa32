//! Talk-box vocoder engine
//!
//! Imposes the spectral envelope of a voice signal onto a carrier. Two entry
//! points run at different rates:
//!
//! * [`TalkBox::process`] once per frame: filters the carrier through the
//!   active all-pole model and collects the voice sample into a block.
//! * [`TalkBox::update_coefficients`] once per block: analyzes the last
//!   completed voice block and publishes a new all-pole model.
//!
//! The active coefficient vector is the only state both paths touch; it sits
//! behind a mutex held for one filter step on the sample side and for one bulk
//! copy on the block side.

use crate::analysis::{
    autocorrelation, levinson_durbin, EnvelopeAnalyzer, EnvelopeError, DEFAULT_K_MAX,
};
use crate::audio::buffer::{DoubleBuffer, PushOutcome};
use crate::audio::config::{smoothing_coefficient, ConfigError, EngineConfig, TalkBoxParams};
use crate::audio::diagnostics::{
    self, Diagnostic, DiagnosticReceiver, DiagnosticSender, FilterTarget, DIAGNOSTIC_CAPACITY,
};
use crate::audio::gate::VoiceEnvelope;
use crate::filters::{check_filter, AllPoleFilter, PreEmphasis};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Blocks averaged before exponential smoothing of the autocorrelation
pub const ACF_HISTORY: usize = 4;

/// Lock the active coefficients; a poisoned lock still guards plain floats
fn lock_coefficients(active: &Mutex<Vec<f32>>) -> MutexGuard<'_, Vec<f32>> {
    active.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read handle onto the active coefficient vector
///
/// Snapshots are taken under the same lock the engine publishes with, so a
/// reader sees either the previous or the new model, never a mix.
#[derive(Clone)]
pub struct CoefficientReader {
    active: Arc<Mutex<Vec<f32>>>,
}

impl CoefficientReader {
    /// Copy of the active coefficients
    pub fn snapshot(&self) -> Vec<f32> {
        lock_coefficients(&self.active).clone()
    }

    /// Copy the active coefficients into `out` (zero-allocation)
    ///
    /// Copies `min(out.len(), order)` values.
    pub fn copy_into(&self, out: &mut [f32]) {
        let active = lock_coefficients(&self.active);
        let n = out.len().min(active.len());
        out[..n].copy_from_slice(&active[..n]);
    }
}

/// Rotating autocorrelation history with exponential smoothing
struct AcfSmoother {
    /// Last `ACF_HISTORY` block autocorrelations, each `order + 1` long
    history: Vec<Vec<f32>>,

    /// Slot written by the next block
    index: usize,

    /// Exponentially smoothed average
    smoothed: Vec<f32>,

    /// Smoothing coefficient in [0, 1)
    alpha: f32,
}

impl AcfSmoother {
    fn new(lags: usize, alpha: f32) -> Self {
        Self {
            history: vec![vec![0.0; lags]; ACF_HISTORY],
            index: 0,
            smoothed: vec![0.0; lags],
            alpha,
        }
    }

    /// Fold one analysis block into the smoothed autocorrelation
    fn push_block(&mut self, block: &[f32]) {
        autocorrelation(block, &mut self.history[self.index]);

        // The current slot becomes the mean of all slots
        let lags = self.smoothed.len();
        for lag in 0..lags {
            let mean = self.history.iter().map(|slot| slot[lag]).sum::<f32>() / ACF_HISTORY as f32;
            self.history[self.index][lag] = mean;
        }

        let alpha = self.alpha;
        for (smoothed, &averaged) in self.smoothed.iter_mut().zip(self.history[self.index].iter()) {
            *smoothed = alpha * *smoothed + (1.0 - alpha) * averaged;
        }
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % ACF_HISTORY;
    }

    fn reset(&mut self) {
        for slot in self.history.iter_mut() {
            slot.fill(0.0);
        }
        self.smoothed.fill(0.0);
        self.index = 0;
    }
}

/// Voice-excited LPC vocoder
pub struct TalkBox {
    config: EngineConfig,

    /// Synthesis filter delay line (sample-rate path only)
    synthesis: AllPoleFilter,

    /// Coefficients used by the synthesis filter, shared with the block path
    active: Arc<Mutex<Vec<f32>>>,

    /// Voice fill/drain buffers
    input: DoubleBuffer,

    /// Pre-emphasis applied to each drained block
    preemphasis: PreEmphasis,

    /// Voice envelope and gate
    envelope: VoiceEnvelope,

    acf: AcfSmoother,

    /// Solver output, copied into `active` when published
    working: Vec<f32>,

    /// Excitation gain, sqrt of the LPC residual power
    error_gain: f32,

    /// Gated voice envelope applied to the output
    voice_gain: f32,

    /// Stored so that `smoothing_time()` reports what was set
    smoothing_time: f32,

    overruns: u64,

    diagnostics: DiagnosticSender,
    diagnostics_rx: Option<DiagnosticReceiver>,
}

impl TalkBox {
    /// Create an engine with default runtime parameters
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_params(config, TalkBoxParams::default())
    }

    /// Create an engine
    ///
    /// All buffers are allocated here; neither rate allocates afterwards.
    ///
    /// # Arguments
    /// * `config` - Sample rate, LPC order and block length
    /// * `params` - Initial smoothing time, gate level and pre-emphasis
    pub fn with_params(config: EngineConfig, params: TalkBoxParams) -> Result<Self, ConfigError> {
        config.validate()?;

        let order = config.order;
        let alpha = smoothing_coefficient(
            params.smoothing_time,
            config.block_length,
            config.sample_rate,
        );
        let (diagnostics, diagnostics_rx) = diagnostics::channel(DIAGNOSTIC_CAPACITY);

        tracing::debug!(
            sample_rate = config.sample_rate,
            order,
            block_length = config.block_length,
            "creating talk box"
        );

        Ok(Self {
            synthesis: AllPoleFilter::new(order),
            active: Arc::new(Mutex::new(vec![0.0; order])),
            input: DoubleBuffer::new(config.block_length),
            preemphasis: PreEmphasis::new(params.preemphasis_hz, config.sample_rate),
            envelope: VoiceEnvelope::new(params.gate_level),
            acf: AcfSmoother::new(order + 1, alpha),
            working: vec![0.0; order],
            error_gain: 0.0,
            voice_gain: 0.0,
            smoothing_time: params.smoothing_time,
            overruns: 0,
            diagnostics,
            diagnostics_rx: Some(diagnostics_rx),
            config,
        })
    }

    /// Process one frame in place
    ///
    /// `frame[0]` is the carrier and is replaced by the vocoder output;
    /// `frame[1]` is the voice sample and is only read.
    #[inline]
    pub fn process(&mut self, frame: &mut [f32; 2]) {
        frame[0] = self.process_sample(frame[0], frame[1]);
    }

    /// Process one carrier/voice pair and return the output sample
    #[inline]
    pub fn process_sample(&mut self, carrier: f32, voice: f32) -> f32 {
        let excitation = carrier * self.error_gain * self.voice_gain;

        let output = {
            let active = lock_coefficients(&self.active);
            self.synthesis.process_sample(excitation, &active)
        };

        match self.input.push(voice) {
            PushOutcome::Pending | PushOutcome::BlockReady => {}
            PushOutcome::Overrun => self.report_overrun(),
        }

        output
    }

    #[cold]
    fn report_overrun(&mut self) {
        self.overruns += 1;
        tracing::warn!(
            total = self.overruns,
            "timing error: voice block completed before the previous one was analyzed"
        );
        self.diagnostics.send(Diagnostic::Overrun {
            total: self.overruns,
        });
    }

    /// Analyze the pending voice block and publish new coefficients
    ///
    /// Does nothing when no block is pending.
    ///
    /// # Returns
    /// `true` if a block was consumed
    pub fn update_coefficients(&mut self) -> bool {
        let Some(block) = self.input.ready_block() else {
            return false;
        };

        let mean_abs = VoiceEnvelope::mean_abs(block);
        self.preemphasis.process_block_inplace(block);

        self.voice_gain = self.envelope.update(mean_abs);

        self.acf.push_block(block);

        if self.voice_gain != 0.0 {
            let power = levinson_durbin(&self.acf.smoothed, &mut self.working, DEFAULT_K_MAX);
            self.error_gain = power.max(0.0).sqrt();

            let mut active = lock_coefficients(&self.active);
            active.copy_from_slice(&self.working);
        } else {
            tracing::trace!(mean_abs, "voice gated, holding coefficients");
            self.error_gain = 0.0;
        }

        self.acf.advance();
        self.input.release();
        true
    }

    /// Return all mutable state to its constructed values
    ///
    /// Buffers keep their allocation; the active coefficients are kept so the
    /// filter resumes with its last shape.
    pub fn reset_states(&mut self) {
        self.voice_gain = 0.0;
        self.error_gain = 0.0;
        self.input.reset();
        self.preemphasis.reset();
        self.envelope.reset();
        self.acf.reset();
        self.synthesis.reset();
        self.overruns = 0;
        tracing::debug!("talk box state reset");
    }

    /// Zero the active coefficients if they contain NaN or infinity
    ///
    /// # Returns
    /// `true` if the coefficients were unstable and have been cleared
    pub fn check_coefficients(&mut self) -> bool {
        let unstable = {
            let mut active = lock_coefficients(&self.active);
            check_filter(&mut active)
        };
        if unstable {
            self.diagnostics.send(Diagnostic::UnstableFilter {
                target: FilterTarget::Coefficients,
            });
        }
        unstable
    }

    /// Zero the synthesis delay line if it contains NaN or infinity
    ///
    /// # Returns
    /// `true` if the delay line was unstable and has been cleared
    pub fn check_filter_memory(&mut self) -> bool {
        let unstable = check_filter(self.synthesis.memory_mut());
        if unstable {
            self.diagnostics.send(Diagnostic::UnstableFilter {
                target: FilterTarget::Memory,
            });
        }
        unstable
    }

    /// Set the autocorrelation smoothing time constant in seconds
    pub fn set_smoothing_time(&mut self, smoothing_time: f32) {
        self.smoothing_time = smoothing_time;
        self.acf.alpha = smoothing_coefficient(
            smoothing_time,
            self.config.block_length,
            self.config.sample_rate,
        );
        tracing::debug!(smoothing_time, alpha = self.acf.alpha, "smoothing time changed");
    }

    /// Set the gate threshold on the voice envelope
    pub fn set_gate_level(&mut self, level: f32) {
        self.envelope.set_gate_level(level);
        tracing::debug!(gate_level = self.envelope.gate_level(), "gate level changed");
    }

    /// Set the pre-emphasis cut-off frequency in Hz
    ///
    /// Non-finite values are ignored.
    pub fn set_preemphasis(&mut self, cutoff_hz: f64) {
        if self.preemphasis.set_cutoff(cutoff_hz) {
            tracing::debug!(
                cutoff_hz,
                coefficient = self.preemphasis.coefficient(),
                "pre-emphasis changed"
            );
        }
    }

    /// Hand the diagnostic event queue to the host
    ///
    /// Returns `None` after the first call.
    pub fn take_diagnostics(&mut self) -> Option<DiagnosticReceiver> {
        self.diagnostics_rx.take()
    }

    /// Handle for reading the active coefficients from another thread
    pub fn coefficient_reader(&self) -> CoefficientReader {
        CoefficientReader {
            active: Arc::clone(&self.active),
        }
    }

    /// Spectral envelope of the current model in dB
    pub fn envelope_db(&self, analyzer: &mut EnvelopeAnalyzer) -> Result<Vec<f64>, EnvelopeError> {
        let coefficients = self.coefficients();
        analyzer.compute_db(&coefficients, self.error_gain as f64)
    }

    /// Get LPC order
    pub fn order(&self) -> usize {
        self.config.order
    }

    pub fn block_length(&self) -> usize {
        self.config.block_length
    }

    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Copy of the active coefficients
    pub fn coefficients(&self) -> Vec<f32> {
        lock_coefficients(&self.active).clone()
    }

    /// Pre-emphasis allpass coefficient
    pub fn preemphasis(&self) -> f64 {
        self.preemphasis.coefficient()
    }

    pub fn error_gain(&self) -> f32 {
        self.error_gain
    }

    /// Current gated voice envelope (0.0 to 1.0)
    pub fn voice_gain(&self) -> f32 {
        self.voice_gain
    }

    pub fn gate_level(&self) -> f32 {
        self.envelope.gate_level()
    }

    pub fn smoothing_time(&self) -> f32 {
        self.smoothing_time
    }

    /// Autocorrelation smoothing coefficient derived from the time constant
    pub fn smoothing_coefficient(&self) -> f32 {
        self.acf.alpha
    }

    /// Smoothed autocorrelation the solver works on
    pub fn smoothed_acf(&self) -> &[f32] {
        &self.acf.smoothed
    }

    /// Synthesis filter delay line
    pub fn filter_memory(&self) -> &[f32] {
        self.synthesis.memory()
    }

    /// Check if a completed block is waiting for `update_coefficients`
    pub fn is_block_ready(&self) -> bool {
        self.input.is_ready()
    }

    /// Overruns since construction or the last reset
    pub fn overrun_count(&self) -> u64 {
        self.overruns
    }
}
