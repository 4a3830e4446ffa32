//! Python bindings for the talk-box engine

use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::analysis::EnvelopeAnalyzer;
use crate::audio::{EngineConfig, InterleavedHost, TalkBox};

/// Talk-box vocoder exposed to Python
///
/// Block-rate updates run automatically between frames, as in a single
/// audio callback.
#[pyclass(name = "TalkBox")]
pub struct PyTalkBox {
    host: InterleavedHost,
}

#[pymethods]
impl PyTalkBox {
    /// Create a new talk box
    ///
    /// Args:
    ///     sample_rate: Sample rate in Hz
    ///     order: LPC order
    ///     block_length: Samples per analysis block
    #[new]
    #[pyo3(signature = (sample_rate=48000.0, order=10, block_length=256))]
    fn new(sample_rate: f64, order: usize, block_length: usize) -> PyResult<Self> {
        let talkbox = TalkBox::new(EngineConfig::new(sample_rate, order, block_length))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(Self {
            host: InterleavedHost::new(talkbox),
        })
    }

    /// Process carrier and voice signals
    ///
    /// Args:
    ///     carrier: Synthesizer signal as numpy array
    ///     voice: Voice signal as numpy array (same length)
    ///
    /// Returns:
    ///     Vocoder output as numpy array
    fn process<'py>(
        &mut self,
        py: Python<'py>,
        carrier: PyReadonlyArray1<f32>,
        voice: PyReadonlyArray1<f32>,
    ) -> PyResult<&'py PyArray1<f32>> {
        let carrier = carrier
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let voice = voice
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        if carrier.len() != voice.len() {
            return Err(PyValueError::new_err(format!(
                "carrier and voice lengths differ ({} vs {})",
                carrier.len(),
                voice.len()
            )));
        }

        let mut output = carrier.to_vec();
        self.host.process_split(&mut output, voice);

        Ok(PyArray1::from_vec(py, output))
    }

    /// Run the block-rate analysis manually
    ///
    /// Returns:
    ///     True if a pending block was analyzed
    fn update_coefficients(&mut self) -> bool {
        self.host.talkbox_mut().update_coefficients()
    }

    /// Reset all filter and envelope state
    fn reset_states(&mut self) {
        self.host.talkbox_mut().reset_states();
    }

    /// Zero the active coefficients if they diverged
    fn check_coefficients(&mut self) -> bool {
        self.host.talkbox_mut().check_coefficients()
    }

    /// Zero the synthesis delay line if it diverged
    fn check_filter_memory(&mut self) -> bool {
        self.host.talkbox_mut().check_filter_memory()
    }

    /// Set autocorrelation smoothing time in seconds
    fn set_smoothing_time(&mut self, smoothing_time: f32) {
        self.host.talkbox_mut().set_smoothing_time(smoothing_time);
    }

    /// Set gate level (normalized amplitude)
    fn set_gate_level(&mut self, level: f32) {
        self.host.talkbox_mut().set_gate_level(level);
    }

    /// Set pre-emphasis cut-off in Hz
    fn set_preemphasis(&mut self, cutoff_hz: f64) {
        self.host.talkbox_mut().set_preemphasis(cutoff_hz);
    }

    fn order(&self) -> usize {
        self.host.talkbox().order()
    }

    /// Get active LPC coefficients
    fn coefficients<'py>(&self, py: Python<'py>) -> &'py PyArray1<f32> {
        PyArray1::from_vec(py, self.host.talkbox().coefficients())
    }

    fn preemphasis(&self) -> f64 {
        self.host.talkbox().preemphasis()
    }

    fn error_gain(&self) -> f32 {
        self.host.talkbox().error_gain()
    }

    fn voice_gain(&self) -> f32 {
        self.host.talkbox().voice_gain()
    }

    fn overrun_count(&self) -> u64 {
        self.host.talkbox().overrun_count()
    }

    /// Spectral envelope of the current model
    ///
    /// Args:
    ///     fft_size: FFT size for the evaluation grid
    ///
    /// Returns:
    ///     Tuple of (frequencies in Hz, magnitude in dB)
    #[pyo3(signature = (fft_size=1024))]
    fn envelope_db<'py>(
        &self,
        py: Python<'py>,
        fft_size: usize,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let talkbox = self.host.talkbox();
        let mut analyzer = EnvelopeAnalyzer::new(fft_size);
        let db = talkbox
            .envelope_db(&mut analyzer)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let freqs = analyzer.frequency_axis_hz(talkbox.sample_rate());

        Ok((PyArray1::from_vec(py, freqs), PyArray1::from_vec(py, db)))
    }
}
