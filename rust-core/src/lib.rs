//! Talk Box - Real-Time Voice-Excited LPC Vocoder
//!
//! Imposes the formant envelope of a voice onto a carrier signal: the voice is
//! analyzed block by block into an all-pole model, and the carrier is filtered
//! through that model sample by sample. Optional Python bindings are built with
//! the `python` feature.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod analysis;
pub mod audio;
pub mod filters;

#[cfg(feature = "python")]
mod python_bindings;

pub use analysis::{autocorrelation, levinson_durbin, EnvelopeAnalyzer};
pub use audio::{ConfigError, EngineConfig, InterleavedHost, TalkBox, TalkBoxParams};
pub use filters::{check_filter, AllPoleFilter, PreEmphasis};
