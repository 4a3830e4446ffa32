//! Talk-box engine, its parameters and the host schedule

pub mod buffer;
pub mod config;
pub mod diagnostics;
pub mod gate;
pub mod host;
pub mod talkbox;

pub use buffer::{DoubleBuffer, PushOutcome};
pub use config::{ConfigError, EngineConfig, TalkBoxParams};
pub use diagnostics::{Diagnostic, DiagnosticReceiver, FilterTarget};
pub use gate::VoiceEnvelope;
pub use host::InterleavedHost;
pub use talkbox::{CoefficientReader, TalkBox};
