//! Block-rate LPC analysis: autocorrelation, Levinson-Durbin and the
//! resulting spectral envelope

pub mod autocorrelation;
pub mod levinson;
pub mod envelope;

pub use autocorrelation::autocorrelation;
pub use levinson::{levinson_durbin, reflection_coefficients, MAX_ORDER, DEFAULT_K_MAX};
pub use envelope::{EnvelopeAnalyzer, EnvelopeError};
