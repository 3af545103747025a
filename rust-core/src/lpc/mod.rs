//! Linear predictive coding: all-pole model fit and spectral envelope

pub mod envelope;
pub mod fit;
pub mod response;

pub use envelope::{EnvelopeConfig, LpcEnvelope};
pub use fit::{fit_lpc, LpcCoefficients, LpcMethod};
pub use response::all_pole_magnitude;
