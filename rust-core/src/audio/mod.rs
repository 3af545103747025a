//! Audio loading

pub mod signal;

pub use signal::Signal;
