//! Amplitude models and strain composition.

pub mod amplitude;
pub mod compose;

pub use amplitude::*;
pub use compose::*;
