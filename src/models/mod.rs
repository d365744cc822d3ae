//! Deviated waveform models.
//!
//! Every model is the same pipeline (parameters → phase → amplitude → strain);
//! `ModelKind` picks the deviation family, the band layout and the amplitude.

pub mod batch;
pub mod waveform;

pub use batch::*;
pub use waveform::*;
