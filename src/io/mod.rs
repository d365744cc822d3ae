//! Input/output helpers.
//!
//! - JSON run configuration (`config`)
//! - strain/phase CSV export (`export`)
//! - waveform JSON read/write (`waveform`)

pub mod config;
pub mod export;
pub mod waveform;

pub use config::*;
pub use export::*;
pub use waveform::*;
