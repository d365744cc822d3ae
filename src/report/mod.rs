//! Reporting utilities: phase summaries, scan tables and power-law diagnostics.
//!
//! Everything here consumes arrays the models already produced; nothing in this
//! module evaluates physics.

pub mod format;
pub mod power_law;

pub use format::*;
pub use power_law::*;
