//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the binary system state and its derived invariants (`BinaryParams`, `DerivedParams`)
//! - the four waveform families (`ModelKind`)
//! - frequency grids and polarization outputs (`FrequencyGrid`, `Polarizations`)
//! - SI constants

pub mod constants;
pub mod grid;
pub mod types;

pub use grid::*;
pub use types::*;
