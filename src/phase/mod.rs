//! Phase assembly: baseline plus deviation families, in one or three bands.

pub mod corrections;
pub mod single_band;
pub mod three_band;

pub use corrections::*;
pub use single_band::*;
pub use three_band::*;
