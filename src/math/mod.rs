//! Mathematical utilities: phase-term algebra, band weights and dense solves.

pub mod ols;
pub mod step;
pub mod terms;

pub use ols::*;
pub use step::*;
pub use terms::*;
