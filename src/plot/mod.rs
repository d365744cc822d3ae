//! Plotting: deterministic ASCII plots for the terminal and SVG figures.

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::{write_figures, FigurePaths};
