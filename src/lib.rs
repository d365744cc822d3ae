//! `gw-deviations` library crate.
//!
//! Frequency-domain gravitational-wave strain from TaylorF2 and IMRPhenomD
//! baselines, deformed by parametrized post-Einsteinian, generalized IMR,
//! multipolar and tidal phase deviations.
//!
//! The binary (`gwdev`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the phase and strain layers can be driven from other tools (samplers, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod baseline;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod params;
pub mod phase;
pub mod plot;
pub mod report;
pub mod strain;
pub mod telemetry;
