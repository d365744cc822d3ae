//! Coefficient library: the GR baseline every deviated model is built on.
//!
//! The phase assembler and the strain composer only talk to `CoefficientLibrary`.
//! `PnLibrary` is the reference implementation: TaylorF2 pieces in closed form,
//! IMRPhenomD calibration values taken from a supplied `PhenomFit`.

pub mod amplitude;
pub mod phenom;
pub mod taylorf2;

pub use amplitude::*;
pub use phenom::*;
pub use taylorf2::*;

use crate::domain::{BinaryParams, DerivedParams};
use crate::error::WaveformError;
use crate::math::{step_function, PhaseSeries};

/// Source of baseline coefficients and band helpers.
///
/// Implementations must be deterministic; the same binary always yields the same
/// coefficients.
pub trait CoefficientLibrary: Send + Sync {
    fn phase_coefficients(&self, d: &DerivedParams) -> PnPhaseCoefficients;

    fn amplitude_coefficients(&self, d: &DerivedParams) -> PnAmplitudeCoefficients;

    /// Calibration values and band layout for the three-band models.
    fn phenom_coefficients(&self, d: &DerivedParams) -> Result<PhenomCoefficients, WaveformError>;

    /// Undeformed TaylorF2 phase, truncated to PN indices `i < maxn`.
    fn baseline_phase(&self, binary: &BinaryParams, d: &DerivedParams, maxn: usize) -> PhaseSeries {
        taylorf2_phase(binary, d, &self.phase_coefficients(d), maxn)
    }

    /// Band selector: `sign(f - boundary)`.
    fn step(&self, f: f64, boundary: f64) -> f64 {
        step_function(f, boundary)
    }
}

/// Closed-form TaylorF2 library with optional IMRPhenomD calibration values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PnLibrary {
    phenom: Option<PhenomFit>,
}

impl PnLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phenom(fit: PhenomFit) -> Self {
        Self { phenom: Some(fit) }
    }

    pub fn phenom(&self) -> Option<&PhenomFit> {
        self.phenom.as_ref()
    }
}

impl CoefficientLibrary for PnLibrary {
    fn phase_coefficients(&self, d: &DerivedParams) -> PnPhaseCoefficients {
        PnPhaseCoefficients::new(d)
    }

    fn amplitude_coefficients(&self, d: &DerivedParams) -> PnAmplitudeCoefficients {
        PnAmplitudeCoefficients::new(d)
    }

    fn phenom_coefficients(&self, _d: &DerivedParams) -> Result<PhenomCoefficients, WaveformError> {
        let fit = self.phenom.ok_or(WaveformError::MissingPhenomCoefficients("IMRPhenomD"))?;
        PhenomCoefficients::new(fit)
    }
}
