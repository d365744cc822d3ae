//! Binary system state, derived invariants and model kinds.
//!
//! `BinaryParams` is the immutable-per-evaluation snapshot of intrinsic and
//! extrinsic parameters. `DerivedParams` is recomputed from it on every
//! evaluation (never cached), so mass ratio and spin combinations can never go
//! stale after an update.

use serde::{Deserialize, Serialize};

use crate::domain::constants::{solar_mass_seconds, C, MPC};
use crate::error::WaveformError;

/// Relative slack allowed above `eta = 0.25` before it counts as a domain error.
///
/// Equal masses give exactly 0.25 analytically; floating point products can land
/// one ulp above.
const ETA_ROUNDOFF: f64 = 1e-12;

/// Intrinsic and extrinsic parameters of one binary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryParams {
    /// Primary mass [solar masses, source frame].
    pub mass_1: f64,
    /// Secondary mass [solar masses, source frame].
    pub mass_2: f64,
    /// Dimensionless aligned spin of the primary.
    pub a_1: f64,
    /// Dimensionless aligned spin of the secondary.
    pub a_2: f64,
    pub redshift: f64,
    /// Luminosity distance [Mpc].
    pub luminosity_distance: f64,
    /// Inclination of the total angular momentum to the line of sight [rad].
    pub theta_jn: f64,
    /// Reference phase [rad].
    pub phase: f64,
    /// Geocentric merger time [s]. Consumed by detector projection, not by the phase.
    pub geocent_time: f64,
    /// High-frequency cutoff in units of the ISCO frequency.
    pub cut: f64,
}

impl Default for BinaryParams {
    fn default() -> Self {
        Self {
            mass_1: 0.0,
            mass_2: 0.0,
            a_1: 0.0,
            a_2: 0.0,
            redshift: 0.0,
            luminosity_distance: 0.0,
            theta_jn: 0.0,
            phase: 0.0,
            geocent_time: 0.0,
            cut: 2.0,
        }
    }
}

impl BinaryParams {
    /// Compute the derived mass/spin combinations.
    pub fn derive(&self) -> Result<DerivedParams, WaveformError> {
        let (m1, m2) = (self.mass_1, self.mass_2);
        if !(m1.is_finite() && m2.is_finite() && m1 > 0.0 && m2 > 0.0) {
            return Err(WaveformError::InvalidMass { mass_1: m1, mass_2: m2 });
        }

        let m = m1 + m2;
        let mut eta = m1 * m2 / (m * m);
        if !(eta > 0.0 && eta <= 0.25 * (1.0 + ETA_ROUNDOFF)) {
            return Err(WaveformError::SymmetricMassRatio { eta });
        }
        eta = eta.min(0.25);

        let total_mass_s = m * (1.0 + self.redshift) * solar_mass_seconds();
        let chirp_mass_s = eta.powf(3.0 / 5.0) * total_mass_s;
        let delta = (m1 - m2) / m;
        let chi_s = 0.5 * (self.a_1 + self.a_2);
        let chi_a = 0.5 * (self.a_1 - self.a_2);
        let chi_eff = (m1 * self.a_1 + m2 * self.a_2) / m;
        let chi_pn = chi_eff - 38.0 * eta / 113.0 * (self.a_1 + self.a_2);

        Ok(DerivedParams {
            total_mass_s,
            chirp_mass_s,
            eta,
            delta,
            chi_s,
            chi_a,
            chi_eff,
            chi_pn,
        })
    }

    /// Luminosity distance in metres, validated for amplitude evaluation.
    pub fn distance_m(&self) -> Result<f64, WaveformError> {
        let d = self.luminosity_distance;
        if !(d.is_finite() && d > 0.0) {
            return Err(WaveformError::InvalidDistance(d));
        }
        Ok(d * MPC)
    }
}

/// Mass and spin combinations entering the PN coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedParams {
    /// `G M / c^3` of the redshifted total mass [s].
    pub total_mass_s: f64,
    /// `G Mc / c^3` of the redshifted chirp mass [s].
    pub chirp_mass_s: f64,
    /// Symmetric mass ratio.
    pub eta: f64,
    /// Mass asymmetry `(m1 - m2) / M`.
    pub delta: f64,
    pub chi_s: f64,
    pub chi_a: f64,
    pub chi_eff: f64,
    /// Effective spin used by the phenomenological fits.
    pub chi_pn: f64,
}

impl DerivedParams {
    /// ISCO frequency of a Schwarzschild black hole in units of `c^3 / (G M)`.
    pub fn f_isco_geometric(&self) -> f64 {
        1.0 / (6f64.powf(1.5) * std::f64::consts::PI)
    }

    /// ISCO frequency in Hz.
    pub fn f_isco_hz(&self) -> f64 {
        self.f_isco_geometric() / self.total_mass_s
    }

    /// Dimensionless cutoff `cut * f_isco`.
    pub fn cutoff_geometric(&self, cut: f64) -> f64 {
        cut * self.f_isco_geometric()
    }

    /// `c / r` factor of the amplitude prefactor [1/s].
    pub fn inverse_distance_s(&self, distance_m: f64) -> f64 {
        C / distance_m
    }
}

/// The four deviated waveform families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// TaylorF2 with ppE and gIMR phase deviations.
    #[serde(rename = "TaylorF2_PPE")]
    TaylorF2Ppe,
    /// TaylorF2 with multipolar (spin-induced) and tidal deviations.
    #[serde(rename = "TaylorF2_mult")]
    TaylorF2Mult,
    /// IMRPhenomD with ppE and gIMR deviations in the inspiral band.
    #[serde(rename = "IMRPhenomD_PPE")]
    PhenomDPpe,
    /// IMRPhenomD with multipolar deviations in the inspiral band.
    #[serde(rename = "IMRPhenomD_mult")]
    PhenomDMult,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::TaylorF2Ppe,
        ModelKind::TaylorF2Mult,
        ModelKind::PhenomDPpe,
        ModelKind::PhenomDMult,
    ];

    /// Canonical waveform name.
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::TaylorF2Ppe => "TaylorF2_PPE",
            ModelKind::TaylorF2Mult => "TaylorF2_mult",
            ModelKind::PhenomDPpe => "IMRPhenomD_PPE",
            ModelKind::PhenomDMult => "IMRPhenomD_mult",
        }
    }

    /// Parse a canonical waveform name.
    pub fn from_name(name: &str) -> Result<Self, WaveformError> {
        ModelKind::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or_else(|| WaveformError::UnknownModel(name.to_string()))
    }

    /// True for the inspiral / intermediate / merger-ringdown models.
    pub fn is_three_band(self) -> bool {
        matches!(self, ModelKind::PhenomDPpe | ModelKind::PhenomDMult)
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
