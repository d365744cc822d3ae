//! Phase deviation families.
//!
//! Each family turns the binary and its deviation parameters into a term list in
//! `x = πMf`, which the assemblers add to the baseline phase. Every coefficient
//! vanishes when the deviations are zero, except the spin and 3PN point-particle
//! pieces of the multipolar family, which complete the baseline at those orders.

use std::f64::consts::PI;

use crate::baseline::PnPhaseCoefficients;
use crate::domain::DerivedParams;
use crate::math::{PhaseSeries, PhaseTerm};
use crate::params::DeviationParams;

/// A family of phase deviations layered on top of the baseline.
pub trait PhaseCorrection: Send + Sync {
    fn label(&self) -> &'static str;

    fn series(&self, d: &DerivedParams, dev: &DeviationParams, phi: &PnPhaseCoefficients) -> PhaseSeries;
}

/// The undeformed model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoCorrection;

impl PhaseCorrection for NoCorrection {
    fn label(&self) -> &'static str {
        "GR"
    }

    fn series(&self, _d: &DerivedParams, _dev: &DeviationParams, _phi: &PnPhaseCoefficients) -> PhaseSeries {
        PhaseSeries::new()
    }
}

/// Parametrized post-Einsteinian term plus the generalized IMR (gIMR) shifts of
/// each PN coefficient.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PpeCorrection;

impl PpeCorrection {
    /// `β η^{(2PN-5)/5} x^{(2PN-5)/3}`; `PN` is continuous.
    pub fn ppe_term(eta: f64, pn: f64, beta: f64) -> PhaseTerm {
        let b = 2.0 * pn - 5.0;
        PhaseTerm::power(beta * eta.powf(b / 5.0), b / 3.0)
    }

    /// The eleven gIMR terms, before the `3/(128η)` prefactor.
    pub fn gimr_terms(dev: &DeviationParams, phi: &PnPhaseCoefficients) -> [PhaseTerm; 11] {
        let dp = &dev.delta_phi;
        [
            PhaseTerm::power(dp[10], -7.0 / 3.0),
            PhaseTerm::power(phi.phi_0 * dp[0], -5.0 / 3.0),
            PhaseTerm::power(dp[1], -4.0 / 3.0),
            PhaseTerm::power(phi.phi_2 * dp[2], -1.0),
            PhaseTerm::power(phi.phi_3 * dp[3], -2.0 / 3.0),
            PhaseTerm::power(phi.phi_4 * dp[4], -1.0 / 3.0),
            PhaseTerm::power(phi.phi_5 * dp[5], 0.0),
            PhaseTerm::log_power(phi.phi_5_l * dp[8], 0.0),
            PhaseTerm::power(phi.phi_6 * dp[6], 1.0 / 3.0),
            PhaseTerm::log_power(phi.phi_6_l * dp[9], 1.0 / 3.0),
            PhaseTerm::power(phi.phi_7 * dp[7], 2.0 / 3.0),
        ]
    }
}

impl PhaseCorrection for PpeCorrection {
    fn label(&self) -> &'static str {
        "ppE+gIMR"
    }

    fn series(&self, d: &DerivedParams, dev: &DeviationParams, phi: &PnPhaseCoefficients) -> PhaseSeries {
        let pre = 3.0 / (128.0 * d.eta);
        let mut series: PhaseSeries = Self::gimr_terms(dev, phi).into_iter().collect::<PhaseSeries>().scaled(pre);
        series.push(Self::ppe_term(d.eta, dev.pn, dev.beta));
        series
    }
}

/// Coefficients of the multipolar family.
///
/// `p4`..`p8` carry spin-induced quadrupole (`k_i`) and octupole (`lambda_i`)
/// deviations together with the quadratic and cubic spin terms at 3PN and 3.5PN;
/// `p10`, `p12` are the 5PN and 6PN tidal terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultipolarCoefficients {
    pub p4: f64,
    pub p6: f64,
    pub p7: f64,
    pub p8: f64,
    pub p10: f64,
    pub p12: f64,
}

pub fn multipolar_coefficients(d: &DerivedParams, dev: &DeviationParams) -> MultipolarCoefficients {
    let eta = d.eta;
    let eta2 = eta * eta;
    let delta = d.delta;
    let (chi_s, chi_a) = (d.chi_s, d.chi_a);
    let chi_s2 = chi_s * chi_s;
    let chi_a2 = chi_a * chi_a;
    let chi_s3 = chi_s2 * chi_s;
    let chi_a3 = chi_a2 * chi_a;
    let (k_1, k_2) = (dev.k_1, dev.k_2);
    let (lambda_1, lambda_2) = (dev.lambda_1, dev.lambda_2);

    let p4 = -50.0 * ((1.0 - 2.0 * eta) * k_1 + delta * k_2) * (chi_s2 + chi_a2)
        - 100.0 * ((1.0 - 2.0 * eta) * k_2 + delta * k_1) * chi_s * chi_a;

    let p6 = (1760.0 / 3.0 * (11831.0 / 9240.0) + 12320.0 / 9.0 * (-1987.0 / 3080.0)) * eta
        + ((75515.0 / 288.0 - 232415.0 / 504.0 * eta + 1255.0 / 9.0 * eta2) * chi_s2
            + (75515.0 / 288.0 - 263245.0 / 252.0 * eta - 480.0 * eta2) * chi_a2)
        + ((26015.0 / 28.0 - 1495.0 / 6.0 * eta) * delta * k_2
            + (26015.0 / 28.0 - 44255.0 / 21.0 * eta - 240.0 * eta2) * k_1)
            * (chi_s2 + chi_a2)
        + ((75515.0 / 144.0 - 8225.0 / 18.0 * eta) * delta
            + (26015.0 / 14.0 - 1495.0 / 3.0 * eta) * delta * k_1
            + (26015.0 / 14.0 - 88510.0 / 21.0 * eta - 480.0 * eta2) * k_2)
            * chi_s
            * chi_a;

    let p7 = (14585.0 / 24.0 - 475.0 / 6.0 * eta + 100.0 / 3.0 * eta2) * chi_s3
        + (14585.0 / 24.0 - 2380.0 * eta) * delta * chi_a3
        + (14585.0 / 8.0 - 215.0 / 2.0 * eta) * delta * chi_s2 * chi_a
        + (14585.0 / 8.0 - 7270.0 * eta + 80.0 * eta2) * chi_s * chi_a2
        + ((3110.0 / 3.0 - 10250.0 / 3.0 * eta + 40.0 * eta2) * k_1
            + ((3110.0 / 3.0 - 4030.0 / 3.0 * eta) * k_2 - 440.0 * (1.0 - eta) * lambda_2) * delta
            - 440.0 * (1.0 - 3.0 * eta) * lambda_1)
            * chi_s3
        + ((3110.0 / 3.0 - 8470.0 / 3.0 * eta) * k_2 - 440.0 * (1.0 - 3.0 * eta) * lambda_2
            + ((3110.0 / 3.0 - 750.0 * eta) * k_1 - 440.0 * (1.0 - eta) * lambda_1) * delta)
            * chi_a3
        + ((3110.0 / 3.0 - 28970.0 / 3.0 * eta + 80.0 * eta2) * k_2 - 1320.0 * (1.0 - 3.0 * eta) * lambda_2
            + ((3110.0 / 3.0 - 10310.0 / 3.0 * eta) * k_1 - 1320.0 * (1.0 - eta) * lambda_1) * delta)
            * chi_s2
            * chi_a
        + ((3110.0 / 3.0 - 27190.0 / 3.0 * eta + 40.0 * eta2) * k_1 - 1320.0 * (1.0 - 3.0 * eta) * lambda_1
            + ((3110.0 - 8530.0 / 3.0 * eta) * k_2 - 1320.0 * (1.0 - eta) * lambda_2) * delta)
            * chi_s
            * chi_a2;

    let p8 = ((233915.0 / 68.0 - 99185.0 / 252.0 * eta) * delta * chi_a
        + (233915.0 / 68.0 - 3970375.0 / 2268.0 * eta + 19655.0 / 189.0 * eta2) * chi_s)
        * PI;

    let p10 = -39.0 / 2.0 * dev.tilde;
    // sqrt(1 - 4η) clamps at zero for equal masses.
    let p12 = -3115.0 / 64.0 * dev.tilde + 6595.0 / 364.0 * (1.0 - 4.0 * eta).max(0.0).sqrt() * dev.delta_tilde;

    MultipolarCoefficients {
        p4,
        p6,
        p7,
        p8,
        p10,
        p12,
    }
}

/// Spin-induced multipole and tidal deviations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultipolarCorrection {
    /// Include the 5PN and 6PN tidal terms.
    pub include_tidal: bool,
}

impl MultipolarCorrection {
    pub const fn single_band() -> Self {
        Self { include_tidal: true }
    }

    pub const fn three_band() -> Self {
        Self { include_tidal: false }
    }
}

impl PhaseCorrection for MultipolarCorrection {
    fn label(&self) -> &'static str {
        if self.include_tidal {
            "multipolar+tidal"
        } else {
            "multipolar"
        }
    }

    fn series(&self, d: &DerivedParams, dev: &DeviationParams, _phi: &PnPhaseCoefficients) -> PhaseSeries {
        let p = multipolar_coefficients(d, dev);
        // P8 (1 - ln x) x
        let mut series = PhaseSeries::new()
            .with(PhaseTerm::power(p.p4, -1.0 / 3.0))
            .with(PhaseTerm::power(p.p6, 1.0 / 3.0))
            .with(PhaseTerm::power(p.p7, 2.0 / 3.0))
            .with(PhaseTerm::power(p.p8, 1.0))
            .with(PhaseTerm::log_power(-p.p8, 1.0));
        if self.include_tidal {
            series.push(PhaseTerm::power(p.p10, 5.0 / 3.0));
            series.push(PhaseTerm::power(p.p12, 7.0 / 3.0));
        }
        series.scaled(3.0 / (128.0 * d.eta))
    }
}
