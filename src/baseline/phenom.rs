//! IMRPhenomD band primitives.
//!
//! The calibration values (`PhenomFit`) come from an external fit to numerical
//! relativity and are supplied per binary. Everything here is the closed-form
//! machinery around them: transition frequencies, the late-inspiral phase terms
//! and the intermediate and merger-ringdown phase shapes.
//!
//! All frequencies are dimensionless (`M f`).

use serde::{Deserialize, Serialize};

use crate::error::WaveformError;
use crate::math::{PhaseSeries, PhaseTerm};

/// Start of the intermediate phase band.
pub const PHASE_F1: f64 = 0.018;
/// Start of the intermediate amplitude band.
pub const AMP_F1: f64 = 0.014;

/// Calibrated IMRPhenomD values for one binary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhenomFit {
    pub sigma2: f64,
    pub sigma3: f64,
    pub sigma4: f64,
    pub beta2: f64,
    pub beta3: f64,
    pub alpha2: f64,
    pub alpha3: f64,
    pub alpha4: f64,
    pub alpha5: f64,
    /// Ringdown frequency.
    pub f_ringdown: f64,
    /// Damping frequency.
    pub f_damp: f64,
    pub rho1: f64,
    pub rho2: f64,
    pub rho3: f64,
    pub gamma1: f64,
    pub gamma2: f64,
    pub gamma3: f64,
    /// Collocation value of the intermediate amplitude at its midpoint.
    pub v2: f64,
}

impl PhenomFit {
    fn fields(&self) -> [(&'static str, f64); 18] {
        [
            ("sigma2", self.sigma2),
            ("sigma3", self.sigma3),
            ("sigma4", self.sigma4),
            ("beta2", self.beta2),
            ("beta3", self.beta3),
            ("alpha2", self.alpha2),
            ("alpha3", self.alpha3),
            ("alpha4", self.alpha4),
            ("alpha5", self.alpha5),
            ("f_ringdown", self.f_ringdown),
            ("f_damp", self.f_damp),
            ("rho1", self.rho1),
            ("rho2", self.rho2),
            ("rho3", self.rho3),
            ("gamma1", self.gamma1),
            ("gamma2", self.gamma2),
            ("gamma3", self.gamma3),
            ("v2", self.v2),
        ]
    }

    pub fn validate(&self) -> Result<(), WaveformError> {
        if let Some((name, v)) = self.fields().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(WaveformError::InvalidPhenomFit(format!("{name} is not finite ({v})")));
        }
        for (name, v) in [
            ("f_ringdown", self.f_ringdown),
            ("f_damp", self.f_damp),
            ("gamma2", self.gamma2),
            ("gamma3", self.gamma3),
        ] {
            if v <= 0.0 {
                return Err(WaveformError::InvalidPhenomFit(format!("{name} must be positive ({v})")));
            }
        }
        Ok(())
    }

    /// Peak of the merger-ringdown amplitude (end of the intermediate amplitude band).
    pub fn amplitude_peak(&self) -> f64 {
        let (f_rd, f_damp) = (self.f_ringdown, self.f_damp);
        let (g2, g3) = (self.gamma2, self.gamma3);
        if g2 <= 1.0 {
            (f_rd + f_damp * g3 * ((1.0 - g2 * g2).sqrt() - 1.0) / g2).abs()
        } else {
            (f_rd - f_damp * g3 / g2).abs()
        }
    }
}

/// A validated fit plus its band layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhenomCoefficients {
    pub fit: PhenomFit,
    /// Inspiral → intermediate phase boundary.
    pub f1: f64,
    /// Intermediate → merger-ringdown phase boundary.
    pub f2: f64,
    pub f1_amp: f64,
    pub f2_amp: f64,
    pub f3_amp: f64,
}

impl PhenomCoefficients {
    pub fn new(fit: PhenomFit) -> Result<Self, WaveformError> {
        fit.validate()?;
        let f1 = PHASE_F1;
        let f2 = 0.5 * fit.f_ringdown;
        if f1 >= f2 {
            return Err(WaveformError::BandOrdering { f1, f2 });
        }
        let f1_amp = AMP_F1;
        let f3_amp = fit.amplitude_peak();
        if f1_amp >= f3_amp {
            return Err(WaveformError::BandOrdering { f1: f1_amp, f2: f3_amp });
        }
        Ok(Self {
            fit,
            f1,
            f2,
            f1_amp,
            f2_amp: 0.5 * (f1_amp + f3_amp),
            f3_amp,
        })
    }

    /// `(1/η)(¾σ₂f^{4/3} + ⅗σ₃f^{5/3} + ½σ₄f²)` in the `πf` basis.
    pub fn late_inspiral(&self, eta: f64) -> PhaseSeries {
        let fit = &self.fit;
        [
            PhaseTerm::power_in_f(0.75 * fit.sigma2, 4.0 / 3.0),
            PhaseTerm::power_in_f(0.6 * fit.sigma3, 5.0 / 3.0),
            PhaseTerm::power_in_f(0.5 * fit.sigma4, 2.0),
        ]
        .into_iter()
        .collect::<PhaseSeries>()
        .scaled(1.0 / eta)
    }
}

/// `Ψ_int = (1/η)(β₀ + β₁f + β₂ ln f − β₃/(3f³))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntermediatePhase {
    pub eta: f64,
    pub beta0: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub beta3: f64,
}

impl IntermediatePhase {
    /// Fix `β₀, β₁` so the band meets `(value, slope)` at `f1`.
    pub fn matched(eta: f64, beta2: f64, beta3: f64, f1: f64, value: f64, slope: f64) -> Self {
        let beta1 = eta * slope - beta2 / f1 - beta3 / f1.powi(4);
        let beta0 = eta * value - beta1 * f1 - beta2 * f1.ln() + beta3 / (3.0 * f1.powi(3));
        Self {
            eta,
            beta0,
            beta1,
            beta2,
            beta3,
        }
    }

    pub fn value(&self, f: f64) -> f64 {
        (self.beta0 + self.beta1 * f + self.beta2 * f.ln() - self.beta3 / (3.0 * f.powi(3))) / self.eta
    }

    pub fn derivative(&self, f: f64) -> f64 {
        (self.beta1 + self.beta2 / f + self.beta3 / f.powi(4)) / self.eta
    }
}

/// `Ψ_MR = (1/η)(α₀ + α₁f − α₂/f + (4/3)α₃f^{3/4} + α₄ arctan((f − α₅f_RD)/f_damp))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergerRingdownPhase {
    pub eta: f64,
    pub alpha0: f64,
    pub alpha1: f64,
    pub alpha2: f64,
    pub alpha3: f64,
    pub alpha4: f64,
    pub alpha5: f64,
    pub f_ringdown: f64,
    pub f_damp: f64,
}

impl MergerRingdownPhase {
    /// Fix `α₀, α₁` so the band meets `(value, slope)` at `f2`.
    pub fn matched(eta: f64, fit: &PhenomFit, f2: f64, value: f64, slope: f64) -> Self {
        let mut band = Self {
            eta,
            alpha0: 0.0,
            alpha1: 0.0,
            alpha2: fit.alpha2,
            alpha3: fit.alpha3,
            alpha4: fit.alpha4,
            alpha5: fit.alpha5,
            f_ringdown: fit.f_ringdown,
            f_damp: fit.f_damp,
        };
        // With α₀ = α₁ = 0 only the shape part remains.
        let shape_value = eta * band.value(f2);
        let shape_slope = eta * band.derivative(f2);
        band.alpha1 = eta * slope - shape_slope;
        band.alpha0 = eta * value - band.alpha1 * f2 - shape_value;
        band
    }

    fn lorentzian_arg(&self, f: f64) -> f64 {
        (f - self.alpha5 * self.f_ringdown) / self.f_damp
    }

    pub fn value(&self, f: f64) -> f64 {
        (self.alpha0 + self.alpha1 * f - self.alpha2 / f
            + 4.0 / 3.0 * self.alpha3 * f.powf(0.75)
            + self.alpha4 * self.lorentzian_arg(f).atan())
            / self.eta
    }

    pub fn derivative(&self, f: f64) -> f64 {
        let u = f - self.alpha5 * self.f_ringdown;
        (self.alpha1
            + self.alpha2 / (f * f)
            + self.alpha3 * f.powf(-0.25)
            + self.alpha4 * self.f_damp / (self.f_damp * self.f_damp + u * u))
            / self.eta
    }
}

/// Synthetic but well-conditioned calibration values for tests.
#[cfg(test)]
pub(crate) fn test_fit() -> PhenomFit {
    PhenomFit {
        sigma2: -300.0,
        sigma3: 500.0,
        sigma4: -250.0,
        beta2: -3.0,
        beta3: -2e-5,
        alpha2: -0.07,
        alpha3: 1.0,
        alpha4: 0.15,
        alpha5: 1.0,
        f_ringdown: 0.0891,
        f_damp: 0.0135,
        rho1: 3900.0,
        rho2: -26000.0,
        rho3: 52000.0,
        gamma1: 0.0069,
        gamma2: 1.2,
        gamma3: 0.68,
        v2: 0.85,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::terms::central_difference;

    #[test]
    fn band_layout_follows_ringdown_frequency() {
        let c = PhenomCoefficients::new(test_fit()).unwrap();
        assert_eq!(c.f1, 0.018);
        assert!((c.f2 - 0.04455).abs() < 1e-15);
        // gamma2 > 1 branch
        assert!((c.f3_amp - (0.0891 - 0.0135 * 0.68 / 1.2)).abs() < 1e-15);
        assert!(c.f1_amp < c.f2_amp && c.f2_amp < c.f3_amp);
    }

    #[test]
    fn low_ringdown_frequency_is_a_band_ordering_error() {
        let fit = PhenomFit { f_ringdown: 0.03, ..test_fit() };
        assert_eq!(
            PhenomCoefficients::new(fit),
            Err(WaveformError::BandOrdering { f1: 0.018, f2: 0.015 })
        );
    }

    #[test]
    fn rejects_non_finite_and_non_positive_values() {
        let fit = PhenomFit { sigma3: f64::NAN, ..test_fit() };
        assert!(matches!(fit.validate(), Err(WaveformError::InvalidPhenomFit(_))));
        let fit = PhenomFit { f_damp: 0.0, ..test_fit() };
        assert!(matches!(fit.validate(), Err(WaveformError::InvalidPhenomFit(_))));
    }

    #[test]
    fn matched_bands_hit_their_anchor() {
        let fit = test_fit();
        let eta = 0.2;

        let int = IntermediatePhase::matched(eta, fit.beta2, fit.beta3, 0.018, 12.5, -340.0);
        assert!((int.value(0.018) - 12.5).abs() < 1e-9);
        assert!((int.derivative(0.018) + 340.0).abs() < 1e-9);

        let mr = MergerRingdownPhase::matched(eta, &fit, 0.045, -3.0, 20.0);
        assert!((mr.value(0.045) + 3.0).abs() < 1e-9);
        assert!((mr.derivative(0.045) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn band_derivatives_match_finite_differences() {
        let fit = test_fit();
        let int = IntermediatePhase::matched(0.24, fit.beta2, fit.beta3, 0.018, 1.0, 2.0);
        let mr = MergerRingdownPhase::matched(0.24, &fit, 0.045, 1.0, 2.0);
        let li = PhenomCoefficients::new(fit).unwrap().late_inspiral(0.24);
        for f in [0.02, 0.05, 0.09] {
            for (exact, numeric) in [
                (int.derivative(f), central_difference(|x| int.value(x), f)),
                (mr.derivative(f), central_difference(|x| mr.value(x), f)),
                (li.derivative(f), central_difference(|x| li.value(x), f)),
            ] {
                assert!(((exact - numeric) / exact.abs().max(1e-9)).abs() < 1e-6, "{exact} vs {numeric}");
            }
        }
    }
}
