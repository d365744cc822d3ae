//! IMRPhenomD amplitude shape (to be multiplied by the leading-order amplitude).
//!
//! Three bands joined at `f1_amp` and `f3_amp`:
//!
//! - inspiral: `Σ a_i x^{i/3} + ρ₁f^{7/3} + ρ₂f^{8/3} + ρ₃f³`
//! - intermediate: quartic `δ₀ + δ₁f + δ₂f² + δ₃f³ + δ₄f⁴`
//! - merger-ringdown: Lorentzian times a decaying exponential
//!
//! The quartic is fixed by five collocation conditions: value and slope of the
//! inspiral at `f1_amp`, the fitted value `v2` at `f2_amp`, value and slope of
//! the merger-ringdown at `f3_amp`.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::baseline::phenom::{PhenomCoefficients, PhenomFit};
use crate::baseline::taylorf2::PnAmplitudeCoefficients;
use crate::error::WaveformError;
use crate::math::{solve_square, theta_minus, theta_plus, PhaseSeries, PhaseTerm};

#[derive(Debug, Clone, PartialEq)]
pub struct PhenomAmplitude {
    inspiral: PhaseSeries,
    fit: PhenomFit,
    f1: f64,
    f3: f64,
    delta: IntermediateAmplitude,
}

/// Solved quartic of the intermediate amplitude band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntermediateAmplitude {
    pub delta: [f64; 5],
}

impl IntermediateAmplitude {
    pub fn value(&self, f: f64) -> f64 {
        self.delta.iter().rev().fold(0.0, |acc, d| acc * f + d)
    }
}

fn collocation_row(f: f64) -> [f64; 5] {
    [1.0, f, f * f, f.powi(3), f.powi(4)]
}

fn collocation_slope_row(f: f64) -> [f64; 5] {
    [0.0, 1.0, 2.0 * f, 3.0 * f * f, 4.0 * f.powi(3)]
}

impl PhenomAmplitude {
    pub fn new(pn: &PnAmplitudeCoefficients, coeffs: &PhenomCoefficients) -> Result<Self, WaveformError> {
        let fit = coeffs.fit;
        let mut inspiral = pn.series();
        inspiral.push(PhaseTerm::power_in_f(fit.rho1, 7.0 / 3.0));
        inspiral.push(PhaseTerm::power_in_f(fit.rho2, 8.0 / 3.0));
        inspiral.push(PhaseTerm::power_in_f(fit.rho3, 3.0));

        let (f1, f2, f3) = (coeffs.f1_amp, coeffs.f2_amp, coeffs.f3_amp);
        let rows = [
            collocation_row(f1),
            collocation_slope_row(f1),
            collocation_row(f2),
            collocation_row(f3),
            collocation_slope_row(f3),
        ];
        let a = DMatrix::from_fn(5, 5, |i, j| rows[i][j]);
        let b = DVector::from_row_slice(&[
            inspiral.value(f1),
            inspiral.derivative(f1),
            fit.v2,
            merger_ringdown(&fit, f3),
            merger_ringdown_derivative(&fit, f3),
        ]);
        let x = solve_square(a, &b).ok_or(WaveformError::SingularSystem("intermediate amplitude"))?;

        let mut delta = [0.0; 5];
        delta.copy_from_slice(x.as_slice());

        Ok(Self {
            inspiral,
            fit,
            f1,
            f3,
            delta: IntermediateAmplitude { delta },
        })
    }

    pub fn intermediate_band(&self) -> IntermediateAmplitude {
        self.delta
    }

    pub fn inspiral(&self, f: f64) -> f64 {
        self.inspiral.value(f)
    }

    pub fn inspiral_derivative(&self, f: f64) -> f64 {
        self.inspiral.derivative(f)
    }

    pub fn intermediate(&self, f: f64) -> f64 {
        self.delta.value(f)
    }

    pub fn merger_ringdown(&self, f: f64) -> f64 {
        merger_ringdown(&self.fit, f)
    }

    pub fn merger_ringdown_derivative(&self, f: f64) -> f64 {
        merger_ringdown_derivative(&self.fit, f)
    }

    /// Blended amplitude shape at `f`, with `step(f, boundary)` selecting bands.
    pub fn value(&self, f: f64, step: impl Fn(f64, f64) -> f64) -> f64 {
        let s1 = step(f, self.f1);
        let s3 = step(f, self.f3);
        let mut out = 0.0;
        let w_ins = theta_minus(s1);
        let w_int = theta_plus(s1) * theta_minus(s3);
        let w_mr = theta_plus(s3);
        // Skip bands with zero weight.
        if w_ins != 0.0 {
            out += w_ins * self.inspiral(f);
        }
        if w_int != 0.0 {
            out += w_int * self.intermediate(f);
        }
        if w_mr != 0.0 {
            out += w_mr * self.merger_ringdown(f);
        }
        out
    }
}

fn merger_ringdown(fit: &PhenomFit, f: f64) -> f64 {
    let damp = fit.gamma3 * fit.f_damp;
    let u = f - fit.f_ringdown;
    fit.gamma1 * damp / (u * u + damp * damp) * (-fit.gamma2 * u / damp).exp()
}

fn merger_ringdown_derivative(fit: &PhenomFit, f: f64) -> f64 {
    let damp = fit.gamma3 * fit.f_damp;
    let u = f - fit.f_ringdown;
    let den = u * u + damp * damp;
    let e = (-fit.gamma2 * u / damp).exp();
    fit.gamma1 * damp * e * (-2.0 * u / (den * den) - fit.gamma2 / (damp * den))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::phenom::test_fit;
    use crate::domain::BinaryParams;
    use crate::math::step_function;
    use crate::math::terms::central_difference;

    fn amplitude() -> PhenomAmplitude {
        let d = BinaryParams { mass_1: 30.0, mass_2: 25.0, a_1: 0.3, ..BinaryParams::default() }
            .derive()
            .unwrap();
        let pn = PnAmplitudeCoefficients::new(&d);
        let coeffs = PhenomCoefficients::new(test_fit()).unwrap();
        PhenomAmplitude::new(&pn, &coeffs).unwrap()
    }

    #[test]
    fn intermediate_quartic_meets_collocation_conditions() {
        let amp = amplitude();
        let c = PhenomCoefficients::new(test_fit()).unwrap();
        let q = amp.intermediate_band();
        let slope = |f: f64| central_difference(|x| q.value(x), f);

        assert!((q.value(c.f1_amp) - amp.inspiral(c.f1_amp)).abs() < 1e-7);
        assert!((slope(c.f1_amp) - amp.inspiral_derivative(c.f1_amp)).abs() < 1e-4);
        assert!((q.value(c.f2_amp) - 0.85).abs() < 1e-7);
        assert!((q.value(c.f3_amp) - amp.merger_ringdown(c.f3_amp)).abs() < 1e-7);
        assert!((slope(c.f3_amp) - amp.merger_ringdown_derivative(c.f3_amp)).abs() < 1e-4);
    }

    #[test]
    fn merger_ringdown_derivative_is_exact() {
        let amp = amplitude();
        for f in [0.05, 0.065, 0.12] {
            let exact = amp.merger_ringdown_derivative(f);
            let numeric = central_difference(|x| amp.merger_ringdown(x), f);
            assert!(((exact - numeric) / exact.abs()).abs() < 1e-6);
        }
    }

    #[test]
    fn blended_amplitude_is_continuous_at_the_joins() {
        let amp = amplitude();
        let c = PhenomCoefficients::new(test_fit()).unwrap();
        for f in [c.f1_amp, c.f3_amp] {
            let below = amp.value(f * (1.0 - 1e-9), step_function);
            let above = amp.value(f * (1.0 + 1e-9), step_function);
            let on = amp.value(f, step_function);
            assert!((below - above).abs() < 1e-6);
            assert!((on - below).abs() < 1e-6);
        }
    }
}
