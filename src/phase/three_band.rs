//! Three-band (IMRPhenomD) phase assembly with C¹ seams.
//!
//! The inspiral band carries the TaylorF2 baseline, the deviation terms and the
//! late-inspiral terms. The intermediate and merger-ringdown bands have fixed
//! shapes whose free constants (`β₀, β₁` and `α₀, α₁`) are re-solved on every
//! assembly so that phase and slope agree at `f1` and `f2`. Deviations therefore
//! propagate past the inspiral band as a shift of those constants.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::baseline::{CoefficientLibrary, IntermediatePhase, MergerRingdownPhase, PhenomCoefficients};
use crate::domain::DerivedParams;
use crate::error::WaveformError;
use crate::math::{theta_minus, theta_plus, PhaseSeries};
use crate::params::WaveformParams;
use crate::phase::PhaseCorrection;

/// The three matched bands of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct BandPhases {
    pub inspiral: PhaseSeries,
    pub intermediate: IntermediatePhase,
    pub merger_ringdown: MergerRingdownPhase,
    pub f1: f64,
    pub f2: f64,
}

/// Constants fixed by the seam conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeamCoefficients {
    pub beta0: f64,
    pub beta1: f64,
    pub alpha0: f64,
    pub alpha1: f64,
}

/// Jumps in phase and slope across each seam (right band minus left band).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuityResiduals {
    pub value_f1: f64,
    pub slope_f1: f64,
    pub value_f2: f64,
    pub slope_f2: f64,
}

impl ContinuityResiduals {
    pub fn max_abs(&self) -> f64 {
        [self.value_f1, self.slope_f1, self.value_f2, self.slope_f2]
            .into_iter()
            .fold(0.0, |m, r| m.max(r.abs()))
    }
}

impl BandPhases {
    /// Solve the seam constants for a given inspiral band.
    pub fn match_bands(inspiral: PhaseSeries, coeffs: &PhenomCoefficients, eta: f64) -> Result<Self, WaveformError> {
        let (f1, f2) = (coeffs.f1, coeffs.f2);
        if !(f1 < f2) {
            return Err(WaveformError::BandOrdering { f1, f2 });
        }
        let fit = &coeffs.fit;

        let intermediate = IntermediatePhase::matched(
            eta,
            fit.beta2,
            fit.beta3,
            f1,
            inspiral.value(f1),
            inspiral.derivative(f1),
        );
        let merger_ringdown =
            MergerRingdownPhase::matched(eta, fit, f2, intermediate.value(f2), intermediate.derivative(f2));

        Ok(Self {
            inspiral,
            intermediate,
            merger_ringdown,
            f1,
            f2,
        })
    }

    /// Blended phase at `f`; `step(f, boundary)` selects the band.
    pub fn value(&self, f: f64, step: &impl Fn(f64, f64) -> f64) -> f64 {
        let s1 = step(f, self.f1);
        let s2 = step(f, self.f2);
        let w_ins = theta_minus(s1);
        let w_int = theta_plus(s1) * theta_minus(s2);
        let w_mr = theta_plus(s2);

        let mut psi = 0.0;
        if w_ins != 0.0 {
            psi += w_ins * self.inspiral.value(f);
        }
        if w_int != 0.0 {
            psi += w_int * self.intermediate.value(f);
        }
        if w_mr != 0.0 {
            psi += w_mr * self.merger_ringdown.value(f);
        }
        psi
    }

    pub fn evaluate(&self, ff: &[f64], step: impl Fn(f64, f64) -> f64) -> Vec<f64> {
        ff.iter().map(|&f| self.value(f, &step)).collect()
    }

    pub fn seam_coefficients(&self) -> SeamCoefficients {
        SeamCoefficients {
            beta0: self.intermediate.beta0,
            beta1: self.intermediate.beta1,
            alpha0: self.merger_ringdown.alpha0,
            alpha1: self.merger_ringdown.alpha1,
        }
    }

    pub fn continuity(&self) -> ContinuityResiduals {
        let (f1, f2) = (self.f1, self.f2);
        ContinuityResiduals {
            value_f1: self.intermediate.value(f1) - self.inspiral.value(f1),
            slope_f1: self.intermediate.derivative(f1) - self.inspiral.derivative(f1),
            value_f2: self.merger_ringdown.value(f2) - self.intermediate.value(f2),
            slope_f2: self.merger_ringdown.derivative(f2) - self.intermediate.derivative(f2),
        }
    }
}

/// Build the inspiral band from baseline, deviations and late-inspiral terms and
/// match the remaining bands to it.
pub fn assemble_three_band(
    library: &dyn CoefficientLibrary,
    params: &WaveformParams,
    d: &DerivedParams,
    correction: &dyn PhaseCorrection,
) -> Result<BandPhases, WaveformError> {
    let coeffs = library.phenom_coefficients(d)?;
    let phi = library.phase_coefficients(d);

    let mut inspiral = library.baseline_phase(&params.binary, d, params.data.maxn);
    inspiral.extend(correction.series(d, &params.deviations, &phi));
    inspiral.extend(coeffs.late_inspiral(d.eta));

    let bands = BandPhases::match_bands(inspiral, &coeffs, d.eta)?;
    let seams = bands.seam_coefficients();
    debug!(
        correction = correction.label(),
        f1 = bands.f1,
        f2 = bands.f2,
        beta0 = seams.beta0,
        beta1 = seams.beta1,
        alpha0 = seams.alpha0,
        alpha1 = seams.alpha1,
        "matched phase bands"
    );
    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::phenom::test_fit;
    use crate::baseline::{PhenomFit, PnLibrary};
    use crate::domain::BinaryParams;
    use crate::math::step_function;
    use crate::params::DeviationParams;
    use crate::phase::{MultipolarCorrection, NoCorrection, PpeCorrection};

    fn bbh() -> WaveformParams {
        WaveformParams::new(BinaryParams {
            mass_1: 36.0,
            mass_2: 29.0,
            a_1: 0.2,
            a_2: -0.1,
            luminosity_distance: 400.0,
            ..BinaryParams::default()
        })
    }

    fn deviated() -> DeviationParams {
        let mut dev = DeviationParams {
            pn: -1.0,
            beta: 0.01,
            k_1: 2.0,
            k_2: -1.0,
            lambda_1: 0.5,
            lambda_2: 0.3,
            ..DeviationParams::gr()
        };
        dev.delta_phi[2] = 0.05;
        dev.delta_phi[9] = -0.02;
        dev
    }

    fn dense_grid() -> Vec<f64> {
        (1..400).map(|i| 0.0005 * i as f64).collect()
    }

    #[test]
    fn seams_are_c1_under_deviations() {
        let lib = PnLibrary::with_phenom(test_fit());
        let mut params = bbh();
        params.deviations = deviated();
        let d = params.binary.derive().unwrap();

        let families: [&dyn PhaseCorrection; 2] = [&PpeCorrection, &MultipolarCorrection::three_band()];
        for corr in families {
            let bands = assemble_three_band(&lib, &params, &d, corr).unwrap();
            let r = bands.continuity();
            let scale = bands
                .inspiral
                .value(bands.f1)
                .abs()
                .max(bands.intermediate.value(bands.f2).abs())
                .max(1.0);
            assert!(r.value_f1.abs() < 1e-9 * scale, "{}: {r:?}", corr.label());
            assert!(r.value_f2.abs() < 1e-9 * scale, "{}: {r:?}", corr.label());
            let slope = bands
                .inspiral
                .derivative(bands.f1)
                .abs()
                .max(bands.intermediate.derivative(bands.f2).abs())
                .max(1.0);
            assert!(r.slope_f1.abs() < 1e-9 * slope, "{}: {r:?}", corr.label());
            assert!(r.slope_f2.abs() < 1e-9 * slope, "{}: {r:?}", corr.label());
        }
    }

    #[test]
    fn blended_phase_has_no_jumps_at_the_seams() {
        let lib = PnLibrary::with_phenom(test_fit());
        let mut params = bbh();
        params.deviations = deviated();
        let d = params.binary.derive().unwrap();
        let bands = assemble_three_band(&lib, &params, &d, &PpeCorrection).unwrap();

        for b in [bands.f1, bands.f2] {
            let eps = b * 1e-9;
            let below = bands.value(b - eps, &step_function);
            let on = bands.value(b, &step_function);
            let above = bands.value(b + eps, &step_function);
            assert!((below - on).abs() < 1e-6 * on.abs().max(1.0));
            assert!((above - on).abs() < 1e-6 * on.abs().max(1.0));
        }
    }

    #[test]
    fn zero_deviations_reproduce_unmodified_phenomd() {
        let lib = PnLibrary::with_phenom(test_fit());
        let params = bbh();
        let d = params.binary.derive().unwrap();
        let ff = dense_grid();

        let gr = assemble_three_band(&lib, &params, &d, &NoCorrection).unwrap().evaluate(&ff, step_function);
        let ppe = assemble_three_band(&lib, &params, &d, &PpeCorrection).unwrap().evaluate(&ff, step_function);
        assert_eq!(ppe.len(), ff.len());
        for (a, b) in ppe.iter().zip(&gr) {
            assert!((a - b).abs() <= 1e-10 * b.abs().max(1.0), "{a} vs {b}");
        }
    }

    #[test]
    fn deviations_shift_the_later_bands() {
        let lib = PnLibrary::with_phenom(test_fit());
        let mut params = bbh();
        let d = params.binary.derive().unwrap();
        let gr = assemble_three_band(&lib, &params, &d, &PpeCorrection).unwrap();
        params.deviations = deviated();
        let dev = assemble_three_band(&lib, &params, &d, &PpeCorrection).unwrap();
        assert_ne!(gr.seam_coefficients(), dev.seam_coefficients());
        // Band shapes are untouched.
        assert_eq!(gr.intermediate.beta2, dev.intermediate.beta2);
        assert_eq!(gr.merger_ringdown.alpha4, dev.merger_ringdown.alpha4);
    }

    #[test]
    fn inverted_bands_are_rejected() {
        let fit = PhenomFit { f_ringdown: 0.02, ..test_fit() };
        let lib = PnLibrary::with_phenom(fit);
        let params = bbh();
        let d = params.binary.derive().unwrap();
        let err = assemble_three_band(&lib, &params, &d, &PpeCorrection).unwrap_err();
        assert!(matches!(err, WaveformError::BandOrdering { .. }));
    }
}
