//! Single-band (TaylorF2) phase assembly: baseline plus deviations in one pass.

use crate::baseline::CoefficientLibrary;
use crate::domain::DerivedParams;
use crate::math::PhaseSeries;
use crate::params::WaveformParams;
use crate::phase::PhaseCorrection;

/// Baseline and deviation term lists of a single-band model.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleBandPhase {
    pub baseline: PhaseSeries,
    pub correction: PhaseSeries,
}

impl SingleBandPhase {
    pub fn assemble(
        library: &dyn CoefficientLibrary,
        params: &WaveformParams,
        d: &DerivedParams,
        correction: &dyn PhaseCorrection,
    ) -> Self {
        let baseline = library.baseline_phase(&params.binary, d, params.data.maxn);
        let phi = library.phase_coefficients(d);
        let correction = correction.series(d, &params.deviations, &phi);
        Self { baseline, correction }
    }

    /// Baseline and correction as one term list.
    pub fn total(&self) -> PhaseSeries {
        let mut total = self.baseline.clone();
        total.extend(self.correction.clone());
        total
    }

    pub fn evaluate(&self, ff: &[f64]) -> Vec<f64> {
        ff.iter()
            .map(|&f| self.baseline.value(f) + self.correction.value(f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    use crate::baseline::PnLibrary;
    use crate::domain::{BinaryParams, FrequencyGrid};
    use crate::params::DeviationParams;
    use crate::phase::{MultipolarCorrection, PpeCorrection};
    use crate::report::fit_power_law;

    fn bns() -> WaveformParams {
        WaveformParams::new(BinaryParams {
            mass_1: 1.4,
            mass_2: 1.4,
            luminosity_distance: 40.0,
            ..BinaryParams::default()
        })
    }

    #[test]
    fn ppe_with_zero_deviations_is_taylorf2() {
        let params = bns();
        let d = params.binary.derive().unwrap();
        let grid = FrequencyGrid::linear(10.0, 1000.0, 500).unwrap();
        let ff = grid.dimensionless(d.total_mass_s);

        let lib = PnLibrary::new();
        let phase = SingleBandPhase::assemble(&lib, &params, &d, &PpeCorrection);
        let psi = phase.evaluate(&ff);
        let tf2 = lib.baseline_phase(&params.binary, &d, 8).evaluate(&ff);

        assert_eq!(psi.len(), grid.len());
        for (a, b) in psi.iter().zip(&tf2) {
            assert!((a - b).abs() <= 1e-10 * b.abs().max(1.0), "{a} vs {b}");
        }
    }

    #[test]
    fn ppe_residual_is_a_power_law_in_frequency() {
        let mut params = bns();
        params.deviations = DeviationParams { beta: 1e-3, pn: -1.0, ..DeviationParams::gr() };
        let d = params.binary.derive().unwrap();
        let grid = FrequencyGrid::log_spaced(10.0, 1000.0, 200).unwrap();
        let ff = grid.dimensionless(d.total_mass_s);

        let lib = PnLibrary::new();
        let psi = SingleBandPhase::assemble(&lib, &params, &d, &PpeCorrection).evaluate(&ff);
        let tf2 = lib.baseline_phase(&params.binary, &d, 8).evaluate(&ff);
        let residual: Vec<f64> = psi.iter().zip(&tf2).map(|(a, b)| a - b).collect();

        let fit = fit_power_law(grid.hz(), &residual).unwrap();
        assert!((fit.exponent + 7.0 / 3.0).abs() < 1e-6, "exponent {}", fit.exponent);

        // amplitude at the first sample: β η^{-7/5} (πMf)^{-7/3}
        let expected = 1e-3 * 0.25f64.powf(-1.4) * (PI * ff[0]).powf(-7.0 / 3.0);
        assert!((residual[0] - expected).abs() < 1e-6 * expected);
    }

    #[test]
    fn multipolar_gr_limit_is_the_completed_baseline() {
        let mut params = bns();
        params.binary.a_1 = 0.05;
        params.binary.a_2 = 0.02;
        let d = params.binary.derive().unwrap();
        let ff = FrequencyGrid::log_spaced(10.0, 1000.0, 50).unwrap().dimensionless(d.total_mass_s);
        let lib = PnLibrary::new();
        let phi = lib.phase_coefficients(&d);

        let corr = MultipolarCorrection::single_band();
        let psi = SingleBandPhase::assemble(&lib, &params, &d, &corr).evaluate(&ff);
        let completed = {
            let mut s = lib.baseline_phase(&params.binary, &d, 8);
            s.extend(corr.series(&d, &DeviationParams::gr(), &phi));
            s
        };
        for (f, a) in ff.iter().zip(&psi) {
            let b = completed.value(*f);
            assert!((a - b).abs() <= 1e-10 * b.abs().max(1.0));
        }
    }

    #[test]
    fn total_series_matches_evaluation() {
        let mut params = bns();
        params.deviations.delta_phi[3] = 0.2;
        let d = params.binary.derive().unwrap();
        let phase = SingleBandPhase::assemble(&PnLibrary::new(), &params, &d, &PpeCorrection);
        let f = 1e-3;
        assert!((phase.total().value(f) - phase.evaluate(&[f])[0]).abs() < 1e-9 * phase.total().value(f).abs());
    }
}
