//! Amplitude models.
//!
//! All three share the leading-order prefactor `A_0(f)` and differ in the
//! dimensionless shape multiplying it.

use serde::Serialize;

use crate::baseline::{newtonian_amplitude, CoefficientLibrary, PhenomAmplitude};
use crate::domain::{DerivedParams, ModelKind};
use crate::error::WaveformError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AmplitudeModel {
    /// `A_0` alone.
    Newtonian,
    /// `A_0 Σ a_i x^{i/3}`.
    PostNewtonian,
    /// `A_0` times the three-band IMRPhenomD shape.
    Phenomenological,
}

impl AmplitudeModel {
    pub fn for_kind(kind: ModelKind) -> Self {
        match kind {
            ModelKind::TaylorF2Ppe => AmplitudeModel::Newtonian,
            ModelKind::TaylorF2Mult => AmplitudeModel::PostNewtonian,
            ModelKind::PhenomDPpe | ModelKind::PhenomDMult => AmplitudeModel::Phenomenological,
        }
    }

    /// Amplitude at each sample. `hz` and `ff` are the same grid in Hz and in `M f`.
    pub fn evaluate(
        self,
        library: &dyn CoefficientLibrary,
        d: &DerivedParams,
        distance_m: f64,
        hz: &[f64],
        ff: &[f64],
    ) -> Result<Vec<f64>, WaveformError> {
        let shape: Vec<f64> = match self {
            AmplitudeModel::Newtonian => vec![1.0; ff.len()],
            AmplitudeModel::PostNewtonian => {
                let series = library.amplitude_coefficients(d).series();
                series.evaluate(ff)
            }
            AmplitudeModel::Phenomenological => {
                let coeffs = library.phenom_coefficients(d)?;
                let amp = PhenomAmplitude::new(&library.amplitude_coefficients(d), &coeffs)?;
                ff.iter().map(|&f| amp.value(f, |x, b| library.step(x, b))).collect()
            }
        };

        Ok(hz
            .iter()
            .zip(shape)
            .map(|(&f, s)| newtonian_amplitude(d, distance_m, f) * s)
            .collect())
    }
}
