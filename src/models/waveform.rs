//! The four deviated waveform models behind one type.
//!
//! A `Waveform` owns its parameter set and grid and shares a coefficient library.
//! Phase evaluation is pure. The frequency-domain strain is memoised on the
//! instance and dropped on every parameter or grid update.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::baseline::CoefficientLibrary;
use crate::domain::{DerivedParams, FrequencyGrid, ModelKind, Polarizations};
use crate::error::WaveformError;
use crate::params::WaveformParams;
use crate::phase::{
    assemble_three_band, BandPhases, ContinuityResiduals, MultipolarCorrection, NoCorrection, PhaseCorrection,
    PpeCorrection, SeamCoefficients, SingleBandPhase,
};
use crate::strain::{compose, AmplitudeModel};

const SINGLE_BAND_MULTIPOLAR: MultipolarCorrection = MultipolarCorrection::single_band();
const THREE_BAND_MULTIPOLAR: MultipolarCorrection = MultipolarCorrection::three_band();

/// Deviation family applied by each model.
pub fn correction_for(kind: ModelKind) -> &'static dyn PhaseCorrection {
    match kind {
        ModelKind::TaylorF2Ppe | ModelKind::PhenomDPpe => &PpeCorrection,
        ModelKind::TaylorF2Mult => &SINGLE_BAND_MULTIPOLAR,
        ModelKind::PhenomDMult => &THREE_BAND_MULTIPOLAR,
    }
}

/// Seam layout and matching quality of a three-band evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeamReport {
    pub f1: f64,
    pub f2: f64,
    pub coefficients: SeamCoefficients,
    pub residuals: ContinuityResiduals,
}

impl SeamReport {
    fn from_bands(bands: &BandPhases) -> Self {
        Self {
            f1: bands.f1,
            f2: bands.f2,
            coefficients: bands.seam_coefficients(),
            residuals: bands.continuity(),
        }
    }
}

/// Phase split into the undeformed model and the deviation it picks up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBreakdown {
    /// Grid in Hz.
    pub frequencies: Vec<f64>,
    /// Grid in units of `c^3 / (G M)`.
    pub dimensionless: Vec<f64>,
    pub baseline: Vec<f64>,
    pub total: Vec<f64>,
    /// `total - baseline`.
    pub delta: Vec<f64>,
    /// Present for the three-band models.
    pub seams: Option<SeamReport>,
}

enum Assembled {
    Single(SingleBandPhase),
    Three(BandPhases),
}

pub struct Waveform {
    kind: ModelKind,
    params: WaveformParams,
    grid: FrequencyGrid,
    library: Arc<dyn CoefficientLibrary>,
    strain: Option<Polarizations>,
}

impl std::fmt::Debug for Waveform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Waveform")
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("grid_len", &self.grid.len())
            .field("cached", &self.strain.is_some())
            .finish()
    }
}

impl Waveform {
    pub fn new(
        kind: ModelKind,
        params: WaveformParams,
        grid: FrequencyGrid,
        library: Arc<dyn CoefficientLibrary>,
    ) -> Self {
        Self {
            kind,
            params,
            grid,
            library,
            strain: None,
        }
    }

    /// Report a caller-supplied model name that does not match this model.
    ///
    /// The name is only informational; the model kind decides the physics.
    pub fn with_label(self, name: &str) -> Self {
        if name != self.kind.name() {
            warn!(
                model = self.kind.name(),
                label = name,
                "different waveform name passed to {}",
                self.kind
            );
        }
        self
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn params(&self) -> &WaveformParams {
        &self.params
    }

    pub fn grid(&self) -> &FrequencyGrid {
        &self.grid
    }

    fn assemble(&self, d: &DerivedParams, correction: &dyn PhaseCorrection) -> Result<Assembled, WaveformError> {
        let lib = self.library.as_ref();
        if self.kind.is_three_band() {
            Ok(Assembled::Three(assemble_three_band(lib, &self.params, d, correction)?))
        } else {
            Ok(Assembled::Single(SingleBandPhase::assemble(lib, &self.params, d, correction)))
        }
    }

    fn evaluate(&self, assembled: &Assembled, ff: &[f64]) -> Vec<f64> {
        match assembled {
            Assembled::Single(phase) => phase.evaluate(ff),
            Assembled::Three(bands) => bands.evaluate(ff, |f, b| self.library.step(f, b)),
        }
    }

    /// Phase on the grid, same length and order as the grid.
    pub fn calculate_phase(&self) -> Result<Vec<f64>, WaveformError> {
        let d = self.params.binary.derive()?;
        let ff = self.grid.dimensionless(d.total_mass_s);
        let assembled = self.assemble(&d, correction_for(self.kind))?;
        Ok(self.evaluate(&assembled, &ff))
    }

    /// Phase with and without deviations, plus the seam report for three-band models.
    ///
    /// For the multipolar models the baseline excludes the GR spin and 3PN
    /// point-particle pieces the multipolar terms carry, so `delta` is nonzero even
    /// with all deviations at zero.
    pub fn phase_breakdown(&self) -> Result<PhaseBreakdown, WaveformError> {
        let d = self.params.binary.derive()?;
        let ff = self.grid.dimensionless(d.total_mass_s);

        let deviated = self.assemble(&d, correction_for(self.kind))?;
        let reference = self.assemble(&d, &NoCorrection)?;
        let total = self.evaluate(&deviated, &ff);
        let baseline = self.evaluate(&reference, &ff);
        let delta = total.iter().zip(&baseline).map(|(t, b)| t - b).collect();

        let seams = match &deviated {
            Assembled::Three(bands) => Some(SeamReport::from_bands(bands)),
            Assembled::Single(_) => None,
        };

        Ok(PhaseBreakdown {
            frequencies: self.grid.hz().to_vec(),
            dimensionless: ff,
            baseline,
            total,
            delta,
            seams,
        })
    }

    /// Compute, memoise and return the plus and cross polarizations.
    pub fn calculate_frequency_domain_strain(&mut self) -> Result<&Polarizations, WaveformError> {
        let binary = self.params.binary;
        let d = binary.derive()?;
        let distance_m = binary.distance_m()?;
        let ff = self.grid.dimensionless(d.total_mass_s);

        let assembled = self.assemble(&d, correction_for(self.kind))?;
        let psi = self.evaluate(&assembled, &ff);
        let amplitude = AmplitudeModel::for_kind(self.kind).evaluate(
            self.library.as_ref(),
            &d,
            distance_m,
            self.grid.hz(),
            &ff,
        )?;

        let f_cut = d.cutoff_geometric(binary.cut);
        let strain = compose(self.grid.hz(), &ff, &amplitude, &psi, binary.theta_jn, f_cut);
        Ok(self.strain.insert(strain))
    }

    /// Memoised strain, if computed since the last update.
    pub fn frequency_domain_strain(&self) -> Option<&Polarizations> {
        self.strain.as_ref()
    }

    /// Merge `partial` into the parameter set and drop the memoised strain.
    ///
    /// The strain is dropped even when the update is rejected.
    pub fn update_params(&mut self, partial: &BTreeMap<String, f64>) -> Result<(), WaveformError> {
        let result = self.params.update(partial);
        self.invalidate();
        result
    }

    pub fn set_grid(&mut self, grid: FrequencyGrid) {
        self.grid = grid;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        if self.strain.take().is_some() {
            debug!(model = self.kind.name(), "dropped cached strain");
        }
    }
}
