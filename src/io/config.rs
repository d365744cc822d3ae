//! JSON run configuration.
//!
//! ```json
//! {
//!   "model": "IMRPhenomD_PPE",
//!   "parameters": { "mass_1": 30.0, "mass_2": 25.0, "beta": 0.01, "PN": -1 },
//!   "phenom": { "sigma2": -300.0, "...": 0.0 }
//! }
//! ```
//!
//! Every field is optional; `--model` and `--set` on the command line win over
//! the file.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::baseline::PhenomFit;
use crate::domain::ModelKind;
use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunFile {
    /// Canonical waveform name.
    #[serde(default)]
    pub model: Option<String>,
    /// Parameter overrides merged over the defaults.
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    /// IMRPhenomD calibration values; required by the three-band models.
    #[serde(default)]
    pub phenom: Option<PhenomFit>,
}

impl RunFile {
    /// Resolve `model`, if present.
    pub fn model_kind(&self) -> Result<Option<ModelKind>, AppError> {
        self.model
            .as_deref()
            .map(ModelKind::from_name)
            .transpose()
            .map_err(AppError::from)
    }
}

/// Read a run configuration file.
pub fn read_run_file(path: &Path) -> Result<RunFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open config '{}': {e}", path.display())))?;
    let run: RunFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid config JSON '{}': {e}", path.display())))?;
    Ok(run)
}
