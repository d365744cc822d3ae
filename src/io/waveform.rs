//! Read/write waveform JSON files.
//!
//! A waveform file is the portable result of one evaluation:
//! - model name and the full parameter map
//! - the phase breakdown (grid, `Ψ_GR`, `Ψ`, `δΨ`, seams)
//! - the plus and cross polarizations as `[re, im]` pairs
//!
//! `gwdev plot` re-renders figures from it without re-evaluating the model.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ModelKind, Polarizations};
use crate::error::AppError;
use crate::models::PhaseBreakdown;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformFile {
    pub tool: String,
    pub created_at: DateTime<Utc>,
    pub model: ModelKind,
    pub parameters: BTreeMap<String, f64>,
    pub phase: PhaseBreakdown,
    pub strain: Polarizations,
}

impl WaveformFile {
    pub fn new(
        model: ModelKind,
        parameters: BTreeMap<String, f64>,
        phase: PhaseBreakdown,
        strain: Polarizations,
    ) -> Self {
        Self {
            tool: "gwdev".to_string(),
            created_at: Utc::now(),
            model,
            parameters,
            phase,
            strain,
        }
    }

    /// Both column sets must sit on the same grid.
    fn check(&self) -> Result<(), AppError> {
        let n = self.phase.frequencies.len();
        let lens = [
            self.phase.dimensionless.len(),
            self.phase.baseline.len(),
            self.phase.total.len(),
            self.phase.delta.len(),
            self.strain.frequencies.len(),
            self.strain.plus.len(),
            self.strain.cross.len(),
        ];
        if lens.iter().any(|&l| l != n) {
            return Err(AppError::new(2, format!("Waveform JSON columns disagree in length (grid has {n} samples)")));
        }
        Ok(())
    }
}

/// Write a waveform JSON file.
pub fn write_waveform_json(path: &Path, waveform: &WaveformFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create waveform JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, waveform)
        .map_err(|e| AppError::new(2, format!("Failed to write waveform JSON: {e}")))?;
    Ok(())
}

/// Read and validate a waveform JSON file.
pub fn read_waveform_json(path: &Path) -> Result<WaveformFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open waveform JSON '{}': {e}", path.display())))?;
    let waveform: WaveformFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid waveform JSON: {e}")))?;
    waveform.check()?;
    Ok(waveform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn sample() -> WaveformFile {
        let phase = PhaseBreakdown {
            frequencies: vec![10.0, 20.0],
            dimensionless: vec![0.001, 0.002],
            baseline: vec![3.0, 2.0],
            total: vec![3.5, 2.25],
            delta: vec![0.5, 0.25],
            seams: None,
        };
        let strain = Polarizations {
            frequencies: vec![10.0, 20.0],
            plus: vec![Complex64::new(1e-22, -2e-22), Complex64::new(0.0, 0.0)],
            cross: vec![Complex64::new(3e-23, 4e-23), Complex64::new(0.0, 0.0)],
        };
        let mut params = BTreeMap::new();
        params.insert("mass_1".to_string(), 1.4);
        WaveformFile::new(ModelKind::TaylorF2Ppe, params, phase, strain)
    }

    #[test]
    fn write_then_read_preserves_columns() {
        let path = std::env::temp_dir().join(format!("gwdev-waveform-{}.json", std::process::id()));
        let original = sample();
        write_waveform_json(&path, &original).unwrap();
        let back = read_waveform_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(back.model, ModelKind::TaylorF2Ppe);
        assert_eq!(back.created_at, original.created_at);
        assert_eq!(back.phase.frequencies, original.phase.frequencies);
        for (a, b) in back.phase.delta.iter().zip(&original.phase.delta) {
            assert!((a - b).abs() <= 1e-15 * b.abs());
        }
        for (a, b) in back.strain.plus.iter().zip(&original.strain.plus) {
            assert!((a - b).norm() <= 1e-15 * b.norm());
        }
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let mut w = sample();
        w.strain.plus.pop();
        assert!(w.check().is_err());
    }
}
