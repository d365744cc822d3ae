//! Export strain and phase columns to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::Polarizations;
use crate::error::AppError;
use crate::models::PhaseBreakdown;

/// Write one row per frequency: grid, phase breakdown, then both polarizations.
pub fn write_strain_csv(path: &Path, breakdown: &PhaseBreakdown, strain: &Polarizations) -> Result<(), AppError> {
    if breakdown.frequencies.len() != strain.len() {
        return Err(AppError::new(
            2,
            format!(
                "Phase grid ({}) and strain ({}) have different lengths",
                breakdown.frequencies.len(),
                strain.len()
            ),
        ));
    }

    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(
        out,
        "frequency_hz,mf,psi_gr,psi,dpsi,h_plus_re,h_plus_im,h_cross_re,h_cross_im"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for i in 0..strain.len() {
        let (p, c) = (strain.plus[i], strain.cross[i]);
        writeln!(
            out,
            "{:.10},{:.10e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e}",
            breakdown.frequencies[i],
            breakdown.dimensionless[i],
            breakdown.baseline[i],
            breakdown.total[i],
            breakdown.delta[i],
            p.re,
            p.im,
            c.re,
            c.im,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn writes_header_and_one_row_per_sample() {
        let breakdown = PhaseBreakdown {
            frequencies: vec![10.0, 20.0, 30.0],
            dimensionless: vec![0.001, 0.002, 0.003],
            baseline: vec![1.0; 3],
            total: vec![1.5; 3],
            delta: vec![0.5; 3],
            seams: None,
        };
        let strain = Polarizations {
            frequencies: breakdown.frequencies.clone(),
            plus: vec![Complex64::new(1.0, 2.0); 3],
            cross: vec![Complex64::new(0.0, 0.0); 3],
        };

        let path = std::env::temp_dir().join(format!("gwdev-export-{}.csv", std::process::id()));
        write_strain_csv(&path, &breakdown, &strain).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("frequency_hz,mf,"));
        assert_eq!(lines[1].split(',').count(), 9);
        assert!(lines[3].starts_with("30.0000000000,"));
    }

    #[test]
    fn mismatched_lengths_fail_before_writing() {
        let breakdown = PhaseBreakdown {
            frequencies: vec![10.0],
            dimensionless: vec![0.001],
            baseline: vec![0.0],
            total: vec![0.0],
            delta: vec![0.0],
            seams: None,
        };
        let strain = Polarizations { frequencies: vec![], plus: vec![], cross: vec![] };
        let path = std::env::temp_dir().join("gwdev-export-never-written.csv");
        assert!(write_strain_csv(&path, &breakdown, &strain).is_err());
        assert!(!path.exists());
    }
}
