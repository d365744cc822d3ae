//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the physics code stays clean and testable
//! - output changes are localized (the table tests below pin the layout)

use serde::Serialize;

use crate::domain::{DerivedParams, ModelKind};
use crate::models::{PhaseBreakdown, SeamReport};
use crate::params::WaveformParams;

/// One draw of a diagnostic scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanRow {
    pub draw: usize,
    pub mass_1: f64,
    pub mass_2: f64,
    pub chi_eff: f64,
    /// `max |Ψ - Ψ_GR|` over the grid.
    pub max_abs_delta: f64,
    /// Worst C¹ mismatch at the seams (three-band models only).
    pub seam_residual: Option<f64>,
}

/// Scan outcome: rows sorted by deviation, plus draws that failed to evaluate.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub rows: Vec<ScanRow>,
    pub failures: Vec<(usize, String)>,
}

impl ScanSummary {
    /// Collect per-draw results, largest deviation first.
    pub fn collect(results: Vec<Result<ScanRow, String>>) -> Self {
        let mut out = Self::default();
        for (i, r) in results.into_iter().enumerate() {
            match r {
                Ok(row) => out.rows.push(row),
                Err(e) => out.failures.push((i, e)),
            }
        }
        out.rows.sort_by(|a, b| {
            b.max_abs_delta
                .partial_cmp(&a.max_abs_delta)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out
    }

    pub fn worst_seam_residual(&self) -> Option<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.seam_residual)
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

/// Format the run summary (binary, derived values, deviations, phase range, seams).
pub fn format_run_summary(
    kind: ModelKind,
    params: &WaveformParams,
    derived: &DerivedParams,
    breakdown: &PhaseBreakdown,
) -> String {
    let b = &params.binary;
    let mut out = String::new();

    out.push_str(&format!("=== gwdev - {kind} ===\n"));
    out.push_str(&format!(
        "Binary: m1={:.3} m2={:.3} Msun | a1={:.3} a2={:.3} | z={:.4} | dL={:.2} Mpc\n",
        b.mass_1, b.mass_2, b.a_1, b.a_2, b.redshift, b.luminosity_distance
    ));
    out.push_str(&format!(
        "Angles: theta_jn={:.4} phase={:.4} | geocent_time={:.3}\n",
        b.theta_jn, b.phase, b.geocent_time
    ));
    out.push_str(&format!(
        "Derived: M={:.6e}s Mc={:.6e}s eta={:.6} delta={:.6}\n",
        derived.total_mass_s, derived.chirp_mass_s, derived.eta, derived.delta
    ));
    out.push_str(&format!(
        "Spins: chi_s={:.4} chi_a={:.4} chi_eff={:.4} chi_pn={:.4}\n",
        derived.chi_s, derived.chi_a, derived.chi_eff, derived.chi_pn
    ));
    out.push_str(&format!(
        "Cutoff: {:.2} x f_isco = {:.3} Hz (Mf={:.5})\n",
        b.cut,
        b.cut * derived.f_isco_hz(),
        derived.cutoff_geometric(b.cut)
    ));

    let active: Vec<String> = params
        .deviations
        .entries()
        .into_iter()
        .filter(|&(k, v)| v != 0.0 || k == "PN")
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    out.push_str(&format!("Deviations: {}\n", active.join(" ")));
    out.push_str(&format!("PN truncation: maxn={}\n", params.data.maxn));

    let n = breakdown.frequencies.len();
    if let (Some(f0), Some(f1)) = (breakdown.frequencies.first(), breakdown.frequencies.last()) {
        out.push_str(&format!(
            "Grid: n={n} | f=[{f0:.3}, {f1:.3}] Hz | Mf=[{:.5}, {:.5}]\n",
            breakdown.dimensionless.first().copied().unwrap_or(0.0),
            breakdown.dimensionless.last().copied().unwrap_or(0.0),
        ));
    }
    let (lo, hi) = min_max(&breakdown.total);
    out.push_str(&format!("Phase: [{lo:.6e}, {hi:.6e}] rad\n"));
    out.push_str(&format!("Max |dPsi|: {:.6e} rad\n", max_abs(&breakdown.delta)));

    if let Some(seams) = &breakdown.seams {
        out.push_str(&format_seams(seams));
    }
    out.push('\n');

    out
}

fn format_seams(seams: &SeamReport) -> String {
    let c = &seams.coefficients;
    let r = &seams.residuals;
    let mut out = String::new();
    out.push_str("\nSeams:\n");
    out.push_str(&format!("- f1={:.5} f2={:.5} (Mf)\n", seams.f1, seams.f2));
    out.push_str(&format!("- beta : {}\n", fmt_vec(&[c.beta0, c.beta1])));
    out.push_str(&format!("- alpha: {}\n", fmt_vec(&[c.alpha0, c.alpha1])));
    out.push_str(&format!(
        "- continuity: value(f1)={:.3e} slope(f1)={:.3e} value(f2)={:.3e} slope(f2)={:.3e}\n",
        r.value_f1, r.slope_f1, r.value_f2, r.slope_f2
    ));
    out
}

/// Phase table with `rows` samples spread evenly over the grid.
pub fn format_phase_table(breakdown: &PhaseBreakdown, rows: usize) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>12} {:>10} {:>16} {:>16} {:>14}\n",
            "f_hz", "mf", "psi_gr", "psi", "dpsi"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<10} {:-<16} {:-<16} {:-<14}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for i in sample_indices(breakdown.frequencies.len(), rows) {
        out.push_str(
            format!(
                "{:>12.4} {:>10.6} {:>16.6e} {:>16.6e} {:>14.4e}\n",
                breakdown.frequencies[i],
                breakdown.dimensionless[i],
                breakdown.baseline[i],
                breakdown.total[i],
                breakdown.delta[i],
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the scan table (top-N by deviation) and a one-line summary.
pub fn format_scan(summary: &ScanSummary, top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Scan: {} draws evaluated, {} failed\n",
        summary.rows.len(),
        summary.failures.len()
    ));
    if let Some(worst) = summary.rows.first() {
        out.push_str(&format!(
            "Largest max |dPsi|: {:.6e} rad (draw {})\n",
            worst.max_abs_delta, worst.draw
        ));
    }
    if let Some(seam) = summary.worst_seam_residual() {
        out.push_str(&format!("Worst seam residual: {seam:.3e}\n"));
    }
    out.push('\n');

    out.push_str(
        format!(
            "{:>6} {:>9} {:>9} {:>8} {:>14} {:>12}\n",
            "draw", "m1", "m2", "chi_eff", "max_dpsi", "seam"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<6} {:-<9} {:-<9} {:-<8} {:-<14} {:-<12}\n", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for r in summary.rows.iter().take(top_n) {
        let seam = r.seam_residual.map(|v| format!("{v:.3e}")).unwrap_or_else(|| "-".to_string());
        out.push_str(
            format!(
                "{:>6} {:>9.3} {:>9.3} {:>8.4} {:>14.6e} {:>12}\n",
                r.draw, r.mass_1, r.mass_2, r.chi_eff, r.max_abs_delta, seam
            )
            .trim_end(),
        );
        out.push('\n');
    }

    for (draw, err) in &summary.failures {
        out.push_str(&format!("  (failed draw {draw}) {}\n", truncate(err, 72)));
    }

    out
}

fn sample_indices(len: usize, rows: usize) -> Vec<usize> {
    if len == 0 || rows == 0 {
        return Vec::new();
    }
    if rows >= len {
        return (0..len).collect();
    }
    if rows == 1 {
        return vec![0];
    }
    let mut out: Vec<usize> = (0..rows)
        .map(|i| ((i as f64) * (len as f64 - 1.0) / (rows as f64 - 1.0)).round() as usize)
        .collect();
    out.dedup();
    out
}

fn min_max(v: &[f64]) -> (f64, f64) {
    v.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)))
}

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |m: f64, x| m.max(x.abs()))
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6e}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown() -> PhaseBreakdown {
        PhaseBreakdown {
            frequencies: vec![10.0, 20.0, 30.0, 40.0, 50.0],
            dimensionless: vec![0.001, 0.002, 0.003, 0.004, 0.005],
            baseline: vec![5.0, 4.0, 3.0, 2.0, 1.0],
            total: vec![5.5, 4.0, 3.0, 2.0, 0.5],
            delta: vec![0.5, 0.0, 0.0, 0.0, -0.5],
            seams: None,
        }
    }

    #[test]
    fn phase_table_samples_endpoints() {
        let txt = format_phase_table(&breakdown(), 3);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].trim_start().starts_with("f_hz"));
        assert!(lines[2].trim_start().starts_with("10.0000"));
        assert!(lines[3].trim_start().starts_with("30.0000"));
        assert!(lines[4].trim_start().starts_with("50.0000"));
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn sample_indices_cover_short_grids() {
        assert_eq!(sample_indices(3, 10), vec![0, 1, 2]);
        assert_eq!(sample_indices(5, 2), vec![0, 4]);
        assert!(sample_indices(0, 4).is_empty());
    }

    #[test]
    fn run_summary_lists_active_deviations() {
        use crate::domain::BinaryParams;

        let mut params = WaveformParams::new(BinaryParams {
            mass_1: 1.4,
            mass_2: 1.4,
            luminosity_distance: 40.0,
            ..BinaryParams::default()
        });
        params.deviations.beta = 0.01;
        let d = params.binary.derive().unwrap();
        let txt = format_run_summary(ModelKind::TaylorF2Ppe, &params, &d, &breakdown());

        assert!(txt.starts_with("=== gwdev - TaylorF2_PPE ===\n"));
        assert!(txt.contains("beta=0.01"));
        assert!(txt.contains("eta=0.250000"));
        assert!(txt.contains("Max |dPsi|: 5.000000e-1 rad"));
        assert!(!txt.contains("Seams:"));
    }

    #[test]
    fn scan_sorts_by_deviation_and_keeps_failures() {
        let row = |draw, dev, seam| ScanRow {
            draw,
            mass_1: 10.0,
            mass_2: 5.0,
            chi_eff: 0.1,
            max_abs_delta: dev,
            seam_residual: seam,
        };
        let summary = ScanSummary::collect(vec![
            Ok(row(0, 1.0, Some(1e-9))),
            Err("eta out of range".to_string()),
            Ok(row(2, 3.0, Some(4e-9))),
        ]);
        assert_eq!(summary.rows[0].draw, 2);
        assert_eq!(summary.failures, vec![(1, "eta out of range".to_string())]);
        assert_eq!(summary.worst_seam_residual(), Some(4e-9));

        let txt = format_scan(&summary, 1);
        assert!(txt.contains("Scan: 2 draws evaluated, 1 failed"));
        assert!(txt.contains("(failed draw 1) eta out of range"));
    }
}
