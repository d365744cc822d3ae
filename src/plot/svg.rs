//! SVG figures rendered with Plotters.
//!
//! Two figures, both pure consumers of arrays already computed by the models:
//!
//! - strain: `|h₊|` on log-log axes, then `Ψ` and `cos Ψ` against frequency
//! - delta: `Ψ_GR` against `Ψ_GR + δΨ`, then `δΨ` against `Mf`
//!
//! Samples that cannot be drawn on a log axis (zero amplitude above the cutoff,
//! non-finite values) are dropped before plotting.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::domain::Polarizations;
use crate::error::AppError;
use crate::models::PhaseBreakdown;

const FIGURE_SIZE: (u32, u32) = (1200, 1200);

/// Paths of the figures written by `write_figures`.
#[derive(Debug, Clone, PartialEq)]
pub struct FigurePaths {
    pub strain: PathBuf,
    pub delta: PathBuf,
}

impl FigurePaths {
    /// `<dir>/<stem>_strain.svg` and `<dir>/<stem>_delta.svg`.
    pub fn in_dir(dir: &Path, stem: &str) -> Self {
        Self {
            strain: dir.join(format!("{stem}_strain.svg")),
            delta: dir.join(format!("{stem}_delta.svg")),
        }
    }
}

/// Write both figures.
pub fn write_figures(
    paths: &FigurePaths,
    title: &str,
    strain: &Polarizations,
    breakdown: &PhaseBreakdown,
) -> Result<(), AppError> {
    write_strain_figure(&paths.strain, title, strain, &breakdown.total)?;
    write_delta_figure(&paths.delta, title, breakdown)?;
    info!(strain = %paths.strain.display(), delta = %paths.delta.display(), "wrote figures");
    Ok(())
}

/// `|h₊|`, `Ψ` and `cos Ψ` stacked in one figure.
pub fn write_strain_figure(path: &Path, title: &str, strain: &Polarizations, phase: &[f64]) -> Result<(), AppError> {
    let f = &strain.frequencies;
    let amp: Vec<(f64, f64)> = f
        .iter()
        .zip(&strain.plus)
        .map(|(&f, h)| (f, h.norm()))
        .filter(|&(f, a)| f > 0.0 && a > 0.0 && a.is_finite())
        .collect();
    let psi = finite_pairs(f, phase);
    let cos_psi: Vec<(f64, f64)> = psi.iter().map(|&(f, p)| (f, p.cos())).collect();

    render(path, |root| {
        let panels = root.split_evenly((3, 1));

        let (x0, x1) = bounds(amp.iter().map(|p| p.0)).unwrap_or((1.0, 10.0));
        let (y0, y1) = bounds(amp.iter().map(|p| p.1)).unwrap_or((1e-30, 1e-20));
        let mut chart = ChartBuilder::on(&panels[0])
            .caption(format!("{title}: |h+|"), ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d((x0..x1).log_scale(), (y0..y1).log_scale())?;
        chart.configure_mesh().x_desc("f [Hz]").y_desc("|h+|").draw()?;
        chart.draw_series(LineSeries::new(amp.iter().copied(), &BLUE))?;

        let (x0, x1) = bounds(psi.iter().map(|p| p.0)).unwrap_or((1.0, 10.0));
        let (y0, y1) = padded(bounds(psi.iter().map(|p| p.1)));
        let mut chart = ChartBuilder::on(&panels[1])
            .caption("phase", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d((x0..x1).log_scale(), y0..y1)?;
        chart.configure_mesh().x_desc("f [Hz]").y_desc("Psi [rad]").draw()?;
        chart.draw_series(LineSeries::new(psi.iter().copied(), &RED))?;

        let mut chart = ChartBuilder::on(&panels[2])
            .caption("cos(Psi)", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d((x0..x1).log_scale(), -1.1f64..1.1f64)?;
        chart.configure_mesh().x_desc("f [Hz]").y_desc("cos Psi").draw()?;
        chart.draw_series(LineSeries::new(cos_psi.iter().copied(), &BLACK))?;

        Ok(())
    })
}

/// `Ψ_GR` and `Ψ_GR + δΨ` on top, `δΨ` against `Mf` below.
pub fn write_delta_figure(path: &Path, title: &str, breakdown: &PhaseBreakdown) -> Result<(), AppError> {
    let gr = finite_pairs(&breakdown.frequencies, &breakdown.baseline);
    let total = finite_pairs(&breakdown.frequencies, &breakdown.total);
    let delta = finite_pairs(&breakdown.dimensionless, &breakdown.delta);

    render(path, |root| {
        let panels = root.split_evenly((2, 1));

        let (x0, x1) = bounds(gr.iter().chain(&total).map(|p| p.0)).unwrap_or((1.0, 10.0));
        let (y0, y1) = padded(bounds(gr.iter().chain(&total).map(|p| p.1)));
        let mut chart = ChartBuilder::on(&panels[0])
            .caption(format!("{title}: Psi_GR vs Psi_GR + dPsi"), ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d((x0..x1).log_scale(), y0..y1)?;
        chart.configure_mesh().x_desc("f [Hz]").y_desc("phase [rad]").draw()?;
        chart
            .draw_series(LineSeries::new(gr.iter().copied(), &BLACK))?
            .label("Psi_GR")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));
        chart
            .draw_series(LineSeries::new(total.iter().copied(), &RED))?
            .label("Psi_GR + dPsi")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        let (x0, x1) = bounds(delta.iter().map(|p| p.0)).unwrap_or((1e-4, 1e-1));
        let (y0, y1) = padded(bounds(delta.iter().map(|p| p.1)));
        let mut chart = ChartBuilder::on(&panels[1])
            .caption("dPsi", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d((x0..x1).log_scale(), y0..y1)?;
        chart.configure_mesh().x_desc("Mf").y_desc("dPsi [rad]").draw()?;
        chart.draw_series(LineSeries::new(delta.iter().copied(), &BLUE))?;

        Ok(())
    })
}

type Root<'a> = DrawingArea<SVGBackend<'a>, plotters::coord::Shift>;

fn render<F>(path: &Path, draw: F) -> Result<(), AppError>
where
    F: for<'a> FnOnce(&Root<'a>) -> Result<(), DrawingAreaErrorKind<std::io::Error>>,
{
    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    let result = root
        .fill(&WHITE)
        .and_then(|_| draw(&root))
        .and_then(|_| root.present());
    result.map_err(|e| AppError::new(2, format!("Failed to render figure '{}': {e}", path.display())))
}

fn finite_pairs(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y)
        .filter(|&(&x, &y)| x > 0.0 && x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo.is_finite() && hi.is_finite() && hi > lo {
        Some((lo, hi))
    } else {
        None
    }
}

fn padded(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        Some((lo, hi)) => {
            let pad = ((hi - lo) * 0.05).max(1e-12);
            (lo - pad, hi + pad)
        }
        None => (-1.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn breakdown() -> PhaseBreakdown {
        let frequencies: Vec<f64> = (1..=50).map(|i| 10.0 * i as f64).collect();
        let dimensionless: Vec<f64> = frequencies.iter().map(|f| f * 1.4e-5).collect();
        let baseline: Vec<f64> = dimensionless.iter().map(|x| x.powf(-5.0 / 3.0)).collect();
        let delta: Vec<f64> = dimensionless.iter().map(|x| 1e-3 * x.powf(-7.0 / 3.0)).collect();
        let total = baseline.iter().zip(&delta).map(|(a, b)| a + b).collect();
        PhaseBreakdown {
            frequencies,
            dimensionless,
            baseline,
            total,
            delta,
            seams: None,
        }
    }

    #[test]
    fn writes_both_figures() {
        let b = breakdown();
        let mut plus: Vec<Complex64> = b.total.iter().map(|p| Complex64::from_polar(1e-22, *p)).collect();
        // Zeros above the cutoff must not break the log axis.
        for h in plus.iter_mut().skip(40) {
            *h = Complex64::new(0.0, 0.0);
        }
        let strain = Polarizations {
            frequencies: b.frequencies.clone(),
            cross: plus.clone(),
            plus,
        };

        let dir = std::env::temp_dir().join(format!("gwdev-svg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let paths = FigurePaths::in_dir(&dir, "test");
        write_figures(&paths, "TaylorF2_PPE", &strain, &b).unwrap();

        for p in [&paths.strain, &paths.delta] {
            let svg = std::fs::read_to_string(p).unwrap();
            assert!(svg.starts_with("<svg"));
            assert!(svg.contains("polyline") || svg.contains("path"));
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn bounds_reject_degenerate_ranges() {
        assert_eq!(bounds([1.0, 1.0].into_iter()), None);
        assert_eq!(bounds([2.0, f64::NAN, 1.0].into_iter()), Some((1.0, 2.0)));
        assert_eq!(padded(None), (-1.0, 1.0));
    }
}
