//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the model, parameters and grid
//! - evaluates phase and strain
//! - prints reports/plots
//! - writes optional exports

use std::collections::BTreeMap;
use std::path::Path;

use clap::Parser;

use crate::cli::{Command, PlotArgs, PlotSeries, RunArgs, ScanArgs};
use crate::error::AppError;
use crate::io::WaveformFile;
use crate::plot::{render_ascii_plot, FigurePaths, Series};

pub mod pipeline;

/// Entry point for the `gwdev` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Phase(args) => handle_run(args, OutputMode::Phase),
        Command::Strain(args) => handle_run(args, OutputMode::Strain),
        Command::Plot(args) => handle_plot(args),
        Command::Scan(args) => handle_scan(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Phase,
    Strain,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let setup = pipeline::resolve_setup(&args.model)?;
    let needs_strain = mode == OutputMode::Strain
        || args.export.is_some()
        || args.export_waveform.is_some()
        || args.figures.is_some();
    let run = pipeline::run_model(&setup, needs_strain)?;

    println!(
        "{}",
        crate::report::format_run_summary(run.kind, &run.params, &run.derived, &run.breakdown)
    );
    println!("{}", crate::report::format_phase_table(&run.breakdown, args.rows));

    if args.plot {
        let b = &run.breakdown;
        let plot = match (&run.strain, mode) {
            (Some(h), OutputMode::Strain) => {
                let amp: Vec<f64> = h.plus.iter().map(|z| z.norm()).collect();
                render_ascii_plot(&h.frequencies, Series { label: "|h+|", values: &amp }, None, args.width, args.height)
            }
            _ => render_ascii_plot(
                &b.frequencies,
                Series { label: "psi", values: &b.total },
                Some(Series { label: "psi_gr", values: &b.baseline }),
                args.width,
                args.height,
            ),
        };
        println!("{plot}");
    }

    // Optional exports.
    if let Some(strain) = &run.strain {
        if let Some(path) = &args.export {
            crate::io::write_strain_csv(path, &run.breakdown, strain)?;
        }
        if let Some(path) = &args.export_waveform {
            let file = WaveformFile::new(run.kind, run.params.to_map(), run.breakdown.clone(), strain.clone());
            crate::io::write_waveform_json(path, &file)?;
        }
        if let Some(dir) = &args.figures {
            write_figures(dir, run.kind.name(), &run.breakdown, strain)?;
        }
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let wf = crate::io::read_waveform_json(&args.waveform)?;

    let amp: Vec<f64>;
    let (series, reference) = match args.series {
        PlotSeries::Phase => (
            Series { label: "psi", values: &wf.phase.total },
            Some(Series { label: "psi_gr", values: &wf.phase.baseline }),
        ),
        PlotSeries::Delta => (Series { label: "dpsi", values: &wf.phase.delta }, None),
        PlotSeries::Amplitude => {
            amp = wf.strain.plus.iter().map(|z| z.norm()).collect();
            (Series { label: "|h+|", values: &amp }, None)
        }
    };
    let plot = render_ascii_plot(&wf.phase.frequencies, series, reference, args.width, args.height);
    println!("Waveform: {} | {}", wf.model, describe(&wf.parameters));
    println!("{plot}");

    if let Some(dir) = &args.figures {
        write_figures(dir, wf.model.name(), &wf.phase, &wf.strain)?;
    }
    Ok(())
}

fn handle_scan(args: ScanArgs) -> Result<(), AppError> {
    let setup = pipeline::resolve_setup(&args.model)?;
    let summary = pipeline::run_scan(&setup, &args)?;
    println!("{}", crate::report::format_scan(&summary, args.top));
    Ok(())
}

fn write_figures(
    dir: &Path,
    stem: &str,
    breakdown: &crate::models::PhaseBreakdown,
    strain: &crate::domain::Polarizations,
) -> Result<(), AppError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create figure directory '{}': {e}", dir.display())))?;
    let paths = FigurePaths::in_dir(dir, stem);
    crate::plot::write_figures(&paths, stem, strain, breakdown)
}

fn describe(parameters: &BTreeMap<String, f64>) -> String {
    let masses = ["mass_1", "mass_2"]
        .iter()
        .filter_map(|k| parameters.get(*k).map(|v| format!("{k}={v}")))
        .collect::<Vec<_>>()
        .join(" ");
    format!("parameters={} | {masses}", parameters.len())
}
