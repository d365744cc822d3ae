//! Shared run logic used by every `gwdev` subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! config file -> overrides -> model + grid -> phase breakdown -> strain
//!
//! The command handlers in `app` then only decide what to print and export.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::baseline::{CoefficientLibrary, PnLibrary};
use crate::cli::{ModelArgs, ScanArgs, Spacing};
use crate::domain::{BinaryParams, DerivedParams, FrequencyGrid, ModelKind, Polarizations};
use crate::error::AppError;
use crate::io::read_run_file;
use crate::models::{evaluate_batch, PhaseBreakdown, Waveform};
use crate::params::WaveformParams;
use crate::report::{ScanRow, ScanSummary};

/// Everything needed to build a `Waveform`.
#[derive(Clone)]
pub struct RunSetup {
    pub kind: ModelKind,
    pub params: WaveformParams,
    pub grid: FrequencyGrid,
    pub library: Arc<dyn CoefficientLibrary>,
    /// Model name from the config file when it differs from `--model`.
    pub label: Option<String>,
}

/// All computed outputs of a single evaluation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub kind: ModelKind,
    pub params: WaveformParams,
    pub derived: DerivedParams,
    pub breakdown: PhaseBreakdown,
    pub strain: Option<Polarizations>,
}

/// Merge config file and `--set` overrides into a run setup.
///
/// Order: defaults, then the file's `parameters`, then `--set` in command-line order.
pub fn resolve_setup(args: &ModelArgs) -> Result<RunSetup, AppError> {
    let run = match &args.config {
        Some(path) => read_run_file(path)?,
        None => Default::default(),
    };

    let file_kind = run.model_kind()?;
    let cli_kind = args.model.as_deref().map(ModelKind::from_name).transpose()?;
    let kind = cli_kind
        .or(file_kind)
        .ok_or_else(|| AppError::new(2, "No model given (use --model or \"model\" in the config file)."))?;
    let label = match (cli_kind, &run.model) {
        (Some(k), Some(name)) if k.name() != name.as_str() => Some(name.clone()),
        _ => None,
    };

    let mut params = WaveformParams::new(BinaryParams::default());
    params.update(&run.parameters)?;
    for (key, value) in &args.overrides {
        params.set(key, *value)?;
    }

    let grid = build_grid(args)?;
    let library: Arc<dyn CoefficientLibrary> = match run.phenom {
        Some(fit) => Arc::new(PnLibrary::with_phenom(fit)),
        None => Arc::new(PnLibrary::new()),
    };

    Ok(RunSetup {
        kind,
        params,
        grid,
        library,
        label,
    })
}

pub fn build_grid(args: &ModelArgs) -> Result<FrequencyGrid, AppError> {
    let grid = match args.spacing {
        Spacing::Linear => FrequencyGrid::linear(args.fmin, args.fmax, args.samples)?,
        Spacing::Log => FrequencyGrid::log_spaced(args.fmin, args.fmax, args.samples)?,
    };
    Ok(grid)
}

fn waveform(setup: &RunSetup) -> Waveform {
    let w = Waveform::new(setup.kind, setup.params, setup.grid.clone(), Arc::clone(&setup.library));
    match &setup.label {
        Some(name) => w.with_label(name),
        None => w,
    }
}

/// Evaluate the phase breakdown and, if asked, the strain.
pub fn run_model(setup: &RunSetup, with_strain: bool) -> Result<RunOutput, AppError> {
    let derived = setup.params.binary.derive()?;
    let mut w = waveform(setup);
    let breakdown = w.phase_breakdown()?;
    let strain = if with_strain {
        Some(w.calculate_frequency_domain_strain()?.clone())
    } else {
        None
    };

    Ok(RunOutput {
        kind: setup.kind,
        params: setup.params,
        derived,
        breakdown,
        strain,
    })
}

/// Random binaries around the configured deviations, evaluated in parallel.
pub fn run_scan(setup: &RunSetup, args: &ScanArgs) -> Result<ScanSummary, AppError> {
    let draws = draw_binaries(setup.params, args)?;
    info!(model = setup.kind.name(), draws = draws.len(), seed = args.seed, "scan");

    let results = evaluate_batch(setup.kind, &draws, &setup.grid, Arc::clone(&setup.library), |w| {
        let d = w.params().binary.derive()?;
        let b = w.phase_breakdown()?;
        let max_abs_delta = b.delta.iter().fold(0.0, |m: f64, x| m.max(x.abs()));
        Ok((d.chi_eff, max_abs_delta, b.seams.map(|s| s.residuals.max_abs())))
    });

    let rows = results
        .into_iter()
        .zip(&draws)
        .enumerate()
        .map(|(i, (r, p))| {
            r.map(|(chi_eff, max_abs_delta, seam_residual)| ScanRow {
                draw: i,
                mass_1: p.binary.mass_1,
                mass_2: p.binary.mass_2,
                chi_eff,
                max_abs_delta,
                seam_residual,
            })
            .map_err(|e| e.to_string())
        })
        .collect();

    Ok(ScanSummary::collect(rows))
}

/// Masses and aligned spins drawn uniformly; everything else from `base`.
pub fn draw_binaries(base: WaveformParams, args: &ScanArgs) -> Result<Vec<WaveformParams>, AppError> {
    if !(args.mass_min > 0.0 && args.mass_max > args.mass_min && args.mass_max.is_finite()) {
        return Err(AppError::new(
            2,
            format!("Invalid mass range [{}, {}].", args.mass_min, args.mass_max),
        ));
    }
    if !(0.0..1.0).contains(&args.spin_max) {
        return Err(AppError::new(2, format!("--spin-max must be in [0, 1), got {}.", args.spin_max)));
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let out = (0..args.draws)
        .map(|_| {
            let mut p = base;
            p.binary.mass_1 = rng.gen_range(args.mass_min..=args.mass_max);
            p.binary.mass_2 = rng.gen_range(args.mass_min..=args.mass_max);
            p.binary.a_1 = rng.gen_range(-args.spin_max..=args.spin_max);
            p.binary.a_2 = rng.gen_range(-args.spin_max..=args.spin_max);
            p
        })
        .collect();
    Ok(out)
}
