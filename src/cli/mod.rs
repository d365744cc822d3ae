//! Command-line parsing for `gwdev`.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! waveform physics; `app` turns these structs into a run.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gwdev", version, about = "Frequency-domain GW strain with GR deviations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate the phase, print the summary and a phase table.
    Phase(RunArgs),
    /// Evaluate the strain and optionally export CSV/JSON/SVG.
    Strain(RunArgs),
    /// Plot a previously exported waveform JSON.
    Plot(PlotArgs),
    /// Draw random binaries and report how far the deviated phase moves.
    Scan(ScanArgs),
}

/// Grid spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Spacing {
    Linear,
    Log,
}

/// Model, parameters and grid shared by every evaluating command.
#[derive(Debug, Clone, Args)]
pub struct ModelArgs {
    /// Waveform model (TaylorF2_PPE, TaylorF2_mult, IMRPhenomD_PPE, IMRPhenomD_mult).
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// JSON run configuration (model, parameters, phenom fit).
    #[arg(short = 'c', long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Parameter override, repeatable (e.g. `--set beta=0.01 --set PN=-1`).
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub overrides: Vec<(String, f64)>,

    /// Lowest grid frequency [Hz].
    #[arg(long, default_value_t = 10.0)]
    pub fmin: f64,

    /// Highest grid frequency [Hz].
    #[arg(long, default_value_t = 1024.0)]
    pub fmax: f64,

    /// Number of grid samples.
    #[arg(short = 'n', long = "n", default_value_t = 1000)]
    pub samples: usize,

    /// Grid spacing.
    #[arg(long, value_enum, default_value_t = Spacing::Log)]
    pub spacing: Spacing,
}

/// Options for `phase` and `strain`.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Rows in the printed phase table.
    #[arg(long, default_value_t = 12)]
    pub rows: usize,

    /// Render an ASCII plot in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export strain and phase columns to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the waveform (model + parameters + columns) to JSON.
    #[arg(long = "export-waveform")]
    pub export_waveform: Option<PathBuf>,

    /// Write `<stem>_strain.svg` and `<stem>_delta.svg` into this directory.
    #[arg(long = "figures", value_name = "DIR")]
    pub figures: Option<PathBuf>,
}

/// What `plot` draws from a waveform file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotSeries {
    /// Deviated phase over the GR phase.
    Phase,
    /// Phase deviation.
    Delta,
    /// |h+|.
    Amplitude,
}

/// Options for plotting a saved waveform.
#[derive(Debug, Clone, Args)]
pub struct PlotArgs {
    /// Waveform JSON file produced by `gwdev strain --export-waveform`.
    #[arg(long, value_name = "JSON")]
    pub waveform: PathBuf,

    #[arg(long, value_enum, default_value_t = PlotSeries::Phase)]
    pub series: PlotSeries,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Also write SVG figures into this directory.
    #[arg(long = "figures", value_name = "DIR")]
    pub figures: Option<PathBuf>,
}

/// Options for `scan`.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Number of random binaries.
    #[arg(long, default_value_t = 64)]
    pub draws: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Component mass range [Msun].
    #[arg(long, default_value_t = 1.0)]
    pub mass_min: f64,

    #[arg(long, default_value_t = 50.0)]
    pub mass_max: f64,

    /// Largest |a_i| drawn.
    #[arg(long, default_value_t = 0.5)]
    pub spin_max: f64,

    /// Show the N draws with the largest deviation.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

/// Parse `KEY=VALUE` with a numeric value.
pub fn parse_key_value(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid number for '{key}': {e}"))?;
    Ok((key.to_string(), value))
}
