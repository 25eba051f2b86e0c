//! Command-line parsing for the MICP EPTR estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the numerical code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "eptr", version, about = "MICP Effective Pore-Throat Radius estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline and print the report (cut-off diagnostics,
    /// optional plot, EPTR).
    Run(RunArgs),
    /// Print only the EPTR value (useful for scripting).
    Value(RunArgs),
    /// Write a synthetic MICP series CSV (for demos and regression fixtures).
    Sample(SampleArgs),
}

/// Common options for the pipeline commands.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// MICP CSV file (pressure, radius, incremental volume, cumulative volume).
    pub csv: PathBuf,

    /// Cut-off detection threshold; a cumulative-volume ratio in (threshold, 1)
    /// marks the ink-bottle artifact band.
    #[arg(short = 't', long, default_value_t = 0.99)]
    pub threshold: f64,

    /// Idealized pore-throat length (µm), uniform across the sample.
    #[arg(long, default_value_t = 1.0)]
    pub throat_length: f64,

    /// Render an ASCII intrusion plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the truncated series with areas and weights to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the run summary (parameters, cut-off, EPTR) to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,
}

/// Options for synthetic series generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    pub out: PathBuf,

    /// Number of pressure steps to generate.
    #[arg(short = 'n', long, default_value_t = 60)]
    pub count: usize,

    /// Random seed for reproducible output.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Inject an ink-bottle artifact (enabled by default).
    #[arg(long, default_value_t = true)]
    pub artifact: bool,

    /// Generate a clean series without an artifact.
    #[arg(long)]
    pub no_artifact: bool,

    /// Artifact position as a fraction of the series length.
    #[arg(long, default_value_t = 0.7)]
    pub artifact_at: f64,
}
