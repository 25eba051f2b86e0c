//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the MICP series
//! - runs cut-off detection + the weighted reduction
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, RunArgs, SampleArgs};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `eptr` binary.
pub fn run() -> Result<(), AppError> {
    // We want `eptr data.csv` to behave like `eptr run data.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the short invocation.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args, OutputMode::Full),
        Command::Value(args) => handle_run(args, OutputMode::ValueOnly),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    ValueOnly,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_eptr(&config)?;

    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::format_run_summary(&run, &config));

            if config.plot {
                let plot = crate::plot::render_intrusion_plot(
                    &run.ingest.records,
                    run.hit.boundary_index,
                    config.plot_width,
                    config.plot_height,
                );
                println!("{plot}");
            }

            println!("{}", crate::report::format_eptr_line(run.eptr_um));
        }
        OutputMode::ValueOnly => {
            println!("{}", crate::report::format_eptr_value(run.eptr_um));
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_records {
        crate::io::export::write_records_csv(path, &run.weighted)?;
    }
    if let Some(path) = &config.export_summary {
        crate::io::summary::write_summary_json(path, &run, &config)?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = crate::data::sample::SampleConfig::from_args(&args)?;
    let records = crate::data::sample::generate_series(&config)?;
    crate::data::sample::write_series_csv(&args.out, &records)?;
    println!(
        "Wrote {} synthetic MICP records to '{}'.",
        records.len(),
        args.out.display()
    );
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        csv_path: args.csv.clone(),
        threshold: args.threshold,
        throat_length_um: args.throat_length,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_records: args.export.clone(),
        export_summary: args.export_summary.clone(),
    }
}

/// Rewrite argv so `eptr <file>` defaults to `eptr run <file>`.
///
/// Rules:
/// - `eptr`                    -> unchanged (clap prints the usage error)
/// - `eptr data.csv ...`       -> `eptr run data.csv ...`
/// - `eptr --help/--version`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "value" | "sample");
    if is_subcommand {
        return argv;
    }

    // Bare file path (or flags meant for `run`): treat as `run ...`.
    argv.insert(1, "run".to_string());
    argv
}
