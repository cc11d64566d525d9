//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the load -> fit -> compare pipeline
//! - prints reports/plots
//! - writes optional exports
//! - generates synthetic samples

use clap::Parser;

use crate::cli::{Command, FitArgs, SampleArgs};
use crate::domain::{FitConfig, ResultFile, SampleConfig, TailKind};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `tailfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want `tailfit data.txt` to behave like `tailfit fit data.txt`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the common invocation short.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args, OutputMode::Full),
        Command::Raw(args) => handle_fit(args, OutputMode::Plain),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    Plain,
}

fn handle_fit(args: FitArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    match mode {
        OutputMode::Full => {
            println!(
                "{}",
                crate::report::format_run_summary(
                    &run.ingest,
                    &run.fit,
                    &run.lognormal,
                    &run.comparison,
                    &config
                )
            );
            if config.plot {
                let plot = crate::plot::render_ccdf_plot(
                    &run.tail,
                    &run.fit,
                    config.plot_width,
                    config.plot_height,
                );
                println!("{plot}");
            }
        }
        OutputMode::Plain => {
            print!(
                "{}",
                crate::report::format_plain_values(&run.fit, &run.comparison)
            );
        }
    }

    if let Some(path) = &config.export {
        let results = ResultFile {
            tool: "tailfit".to_string(),
            input: config.path.display().to_string(),
            variable: run.fit.kind,
            stats: run.ingest.stats,
            fit: run.fit.clone(),
            lognormal: run.lognormal.clone(),
            comparison: run.comparison.clone(),
        };
        crate::io::results::write_results_json(path, &results)?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let values = crate::data::generate_sample(&config)?;

    match &config.out {
        Some(path) => {
            crate::data::write_sample(path, &values)?;
            println!("Wrote {} samples to '{}'.", values.len(), path.display());
        }
        None => {
            for v in &values {
                println!("{v}");
            }
        }
    }

    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        path: args.path.clone(),
        kind: tail_kind(args.discrete),
        fixed_xmin: args.xmin,
        min_tail: args.min_tail,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export: args.export.clone(),
    }
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        out: args.out.clone(),
        dist: args.dist,
        count: args.count,
        seed: args.seed,
        alpha: args.alpha,
        xmin: args.xmin,
        mu: args.mu,
        sigma: args.sigma,
        kind: tail_kind(args.discrete),
    }
}

fn tail_kind(discrete: bool) -> TailKind {
    if discrete {
        TailKind::Discrete
    } else {
        TailKind::Continuous
    }
}

/// Rewrite argv so a bare path defaults to the `fit` subcommand.
///
/// Rules:
/// - `tailfit`                     -> unchanged (clap prints usage)
/// - `tailfit data.txt ...`        -> `tailfit fit data.txt ...`
/// - `tailfit fit/raw/sample ...`  -> unchanged
/// - `tailfit --help/--version`    -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1) else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "raw" | "sample");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "fit".to_string());
    argv
}
