//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the estimation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::SampleDist;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "tailfit",
    version,
    about = "Power-law tail fitting with lognormal comparison"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a power-law tail to a dataset and print the full summary.
    Fit(FitArgs),
    /// Print only alpha, xmin, and `R p` (one per line, for scripting).
    Raw(FitArgs),
    /// Generate a synthetic dataset for exercising the fitter.
    Sample(SampleArgs),
}

/// Common options for fitting and raw output.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input file: whitespace/line-separated numeric observations.
    pub path: PathBuf,

    /// Treat observations as a discrete (integer) variable.
    #[arg(long)]
    pub discrete: bool,

    /// Fix the lower cutoff instead of searching for it.
    #[arg(long)]
    pub xmin: Option<f64>,

    /// Minimum number of tail observations a candidate cutoff must keep.
    #[arg(long, default_value_t = 8)]
    pub min_tail: usize,

    /// Render an ASCII log-log CCDF plot of the fitted tail.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the fit result to a JSON file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for synthetic dataset generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output file (values go to stdout when omitted).
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Distribution to draw from.
    #[arg(long, value_enum, default_value_t = SampleDist::PowerLaw)]
    pub dist: SampleDist,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 10_000)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Power-law exponent.
    #[arg(long, default_value_t = 2.5)]
    pub alpha: f64,

    /// Power-law lower cutoff.
    #[arg(long, default_value_t = 1.0)]
    pub xmin: f64,

    /// Lognormal location (mean of ln x).
    #[arg(long, default_value_t = 0.0)]
    pub mu: f64,

    /// Lognormal scale (std dev of ln x).
    #[arg(long, default_value_t = 1.0)]
    pub sigma: f64,

    /// Draw integer samples (discrete power law).
    #[arg(long)]
    pub discrete: bool,
}
