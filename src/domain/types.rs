//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON
//! - consumed by downstream scripts

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Whether observations are treated as a continuous or a discrete variable.
///
/// Continuous is the default. Discrete mode requires integer observations and
/// uses the Hurwitz-zeta normalized pmf `p(x) = x^(-alpha) / zeta(alpha, xmin)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailKind {
    Continuous,
    Discrete,
}

impl TailKind {
    pub fn display_name(self) -> &'static str {
        match self {
            TailKind::Continuous => "continuous",
            TailKind::Discrete => "discrete",
        }
    }
}

/// Which distribution `tailfit sample` draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleDist {
    /// Power law: continuous Pareto, or the discrete approximation with `--discrete`.
    PowerLaw,
    /// Lognormal with parameters `--mu` / `--sigma`.
    Lognormal,
}

/// Resolved configuration for a single fit run.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub path: PathBuf,
    pub kind: TailKind,
    /// Fixed lower cutoff; when set the KS search is skipped.
    pub fixed_xmin: Option<f64>,
    /// Minimum number of tail observations a candidate cutoff must keep.
    pub min_tail: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export: Option<PathBuf>,
}

/// Resolved configuration for `tailfit sample`.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out: Option<PathBuf>,
    pub dist: SampleDist,
    pub count: usize,
    pub seed: u64,
    pub alpha: f64,
    pub xmin: f64,
    pub mu: f64,
    pub sigma: f64,
    pub kind: TailKind,
}

/// Summary stats about the observations actually loaded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
}

/// Fitted power-law tail.
///
/// `xmin` is always one of the observed values when it was searched for, so it
/// lies within `[x_min, x_max]` of the dataset by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerLawFit {
    pub kind: TailKind,
    /// Scaling exponent of the tail (> 1).
    pub alpha: f64,
    /// Lower cutoff above which the power law holds.
    pub xmin: f64,
    /// Two-sided Kolmogorov-Smirnov distance of the chosen fit.
    pub ks: f64,
    /// Number of observations in the tail `x >= xmin`.
    pub n_tail: usize,
    /// Number of candidate cutoffs evaluated (1 for a fixed cutoff).
    pub candidates_scanned: usize,
    /// Tail log-likelihood under the fitted power law.
    pub log_likelihood: f64,
}

/// Lognormal fit to the same tail (`x >= xmin`, truncated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LognormalFit {
    pub mu: f64,
    pub sigma: f64,
    pub log_likelihood: f64,
}

/// Vuong comparison between the power-law and lognormal tail fits.
///
/// Sign convention: `r > 0` favors the power law, `r < 0` the lognormal.
/// `p` close to 0 means the sign is statistically significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub r: f64,
    /// `r` divided by its estimated standard deviation.
    pub normalized: f64,
    pub p: f64,
}

impl Comparison {
    pub fn favored(&self) -> &'static str {
        if self.r > 0.0 {
            "power law"
        } else if self.r < 0.0 {
            "lognormal"
        } else {
            "neither"
        }
    }
}

/// Schema of the `--export` JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultFile {
    pub tool: String,
    pub input: String,
    pub variable: TailKind,
    pub stats: DatasetStats,
    pub fit: PowerLawFit,
    pub lognormal: LognormalFit,
    pub comparison: Comparison,
}
