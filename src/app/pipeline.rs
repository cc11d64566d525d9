//! Shared "fit pipeline" logic used by the CLI front-end and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> cutoff search / alpha MLE -> lognormal fit -> comparison
//!
//! The CLI can then focus on presentation (printing vs JSON export).

use crate::domain::{Comparison, FitConfig, LognormalFit, PowerLawFit};
use crate::error::AppError;
use crate::fit;
use crate::io::ingest::{IngestedData, load_observations};

/// All computed outputs of a single fit run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub fit: PowerLawFit,
    pub lognormal: LognormalFit,
    pub comparison: Comparison,
    /// The tail observations (`x >= xmin`), sorted ascending.
    pub tail: Vec<f64>,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    // 1) Load observations.
    let ingest = load_observations(&config.path)?;

    // 2) Fit the power-law tail (cutoff search unless fixed).
    let fit = fit::fit_power_law(&ingest.values, config)?;

    // 3) Fit the lognormal to the same tail.
    let mut tail: Vec<f64> = ingest
        .values
        .iter()
        .copied()
        .filter(|v| *v >= fit.xmin)
        .collect();
    tail.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let lognormal = fit::fit_lognormal_tail(&tail, fit.xmin, fit.kind)?;

    // 4) Compare the two models on that tail.
    let comparison = fit::compare_tail(&tail, &fit, &lognormal)?;

    Ok(RunOutput {
        ingest,
        fit,
        lognormal,
        comparison,
        tail,
    })
}
