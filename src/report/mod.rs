//! Terminal report formatting.
//!
//! Formatting code lives in one place so:
//! - the estimation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! The summary keeps the classic print order: alpha, then xmin, then the
//! model comparison.

use crate::domain::{Comparison, FitConfig, LognormalFit, PowerLawFit};
use crate::io::ingest::IngestedData;

/// Format the full run summary.
pub fn format_run_summary(
    ingest: &IngestedData,
    fit: &PowerLawFit,
    lognormal: &LognormalFit,
    comparison: &Comparison,
    config: &FitConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== tailfit - Power-Law Tail Fit ===\n");
    out.push_str(&format!("Input: {}\n", config.path.display()));
    out.push_str(&format!("Variable: {}\n", fit.kind.display_name()));
    out.push_str(&format!(
        "Points: n={} | x=[{:.6}, {:.6}]\n",
        ingest.stats.n_points, ingest.stats.x_min, ingest.stats.x_max
    ));
    out.push_str(&format!(
        "Cutoff search: {} candidate(s) | tail n={} | KS D={:.6}\n",
        fit.candidates_scanned, fit.n_tail, fit.ks
    ));
    out.push('\n');

    out.push_str(&format!("alpha = {:.6}\n", fit.alpha));
    out.push_str(&format!("xmin  = {:.6}\n", fit.xmin));
    out.push('\n');

    out.push_str("Power law vs lognormal:\n");
    out.push_str(&format!(
        "- R = {:.4} | p = {:.4} ({} favored)\n",
        comparison.r,
        comparison.p,
        comparison.favored()
    ));
    out.push_str(&format!(
        "- lognormal tail fit: mu={:.4}, sigma={:.4}\n",
        lognormal.mu, lognormal.sigma
    ));

    out
}

/// Plain three-line output for scripting: alpha, xmin, then `R p`.
pub fn format_plain_values(fit: &PowerLawFit, comparison: &Comparison) -> String {
    format!("{}\n{}\n{} {}\n", fit.alpha, fit.xmin, comparison.r, comparison.p)
}
