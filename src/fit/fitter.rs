//! Cutoff search.
//!
//! Given the loaded observations we:
//!
//! - sort them and precompute suffix sums of `ln x` (each candidate's MLE is
//!   then O(1))
//! - take every distinct positive value as a candidate `xmin`
//! - estimate `alpha` on each candidate's tail and score the fit with the
//!   two-sided KS distance (parallel)
//! - keep the candidate with the smallest KS distance; ties break toward the
//!   smaller candidate index so results never depend on thread scheduling
//!
//! Candidates keeping fewer than `min_tail` observations are skipped; if none
//! survive, the fit fails with a clear error instead of emitting NaN.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::domain::{FitConfig, PowerLawFit, TailKind};
use crate::error::AppError;
use crate::fit::power_law::{
    ks_distance, mle_alpha_continuous, mle_alpha_discrete, tail_log_likelihood,
};

#[derive(Debug, Clone)]
struct Candidate {
    idx: usize,
    /// Index into the sorted values where the tail starts.
    pos: usize,
    xmin: f64,
    alpha: f64,
    ks: f64,
}

/// Fit a power-law tail, searching for the cutoff unless one is fixed.
pub fn fit_power_law(values: &[f64], config: &FitConfig) -> Result<PowerLawFit, AppError> {
    let min_tail = config.min_tail.max(2);

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    if sorted.is_empty() {
        return Err(AppError::data(
            "No positive observations; a power-law tail requires x > 0.",
        ));
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    if config.kind == TailKind::Discrete {
        ensure_integers(&sorted)?;
    }

    let n = sorted.len();
    let mut suffix_ln = vec![0.0; n + 1];
    for i in (0..n).rev() {
        suffix_ln[i] = suffix_ln[i + 1] + sorted[i].ln();
    }

    if let Some(xmin) = config.fixed_xmin {
        return fit_at_fixed_cutoff(&sorted, &suffix_ln, xmin, config.kind, min_tail);
    }

    // One candidate per distinct value, provided its tail is large enough.
    let mut candidates: Vec<usize> = Vec::new();
    for i in 0..n {
        if i > 0 && sorted[i] <= sorted[i - 1] {
            continue;
        }
        if config.kind == TailKind::Discrete && sorted[i] < 1.0 {
            continue;
        }
        if n - i >= min_tail {
            candidates.push(i);
        }
    }
    if candidates.is_empty() {
        return Err(AppError::data(format!(
            "Too few observations above any candidate cutoff (each tail needs at least {min_tail} points)."
        )));
    }

    let kind = config.kind;
    let evaluated: Vec<Candidate> = candidates
        .par_iter()
        .enumerate()
        .filter_map(|(idx, &pos)| evaluate_candidate(idx, pos, &sorted, &suffix_ln, kind))
        .collect();

    if evaluated.is_empty() {
        return Err(AppError::numeric(
            "No candidate cutoff produced a valid power-law fit.",
        ));
    }

    // Deterministic selection: minimum KS, ties broken by candidate index.
    let mut best = &evaluated[0];
    for c in &evaluated[1..] {
        if c.ks < best.ks || (c.ks == best.ks && c.idx < best.idx) {
            best = c;
        }
    }

    let m = n - best.pos;
    let log_likelihood = tail_log_likelihood(suffix_ln[best.pos], m, best.alpha, best.xmin, kind)
        .ok_or_else(|| AppError::numeric("Non-finite log-likelihood for the selected fit."))?;

    Ok(PowerLawFit {
        kind,
        alpha: best.alpha,
        xmin: best.xmin,
        ks: best.ks,
        n_tail: m,
        candidates_scanned: candidates.len(),
        log_likelihood,
    })
}

fn evaluate_candidate(
    idx: usize,
    pos: usize,
    sorted: &[f64],
    suffix_ln: &[f64],
    kind: TailKind,
) -> Option<Candidate> {
    let xmin = sorted[pos];
    let m = sorted.len() - pos;
    let ln_sum = suffix_ln[pos];

    let alpha = match kind {
        TailKind::Continuous => mle_alpha_continuous(ln_sum, m, xmin)?,
        TailKind::Discrete => mle_alpha_discrete(ln_sum, m, xmin)?,
    };
    let ks = ks_distance(&sorted[pos..], alpha, xmin, kind)?;

    Some(Candidate {
        idx,
        pos,
        xmin,
        alpha,
        ks,
    })
}

fn fit_at_fixed_cutoff(
    sorted: &[f64],
    suffix_ln: &[f64],
    xmin: f64,
    kind: TailKind,
    min_tail: usize,
) -> Result<PowerLawFit, AppError> {
    if !(xmin.is_finite() && xmin > 0.0) {
        return Err(AppError::input(format!("Invalid fixed cutoff xmin={xmin}.")));
    }
    if kind == TailKind::Discrete && xmin < 1.0 {
        return Err(AppError::input(
            "Discrete mode requires a fixed cutoff of at least 1.",
        ));
    }

    let pos = sorted.partition_point(|v| *v < xmin);
    let m = sorted.len() - pos;
    if m < min_tail {
        return Err(AppError::data(format!(
            "Only {m} observations at or above the fixed cutoff (need at least {min_tail})."
        )));
    }

    let ln_sum = suffix_ln[pos];
    let alpha = match kind {
        TailKind::Continuous => mle_alpha_continuous(ln_sum, m, xmin),
        TailKind::Discrete => mle_alpha_discrete(ln_sum, m, xmin),
    }
    .ok_or_else(|| AppError::numeric("Degenerate tail at the fixed cutoff."))?;

    let ks = ks_distance(&sorted[pos..], alpha, xmin, kind)
        .ok_or_else(|| AppError::numeric("Non-finite KS distance at the fixed cutoff."))?;
    let log_likelihood = tail_log_likelihood(ln_sum, m, alpha, xmin, kind)
        .ok_or_else(|| AppError::numeric("Non-finite log-likelihood at the fixed cutoff."))?;

    Ok(PowerLawFit {
        kind,
        alpha,
        xmin,
        ks,
        n_tail: m,
        candidates_scanned: 1,
        log_likelihood,
    })
}

fn ensure_integers(sorted: &[f64]) -> Result<(), AppError> {
    for &v in sorted {
        if (v - v.round()).abs() > 1e-9 {
            return Err(AppError::input(format!(
                "Discrete mode requires integer observations; found {v}."
            )));
        }
    }
    Ok(())
}
