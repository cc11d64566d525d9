//! Vuong log-likelihood-ratio comparison between the two tail models.
//!
//! `R = sum_i [ln p_pl(x_i) - ln p_ln(x_i)]` over the tail; `R > 0` favors the
//! power law and `R < 0` the lognormal. The significance follows Vuong's
//! normal approximation: with `sd` the standard deviation of the pointwise
//! differences,
//!
//! ```text
//! p = erfc(|R| / (sd * sqrt(2 m)))
//! ```
//!
//! When the pointwise differences have ~zero variance the two models are
//! indistinguishable on this data and `p` is reported as 1.

use std::f64::consts::SQRT_2;

use statrs::function::erf;

use crate::domain::{Comparison, LognormalFit, PowerLawFit};
use crate::error::AppError;
use crate::fit::{lognormal, power_law};

/// Compare the fitted power law against the lognormal on the same tail.
pub fn compare_tail(
    tail_sorted: &[f64],
    fit: &PowerLawFit,
    ln_fit: &LognormalFit,
) -> Result<Comparison, AppError> {
    let m = tail_sorted.len();
    if m < 2 {
        return Err(AppError::data(
            "Model comparison needs at least 2 tail observations.",
        ));
    }

    let mut diffs = Vec::with_capacity(m);
    for &x in tail_sorted {
        let lp = power_law::point_log_likelihood(x, fit.alpha, fit.xmin, fit.kind)
            .ok_or_else(|| AppError::numeric("Non-finite power-law likelihood term."))?;
        let ll = lognormal::point_log_likelihood(x, ln_fit, fit.xmin, fit.kind)
            .ok_or_else(|| AppError::numeric("Non-finite lognormal likelihood term."))?;
        diffs.push(lp - ll);
    }

    let mf = m as f64;
    let r: f64 = diffs.iter().sum();
    let mean = r / mf;
    let var = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / mf;
    let sd = var.sqrt();

    if !(sd.is_finite() && sd > 1e-12) {
        return Ok(Comparison {
            r,
            normalized: 0.0,
            p: 1.0,
        });
    }

    let normalized = r / (sd * mf.sqrt());
    let p = erf::erfc(normalized.abs() / SQRT_2);

    Ok(Comparison { r, normalized, p })
}
