//! Tail fitting orchestration.
//!
//! Responsibilities:
//!
//! - power-law distribution math (MLE, CDFs, KS distance)
//! - cutoff search over candidate xmin values (parallel)
//! - lognormal fit to the same tail
//! - Vuong log-likelihood-ratio comparison
//!
//! Both `power_law` and `lognormal` expose a `point_log_likelihood`, so the
//! re-exports here stay explicit instead of glob-based.

pub mod compare;
pub mod fitter;
pub mod lognormal;
pub mod power_law;

pub use compare::compare_tail;
pub use fitter::fit_power_law;
pub use lognormal::fit_lognormal_tail;
