//! Synthetic dataset generation for exercising the fitter.
//!
//! Draws are reproducible: the generator is a seeded `StdRng` and the output
//! depends only on the configuration.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{LogNormal, Pareto};

use crate::domain::{SampleConfig, SampleDist, TailKind};
use crate::error::AppError;

/// Generate samples according to the configuration.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<f64>, AppError> {
    if config.count == 0 {
        return Err(AppError::input("Sample count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);

    let values = match config.dist {
        SampleDist::PowerLaw => {
            if !(config.alpha.is_finite() && config.alpha > 1.0) {
                return Err(AppError::input(format!(
                    "Power-law exponent must be > 1 (got {}).",
                    config.alpha
                )));
            }
            if !(config.xmin.is_finite() && config.xmin > 0.0) {
                return Err(AppError::input(format!(
                    "Power-law cutoff must be > 0 (got {}).",
                    config.xmin
                )));
            }
            match config.kind {
                TailKind::Continuous => {
                    let pareto = Pareto::new(config.xmin, config.alpha - 1.0)
                        .map_err(|e| AppError::input(format!("Invalid power-law parameters: {e}")))?;
                    (0..config.count).map(|_| pareto.sample(&mut rng)).collect()
                }
                TailKind::Discrete => {
                    if config.xmin < 1.0 {
                        return Err(AppError::input(
                            "Discrete power-law samples need a cutoff of at least 1.",
                        ));
                    }
                    draw_discrete_power_law(&mut rng, config.alpha, config.xmin, config.count)
                }
            }
        }
        SampleDist::Lognormal => {
            if !(config.sigma.is_finite() && config.sigma > 0.0) {
                return Err(AppError::input(format!(
                    "Lognormal sigma must be > 0 (got {}).",
                    config.sigma
                )));
            }
            let dist = LogNormal::new(config.mu, config.sigma)
                .map_err(|e| AppError::input(format!("Invalid lognormal parameters: {e}")))?;
            (0..config.count).map(|_| dist.sample(&mut rng)).collect()
        }
    };

    Ok(values)
}

/// Approximate discrete power-law draws:
/// `x = floor((xmin - 1/2) * (1 - u)^(-1/(alpha - 1)) + 1/2)`.
fn draw_discrete_power_law(rng: &mut StdRng, alpha: f64, xmin: f64, count: usize) -> Vec<f64> {
    let exponent = -1.0 / (alpha - 1.0);
    (0..count)
        .map(|_| {
            let u: f64 = rng.gen_range(0.0..1.0);
            ((xmin - 0.5) * (1.0 - u).powf(exponent) + 0.5).floor()
        })
        .collect()
}

/// Write samples one per line.
pub fn write_sample(path: &Path, values: &[f64]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create '{}': {e}", path.display()))
    })?;
    let mut out = BufWriter::new(file);
    for v in values {
        writeln!(out, "{v}")
            .map_err(|e| AppError::input(format!("Failed to write '{}': {e}", path.display())))?;
    }
    out.flush()
        .map_err(|e| AppError::input(format!("Failed to write '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(dist: SampleDist, kind: TailKind) -> SampleConfig {
        SampleConfig {
            out: None,
            dist,
            count: 500,
            seed: 42,
            alpha: 2.5,
            xmin: 1.0,
            mu: 0.0,
            sigma: 1.0,
            kind,
        }
    }

    #[test]
    fn same_seed_gives_identical_samples() {
        let cfg = config(SampleDist::PowerLaw, TailKind::Continuous);
        let a = generate_sample(&cfg).unwrap();
        let b = generate_sample(&cfg).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 500);
    }

    #[test]
    fn continuous_power_law_respects_cutoff() {
        let mut cfg = config(SampleDist::PowerLaw, TailKind::Continuous);
        cfg.xmin = 3.0;
        let values = generate_sample(&cfg).unwrap();
        assert!(values.iter().all(|v| *v >= 3.0));
    }

    #[test]
    fn discrete_power_law_yields_integers_at_or_above_cutoff() {
        let cfg = config(SampleDist::PowerLaw, TailKind::Discrete);
        let values = generate_sample(&cfg).unwrap();
        assert!(values.iter().all(|v| *v >= 1.0 && (v - v.round()).abs() < 1e-12));
    }

    #[test]
    fn invalid_parameters_are_input_errors() {
        let mut cfg = config(SampleDist::PowerLaw, TailKind::Continuous);
        cfg.alpha = 1.0;
        assert_eq!(generate_sample(&cfg).unwrap_err().exit_code(), 2);

        let mut cfg = config(SampleDist::Lognormal, TailKind::Continuous);
        cfg.sigma = 0.0;
        assert_eq!(generate_sample(&cfg).unwrap_err().exit_code(), 2);

        let mut cfg = config(SampleDist::PowerLaw, TailKind::Continuous);
        cfg.count = 0;
        assert_eq!(generate_sample(&cfg).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn writes_one_value_per_line() {
        let values = vec![1.5, 2.0, 3.25];
        let path: PathBuf =
            std::env::temp_dir().join(format!("tailfit-sample-{}.txt", std::process::id()));
        write_sample(&path, &values).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text, "1.5\n2\n3.25\n");
    }
}
