//! Special functions backing the estimators.
//!
//! The discrete power-law pmf is normalized by the Hurwitz zeta function
//! `zeta(s, a) = sum_{k>=0} (a + k)^(-s)`, which we evaluate with the
//! Euler-Maclaurin expansion: a short partial sum, the integral tail, and a
//! few Bernoulli correction terms. For the `s > 1`, `a >= 1` range used here
//! the truncation error is far below f64 noise.
//!
//! The normal helpers wrap `statrs`' complementary error function; the
//! log-survival variant exists because the truncated-lognormal likelihood
//! needs `ln(1 - Phi(z))` without losing precision to an intermediate `1 - x`.

use std::f64::consts::SQRT_2;

use statrs::function::erf;

/// Partial-sum length before switching to the Euler-Maclaurin tail.
const EM_SHIFT: usize = 12;

/// `B_{2j} / (2j)!` for j = 1..=4.
const EM_COEFFS: [f64; 4] = [
    1.0 / 12.0,
    -1.0 / 720.0,
    1.0 / 30_240.0,
    -1.0 / 1_209_600.0,
];

/// Hurwitz zeta `zeta(s, a)` for `s > 1`, `a > 0`.
///
/// Returns `None` outside that domain or on numerical failure.
pub fn hurwitz_zeta(s: f64, a: f64) -> Option<f64> {
    if !(s.is_finite() && a.is_finite() && s > 1.0 && a > 0.0) {
        return None;
    }

    let mut sum = 0.0;
    for k in 0..EM_SHIFT {
        sum += (a + k as f64).powf(-s);
    }

    let b = a + EM_SHIFT as f64;
    let mut zeta = sum + b.powf(1.0 - s) / (s - 1.0) + 0.5 * b.powf(-s);

    // Correction term j uses the rising factorial s(s+1)...(s+2j-2) and
    // b^-(s+2j-1); both are extended incrementally.
    let mut rising = s;
    let mut power = b.powf(-(s + 1.0));
    for (j, coeff) in EM_COEFFS.iter().enumerate() {
        zeta += coeff * rising * power;
        let k = (2 * (j + 1) - 1) as f64;
        rising *= (s + k) * (s + k + 1.0);
        power /= b * b;
    }

    zeta.is_finite().then_some(zeta)
}

/// Standard normal CDF `Phi(z)`.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erf::erfc(-z / SQRT_2)
}

/// `ln(1 - Phi(z))`, the log of the standard normal survival function.
///
/// Returns `None` when the survival probability underflows to zero.
pub fn normal_sf_ln(z: f64) -> Option<f64> {
    let sf = 0.5 * erf::erfc(z / SQRT_2);
    if sf > 0.0 { Some(sf.ln()) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn zeta_matches_known_values() {
        // zeta(2, 1) = pi^2 / 6, zeta(4, 1) = pi^4 / 90
        let z2 = hurwitz_zeta(2.0, 1.0).unwrap();
        assert!((z2 - PI * PI / 6.0).abs() < 1e-12);

        let z4 = hurwitz_zeta(4.0, 1.0).unwrap();
        assert!((z4 - PI.powi(4) / 90.0).abs() < 1e-12);
    }

    #[test]
    fn zeta_shift_identity() {
        // zeta(s, a) = a^-s + zeta(s, a + 1)
        for &(s, a) in &[(1.5, 1.0), (2.5, 3.0), (3.2, 7.5)] {
            let lhs = hurwitz_zeta(s, a).unwrap();
            let rhs = a.powf(-s) + hurwitz_zeta(s, a + 1.0).unwrap();
            assert!((lhs - rhs).abs() < 1e-12, "s={s} a={a}");
        }
    }

    #[test]
    fn zeta_rejects_invalid_domain() {
        assert!(hurwitz_zeta(1.0, 1.0).is_none());
        assert!(hurwitz_zeta(0.5, 1.0).is_none());
        assert!(hurwitz_zeta(2.0, 0.0).is_none());
        assert!(hurwitz_zeta(f64::NAN, 1.0).is_none());
    }

    #[test]
    fn normal_cdf_reference_points() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((normal_cdf(1.959_963_985) - 0.975).abs() < 1e-6);
        assert!((normal_cdf(-1.959_963_985) - 0.025).abs() < 1e-6);
    }

    #[test]
    fn normal_sf_ln_agrees_with_cdf() {
        for &z in &[-2.0, -0.5, 0.0, 0.5, 2.0, 5.0] {
            let direct = (1.0 - normal_cdf(z)).ln();
            let stable = normal_sf_ln(z).unwrap();
            assert!((direct - stable).abs() < 1e-9, "z={z}");
        }
    }
}
