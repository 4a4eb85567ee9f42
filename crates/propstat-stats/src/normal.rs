//! Standard normal distribution helpers.
//!
//! Thin wrappers over [`statrs`] that turn its panicking domain checks into
//! [`InvalidArgument`] errors.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::{ConfidenceLevel, InvalidArgument};

/// Cumulative distribution function `Φ(x)` of the standard normal distribution.
///
/// # Examples
///
/// ```
/// use propstat_stats::normal::standard_normal_cdf;
///
/// assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-12);
/// assert!((standard_normal_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
#[must_use]
pub fn standard_normal_cdf(x: f64) -> f64 {
    Normal::standard().cdf(x)
}

/// Quantile function `Φ⁻¹(p)` of the standard normal distribution.
///
/// Returns an error unless `0 <= p <= 1`. The endpoints map to infinities.
///
/// # Examples
///
/// ```
/// use propstat_stats::normal::standard_normal_quantile;
///
/// let z = standard_normal_quantile(0.975).unwrap();
/// assert!((z - 1.959_964).abs() < 1e-6);
/// assert!(standard_normal_quantile(1.5).is_err());
/// ```
pub fn standard_normal_quantile(p: f64) -> Result<f64, InvalidArgument> {
    if !(0.0..=1.0).contains(&p) {
        return Err(InvalidArgument::ProbabilityOutOfRange { probability: p });
    }
    Ok(Normal::standard().inverse_cdf(p))
}

/// Two-sided critical value `z = Φ⁻¹(1 − (1 − confidence)/2)`.
///
/// # Examples
///
/// ```
/// use propstat_stats::normal::critical_value;
///
/// assert!((critical_value(0.90).unwrap() - 1.644_854).abs() < 1e-6);
/// assert!((critical_value(0.99).unwrap() - 2.575_829).abs() < 1e-6);
/// assert!(critical_value(0.0).is_err());
/// ```
pub fn critical_value(confidence: f64) -> Result<f64, InvalidArgument> {
    ConfidenceLevel::new(confidence).map(two_sided_critical_value)
}

/// Like [`critical_value`], but for an already validated level.
#[must_use]
pub fn two_sided_critical_value(confidence: ConfidenceLevel) -> f64 {
    // ConfidenceLevel keeps 1 − α/2 in [0.5, 1), so z is finite
    Normal::standard().inverse_cdf(confidence.upper_tail_probability())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdf_is_symmetric() {
        for x in [0.1, 0.5, 1.0, 2.5, 4.0] {
            let sum = standard_normal_cdf(x) + standard_normal_cdf(-x);
            assert!((sum - 1.0).abs() < 1e-12, "x={x}: {sum}");
        }
    }

    #[test]
    fn test_quantile_inverts_cdf() {
        for p in [0.01, 0.2, 0.5, 0.8, 0.99] {
            let x = standard_normal_quantile(p).unwrap();
            assert!((standard_normal_cdf(x) - p).abs() < 1e-9, "p={p}");
        }
    }

    #[test]
    fn test_quantile_rejects_out_of_domain() {
        assert_eq!(
            standard_normal_quantile(-0.1),
            Err(InvalidArgument::ProbabilityOutOfRange { probability: -0.1 })
        );
        assert!(standard_normal_quantile(f64::NAN).is_err());
    }

    #[test]
    fn test_critical_value_grows_with_confidence() {
        let z90 = two_sided_critical_value(ConfidenceLevel::NINETY);
        let z95 = two_sided_critical_value(ConfidenceLevel::NINETY_FIVE);
        let z99 = two_sided_critical_value(ConfidenceLevel::NINETY_NINE);
        assert!(z90 < z95 && z95 < z99);
        assert!((z95 - 1.959_963_984_540_054).abs() < 1e-9);
    }
}
