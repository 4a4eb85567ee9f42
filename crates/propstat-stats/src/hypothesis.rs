//! Large-sample z-tests for proportions.
//!
//! - [`one_proportion_z_test`]: is a single proportion different from a hypothesized value?
//! - [`two_proportion_z_test`]: do two independent samples share the same proportion?
//! - [`difference_interval`]: Wald interval for the difference of two proportions
//!
//! The one-proportion test uses the null proportion in its standard error and
//! the two-proportion test uses the pooled proportion, matching how the tests
//! are usually taught.

use serde::{Deserialize, Serialize};

use crate::{ConfidenceLevel, Interval, InvalidArgument, Sample, normal::standard_normal_cdf};

/// Direction of the alternative hypothesis.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alternative {
    /// `H₁: p ≠ p₀`
    #[default]
    TwoSided,
    /// `H₁: p < p₀`
    Less,
    /// `H₁: p > p₀`
    Greater,
}

impl Alternative {
    /// p-value of a standard normal test statistic under this alternative.
    ///
    /// # Examples
    ///
    /// ```
    /// use propstat_stats::hypothesis::Alternative;
    ///
    /// assert!((Alternative::TwoSided.p_value(1.96) - 0.05).abs() < 1e-3);
    /// assert!((Alternative::Greater.p_value(1.645) - 0.05).abs() < 1e-3);
    /// assert!((Alternative::Less.p_value(1.645) - 0.95).abs() < 1e-3);
    /// ```
    #[must_use]
    pub fn p_value(self, statistic: f64) -> f64 {
        match self {
            Self::TwoSided => (2.0 * standard_normal_cdf(-statistic.abs())).min(1.0),
            Self::Less => standard_normal_cdf(statistic),
            Self::Greater => standard_normal_cdf(-statistic),
        }
    }
}

/// Result of a z-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZTest {
    /// Standardized test statistic.
    pub statistic: f64,
    /// Probability of a statistic at least this extreme under the null hypothesis.
    pub p_value: f64,
    pub alternative: Alternative,
}

impl ZTest {
    fn new(statistic: f64, alternative: Alternative) -> Self {
        let p_value = alternative.p_value(statistic);
        tracing::debug!(statistic, p_value, ?alternative, "z-test");
        Self {
            statistic,
            p_value,
            alternative,
        }
    }

    /// Whether the null hypothesis is rejected at significance level `alpha`.
    #[must_use]
    pub fn rejects(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Tests whether the proportion behind `sample` equals `null_proportion`.
///
/// `z = (p̂ − p₀) / sqrt(p₀(1 − p₀)/n)`. `null_proportion` must lie strictly
/// between 0 and 1.
///
/// # Examples
///
/// ```
/// use propstat_stats::{
///     Sample,
///     hypothesis::{Alternative, one_proportion_z_test},
/// };
///
/// let sample = Sample::new(100, 60).unwrap();
/// let test = one_proportion_z_test(&sample, 0.5, Alternative::TwoSided).unwrap();
/// assert!((test.statistic - 2.0).abs() < 1e-9);
/// assert!(test.rejects(0.05));
/// assert!(!test.rejects(0.01));
/// ```
pub fn one_proportion_z_test(
    sample: &Sample,
    null_proportion: f64,
    alternative: Alternative,
) -> Result<ZTest, InvalidArgument> {
    if !(null_proportion > 0.0 && null_proportion < 1.0) {
        return Err(InvalidArgument::ProportionOutOfRange {
            proportion: null_proportion,
        });
    }
    let std_error = (null_proportion * (1.0 - null_proportion) / sample.trials_f64()).sqrt();
    let statistic = (sample.proportion() - null_proportion) / std_error;
    Ok(ZTest::new(statistic, alternative))
}

/// Tests whether two independent samples come from the same proportion.
///
/// Uses the pooled proportion `p = (x₁ + x₂)/(n₁ + n₂)` for the standard
/// error. When every trial across both samples succeeded, or every trial
/// failed, the standard error is zero and the test is undefined.
///
/// The alternative is stated for `p₁ − p₂`; e.g. [`Alternative::Greater`]
/// means `H₁: p₁ > p₂`.
pub fn two_proportion_z_test(
    first: &Sample,
    second: &Sample,
    alternative: Alternative,
) -> Result<ZTest, InvalidArgument> {
    let n1 = first.trials_f64();
    let n2 = second.trials_f64();
    #[expect(clippy::cast_precision_loss)]
    let pooled = (first.successes() + second.successes()) as f64 / (n1 + n2);
    if pooled <= 0.0 || pooled >= 1.0 {
        return Err(InvalidArgument::DegeneratePooledProportion { pooled });
    }

    let std_error = (pooled * (1.0 - pooled) * (1.0 / n1 + 1.0 / n2)).sqrt();
    let statistic = (first.proportion() - second.proportion()) / std_error;
    Ok(ZTest::new(statistic, alternative))
}

/// Unpooled Wald interval for `p₁ − p₂`.
///
/// # Examples
///
/// ```
/// use propstat_stats::{ConfidenceLevel, Sample, hypothesis::difference_interval};
///
/// let first = Sample::new(100, 45).unwrap();
/// let second = Sample::new(100, 30).unwrap();
/// let interval = difference_interval(&first, &second, ConfidenceLevel::NINETY_FIVE);
/// assert!(interval.contains(0.15));
/// assert!(!interval.contains(0.0));
/// ```
#[must_use]
pub fn difference_interval(
    first: &Sample,
    second: &Sample,
    confidence: ConfidenceLevel,
) -> Interval {
    let z = confidence.critical_value();
    let difference = first.proportion() - second.proportion();
    let std_error = (first.bernoulli_variance() / first.trials_f64()
        + second.bernoulli_variance() / second.trials_f64())
    .sqrt();
    Interval::centered(difference, z * std_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(trials: u64, successes: u64) -> Sample {
        Sample::new(trials, successes).unwrap()
    }

    #[test]
    fn test_one_proportion_known_values() {
        let test = one_proportion_z_test(&sample(100, 60), 0.5, Alternative::TwoSided).unwrap();
        assert!((test.statistic - 2.0).abs() < 1e-9);
        assert!((test.p_value - 0.0455).abs() < 1e-3);
    }

    #[test]
    fn test_one_proportion_one_sided() {
        let s = sample(100, 60);
        let greater = one_proportion_z_test(&s, 0.5, Alternative::Greater).unwrap();
        let less = one_proportion_z_test(&s, 0.5, Alternative::Less).unwrap();
        assert!((greater.p_value + less.p_value - 1.0).abs() < 1e-12);
        assert!(greater.p_value < less.p_value);
    }

    #[test]
    fn test_one_proportion_rejects_boundary_null() {
        for p0 in [0.0, 1.0, -0.3, f64::NAN] {
            let result = one_proportion_z_test(&sample(10, 5), p0, Alternative::TwoSided);
            assert!(result.is_err(), "p0={p0}");
        }
    }

    #[test]
    fn test_two_proportion_known_values() {
        let test =
            two_proportion_z_test(&sample(100, 45), &sample(100, 30), Alternative::TwoSided)
                .unwrap();
        assert!((test.statistic - 2.1909).abs() < 1e-3);
        assert!((test.p_value - 0.0285).abs() < 1e-3);
    }

    #[test]
    fn test_two_proportion_is_antisymmetric() {
        let a = sample(80, 50);
        let b = sample(120, 55);
        let ab = two_proportion_z_test(&a, &b, Alternative::TwoSided).unwrap();
        let ba = two_proportion_z_test(&b, &a, Alternative::TwoSided).unwrap();
        assert!((ab.statistic + ba.statistic).abs() < 1e-12);
        assert!((ab.p_value - ba.p_value).abs() < 1e-12);
    }

    #[test]
    fn test_two_proportion_equal_samples() {
        let test =
            two_proportion_z_test(&sample(50, 20), &sample(50, 20), Alternative::TwoSided)
                .unwrap();
        assert_eq!(test.statistic, 0.0);
        assert!((test.p_value - 1.0).abs() < 1e-12);
        assert!(!test.rejects(0.05));
    }

    #[test]
    fn test_two_proportion_degenerate_pool() {
        let result = two_proportion_z_test(&sample(10, 0), &sample(20, 0), Alternative::Less);
        assert_eq!(
            result,
            Err(InvalidArgument::DegeneratePooledProportion { pooled: 0.0 })
        );
        let result = two_proportion_z_test(&sample(10, 10), &sample(20, 20), Alternative::Less);
        assert_eq!(
            result,
            Err(InvalidArgument::DegeneratePooledProportion { pooled: 1.0 })
        );
    }

    #[test]
    fn test_difference_interval_centered_on_difference() {
        let interval = difference_interval(
            &sample(200, 120),
            &sample(150, 60),
            ConfidenceLevel::NINETY_FIVE,
        );
        assert!((interval.midpoint() - 0.2).abs() < 1e-12);
        assert!(interval.width() > 0.0);
    }
}
