//! Confidence intervals for a binomial proportion.
//!
//! Two estimators are provided, both behind the common [`IntervalMethod`]
//! signature:
//!
//! - **Wald**: the textbook normal approximation `p̂ ∓ z·sqrt(p̂(1−p̂)/n)`.
//!   It is not clamped, so with few trials or `p̂` near 0 or 1 the bounds can
//!   fall outside `[0, 1]`, and at `p̂ ∈ {0, 1}` it collapses to a single point.
//! - **Wilson**: the score interval, obtained by inverting the normal
//!   approximation to the score test. It always lies within `[0, 1]`.
//!
//! # Examples
//!
//! ```
//! use propstat_stats::{ConfidenceLevel, IntervalMethod, Sample};
//!
//! let sample = Sample::new(30, 1).unwrap();
//! for method in IntervalMethod::ALL {
//!     let interval = method.estimate(&sample, ConfidenceLevel::NINETY_FIVE);
//!     assert!(interval.lower <= interval.upper);
//! }
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ConfidenceLevel, InvalidArgument, Sample};

/// A closed interval `[lower, upper]` with `lower <= upper`.
///
/// The bounds are not restricted to `[0, 1]`; see [`Interval::is_within_unit`].
/// Deserialization rejects bounds that are out of order or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Deserialize)]
struct RawInterval {
    lower: f64,
    upper: f64,
}

impl TryFrom<RawInterval> for Interval {
    type Error = InvalidArgument;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        if raw.lower <= raw.upper {
            Ok(Self::new(raw.lower, raw.upper))
        } else {
            Err(InvalidArgument::BoundsOutOfOrder {
                lower: raw.lower,
                upper: raw.upper,
            })
        }
    }
}

impl Interval {
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper, "interval bounds out of order: [{lower}, {upper}]");
        Self { lower, upper }
    }

    /// Symmetric interval `centre ∓ half_width`.
    #[must_use]
    pub fn centered(centre: f64, half_width: f64) -> Self {
        Self::new(centre - half_width, centre + half_width)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.lower, self.upper)
    }

    /// Returns `true` if `value` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Returns `true` if both bounds are valid proportions.
    #[must_use]
    pub fn is_within_unit(&self) -> bool {
        self.lower >= 0.0 && self.upper <= 1.0
    }
}

/// Signature shared by [`wald`] and [`wilson`].
pub type Estimator = fn(u64, u64, f64) -> Result<Interval, InvalidArgument>;

/// Estimator used to build a proportion interval.
///
/// # Examples
///
/// ```
/// use propstat_stats::IntervalMethod;
///
/// let method: IntervalMethod = "wilson".parse().unwrap();
/// assert_eq!(method, IntervalMethod::Wilson);
/// assert_eq!(method.to_string(), "wilson");
///
/// let interval = method.compute(30, 1, 0.95).unwrap();
/// assert!(interval.is_within_unit());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum IntervalMethod {
    #[display("wald")]
    Wald,
    #[display("wilson")]
    Wilson,
}

impl IntervalMethod {
    pub const ALL: [Self; 2] = [Self::Wald, Self::Wilson];

    /// Computes the interval for a validated sample.
    #[must_use]
    pub fn estimate(self, sample: &Sample, confidence: ConfidenceLevel) -> Interval {
        match self {
            Self::Wald => wald_interval(sample, confidence),
            Self::Wilson => wilson_interval(sample, confidence),
        }
    }

    /// Validates raw arguments and computes the interval.
    pub fn compute(
        self,
        trials: u64,
        successes: u64,
        confidence: f64,
    ) -> Result<Interval, InvalidArgument> {
        (self.estimator())(trials, successes, confidence)
    }

    #[must_use]
    pub fn estimator(self) -> Estimator {
        match self {
            Self::Wald => wald,
            Self::Wilson => wilson,
        }
    }

    /// Whether every interval this method produces lies within `[0, 1]`.
    #[must_use]
    pub fn is_bounded(self) -> bool {
        match self {
            Self::Wald => false,
            Self::Wilson => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown interval method '{name}' (expected 'wald' or 'wilson')")]
pub struct ParseIntervalMethodError {
    pub name: String,
}

impl FromStr for IntervalMethod {
    type Err = ParseIntervalMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseIntervalMethodError { name: s.to_owned() })
    }
}

/// Wald interval for `successes` out of `trials` at the given confidence level.
///
/// The result is **not** clamped: it can extend below 0 or above 1 when
/// `trials` is small or the sample proportion is near 0 or 1.
///
/// # Examples
///
/// ```
/// use propstat_stats::interval::wald;
///
/// let interval = wald(30, 1, 0.95).unwrap();
/// assert!((interval.lower - -0.0309).abs() < 1e-3);
/// assert!((interval.upper - 0.0976).abs() < 1e-3);
/// ```
pub fn wald(trials: u64, successes: u64, confidence: f64) -> Result<Interval, InvalidArgument> {
    let sample = Sample::new(trials, successes)?;
    let confidence = ConfidenceLevel::new(confidence)?;
    Ok(wald_interval(&sample, confidence))
}

/// Wilson score interval for `successes` out of `trials` at the given confidence level.
///
/// # Examples
///
/// ```
/// use propstat_stats::interval::wilson;
///
/// let interval = wilson(30, 1, 0.95).unwrap();
/// assert!((interval.lower - 0.0059).abs() < 1e-3);
/// assert!((interval.upper - 0.1667).abs() < 1e-3);
/// ```
pub fn wilson(trials: u64, successes: u64, confidence: f64) -> Result<Interval, InvalidArgument> {
    let sample = Sample::new(trials, successes)?;
    let confidence = ConfidenceLevel::new(confidence)?;
    Ok(wilson_interval(&sample, confidence))
}

/// Like [`wald`], but for validated inputs.
#[must_use]
pub fn wald_interval(sample: &Sample, confidence: ConfidenceLevel) -> Interval {
    let z = confidence.critical_value();
    let p = sample.proportion();
    let std_error = (sample.bernoulli_variance() / sample.trials_f64()).sqrt();
    let interval = Interval::centered(p, z * std_error);

    tracing::trace!(
        trials = sample.trials(),
        successes = sample.successes(),
        z,
        lower = interval.lower,
        upper = interval.upper,
        "wald interval"
    );
    if !interval.is_within_unit() {
        tracing::debug!(
            lower = interval.lower,
            upper = interval.upper,
            "wald interval extends outside [0, 1]"
        );
    }
    interval
}

/// Like [`wilson`], but for validated inputs.
#[must_use]
pub fn wilson_interval(sample: &Sample, confidence: ConfidenceLevel) -> Interval {
    let z = confidence.critical_value();
    let n = sample.trials_f64();
    let p = sample.proportion();
    let z2 = z * z;

    let denom = 1.0 + z2 / n;
    let centre = p + z2 / (2.0 * n);
    let adj = ((sample.bernoulli_variance() + z2 / (4.0 * n)) / n).sqrt();

    // The bounds touch 0 and 1 exactly at p̂ = 0 and p̂ = 1, and never cross them.
    let lower = if sample.successes() == 0 {
        0.0
    } else {
        ((centre - z * adj) / denom).max(0.0)
    };
    let upper = if sample.failures() == 0 {
        1.0
    } else {
        ((centre + z * adj) / denom).min(1.0)
    };
    let interval = Interval::new(lower, upper);

    tracing::trace!(
        trials = sample.trials(),
        successes = sample.successes(),
        z,
        lower = interval.lower,
        upper = interval.upper,
        "wilson interval"
    );
    interval
}
