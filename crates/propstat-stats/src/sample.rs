//! Validated inputs shared by every estimator.
//!
//! [`Sample`] and [`ConfidenceLevel`] can only be constructed from values
//! inside their domains, so the estimators that take them never fail.

use serde::{Deserialize, Serialize};

use crate::{InvalidArgument, normal};

/// Outcome of a fixed number of Bernoulli trials.
///
/// # Invariants
///
/// - `trials > 0`
/// - `successes <= trials`
///
/// # Examples
///
/// ```
/// use propstat_stats::Sample;
///
/// let sample = Sample::new(30, 1).unwrap();
/// assert_eq!(sample.failures(), 29);
/// assert!((sample.proportion() - 1.0 / 30.0).abs() < 1e-12);
///
/// assert!(Sample::new(0, 0).is_err());
/// assert!(Sample::new(10, 11).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSample")]
pub struct Sample {
    trials: u64,
    successes: u64,
}

#[derive(Deserialize)]
struct RawSample {
    trials: u64,
    successes: u64,
}

impl TryFrom<RawSample> for Sample {
    type Error = InvalidArgument;

    fn try_from(raw: RawSample) -> Result<Self, Self::Error> {
        Self::new(raw.trials, raw.successes)
    }
}

impl Sample {
    /// Creates a sample of `successes` out of `trials`.
    pub fn new(trials: u64, successes: u64) -> Result<Self, InvalidArgument> {
        if trials == 0 {
            return Err(InvalidArgument::ZeroTrials);
        }
        if successes > trials {
            return Err(InvalidArgument::SuccessesExceedTrials { successes, trials });
        }
        Ok(Self { trials, successes })
    }

    #[must_use]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    #[must_use]
    pub fn successes(&self) -> u64 {
        self.successes
    }

    #[must_use]
    pub fn failures(&self) -> u64 {
        self.trials - self.successes
    }

    /// Number of trials as a float, for use in formulas.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn trials_f64(&self) -> f64 {
        self.trials as f64
    }

    /// Sample proportion `p̂ = successes / trials`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn proportion(&self) -> f64 {
        self.successes as f64 / self.trials as f64
    }

    /// Bernoulli variance estimate `p̂(1 − p̂)`.
    #[must_use]
    pub fn bernoulli_variance(&self) -> f64 {
        let p = self.proportion();
        p * (1.0 - p)
    }
}

/// Two-sided confidence level, strictly between 0 and 1.
///
/// # Examples
///
/// ```
/// use propstat_stats::ConfidenceLevel;
///
/// let level = ConfidenceLevel::new(0.95).unwrap();
/// assert!((level.critical_value() - 1.959_964).abs() < 1e-6);
///
/// assert!(ConfidenceLevel::new(1.0).is_err());
/// assert!(ConfidenceLevel::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self::NINETY_FIVE
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = InvalidArgument;

    fn try_from(level: f64) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

impl ConfidenceLevel {
    pub const NINETY: Self = Self(0.90);
    pub const NINETY_FIVE: Self = Self(0.95);
    pub const NINETY_NINE: Self = Self(0.99);

    /// Creates a confidence level, rejecting values outside `(0, 1)` and NaN.
    ///
    /// Levels so close to 1 that `1 − α/2` rounds to 1.0 are rejected as
    /// well, since their critical value is infinite.
    pub fn new(level: f64) -> Result<Self, InvalidArgument> {
        let candidate = Self(level);
        if level > 0.0 && level < 1.0 && candidate.upper_tail_probability() < 1.0 {
            Ok(candidate)
        } else {
            Err(InvalidArgument::ConfidenceLevelOutOfRange { level })
        }
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Significance level `α = 1 − confidence`.
    #[must_use]
    pub fn alpha(self) -> f64 {
        1.0 - self.0
    }

    /// Upper quantile probability `1 − α/2` of a two-sided interval.
    #[must_use]
    pub fn upper_tail_probability(self) -> f64 {
        1.0 - self.alpha() / 2.0
    }

    /// Two-sided standard normal critical value `z = Φ⁻¹(1 − α/2)`.
    #[must_use]
    pub fn critical_value(self) -> f64 {
        normal::two_sided_critical_value(self)
    }
}
