//! Sample-size planning for proportion estimates.

use crate::{ConfidenceLevel, InvalidArgument, Sample};

/// Proportion that maximizes `p(1 − p)`, used when no prior estimate is available.
pub const CONSERVATIVE_PROPORTION: f64 = 0.5;

/// Half-width of the Wald interval for `sample`.
///
/// # Examples
///
/// ```
/// use propstat_stats::{ConfidenceLevel, Sample, planning::margin_of_error};
///
/// let sample = Sample::new(400, 200).unwrap();
/// let margin = margin_of_error(&sample, ConfidenceLevel::NINETY_FIVE);
/// assert!((margin - 0.049).abs() < 1e-3);
/// ```
#[must_use]
pub fn margin_of_error(sample: &Sample, confidence: ConfidenceLevel) -> f64 {
    confidence.critical_value() * (sample.bernoulli_variance() / sample.trials_f64()).sqrt()
}

/// Smallest number of trials whose Wald margin of error is at most `margin`.
///
/// Computes `ceil(z² p(1 − p) / margin²)` for the planning proportion `p`,
/// falling back to [`CONSERVATIVE_PROPORTION`] when none is given. The
/// result is at least 1.
///
/// # Arguments
///
/// * `margin` - Desired half-width, strictly between 0 and 1
/// * `confidence` - Confidence level of the planned interval
/// * `planning_proportion` - Prior guess of the proportion, in `[0, 1]`
///
/// # Examples
///
/// ```
/// use propstat_stats::{ConfidenceLevel, planning::required_trials};
///
/// // The classic "±3 points at 95%" poll
/// let trials = required_trials(0.03, ConfidenceLevel::NINETY_FIVE, None).unwrap();
/// assert_eq!(trials, 1068);
/// ```
pub fn required_trials(
    margin: f64,
    confidence: ConfidenceLevel,
    planning_proportion: Option<f64>,
) -> Result<u64, InvalidArgument> {
    if !(margin > 0.0 && margin < 1.0) {
        return Err(InvalidArgument::MarginOutOfRange { margin });
    }
    let p = planning_proportion.unwrap_or(CONSERVATIVE_PROPORTION);
    if !(0.0..=1.0).contains(&p) {
        return Err(InvalidArgument::ProportionOutOfRange { proportion: p });
    }

    let z = confidence.critical_value();
    let trials = (z * z * p * (1.0 - p) / (margin * margin)).ceil();
    tracing::debug!(margin, p, trials, "required trials");

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let trials = trials as u64;
    Ok(trials.max(1))
}
