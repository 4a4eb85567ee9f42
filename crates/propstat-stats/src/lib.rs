//! Inference for binomial proportions.
//!
//! This crate provides closed-form estimators used in introductory statistics:
//!
//! - **Confidence intervals**: Wald and Wilson score intervals for a single proportion
//! - **Hypothesis tests**: One- and two-proportion z-tests
//! - **Planning**: Margin of error and required number of trials
//! - **Regression**: Simple linear regression by ordinary least squares
//! - **Descriptive statistics**: Mean, median, variance and spread of a dataset
//!
//! Every operation is a pure function of its arguments. Malformed inputs are
//! rejected with [`InvalidArgument`] before any arithmetic happens.
//!
//! # Modules
//!
//! - [`sample`]: Validated [`Sample`] and [`ConfidenceLevel`] value types
//! - [`interval`]: Wald and Wilson intervals behind a common [`IntervalMethod`]
//! - [`normal`]: Standard normal critical values
//! - [`hypothesis`]: z-tests for proportions
//! - [`planning`]: Sample-size planning
//! - [`regression`]: Least-squares line fitting
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//!
//! # Examples
//!
//! ## Comparing Wald and Wilson
//!
//! ```
//! use propstat_stats::interval::{wald, wilson};
//!
//! // One success in thirty trials at 95% confidence
//! let wald = wald(30, 1, 0.95).unwrap();
//! let wilson = wilson(30, 1, 0.95).unwrap();
//!
//! // The Wald interval leaks below zero; Wilson stays inside [0, 1]
//! assert!(wald.lower < 0.0);
//! assert!(wilson.lower >= 0.0);
//! ```
//!
//! ## Testing a difference in proportions
//!
//! ```
//! use propstat_stats::{
//!     Sample,
//!     hypothesis::{Alternative, two_proportion_z_test},
//! };
//!
//! let treatment = Sample::new(100, 45).unwrap();
//! let control = Sample::new(100, 30).unwrap();
//! let test = two_proportion_z_test(&treatment, &control, Alternative::TwoSided).unwrap();
//! assert!(test.rejects(0.05));
//! ```
//!
//! ## Rejecting malformed input
//!
//! ```
//! use propstat_stats::{InvalidArgument, interval::wilson};
//!
//! assert_eq!(wilson(0, 0, 0.95), Err(InvalidArgument::ZeroTrials));
//! ```

pub use self::{
    interval::{Interval, IntervalMethod},
    sample::{ConfidenceLevel, Sample},
};

pub mod descriptive;
pub mod hypothesis;
pub mod interval;
pub mod normal;
pub mod planning;
pub mod regression;
pub mod sample;

/// Error returned when an operation receives arguments outside its domain.
///
/// Every fallible operation in this crate fails with this single error kind.
/// The variant names the argument that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidArgument {
    #[display("number of trials must be positive")]
    ZeroTrials,
    #[display("successes ({successes}) exceed trials ({trials})")]
    SuccessesExceedTrials { successes: u64, trials: u64 },
    #[display("confidence level must lie strictly between 0 and 1, got {level}")]
    ConfidenceLevelOutOfRange { level: f64 },
    #[display("interval bounds out of order: [{lower}, {upper}]")]
    BoundsOutOfOrder { lower: f64, upper: f64 },
    #[display("probability must lie between 0 and 1, got {probability}")]
    ProbabilityOutOfRange { probability: f64 },
    #[display("proportion {proportion} is outside its valid range")]
    ProportionOutOfRange { proportion: f64 },
    #[display("pooled proportion is {pooled}, so the standard error vanishes")]
    DegeneratePooledProportion { pooled: f64 },
    #[display("margin of error must lie strictly between 0 and 1, got {margin}")]
    MarginOutOfRange { margin: f64 },
    #[display("predictor and response lengths differ ({x_len} vs {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[display("at least 3 observations are required, got {len}")]
    TooFewObservations { len: usize },
    #[display("predictor values have zero variance")]
    ZeroPredictorVariance,
    #[display("number of replications must be positive")]
    ZeroReplications,
}
