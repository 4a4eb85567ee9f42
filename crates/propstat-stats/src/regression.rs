//! Simple linear regression by ordinary least squares.
//!
//! Fits `y = intercept + slope·x` to paired observations and reports the
//! quantities needed for inference on the slope.
//!
//! # Examples
//!
//! ```
//! use propstat_stats::{ConfidenceLevel, regression::LinearFit};
//!
//! let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let ys = [2.0, 4.1, 5.9, 8.2, 9.8];
//! let fit = LinearFit::fit(&xs, &ys).unwrap();
//!
//! assert!((fit.slope() - 1.97).abs() < 1e-9);
//! assert!(fit.r_squared() > 0.99);
//! assert!(fit.slope_interval(ConfidenceLevel::NINETY_FIVE).contains(2.0));
//! ```

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{ConfidenceLevel, Interval, InvalidArgument};

/// Least-squares line through a set of `(x, y)` observations.
///
/// # Invariants
///
/// - `observations >= 3`, so the residual degrees of freedom are positive
///
/// Deserialization enforces the same invariant as [`LinearFit::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinearFit")]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
    r_squared: f64,
    residual_std_error: f64,
    slope_std_error: f64,
    observations: usize,
}

#[derive(Deserialize)]
struct RawLinearFit {
    slope: f64,
    intercept: f64,
    r_squared: f64,
    residual_std_error: f64,
    slope_std_error: f64,
    observations: usize,
}

impl TryFrom<RawLinearFit> for LinearFit {
    type Error = InvalidArgument;

    fn try_from(raw: RawLinearFit) -> Result<Self, Self::Error> {
        if raw.observations < 3 {
            return Err(InvalidArgument::TooFewObservations {
                len: raw.observations,
            });
        }
        Ok(Self {
            slope: raw.slope,
            intercept: raw.intercept,
            r_squared: raw.r_squared,
            residual_std_error: raw.residual_std_error,
            slope_std_error: raw.slope_std_error,
            observations: raw.observations,
        })
    }
}

impl LinearFit {
    /// Fits a line to `xs` and `ys`.
    ///
    /// Requires equal lengths, at least 3 observations (so that the residual
    /// variance has a positive number of degrees of freedom), and at least
    /// two distinct `x` values.
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, InvalidArgument> {
        if xs.len() != ys.len() {
            return Err(InvalidArgument::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        let observations = xs.len();
        if observations < 3 {
            return Err(InvalidArgument::TooFewObservations { len: observations });
        }

        let n = observations as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = x - x_mean;
            let dy = y - y_mean;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }
        if sxx <= 0.0 {
            return Err(InvalidArgument::ZeroPredictorVariance);
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        let sse = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (y - (intercept + slope * x)).powi(2))
            .sum::<f64>();
        let r_squared = if syy > 0.0 { 1.0 - sse / syy } else { 1.0 };
        let residual_std_error = (sse / (n - 2.0)).sqrt();
        let slope_std_error = residual_std_error / sxx.sqrt();

        tracing::debug!(observations, slope, intercept, r_squared, "linear fit");

        Ok(Self {
            slope,
            intercept,
            r_squared,
            residual_std_error,
            slope_std_error,
            observations,
        })
    }

    #[must_use]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficient of determination. Defined as 1.0 when `y` is constant.
    #[must_use]
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// `sqrt(SSE / (n − 2))`.
    #[must_use]
    pub fn residual_std_error(&self) -> f64 {
        self.residual_std_error
    }

    /// Standard error of the slope estimate.
    #[must_use]
    pub fn slope_std_error(&self) -> f64 {
        self.slope_std_error
    }

    #[must_use]
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Predicted response at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Residual degrees of freedom, `n − 2`.
    #[must_use]
    pub fn degrees_of_freedom(&self) -> usize {
        self.observations - 2
    }

    /// Confidence interval for the slope, using Student's t with `n − 2`
    /// degrees of freedom.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn slope_interval(&self, confidence: ConfidenceLevel) -> Interval {
        let t = StudentsT::new(0.0, 1.0, self.degrees_of_freedom() as f64)
            .expect("LinearFit always holds at least 3 observations")
            .inverse_cdf(confidence.upper_tail_probability());
        Interval::centered(self.slope, t * self.slope_std_error)
    }
}
