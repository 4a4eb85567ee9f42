//! Monte-Carlo estimate of interval coverage.
//!
//! A 95% interval procedure should contain the true proportion in about 95%
//! of repeated samples. The Wald interval falls well short of that for small
//! samples or proportions near 0 or 1, while the Wilson interval stays close
//! to nominal. This module measures it directly:
//!
//! 1. Draw `replications` samples from `Binomial(trials, proportion)`
//! 2. Build every configured interval for each sample
//! 3. Count how often each interval contains `proportion`

use propstat_stats::{
    ConfidenceLevel, IntervalMethod, InvalidArgument, Sample, descriptive::DescriptiveStats,
};
use rand::{Rng, SeedableRng as _};
use rand_distr::Binomial;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::CoverageConfig;

/// Coverage of a single interval method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCoverage {
    pub method: IntervalMethod,
    /// Intervals that contained the true proportion.
    pub covered: u64,
    /// Intervals with a bound outside `[0, 1]`.
    pub out_of_unit: u64,
    /// Summary of interval widths across replications.
    pub width: DescriptiveStats,
}

impl MethodCoverage {
    /// Fraction of replications whose interval contained the true proportion.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn coverage(&self) -> f64 {
        self.covered as f64 / self.width.count as f64
    }
}

/// Result of [`simulate_coverage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub trials: u64,
    pub proportion: f64,
    pub confidence: ConfidenceLevel,
    pub replications: u64,
    /// One entry per configured method, in configuration order.
    pub methods: Vec<MethodCoverage>,
}

impl CoverageReport {
    #[must_use]
    pub fn get(&self, method: IntervalMethod) -> Option<&MethodCoverage> {
        self.methods.iter().find(|m| m.method == method)
    }
}

#[derive(Debug)]
struct Tally {
    method: IntervalMethod,
    covered: u64,
    out_of_unit: u64,
    widths: Vec<f64>,
}

impl Tally {
    fn new(method: IntervalMethod, capacity: usize) -> Self {
        Self {
            method,
            covered: 0,
            out_of_unit: 0,
            widths: Vec::with_capacity(capacity),
        }
    }

    fn finish(self) -> Option<MethodCoverage> {
        Some(MethodCoverage {
            method: self.method,
            covered: self.covered,
            out_of_unit: self.out_of_unit,
            width: DescriptiveStats::new(self.widths)?,
        })
    }
}

/// Runs the coverage simulation described by `config`.
///
/// Deterministic: the same configuration, including the seed, always yields
/// the same report.
///
/// # Examples
///
/// ```
/// use propstat_sim::{CoverageConfig, simulate_coverage};
/// use propstat_stats::IntervalMethod;
///
/// let config = CoverageConfig {
///     replications: 2_000,
///     ..CoverageConfig::default()
/// };
/// let report = simulate_coverage(&config).unwrap();
///
/// let wald = report.get(IntervalMethod::Wald).unwrap();
/// let wilson = report.get(IntervalMethod::Wilson).unwrap();
/// assert!(wilson.coverage() > wald.coverage());
/// assert_eq!(wilson.out_of_unit, 0);
/// ```
pub fn simulate_coverage(config: &CoverageConfig) -> Result<CoverageReport, InvalidArgument> {
    config.validate()?;
    let binomial = Binomial::new(config.trials, config.proportion).map_err(|_| {
        InvalidArgument::ProportionOutOfRange {
            proportion: config.proportion,
        }
    })?;
    let mut rng = Pcg32::from_seed(config.seed.to_bytes());

    tracing::debug!(
        trials = config.trials,
        proportion = config.proportion,
        confidence = config.confidence.get(),
        replications = config.replications,
        "starting coverage simulation"
    );

    let capacity = usize::try_from(config.replications).unwrap_or(0);
    let mut tallies = config
        .methods
        .iter()
        .map(|&method| Tally::new(method, capacity))
        .collect::<Vec<_>>();

    for _ in 0..config.replications {
        let successes = rng.sample(binomial);
        let sample = Sample::new(config.trials, successes)?;
        for tally in &mut tallies {
            let interval = tally.method.estimate(&sample, config.confidence);
            if interval.contains(config.proportion) {
                tally.covered += 1;
            }
            if !interval.is_within_unit() {
                tally.out_of_unit += 1;
            }
            tally.widths.push(interval.width());
        }
    }

    let methods = tallies
        .into_iter()
        .filter_map(Tally::finish)
        .collect::<Vec<_>>();
    for m in &methods {
        tracing::debug!(
            method = %m.method,
            bounded = m.method.is_bounded(),
            coverage = m.coverage(),
            mean_width = m.width.mean,
            out_of_unit = m.out_of_unit,
            "method coverage"
        );
    }

    Ok(CoverageReport {
        trials: config.trials,
        proportion: config.proportion,
        confidence: config.confidence,
        replications: config.replications,
        methods,
    })
}

/// Runs [`simulate_coverage`] once per true proportion, keeping every other
/// setting (including the seed) from `config`.
///
/// # Examples
///
/// ```
/// use propstat_sim::{CoverageConfig, coverage_sweep};
///
/// let config = CoverageConfig {
///     replications: 500,
///     ..CoverageConfig::default()
/// };
/// let reports = coverage_sweep(&config, &[0.05, 0.5, 0.95]).unwrap();
/// assert_eq!(reports.len(), 3);
/// ```
pub fn coverage_sweep(
    config: &CoverageConfig,
    proportions: &[f64],
) -> Result<Vec<CoverageReport>, InvalidArgument> {
    proportions
        .iter()
        .map(|&proportion| {
            simulate_coverage(&CoverageConfig {
                proportion,
                ..config.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoverageSeed;

    fn config(replications: u64) -> CoverageConfig {
        CoverageConfig {
            replications,
            ..CoverageConfig::default()
        }
    }

    #[test]
    fn test_same_seed_same_report() {
        let config = config(1_000);
        assert_eq!(
            simulate_coverage(&config).unwrap(),
            simulate_coverage(&config).unwrap()
        );
    }

    #[test]
    fn test_different_seed_different_draws() {
        let a = config(1_000);
        let b = CoverageConfig {
            seed: CoverageSeed::from_u128(7),
            ..a.clone()
        };
        let ra = simulate_coverage(&a).unwrap();
        let rb = simulate_coverage(&b).unwrap();
        assert_ne!(ra.methods[0].width, rb.methods[0].width);
    }

    #[test]
    fn test_wald_undercovers_small_samples() {
        // Exact coverage at n=30, p=0.1: Wald ≈ 0.809, Wilson ≈ 0.974
        let report = simulate_coverage(&config(10_000)).unwrap();
        let wald = report.get(IntervalMethod::Wald).unwrap();
        let wilson = report.get(IntervalMethod::Wilson).unwrap();

        assert!(wald.coverage() < 0.85, "wald coverage {}", wald.coverage());
        assert!(wilson.coverage() > 0.95, "wilson coverage {}", wilson.coverage());
        assert!(wald.out_of_unit > 0);
        for m in &report.methods {
            if m.method.is_bounded() {
                assert_eq!(m.out_of_unit, 0, "{}", m.method);
            }
        }
    }

    #[test]
    fn test_report_follows_configured_methods() {
        let config = CoverageConfig {
            methods: vec![IntervalMethod::Wilson],
            ..config(100)
        };
        let report = simulate_coverage(&config).unwrap();
        assert_eq!(report.methods.len(), 1);
        assert_eq!(report.methods[0].width.count, 100);
        assert!(report.get(IntervalMethod::Wald).is_none());
    }

    #[test]
    fn test_degenerate_proportion() {
        let config = CoverageConfig {
            proportion: 0.0,
            ..config(200)
        };
        let report = simulate_coverage(&config).unwrap();
        let wald = report.get(IntervalMethod::Wald).unwrap();
        // Every sample has zero successes and Wald collapses onto 0
        assert_eq!(wald.covered, 200);
        assert_eq!(wald.width.max, 0.0);
    }

    #[test]
    fn test_extreme_confidence_level() {
        let config = CoverageConfig {
            proportion: 0.0,
            confidence: ConfidenceLevel::new(1.0 - 1e-12).unwrap(),
            ..config(200)
        };
        let report = simulate_coverage(&config).unwrap();
        assert_eq!(report.methods.len(), 2);
        for m in &report.methods {
            assert_eq!(m.covered, 200, "{}", m.method);
            assert!(m.width.max.is_finite());
        }

        let config = CoverageConfig {
            proportion: 0.5,
            ..config
        };
        let report = simulate_coverage(&config).unwrap();
        let wilson = report.get(IntervalMethod::Wilson).unwrap();
        assert_eq!(wilson.covered, 200);
        assert_eq!(wilson.out_of_unit, 0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = CoverageConfig {
            replications: 0,
            ..CoverageConfig::default()
        };
        assert_eq!(
            simulate_coverage(&config),
            Err(InvalidArgument::ZeroReplications)
        );
    }

    #[test]
    fn test_sweep_reports_each_proportion() {
        let reports = coverage_sweep(&config(300), &[0.2, 0.8]).unwrap();
        let proportions = reports.iter().map(|r| r.proportion).collect::<Vec<_>>();
        assert_eq!(proportions, vec![0.2, 0.8]);

        assert!(coverage_sweep(&config(300), &[0.5, 1.1]).is_err());
    }
}
