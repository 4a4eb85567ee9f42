use propstat_stats::{ConfidenceLevel, IntervalMethod, InvalidArgument};
use serde::{Deserialize, Serialize};

use crate::CoverageSeed;

/// Parameters of a coverage simulation.
///
/// Every field has a default, so a JSON document only needs to name the
/// fields it overrides.
///
/// # Examples
///
/// ```
/// use propstat_sim::CoverageConfig;
///
/// let config = CoverageConfig::from_json(r#"{ "trials": 50, "proportion": 0.02 }"#).unwrap();
/// assert_eq!(config.trials, 50);
/// assert_eq!(config.replications, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverageConfig {
    /// Trials per simulated sample.
    pub trials: u64,
    /// True success probability the intervals should cover.
    pub proportion: f64,
    pub confidence: ConfidenceLevel,
    /// Number of simulated samples.
    pub replications: u64,
    pub seed: CoverageSeed,
    /// Estimators to evaluate, in report order.
    pub methods: Vec<IntervalMethod>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            trials: 30,
            proportion: 0.1,
            confidence: ConfidenceLevel::NINETY_FIVE,
            replications: 10_000,
            seed: CoverageSeed::from_u128(0x5eed_c0ff_ee00_0000_0000_0000_0000_0001),
            methods: IntervalMethod::ALL.to_vec(),
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("failed to parse coverage config: {_0}")]
    Parse(serde_json::Error),
    #[display("invalid coverage config: {_0}")]
    Invalid(InvalidArgument),
}

impl CoverageConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the fields that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        if self.trials == 0 {
            return Err(InvalidArgument::ZeroTrials);
        }
        if !(0.0..=1.0).contains(&self.proportion) {
            return Err(InvalidArgument::ProportionOutOfRange {
                proportion: self.proportion,
            });
        }
        if self.replications == 0 {
            return Err(InvalidArgument::ZeroReplications);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(CoverageConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_empty_json_yields_default() {
        let config = CoverageConfig::from_json("{}").unwrap();
        assert_eq!(config, CoverageConfig::default());
    }

    #[test]
    fn test_full_json() {
        let config = CoverageConfig::from_json(
            r#"{
                "trials": 12,
                "proportion": 0.5,
                "confidence": 0.9,
                "replications": 200,
                "seed": "0000000000000000000000000000002a",
                "methods": ["wilson"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.trials, 12);
        assert_eq!(config.confidence, ConfidenceLevel::NINETY);
        assert_eq!(config.seed, CoverageSeed::from_u128(42));
        assert_eq!(config.methods, vec![IntervalMethod::Wilson]);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = CoverageConfig::from_json(r#"{ "trials": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(InvalidArgument::ZeroTrials)));

        let err = CoverageConfig::from_json(r#"{ "proportion": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(InvalidArgument::ProportionOutOfRange { .. })
        ));

        let err = CoverageConfig::from_json(r#"{ "replications": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(InvalidArgument::ZeroReplications)
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        for json in [
            r#"{ "confidence": 1.0 }"#,
            r#"{ "confidence": 0.9999999999999999 }"#,
            r#"{ "method": [] }"#,
            r#""text""#,
        ] {
            let err = CoverageConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Parse(_)), "{json}");
        }
    }
}
