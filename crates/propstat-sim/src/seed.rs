use std::fmt::Write as _;

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic coverage simulations.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator that draws binomial samples. The same seed always reproduces the
/// same report.
///
/// Serialized as a 32-character lowercase hex string.
///
/// # Example
///
/// ```
/// use propstat_sim::CoverageSeed;
/// use rand::Rng as _;
///
/// let seed: CoverageSeed = rand::rng().random();
/// let fixed = CoverageSeed::from_u128(42);
/// assert_eq!(fixed.as_u128(), 42);
/// # let _ = seed;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoverageSeed([u8; 16]);

impl CoverageSeed {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    #[must_use]
    pub const fn as_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    #[must_use]
    pub(crate) const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl Serialize for CoverageSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{:032x}", self.as_u128()).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for CoverageSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self::from_u128(num))
    }
}

/// Allows generating random `CoverageSeed` values with `rng.random()`.
impl Distribution<CoverageSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CoverageSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        CoverageSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_padded_hex() {
        let seed = CoverageSeed::from_u128(0xff);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, r#""000000000000000000000000000000ff""#);
        let back: CoverageSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seed);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let result = serde_json::from_str::<CoverageSeed>(r#""abc""#);
        assert!(result.unwrap_err().to_string().contains("expected 32 characters"));
    }

    #[test]
    fn test_rejects_non_hex() {
        let result = serde_json::from_str::<CoverageSeed>(r#""zz000000000000000000000000000000""#);
        assert!(result.unwrap_err().to_string().contains("invalid hex"));
    }
}
