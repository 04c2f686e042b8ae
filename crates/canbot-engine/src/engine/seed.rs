use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic simulation runs.
///
/// This is a 128-bit (16-byte) seed used to initialize the single random
/// number generator behind an evolution run. All randomized decisions
/// (can placement, table initialization, mutation draws, tournament
/// sampling, random moves) flow from that one generator, so the same
/// seed reproduces the whole run:
///
/// - Reproducible evolution for debugging
/// - Recorded benchmark runs that can be replayed
/// - Deterministic testing
///
/// The wire form is a 32-character hex string, accepted both in JSON and
/// on the command line.
///
/// # Example
///
/// ```
/// use canbot_engine::WorldSeed;
/// use rand::Rng as _;
///
/// // Generate a random seed
/// let seed: WorldSeed = rand::rng().random();
///
/// // Two generators from the same seed produce the same stream
/// let mut a = seed.rng();
/// let mut b = seed.rng();
/// assert_eq!(a.random::<u32>(), b.random::<u32>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldSeed([u8; 16]);

/// Error parsing a [`WorldSeed`] from its hex form.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed: expected 32 hex characters, got {len}")]
    Length { len: usize },
    #[display("invalid seed: {input} is not a hex string")]
    InvalidHex { input: String },
}

impl WorldSeed {
    /// Creates the generator for this seed.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for WorldSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl FromStr for WorldSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::Length { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::InvalidHex {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for WorldSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WorldSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `WorldSeed` values with `rng.random()`.
impl Distribution<WorldSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> WorldSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        WorldSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> WorldSeed {
        WorldSeed(bytes)
    }

    #[test]
    fn test_roundtrip_random_seed() {
        let seed: WorldSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: WorldSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn test_format_is_32_char_hex_string() {
        let seed: WorldSeed = rand::rng().random();
        let hex_str = seed.to_string();

        assert_eq!(hex_str.len(), 32);
        assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_known_value_all_zeros() {
        let seed = seed_from_bytes([0u8; 16]);
        assert_eq!(seed.to_string(), "00000000000000000000000000000000");

        let parsed: WorldSeed = "00000000000000000000000000000000".parse().unwrap();
        assert_eq!(parsed, seed);
    }

    #[test]
    fn test_known_value_sequential_bytes() {
        // Big-endian ordering: the first byte appears first in the hex string.
        let seed = seed_from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");

        let parsed: WorldSeed = seed.to_string().parse().unwrap();
        assert_eq!(parsed, seed);
    }

    #[test]
    fn test_parse_uppercase_hex() {
        let parsed: WorldSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(parsed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_parse_error_wrong_length() {
        assert!(matches!(
            "0123".parse::<WorldSeed>(),
            Err(ParseSeedError::Length { len: 4 })
        ));
        assert!(matches!(
            "".parse::<WorldSeed>(),
            Err(ParseSeedError::Length { len: 0 })
        ));
    }

    #[test]
    fn test_parse_error_invalid_hex() {
        let result = "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<WorldSeed>();
        assert!(matches!(result, Err(ParseSeedError::InvalidHex { .. })));
    }

    #[test]
    fn test_deserialize_error_messages() {
        let result: Result<WorldSeed, _> = serde_json::from_str("\"0123\"");
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("invalid seed"));
    }

    #[test]
    fn test_identical_seeds_produce_identical_streams() {
        let seed: WorldSeed = rand::rng().random();
        let mut a = seed.rng();
        let mut b = seed.rng();
        for _ in 0..20 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }
}
