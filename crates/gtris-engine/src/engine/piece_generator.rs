use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Piece, PieceCatalog, SeedParseError, Shape};

/// Draws shapes uniformly at random from a catalog.
///
/// Every draw is independent: unlike a bag randomizer, the same shape can
/// come up several times in a row.
///
/// # Example
///
/// ```
/// use gtris_engine::{PieceCatalog, PieceGenerator, PieceSeed};
///
/// let mut a = PieceGenerator::with_seed(PieceCatalog::standard(), PieceSeed::default());
/// let mut b = PieceGenerator::with_seed(PieceCatalog::standard(), PieceSeed::default());
/// for _ in 0..10 {
///     assert_eq!(a.next_shape(), b.next_shape());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    catalog: PieceCatalog,
    rng: Pcg32,
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator for piece generation. Using the same seed will produce the same
/// sequence of pieces. Its text form is 32 hex digits, used both by serde and
/// by [`FromStr`]/[`Display`](fmt::Display).
///
/// # Example
///
/// ```
/// use gtris_engine::PieceSeed;
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceSeed([u8; 16]);

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(SeedParseError::InvalidLength { len: s.len() });
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SeedParseError::InvalidDigit {
                input: s.to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| SeedParseError::InvalidDigit {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new(catalog: PieceCatalog) -> Self {
        Self::with_seed(catalog, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(catalog: PieceCatalog, seed: PieceSeed) -> Self {
        Self {
            catalog,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    /// Picks the next shape, each catalog entry with equal probability.
    pub fn next_shape(&mut self) -> Shape {
        let shapes = self.catalog.shapes();
        shapes[self.rng.random_range(0..shapes.len())]
    }

    /// Picks the next shape and places it at the spawn point of a board
    /// `board_width` cells wide.
    pub fn spawn(&mut self, board_width: usize) -> Piece {
        Piece::spawn(self.next_shape(), board_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    fn seed_from_bytes(bytes: [u8; 16]) -> PieceSeed {
        PieceSeed(bytes)
    }

    #[test]
    fn test_seed_text_form_is_big_endian_hex() {
        let seed = seed_from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!(
            serde_json::to_string(&seed).unwrap(),
            "\"0123456789abcdeffedcba9876543210\""
        );
        assert_eq!(PieceSeed::default().to_string(), "0".repeat(32));
    }

    #[test]
    fn test_seed_parse_accepts_uppercase() {
        let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.0[0], 0x01);
        assert_eq!(seed.0[15], 0x10);
    }

    #[test]
    fn test_seed_parse_errors() {
        assert_eq!(
            "0123".parse::<PieceSeed>(),
            Err(SeedParseError::InvalidLength { len: 4 })
        );
        assert_eq!(
            "".parse::<PieceSeed>(),
            Err(SeedParseError::InvalidLength { len: 0 })
        );
        assert!(matches!(
            "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>(),
            Err(SeedParseError::InvalidDigit { .. })
        ));
        assert!(matches!(
            "+123456789abcdef0123456789abcdef".parse::<PieceSeed>(),
            Err(SeedParseError::InvalidDigit { .. })
        ));

        let err = serde_json::from_str::<PieceSeed>("\"0123\"").unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: PieceSeed = "123456789abcdef01122334455667788".parse().unwrap();
        let mut a = PieceGenerator::with_seed(PieceCatalog::standard(), seed);
        let mut b = PieceGenerator::with_seed(PieceCatalog::standard(), seed);
        for _ in 0..50 {
            assert_eq!(a.next_shape(), b.next_shape());
        }
    }

    #[test]
    fn test_every_shape_is_drawn() {
        let mut generator = PieceGenerator::with_seed(PieceCatalog::standard(), PieceSeed::default());
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..1000 {
            seen[generator.next_shape().kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "not every kind was drawn: {seen:?}");
    }

    #[test]
    fn test_single_shape_catalog() {
        let catalog = PieceCatalog::from_patterns(&[(PieceKind::O, &["XX", "XX"])]).unwrap();
        let mut generator = PieceGenerator::new(catalog);
        for _ in 0..10 {
            let piece = generator.spawn(10);
            assert_eq!(piece.kind(), PieceKind::O);
            assert_eq!(piece.position().x, 4);
        }
    }
}
