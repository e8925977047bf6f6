use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplies piece kinds using the 7-bag randomization algorithm.
///
/// # 7-Bag System
///
/// 1. When the bag is empty, it is refilled with all 7 piece kinds
/// 2. The bag is shuffled in place with Fisher–Yates
/// 3. Pieces are popped from the end of the bag until it is empty again
///
/// Every kind therefore appears exactly once in each run of 7 draws that
/// starts at a refill.
///
/// # Example
///
/// ```
/// use stackfall_engine::{PieceBuffer, PieceKind};
///
/// let mut buffer = PieceBuffer::new();
/// let mut cycle: Vec<_> = (0..PieceKind::LEN).map(|_| buffer.pop_next()).collect();
/// cycle.sort_by_key(|kind| *kind as u8);
/// assert_eq!(cycle, PieceKind::ALL);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBuffer {
    rng: Pcg32,
    bag: Vec<PieceKind>,
}

impl Default for PieceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBuffer {
    /// Creates a new piece buffer with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            bag: Vec::with_capacity(PieceKind::LEN),
        }
    }

    /// Refills the empty bag with all kinds and shuffles it.
    fn refill(&mut self) {
        debug_assert!(self.bag.is_empty());
        self.bag.extend(PieceKind::ALL);
        for i in (1..self.bag.len()).rev() {
            let j = self.rng.random_range(0..=i);
            self.bag.swap(i, j);
        }
    }

    /// Draws the next piece kind, refilling the bag first when it is empty.
    pub fn pop_next(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.refill();
        }
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the piece generator's RNG. Using the same seed produces
/// the same sequence of pieces, which makes sessions reproducible.
///
/// The textual form (used by `Display`, `FromStr` and serde) is 32 hex digits.
///
/// # Example
///
/// ```
/// use stackfall_engine::{PieceBuffer, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut a = PieceBuffer::with_seed(seed);
/// let mut b = PieceBuffer::with_seed(seed);
/// assert_eq!(a.pop_next(), b.pop_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    const HEX_LEN: usize = 32;

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

/// Error returned when parsing a [`PieceSeed`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex: unexpected character {ch:?}")]
    InvalidDigit { ch: char },
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::HEX_LEN {
            return Err(ParsePieceSeedError::InvalidLength { len: s.len() });
        }
        let mut num = 0_u128;
        for ch in s.chars() {
            let digit = ch
                .to_digit(16)
                .ok_or(ParsePieceSeedError::InvalidDigit { ch })?;
            num = (num << 4) | u128::from(digit);
        }
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

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    #[test]
    fn test_each_cycle_contains_every_kind_once() {
        let mut buffer = PieceBuffer::with_seed(SEED);
        for _ in 0..20 {
            let cycle: HashSet<_> = (0..PieceKind::LEN).map(|_| buffer.pop_next()).collect();
            assert_eq!(cycle.len(), PieceKind::LEN);
        }
    }

    #[test]
    fn test_bag_refills_only_when_empty() {
        let mut buffer = PieceBuffer::with_seed(SEED);
        assert!(buffer.bag.is_empty());

        buffer.pop_next();
        assert_eq!(buffer.bag.len(), PieceKind::LEN - 1);
        for _ in 1..PieceKind::LEN {
            buffer.pop_next();
        }
        assert!(buffer.bag.is_empty());

        buffer.pop_next();
        assert_eq!(buffer.bag.len(), PieceKind::LEN - 1);
    }

    #[test]
    fn test_bag_has_no_duplicates() {
        let mut buffer = PieceBuffer::with_seed(SEED);
        for _ in 0..3 {
            buffer.pop_next();
            let unique: HashSet<_> = buffer.bag.iter().collect();
            assert_eq!(unique.len(), buffer.bag.len());
        }
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let mut buffer1 = PieceBuffer::with_seed(SEED);
        let mut buffer2 = PieceBuffer::with_seed(SEED);
        for _ in 0..20 {
            assert_eq!(buffer1.pop_next(), buffer2.pop_next());
        }
    }

    #[test]
    fn test_shuffle_is_not_fixed() {
        // Over many cycles, the first kind drawn should vary.
        let mut buffer = PieceBuffer::with_seed(SEED);
        let mut firsts = HashSet::new();
        for _ in 0..50 {
            firsts.insert(buffer.pop_next());
            for _ in 1..PieceKind::LEN {
                buffer.pop_next();
            }
        }
        assert!(firsts.len() > 1);
    }

    mod piece_seed_text {
        use super::*;

        #[test]
        fn test_display_is_32_char_hex() {
            assert_eq!(SEED.to_string(), "123456789abcdef01122334455667788");
            assert_eq!(
                PieceSeed::from_bytes([0; 16]).to_string(),
                "00000000000000000000000000000000"
            );
        }

        #[test]
        fn test_parse_accepts_uppercase() {
            let seed: PieceSeed = "123456789ABCDEF01122334455667788".parse().unwrap();
            assert_eq!(seed, SEED);
        }

        #[test]
        fn test_parse_errors() {
            assert_eq!(
                "abc".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidLength { len: 3 })
            );
            assert_eq!(
                "+23456789abcdef01122334455667788".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidDigit { ch: '+' })
            );
            let err = "".parse::<PieceSeed>().unwrap_err();
            assert!(err.to_string().contains("invalid hex"));
        }

        #[test]
        fn test_serde_uses_hex_string() {
            let serialized = serde_json::to_string(&SEED).unwrap();
            assert_eq!(serialized, "\"123456789abcdef01122334455667788\"");
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, SEED);
            assert!(serde_json::from_str::<PieceSeed>("\"xyz\"").is_err());
        }
    }
}
