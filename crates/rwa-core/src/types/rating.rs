//! External credit ratings.
//!
//! The accepted scale is closed: long-term grades AAA through B-, the
//! short-term grades A-1 through A-3, and an explicit `Unrated`. Grades
//! below B- are not part of the upload format and are rejected by
//! [`Rating::parse`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RwaError;

/// External rating on the S&P-style scale.
///
/// Long-term grades are ordered from best (AAA) to worst (B-).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Rating {
    /// Highest quality
    AAA = 1,
    /// AA+
    AAPlus = 2,
    /// AA
    AA = 3,
    /// AA-
    AAMinus = 4,
    /// A+
    APlus = 5,
    /// A
    A = 6,
    /// A-
    AMinus = 7,
    /// BBB+
    BBBPlus = 8,
    /// BBB
    BBB = 9,
    /// BBB- (lowest investment grade)
    BBBMinus = 10,
    /// BB+
    BBPlus = 11,
    /// BB
    BB = 12,
    /// BB-
    BBMinus = 13,
    /// B+
    BPlus = 14,
    /// B
    B = 15,
    /// B-
    BMinus = 16,
    /// Short-term A-1
    A1 = 31,
    /// Short-term A-2
    A2 = 32,
    /// Short-term A-3
    A3 = 33,
    /// Explicitly unrated
    #[default]
    Unrated = 99,
}

/// Long-term rating bands used as keys of the weighting tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    /// AAA to AA-
    AaaToAaMinus,
    /// A+ to A-
    APlusToAMinus,
    /// BBB+ to BBB-
    BbbPlusToBbbMinus,
    /// BB+ to BB-
    BbPlusToBbMinus,
    /// B+ to B-
    BPlusToBMinus,
}

impl RatingBand {
    /// All bands, best first.
    pub const ALL: [RatingBand; 5] = [
        RatingBand::AaaToAaMinus,
        RatingBand::APlusToAMinus,
        RatingBand::BbbPlusToBbbMinus,
        RatingBand::BbPlusToBbMinus,
        RatingBand::BPlusToBMinus,
    ];

    /// Returns the band label (e.g. "AAA to AA-").
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AaaToAaMinus => "AAA to AA-",
            Self::APlusToAMinus => "A+ to A-",
            Self::BbbPlusToBbbMinus => "BBB+ to BBB-",
            Self::BbPlusToBbMinus => "BB+ to BB-",
            Self::BPlusToBMinus => "B+ to B-",
        }
    }
}

impl fmt::Display for RatingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Rating {
    /// Returns the numeric score (1 = AAA, 16 = B-, 31..=33 short-term, 99 = unrated).
    #[must_use]
    pub fn score(&self) -> u8 {
        *self as u8
    }

    /// Returns true for A-1, A-2 and A-3.
    #[must_use]
    pub fn is_short_term(&self) -> bool {
        matches!(self, Self::A1 | Self::A2 | Self::A3)
    }

    /// Returns true for the long-term grades AAA..B-.
    #[must_use]
    pub fn is_long_term(&self) -> bool {
        self.score() <= Self::BMinus.score()
    }

    /// Returns true unless this is [`Rating::Unrated`].
    #[must_use]
    pub fn is_rated(&self) -> bool {
        *self != Self::Unrated
    }

    /// Returns the long-term band, or `None` for short-term grades and unrated.
    #[must_use]
    pub fn band(&self) -> Option<RatingBand> {
        match self {
            Self::AAA | Self::AAPlus | Self::AA | Self::AAMinus => Some(RatingBand::AaaToAaMinus),
            Self::APlus | Self::A | Self::AMinus => Some(RatingBand::APlusToAMinus),
            Self::BBBPlus | Self::BBB | Self::BBBMinus => Some(RatingBand::BbbPlusToBbbMinus),
            Self::BBPlus | Self::BB | Self::BBMinus => Some(RatingBand::BbPlusToBbMinus),
            Self::BPlus | Self::B | Self::BMinus => Some(RatingBand::BPlusToBMinus),
            Self::A1 | Self::A2 | Self::A3 | Self::Unrated => None,
        }
    }

    /// Returns the S&P-style notation.
    #[must_use]
    pub fn notation(&self) -> &'static str {
        match self {
            Self::AAA => "AAA",
            Self::AAPlus => "AA+",
            Self::AA => "AA",
            Self::AAMinus => "AA-",
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BBBPlus => "BBB+",
            Self::BBB => "BBB",
            Self::BBBMinus => "BBB-",
            Self::BBPlus => "BB+",
            Self::BB => "BB",
            Self::BBMinus => "BB-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::A1 => "A-1",
            Self::A2 => "A-2",
            Self::A3 => "A-3",
            Self::Unrated => "UNRATED",
        }
    }

    /// Parses a rating (case-insensitive, trimmed).
    ///
    /// An empty string is `Unrated`, as are the usual unrated spellings.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "AAA" => Some(Self::AAA),
            "AA+" => Some(Self::AAPlus),
            "AA" => Some(Self::AA),
            "AA-" => Some(Self::AAMinus),
            "A+" => Some(Self::APlus),
            "A" => Some(Self::A),
            "A-" => Some(Self::AMinus),
            "BBB+" => Some(Self::BBBPlus),
            "BBB" => Some(Self::BBB),
            "BBB-" => Some(Self::BBBMinus),
            "BB+" => Some(Self::BBPlus),
            "BB" => Some(Self::BB),
            "BB-" => Some(Self::BBMinus),
            "B+" => Some(Self::BPlus),
            "B" => Some(Self::B),
            "B-" => Some(Self::BMinus),
            "A-1" | "A1" => Some(Self::A1),
            "A-2" | "A2" => Some(Self::A2),
            "A-3" | "A3" => Some(Self::A3),
            "" | "UNRATED" | "NR" | "NOT RATED" | "PAS DE NOTATION" => Some(Self::Unrated),
            _ => None,
        }
    }
}

impl FromStr for Rating {
    type Err = RwaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            RwaError::invalid_rating(s, "expected AAA..B-, A-1..A-3 or UNRATED")
        })
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Rating::AAA < Rating::AA);
        assert!(Rating::BBBMinus < Rating::BBPlus);
        assert!(Rating::BMinus < Rating::A1);
    }

    #[test]
    fn test_bands() {
        assert_eq!(Rating::AAMinus.band(), Some(RatingBand::AaaToAaMinus));
        assert_eq!(Rating::A.band(), Some(RatingBand::APlusToAMinus));
        assert_eq!(Rating::BBBMinus.band(), Some(RatingBand::BbbPlusToBbbMinus));
        assert_eq!(Rating::BB.band(), Some(RatingBand::BbPlusToBbMinus));
        assert_eq!(Rating::BMinus.band(), Some(RatingBand::BPlusToBMinus));
        assert_eq!(Rating::A2.band(), None);
        assert_eq!(Rating::Unrated.band(), None);
    }

    #[test]
    fn test_term_classification() {
        assert!(Rating::A1.is_short_term());
        assert!(!Rating::A1.is_long_term());
        assert!(Rating::BMinus.is_long_term());
        assert!(!Rating::Unrated.is_long_term());
        assert!(!Rating::Unrated.is_rated());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Rating::parse("bbb+"), Some(Rating::BBBPlus));
        assert_eq!(Rating::parse(" A-1 "), Some(Rating::A1));
        assert_eq!(Rating::parse("A2"), Some(Rating::A2));
        assert_eq!(Rating::parse(""), Some(Rating::Unrated));
        assert_eq!(Rating::parse("NR"), Some(Rating::Unrated));
        assert_eq!(Rating::parse("CCC"), None);
        assert_eq!(Rating::parse("Baa1"), None);
    }

    #[test]
    fn test_notation_roundtrip() {
        for rating in [Rating::AAA, Rating::BBMinus, Rating::A3, Rating::Unrated] {
            assert_eq!(Rating::parse(rating.notation()), Some(rating));
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "D".parse::<Rating>().unwrap_err();
        assert!(matches!(err, RwaError::InvalidRating { .. }));
    }
}
