//! Rating-keyed weighting tables.

use rwa_core::types::{Rating, RatingBand, RiskWeight};
use serde::{Deserialize, Serialize};

/// Long-term table: one weight per rating band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongTermTable {
    /// AAA to AA-
    pub aaa_to_aa_minus: RiskWeight,
    /// A+ to A-
    pub a_plus_to_a_minus: RiskWeight,
    /// BBB+ to BBB-
    pub bbb_plus_to_bbb_minus: RiskWeight,
    /// BB+ to BB-
    pub bb_plus_to_bb_minus: RiskWeight,
    /// B+ to B-
    pub b_plus_to_b_minus: RiskWeight,
}

impl LongTermTable {
    /// Creates a table from weights ordered best band first.
    #[must_use]
    pub fn new(weights: [RiskWeight; 5]) -> Self {
        let [aaa, a, bbb, bb, b] = weights;
        Self {
            aaa_to_aa_minus: aaa,
            a_plus_to_a_minus: a,
            bbb_plus_to_bbb_minus: bbb,
            bb_plus_to_bb_minus: bb,
            b_plus_to_b_minus: b,
        }
    }

    /// General table shared by public-sector, bank and enterprise claims.
    #[must_use]
    pub fn general() -> Self {
        Self::new([
            RiskWeight::TWENTY,
            RiskWeight::FIFTY,
            RiskWeight::FIFTY,
            RiskWeight::HUNDRED,
            RiskWeight::HUNDRED,
        ])
    }

    /// Sovereign table.
    #[must_use]
    pub fn sovereign() -> Self {
        Self::new([
            RiskWeight::ZERO,
            RiskWeight::TWENTY,
            RiskWeight::FIFTY,
            RiskWeight::HUNDRED,
            RiskWeight::HUNDRED,
        ])
    }

    /// Multilateral development bank table.
    #[must_use]
    pub fn mdb() -> Self {
        Self::new([
            RiskWeight::TWENTY,
            RiskWeight::FIFTY,
            RiskWeight::FIFTY,
            RiskWeight::HUNDRED,
            RiskWeight::HUNDRED,
        ])
    }

    /// Weight of a rating band.
    #[must_use]
    pub fn weight(&self, band: RatingBand) -> RiskWeight {
        match band {
            RatingBand::AaaToAaMinus => self.aaa_to_aa_minus,
            RatingBand::APlusToAMinus => self.a_plus_to_a_minus,
            RatingBand::BbbPlusToBbbMinus => self.bbb_plus_to_bbb_minus,
            RatingBand::BbPlusToBbMinus => self.bb_plus_to_bb_minus,
            RatingBand::BPlusToBMinus => self.b_plus_to_b_minus,
        }
    }

    /// Weight of a rating, or `None` if the rating has no long-term band.
    #[must_use]
    pub fn lookup(&self, rating: Rating) -> Option<RiskWeight> {
        rating.band().map(|band| self.weight(band))
    }

    /// All (band, weight) rows, best band first.
    #[must_use]
    pub fn rows(&self) -> Vec<(RatingBand, RiskWeight)> {
        RatingBand::ALL.iter().map(|b| (*b, self.weight(*b))).collect()
    }
}

/// Short-term table for A-1 / A-2 / A-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortTermTable {
    /// A-1
    pub a1: RiskWeight,
    /// A-2
    pub a2: RiskWeight,
    /// A-3
    pub a3: RiskWeight,
}

impl Default for ShortTermTable {
    fn default() -> Self {
        Self {
            a1: RiskWeight::TWENTY,
            a2: RiskWeight::FIFTY,
            a3: RiskWeight::HUNDRED,
        }
    }
}

impl ShortTermTable {
    /// Weight of a short-term grade, or `None` for any other rating.
    #[must_use]
    pub fn lookup(&self, rating: Rating) -> Option<RiskWeight> {
        match rating {
            Rating::A1 => Some(self.a1),
            Rating::A2 => Some(self.a2),
            Rating::A3 => Some(self.a3),
            _ => None,
        }
    }
}

/// Country-risk (PMAE) band table, bands 0..=7.
///
/// The band-to-weight function is regulatory: configuration validation
/// rejects any table other than [`PmaeTable::STANDARD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PmaeTable(pub [RiskWeight; 8]);

impl Default for PmaeTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl PmaeTable {
    /// 0, 0, 20, 50, 100, 100, 100, 150 percent for bands 0 to 7.
    pub const STANDARD: Self = Self([
        RiskWeight::ZERO,
        RiskWeight::ZERO,
        RiskWeight::TWENTY,
        RiskWeight::FIFTY,
        RiskWeight::HUNDRED,
        RiskWeight::HUNDRED,
        RiskWeight::HUNDRED,
        RiskWeight::HUNDRED_FIFTY,
    ]);

    /// Returns true for the regulatory table.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        *self == Self::STANDARD
    }

    /// Weight of a band, or `None` outside 0..=7.
    #[must_use]
    pub fn lookup(&self, band: u8) -> Option<RiskWeight> {
        self.0.get(usize::from(band)).copied()
    }
}

/// All rating-keyed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTables {
    /// General long-term table.
    pub general: LongTermTable,
    /// Sovereign long-term table.
    pub sovereign: LongTermTable,
    /// MDB long-term table.
    pub mdb: LongTermTable,
    /// Short-term table.
    pub short_term: ShortTermTable,
    /// PMAE band table.
    pub pmae: PmaeTable,
}

impl Default for WeightTables {
    fn default() -> Self {
        Self {
            general: LongTermTable::general(),
            sovereign: LongTermTable::sovereign(),
            mdb: LongTermTable::mdb(),
            short_term: ShortTermTable::default(),
            pmae: PmaeTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sovereign_table_is_monotonic() {
        let rows = LongTermTable::sovereign().rows();
        assert!(rows.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(rows[0].1, RiskWeight::ZERO);
        assert_eq!(rows[4].1, RiskWeight::HUNDRED);
    }

    #[test]
    fn test_long_term_lookup() {
        let general = LongTermTable::general();
        assert_eq!(general.lookup(Rating::AA), Some(RiskWeight::TWENTY));
        assert_eq!(general.lookup(Rating::BBBMinus), Some(RiskWeight::FIFTY));
        assert_eq!(general.lookup(Rating::BPlus), Some(RiskWeight::HUNDRED));
        assert_eq!(general.lookup(Rating::A1), None);
        assert_eq!(general.lookup(Rating::Unrated), None);
    }

    #[test]
    fn test_short_term_lookup() {
        let table = ShortTermTable::default();
        assert_eq!(table.lookup(Rating::A1), Some(RiskWeight::TWENTY));
        assert_eq!(table.lookup(Rating::A3), Some(RiskWeight::HUNDRED));
        assert_eq!(table.lookup(Rating::AAA), None);
    }

    #[test]
    fn test_pmae_bands() {
        let table = PmaeTable::default();
        let expected = [0, 0, 20, 50, 100, 100, 100, 150];
        for (band, pct) in expected.iter().enumerate() {
            let w = table.lookup(band as u8).unwrap();
            assert_eq!(w.as_percent(), rust_decimal::Decimal::from(*pct));
        }
        assert_eq!(table.lookup(8), None);
    }

    #[test]
    fn test_pmae_serde_requires_eight_bands() {
        let parsed: PmaeTable =
            serde_json::from_str("[0, 0, 0.2, 0.5, 1, 1, 1, 1.5]").unwrap();
        assert_eq!(parsed, PmaeTable::default());
        assert!(parsed.is_standard());
        assert!(serde_json::from_str::<PmaeTable>("[0, 0.2]").is_err());
    }
}
