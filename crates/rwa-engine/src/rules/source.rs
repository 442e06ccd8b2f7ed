//! Where a rule takes its weight from.

use rwa_config::{LocationWeights, LongTermTable, PmaeTable, ShortTermTable};
use rwa_core::types::{Exposure, RiskWeight};
use std::fmt;

/// Source of a rule's weight.
///
/// A source may fail to resolve for a given exposure (an unrated exposure has
/// no entry in a rating table); the rule then does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightSource {
    /// Constant weight.
    Fixed(RiskWeight),
    /// Long-term rating table, keyed by the exposure's rating band.
    LongTerm {
        /// Table name, for display.
        table: &'static str,
        /// Table values.
        values: LongTermTable,
    },
    /// Short-term table, keyed by the exposure's short-term rating.
    ShortTerm(ShortTermTable),
    /// PMAE table, keyed by the exposure's band.
    Pmae(PmaeTable),
    /// Weight configured for the counterparty's location class.
    Location(LocationWeights),
}

impl WeightSource {
    /// Resolves the weight for an exposure.
    #[must_use]
    pub fn resolve(&self, e: &Exposure) -> Option<RiskWeight> {
        match self {
            Self::Fixed(weight) => Some(*weight),
            Self::LongTerm { values, .. } => values.lookup(e.rating),
            Self::ShortTerm(table) => e.short_term_rating.and_then(|r| table.lookup(r)),
            Self::Pmae(table) => e.pmae_band.and_then(|band| table.lookup(band)),
            Self::Location(weights) => weights.get(e.location),
        }
    }

    /// Describes the input that drove the lookup, if any.
    #[must_use]
    pub fn detail(&self, e: &Exposure) -> Option<String> {
        match self {
            Self::Fixed(_) => None,
            Self::LongTerm { table, .. } => {
                let band = e.rating.band()?;
                Some(format!("rating {} ({band}) in {table} table", e.rating))
            }
            Self::ShortTerm(_) => e
                .short_term_rating
                .map(|r| format!("short-term rating {r}")),
            Self::Pmae(_) => e.pmae_band.map(|band| format!("PMAE band {band}")),
            Self::Location(_) => Some(format!("{} location", e.location)),
        }
    }
}

impl fmt::Display for WeightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(weight) => write!(f, "{weight}"),
            Self::LongTerm { table, values } => {
                write!(f, "{table} table [")?;
                for (i, (band, weight)) in values.rows().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{band}: {weight}")?;
                }
                f.write_str("]")
            }
            Self::ShortTerm(t) => write!(
                f,
                "short-term table [A-1: {}, A-2: {}, A-3: {}]",
                t.a1, t.a2, t.a3
            ),
            Self::Pmae(t) => {
                f.write_str("PMAE table [")?;
                for (band, weight) in t.0.iter().enumerate() {
                    if band > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{band}: {weight}")?;
                }
                f.write_str("]")
            }
            Self::Location(w) => {
                let show =
                    |w: Option<RiskWeight>| w.map_or_else(|| "-".to_string(), |w| w.to_string());
                write!(
                    f,
                    "location [domestic: {}, foreign: {}]",
                    show(w.domestic),
                    show(w.foreign)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rwa_core::types::{LocationClass, Rating, Segment};
    use rwa_core::ExposureBuilder;

    #[test]
    fn test_long_term_resolution() {
        let source = WeightSource::LongTerm {
            table: "sovereign",
            values: LongTermTable::sovereign(),
        };
        let rated = ExposureBuilder::new(Segment::Sovereign)
            .rating(Rating::BBB)
            .build()
            .unwrap();
        let unrated = ExposureBuilder::new(Segment::Sovereign).build().unwrap();
        assert_eq!(source.resolve(&rated), Some(RiskWeight::FIFTY));
        assert_eq!(source.resolve(&unrated), None);
        assert_eq!(
            source.detail(&rated).unwrap(),
            "rating BBB (BBB+ to BBB-) in sovereign table"
        );
    }

    #[test]
    fn test_pmae_and_short_term_resolution() {
        let e = ExposureBuilder::new(Segment::Sovereign)
            .pmae_band(3)
            .short_term_rating(Rating::A3)
            .build()
            .unwrap();
        assert_eq!(
            WeightSource::Pmae(PmaeTable::default()).resolve(&e),
            Some(RiskWeight::FIFTY)
        );
        assert_eq!(
            WeightSource::ShortTerm(ShortTermTable::default()).resolve(&e),
            Some(RiskWeight::HUNDRED)
        );
    }

    #[test]
    fn test_location_resolution() {
        let source = WeightSource::Location(LocationWeights {
            domestic: None,
            foreign: Some(RiskWeight::HUNDRED),
        });
        let foreign = ExposureBuilder::new(Segment::CreditInstitution)
            .location(LocationClass::Foreign)
            .build()
            .unwrap();
        let domestic = ExposureBuilder::new(Segment::CreditInstitution).build().unwrap();
        assert_eq!(source.resolve(&foreign), Some(RiskWeight::HUNDRED));
        assert_eq!(source.resolve(&domestic), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(WeightSource::Fixed(RiskWeight::SEVENTY_FIVE).to_string(), "75%");
        let pmae = WeightSource::Pmae(PmaeTable::default()).to_string();
        assert!(pmae.starts_with("PMAE table [0: 0%, 1: 0%, 2: 20%"));
        assert!(pmae.ends_with("7: 150%]"));
    }
}
