//! Counterparty segments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RwaError;

/// Counterparty category. Each segment owns one ordered rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Sovereigns and central banks.
    Sovereign,
    /// Public-sector organisations.
    PublicSector,
    /// Multilateral development banks.
    Mdb,
    /// Credit institutions and other banking entities.
    CreditInstitution,
    /// Large enterprises.
    Enterprise,
    /// Very small enterprises (TPE).
    SmallBusiness,
    /// Individuals.
    Retail,
    /// Real-estate loans.
    RealEstate,
    /// Claims in default.
    NonPerforming,
}

impl Segment {
    /// All segments in reporting order.
    pub const ALL: [Segment; 9] = [
        Segment::Sovereign,
        Segment::PublicSector,
        Segment::Mdb,
        Segment::CreditInstitution,
        Segment::Enterprise,
        Segment::SmallBusiness,
        Segment::Retail,
        Segment::RealEstate,
        Segment::NonPerforming,
    ];

    /// Returns the code used in uploaded files.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sovereign => "souverain",
            Self::PublicSector => "organisme_public",
            Self::Mdb => "bmd",
            Self::CreditInstitution => "etablissement_credit",
            Self::Enterprise => "entreprise",
            Self::SmallBusiness => "tpe",
            Self::Retail => "particulier",
            Self::RealEstate => "immobilier",
            Self::NonPerforming => "creance_souffrance",
        }
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sovereign => "Sovereign",
            Self::PublicSector => "Public sector",
            Self::Mdb => "Multilateral development bank",
            Self::CreditInstitution => "Credit institution",
            Self::Enterprise => "Enterprise",
            Self::SmallBusiness => "Very small enterprise",
            Self::Retail => "Retail",
            Self::RealEstate => "Real estate",
            Self::NonPerforming => "Non-performing",
        }
    }

    /// Returns the identifier used as rule-path prefix (e.g. `small_business`).
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Sovereign => "sovereign",
            Self::PublicSector => "public_sector",
            Self::Mdb => "mdb",
            Self::CreditInstitution => "credit_institution",
            Self::Enterprise => "enterprise",
            Self::SmallBusiness => "small_business",
            Self::Retail => "retail",
            Self::RealEstate => "real_estate",
            Self::NonPerforming => "non_performing",
        }
    }

    /// Parses a segment from its file code, rule key or English alias.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "souverain" | "sovereign" => Some(Self::Sovereign),
            "organisme_public" | "public_sector" | "pse" => Some(Self::PublicSector),
            "bmd" | "mdb" => Some(Self::Mdb),
            "etablissement_credit" | "credit_institution" | "bank" => {
                Some(Self::CreditInstitution)
            }
            "entreprise" | "enterprise" | "corporate" => Some(Self::Enterprise),
            "tpe" | "small_business" => Some(Self::SmallBusiness),
            "particulier" | "retail" | "individual" => Some(Self::Retail),
            "immobilier" | "pret" | "real_estate" => Some(Self::RealEstate),
            "creance_souffrance" | "non_performing" => Some(Self::NonPerforming),
            _ => None,
        }
    }
}

impl FromStr for Segment {
    type Err = RwaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RwaError::invalid_segment(s))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_codes() {
        for segment in Segment::ALL {
            assert_eq!(Segment::parse(segment.code()), Some(segment));
            assert_eq!(Segment::parse(segment.key()), Some(segment));
        }
    }

    #[test]
    fn test_parse_normalises() {
        assert_eq!(Segment::parse("  TPE "), Some(Segment::SmallBusiness));
        assert_eq!(Segment::parse("Souverain"), Some(Segment::Sovereign));
        assert_eq!(Segment::parse("pret"), Some(Segment::RealEstate));
        assert_eq!(Segment::parse("hedge_fund"), None);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Segment::SmallBusiness).unwrap();
        assert_eq!(json, "\"small_business\"");
    }
}
