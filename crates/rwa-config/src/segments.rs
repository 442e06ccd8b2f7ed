//! Per-segment weights and thresholds.
//!
//! Each struct carries the fixed weights of one segment's rule set. Weights
//! that come from rating tables live in [`crate::WeightTables`] instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rwa_core::types::{LocationClass, RiskWeight};
use serde::{Deserialize, Serialize};

/// Sovereign weights.
///
/// `supranational` is pinned at 0% by configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SovereignWeights {
    /// Supranational entities (BIS, IMF, ECB, European Commission).
    pub supranational: RiskWeight,
    /// Domestic State or central bank in domestic currency.
    pub domestic: RiskWeight,
    /// Unrated without a PMAE band.
    pub default: RiskWeight,
}

impl Default for SovereignWeights {
    fn default() -> Self {
        Self {
            supranational: RiskWeight::ZERO,
            domestic: RiskWeight::ZERO,
            default: RiskWeight::HUNDRED,
        }
    }
}

/// Public-sector weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicSectorWeights {
    /// Repayment provided for in the State budget.
    pub budget_repayment: RiskWeight,
    /// Unrated.
    pub default: RiskWeight,
}

impl Default for PublicSectorWeights {
    fn default() -> Self {
        Self {
            budget_repayment: RiskWeight::TWENTY,
            default: RiskWeight::TWENTY,
        }
    }
}

/// Multilateral development bank weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdbWeights {
    /// Listed by the regulator or named in the zero-weight list.
    pub named_entity: RiskWeight,
    /// Unrated.
    pub default: RiskWeight,
}

impl Default for MdbWeights {
    fn default() -> Self {
        Self {
            named_entity: RiskWeight::ZERO,
            default: RiskWeight::FIFTY,
        }
    }
}

/// Optional weight per location class for unrated credit institutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationWeights {
    /// Weight for domestic institutions.
    pub domestic: Option<RiskWeight>,
    /// Weight for foreign institutions.
    pub foreign: Option<RiskWeight>,
}

impl LocationWeights {
    /// Returns the weight configured for a location class.
    #[must_use]
    pub fn get(&self, location: LocationClass) -> Option<RiskWeight> {
        match location {
            LocationClass::Domestic => self.domestic,
            LocationClass::Foreign => self.foreign,
        }
    }
}

/// Credit-institution weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditInstitutionWeights {
    /// Unrated, initial maturity of three months or less, domestic currency.
    pub domestic_short_term: RiskWeight,
    /// Location-class weights for unrated institutions.
    pub location: LocationWeights,
    /// Fallback.
    pub default: RiskWeight,
}

impl Default for CreditInstitutionWeights {
    fn default() -> Self {
        Self {
            domestic_short_term: RiskWeight::TWENTY,
            location: LocationWeights::default(),
            default: RiskWeight::FIFTY,
        }
    }
}

/// Enterprise weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnterpriseWeights {
    /// Single weight granted after regulator agreement.
    pub regulator_agreement: RiskWeight,
    /// Member of a group.
    pub group_member: RiskWeight,
    /// Unrated.
    pub unrated: RiskWeight,
}

impl Default for EnterpriseWeights {
    fn default() -> Self {
        Self {
            regulator_agreement: RiskWeight::HUNDRED,
            group_member: RiskWeight::HUNDRED_FIFTY,
            unrated: RiskWeight::HUNDRED,
        }
    }
}

/// Very small enterprise (TPE) weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmallBusinessWeights {
    /// Applied to every TPE exposure. Must equal [`SmallBusinessWeights::REGULATORY`].
    pub fixed: RiskWeight,
}

impl SmallBusinessWeights {
    /// The only admissible TPE weight.
    pub const REGULATORY: RiskWeight = RiskWeight::SEVENTY_FIVE;
}

impl Default for SmallBusinessWeights {
    fn default() -> Self {
        Self {
            fixed: Self::REGULATORY,
        }
    }
}

/// Retail weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetailWeights {
    /// Amounts strictly above this are large exposures.
    pub large_exposure_threshold: Decimal,
    /// Large exposure.
    pub large_exposure: RiskWeight,
    /// Everything else.
    pub standard: RiskWeight,
}

impl Default for RetailWeights {
    fn default() -> Self {
        Self {
            large_exposure_threshold: dec!(1_000_000),
            large_exposure: RiskWeight::HUNDRED,
            standard: RiskWeight::SEVENTY_FIVE,
        }
    }
}

/// Real-estate weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealEstateWeights {
    /// Residential property.
    pub residential: RiskWeight,
    /// Commercial property with a mortgage guarantee.
    pub commercial_mortgage: RiskWeight,
    /// Lease with purchase option.
    pub leasing: RiskWeight,
    /// State convention within the LTV cap.
    pub state_convention: RiskWeight,
    /// LTV cap for the State-convention weight (inclusive).
    pub state_convention_max_ltv: Decimal,
    /// Fallback.
    pub default: RiskWeight,
}

impl Default for RealEstateWeights {
    fn default() -> Self {
        Self {
            residential: RiskWeight::THIRTY_FIVE,
            commercial_mortgage: RiskWeight::HUNDRED,
            leasing: RiskWeight::FIFTY,
            state_convention: RiskWeight::SEVENTY_FIVE,
            state_convention_max_ltv: dec!(0.80),
            default: RiskWeight::THIRTY_FIVE,
        }
    }
}

/// Weights for claims in default, driven by the provision ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonPerformingWeights {
    /// Nothing outstanding.
    pub no_outstanding: RiskWeight,
    /// Ratios strictly below this are poorly provisioned.
    pub low_provision_ratio: Decimal,
    /// Ratios strictly above this are well provisioned.
    pub high_provision_ratio: Decimal,
    /// Residential property, poorly provisioned.
    pub residential_low: RiskWeight,
    /// Residential property, otherwise.
    pub residential_high: RiskWeight,
    /// Other claims, poorly provisioned.
    pub other_low: RiskWeight,
    /// Other claims, between the two thresholds (inclusive).
    pub other_mid: RiskWeight,
    /// Other claims, well provisioned.
    pub other_high: RiskWeight,
}

impl Default for NonPerformingWeights {
    fn default() -> Self {
        Self {
            no_outstanding: RiskWeight::HUNDRED_FIFTY,
            low_provision_ratio: dec!(0.20),
            high_provision_ratio: dec!(0.50),
            residential_low: RiskWeight::HUNDRED,
            residential_high: RiskWeight::FIFTY,
            other_low: RiskWeight::HUNDRED_FIFTY,
            other_mid: RiskWeight::HUNDRED,
            other_high: RiskWeight::FIFTY,
        }
    }
}

/// Fixed weights of every segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentWeights {
    /// Sovereigns.
    pub sovereign: SovereignWeights,
    /// Public sector.
    pub public_sector: PublicSectorWeights,
    /// Multilateral development banks.
    pub mdb: MdbWeights,
    /// Credit institutions.
    pub credit_institution: CreditInstitutionWeights,
    /// Enterprises.
    pub enterprise: EnterpriseWeights,
    /// TPE.
    pub small_business: SmallBusinessWeights,
    /// Individuals.
    pub retail: RetailWeights,
    /// Real estate.
    pub real_estate: RealEstateWeights,
    /// Claims in default.
    pub non_performing: NonPerformingWeights,
}
