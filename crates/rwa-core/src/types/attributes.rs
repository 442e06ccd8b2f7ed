//! Exposure attributes consulted by attribute-band rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maturity bucket, as reported in the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityBucket {
    /// Three months or less.
    UpToThreeMonths,
    /// Less than one year.
    UnderOneYear,
    /// One year or more.
    OneYearOrMore,
}

impl MaturityBucket {
    /// Returns the code used in uploaded files.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UpToThreeMonths => "inf_3mois",
            Self::UnderOneYear => "inf_1_an",
            Self::OneYearOrMore => "sup_1_an",
        }
    }

    /// Parses a bucket from its file code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inf_3mois" | "≤ 3 mois" | "≤3 mois" | "<= 3 mois" | "< 3 mois" | "3m" => {
                Some(Self::UpToThreeMonths)
            }
            "inf_1_an" | "< 1 an" | "inf 1 an" | "1y-" => Some(Self::UnderOneYear),
            "sup_1_an" | ">= 1 an" | "1y+" => Some(Self::OneYearOrMore),
            _ => None,
        }
    }

    /// Returns true for both sub-one-year buckets.
    #[must_use]
    pub fn is_under_one_year(&self) -> bool {
        matches!(self, Self::UpToThreeMonths | Self::UnderOneYear)
    }
}

impl fmt::Display for MaturityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UpToThreeMonths => "<= 3 months",
            Self::UnderOneYear => "< 1 year",
            Self::OneYearOrMore => ">= 1 year",
        };
        f.write_str(label)
    }
}

/// Use of the financed or pledged property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyUsage {
    /// Residential property.
    Residential,
    /// Commercial or professional property.
    Commercial,
    /// Lease with purchase option.
    Leasing,
}

impl PropertyUsage {
    /// Returns the code used in uploaded files.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Residential => "residentiel",
            Self::Commercial => "commercial",
            Self::Leasing => "credit_bail",
        }
    }

    /// Parses a usage from its file code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "residentiel" | "habitation" | "residential" => Some(Self::Residential),
            "commercial" | "professionnel" => Some(Self::Commercial),
            "credit_bail" | "bail" | "location" | "leasing" => Some(Self::Leasing),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Leasing => "leasing",
        };
        f.write_str(label)
    }
}

/// Property collateral backing an exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collateral {
    /// Use of the property.
    pub usage: PropertyUsage,
    /// Appraised value of the property, if known.
    pub value: Option<Decimal>,
}

impl Collateral {
    /// Creates collateral of the given usage without a value.
    #[must_use]
    pub fn new(usage: PropertyUsage) -> Self {
        Self { usage, value: None }
    }

    /// Sets the appraised value.
    #[must_use]
    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }
}

/// Location class of the counterparty.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum LocationClass {
    /// Counterparty established in the reporting country.
    #[default]
    Domestic,
    /// Counterparty established abroad.
    Foreign,
}

impl LocationClass {
    /// Parses a location class.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "domestique" | "domestic" | "local" | "maroc" => Some(Self::Domestic),
            "etranger" | "étranger" | "foreign" | "international" => Some(Self::Foreign),
            _ => None,
        }
    }
}

impl fmt::Display for LocationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domestic => f.write_str("domestic"),
            Self::Foreign => f.write_str("foreign"),
        }
    }
}
