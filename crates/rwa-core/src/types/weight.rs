//! Regulatory risk weight.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RwaError, RwaResult};

/// A risk weight expressed as a fraction (0.75 = 75%).
///
/// The value is always within [0, 1.5]; construction outside that range fails.
///
/// # Example
///
/// ```rust
/// use rwa_core::types::RiskWeight;
/// use rust_decimal_macros::dec;
///
/// let weight = RiskWeight::from_percent(dec!(35)).unwrap();
/// assert_eq!(weight.value(), dec!(0.35));
/// assert_eq!(weight.apply(dec!(1_000)).unwrap(), dec!(350));
/// assert!(RiskWeight::new(dec!(1.6)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct RiskWeight(Decimal);

impl RiskWeight {
    /// Largest admissible weight (150%).
    pub const MAX: Decimal = dec!(1.5);

    /// 0%
    pub const ZERO: Self = Self(dec!(0));
    /// 20%
    pub const TWENTY: Self = Self(dec!(0.20));
    /// 35%
    pub const THIRTY_FIVE: Self = Self(dec!(0.35));
    /// 50%
    pub const FIFTY: Self = Self(dec!(0.50));
    /// 75%
    pub const SEVENTY_FIVE: Self = Self(dec!(0.75));
    /// 100%
    pub const HUNDRED: Self = Self(dec!(1));
    /// 150%
    pub const HUNDRED_FIFTY: Self = Self(dec!(1.5));

    /// Creates a weight from a fraction.
    ///
    /// # Errors
    ///
    /// Returns `RwaError::InvalidRiskWeight` outside [0, 1.5].
    pub fn new(value: Decimal) -> RwaResult<Self> {
        if value < Decimal::ZERO {
            return Err(RwaError::InvalidRiskWeight {
                value,
                reason: "weight cannot be negative".into(),
            });
        }
        if value > Self::MAX {
            return Err(RwaError::InvalidRiskWeight {
                value,
                reason: "weight cannot exceed 150%".into(),
            });
        }
        Ok(Self(value))
    }

    /// Creates a weight from a percentage (75 = 75%).
    pub fn from_percent(percent: Decimal) -> RwaResult<Self> {
        Self::new(percent / Decimal::ONE_HUNDRED)
    }

    /// Returns the weight as a fraction.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the weight as a percentage.
    #[must_use]
    pub fn as_percent(&self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }

    /// Applies the weight to a gross amount.
    ///
    /// # Errors
    ///
    /// Returns `RwaError::Overflow` when the product is not representable.
    pub fn apply(&self, amount: Decimal) -> RwaResult<Decimal> {
        amount
            .checked_mul(self.0)
            .ok_or_else(|| RwaError::overflow("weighting", amount))
    }
}

impl Default for RiskWeight {
    fn default() -> Self {
        Self::HUNDRED
    }
}

impl TryFrom<Decimal> for RiskWeight {
    type Error = RwaError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RiskWeight> for Decimal {
    fn from(weight: RiskWeight) -> Self {
        weight.0
    }
}

impl fmt::Display for RiskWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}
