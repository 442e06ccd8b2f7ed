//! Error types for the RWA engine.
//!
//! This module defines the error types raised when a domain value is
//! constructed from invalid input.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for RWA operations.
pub type RwaResult<T> = Result<T, RwaError>;

/// The main error type for RWA domain types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RwaError {
    /// Segment code outside the closed segment set.
    #[error("Invalid segment: '{value}'")]
    InvalidSegment {
        /// The rejected value.
        value: String,
    },

    /// Rating outside the closed rating scale.
    #[error("Invalid rating: '{value}' - {reason}")]
    InvalidRating {
        /// The rejected value.
        value: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// Currency code not recognised.
    #[error("Invalid currency: '{code}'")]
    InvalidCurrency {
        /// The rejected code.
        code: String,
    },

    /// Risk weight outside [0%, 150%].
    #[error("Invalid risk weight: {value} - {reason}")]
    InvalidRiskWeight {
        /// The invalid weight value.
        value: Decimal,
        /// Reason for invalidity.
        reason: String,
    },

    /// Exposure failed an invariant check.
    #[error("Invalid exposure '{id}': {field} {reason}")]
    InvalidExposure {
        /// Identifier of the exposure.
        id: String,
        /// Exposure field that failed the check.
        field: &'static str,
        /// Description of what's invalid.
        reason: String,
    },

    /// Decimal arithmetic left the representable range.
    #[error("Arithmetic overflow: {operation} of {operand}")]
    Overflow {
        /// Operation that overflowed.
        operation: &'static str,
        /// Operand that triggered the overflow.
        operand: Decimal,
    },

    /// Categorical value not part of its closed set.
    #[error("Invalid {kind}: '{value}'")]
    InvalidCategory {
        /// Name of the category (maturity, usage, location).
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl RwaError {
    /// Creates an invalid segment error.
    #[must_use]
    pub fn invalid_segment(value: impl Into<String>) -> Self {
        Self::InvalidSegment {
            value: value.into(),
        }
    }

    /// Creates an invalid rating error.
    #[must_use]
    pub fn invalid_rating(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRating {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid exposure error.
    #[must_use]
    pub fn invalid_exposure(
        id: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidExposure {
            id: id.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Creates an overflow error.
    #[must_use]
    pub fn overflow(operation: &'static str, operand: Decimal) -> Self {
        Self::Overflow { operation, operand }
    }

    /// Creates an invalid category error.
    #[must_use]
    pub fn invalid_category(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidCategory {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = RwaError::invalid_segment("hedge_fund");
        assert_eq!(err.to_string(), "Invalid segment: 'hedge_fund'");

        let err = RwaError::InvalidRiskWeight {
            value: dec!(2),
            reason: "above 150%".into(),
        };
        assert!(err.to_string().contains("above 150%"));
    }

    #[test]
    fn test_exposure_and_overflow_errors() {
        let err = RwaError::invalid_exposure("R1", "amount", "cannot be negative");
        assert_eq!(err.to_string(), "Invalid exposure 'R1': amount cannot be negative");

        let err = RwaError::overflow("weighting", Decimal::MAX);
        assert_eq!(
            err.to_string(),
            format!("Arithmetic overflow: weighting of {}", Decimal::MAX)
        );
    }

    #[test]
    fn test_category_error() {
        let err = RwaError::invalid_category("maturity", "10 ans");
        assert_eq!(err.to_string(), "Invalid maturity: '10 ans'");
    }
}
