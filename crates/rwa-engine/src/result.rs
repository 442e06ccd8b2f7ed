//! Per-exposure calculation output.

use rust_decimal::Decimal;
use rwa_core::types::{Currency, RiskWeight, Segment};
use serde::{Deserialize, Serialize};

use crate::rules::Priority;

/// Result of weighting one exposure.
///
/// One result per input exposure, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Zero-based position in the batch.
    pub row_index: usize,
    /// Exposure identifier.
    pub exposure_id: String,
    /// Segment the exposure was dispatched to.
    pub segment: Segment,
    /// Exposure currency.
    pub currency: Currency,
    /// Gross exposure amount.
    pub amount: Decimal,
    /// Applied weight.
    pub weight: RiskWeight,
    /// `amount * weight`.
    pub risk_weighted_amount: Decimal,
    /// Name of the rule that fired (the rule path).
    pub rule: String,
    /// Specificity class of that rule.
    pub priority: Priority,
    /// Human-readable reason for the weight.
    pub explanation: String,
    /// Past-due flag carried from the input.
    pub past_due: bool,
}

impl CalculationResult {
    /// True if the segment default fired.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.priority == Priority::Default
    }
}
