//! Portfolio aggregation of calculation results.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rwa_core::error::{RwaError, RwaResult};
use rwa_core::types::Segment;
use serde::{Deserialize, Serialize};

use crate::result::CalculationResult;

/// Aggregated metrics for a bucket of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketMetrics {
    /// Number of exposures in this bucket.
    pub count: usize,
    /// Total gross exposure.
    pub exposure: Decimal,
    /// Total risk-weighted amount.
    pub rwa: Decimal,
}

impl BucketMetrics {
    /// Creates new empty metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `rwa / exposure`, or `None` for a zero exposure.
    #[must_use]
    pub fn average_weight(&self) -> Option<Decimal> {
        if self.exposure.is_zero() {
            None
        } else {
            Some(self.rwa / self.exposure)
        }
    }

    fn add(&mut self, result: &CalculationResult) -> RwaResult<()> {
        self.exposure = checked_add(self.exposure, result.amount, "exposure total")?;
        self.rwa = checked_add(self.rwa, result.risk_weighted_amount, "RWA total")?;
        self.count += 1;
        Ok(())
    }
}

/// Portfolio-level totals with breakdowns by segment and by rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Totals over all results.
    pub total: BucketMetrics,
    /// Breakdown by segment.
    pub by_segment: BTreeMap<Segment, BucketMetrics>,
    /// Breakdown by the rule that fired.
    pub by_rule: BTreeMap<String, BucketMetrics>,
    /// Results flagged past due.
    pub past_due_count: usize,
}

impl PortfolioSummary {
    /// Aggregates a batch of results.
    ///
    /// Fails when a total leaves the `Decimal` range.
    pub fn from_results(results: &[CalculationResult]) -> RwaResult<Self> {
        let mut summary = Self::default();
        for r in results {
            summary.total.add(r)?;
            summary.by_segment.entry(r.segment).or_default().add(r)?;
            summary.by_rule.entry(r.rule.clone()).or_default().add(r)?;
            if r.past_due {
                summary.past_due_count += 1;
            }
        }
        Ok(summary)
    }

    /// Number of exposures.
    #[must_use]
    pub fn exposure_count(&self) -> usize {
        self.total.count
    }

    /// Total gross exposure.
    #[must_use]
    pub fn total_exposure(&self) -> Decimal {
        self.total.exposure
    }

    /// Total risk-weighted assets.
    #[must_use]
    pub fn total_rwa(&self) -> Decimal {
        self.total.rwa
    }

    /// Portfolio average weight, `total_rwa / total_exposure`.
    #[must_use]
    pub fn average_weight(&self) -> Option<Decimal> {
        self.total.average_weight()
    }

    /// Metrics for one segment.
    #[must_use]
    pub fn segment(&self, segment: Segment) -> Option<&BucketMetrics> {
        self.by_segment.get(&segment)
    }

    /// Segments sorted by RWA, largest first.
    #[must_use]
    pub fn sorted_by_rwa(&self) -> Vec<(Segment, &BucketMetrics)> {
        let mut sorted: Vec<_> = self.by_segment.iter().map(|(s, m)| (*s, m)).collect();
        sorted.sort_by(|a, b| b.1.rwa.cmp(&a.1.rwa));
        sorted
    }
}

fn checked_add(total: Decimal, value: Decimal, operation: &'static str) -> RwaResult<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| RwaError::overflow(operation, value))
}

fn percent(weight: Option<Decimal>) -> String {
    weight.map_or_else(
        || "-".to_string(),
        |w| format!("{}%", (w * Decimal::ONE_HUNDRED).round_dp(2).normalize()),
    )
}

impl fmt::Display for PortfolioSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Exposures:       {}", self.exposure_count())?;
        writeln!(f, "Total exposure:  {}", self.total_exposure().round_dp(2))?;
        writeln!(f, "Total RWA:       {}", self.total_rwa().round_dp(2))?;
        writeln!(f, "Average weight:  {}", percent(self.average_weight()))?;
        if self.past_due_count > 0 {
            writeln!(f, "Past due:        {}", self.past_due_count)?;
        }
        for (segment, m) in &self.by_segment {
            writeln!(
                f,
                "  {:<20} {:>6} {:>20} {:>20} {:>8}",
                segment.name(),
                m.count,
                m.exposure.round_dp(2),
                m.rwa.round_dp(2),
                percent(m.average_weight())
            )?;
        }
        Ok(())
    }
}
