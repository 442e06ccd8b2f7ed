//! Descriptive statistics of an uploaded dataset.

use rust_decimal::Decimal;
use rwa_core::error::{RwaError, RwaResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Occurrences of one categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Normalised value.
    pub value: String,
    /// Number of rows.
    pub count: usize,
}

/// Dataset summary: shape, category distributions and amount statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of data rows.
    pub rows: usize,
    /// Number of columns in the header.
    pub columns: usize,
    /// Rows per segment, most frequent first.
    pub segments: Vec<CategoryCount>,
    /// Rows per external rating, most frequent first.
    pub ratings: Vec<CategoryCount>,
    /// Sum of parseable amounts.
    pub total_amount: Decimal,
    /// Mean of parseable amounts.
    pub mean_amount: Option<Decimal>,
    /// Median of parseable amounts.
    pub median_amount: Option<Decimal>,
    /// Rows flagged past due.
    pub past_due_rows: usize,
}

impl DatasetSummary {
    /// Number of distinct segments.
    #[must_use]
    pub fn distinct_segments(&self) -> usize {
        self.segments.len()
    }

    /// Number of distinct ratings.
    #[must_use]
    pub fn distinct_ratings(&self) -> usize {
        self.ratings.len()
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[CategoryCount]) -> fmt::Result {
    for c in counts {
        writeln!(f, "    - {}: {} rows", c.value, c.count)?;
    }
    Ok(())
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Rows: {}", self.rows)?;
        writeln!(f, "  Columns: {}", self.columns)?;
        writeln!(f, "  Distinct segments: {}", self.distinct_segments())?;
        write_counts(f, &self.segments)?;
        writeln!(f, "  Total exposure: {}", self.total_amount.round_dp(2))?;
        if let Some(mean) = self.mean_amount {
            writeln!(f, "  Mean exposure: {}", mean.round_dp(2))?;
        }
        if let Some(median) = self.median_amount {
            writeln!(f, "  Median exposure: {}", median.round_dp(2))?;
        }
        writeln!(f, "  Distinct ratings: {}", self.distinct_ratings())?;
        write_counts(f, &self.ratings)?;
        writeln!(f, "  Past-due rows: {}", self.past_due_rows)
    }
}

/// Accumulates a [`DatasetSummary`] row by row.
#[derive(Debug, Default)]
pub(crate) struct SummaryBuilder {
    rows: usize,
    columns: usize,
    segments: BTreeMap<String, usize>,
    ratings: BTreeMap<String, usize>,
    amounts: Vec<Decimal>,
    past_due_rows: usize,
}

impl SummaryBuilder {
    pub(crate) fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    pub(crate) fn segment(&mut self, value: &str) {
        *self.segments.entry(value.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn rating(&mut self, value: &str) {
        *self.ratings.entry(value.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn amount(&mut self, value: Decimal) {
        self.amounts.push(value);
    }

    pub(crate) fn past_due(&mut self) {
        self.past_due_rows += 1;
    }

    /// Fails when the amounts sum past the `Decimal` range.
    pub(crate) fn finish(mut self) -> RwaResult<DatasetSummary> {
        let total_amount = self
            .amounts
            .iter()
            .try_fold(Decimal::ZERO, |acc, a| checked_add(acc, *a))?;
        let n = self.amounts.len();
        let mean_amount = (n > 0).then(|| total_amount / Decimal::from(n));

        self.amounts.sort_unstable();
        let median_amount = match n {
            0 => None,
            _ if n % 2 == 1 => Some(self.amounts[n / 2]),
            _ => Some(checked_add(self.amounts[n / 2 - 1], self.amounts[n / 2])? / Decimal::TWO),
        };

        Ok(DatasetSummary {
            rows: self.rows,
            columns: self.columns,
            segments: ranked(self.segments),
            ratings: ranked(self.ratings),
            total_amount,
            mean_amount,
            median_amount,
            past_due_rows: self.past_due_rows,
        })
    }
}

fn checked_add(a: Decimal, b: Decimal) -> RwaResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| RwaError::overflow("amount total", b))
}

fn ranked(counts: BTreeMap<String, usize>) -> Vec<CategoryCount> {
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount { value, count })
        .collect();
    // Stable sort keeps alphabetical order among ties.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_statistics() {
        let mut b = SummaryBuilder::new(4, 21);
        for a in [dec!(100), dec!(400), dec!(200), dec!(300)] {
            b.amount(a);
        }
        let s = b.finish().unwrap();
        assert_eq!(s.total_amount, dec!(1000));
        assert_eq!(s.mean_amount, Some(dec!(250)));
        assert_eq!(s.median_amount, Some(dec!(250)));
    }

    #[test]
    fn test_odd_median_and_empty() {
        let mut b = SummaryBuilder::new(3, 21);
        for a in [dec!(5), dec!(1), dec!(3)] {
            b.amount(a);
        }
        assert_eq!(b.finish().unwrap().median_amount, Some(dec!(3)));

        let empty = SummaryBuilder::new(0, 21).finish().unwrap();
        assert_eq!(empty.mean_amount, None);
        assert_eq!(empty.median_amount, None);
        assert_eq!(empty.total_amount, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
        let mut b = SummaryBuilder::new(2, 21);
        b.amount(half);
        b.amount(half);
        assert!(matches!(b.finish(), Err(RwaError::Overflow { .. })));

        let mut b = SummaryBuilder::new(1, 21);
        b.amount(Decimal::MAX);
        assert_eq!(b.finish().unwrap().median_amount, Some(Decimal::MAX));
    }

    #[test]
    fn test_counts_ranked() {
        let mut b = SummaryBuilder::new(4, 21);
        b.segment("tpe");
        b.segment("souverain");
        b.segment("tpe");
        b.segment("bmd");
        let s = b.finish().unwrap();
        assert_eq!(s.segments[0].value, "tpe");
        assert_eq!(s.segments[0].count, 2);
        assert_eq!(s.segments[1].value, "bmd");
        assert_eq!(s.distinct_segments(), 3);
    }
}
