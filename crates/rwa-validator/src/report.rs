//! Validation report.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::summary::DatasetSummary;

/// Rule a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// A required column is missing from the header.
    RequiredColumn,
    /// A required cell is blank.
    RequiredValue,
    /// Cell is not a number.
    Numeric,
    /// Cell is not a recognised boolean.
    Boolean,
    /// Cell is not an integer band 0..=7.
    PmaeBand,
    /// Unknown segment.
    Segment,
    /// Unknown rating grade.
    Rating,
    /// Short-term grade where a long-term one is expected.
    LongTermRating,
    /// Long-term grade where a short-term one is expected.
    ShortTermRating,
    /// Unknown or disallowed currency.
    Currency,
    /// Unknown maturity bucket.
    Maturity,
    /// Unknown property usage.
    Usage,
    /// Unknown location class.
    Location,
    /// Negative amount.
    NonNegative,
    /// Amount above the configured maximum.
    AmountLimit,
    /// Real-estate row without usage or positive property value.
    RealEstateCollateral,
    /// Claim in default without an outstanding amount.
    NonPerformingOutstanding,
    /// Row fails the exposure invariants.
    Consistency,
}

impl Rule {
    /// Stable identifier.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::RequiredColumn => "required_column",
            Self::RequiredValue => "required_value",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::PmaeBand => "pmae_band",
            Self::Segment => "segment",
            Self::Rating => "rating",
            Self::LongTermRating => "long_term_rating",
            Self::ShortTermRating => "short_term_rating",
            Self::Currency => "currency",
            Self::Maturity => "maturity",
            Self::Usage => "usage",
            Self::Location => "location",
            Self::NonNegative => "non_negative",
            Self::AmountLimit => "amount_limit",
            Self::RealEstateCollateral => "real_estate_collateral",
            Self::NonPerformingOutstanding => "non_performing_outstanding",
            Self::Consistency => "consistency",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A blocking finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Column concerned.
    pub column: String,
    /// Zero-based data row, or `None` for header-level findings.
    pub row: Option<usize>,
    /// Rule violated.
    pub rule: Rule,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a header-level violation.
    pub fn column(column: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            row: None,
            rule,
            message: message.into(),
        }
    }

    /// Creates a cell-level violation.
    pub fn cell(
        column: impl Into<String>,
        row: usize,
        rule: Rule,
        message: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            row: Some(row),
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(
                f,
                "row {}, {}: {} [{}]",
                row + 1,
                self.column,
                self.message,
                self.rule
            ),
            None => write!(f, "{}: {} [{}]", self.column, self.message, self.rule),
        }
    }
}

/// Kind of non-blocking observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Amount is zero.
    ZeroAmount,
    /// Mortgage guarantee without a property value.
    MortgageWithoutValue,
    /// Provisions exceed the outstanding amount.
    ProvisionsExceedOutstanding,
}

impl WarningKind {
    /// Stable identifier.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "zero_amount",
            Self::MortgageWithoutValue => "mortgage_without_value",
            Self::ProvisionsExceedOutstanding => "provisions_exceed_outstanding",
        }
    }
}

/// A non-blocking finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Kind of observation.
    pub kind: WarningKind,
    /// Column concerned.
    pub column: String,
    /// Zero-based data row.
    pub row: usize,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, {}: {}", self.row + 1, self.column, self.message)
    }
}

/// Outcome of validating a dataset.
///
/// The dataset passes when `violations` is empty. Warnings never block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Blocking findings, header-level first, then by row.
    pub violations: Vec<Violation>,
    /// Non-blocking findings.
    pub warnings: Vec<Warning>,
    /// Dataset had no rows.
    pub no_data: bool,
    /// Descriptive statistics of the dataset.
    pub summary: DatasetSummary,
}

impl ValidationReport {
    /// Returns true if there are no violations.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of one row.
    pub fn row_violations(&self, row: usize) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.row == Some(row))
    }

    /// Names of missing required columns.
    #[must_use]
    pub fn missing_columns(&self) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.rule == Rule::RequiredColumn)
            .map(|v| v.column.as_str())
            .collect()
    }

    /// Renders a plain-text report.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DATA VALIDATION REPORT ===")?;
        writeln!(f)?;

        if !self.violations.is_empty() {
            writeln!(f, "VIOLATIONS ({}):", self.violations.len())?;
            for v in &self.violations {
                writeln!(f, "  - {v}")?;
            }
            writeln!(f)?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "WARNINGS ({}):", self.warnings.len())?;
            for w in &self.warnings {
                writeln!(f, "  - {w}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "SUMMARY:")?;
        write!(f, "{}", self.summary)?;
        writeln!(f)?;

        if self.no_data {
            writeln!(f, "No data: the dataset has no rows.")
        } else if self.violations.is_empty() && self.warnings.is_empty() {
            writeln!(f, "No issues found. The data is ready for RWA calculation.")
        } else if self.violations.is_empty() {
            writeln!(f, "Validation passed with warnings.")
        } else {
            writeln!(f, "Validation failed.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display_is_one_based() {
        let v = Violation::cell("note_externe", 0, Rule::Rating, "unknown rating 'ZZZ'");
        assert_eq!(
            v.to_string(),
            "row 1, note_externe: unknown rating 'ZZZ' [rating]"
        );
        let h = Violation::column("montant", Rule::RequiredColumn, "missing column");
        assert_eq!(h.to_string(), "montant: missing column [required_column]");
    }

    #[test]
    fn test_pass_and_render() {
        let mut report = ValidationReport::default();
        assert!(report.is_pass());
        assert!(report.render().contains("No issues found"));

        report
            .violations
            .push(Violation::column("usage", Rule::RequiredColumn, "missing column"));
        report
            .violations
            .push(Violation::cell("montant", 2, Rule::Numeric, "not a number"));
        assert!(!report.is_pass());
        assert_eq!(report.missing_columns(), vec!["usage"]);
        assert_eq!(report.row_violations(2).count(), 1);
        assert!(report.render().contains("VIOLATIONS (2)"));
        assert!(report.render().contains("Validation failed."));
    }

    #[test]
    fn test_rule_serializes_as_code() {
        let json = serde_json::to_string(&Rule::RealEstateCollateral).unwrap();
        assert_eq!(json, format!("\"{}\"", Rule::RealEstateCollateral.code()));
    }
}
