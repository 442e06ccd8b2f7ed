//! Validate-then-calculate over a raw dataset.

use rwa_config::RwaConfig;
use rwa_core::error::RwaError;
use rwa_core::types::Dataset;
use rwa_validator::{read_with_report, ValidationReport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculator::RwaCalculator;
use crate::result::CalculationResult;
use crate::summary::PortfolioSummary;

/// Output of a full calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RwaReport {
    /// One result per dataset row, in row order.
    pub results: Vec<CalculationResult>,
    /// Portfolio totals.
    pub summary: PortfolioSummary,
    /// The passing validation report, with its warnings and dataset summary.
    pub validation: ValidationReport,
}

/// Why a run produced no report.
#[derive(Debug, Error)]
pub enum RunError {
    /// The dataset failed validation; nothing was calculated.
    #[error("validation failed with {} violation(s)", .0.violations.len())]
    Invalid(Box<ValidationReport>),

    /// A weighted amount or total left the `Decimal` range.
    #[error(transparent)]
    Calculation(#[from] RwaError),
}

/// Validates a dataset and, if it passes, calculates every row.
///
/// Nothing is calculated when validation reports a violation; the full
/// report is returned in [`RunError::Invalid`] instead.
pub fn run(dataset: &Dataset, config: &RwaConfig) -> Result<RwaReport, RunError> {
    run_with(&RwaCalculator::new(config), dataset, config)
}

/// Same as [`run`] with an existing calculator.
pub fn run_with(
    calculator: &RwaCalculator,
    dataset: &Dataset,
    config: &RwaConfig,
) -> Result<RwaReport, RunError> {
    let (exposures, validation) = read_with_report(dataset, config);
    if !validation.is_pass() {
        tracing::info!(
            violations = validation.violations.len(),
            "validation failed, nothing calculated"
        );
        return Err(RunError::Invalid(Box::new(validation)));
    }

    let results = calculator.calculate_batch(&exposures)?;
    let summary = PortfolioSummary::from_results(&results)?;
    tracing::info!(
        config = %config.name,
        rows = results.len(),
        total_rwa = %summary.total_rwa(),
        "calculation complete"
    );

    Ok(RwaReport {
        results,
        summary,
        validation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use rwa_validator::schema::required_columns;
    use rwa_validator::Rule;

    fn dataset(rows: &[[&str; 3]]) -> Dataset {
        let headers: Vec<&str> = required_columns().map(|c| c.name).collect();
        let mut ds = Dataset::new(&headers);
        for &[segment, rating, amount] in rows {
            let mut row = vec![""; headers.len()];
            row[0] = segment;
            row[2] = "MAD";
            row[3] = rating;
            row[14] = amount;
            ds.push_row(&row);
        }
        ds
    }

    #[test]
    fn test_run_passes_and_aggregates() {
        let ds = dataset(&[["tpe", "AAA", "200000"], ["entreprise", "", "500000"]]);
        let report = run(&ds, &RwaConfig::standard()).unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].risk_weighted_amount, dec!(150_000));
        assert_eq!(report.results[1].rule, "enterprise.unrated");
        assert_eq!(report.summary.total_rwa(), dec!(650_000));
        assert!(report.validation.is_pass());
    }

    #[test]
    fn test_run_refuses_invalid_dataset() {
        let ds = dataset(&[["tpe", "ZZZ", "1"]]);
        let Err(RunError::Invalid(report)) = run(&ds, &RwaConfig::standard()) else {
            panic!("expected a validation failure");
        };
        assert!(report
            .violations
            .iter()
            .all(|v| v.rule == Rule::Rating && v.row == Some(0)));
        assert!(!report.violations.is_empty());
    }

    #[test]
    fn test_huge_amount_is_rejected_before_calculation() {
        let ds = dataset(&[["creance_souffrance", "", "60000000000000000000000000000"]]);
        let Err(RunError::Invalid(report)) = run(&ds, &RwaConfig::standard()) else {
            panic!("expected a validation failure");
        };
        assert!(report
            .violations
            .iter()
            .any(|v| v.rule == Rule::AmountLimit && v.column == "montant"));
    }

    #[test]
    fn test_overflow_without_amount_limit_is_an_error() {
        let mut config = RwaConfig::standard();
        config.max_amount = Decimal::MAX;

        let headers: Vec<&str> = required_columns().map(|c| c.name).collect();
        let column = |name: &str| headers.iter().position(|h| *h == name).unwrap();
        let mut row = vec![""; headers.len()];
        row[column("segment")] = "creance_souffrance";
        row[column("monnaie")] = "MAD";
        row[column("montant")] = "60000000000000000000000000000";
        row[column("valeur_encours_creance")] = "100";
        let claim = Dataset::new(&headers).with_row(&row);

        let err = run(&claim, &config).unwrap_err();
        assert!(matches!(err, RunError::Calculation(RwaError::Overflow { .. })));

        let tpe = "50000000000000000000000000000";
        let total = dataset(&[["tpe", "", tpe], ["tpe", "", tpe]]);
        let Err(RunError::Invalid(report)) = run(&total, &config) else {
            panic!("expected a validation failure");
        };
        assert_eq!(report.violations[0].rule, Rule::AmountLimit);
    }

    #[test]
    fn test_empty_dataset() {
        let report = run(&dataset(&[]), &RwaConfig::standard()).unwrap();
        assert!(report.results.is_empty());
        assert!(report.validation.no_data);
        assert_eq!(report.summary.average_weight(), None);
    }
}
