//! Validate command implementation.
//!
//! Checks an exposure file against the upload schema.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rwa_config::RwaConfig;
use rwa_validator::{validate, ValidationReport};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{
    format_amount, print_error, print_header, print_json, print_success, print_table,
    print_warning, KeyValue,
};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Exposure file (CSV, `,` or `;` separated)
    pub file: PathBuf,
}

/// One violation or warning line.
#[derive(Debug, Serialize, Tabled)]
struct FindingRow {
    #[tabled(rename = "Row")]
    row: String,
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Rule")]
    rule: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Execute the validate command.
pub fn execute(args: &ValidateArgs, config: &RwaConfig, format: OutputFormat) -> Result<()> {
    let dataset = rwa_ext_file::read_dataset(&args.file)?;
    let report = validate(&dataset, config);
    print_report(&report, format)?;

    if report.is_pass() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed(report.violations.len()).into())
    }
}

/// Prints a validation report in the requested format.
pub fn print_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report)?,
        OutputFormat::Csv => rwa_ext_file::write_report(std::io::stdout(), report)?,
        OutputFormat::Minimal => {
            if report.is_pass() {
                println!("PASS");
            } else {
                println!("FAIL {}", report.violations.len());
            }
        }
        OutputFormat::Table => print_report_table(report)?,
    }
    Ok(())
}

fn print_report_table(report: &ValidationReport) -> Result<()> {
    if !report.violations.is_empty() {
        print_header(&format!("Violations ({})", report.violations.len()));
        let rows: Vec<FindingRow> = report
            .violations
            .iter()
            .map(|v| FindingRow {
                row: v.row.map_or_else(|| "-".to_string(), |r| (r + 1).to_string()),
                column: v.column.clone(),
                rule: v.rule.code().to_string(),
                message: v.message.clone(),
            })
            .collect();
        print_table(&rows)?;
    }

    if !report.warnings.is_empty() {
        print_header(&format!("Warnings ({})", report.warnings.len()));
        let rows: Vec<FindingRow> = report
            .warnings
            .iter()
            .map(|w| FindingRow {
                row: (w.row + 1).to_string(),
                column: w.column.clone(),
                rule: w.kind.code().to_string(),
                message: w.message.clone(),
            })
            .collect();
        print_table(&rows)?;
    }

    let s = &report.summary;
    print_header("Dataset");
    let mut facts = vec![
        KeyValue::new("Rows", s.rows.to_string()),
        KeyValue::new("Columns", s.columns.to_string()),
        KeyValue::new("Segments", s.distinct_segments().to_string()),
        KeyValue::new("Ratings", s.distinct_ratings().to_string()),
        KeyValue::new("Total amount", format_amount(s.total_amount)),
    ];
    if let Some(mean) = s.mean_amount {
        facts.push(KeyValue::new("Mean amount", format_amount(mean)));
    }
    if let Some(median) = s.median_amount {
        facts.push(KeyValue::new("Median amount", format_amount(median)));
    }
    if s.past_due_rows > 0 {
        facts.push(KeyValue::new("Past due rows", s.past_due_rows.to_string()));
    }
    print_table(&facts)?;
    println!();

    if report.no_data {
        print_warning("no data: the file has no rows");
    }
    if report.is_pass() {
        print_success("validation passed");
    } else {
        print_error(&format!(
            "validation failed: {} violation(s)",
            report.violations.len()
        ));
    }
    Ok(())
}
