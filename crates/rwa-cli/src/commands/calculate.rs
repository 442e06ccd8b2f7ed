//! Calculate command implementation.
//!
//! Validates an exposure file, then weights every row.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rwa_config::RwaConfig;
use rwa_engine::{run, CalculationResult, PortfolioSummary, RunError, RwaReport};

use crate::cli::OutputFormat;
use crate::commands::validate::print_report;
use crate::error::CliError;
use crate::output::{
    format_amount, format_percent, print_header, print_json, print_output, print_table,
    print_warning, KeyValue,
};

/// Arguments for the calculate command.
#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Exposure file (CSV, `,` or `;` separated)
    pub file: PathBuf,

    /// Print portfolio totals only
    #[arg(short, long)]
    pub summary_only: bool,

    /// Also write per-exposure results to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One calculated exposure.
#[derive(Debug, Serialize, Tabled)]
struct ResultRow {
    #[tabled(rename = "Row")]
    row: usize,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Segment")]
    segment: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "RWA")]
    rwa: String,
    #[tabled(rename = "Rule")]
    rule: String,
}

impl From<&CalculationResult> for ResultRow {
    fn from(r: &CalculationResult) -> Self {
        Self {
            row: r.row_index + 1,
            id: r.exposure_id.clone(),
            segment: r.segment.code().to_string(),
            amount: format_amount(r.amount),
            weight: r.weight.to_string(),
            rwa: format_amount(r.risk_weighted_amount),
            rule: r.rule.clone(),
        }
    }
}

/// Totals of one segment.
#[derive(Debug, Serialize, Tabled)]
struct SegmentRow {
    #[tabled(rename = "Segment")]
    segment: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Exposure")]
    exposure: String,
    #[tabled(rename = "RWA")]
    rwa: String,
    #[tabled(rename = "Avg Weight")]
    average_weight: String,
}

fn segment_rows(summary: &PortfolioSummary) -> Vec<SegmentRow> {
    summary
        .by_segment
        .iter()
        .map(|(segment, m)| SegmentRow {
            segment: segment.name().to_string(),
            count: m.count,
            exposure: format_amount(m.exposure),
            rwa: format_amount(m.rwa),
            average_weight: m.average_weight().map_or_else(|| "-".to_string(), format_percent),
        })
        .collect()
}

/// Execute the calculate command.
pub fn execute(args: &CalculateArgs, config: &RwaConfig, format: OutputFormat) -> Result<()> {
    let dataset = rwa_ext_file::read_dataset(&args.file)?;
    let report = match run(&dataset, config) {
        Ok(report) => report,
        Err(RunError::Invalid(validation)) => {
            print_report(&validation, format)?;
            return Err(CliError::ValidationFailed(validation.violations.len()).into());
        }
        Err(err @ RunError::Calculation(_)) => return Err(err.into()),
    };

    if let Some(path) = &args.output {
        rwa_ext_file::write_results_to_path(path, &report.results)?;
    }

    match format {
        OutputFormat::Json if args.summary_only => print_json(&report.summary)?,
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv if args.summary_only => {
            rwa_ext_file::write_summary(std::io::stdout(), &report.summary)?;
        }
        OutputFormat::Csv => rwa_ext_file::write_results(std::io::stdout(), &report.results)?,
        OutputFormat::Minimal => println!("{:.2}", report.summary.total_rwa()),
        OutputFormat::Table => print_tables(&report, args.summary_only)?,
    }
    Ok(())
}

fn print_tables(report: &RwaReport, summary_only: bool) -> Result<()> {
    if !summary_only {
        print_header("Results");
        let rows: Vec<ResultRow> = report.results.iter().map(ResultRow::from).collect();
        print_output(&rows, OutputFormat::Table)?;
    }

    let summary = &report.summary;
    print_header("By Segment");
    print_table(&segment_rows(summary))?;

    print_header("Portfolio");
    let mut totals = vec![
        KeyValue::new("Exposures", summary.exposure_count().to_string()),
        KeyValue::new("Total exposure", format_amount(summary.total_exposure())),
        KeyValue::new("Total RWA", format_amount(summary.total_rwa())),
        KeyValue::new(
            "Average weight",
            summary.average_weight().map_or_else(|| "-".to_string(), format_percent),
        ),
    ];
    if summary.past_due_count > 0 {
        totals.push(KeyValue::new("Past due", summary.past_due_count.to_string()));
    }
    print_table(&totals)?;

    let warnings = report.validation.warnings.len();
    if warnings > 0 {
        print_warning(&format!(
            "{warnings} validation warning(s); run `rwa validate` for details"
        ));
    }
    Ok(())
}
