//! CSV writers for results, portfolio summaries and validation reports.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rwa_engine::{CalculationResult, PortfolioSummary};
use rwa_validator::ValidationReport;

use crate::error::{FileError, FileResult};

/// Header of the results file.
pub const RESULT_HEADERS: [&str; 11] = [
    "row",
    "id",
    "segment",
    "currency",
    "amount",
    "weight",
    "rwa",
    "rule",
    "priority",
    "past_due",
    "explanation",
];

/// Writes one CSV line per result, in input order.
pub fn write_results<W: Write>(writer: W, results: &[CalculationResult]) -> FileResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(RESULT_HEADERS)?;
    for r in results {
        csv.write_record([
            (r.row_index + 1).to_string(),
            r.exposure_id.clone(),
            r.segment.code().to_string(),
            r.currency.to_string(),
            r.amount.to_string(),
            r.weight.value().normalize().to_string(),
            r.risk_weighted_amount.normalize().to_string(),
            r.rule.clone(),
            r.priority.to_string(),
            r.past_due.to_string(),
            r.explanation.clone(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes results to a file, creating or truncating it.
pub fn write_results_to_path(
    path: impl AsRef<Path>,
    results: &[CalculationResult],
) -> FileResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| FileError::io(path, e))?;
    write_results(file, results)?;
    tracing::debug!(path = %path.display(), rows = results.len(), "results written");
    Ok(())
}

/// Writes the portfolio summary: one line per segment, then a total line.
pub fn write_summary<W: Write>(writer: W, summary: &PortfolioSummary) -> FileResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["segment", "count", "exposure", "rwa", "average_weight"])?;
    let rows = summary
        .by_segment
        .iter()
        .map(|(segment, m)| (segment.code(), m))
        .chain(std::iter::once(("total", &summary.total)));
    for (label, m) in rows {
        csv.write_record([
            label.to_string(),
            m.count.to_string(),
            m.exposure.normalize().to_string(),
            m.rwa.normalize().to_string(),
            m.average_weight()
                .map(|w| w.round_dp(6).normalize().to_string())
                .unwrap_or_default(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes violations then warnings, one line each. Rows are 1-based.
pub fn write_report<W: Write>(writer: W, report: &ValidationReport) -> FileResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["severity", "row", "column", "rule", "message"])?;
    for v in &report.violations {
        let row = v.row.map(|r| (r + 1).to_string()).unwrap_or_default();
        csv.write_record([
            "violation",
            row.as_str(),
            v.column.as_str(),
            v.rule.code(),
            v.message.as_str(),
        ])?;
    }
    for w in &report.warnings {
        let row = (w.row + 1).to_string();
        csv.write_record([
            "warning",
            row.as_str(),
            w.column.as_str(),
            w.kind.code(),
            w.message.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use rwa_core::types::{Currency, RiskWeight, Segment};
    use rwa_engine::Priority;

    fn result() -> CalculationResult {
        CalculationResult {
            row_index: 0,
            exposure_id: "row-1".into(),
            segment: Segment::SmallBusiness,
            currency: Currency::MAD,
            amount: dec!(200000),
            weight: RiskWeight::SEVENTY_FIVE,
            risk_weighted_amount: dec!(150000.00),
            rule: "small_business.fixed".into(),
            priority: Priority::Default,
            explanation: "very small enterprise - weight 75%".into(),
            past_due: false,
        }
    }

    #[test]
    fn test_write_results() {
        let mut out = Vec::new();
        write_results(&mut out, &[result()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), RESULT_HEADERS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            concat!(
                "1,row-1,tpe,MAD,200000,0.75,150000,small_business.fixed,default,false,",
                "very small enterprise - weight 75%"
            )
        );
    }

    #[test]
    fn test_write_summary_ends_with_total() {
        let summary = PortfolioSummary::from_results(&[result()]).unwrap();
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "tpe,1,200000,150000,0.75");
        assert_eq!(lines[2], "total,1,200000,150000,0.75");
    }
}
