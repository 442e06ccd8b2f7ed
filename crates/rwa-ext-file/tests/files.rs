//! File round trips through the validator and the engine.

use std::io::Write;

use rust_decimal_macros::dec;
use rwa_config::RwaConfig;
use rwa_ext_file::{read_dataset, write_results_to_path, FileError};
use rwa_validator::schema::required_columns;

fn upload(delimiter: char, rows: &[[&str; 4]]) -> String {
    let headers: Vec<&str> = required_columns().map(|c| c.name).collect();
    let sep = delimiter.to_string();
    let mut text = headers.join(&sep);
    text.push('\n');
    for &[segment, currency, rating, amount] in rows {
        let mut cells = vec![""; headers.len()];
        cells[0] = segment;
        cells[2] = currency;
        cells[3] = rating;
        cells[14] = amount;
        text.push_str(&cells.join(&sep));
        text.push('\n');
    }
    text
}

fn temp_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_csv_upload_end_to_end() {
    let file = temp_csv(&upload(
        ',',
        &[
            ["souverain", "MAD", "AA", "1000000"],
            ["tpe", "MAD", "AAA", "200000"],
        ],
    ));
    let dataset = read_dataset(file.path()).unwrap();
    assert_eq!(dataset.len(), 2);

    let report = rwa_engine::run(&dataset, &RwaConfig::standard()).unwrap();
    assert_eq!(report.summary.total_rwa(), dec!(150_000));

    let out = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write_results_to_path(out.path(), &report.results).unwrap();
    let written = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(written.lines().count(), 3);
    assert!(written.contains("sovereign.rating"));
}

#[test]
fn test_semicolon_upload_with_decimal_comma() {
    let file = temp_csv(&upload(';', &[["particulier", "MAD", "", "1000,50"]]));
    let dataset = read_dataset(file.path()).unwrap();
    let report = rwa_engine::run(&dataset, &RwaConfig::standard()).unwrap();
    assert_eq!(report.results[0].amount, dec!(1000.50));
}

#[test]
fn test_missing_file() {
    let err = read_dataset("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, FileError::Io { .. }));
}
