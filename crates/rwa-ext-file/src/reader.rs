//! CSV dataset reader.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use rwa_core::types::Dataset;

use crate::error::{FileError, FileResult};

/// Reads a dataset from a CSV file.
///
/// The delimiter (`,` or `;`) is detected from the header line.
pub fn read_dataset(path: impl AsRef<Path>) -> FileResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let mut reader = BufReader::new(file);

    let delimiter = {
        let head = reader.fill_buf().map_err(|e| FileError::io(path, e))?;
        sniff_delimiter(head)
    };
    let dataset = read_dataset_with(reader, delimiter)?;
    tracing::debug!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.headers().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Reads a comma-separated dataset from any reader.
pub fn read_dataset_from_reader<R: Read>(reader: R) -> FileResult<Dataset> {
    read_dataset_with(reader, b',')
}

/// Reads a dataset with an explicit delimiter.
///
/// Short rows are padded with blanks, long rows truncated; blank lines are
/// skipped.
pub fn read_dataset_with<R: Read>(reader: R, delimiter: u8) -> FileResult<Dataset> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(FileError::MissingHeader);
    }

    let mut dataset = Dataset::new(&headers);
    for record in csv.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let cells: Vec<&str> = record.iter().collect();
        dataset.push_row(&cells);
    }
    Ok(dataset)
}

/// Picks `;` when the first line has more semicolons than commas.
fn sniff_delimiter(head: &[u8]) -> u8 {
    let line = head.split(|&b| b == b'\n').next().unwrap_or_default();
    let count = |d: u8| line.iter().filter(|&&b| b == d).count();
    if count(b';') > count(b',') {
        b';'
    } else {
        b','
    }
}
