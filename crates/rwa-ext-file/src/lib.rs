//! # RWA Ext File
//!
//! CSV import and export for the RWA engine:
//! - Exposure datasets read from CSV (`,` or `;` separated)
//! - Calculation results and portfolio summaries written as CSV
//! - Validation reports written as CSV
//!
//! Parsing stops at string cells; typing is the validator's job.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod reader;
mod writer;

pub use error::{FileError, FileResult};
pub use reader::{read_dataset, read_dataset_from_reader, read_dataset_with};
pub use writer::{
    write_report, write_results, write_results_to_path, write_summary, RESULT_HEADERS,
};
