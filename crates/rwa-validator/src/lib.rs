//! # RWA Validator
//!
//! The precondition gate of the RWA engine. A raw [`Dataset`] is checked
//! against the upload schema:
//!
//! - all 21 required columns are present;
//! - numbers, booleans and PMAE bands parse;
//! - categorical values belong to their closed sets (segments, ratings,
//!   currencies from the configured allow-list, maturities, property usage);
//! - cross-field rules hold (non-negative amounts, real-estate collateral,
//!   outstanding amounts of claims in default).
//!
//! Validation is exhaustive: every violation in every row is reported.
//! Zero amounts, mortgage guarantees without a property value and provisions
//! above the outstanding amount are non-blocking warnings.
//!
//! # Example
//!
//! ```rust
//! use rwa_config::RwaConfig;
//! use rwa_core::Dataset;
//! use rwa_validator::{read_exposures, schema::required_columns};
//!
//! let headers: Vec<&str> = required_columns().map(|c| c.name).collect();
//! let mut row = vec![""; headers.len()];
//! row[0] = "tpe";       // segment
//! row[2] = "MAD";       // monnaie
//! row[14] = "200000";   // montant
//!
//! let dataset = Dataset::new(&headers).with_row(&row);
//! let exposures = read_exposures(&dataset, &RwaConfig::standard()).unwrap();
//! assert_eq!(exposures.len(), 1);
//! ```
//!
//! [`Dataset`]: rwa_core::Dataset

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod cell;
pub mod reader;
pub mod report;
pub mod schema;
pub mod summary;

pub use reader::{read_exposures, read_with_report, validate};
pub use report::{Rule, ValidationReport, Violation, Warning, WarningKind};
pub use schema::{ColumnKind, ColumnSpec, SCHEMA};
pub use summary::{CategoryCount, DatasetSummary};
