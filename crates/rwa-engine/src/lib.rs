//! # RWA Engine
//!
//! Segment rule evaluation for the standardised approach.
//!
//! Each validated [`Exposure`] is dispatched by segment to an ordered
//! [`RuleSet`]; the first rule whose condition holds and whose weight source
//! resolves determines the weight. Every set ends with an unconditional
//! default, so every exposure gets a weight. Weighting and aggregation use
//! checked arithmetic and report an overflow as an error.
//!
//! - [`RuleBook`]: all rule sets, built once from an [`RwaConfig`]
//! - [`RwaCalculator`]: single and batch calculation, optionally parallel
//! - [`PortfolioSummary`]: totals by segment and by rule
//! - [`pipeline::run`]: validate then calculate a raw dataset
//!
//! ## Example
//!
//! ```rust
//! use rwa_config::RwaConfig;
//! use rwa_engine::prelude::*;
//! use rwa_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let calculator = RwaCalculator::new(&RwaConfig::standard());
//! let ecb = ExposureBuilder::new(Segment::Sovereign)
//!     .counterparty("European Central Bank")
//!     .rating(Rating::BMinus)
//!     .amount(dec!(1_000_000))
//!     .build()
//!     .unwrap();
//!
//! let result = calculator.calculate(&ecb).unwrap();
//! assert_eq!(result.weight, RiskWeight::ZERO);
//! assert_eq!(result.rule, "sovereign.named_entity");
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: batch calculation with rayon above the configured threshold
//!
//! [`Exposure`]: rwa_core::Exposure
//! [`RwaConfig`]: rwa_config::RwaConfig

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_lines)]

pub mod calculator;
pub mod parallel;
pub mod pipeline;
pub mod result;
pub mod rules;
pub mod summary;

pub use calculator::RwaCalculator;
pub use pipeline::{run, RunError, RwaReport};
pub use result::CalculationResult;
pub use rules::{
    Condition, Flag, Priority, RuleBook, RuleMatch, RuleSet, WeightSource, WeightingRule,
};
pub use summary::{BucketMetrics, PortfolioSummary};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculator::RwaCalculator;
    pub use crate::pipeline::{run, RunError, RwaReport};
    pub use crate::result::CalculationResult;
    pub use crate::rules::{Priority, RuleBook, RuleSet, WeightingRule};
    pub use crate::summary::{BucketMetrics, PortfolioSummary};
}
