//! # RWA Config
//!
//! Configuration for the RWA engine: rating tables, named-entity lists,
//! per-segment weights and thresholds, and batch processing settings.
//!
//! A configuration is loaded once, validated, and then shared read-only by
//! the validator and the engine.
//!
//! # Example
//!
//! ```rust
//! use rwa_config::{RwaConfig, Validate};
//! use rwa_core::types::{Rating, RiskWeight};
//!
//! let config = RwaConfig::standard();
//! assert!(config.is_valid());
//!
//! // Sovereign table: A+ to A- is 20%
//! assert_eq!(config.tables.sovereign.lookup(Rating::A), Some(RiskWeight::TWENTY));
//!
//! // PMAE band 7 is 150%
//! assert_eq!(config.tables.pmae.lookup(7), Some(RiskWeight::HUNDRED_FIFTY));
//! ```
//!
//! # Loading Overrides
//!
//! Configuration files only list what they change; everything else keeps
//! the standard value. Both TOML and JSON are accepted:
//!
//! ```toml
//! name = "internal"
//!
//! [weights.credit_institution.location]
//! foreign = 1.0
//!
//! [tables.mdb]
//! aaa_to_aa_minus = 0.2
//! a_plus_to_a_minus = 0.3
//! bbb_plus_to_bbb_minus = 0.5
//! bb_plus_to_bb_minus = 1.0
//! b_plus_to_b_minus = 1.0
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod error;
pub mod segments;
pub mod tables;

pub use config::{EntityLists, ProcessingConfig, RwaConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use segments::{
    CreditInstitutionWeights, EnterpriseWeights, LocationWeights, MdbWeights,
    NonPerformingWeights, PublicSectorWeights, RealEstateWeights, RetailWeights, SegmentWeights,
    SmallBusinessWeights, SovereignWeights,
};
pub use tables::{LongTermTable, PmaeTable, ShortTermTable, WeightTables};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{EntityLists, ProcessingConfig, RwaConfig};
    pub use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
    pub use crate::segments::SegmentWeights;
    pub use crate::tables::{LongTermTable, PmaeTable, ShortTermTable, WeightTables};
}
