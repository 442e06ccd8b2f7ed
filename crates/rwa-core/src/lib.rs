//! # RWA Core
//!
//! Core types and abstractions for the RWA calculation engine.
//!
//! This crate provides the foundational building blocks shared by the
//! validator, the engine and the file adapters:
//!
//! - **Types**: Domain types like `Segment`, `Rating`, `Currency`, `RiskWeight`
//! - **Exposure**: A validated exposure record and its builder
//! - **Dataset**: The raw, untyped table an upload is parsed into
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Closed enums for every categorical input
//! - **Exact Arithmetic**: Amounts and weights are `Decimal`, never `f64`
//! - **Explicit Over Implicit**: Invariants are checked at construction
//!
//! ## Example
//!
//! ```rust
//! use rwa_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let exposure = ExposureBuilder::new(Segment::SmallBusiness)
//!     .id("row-1")
//!     .amount(dec!(200_000))
//!     .currency(Currency::MAD)
//!     .rating(Rating::AAA)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(RiskWeight::SEVENTY_FIVE.apply(exposure.amount).unwrap(), dec!(150_000));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_excessive_bools)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{RwaError, RwaResult};
    pub use crate::types::{
        Collateral, Currency, Dataset, Exposure, ExposureBuilder, LocationClass, MaturityBucket,
        PropertyUsage, Rating, RatingBand, RiskWeight, RowView, Segment,
    };
}

// Re-export commonly used types at crate root
pub use error::{RwaError, RwaResult};
pub use types::{Currency, Dataset, Exposure, ExposureBuilder, Rating, RiskWeight, Segment};
