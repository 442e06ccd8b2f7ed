//! Domain types for the RWA engine.
//!
//! - [`Segment`]: Counterparty category selecting the rule set
//! - [`Rating`]: External long-term and short-term grades
//! - [`Currency`]: ISO 4217 currency codes
//! - [`RiskWeight`]: A regulatory weight bounded to [0%, 150%]
//! - [`Exposure`]: One validated exposure record
//! - [`Dataset`]: The raw table an upload is parsed into

mod attributes;
mod currency;
mod dataset;
mod exposure;
mod rating;
mod segment;
mod weight;

pub use attributes::{Collateral, LocationClass, MaturityBucket, PropertyUsage};
pub use currency::Currency;
pub use dataset::{Dataset, RowView};
pub use exposure::{Exposure, ExposureBuilder};
pub use rating::{Rating, RatingBand};
pub use segment::Segment;
pub use weight::RiskWeight;
