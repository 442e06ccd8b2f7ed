//! CLI command implementations.

pub mod calculate;
pub mod rules;
pub mod validate;

pub use calculate::CalculateArgs;
pub use rules::RulesArgs;
pub use validate::ValidateArgs;

use rwa_core::types::Segment;

use crate::error::CliError;

/// Parses a segment code or alias (`souverain`, `tpe`, `retail`, ...).
pub fn parse_segment(s: &str) -> Result<Segment, CliError> {
    Segment::parse(s).ok_or_else(|| CliError::UnknownSegment(s.to_string()))
}
