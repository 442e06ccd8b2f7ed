//! Cell parsers for the scalar column kinds.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a boolean flag.
///
/// Accepts true/false, 1/0, oui/non, yes/no, vrai/faux in any case.
/// Blank cells are handled by the caller and mean `false`.
#[must_use]
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "1.0" | "oui" | "yes" | "vrai" | "o" | "y" => Some(true),
        "false" | "0" | "0.0" | "non" | "no" | "faux" | "n" => Some(false),
        _ => None,
    }
}

/// Parses a decimal amount.
///
/// Spaces and underscores are digit separators. A single comma with no dot
/// is read as the decimal separator ("1500,50"); otherwise commas are
/// thousands separators ("1,500.50"). Scientific notation is accepted.
#[must_use]
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let mut text: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if text.is_empty() {
        return None;
    }

    if text.contains(',') {
        if !text.contains('.') && text.matches(',').count() == 1 {
            text = text.replace(',', ".");
        } else {
            text = text.replace(',', "");
        }
    }

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Parses a PMAE band: an integer 0..=7, optionally written with a zero
/// fraction ("3.0").
#[must_use]
pub fn parse_pmae_band(s: &str) -> Option<u8> {
    let value = parse_decimal(s)?;
    if !value.fract().is_zero() {
        return None;
    }
    let band = value.to_u8()?;
    (band <= 7).then_some(band)
}
