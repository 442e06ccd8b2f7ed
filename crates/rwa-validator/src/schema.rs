//! Upload schema.
//!
//! Column names follow the uploaded-file format. Every required column must
//! be present in the header, even if its cells are blank for most rows.

use serde::{Deserialize, Serialize};
use std::fmt;

use columns as c;

/// Column names of the upload format.
pub mod columns {
    /// Counterparty segment.
    pub const SEGMENT: &str = "segment";
    /// Counterparty name or sub-segment.
    pub const SOUS_SEGMENT: &str = "sous_segment";
    /// Currency code.
    pub const MONNAIE: &str = "monnaie";
    /// External rating.
    pub const NOTE_EXTERNE: &str = "note_externe";
    /// Country-risk band.
    pub const NOTE_PMAE: &str = "note_pmae";
    /// Repayment provided in the State budget.
    pub const REMBOURSEMENT_BUDGET: &str = "remboursement_budget";
    /// Past-due flag.
    pub const CREANCE_SOUFFRANCE: &str = "creance_souffrance";
    /// Initial maturity bucket.
    pub const ECHEANCE_INITIALE: &str = "echeance_initiale";
    /// Residual maturity bucket.
    pub const ECHEANCE: &str = "echeance";
    /// Short-term rating.
    pub const NOTE_INF_1_AN: &str = "note_inf_1_an";
    /// Long-term rating, used when `note_externe` is blank.
    pub const NOTE_SUP_1_AN: &str = "note_sup_1_an";
    /// Listed or approved by the regulator.
    pub const ACCORD_BANK_MAGHRIB: &str = "accord_bank_maghrib";
    /// Member of a group.
    pub const APPART_GRPE: &str = "appart_grpe";
    /// Bank debt.
    pub const DETTE_BANC: &str = "dette_banc";
    /// Gross amount.
    pub const MONTANT: &str = "montant";
    /// Mortgage guarantee.
    pub const GARANTI_HYPOTHEQUE: &str = "garanti_hypotheque";
    /// Property usage.
    pub const USAGE: &str = "usage";
    /// State convention.
    pub const CONVENTION_ETAT: &str = "convention_etat";
    /// Property value.
    pub const VALEUR_BIEN_HYPOTEQ: &str = "valeur_bien_hypoteq";
    /// Outstanding amount of a claim in default.
    pub const VALEUR_ENCOURS_CREANCE: &str = "valeur_encours_creance";
    /// Provisions booked.
    pub const PROVISION_CONSTITUE: &str = "provision_constitue";
    /// Location class (optional).
    pub const LOCALISATION: &str = "localisation";
    /// Row identifier (optional).
    pub const ID: &str = "id";
}

/// What a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free text.
    Text,
    /// Segment code.
    Segment,
    /// Currency from the allow-list.
    Currency,
    /// Long-term or short-term rating, or UNRATED.
    Rating,
    /// Long-term rating or UNRATED.
    LongTermRating,
    /// A-1, A-2 or A-3.
    ShortTermRating,
    /// Integer 0..=7.
    PmaeBand,
    /// Boolean flag.
    Boolean,
    /// Maturity bucket.
    Maturity,
    /// Non-negative decimal.
    Amount,
    /// Property usage.
    Usage,
    /// Location class.
    Location,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Text => "text",
            Self::Segment => "segment",
            Self::Currency => "currency",
            Self::Rating => "rating",
            Self::LongTermRating => "long-term rating",
            Self::ShortTermRating => "short-term rating",
            Self::PmaeBand => "PMAE band",
            Self::Boolean => "boolean",
            Self::Maturity => "maturity",
            Self::Amount => "amount",
            Self::Usage => "property usage",
            Self::Location => "location",
        };
        f.write_str(label)
    }
}

/// One column of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Header name.
    pub name: &'static str,
    /// Content kind.
    pub kind: ColumnKind,
    /// Must be present in the header.
    pub required: bool,
}

impl ColumnSpec {
    const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// The upload schema: 21 required columns followed by the optional ones.
pub const SCHEMA: [ColumnSpec; 23] = [
    ColumnSpec::required(c::SEGMENT, ColumnKind::Segment),
    ColumnSpec::required(c::SOUS_SEGMENT, ColumnKind::Text),
    ColumnSpec::required(c::MONNAIE, ColumnKind::Currency),
    ColumnSpec::required(c::NOTE_EXTERNE, ColumnKind::Rating),
    ColumnSpec::required(c::NOTE_PMAE, ColumnKind::PmaeBand),
    ColumnSpec::required(c::REMBOURSEMENT_BUDGET, ColumnKind::Boolean),
    ColumnSpec::required(c::CREANCE_SOUFFRANCE, ColumnKind::Boolean),
    ColumnSpec::required(c::ECHEANCE_INITIALE, ColumnKind::Maturity),
    ColumnSpec::required(c::ECHEANCE, ColumnKind::Maturity),
    ColumnSpec::required(c::NOTE_INF_1_AN, ColumnKind::ShortTermRating),
    ColumnSpec::required(c::NOTE_SUP_1_AN, ColumnKind::LongTermRating),
    ColumnSpec::required(c::ACCORD_BANK_MAGHRIB, ColumnKind::Boolean),
    ColumnSpec::required(c::APPART_GRPE, ColumnKind::Boolean),
    ColumnSpec::required(c::DETTE_BANC, ColumnKind::Amount),
    ColumnSpec::required(c::MONTANT, ColumnKind::Amount),
    ColumnSpec::required(c::GARANTI_HYPOTHEQUE, ColumnKind::Boolean),
    ColumnSpec::required(c::USAGE, ColumnKind::Usage),
    ColumnSpec::required(c::CONVENTION_ETAT, ColumnKind::Boolean),
    ColumnSpec::required(c::VALEUR_BIEN_HYPOTEQ, ColumnKind::Amount),
    ColumnSpec::required(c::VALEUR_ENCOURS_CREANCE, ColumnKind::Amount),
    ColumnSpec::required(c::PROVISION_CONSTITUE, ColumnKind::Amount),
    ColumnSpec::optional(c::LOCALISATION, ColumnKind::Location),
    ColumnSpec::optional(c::ID, ColumnKind::Text),
];

/// Iterates over the required columns.
pub fn required_columns() -> impl Iterator<Item = &'static ColumnSpec> {
    SCHEMA.iter().filter(|spec| spec.required)
}

/// Looks up a column by name (case-insensitive).
#[must_use]
pub fn column(name: &str) -> Option<&'static ColumnSpec> {
    SCHEMA
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_one_required_columns() {
        assert_eq!(required_columns().count(), 21);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = SCHEMA.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SCHEMA.len());
    }

    #[test]
    fn test_column_lookup() {
        let spec = column("MONTANT").unwrap();
        assert_eq!(spec.kind, ColumnKind::Amount);
        assert!(spec.required);
        assert!(!column("localisation").unwrap().required);
        assert!(column("comment").is_none());
    }
}
