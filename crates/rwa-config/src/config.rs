//! The complete parameter set of an RWA run.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rwa_core::types::{Currency, RiskWeight};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::segments::{SegmentWeights, SmallBusinessWeights};
use crate::tables::{PmaeTable, WeightTables};

// =============================================================================
// NAMED ENTITIES
// =============================================================================

/// Counterparty keyword lists used by named-entity rules.
///
/// A keyword with a space matches as a substring of the counterparty name;
/// a single word must match a whole word of the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityLists {
    /// Supranational institutions weighted at zero as sovereigns.
    pub supranational: Vec<String>,
    /// Names of the domestic State and central bank.
    pub domestic_sovereign: Vec<String>,
    /// Multilateral development banks weighted at zero.
    pub mdb: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for EntityLists {
    fn default() -> Self {
        Self {
            supranational: strings(&[
                "bis",
                "bri",
                "bank for international settlements",
                "banque des règlements internationaux",
                "imf",
                "fmi",
                "international monetary fund",
                "fonds monétaire international",
                "ecb",
                "bce",
                "european central bank",
                "banque centrale européenne",
                "european commission",
                "commission européenne",
            ]),
            domestic_sovereign: strings(&[
                "maroc",
                "morocco",
                "etat marocain",
                "état marocain",
                "bam",
                "bank al-maghrib",
            ]),
            mdb: strings(&[
                "ibrd",
                "bird",
                "world bank",
                "banque mondiale",
                "ifc",
                "sfi",
                "asian development bank",
                "african development bank",
                "banque africaine de développement",
                "bad",
                "ebrd",
                "berd",
                "inter-american development bank",
                "european investment bank",
                "banque européenne d'investissement",
                "bei",
                "eif",
                "nordic investment bank",
                "islamic development bank",
                "banque islamique de développement",
                "council of europe development bank",
            ]),
        }
    }
}

// =============================================================================
// PROCESSING
// =============================================================================

/// Batch processing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Enable parallel processing (requires the engine's `parallel` feature).
    pub parallel: bool,
    /// Minimum row count to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 1_000,
        }
    }
}

impl ProcessingConfig {
    /// Sequential processing only.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Returns true if a batch of `count` rows should run in parallel.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        self.parallel && count >= self.parallel_threshold
    }
}

// =============================================================================
// RWA CONFIG
// =============================================================================

/// Immutable configuration shared by the validator and the engine.
///
/// Every field has a default, so a configuration file only needs to list
/// the values it overrides.
///
/// # Example
///
/// ```rust
/// use rwa_config::{RwaConfig, Validate};
/// use rwa_core::Currency;
///
/// let config = RwaConfig::from_toml_str(r#"
///     name = "stress"
///
///     [weights.retail]
///     large_exposure_threshold = 500000
/// "#).unwrap();
///
/// assert_eq!(config.domestic_currency, Currency::MAD);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RwaConfig {
    /// Configuration name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Domestic currency.
    pub domestic_currency: Currency,
    /// Currencies accepted in uploads.
    pub allowed_currencies: Vec<Currency>,
    /// Largest value accepted in any amount column.
    pub max_amount: Decimal,
    /// Rating-keyed tables.
    pub tables: WeightTables,
    /// Named-entity keyword lists.
    pub entities: EntityLists,
    /// Fixed weights and thresholds per segment.
    pub weights: SegmentWeights,
    /// Batch processing settings.
    pub processing: ProcessingConfig,
}

impl Default for RwaConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RwaConfig {
    /// Upper bound for `max_amount`.
    ///
    /// Keeps weighted amounts and portfolio totals far inside the `Decimal`
    /// range for any realistic row count.
    pub const AMOUNT_CEILING: Decimal = dec!(100_000_000_000_000_000_000);

    /// Standard parameters of the Moroccan standardised approach.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            name: "STANDARD".to_string(),
            description: Some("Bank Al-Maghrib standardised approach".to_string()),
            domestic_currency: Currency::MAD,
            allowed_currencies: vec![
                Currency::MAD,
                Currency::USD,
                Currency::EUR,
                Currency::GBP,
                Currency::JPY,
                Currency::CHF,
                Currency::CAD,
            ],
            max_amount: dec!(1_000_000_000_000_000),
            tables: WeightTables::default(),
            entities: EntityLists::default(),
            weights: SegmentWeights::default(),
            processing: ProcessingConfig::default(),
        }
    }

    /// Sets the configuration name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the processing settings.
    #[must_use]
    pub fn with_processing(mut self, processing: ProcessingConfig) -> Self {
        self.processing = processing;
        self
    }

    /// Returns true if `amount` does not exceed `max_amount`.
    #[must_use]
    pub fn allows_amount(&self, amount: Decimal) -> bool {
        amount <= self.max_amount
    }

    /// Returns true if `currency` is in the allow-list.
    #[must_use]
    pub fn allows_currency(&self, currency: Currency) -> bool {
        self.allowed_currencies.contains(&currency)
    }

    /// Parses a TOML document and validates it.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses a JSON document and validates it.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Self::from_toml_str(&content),
            "json" => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &str, value: Decimal) {
    if value <= Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            field,
            format!("Value {value} must be positive"),
            "positive",
        ));
    }
}

fn check_pinned(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: RiskWeight,
    expected: RiskWeight,
) {
    if value != expected {
        errors.push(ValidationError::with_rule(
            field,
            format!("Weight {value} is regulatory and must be {expected}"),
            "regulatory_weight",
        ));
    }
}

fn check_keywords(errors: &mut Vec<ValidationError>, field: &str, keywords: &[String]) {
    if keywords.iter().any(|k| k.trim().is_empty()) {
        errors.push(ValidationError::with_rule(
            field,
            "Keyword lists cannot contain blank entries",
            "non_blank_keyword",
        ));
    }
}

impl Validate for RwaConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        if self.allowed_currencies.is_empty() {
            errors.push(ValidationError::with_rule(
                "allowed_currencies",
                "Currency allow-list cannot be empty",
                "non_empty",
            ));
        } else if !self.allows_currency(self.domestic_currency) {
            errors.push(ValidationError::with_rule(
                "allowed_currencies",
                format!(
                    "Domestic currency {} must be in the allow-list",
                    self.domestic_currency
                ),
                "domestic_allowed",
            ));
        }

        check_positive(&mut errors, "max_amount", self.max_amount);
        if self.max_amount > Self::AMOUNT_CEILING {
            errors.push(ValidationError::with_rule(
                "max_amount",
                format!(
                    "Value {} exceeds the ceiling {}",
                    self.max_amount,
                    Self::AMOUNT_CEILING
                ),
                "amount_ceiling",
            ));
        }

        check_pinned(
            &mut errors,
            "weights.small_business.fixed",
            self.weights.small_business.fixed,
            SmallBusinessWeights::REGULATORY,
        );
        check_pinned(
            &mut errors,
            "weights.sovereign.supranational",
            self.weights.sovereign.supranational,
            RiskWeight::ZERO,
        );
        if !self.tables.pmae.is_standard() {
            errors.push(ValidationError::with_rule(
                "tables.pmae",
                "PMAE band weights are regulatory and must be 0, 0, 20, 50, 100, 100, 100, 150%",
                "regulatory_weight",
            ));
        }

        check_keywords(&mut errors, "entities.supranational", &self.entities.supranational);
        check_keywords(
            &mut errors,
            "entities.domestic_sovereign",
            &self.entities.domestic_sovereign,
        );
        check_keywords(&mut errors, "entities.mdb", &self.entities.mdb);

        check_positive(
            &mut errors,
            "weights.retail.large_exposure_threshold",
            self.weights.retail.large_exposure_threshold,
        );
        check_positive(
            &mut errors,
            "weights.real_estate.state_convention_max_ltv",
            self.weights.real_estate.state_convention_max_ltv,
        );

        let np = &self.weights.non_performing;
        check_positive(
            &mut errors,
            "weights.non_performing.low_provision_ratio",
            np.low_provision_ratio,
        );
        check_positive(
            &mut errors,
            "weights.non_performing.high_provision_ratio",
            np.high_provision_ratio,
        );
        if np.low_provision_ratio > np.high_provision_ratio {
            errors.push(ValidationError::with_rule(
                "weights.non_performing",
                format!(
                    "Low provision ratio {} exceeds high provision ratio {}",
                    np.low_provision_ratio, np.high_provision_ratio
                ),
                "ordered_thresholds",
            ));
        }

        if self.processing.parallel_threshold == 0 {
            errors.push(ValidationError::with_rule(
                "processing.parallel_threshold",
                "Parallel threshold must be at least 1",
                "positive",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use rwa_core::types::RiskWeight;

    #[test]
    fn test_standard_is_valid() {
        let config = RwaConfig::standard();
        assert!(config.is_valid(), "{:?}", config.validate());
        assert_eq!(config.allowed_currencies.len(), 7);
        assert!(config.allows_currency(Currency::CAD));
        assert!(!config.allows_currency(Currency::AUD));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = RwaConfig::from_toml_str(
            r#"
            name = "override"
            max_amount = 5000000

            [weights.credit_institution.location]
            foreign = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "override");
        assert_eq!(config.max_amount, dec!(5_000_000));
        assert!(config.allows_amount(dec!(5_000_000)));
        assert!(!config.allows_amount(dec!(5_000_000.01)));
        assert_eq!(config.weights.small_business.fixed, RiskWeight::SEVENTY_FIVE);
        assert_eq!(
            config.weights.credit_institution.location.foreign,
            Some(RiskWeight::HUNDRED)
        );
        assert_eq!(config.weights.credit_institution.location.domestic, None);
        assert_eq!(config.tables, WeightTables::default());
    }

    #[test]
    fn test_small_business_weight_cannot_be_overridden() {
        let toml = "[weights.small_business]\nfixed = 0.5\n";
        let err = RwaConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.to_string().contains("weights.small_business.fixed"));

        let toml = "[weights.small_business]\nfixed = 0.75\n";
        let config = RwaConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.weights.small_business.fixed, RiskWeight::SEVENTY_FIVE);
    }

    #[test]
    fn test_pmae_table_cannot_be_overridden() {
        let toml = "[tables]\npmae = [0.0, 0.0, 0.2, 0.5, 1.0, 1.0, 1.0, 1.0]\n";
        let err = RwaConfig::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("tables.pmae"));

        let mut config = RwaConfig::standard();
        config.weights.sovereign.supranational = RiskWeight::TWENTY;
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["weights.sovereign.supranational".to_string()]);
    }

    #[test]
    fn test_max_amount_bounds() {
        assert!(RwaConfig::from_toml_str("max_amount = 0").is_err());

        let mut config = RwaConfig::standard();
        config.max_amount = RwaConfig::AMOUNT_CEILING;
        assert!(config.is_valid());
        config.max_amount = RwaConfig::AMOUNT_CEILING + dec!(1);
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "max_amount");
    }

    #[test]
    fn test_json_overrides() {
        let config =
            RwaConfig::from_json_str(r#"{"allowed_currencies": ["MAD", "EUR"]}"#).unwrap();
        assert_eq!(config.allowed_currencies, vec![Currency::MAD, Currency::EUR]);
    }

    #[test]
    fn test_domestic_currency_must_be_allowed() {
        let err = RwaConfig::from_json_str(r#"{"allowed_currencies": ["EUR"]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.to_string().contains("allowed_currencies"));
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = RwaConfig::standard().with_name("");
        config.allowed_currencies.clear();
        config.weights.non_performing.low_provision_ratio = dec!(0.6);
        config.entities.mdb.push("  ".to_string());

        let errors = config.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"allowed_currencies"));
        assert!(fields.contains(&"weights.non_performing"));
        assert!(fields.contains(&"entities.mdb"));
        assert!(matches!(
            config.validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(_))
        ));
    }

    #[test]
    fn test_weight_above_cap_is_a_deserialization_error() {
        let err = RwaConfig::from_toml_str("[weights.retail]\nstandard = 1.6\n").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn test_should_parallelize() {
        let processing = ProcessingConfig {
            parallel: true,
            parallel_threshold: 10,
        };
        assert!(!processing.should_parallelize(9));
        assert!(processing.should_parallelize(10));
        assert!(!ProcessingConfig::sequential().should_parallelize(1_000_000));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RwaConfig::standard();
        let text = config.to_toml_string().unwrap();
        let parsed = RwaConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
