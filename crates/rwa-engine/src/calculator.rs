//! Row-wise RWA calculation.

use std::sync::Arc;

use rwa_config::{ProcessingConfig, RwaConfig};
use rwa_core::error::RwaResult;
use rwa_core::types::Exposure;

use crate::parallel::maybe_parallel_map;
use crate::result::CalculationResult;
use crate::rules::RuleBook;

/// Applies the rule book to exposures.
///
/// The calculator is cheap to clone; the rule book is shared read-only.
///
/// # Example
///
/// ```rust
/// use rwa_config::RwaConfig;
/// use rwa_core::prelude::*;
/// use rwa_engine::RwaCalculator;
/// use rust_decimal_macros::dec;
///
/// let calculator = RwaCalculator::new(&RwaConfig::standard());
/// let exposure = ExposureBuilder::new(Segment::Enterprise)
///     .amount(dec!(500_000))
///     .build()
///     .unwrap();
///
/// let result = calculator.calculate(&exposure).unwrap();
/// assert_eq!(result.weight, RiskWeight::HUNDRED);
/// assert_eq!(result.risk_weighted_amount, dec!(500_000));
/// assert_eq!(result.rule, "enterprise.unrated");
/// ```
#[derive(Debug, Clone)]
pub struct RwaCalculator {
    rules: Arc<RuleBook>,
    processing: ProcessingConfig,
}

impl RwaCalculator {
    /// Builds the rule book from a configuration.
    #[must_use]
    pub fn new(config: &RwaConfig) -> Self {
        Self::with_rules(Arc::new(RuleBook::from_config(config)), config.processing)
    }

    /// Uses an existing rule book.
    #[must_use]
    pub fn with_rules(rules: Arc<RuleBook>, processing: ProcessingConfig) -> Self {
        Self { rules, processing }
    }

    /// The rule book in use.
    #[must_use]
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Weights a single exposure, reported at row 0.
    ///
    /// Fails only when the weighted amount leaves the `Decimal` range.
    pub fn calculate(&self, exposure: &Exposure) -> RwaResult<CalculationResult> {
        self.calculate_at(0, exposure)
    }

    /// Weights a single exposure at a given batch position.
    pub fn calculate_at(
        &self,
        row_index: usize,
        exposure: &Exposure,
    ) -> RwaResult<CalculationResult> {
        let set = self.rules.rule_set(exposure.segment);
        let matched = set.evaluate(exposure);
        let rule = matched.rule;
        let weight = matched.weight;

        let explanation = match rule.weight.detail(exposure) {
            Some(detail) => format!("{} ({detail}) - weight {weight}", rule.label),
            None => format!("{} - weight {weight}", rule.label),
        };

        let risk_weighted_amount = weight.apply(exposure.amount).map_err(|err| {
            tracing::warn!(row = row_index, id = %exposure.id, %err, "weighting failed");
            err
        })?;

        tracing::trace!(
            row = row_index,
            id = %exposure.id,
            rule = %rule.name,
            weight = %weight,
            "rule matched"
        );

        Ok(CalculationResult {
            row_index,
            exposure_id: exposure.id.clone(),
            segment: exposure.segment,
            currency: exposure.currency,
            amount: exposure.amount,
            weight,
            risk_weighted_amount,
            rule: rule.name.clone(),
            priority: rule.priority,
            explanation,
            past_due: exposure.past_due,
        })
    }

    /// Weights a batch, one result per exposure in input order.
    ///
    /// The first row whose weighted amount overflows fails the batch.
    pub fn calculate_batch(&self, exposures: &[Exposure]) -> RwaResult<Vec<CalculationResult>> {
        let parallel = self.processing.should_parallelize(exposures.len());
        tracing::debug!(rows = exposures.len(), parallel, "calculating batch");

        let results = maybe_parallel_map(exposures, &self.processing, |i, e| {
            self.calculate_at(i, e)
        })
        .into_iter()
        .collect::<RwaResult<Vec<_>>>()?;

        let defaults = results.iter().filter(|r| r.is_default()).count();
        tracing::info!(rows = results.len(), defaults, "batch calculated");
        Ok(results)
    }
}
