//! Weighting rules and per-segment rule sets.

use rwa_core::types::{Exposure, RiskWeight, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Condition, WeightSource};

/// Specificity class of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Named-entity override.
    NamedEntity,
    /// Rating-table lookup.
    RatingBand,
    /// Attribute or threshold band.
    Attribute,
    /// Segment default.
    Default,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NamedEntity => "named entity",
            Self::RatingBand => "rating band",
            Self::Attribute => "attribute",
            Self::Default => "default",
        })
    }
}

/// One entry of a rule set.
///
/// A rule matches when its condition holds and its weight source resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightingRule {
    /// Rule path, e.g. `sovereign.named_entity`.
    pub name: String,
    /// Specificity class.
    pub priority: Priority,
    /// When the rule applies.
    pub condition: Condition,
    /// Where the weight comes from.
    pub weight: WeightSource,
    /// Short human-readable label.
    pub label: String,
}

impl WeightingRule {
    /// Creates a rule named `<segment key>.<id>`.
    pub fn new(
        segment: Segment,
        id: &str,
        priority: Priority,
        condition: Condition,
        weight: WeightSource,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: format!("{}.{id}", segment.key()),
            priority,
            condition,
            weight,
            label: label.into(),
        }
    }

    /// Returns the weight if the rule matches.
    #[must_use]
    pub fn apply(&self, e: &Exposure) -> Option<RiskWeight> {
        if self.condition.holds(e) {
            self.weight.resolve(e)
        } else {
            None
        }
    }
}

/// Outcome of evaluating a rule set.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'a> {
    /// Rule that fired.
    pub rule: &'a WeightingRule,
    /// Resolved weight.
    pub weight: RiskWeight,
}

/// Ordered rules of one segment, closed by an unconditional default.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    segment: Segment,
    rules: Vec<WeightingRule>,
    default: WeightingRule,
    default_weight: RiskWeight,
}

impl RuleSet {
    /// Creates a rule set. The default rule is appended after `rules`.
    pub fn new(
        segment: Segment,
        rules: Vec<WeightingRule>,
        default_id: &str,
        default_weight: RiskWeight,
        default_label: impl Into<String>,
    ) -> Self {
        let default = WeightingRule::new(
            segment,
            default_id,
            Priority::Default,
            Condition::Always,
            WeightSource::Fixed(default_weight),
            default_label,
        );
        Self {
            segment,
            rules,
            default,
            default_weight,
        }
    }

    /// Segment this set applies to.
    #[must_use]
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// All rules in evaluation order, default last.
    pub fn rules(&self) -> impl Iterator<Item = &WeightingRule> {
        self.rules.iter().chain(std::iter::once(&self.default))
    }

    /// Number of rules, default included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len() + 1
    }

    /// Always false: a set has at least its default rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Finds a rule by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&WeightingRule> {
        self.rules().find(|r| r.name == name)
    }

    /// Returns the first matching rule, or the default.
    #[must_use]
    pub fn evaluate(&self, e: &Exposure) -> RuleMatch<'_> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(e).map(|weight| RuleMatch { rule, weight }))
            .unwrap_or(RuleMatch {
                rule: &self.default,
                weight: self.default_weight,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use rwa_core::types::ExposureBuilder;

    fn retail_set() -> RuleSet {
        RuleSet::new(
            Segment::Retail,
            vec![WeightingRule::new(
                Segment::Retail,
                "large_exposure",
                Priority::Attribute,
                Condition::AmountAbove(dec!(1_000_000)),
                WeightSource::Fixed(RiskWeight::HUNDRED),
                "individual above threshold",
            )],
            "standard",
            RiskWeight::SEVENTY_FIVE,
            "individual",
        )
    }

    #[test]
    fn test_first_match_then_default() {
        let set = retail_set();
        let large = ExposureBuilder::new(Segment::Retail)
            .amount(dec!(1_000_001))
            .build()
            .unwrap();
        let small = ExposureBuilder::new(Segment::Retail)
            .amount(dec!(1_000_000))
            .build()
            .unwrap();

        let m = set.evaluate(&large);
        assert_eq!(m.rule.name, "retail.large_exposure");
        assert_eq!(m.weight, RiskWeight::HUNDRED);

        let m = set.evaluate(&small);
        assert_eq!(m.rule.name, "retail.standard");
        assert_eq!(m.rule.priority, Priority::Default);
        assert_eq!(m.weight, RiskWeight::SEVENTY_FIVE);
    }

    #[test]
    fn test_unresolved_source_does_not_match() {
        let rule = WeightingRule::new(
            Segment::Sovereign,
            "pmae",
            Priority::RatingBand,
            Condition::Unrated,
            WeightSource::Pmae(rwa_config::PmaeTable::default()),
            "PMAE",
        );
        let no_band = ExposureBuilder::new(Segment::Sovereign).build().unwrap();
        assert_eq!(rule.apply(&no_band), None);
    }

    #[test]
    fn test_listing() {
        let set = retail_set();
        let names: Vec<&str> = set.rules().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["retail.large_exposure", "retail.standard"]);
        assert_eq!(set.len(), 2);
        assert!(set.rule("retail.standard").is_some());
    }
}
