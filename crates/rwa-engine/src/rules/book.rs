//! The standard rule book, built from configuration.

use std::collections::BTreeMap;

use rwa_config::RwaConfig;
use rwa_core::types::{PropertyUsage, Segment};

use super::{Condition, Flag, Priority, RuleSet, WeightSource, WeightingRule};

/// Rule sets for every segment.
///
/// Built once from an [`RwaConfig`] and shared read-only by calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBook {
    sets: BTreeMap<Segment, RuleSet>,
}

impl RuleBook {
    /// Builds the rule book for a configuration.
    #[must_use]
    pub fn from_config(config: &RwaConfig) -> Self {
        let sets = Segment::ALL
            .iter()
            .map(|&segment| (segment, build_set(segment, config)))
            .collect();
        Self { sets }
    }

    /// Rule set of a segment.
    #[must_use]
    pub fn rule_set(&self, segment: Segment) -> &RuleSet {
        // every segment is populated in from_config
        &self.sets[&segment]
    }

    /// Iterates over all rule sets in segment order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleSet> {
        self.sets.values()
    }

    /// Finds a rule by its full name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&WeightingRule> {
        self.iter().find_map(|set| set.rule(name))
    }

    /// Total number of rules, defaults included.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.iter().map(RuleSet::len).sum()
    }
}

fn build_set(segment: Segment, config: &RwaConfig) -> RuleSet {
    let tables = &config.tables;
    let w = &config.weights;
    let rule = |id, priority, condition, weight, label: &str| {
        WeightingRule::new(segment, id, priority, condition, weight, label)
    };
    let general = || WeightSource::LongTerm {
        table: "general",
        values: tables.general,
    };

    match segment {
        Segment::Sovereign => RuleSet::new(
            segment,
            vec![
                rule(
                    "named_entity",
                    Priority::NamedEntity,
                    Condition::counterparty_in("supranational", &config.entities.supranational),
                    WeightSource::Fixed(w.sovereign.supranational),
                    "supranational institution",
                ),
                rule(
                    "domestic",
                    Priority::NamedEntity,
                    Condition::All(vec![
                        Condition::counterparty_in(
                            "domestic sovereign",
                            &config.entities.domestic_sovereign,
                        ),
                        Condition::CurrencyIs(config.domestic_currency),
                    ]),
                    WeightSource::Fixed(w.sovereign.domestic),
                    "domestic State or central bank in domestic currency",
                ),
                rule(
                    "rating",
                    Priority::RatingBand,
                    Condition::Rated,
                    WeightSource::LongTerm {
                        table: "sovereign",
                        values: tables.sovereign,
                    },
                    "sovereign rating",
                ),
                rule(
                    "pmae",
                    Priority::RatingBand,
                    Condition::Unrated,
                    WeightSource::Pmae(tables.pmae),
                    "unrated sovereign with PMAE band",
                ),
            ],
            "default",
            w.sovereign.default,
            "unrated sovereign",
        ),
        Segment::PublicSector => RuleSet::new(
            segment,
            vec![
                rule(
                    "budget_repayment",
                    Priority::Attribute,
                    Condition::Flag(Flag::BudgetRepayment),
                    WeightSource::Fixed(w.public_sector.budget_repayment),
                    "repayment provided in State budget",
                ),
                rule(
                    "rating",
                    Priority::RatingBand,
                    Condition::Rated,
                    general(),
                    "public sector rating",
                ),
            ],
            "default",
            w.public_sector.default,
            "unrated public sector entity",
        ),
        Segment::Mdb => RuleSet::new(
            segment,
            vec![
                rule(
                    "named_entity",
                    Priority::NamedEntity,
                    Condition::Any(vec![
                        Condition::Flag(Flag::RegulatorListed),
                        Condition::counterparty_in("MDB", &config.entities.mdb),
                    ]),
                    WeightSource::Fixed(w.mdb.named_entity),
                    "listed multilateral development bank",
                ),
                rule(
                    "rating",
                    Priority::RatingBand,
                    Condition::Rated,
                    WeightSource::LongTerm {
                        table: "MDB",
                        values: tables.mdb,
                    },
                    "MDB rating",
                ),
            ],
            "default",
            w.mdb.default,
            "unrated MDB",
        ),
        Segment::CreditInstitution => RuleSet::new(
            segment,
            vec![
                rule(
                    "short_term_rating",
                    Priority::RatingBand,
                    Condition::InitialMaturityUnderOneYear,
                    WeightSource::ShortTerm(tables.short_term),
                    "short-term claim on institution",
                ),
                rule(
                    "rating",
                    Priority::RatingBand,
                    Condition::Rated,
                    general(),
                    "institution rating",
                ),
                rule(
                    "domestic_short_term",
                    Priority::Attribute,
                    Condition::All(vec![
                        Condition::Unrated,
                        Condition::InitialMaturityUpToThreeMonths,
                        Condition::CurrencyIs(config.domestic_currency),
                    ]),
                    WeightSource::Fixed(w.credit_institution.domestic_short_term),
                    "unrated claim of at most 3 months in domestic currency",
                ),
                rule(
                    "location",
                    Priority::Attribute,
                    Condition::Unrated,
                    WeightSource::Location(w.credit_institution.location),
                    "unrated institution by location",
                ),
            ],
            "default",
            w.credit_institution.default,
            "unrated institution",
        ),
        Segment::Enterprise => RuleSet::new(
            segment,
            vec![
                rule(
                    "short_term_rating",
                    Priority::RatingBand,
                    Condition::ResidualMaturityUnderOneYear,
                    WeightSource::ShortTerm(tables.short_term),
                    "short-term claim on enterprise",
                ),
                rule(
                    "regulator_agreement",
                    Priority::Attribute,
                    Condition::Flag(Flag::RegulatorListed),
                    WeightSource::Fixed(w.enterprise.regulator_agreement),
                    "single weight under regulator agreement",
                ),
                rule(
                    "group_member",
                    Priority::Attribute,
                    Condition::Flag(Flag::GroupMember),
                    WeightSource::Fixed(w.enterprise.group_member),
                    "group member",
                ),
                rule(
                    "rating",
                    Priority::RatingBand,
                    Condition::Rated,
                    general(),
                    "enterprise rating",
                ),
            ],
            "unrated",
            w.enterprise.unrated,
            "unrated enterprise",
        ),
        Segment::SmallBusiness => RuleSet::new(
            segment,
            Vec::new(),
            "fixed",
            w.small_business.fixed,
            "very small enterprise",
        ),
        Segment::Retail => RuleSet::new(
            segment,
            vec![rule(
                "large_exposure",
                Priority::Attribute,
                Condition::AmountAbove(w.retail.large_exposure_threshold),
                WeightSource::Fixed(w.retail.large_exposure),
                "individual above amount threshold",
            )],
            "standard",
            w.retail.standard,
            "individual",
        ),
        Segment::RealEstate => RuleSet::new(
            segment,
            vec![
                rule(
                    "residential",
                    Priority::Attribute,
                    Condition::UsageIs(PropertyUsage::Residential),
                    WeightSource::Fixed(w.real_estate.residential),
                    "residential property",
                ),
                rule(
                    "commercial_mortgage",
                    Priority::Attribute,
                    Condition::All(vec![
                        Condition::UsageIs(PropertyUsage::Commercial),
                        Condition::Flag(Flag::MortgageGuaranteed),
                    ]),
                    WeightSource::Fixed(w.real_estate.commercial_mortgage),
                    "commercial property with mortgage guarantee",
                ),
                rule(
                    "leasing",
                    Priority::Attribute,
                    Condition::UsageIs(PropertyUsage::Leasing),
                    WeightSource::Fixed(w.real_estate.leasing),
                    "lease with purchase option",
                ),
                rule(
                    "state_convention",
                    Priority::Attribute,
                    Condition::All(vec![
                        Condition::Flag(Flag::StateConvention),
                        Condition::LtvAtMost(w.real_estate.state_convention_max_ltv),
                    ]),
                    WeightSource::Fixed(w.real_estate.state_convention),
                    "State convention within LTV cap",
                ),
            ],
            "default",
            w.real_estate.default,
            "real estate",
        ),
        Segment::NonPerforming => {
            let np = &w.non_performing;
            RuleSet::new(
                segment,
                vec![
                    rule(
                        "no_outstanding",
                        Priority::Attribute,
                        Condition::NoOutstanding,
                        WeightSource::Fixed(np.no_outstanding),
                        "nothing outstanding",
                    ),
                    rule(
                        "residential_low",
                        Priority::Attribute,
                        Condition::All(vec![
                            Condition::UsageIs(PropertyUsage::Residential),
                            Condition::ProvisionRatioBelow(np.low_provision_ratio),
                        ]),
                        WeightSource::Fixed(np.residential_low),
                        "residential claim, low provisions",
                    ),
                    rule(
                        "residential_high",
                        Priority::Attribute,
                        Condition::UsageIs(PropertyUsage::Residential),
                        WeightSource::Fixed(np.residential_high),
                        "residential claim, provisioned",
                    ),
                    rule(
                        "low_provision",
                        Priority::Attribute,
                        Condition::ProvisionRatioBelow(np.low_provision_ratio),
                        WeightSource::Fixed(np.other_low),
                        "low provisions",
                    ),
                    rule(
                        "mid_provision",
                        Priority::Attribute,
                        Condition::ProvisionRatioAtMost(np.high_provision_ratio),
                        WeightSource::Fixed(np.other_mid),
                        "partial provisions",
                    ),
                ],
                "high_provision",
                np.other_high,
                "high provisions",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use rwa_config::LocationWeights;
    use rwa_core::types::{
        Collateral, Currency, ExposureBuilder, LocationClass, MaturityBucket, Rating, RiskWeight,
    };

    fn book() -> RuleBook {
        RuleBook::from_config(&RwaConfig::standard())
    }

    fn rule_for(book: &RuleBook, builder: ExposureBuilder) -> (String, RiskWeight) {
        let e = builder.build().unwrap();
        let m = book.rule_set(e.segment).evaluate(&e);
        (m.rule.name.clone(), m.weight)
    }

    #[test]
    fn test_every_segment_has_a_set() {
        let book = book();
        assert_eq!(book.iter().count(), Segment::ALL.len());
        for set in book.iter() {
            let last = set.rules().last().unwrap();
            assert_eq!(last.priority, Priority::Default);
            assert_eq!(last.condition, Condition::Always);
        }
        assert!(book.rule("sovereign.pmae").is_some());
        assert!(book.rule("nope").is_none());
    }

    #[test]
    fn test_sovereign_rules() {
        let book = book();
        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::Sovereign)
                .counterparty("European Central Bank")
                .rating(Rating::BMinus),
        );
        assert_eq!(name, "sovereign.named_entity");
        assert_eq!(w, RiskWeight::ZERO);

        let (name, _) = rule_for(
            &book,
            ExposureBuilder::new(Segment::Sovereign)
                .counterparty("Bank Al-Maghrib")
                .currency(Currency::MAD)
                .rating(Rating::BB),
        );
        assert_eq!(name, "sovereign.domestic");

        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::Sovereign)
                .counterparty("Bank Al-Maghrib")
                .currency(Currency::EUR)
                .rating(Rating::A),
        );
        assert_eq!(name, "sovereign.rating");
        assert_eq!(w, RiskWeight::TWENTY);

        let (name, w) = rule_for(&book, ExposureBuilder::new(Segment::Sovereign).pmae_band(7));
        assert_eq!(name, "sovereign.pmae");
        assert_eq!(w, RiskWeight::HUNDRED_FIFTY);

        let (name, w) = rule_for(&book, ExposureBuilder::new(Segment::Sovereign));
        assert_eq!(name, "sovereign.default");
        assert_eq!(w, RiskWeight::HUNDRED);
    }

    #[test]
    fn test_credit_institution_rules() {
        let book = book();
        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::CreditInstitution)
                .initial_maturity(MaturityBucket::UnderOneYear)
                .short_term_rating(Rating::A2)
                .rating(Rating::AAA),
        );
        assert_eq!(name, "credit_institution.short_term_rating");
        assert_eq!(w, RiskWeight::FIFTY);

        // short-term bucket without a short-term grade falls through
        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::CreditInstitution)
                .initial_maturity(MaturityBucket::UnderOneYear)
                .rating(Rating::AAA),
        );
        assert_eq!(name, "credit_institution.rating");
        assert_eq!(w, RiskWeight::TWENTY);

        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::CreditInstitution)
                .initial_maturity(MaturityBucket::UpToThreeMonths)
                .currency(Currency::MAD),
        );
        assert_eq!(name, "credit_institution.domestic_short_term");
        assert_eq!(w, RiskWeight::TWENTY);

        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::CreditInstitution)
                .currency(Currency::USD)
                .location(LocationClass::Foreign),
        );
        assert_eq!(name, "credit_institution.default");
        assert_eq!(w, RiskWeight::FIFTY);
    }

    #[test]
    fn test_location_weight_from_config() {
        let mut config = RwaConfig::standard();
        config.weights.credit_institution.location = LocationWeights {
            domestic: None,
            foreign: Some(RiskWeight::HUNDRED),
        };
        let book = RuleBook::from_config(&config);
        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::CreditInstitution).location(LocationClass::Foreign),
        );
        assert_eq!(name, "credit_institution.location");
        assert_eq!(w, RiskWeight::HUNDRED);
    }

    #[test]
    fn test_enterprise_rules() {
        let book = book();
        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::Enterprise)
                .group_member(true)
                .rating(Rating::AA),
        );
        assert_eq!(name, "enterprise.group_member");
        assert_eq!(w, RiskWeight::HUNDRED_FIFTY);

        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::Enterprise)
                .regulator_listed(true)
                .group_member(true),
        );
        assert_eq!(name, "enterprise.regulator_agreement");
        assert_eq!(w, RiskWeight::HUNDRED);

        let (name, w) = rule_for(&book, ExposureBuilder::new(Segment::Enterprise));
        assert_eq!(name, "enterprise.unrated");
        assert_eq!(w, RiskWeight::HUNDRED);
    }

    #[test]
    fn test_real_estate_rules() {
        let book = book();
        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::RealEstate)
                .collateral(Collateral::new(PropertyUsage::Commercial).with_value(dec!(100)))
                .mortgage_guaranteed(true),
        );
        assert_eq!(name, "real_estate.commercial_mortgage");
        assert_eq!(w, RiskWeight::HUNDRED);

        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::RealEstate)
                .amount(dec!(80))
                .collateral(Collateral::new(PropertyUsage::Commercial).with_value(dec!(100)))
                .state_convention(true),
        );
        assert_eq!(name, "real_estate.state_convention");
        assert_eq!(w, RiskWeight::SEVENTY_FIVE);

        let (name, w) = rule_for(
            &book,
            ExposureBuilder::new(Segment::RealEstate)
                .amount(dec!(81))
                .collateral(Collateral::new(PropertyUsage::Commercial).with_value(dec!(100)))
                .state_convention(true),
        );
        assert_eq!(name, "real_estate.default");
        assert_eq!(w, RiskWeight::THIRTY_FIVE);
    }

    #[test]
    fn test_non_performing_rules() {
        let book = book();
        let claim = |usage: PropertyUsage, provisions| {
            ExposureBuilder::new(Segment::NonPerforming)
                .collateral(Collateral::new(usage))
                .outstanding(dec!(100))
                .provisions(provisions)
        };

        let residential = PropertyUsage::Residential;
        let commercial = PropertyUsage::Commercial;
        let cases = [
            (residential, dec!(19), "residential_low", RiskWeight::HUNDRED),
            (residential, dec!(20), "residential_high", RiskWeight::FIFTY),
            (commercial, dec!(10), "low_provision", RiskWeight::HUNDRED_FIFTY),
            (commercial, dec!(50), "mid_provision", RiskWeight::HUNDRED),
            (commercial, dec!(51), "high_provision", RiskWeight::FIFTY),
        ];
        for (usage, provisions, expected, weight) in cases {
            let (name, w) = rule_for(&book, claim(usage, provisions));
            assert_eq!(name, format!("non_performing.{expected}"));
            assert_eq!(w, weight);
        }

        let (name, w) = rule_for(&book, ExposureBuilder::new(Segment::NonPerforming));
        assert_eq!(name, "non_performing.no_outstanding");
        assert_eq!(w, RiskWeight::HUNDRED_FIFTY);
    }
}
