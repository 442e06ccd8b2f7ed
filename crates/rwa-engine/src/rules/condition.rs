//! Rule conditions.

use rust_decimal::Decimal;
use rwa_core::types::{Currency, Exposure, MaturityBucket, PropertyUsage};
use std::fmt;
use std::sync::Arc;

/// Boolean attribute of an exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Repayment provided in the State budget.
    BudgetRepayment,
    /// Listed or approved by the regulator.
    RegulatorListed,
    /// Member of a group.
    GroupMember,
    /// Guaranteed by a mortgage.
    MortgageGuaranteed,
    /// Granted under a State convention.
    StateConvention,
}

impl Flag {
    fn get(self, e: &Exposure) -> bool {
        match self {
            Self::BudgetRepayment => e.budget_repayment,
            Self::RegulatorListed => e.regulator_listed,
            Self::GroupMember => e.group_member,
            Self::MortgageGuaranteed => e.mortgage_guaranteed,
            Self::StateConvention => e.state_convention,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::BudgetRepayment => "repayment in State budget",
            Self::RegulatorListed => "regulator listed/approved",
            Self::GroupMember => "group member",
            Self::MortgageGuaranteed => "mortgage guaranteed",
            Self::StateConvention => "State convention",
        }
    }
}

/// Predicate over an exposure.
///
/// Conditions are plain data so rule sets can be listed and inspected.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Always holds.
    Always,
    /// Counterparty name matches one of the keywords.
    CounterpartyIn {
        /// Name of the keyword list, for display.
        list: &'static str,
        /// Keywords.
        keywords: Arc<[String]>,
    },
    /// Exposure is denominated in the given currency.
    CurrencyIs(Currency),
    /// Boolean attribute is set.
    Flag(Flag),
    /// Has a long-term rating.
    Rated,
    /// Has no long-term rating.
    Unrated,
    /// Initial maturity under one year.
    InitialMaturityUnderOneYear,
    /// Initial maturity of three months or less.
    InitialMaturityUpToThreeMonths,
    /// Residual maturity under one year.
    ResidualMaturityUnderOneYear,
    /// Amount strictly above the threshold.
    AmountAbove(Decimal),
    /// Property collateral of the given usage.
    UsageIs(PropertyUsage),
    /// Loan-to-value known and at most the cap.
    LtvAtMost(Decimal),
    /// Nothing outstanding on a claim in default.
    NoOutstanding,
    /// Provision ratio strictly below the threshold.
    ProvisionRatioBelow(Decimal),
    /// Provision ratio at most the threshold.
    ProvisionRatioAtMost(Decimal),
    /// All conditions hold.
    All(Vec<Condition>),
    /// At least one condition holds.
    Any(Vec<Condition>),
}

impl Condition {
    /// Matches the counterparty against a keyword list.
    pub fn counterparty_in(list: &'static str, keywords: &[String]) -> Self {
        Self::CounterpartyIn {
            list,
            keywords: keywords.into(),
        }
    }

    /// Evaluates the condition.
    #[must_use]
    pub fn holds(&self, e: &Exposure) -> bool {
        match self {
            Self::Always => true,
            Self::CounterpartyIn { keywords, .. } => e.counterparty_matches(&keywords[..]),
            Self::CurrencyIs(currency) => e.currency == *currency,
            Self::Flag(flag) => flag.get(e),
            Self::Rated => e.rating.is_long_term(),
            Self::Unrated => !e.rating.is_long_term(),
            Self::InitialMaturityUnderOneYear => {
                e.initial_maturity.is_some_and(|m| m.is_under_one_year())
            }
            Self::InitialMaturityUpToThreeMonths => e
                .initial_maturity
                .is_some_and(|m| m == MaturityBucket::UpToThreeMonths),
            Self::ResidualMaturityUnderOneYear => {
                e.residual_maturity.is_some_and(|m| m.is_under_one_year())
            }
            Self::AmountAbove(threshold) => e.amount > *threshold,
            Self::UsageIs(usage) => e.collateral.is_some_and(|c| c.usage == *usage),
            Self::LtvAtMost(cap) => e.loan_to_value().is_some_and(|ltv| ltv <= *cap),
            Self::NoOutstanding => e.provision_ratio().is_none(),
            Self::ProvisionRatioBelow(t) => e.provision_ratio().is_some_and(|r| r < *t),
            Self::ProvisionRatioAtMost(t) => e.provision_ratio().is_some_and(|r| r <= *t),
            Self::All(conditions) => conditions.iter().all(|c| c.holds(e)),
            Self::Any(conditions) => conditions.iter().any(|c| c.holds(e)),
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, conditions: &[Condition], sep: &str) -> fmt::Result {
    for (i, c) in conditions.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::CounterpartyIn { list, .. } => write!(f, "counterparty in {list} list"),
            Self::CurrencyIs(currency) => write!(f, "currency {currency}"),
            Self::Flag(flag) => f.write_str(flag.label()),
            Self::Rated => f.write_str("rated"),
            Self::Unrated => f.write_str("unrated"),
            Self::InitialMaturityUnderOneYear => f.write_str("initial maturity < 1 year"),
            Self::InitialMaturityUpToThreeMonths => f.write_str("initial maturity <= 3 months"),
            Self::ResidualMaturityUnderOneYear => f.write_str("residual maturity < 1 year"),
            Self::AmountAbove(threshold) => write!(f, "amount > {threshold}"),
            Self::UsageIs(usage) => write!(f, "{usage} property"),
            Self::LtvAtMost(cap) => write!(f, "LTV <= {cap}"),
            Self::NoOutstanding => f.write_str("nothing outstanding"),
            Self::ProvisionRatioBelow(t) => write!(f, "provision ratio < {t}"),
            Self::ProvisionRatioAtMost(t) => write!(f, "provision ratio <= {t}"),
            Self::All(conditions) => join(f, conditions, " and "),
            Self::Any(conditions) => join(f, conditions, " or "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use rwa_core::types::{Collateral, ExposureBuilder, Rating, Segment};

    #[test]
    fn test_counterparty_condition() {
        let keywords = vec!["bce".to_string(), "european central bank".to_string()];
        let cond = Condition::counterparty_in("supranational", &keywords);
        let ecb = ExposureBuilder::new(Segment::Sovereign)
            .counterparty("European Central Bank")
            .build()
            .unwrap();
        let other = ExposureBuilder::new(Segment::Sovereign)
            .counterparty("Republic of Nowhere")
            .build()
            .unwrap();
        assert!(cond.holds(&ecb));
        assert!(!cond.holds(&other));
        assert_eq!(cond.to_string(), "counterparty in supranational list");
    }

    #[test]
    fn test_maturity_conditions() {
        let e = ExposureBuilder::new(Segment::CreditInstitution)
            .initial_maturity(MaturityBucket::UpToThreeMonths)
            .residual_maturity(MaturityBucket::OneYearOrMore)
            .build()
            .unwrap();
        assert!(Condition::InitialMaturityUnderOneYear.holds(&e));
        assert!(Condition::InitialMaturityUpToThreeMonths.holds(&e));
        assert!(!Condition::ResidualMaturityUnderOneYear.holds(&e));
    }

    #[test]
    fn test_ltv_and_provision_conditions() {
        let e = ExposureBuilder::new(Segment::NonPerforming)
            .amount(dec!(80))
            .collateral(Collateral::new(PropertyUsage::Residential).with_value(dec!(100)))
            .outstanding(dec!(100))
            .provisions(dec!(20))
            .build()
            .unwrap();
        assert!(Condition::LtvAtMost(dec!(0.80)).holds(&e));
        assert!(!Condition::LtvAtMost(dec!(0.79)).holds(&e));
        assert!(!Condition::ProvisionRatioBelow(dec!(0.20)).holds(&e));
        assert!(Condition::ProvisionRatioAtMost(dec!(0.20)).holds(&e));
        assert!(!Condition::NoOutstanding.holds(&e));
        assert!(Condition::UsageIs(PropertyUsage::Residential).holds(&e));
    }

    #[test]
    fn test_composites() {
        let e = ExposureBuilder::new(Segment::Enterprise)
            .rating(Rating::A)
            .group_member(true)
            .build()
            .unwrap();
        let both = Condition::All(vec![Condition::Rated, Condition::Flag(Flag::GroupMember)]);
        let either =
            Condition::Any(vec![Condition::Unrated, Condition::Flag(Flag::StateConvention)]);
        assert!(both.holds(&e));
        assert!(!either.holds(&e));
        assert_eq!(both.to_string(), "rated and group member");
    }
}
