//! Exposure record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Collateral, Currency, LocationClass, MaturityBucket, Rating, Segment};
use crate::error::{RwaError, RwaResult};

/// One exposure, as consumed by the calculation engine.
///
/// Exposures are built through [`ExposureBuilder`], which enforces the
/// invariants the engine relies on: a non-negative amount, a long-term (or
/// unrated) `rating`, a short-term `short_term_rating`, and a PMAE band in 0..=7.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    /// Identifier of the source row.
    pub id: String,
    /// Counterparty segment.
    pub segment: Segment,
    /// Counterparty name or sub-segment, matched against named-entity lists.
    pub counterparty: String,
    /// Currency the exposure is denominated in.
    pub currency: Currency,
    /// Gross exposure amount.
    pub amount: Decimal,
    /// External long-term rating.
    pub rating: Rating,
    /// Short-term rating (A-1..A-3), if any.
    pub short_term_rating: Option<Rating>,
    /// Country-risk band 0..=7, if any.
    pub pmae_band: Option<u8>,
    /// Initial maturity bucket.
    pub initial_maturity: Option<MaturityBucket>,
    /// Residual maturity bucket.
    pub residual_maturity: Option<MaturityBucket>,
    /// Location class of the counterparty.
    pub location: LocationClass,
    /// Property collateral, if any.
    pub collateral: Option<Collateral>,
    /// Repayment is provided for in the State budget.
    pub budget_repayment: bool,
    /// Listed or approved by the banking regulator.
    pub regulator_listed: bool,
    /// Counterparty belongs to a group.
    pub group_member: bool,
    /// Guaranteed by a mortgage.
    pub mortgage_guaranteed: bool,
    /// Granted under a convention with the State.
    pub state_convention: bool,
    /// Reported past due in the upload.
    pub past_due: bool,
    /// Bank debt of the counterparty, if reported.
    pub bank_debt: Option<Decimal>,
    /// Outstanding amount of a claim in default.
    pub outstanding: Option<Decimal>,
    /// Provisions booked against a claim in default.
    pub provisions: Option<Decimal>,
}

impl Exposure {
    /// Returns the loan-to-value ratio when a positive collateral value is known.
    ///
    /// A ratio too large to represent saturates at `Decimal::MAX`.
    #[must_use]
    pub fn loan_to_value(&self) -> Option<Decimal> {
        let value = self.collateral.and_then(|c| c.value)?;
        if value > Decimal::ZERO {
            Some(self.amount.checked_div(value).unwrap_or(Decimal::MAX))
        } else {
            None
        }
    }

    /// Returns provisions / outstanding, or `None` when nothing is outstanding.
    /// Saturates at `Decimal::MAX`.
    #[must_use]
    pub fn provision_ratio(&self) -> Option<Decimal> {
        let outstanding = self.outstanding.unwrap_or(Decimal::ZERO);
        if outstanding.is_zero() {
            return None;
        }
        let provisions = self.provisions.unwrap_or(Decimal::ZERO);
        Some(provisions.checked_div(outstanding).unwrap_or(Decimal::MAX))
    }

    /// Returns true if the counterparty name matches any of the given keywords.
    ///
    /// Matching is case-insensitive. A multi-word keyword matches as a
    /// substring; a single-word keyword (typically an acronym such as "BIS")
    /// must equal a whole word of the name.
    #[must_use]
    pub fn counterparty_matches<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let name = self.counterparty.trim().to_lowercase();
        if name.is_empty() {
            return false;
        }
        let words: Vec<&str> = name
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|w| !w.is_empty())
            .collect();

        keywords.iter().any(|k| {
            let k = k.as_ref().trim().to_lowercase();
            if k.is_empty() {
                false
            } else if k.contains(char::is_whitespace) {
                name.contains(&k)
            } else {
                words.iter().any(|w| *w == k)
            }
        })
    }
}

/// Builder for constructing an [`Exposure`].
#[derive(Debug, Clone)]
pub struct ExposureBuilder {
    exposure: Exposure,
}

impl ExposureBuilder {
    /// Creates a builder for the given segment.
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        Self {
            exposure: Exposure {
                id: String::new(),
                segment,
                counterparty: String::new(),
                currency: Currency::default(),
                amount: Decimal::ZERO,
                rating: Rating::Unrated,
                short_term_rating: None,
                pmae_band: None,
                initial_maturity: None,
                residual_maturity: None,
                location: LocationClass::default(),
                collateral: None,
                budget_repayment: false,
                regulator_listed: false,
                group_member: false,
                mortgage_guaranteed: false,
                state_convention: false,
                past_due: false,
                bank_debt: None,
                outstanding: None,
                provisions: None,
            },
        }
    }

    /// Sets the exposure identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.exposure.id = id.into();
        self
    }

    /// Sets the counterparty name.
    #[must_use]
    pub fn counterparty(mut self, name: impl Into<String>) -> Self {
        self.exposure.counterparty = name.into();
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.exposure.currency = currency;
        self
    }

    /// Sets the gross amount.
    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.exposure.amount = amount;
        self
    }

    /// Sets the external long-term rating.
    #[must_use]
    pub fn rating(mut self, rating: Rating) -> Self {
        self.exposure.rating = rating;
        self
    }

    /// Sets the short-term rating.
    #[must_use]
    pub fn short_term_rating(mut self, rating: Rating) -> Self {
        self.exposure.short_term_rating = Some(rating);
        self
    }

    /// Sets the PMAE band.
    #[must_use]
    pub fn pmae_band(mut self, band: u8) -> Self {
        self.exposure.pmae_band = Some(band);
        self
    }

    /// Sets the initial maturity bucket.
    #[must_use]
    pub fn initial_maturity(mut self, bucket: MaturityBucket) -> Self {
        self.exposure.initial_maturity = Some(bucket);
        self
    }

    /// Sets the residual maturity bucket.
    #[must_use]
    pub fn residual_maturity(mut self, bucket: MaturityBucket) -> Self {
        self.exposure.residual_maturity = Some(bucket);
        self
    }

    /// Sets the location class.
    #[must_use]
    pub fn location(mut self, location: LocationClass) -> Self {
        self.exposure.location = location;
        self
    }

    /// Sets the collateral.
    #[must_use]
    pub fn collateral(mut self, collateral: Collateral) -> Self {
        self.exposure.collateral = Some(collateral);
        self
    }

    /// Marks repayment as provided for in the State budget.
    #[must_use]
    pub fn budget_repayment(mut self, flag: bool) -> Self {
        self.exposure.budget_repayment = flag;
        self
    }

    /// Marks the counterparty as listed or approved by the regulator.
    #[must_use]
    pub fn regulator_listed(mut self, flag: bool) -> Self {
        self.exposure.regulator_listed = flag;
        self
    }

    /// Marks the counterparty as a group member.
    #[must_use]
    pub fn group_member(mut self, flag: bool) -> Self {
        self.exposure.group_member = flag;
        self
    }

    /// Marks the exposure as mortgage-guaranteed.
    #[must_use]
    pub fn mortgage_guaranteed(mut self, flag: bool) -> Self {
        self.exposure.mortgage_guaranteed = flag;
        self
    }

    /// Marks the exposure as granted under a State convention.
    #[must_use]
    pub fn state_convention(mut self, flag: bool) -> Self {
        self.exposure.state_convention = flag;
        self
    }

    /// Marks the exposure as past due.
    #[must_use]
    pub fn past_due(mut self, flag: bool) -> Self {
        self.exposure.past_due = flag;
        self
    }

    /// Sets the counterparty's bank debt.
    #[must_use]
    pub fn bank_debt(mut self, amount: Decimal) -> Self {
        self.exposure.bank_debt = Some(amount);
        self
    }

    /// Sets the outstanding amount of a claim in default.
    #[must_use]
    pub fn outstanding(mut self, amount: Decimal) -> Self {
        self.exposure.outstanding = Some(amount);
        self
    }

    /// Sets the provisions booked against a claim in default.
    #[must_use]
    pub fn provisions(mut self, amount: Decimal) -> Self {
        self.exposure.provisions = Some(amount);
        self
    }

    /// Builds the exposure.
    ///
    /// # Errors
    ///
    /// Returns `RwaError::InvalidExposure`, naming the offending field, when an
    /// invariant is violated.
    pub fn build(self) -> RwaResult<Exposure> {
        let e = self.exposure;

        if e.amount < Decimal::ZERO {
            return Err(RwaError::invalid_exposure(&e.id, "amount", "cannot be negative"));
        }

        if e.rating.is_short_term() {
            return Err(RwaError::invalid_exposure(
                &e.id,
                "rating",
                format!("{} is a short-term grade", e.rating.notation()),
            ));
        }

        if let Some(st) = e.short_term_rating {
            if !st.is_short_term() {
                return Err(RwaError::invalid_exposure(
                    &e.id,
                    "short_term_rating",
                    format!("{} is not A-1, A-2 or A-3", st.notation()),
                ));
            }
        }

        if let Some(band) = e.pmae_band {
            if band > 7 {
                return Err(RwaError::invalid_exposure(
                    &e.id,
                    "pmae_band",
                    format!("{band} is outside 0..=7"),
                ));
            }
        }

        for (field, value) in [
            ("outstanding", e.outstanding),
            ("provisions", e.provisions),
            ("bank_debt", e.bank_debt),
        ] {
            if value.is_some_and(|v| v < Decimal::ZERO) {
                return Err(RwaError::invalid_exposure(&e.id, field, "cannot be negative"));
            }
        }

        Ok(e)
    }
}
