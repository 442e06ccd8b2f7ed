//! Single-pass validation and conversion of a dataset into exposures.

use rust_decimal::Decimal;
use rwa_config::RwaConfig;
use rwa_core::error::RwaError;
use rwa_core::types::{
    Collateral, Currency, Dataset, Exposure, ExposureBuilder, LocationClass, MaturityBucket,
    PropertyUsage, Rating, RowView, Segment,
};

use crate::cell::{parse_bool, parse_decimal, parse_pmae_band};
use crate::report::{Rule, ValidationReport, Violation, Warning, WarningKind};
use crate::schema::{columns as c, required_columns};
use crate::summary::{DatasetSummary, SummaryBuilder};

/// Validates a dataset.
///
/// Every violation across all rows and columns is reported; validation
/// never stops at the first problem.
#[must_use]
pub fn validate(dataset: &Dataset, config: &RwaConfig) -> ValidationReport {
    read_with_report(dataset, config).1
}

/// Validates a dataset and converts it into exposures.
///
/// Returns the exposures in row order when the dataset passes, or the full
/// report when it does not.
pub fn read_exposures(
    dataset: &Dataset,
    config: &RwaConfig,
) -> Result<Vec<Exposure>, ValidationReport> {
    let (exposures, report) = read_with_report(dataset, config);
    if report.is_pass() {
        Ok(exposures)
    } else {
        Err(report)
    }
}

/// Validates a dataset and returns the exposures of every row without a
/// violation, together with the report.
///
/// Header-level violations (missing columns) do not filter rows; check
/// [`ValidationReport::is_pass`] before using the exposures.
#[must_use]
pub fn read_with_report(
    dataset: &Dataset,
    config: &RwaConfig,
) -> (Vec<Exposure>, ValidationReport) {
    let mut violations: Vec<Violation> = required_columns()
        .filter(|spec| !dataset.has_column(spec.name))
        .map(|spec| {
            Violation::column(spec.name, Rule::RequiredColumn, "required column is missing")
        })
        .collect();
    let mut warnings = Vec::new();
    let mut summary = SummaryBuilder::new(dataset.len(), dataset.headers().len());
    let mut exposures = Vec::with_capacity(dataset.len());

    for row in dataset.rows() {
        let mut reader = RowReader::new(dataset, row, config);
        let exposure = reader.read(&mut summary);
        violations.append(&mut reader.violations);
        warnings.append(&mut reader.warnings);
        exposures.extend(exposure);
    }

    let summary = summary.finish().unwrap_or_else(|err| {
        violations.push(Violation::column(
            c::MONTANT,
            Rule::AmountLimit,
            format!("total amount is not representable ({err})"),
        ));
        DatasetSummary {
            rows: dataset.len(),
            columns: dataset.headers().len(),
            ..DatasetSummary::default()
        }
    });

    tracing::debug!(
        rows = dataset.len(),
        violations = violations.len(),
        warnings = warnings.len(),
        "validated dataset"
    );

    let report = ValidationReport {
        violations,
        warnings,
        no_data: dataset.is_empty(),
        summary,
    };
    (exposures, report)
}

/// Reads one row, collecting its findings.
struct RowReader<'a> {
    dataset: &'a Dataset,
    row: RowView<'a>,
    config: &'a RwaConfig,
    violations: Vec<Violation>,
    warnings: Vec<Warning>,
}

impl<'a> RowReader<'a> {
    fn new(dataset: &'a Dataset, row: RowView<'a>, config: &'a RwaConfig) -> Self {
        Self {
            dataset,
            row,
            config,
            violations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn violation(&mut self, column: &str, rule: Rule, message: impl Into<String>) {
        self.violations
            .push(Violation::cell(column, self.row.index(), rule, message));
    }

    fn warning(&mut self, column: &str, kind: WarningKind, message: impl Into<String>) {
        self.warnings.push(Warning {
            kind,
            column: column.to_string(),
            row: self.row.index(),
            message: message.into(),
        });
    }

    /// Non-blank cell of a present column; blank cells of missing columns are
    /// already covered by the header check.
    fn required(&mut self, column: &str) -> Option<&'a str> {
        let value = self.row.get(column);
        if value.is_none() && self.dataset.has_column(column) {
            self.violation(column, Rule::RequiredValue, "value is required");
        }
        value
    }

    fn categorical<T>(
        &mut self,
        column: &str,
        value: Option<&str>,
        rule: Rule,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let text = value?;
        let parsed = parse(text);
        if parsed.is_none() {
            self.violation(column, rule, format!("'{text}' is not a valid {rule}"));
        }
        parsed
    }

    fn flag(&mut self, column: &str) -> bool {
        let value = self.row.get(column);
        self.categorical(column, value, Rule::Boolean, parse_bool)
            .unwrap_or(false)
    }

    fn amount(&mut self, column: &str) -> Option<Decimal> {
        let text = self.row.get(column)?;
        let Some(value) = parse_decimal(text) else {
            self.violation(column, Rule::Numeric, format!("'{text}' is not a number"));
            return None;
        };
        if value < Decimal::ZERO {
            self.violation(column, Rule::NonNegative, format!("{value} cannot be negative"));
        }
        if !self.config.allows_amount(value) {
            self.violation(
                column,
                Rule::AmountLimit,
                format!("{value} exceeds the maximum amount {}", self.config.max_amount),
            );
        }
        Some(value)
    }

    fn read(&mut self, summary: &mut SummaryBuilder) -> Option<Exposure> {
        // Segment
        let segment_text = self.required(c::SEGMENT);
        let segment = self.categorical(c::SEGMENT, segment_text, Rule::Segment, Segment::parse);
        if let Some(text) = segment_text {
            let label = segment.map_or_else(|| text.to_lowercase(), |s| s.code().to_string());
            summary.segment(&label);
        }

        // Currency
        let currency_text = self.required(c::MONNAIE);
        let currency = self.currency(currency_text);

        // Ratings
        let external = self.row.get(c::NOTE_EXTERNE);
        let external_rating =
            self.categorical(c::NOTE_EXTERNE, external, Rule::Rating, Rating::parse);
        let rating_label = match (external_rating, external) {
            (Some(r), _) => r.notation().to_string(),
            (None, Some(text)) => text.to_uppercase(),
            (None, None) => Rating::Unrated.notation().to_string(),
        };
        summary.rating(&rating_label);
        let long_term = self.long_term_rating();
        let short_term = self.short_term_rating();
        let (rating, short_term_rating) =
            resolve_ratings(external_rating.unwrap_or_default(), long_term, short_term);

        let pmae_text = self.row.get(c::NOTE_PMAE);
        let pmae_band = self.categorical(c::NOTE_PMAE, pmae_text, Rule::PmaeBand, parse_pmae_band);

        // Maturities, usage, location
        let initial = self.row.get(c::ECHEANCE_INITIALE);
        let initial_maturity =
            self.categorical(c::ECHEANCE_INITIALE, initial, Rule::Maturity, MaturityBucket::parse);
        let residual = self.row.get(c::ECHEANCE);
        let residual_maturity =
            self.categorical(c::ECHEANCE, residual, Rule::Maturity, MaturityBucket::parse);
        let usage_text = self.row.get(c::USAGE);
        let usage = self.categorical(c::USAGE, usage_text, Rule::Usage, PropertyUsage::parse);
        let location_text = self.row.get(c::LOCALISATION);
        let location = self
            .categorical(c::LOCALISATION, location_text, Rule::Location, LocationClass::parse)
            .unwrap_or_default();

        // Flags
        let budget_repayment = self.flag(c::REMBOURSEMENT_BUDGET);
        let past_due = self.flag(c::CREANCE_SOUFFRANCE);
        let regulator_listed = self.flag(c::ACCORD_BANK_MAGHRIB);
        let group_member = self.flag(c::APPART_GRPE);
        let mortgage_guaranteed = self.flag(c::GARANTI_HYPOTHEQUE);
        let state_convention = self.flag(c::CONVENTION_ETAT);
        if past_due {
            summary.past_due();
        }

        // Amounts
        let amount_text = self.required(c::MONTANT);
        let amount = amount_text.and_then(|_| self.amount(c::MONTANT));
        if let Some(a) = amount {
            if self.config.allows_amount(a) {
                summary.amount(a);
            }
            if a.is_zero() {
                self.warning(c::MONTANT, WarningKind::ZeroAmount, "amount is zero");
            }
        }
        let bank_debt = self.amount(c::DETTE_BANC);
        let property_value = self.amount(c::VALEUR_BIEN_HYPOTEQ);
        let outstanding = self.amount(c::VALEUR_ENCOURS_CREANCE);
        let provisions = self.amount(c::PROVISION_CONSTITUE);

        // Cross-field rules
        let has_property_value = property_value.is_some_and(|v| v > Decimal::ZERO);
        if mortgage_guaranteed && !has_property_value {
            self.warning(
                c::VALEUR_BIEN_HYPOTEQ,
                WarningKind::MortgageWithoutValue,
                "mortgage guarantee without a property value",
            );
        }

        if segment == Some(Segment::RealEstate) {
            if usage_text.is_none() {
                self.violation(
                    c::USAGE,
                    Rule::RealEstateCollateral,
                    "real-estate exposures need a property usage",
                );
            }
            if !has_property_value {
                self.violation(
                    c::VALEUR_BIEN_HYPOTEQ,
                    Rule::RealEstateCollateral,
                    "real-estate exposures need a positive property value",
                );
            }
        }

        if segment == Some(Segment::NonPerforming) {
            if self.row.get(c::VALEUR_ENCOURS_CREANCE).is_none() {
                self.violation(
                    c::VALEUR_ENCOURS_CREANCE,
                    Rule::NonPerformingOutstanding,
                    "claims in default need an outstanding amount",
                );
            }
            if let (Some(out), Some(prov)) = (outstanding, provisions) {
                if prov > out {
                    self.warning(
                        c::PROVISION_CONSTITUE,
                        WarningKind::ProvisionsExceedOutstanding,
                        format!("provisions {prov} exceed outstanding {out}"),
                    );
                }
            }
        }

        if !self.violations.is_empty() {
            return None;
        }

        let index = self.row.index();
        let id = self
            .row
            .get(c::ID)
            .map_or_else(|| format!("row-{}", index + 1), str::to_string);

        let mut builder = ExposureBuilder::new(segment?)
            .id(id)
            .counterparty(self.row.get(c::SOUS_SEGMENT).unwrap_or_default())
            .currency(currency?)
            .amount(amount?)
            .rating(rating)
            .location(location)
            .budget_repayment(budget_repayment)
            .regulator_listed(regulator_listed)
            .group_member(group_member)
            .mortgage_guaranteed(mortgage_guaranteed)
            .state_convention(state_convention)
            .past_due(past_due);

        if let Some(st) = short_term_rating {
            builder = builder.short_term_rating(st);
        }
        if let Some(band) = pmae_band {
            builder = builder.pmae_band(band);
        }
        if let Some(m) = initial_maturity {
            builder = builder.initial_maturity(m);
        }
        if let Some(m) = residual_maturity {
            builder = builder.residual_maturity(m);
        }
        if let Some(usage) = usage {
            let collateral = match property_value {
                Some(v) => Collateral::new(usage).with_value(v),
                None => Collateral::new(usage),
            };
            builder = builder.collateral(collateral);
        }
        if let Some(v) = bank_debt {
            builder = builder.bank_debt(v);
        }
        if let Some(v) = outstanding {
            builder = builder.outstanding(v);
        }
        if let Some(v) = provisions {
            builder = builder.provisions(v);
        }

        match builder.build() {
            Ok(exposure) => Some(exposure),
            Err(err) => {
                self.violation(exposure_column(&err), Rule::Consistency, err.to_string());
                None
            }
        }
    }

    fn currency(&mut self, text: Option<&str>) -> Option<Currency> {
        let text = text?;
        let Some(currency) = Currency::from_code(text) else {
            self.violation(c::MONNAIE, Rule::Currency, format!("'{text}' is not a valid currency"));
            return None;
        };
        if !self.config.allows_currency(currency) {
            self.violation(
                c::MONNAIE,
                Rule::Currency,
                format!("{currency} is not in the currency allow-list"),
            );
            return None;
        }
        Some(currency)
    }

    fn long_term_rating(&mut self) -> Option<Rating> {
        let text = self.row.get(c::NOTE_SUP_1_AN);
        let rating = self.categorical(c::NOTE_SUP_1_AN, text, Rule::Rating, Rating::parse)?;
        if rating.is_short_term() {
            self.violation(
                c::NOTE_SUP_1_AN,
                Rule::LongTermRating,
                format!("{rating} is a short-term grade"),
            );
            return None;
        }
        Some(rating)
    }

    fn short_term_rating(&mut self) -> Option<Rating> {
        let text = self.row.get(c::NOTE_INF_1_AN);
        let rating = self.categorical(c::NOTE_INF_1_AN, text, Rule::Rating, Rating::parse)?;
        if rating.is_long_term() {
            self.violation(
                c::NOTE_INF_1_AN,
                Rule::ShortTermRating,
                format!("{rating} is not a short-term grade (A-1, A-2, A-3)"),
            );
            return None;
        }
        rating.is_short_term().then_some(rating)
    }
}

/// Upload column holding the exposure field named by a build error.
fn exposure_column(err: &RwaError) -> &'static str {
    let RwaError::InvalidExposure { field, .. } = err else {
        return c::SEGMENT;
    };
    match *field {
        "amount" => c::MONTANT,
        "rating" => c::NOTE_EXTERNE,
        "short_term_rating" => c::NOTE_INF_1_AN,
        "pmae_band" => c::NOTE_PMAE,
        "outstanding" => c::VALEUR_ENCOURS_CREANCE,
        "provisions" => c::PROVISION_CONSTITUE,
        "bank_debt" => c::DETTE_BANC,
        _ => c::SEGMENT,
    }
}

/// Combines the three rating columns into (long-term, short-term).
///
/// `note_externe` wins when it holds a long-term grade; otherwise
/// `note_sup_1_an` is used. A short-term grade in `note_externe` fills the
/// short-term slot when `note_inf_1_an` is blank.
fn resolve_ratings(
    external: Rating,
    long_term: Option<Rating>,
    short_term: Option<Rating>,
) -> (Rating, Option<Rating>) {
    let rating = if external.is_long_term() {
        external
    } else {
        long_term.unwrap_or(Rating::Unrated)
    };
    let short = short_term.or_else(|| external.is_short_term().then_some(external));
    (rating, short)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SCHEMA;
    use rust_decimal_macros::dec;

    fn headers() -> Vec<&'static str> {
        SCHEMA.iter().filter(|s| s.required).map(|s| s.name).collect()
    }

    /// A row with every required column, set by name.
    fn row(values: &[(&str, &str)]) -> Vec<String> {
        headers()
            .iter()
            .map(|h| {
                values
                    .iter()
                    .find(|(k, _)| k == h)
                    .map_or(String::new(), |(_, v)| (*v).to_string())
            })
            .collect()
    }

    fn dataset(rows: &[Vec<String>]) -> Dataset {
        let mut ds = Dataset::new(&headers());
        for r in rows {
            ds.push_row(r);
        }
        ds
    }

    #[test]
    fn test_valid_row_converts() {
        let ds = dataset(&[row(&[
            ("segment", "entreprise"),
            ("sous_segment", "Acme"),
            ("monnaie", "mad"),
            ("note_externe", "bbb+"),
            ("echeance", "inf_1_an"),
            ("note_inf_1_an", "A-2"),
            ("appart_grpe", "non"),
            ("montant", "500000"),
        ])]);

        let exposures = read_exposures(&ds, &RwaConfig::standard()).unwrap();
        assert_eq!(exposures.len(), 1);
        let e = &exposures[0];
        assert_eq!(e.id, "row-1");
        assert_eq!(e.segment, Segment::Enterprise);
        assert_eq!(e.counterparty, "Acme");
        assert_eq!(e.rating, Rating::BBBPlus);
        assert_eq!(e.short_term_rating, Some(Rating::A2));
        assert_eq!(e.residual_maturity, Some(MaturityBucket::UnderOneYear));
        assert_eq!(e.amount, dec!(500000));
        assert!(!e.group_member);
    }

    #[test]
    fn test_empty_dataset_passes_with_no_data() {
        let report = validate(&dataset(&[]), &RwaConfig::standard());
        assert!(report.is_pass());
        assert!(report.no_data);
    }

    #[test]
    fn test_currency_outside_allow_list() {
        let ds = dataset(&[row(&[
            ("segment", "tpe"),
            ("monnaie", "AUD"),
            ("montant", "10"),
        ])]);
        let report = validate(&ds, &RwaConfig::standard());
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule, Rule::Currency);
        assert_eq!(report.violations[0].row, Some(0));
    }

    #[test]
    fn test_every_bad_cell_is_reported() {
        let ds = dataset(&[row(&[
            ("segment", "martien"),
            ("monnaie", "MAD"),
            ("note_externe", "ZZZ"),
            ("note_pmae", "9"),
            ("appart_grpe", "peut-etre"),
            ("note_inf_1_an", "AA"),
            ("montant", "-5"),
        ])]);
        let report = validate(&ds, &RwaConfig::standard());
        let rules: Vec<Rule> = report.violations.iter().map(|v| v.rule).collect();
        for expected in [
            Rule::Segment,
            Rule::Rating,
            Rule::PmaeBand,
            Rule::Boolean,
            Rule::ShortTermRating,
            Rule::NonNegative,
        ] {
            assert!(rules.contains(&expected), "missing {expected}: {rules:?}");
        }
    }

    #[test]
    fn test_blank_required_values() {
        let ds = dataset(&[row(&[("note_externe", "AAA")])]);
        let report = validate(&ds, &RwaConfig::standard());
        let columns: Vec<&str> = report.violations.iter().map(|v| v.column.as_str()).collect();
        assert_eq!(columns, vec!["segment", "monnaie", "montant"]);
        assert!(report
            .violations
            .iter()
            .all(|v| v.rule == Rule::RequiredValue));
    }

    #[test]
    fn test_real_estate_needs_collateral() {
        let ds = dataset(&[row(&[
            ("segment", "immobilier"),
            ("monnaie", "MAD"),
            ("montant", "800000"),
        ])]);
        let report = validate(&ds, &RwaConfig::standard());
        assert_eq!(report.violations.len(), 2);
        assert!(report
            .violations
            .iter()
            .all(|v| v.rule == Rule::RealEstateCollateral));
    }

    #[test]
    fn test_non_performing_rows() {
        let missing = dataset(&[row(&[
            ("segment", "creance_souffrance"),
            ("monnaie", "MAD"),
            ("montant", "100"),
        ])]);
        let report = validate(&missing, &RwaConfig::standard());
        assert_eq!(report.violations[0].rule, Rule::NonPerformingOutstanding);

        let over_provisioned = dataset(&[row(&[
            ("segment", "creance_souffrance"),
            ("monnaie", "MAD"),
            ("montant", "100"),
            ("valeur_encours_creance", "100"),
            ("provision_constitue", "120"),
        ])]);
        let report = validate(&over_provisioned, &RwaConfig::standard());
        assert!(report.is_pass());
        assert_eq!(
            report.warnings[0].kind,
            WarningKind::ProvisionsExceedOutstanding
        );
    }

    #[test]
    fn test_warnings_do_not_block() {
        let ds = dataset(&[row(&[
            ("segment", "particulier"),
            ("monnaie", "EUR"),
            ("montant", "0"),
            ("garanti_hypotheque", "oui"),
        ])]);
        let (exposures, report) = read_with_report(&ds, &RwaConfig::standard());
        assert!(report.is_pass());
        assert_eq!(exposures.len(), 1);
        let kinds: Vec<WarningKind> = report.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WarningKind::ZeroAmount, WarningKind::MortgageWithoutValue]
        );
    }

    #[test]
    fn test_rating_resolution() {
        assert_eq!(
            resolve_ratings(Rating::Unrated, Some(Rating::A), None),
            (Rating::A, None)
        );
        assert_eq!(
            resolve_ratings(Rating::AA, Some(Rating::BB), None),
            (Rating::AA, None)
        );
        assert_eq!(
            resolve_ratings(Rating::A1, None, None),
            (Rating::Unrated, Some(Rating::A1))
        );
        assert_eq!(
            resolve_ratings(Rating::A1, None, Some(Rating::A3)),
            (Rating::Unrated, Some(Rating::A3))
        );
    }

    #[test]
    fn test_amounts_above_maximum_are_violations() {
        let huge = "60000000000000000000000000000";
        let ds = dataset(&[row(&[
            ("segment", "creance_souffrance"),
            ("monnaie", "MAD"),
            ("montant", huge),
            ("valeur_encours_creance", huge),
            ("provision_constitue", "10"),
        ])]);
        let (exposures, report) = read_with_report(&ds, &RwaConfig::standard());
        assert!(exposures.is_empty());
        let columns: Vec<&str> = report
            .violations
            .iter()
            .filter(|v| v.rule == Rule::AmountLimit)
            .map(|v| v.column.as_str())
            .collect();
        assert_eq!(columns, vec!["montant", "valeur_encours_creance"]);
        assert_eq!(report.summary.total_amount, Decimal::ZERO);

        let mut config = RwaConfig::standard();
        config.max_amount = dec!(1000);
        let tpe = |amount: &str| {
            dataset(&[row(&[("segment", "tpe"), ("monnaie", "MAD"), ("montant", amount)])])
        };
        assert!(validate(&tpe("1000"), &config).is_pass());
        let report = validate(&tpe("1000.01"), &config);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule, Rule::AmountLimit);
        assert_eq!(report.violations[0].row, Some(0));
    }

    #[test]
    fn test_rows_summing_past_decimal_range_do_not_panic() {
        let mut config = RwaConfig::standard();
        config.max_amount = Decimal::MAX;
        let half = "50000000000000000000000000000";
        let ds = dataset(&[
            row(&[("segment", "tpe"), ("monnaie", "MAD"), ("montant", half)]),
            row(&[("segment", "tpe"), ("monnaie", "MAD"), ("montant", half)]),
        ]);
        let report = validate(&ds, &config);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule, Rule::AmountLimit);
        assert_eq!(report.violations[0].row, None);
        assert_eq!(report.summary.rows, 2);
    }

    #[test]
    fn test_build_errors_point_at_their_column() {
        let provisions = ExposureBuilder::new(Segment::NonPerforming)
            .provisions(dec!(-1))
            .build()
            .unwrap_err();
        assert_eq!(exposure_column(&provisions), "provision_constitue");

        let band = ExposureBuilder::new(Segment::Sovereign)
            .pmae_band(9)
            .build()
            .unwrap_err();
        assert_eq!(exposure_column(&band), "note_pmae");

        let rating = ExposureBuilder::new(Segment::Enterprise)
            .rating(Rating::A2)
            .build()
            .unwrap_err();
        assert_eq!(exposure_column(&rating), "note_externe");
        assert_eq!(exposure_column(&RwaError::invalid_segment("x")), "segment");
    }

    #[test]
    fn test_summary_counts() {
        let ds = dataset(&[
            row(&[
                ("segment", "TPE"),
                ("monnaie", "MAD"),
                ("montant", "100"),
                ("note_externe", "aaa"),
            ]),
            row(&[
                ("segment", "tpe"),
                ("monnaie", "MAD"),
                ("montant", "300"),
                ("creance_souffrance", "1"),
            ]),
        ]);
        let report = validate(&ds, &RwaConfig::standard());
        let s = &report.summary;
        assert_eq!(s.rows, 2);
        assert_eq!(s.columns, 21);
        assert_eq!(s.segments.len(), 1);
        assert_eq!(s.segments[0].count, 2);
        assert_eq!(s.total_amount, dec!(400));
        assert_eq!(s.median_amount, Some(dec!(200)));
        assert_eq!(s.past_due_rows, 1);
        assert_eq!(s.ratings.len(), 2);
    }
}
