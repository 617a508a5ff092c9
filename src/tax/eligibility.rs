//! Ordered eligibility gate chain (Tax Code 218)
//!
//! Order: VAT registration hard stop, automatic-route fast pass, turnover
//! threshold, then the itemized 218.5.* disqualifiers. The first failing
//! check ends the evaluation.

use super::rates::{
    EINVOICE_RATIO_THRESHOLD, FIXED_ASSETS_THRESHOLD, PRODUCTION_EMPLOYEE_THRESHOLD,
    TURNOVER_THRESHOLD,
};
use super::turnover::adjust_turnover;
use crate::core::{Disqualification, LegalBasis, ReasonCode, TaxRoute, TaxpayerInput, Trace};
use rust_decimal::Decimal;

/// Result of a single gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Pass {
        details: String,
        article: &'static str,
    },
    Fail {
        details: String,
        article: &'static str,
        disqualification: Disqualification,
    },
}

impl Check {
    fn pass(details: impl Into<String>, article: &'static str) -> Self {
        Check::Pass {
            details: details.into(),
            article,
        }
    }

    fn fail(details: impl Into<String>, article: &'static str, disqualification: Disqualification) -> Self {
        Check::Fail {
            details: details.into(),
            article,
            disqualification,
        }
    }
}

/// A named disqualifier check
struct Gate {
    rule: &'static str,
    check: fn(&TaxpayerInput) -> Check,
}

/// Outcome of the whole chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible {
        route: TaxRoute,
        legal_basis: Vec<LegalBasis>,
    },
    Ineligible(Disqualification),
}

/// Run the gate chain, recording every step into `trace`
pub fn check_eligibility(input: &TaxpayerInput, trace: &mut Trace) -> Eligibility {
    if input.is_vat_registered {
        log::debug!("vat_registration: failed");
        trace.record(
            "vat_registration",
            false,
            "Taxpayer is VAT registered - not eligible for simplified tax",
            "218.1.1",
        );
        return Eligibility::Ineligible(
            Disqualification::new(
                ReasonCode::VatRegistered,
                "VAT-registered taxpayers cannot use simplified tax regime",
            )
            .citing(LegalBasis::tax_code(
                "218.1.1",
                "Sadələşdirilmiş vergi ödəyicisi kimi qeydiyyata alınmış vergi ödəyicilərinin əməliyyatları ƏDV-yə cəlb edilmir",
            )),
        );
    }
    trace.record("vat_registration", true, "Not VAT registered", "218.1.1");

    if let Some(route) = input.automatic_route() {
        return automatic_route(input, route, trace);
    }

    let route = match threshold_route(input, trace) {
        Ok(route) => route,
        Err(disqualification) => return Eligibility::Ineligible(disqualification),
    };

    for gate in DISQUALIFIERS {
        match (gate.check)(input) {
            Check::Pass { details, article } => {
                log::debug!("{}: passed", gate.rule);
                trace.record(gate.rule, true, details, article);
            }
            Check::Fail {
                details,
                article,
                disqualification,
            } => {
                log::debug!("{}: failed ({})", gate.rule, disqualification.reason_code);
                trace.record(gate.rule, false, details, article);
                return Eligibility::Ineligible(disqualification);
            }
        }
    }

    Eligibility::Eligible {
        route,
        legal_basis: vec![LegalBasis::tax_code(
            "218",
            "Simplified tax eligibility conditions met",
        )],
    }
}

/// 218.4 categories are simplified taxpayers regardless of 218.1; only the
/// financial sector disqualifier still applies to them.
fn automatic_route(input: &TaxpayerInput, route: TaxRoute, trace: &mut Trace) -> Eligibility {
    trace.record(
        "automatic_route",
        true,
        format!("Automatic simplified tax route: {}", route),
        "218.4",
    );

    if let Some(membership) = input.financial_sector_membership() {
        log::debug!("universal_disqualifiers: failed for {}", route);
        trace.record(
            "universal_disqualifiers",
            false,
            format!("Is a {}", membership),
            "218.5.2",
        );
        return Eligibility::Ineligible(
            Disqualification::new(
                ReasonCode::Disqualifier,
                format!(
                    "Disqualifying condition found: financial sector entity ({})",
                    membership
                ),
            )
            .citing(LegalBasis::tax_code("218.5.2", "Financial sector disqualification")),
        );
    }
    trace.record(
        "universal_disqualifiers",
        true,
        "Not in financial sector",
        "218.5.2",
    );

    Eligibility::Eligible {
        route,
        legal_basis: vec![
            LegalBasis::tax_code("218.4", "Automatic simplified tax categories"),
            LegalBasis::tax_code(route.article(), route_description(route)),
        ],
    }
}

fn route_description(route: TaxRoute) -> &'static str {
    match route {
        TaxRoute::AutoTransport => "Passenger transport/taxi activity",
        TaxRoute::AutoBettingLottery => "Betting/lottery activity",
        TaxRoute::AutoProperty => "Transfer/sale of own real estate",
        TaxRoute::AutoLand => "Sale/transfer of own land",
        TaxRoute::AutoFixedActivity => "Fixed activity under 220.10 without employees",
        TaxRoute::General => "Turnover not above 200,000 AZN",
        TaxRoute::TradeCateringOver200k => "Trade/catering above 200,000 AZN",
    }
}

/// 218.1.1 / 218.1.2 threshold test. Without turnover data the route stays
/// general.
fn threshold_route(input: &TaxpayerInput, trace: &mut Trace) -> Result<TaxRoute, Disqualification> {
    let Some(turnover) = &input.turnover else {
        return Ok(TaxRoute::General);
    };

    let figures = adjust_turnover(turnover);
    trace.record(
        "turnover_calculation",
        true,
        format!(
            "Gross: {}, VAT-exempt: {}, POS eligible: {}, Adjusted: {}",
            turnover.gross_turnover_12m,
            turnover.vat_exempt_turnover_12m,
            figures.pos_eligible,
            figures.adjusted
        ),
        "218.1-1",
    );
    let adjusted = figures.adjusted;
    log::debug!(
        "turnover: VAT-taxable {}, POS eligible {}, adjusted {}",
        figures.vat_taxable,
        figures.pos_eligible,
        adjusted
    );

    if adjusted <= TURNOVER_THRESHOLD {
        trace.record(
            "turnover_threshold",
            true,
            format!("Adjusted turnover {} <= {}", adjusted, TURNOVER_THRESHOLD),
            "218.1.1",
        );
        return Ok(TaxRoute::General);
    }

    if input.does_trade_or_catering() {
        trace.record(
            "turnover_threshold",
            true,
            format!(
                "Trade/catering: turnover {} > 200k, eligible under 218.1.2",
                adjusted
            ),
            "218.1.2",
        );
        return Ok(TaxRoute::TradeCateringOver200k);
    }

    log::debug!("turnover_threshold: failed ({} > {})", adjusted, TURNOVER_THRESHOLD);
    trace.record(
        "turnover_threshold",
        false,
        format!("Adjusted turnover {} > {}", adjusted, TURNOVER_THRESHOLD),
        "218.1.1",
    );
    Err(Disqualification::new(
        ReasonCode::TurnoverExceeded,
        format!(
            "Adjusted turnover ({} AZN) exceeds 200,000 AZN threshold",
            adjusted
        ),
    )
    .citing(LegalBasis::tax_code(
        "218.1.1",
        "Vergi tutulan əməliyyatlar həcmi ardıcıl 12 ayda 200000 manatdan çox olmamalıdır",
    )))
}

/// 218.5.* disqualifiers in statutory evaluation order
const DISQUALIFIERS: &[Gate] = &[
    Gate { rule: "excise_goods", check: excise_goods },
    Gate { rule: "financial_sector", check: financial_sector },
    Gate { rule: "pension_fund", check: pension_fund },
    Gate { rule: "rental_royalty", check: rental_royalty },
    Gate { rule: "natural_monopoly", check: natural_monopoly },
    Gate { rule: "fixed_assets", check: fixed_assets },
    Gate { rule: "public_entity", check: public_entity },
    Gate { rule: "production_employees", check: production_employees },
    Gate { rule: "wholesale", check: wholesale },
    Gate { rule: "b2b_works_services", check: b2b_works_services },
    Gate { rule: "precious_goods", check: precious_goods },
    Gate { rule: "fur_leather", check: fur_leather },
    Gate { rule: "licensed_activities", check: licensed_activities },
];

fn excise_goods(input: &TaxpayerInput) -> Check {
    if !input.produces_excise_goods {
        return Check::pass("Does not produce excise goods", "218.5.1");
    }
    Check::fail(
        "Produces excise or mandatory-label goods",
        "218.5.1",
        Disqualification::new(
            ReasonCode::ExciseProducer,
            "Excise or mandatory-label goods producers are not eligible",
        )
        .citing(LegalBasis::tax_code(
            "218.5.1",
            "Aksizli malların və mütləq markalanan malların istehsalçıları",
        )),
    )
}

fn financial_sector(input: &TaxpayerInput) -> Check {
    let Some(membership) = input.financial_sector_membership() else {
        return Check::pass("Not in financial sector", "218.5.2");
    };
    Check::fail(
        format!("Is a {}", membership),
        "218.5.2",
        Disqualification::new(
            ReasonCode::FinancialSector,
            format!("Financial sector entities ({}) are not eligible", membership),
        )
        .citing(LegalBasis::tax_code(
            "218.5.2",
            "Kredit təşkilatları, sığorta bazarının peşəkar iştirakçıları, investisiya fondları, qiymətli kağızlar bazarının lisenziyalı iştirakçıları, lombardlar",
        )),
    )
}

fn pension_fund(input: &TaxpayerInput) -> Check {
    if !input.is_non_state_pension_fund {
        return Check::pass("Not a pension fund", "218.5.3");
    }
    Check::fail(
        "Is a non-state pension fund",
        "218.5.3",
        Disqualification::new(
            ReasonCode::PensionFund,
            "Non-state pension funds are not eligible",
        )
        .citing(LegalBasis::tax_code("218.5.3", "Qeyri-dövlət pensiya fondları")),
    )
}

fn rental_royalty(input: &TaxpayerInput) -> Check {
    let income_type = if input.has_rental_income {
        "rental"
    } else if input.has_royalty_income {
        "royalty"
    } else {
        return Check::pass("No rental/royalty income", "218.5.4");
    };
    Check::fail(
        format!("Has {} income", income_type),
        "218.5.4",
        Disqualification::new(
            ReasonCode::RentalRoyalty,
            format!("Taxpayers with {} income are not eligible", income_type),
        )
        .citing(LegalBasis::tax_code(
            "218.5.4",
            "İcarə və royalti gəliri əldə edən vergi ödəyiciləri",
        )),
    )
}

fn natural_monopoly(input: &TaxpayerInput) -> Check {
    if !input.is_natural_monopoly {
        return Check::pass("Not a natural monopoly", "218.5.5");
    }
    Check::fail(
        "Is a designated natural monopoly",
        "218.5.5",
        Disqualification::new(
            ReasonCode::NaturalMonopoly,
            "Natural monopolies are not eligible",
        )
        .citing(LegalBasis::tax_code("218.5.5", "Təbii inhisarçılar")),
    )
}

fn fixed_assets(input: &TaxpayerInput) -> Check {
    match input.fixed_assets_residual_value {
        Some(value) if value > FIXED_ASSETS_THRESHOLD => Check::fail(
            format!("Fixed assets {} > {}", value, FIXED_ASSETS_THRESHOLD),
            "218.5.6",
            Disqualification::new(
                ReasonCode::FixedAssetsExceeded,
                "Fixed assets residual value exceeds 1,000,000 AZN threshold",
            )
            .citing(LegalBasis::tax_code(
                "218.5.6",
                "İlin əvvəlinə əsas vəsaitlərinin qalıq dəyəri 1 000 000 manatdan artıq olan vergi ödəyiciləri",
            )),
        ),
        Some(_) => Check::pass("Fixed assets within threshold", "218.5.6"),
        None => Check::pass("Fixed assets value not supplied", "218.5.6"),
    }
}

fn public_entity(input: &TaxpayerInput) -> Check {
    if !input.is_public_legal_entity {
        return Check::pass("Not a public entity", "218.5.7");
    }
    Check::fail(
        "Is a public legal entity",
        "218.5.7",
        Disqualification::new(
            ReasonCode::PublicEntity,
            "Public legal entities are not eligible",
        )
        .citing(LegalBasis::tax_code("218.5.7", "Publik hüquqi şəxslər")),
    )
}

fn production_employees(input: &TaxpayerInput) -> Check {
    match (input.does_production, input.avg_quarterly_employees) {
        (true, Some(employees)) if employees > PRODUCTION_EMPLOYEE_THRESHOLD => Check::fail(
            format!(
                "Production with {} employees > {}",
                employees, PRODUCTION_EMPLOYEE_THRESHOLD
            ),
            "218.5.8",
            Disqualification::new(
                ReasonCode::ProductionEmployees,
                format!(
                    "Production activity with more than {} average quarterly employees is not eligible",
                    PRODUCTION_EMPLOYEE_THRESHOLD
                ),
            )
            .citing(LegalBasis::tax_code(
                "218.5.8",
                "İstehsal fəaliyyəti göstərən və rüblük orta işçi sayı 10 nəfərdən çox olan vergi ödəyiciləri",
            )),
        ),
        _ => Check::pass("Production employee threshold OK", "218.5.8"),
    }
}

/// Shared 30% e-invoice exception logic for wholesale (218.6.1) and B2B
/// works/services (218.6.2). A missing ratio is treated as a failure.
struct EinvoiceException {
    label: &'static str,
    activity_article: &'static str,
    activity_description: &'static str,
    exception_article: &'static str,
    exception_description: &'static str,
    operations: &'static str,
    exceeded: ReasonCode,
    unverified: ReasonCode,
}

impl EinvoiceException {
    fn check(&self, active: bool, ratio: Option<Decimal>) -> Check {
        if !active {
            return Check::pass(format!("No {}", self.label), self.activity_article);
        }
        let activity_basis =
            || LegalBasis::tax_code(self.activity_article, self.activity_description);

        match ratio {
            Some(ratio) if ratio > EINVOICE_RATIO_THRESHOLD => Check::fail(
                format!(
                    "{} e-invoice ratio {} > {}",
                    self.label, ratio, EINVOICE_RATIO_THRESHOLD
                ),
                self.activity_article,
                Disqualification::new(
                    self.exceeded,
                    format!(
                        "{} e-invoiced operations exceed 30% of quarterly {} operations",
                        self.label, self.operations
                    ),
                )
                .citing(activity_basis())
                .citing(LegalBasis::tax_code(
                    self.exception_article,
                    self.exception_description,
                )),
            ),
            Some(ratio) => Check::pass(
                format!(
                    "{} e-invoice ratio {} <= {} - exception applies",
                    self.label, ratio, EINVOICE_RATIO_THRESHOLD
                ),
                self.exception_article,
            ),
            None => Check::fail(
                format!("{} without e-invoice ratio - assumed disqualified", self.label),
                self.activity_article,
                Disqualification::new(
                    self.unverified,
                    format!("{} activity without 30% exception verification", self.label),
                )
                .citing(activity_basis()),
            ),
        }
    }
}

const WHOLESALE: EinvoiceException = EinvoiceException {
    label: "Wholesale",
    activity_article: "218.5.9",
    activity_description: "Topdan ticarət fəaliyyəti göstərən vergi ödəyiciləri",
    exception_article: "218.6.1",
    exception_description: "Elektron qaimə-faktura ilə topdan satış əməliyyatları rüblük ticarət əməliyyatlarının 30%-dən çox olmamalıdır",
    operations: "trade",
    exceeded: ReasonCode::WholesaleExceeded,
    unverified: ReasonCode::Wholesale,
};

const B2B_WORKS_SERVICES: EinvoiceException = EinvoiceException {
    label: "B2B works/services",
    activity_article: "218.5.10",
    activity_description: "Hüquqi şəxslərə və ya qeydiyyatda olan sahibkarlara iş görən və ya xidmət göstərən vergi ödəyiciləri",
    exception_article: "218.6.2",
    exception_description: "Elektron qaimə-faktura ilə B2B əməliyyatları rüblük iş/xidmət əməliyyatlarının 30%-dən çox olmamalıdır",
    operations: "works/services",
    exceeded: ReasonCode::B2bExceeded,
    unverified: ReasonCode::B2bWorksServices,
};

fn wholesale(input: &TaxpayerInput) -> Check {
    WHOLESALE.check(input.does_wholesale, input.wholesale_einvoice_ratio)
}

fn b2b_works_services(input: &TaxpayerInput) -> Check {
    B2B_WORKS_SERVICES.check(input.does_b2b_works_services, input.b2b_einvoice_ratio)
}

fn precious_goods(input: &TaxpayerInput) -> Check {
    if !input.sells_gold_jewelry_diamonds {
        return Check::pass("No gold, jewelry or diamond sales", "218.5.11");
    }
    Check::fail(
        "Sells gold, jewelry, or diamonds",
        "218.5.11",
        Disqualification::new(
            ReasonCode::PreciousGoods,
            "Gold, jewelry, and diamond sellers are not eligible",
        )
        .citing(LegalBasis::tax_code(
            "218.5.11",
            "Qızıl, zərgərlik məmulatları və almaz satan vergi ödəyiciləri",
        )),
    )
}

fn fur_leather(input: &TaxpayerInput) -> Check {
    if !input.sells_fur_leather {
        return Check::pass("No fur or leather sales", "218.5.12");
    }
    Check::fail(
        "Sells fur or leather products",
        "218.5.12",
        Disqualification::new(
            ReasonCode::FurLeather,
            "Fur and leather product sellers are not eligible",
        )
        .citing(LegalBasis::tax_code(
            "218.5.12",
            "Xəz və dəri məmulatları satan vergi ödəyiciləri",
        )),
    )
}

/// 218.5.13. The compulsory insurance carve-out suppresses the whole check.
fn licensed_activities(input: &TaxpayerInput) -> Check {
    let codes = &input.licensed_activity_codes;
    if codes.is_empty() {
        return Check::pass("No licensed activities", "218.5.13");
    }

    if input.has_compulsory_insurance_carveout {
        if !codes.iter().any(|c| c.carveout_eligible()) {
            log::warn!(
                "Compulsory insurance carve-out claimed for activities outside the allowlist: {:?}",
                codes
            );
        }
        return Check::pass(
            "Has licensed activities but compulsory insurance carve-out applies",
            "218.5.13",
        );
    }

    let disqualifying: Vec<String> = codes
        .iter()
        .filter(|c| c.disqualifies())
        .map(|c| c.to_string())
        .collect();
    if disqualifying.is_empty() {
        return Check::pass("Licensed activities do not disqualify", "218.5.13");
    }

    let listed = disqualifying.join(", ");
    Check::fail(
        format!("Has licensed activities without carve-out: {}", listed),
        "218.5.13",
        Disqualification::new(
            ReasonCode::LicensedActivity,
            format!(
                "Licensed activities ({}) are not eligible without compulsory insurance carve-out",
                listed
            ),
        )
        .citing(LegalBasis::tax_code(
            "218.5.13",
            "Lisenziya tələb olunan fəaliyyət növləri ilə məşğul olan vergi ödəyiciləri (icbari sığorta müqavilələri üzrə xidmət istisna olmaqla)",
        ))
        .citing(LegalBasis::license_law(
            "Annex 1",
            "Lisenziyalar və icazələr haqqında Qanun, Əlavə 1",
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LicensedActivityCode, TurnoverInput};
    use rust_decimal_macros::dec;

    fn eligible_route(input: &TaxpayerInput) -> TaxRoute {
        match check_eligibility(input, &mut Trace::Disabled) {
            Eligibility::Eligible { route, .. } => route,
            Eligibility::Ineligible(d) => panic!("expected eligible, got {}", d.reason_code),
        }
    }

    fn reason(input: &TaxpayerInput) -> ReasonCode {
        match check_eligibility(input, &mut Trace::Disabled) {
            Eligibility::Eligible { route, .. } => panic!("expected ineligible, got {}", route),
            Eligibility::Ineligible(d) => d.reason_code,
        }
    }

    fn with_turnover(gross: Decimal) -> TaxpayerInput {
        TaxpayerInput {
            turnover: Some(TurnoverInput::new(gross)),
            ..Default::default()
        }
    }

    #[test]
    fn vat_registration_is_a_hard_stop() {
        let input = TaxpayerInput {
            is_vat_registered: true,
            route_auto_property: true,
            is_credit_org: true,
            ..with_turnover(dec!(10))
        };
        let mut trace = Trace::new(true);
        let outcome = check_eligibility(&input, &mut trace);

        assert!(matches!(
            outcome,
            Eligibility::Ineligible(Disqualification { reason_code: ReasonCode::VatRegistered, .. })
        ));
        assert_eq!(trace.entries().unwrap().len(), 1);
    }

    #[test]
    fn no_turnover_defaults_to_general() {
        assert_eq!(eligible_route(&TaxpayerInput::default()), TaxRoute::General);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        assert_eq!(eligible_route(&with_turnover(dec!(200000))), TaxRoute::General);
        assert_eq!(
            reason(&with_turnover(dec!(200000.01))),
            ReasonCode::TurnoverExceeded
        );
    }

    #[test]
    fn trade_or_catering_over_threshold_changes_route() {
        let trade = TaxpayerInput {
            does_trade: true,
            ..with_turnover(dec!(250000))
        };
        assert_eq!(eligible_route(&trade), TaxRoute::TradeCateringOver200k);

        let catering = TaxpayerInput {
            does_catering: true,
            ..with_turnover(dec!(250000))
        };
        assert_eq!(eligible_route(&catering), TaxRoute::TradeCateringOver200k);

        let under = TaxpayerInput {
            does_trade: true,
            ..with_turnover(dec!(150000))
        };
        assert_eq!(eligible_route(&under), TaxRoute::General);
    }

    #[test]
    fn automatic_routes_bypass_218_5_disqualifiers() {
        let input = TaxpayerInput {
            route_auto_transport: true,
            produces_excise_goods: true,
            has_rental_income: true,
            does_wholesale: true,
            ..with_turnover(dec!(5000000))
        };
        assert_eq!(eligible_route(&input), TaxRoute::AutoTransport);
    }

    #[test]
    fn automatic_routes_still_check_financial_sector() {
        let input = TaxpayerInput {
            route_auto_land: true,
            is_securities_licensed: true,
            ..Default::default()
        };
        assert_eq!(reason(&input), ReasonCode::Disqualifier);
    }

    #[test]
    fn disqualifiers_short_circuit_in_order() {
        let input = TaxpayerInput {
            has_royalty_income: true,
            is_natural_monopoly: true,
            sells_fur_leather: true,
            ..Default::default()
        };
        let mut trace = Trace::new(true);
        check_eligibility(&input, &mut trace);

        let entries = trace.entries().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.rule, "rental_royalty");
        assert!(!last.passed);
        assert_eq!(last.details, "Has royalty income");
        assert!(entries.iter().all(|e| e.rule != "natural_monopoly"));
    }

    #[test]
    fn each_disqualifier_has_its_reason() {
        let cases = [
            (TaxpayerInput { produces_excise_goods: true, ..Default::default() }, ReasonCode::ExciseProducer),
            (TaxpayerInput { is_pawnshop: true, ..Default::default() }, ReasonCode::FinancialSector),
            (TaxpayerInput { is_non_state_pension_fund: true, ..Default::default() }, ReasonCode::PensionFund),
            (TaxpayerInput { has_rental_income: true, ..Default::default() }, ReasonCode::RentalRoyalty),
            (TaxpayerInput { is_natural_monopoly: true, ..Default::default() }, ReasonCode::NaturalMonopoly),
            (TaxpayerInput { is_public_legal_entity: true, ..Default::default() }, ReasonCode::PublicEntity),
            (TaxpayerInput { sells_gold_jewelry_diamonds: true, ..Default::default() }, ReasonCode::PreciousGoods),
            (TaxpayerInput { sells_fur_leather: true, ..Default::default() }, ReasonCode::FurLeather),
        ];
        for (input, expected) in cases {
            assert_eq!(reason(&input), expected);
        }
    }

    #[test]
    fn financial_sector_reports_first_membership() {
        let input = TaxpayerInput {
            is_insurance_market_participant: true,
            is_pawnshop: true,
            ..Default::default()
        };
        match check_eligibility(&input, &mut Trace::Disabled) {
            Eligibility::Ineligible(d) => assert_eq!(
                d.reason_description,
                "Financial sector entities (insurance market professional participant) are not eligible"
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn fixed_assets_only_checked_when_supplied() {
        let over = TaxpayerInput {
            fixed_assets_residual_value: Some(dec!(1000000.01)),
            ..Default::default()
        };
        assert_eq!(reason(&over), ReasonCode::FixedAssetsExceeded);

        let at = TaxpayerInput {
            fixed_assets_residual_value: Some(dec!(1000000)),
            ..Default::default()
        };
        assert_eq!(eligible_route(&at), TaxRoute::General);
    }

    #[test]
    fn production_employee_threshold() {
        let eleven = TaxpayerInput {
            does_production: true,
            avg_quarterly_employees: Some(11),
            ..Default::default()
        };
        assert_eq!(reason(&eleven), ReasonCode::ProductionEmployees);

        let ten = TaxpayerInput {
            does_production: true,
            avg_quarterly_employees: Some(10),
            ..Default::default()
        };
        assert_eq!(eligible_route(&ten), TaxRoute::General);

        let unknown = TaxpayerInput {
            does_production: true,
            ..Default::default()
        };
        assert_eq!(eligible_route(&unknown), TaxRoute::General);

        let not_producing = TaxpayerInput {
            avg_quarterly_employees: Some(50),
            ..Default::default()
        };
        assert_eq!(eligible_route(&not_producing), TaxRoute::General);
    }

    #[test]
    fn wholesale_ratio_exception() {
        let at_limit = TaxpayerInput {
            does_wholesale: true,
            wholesale_einvoice_ratio: Some(dec!(0.30)),
            ..Default::default()
        };
        assert_eq!(eligible_route(&at_limit), TaxRoute::General);

        let over = TaxpayerInput {
            does_wholesale: true,
            wholesale_einvoice_ratio: Some(dec!(0.3001)),
            ..Default::default()
        };
        assert_eq!(reason(&over), ReasonCode::WholesaleExceeded);

        let missing = TaxpayerInput {
            does_wholesale: true,
            ..Default::default()
        };
        assert_eq!(reason(&missing), ReasonCode::Wholesale);
    }

    #[test]
    fn wholesale_exceeded_cites_both_articles() {
        let input = TaxpayerInput {
            does_wholesale: true,
            wholesale_einvoice_ratio: Some(dec!(0.5)),
            ..Default::default()
        };
        match check_eligibility(&input, &mut Trace::Disabled) {
            Eligibility::Ineligible(d) => {
                let articles: Vec<_> = d.legal_basis.iter().map(|lb| lb.article.as_str()).collect();
                assert_eq!(articles, ["218.5.9", "218.6.1"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn b2b_ratio_exception() {
        let at_limit = TaxpayerInput {
            does_b2b_works_services: true,
            b2b_einvoice_ratio: Some(dec!(0.3)),
            ..Default::default()
        };
        assert_eq!(eligible_route(&at_limit), TaxRoute::General);

        let over = TaxpayerInput {
            does_b2b_works_services: true,
            b2b_einvoice_ratio: Some(dec!(0.31)),
            ..Default::default()
        };
        assert_eq!(reason(&over), ReasonCode::B2bExceeded);

        let missing = TaxpayerInput {
            does_b2b_works_services: true,
            ..Default::default()
        };
        assert_eq!(reason(&missing), ReasonCode::B2bWorksServices);
    }

    #[test]
    fn ratio_ignored_without_activity() {
        let input = TaxpayerInput {
            wholesale_einvoice_ratio: Some(dec!(0.9)),
            b2b_einvoice_ratio: Some(dec!(0.9)),
            ..Default::default()
        };
        assert_eq!(eligible_route(&input), TaxRoute::General);
    }

    #[test]
    fn licensed_activity_disqualifies_without_carveout() {
        let input = TaxpayerInput {
            licensed_activity_codes: vec![LicensedActivityCode::Notary],
            ..Default::default()
        };
        assert_eq!(reason(&input), ReasonCode::LicensedActivity);
    }

    #[test]
    fn carveout_suppresses_licensed_check_entirely() {
        let input = TaxpayerInput {
            licensed_activity_codes: vec![
                LicensedActivityCode::PrivateMedical,
                LicensedActivityCode::Banking,
            ],
            has_compulsory_insurance_carveout: true,
            ..Default::default()
        };
        assert_eq!(eligible_route(&input), TaxRoute::General);
    }

    #[test]
    fn every_step_is_traced_on_success() {
        let mut trace = Trace::new(true);
        check_eligibility(&with_turnover(dec!(100000)), &mut trace);

        let rules: Vec<_> = trace.entries().unwrap().iter().map(|e| e.rule).collect();
        assert_eq!(
            rules,
            [
                "vat_registration",
                "turnover_calculation",
                "turnover_threshold",
                "excise_goods",
                "financial_sector",
                "pension_fund",
                "rental_royalty",
                "natural_monopoly",
                "fixed_assets",
                "public_entity",
                "production_employees",
                "wholesale",
                "b2b_works_services",
                "precious_goods",
                "fur_leather",
                "licensed_activities",
            ]
        );
        assert!(trace.entries().unwrap().iter().all(|e| e.passed));
    }
}
