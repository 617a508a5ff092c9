//! Per-route simplified tax calculators (Tax Code 219, 220)

use super::rates::{
    zone_coefficient, GENERAL_RATE, LAND_TAX_MULTIPLIER, PROPERTY_EXEMPT_AREA_M2,
    PROPERTY_RATE_PER_M2, TRADE_CATERING_GENERAL_RATE, TRADE_CATERING_POS_RATE,
};
use crate::core::{
    Assessment, LegalBasis, PropertyTransferInput, PropertyType, TaxRoute, TaxpayerInput, Trace,
};
use rust_decimal::Decimal;

/// Calculator output: the assessment plus the citations it relied on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub assessment: Assessment,
    pub legal_basis: Vec<LegalBasis>,
}

impl Calculation {
    fn new(assessment: Assessment, legal_basis: Vec<LegalBasis>) -> Self {
        Calculation {
            assessment,
            legal_basis,
        }
    }

    /// Route determined but the input lacks what the calculation needs
    fn needs_input(route: TaxRoute, article: &str, description: &str) -> Self {
        log::debug!("{}: {}", route, description);
        Calculation::new(
            Assessment::route_only(route),
            vec![LegalBasis::tax_code(article, description)],
        )
    }
}

/// Dispatch to the calculator for `route`
pub fn calculate(route: TaxRoute, input: &TaxpayerInput, trace: &mut Trace) -> Calculation {
    match route {
        TaxRoute::General => general(input, trace),
        TaxRoute::TradeCateringOver200k => trade_catering(input, trace),
        TaxRoute::AutoProperty => match &input.property_transfer {
            Some(property) => property_transfer(property, trace),
            None => Calculation::needs_input(
                route,
                "218.4.3",
                "Property details required for calculation",
            ),
        },
        TaxRoute::AutoLand => land(trace),
        TaxRoute::AutoTransport | TaxRoute::AutoBettingLottery | TaxRoute::AutoFixedActivity => {
            trace.record(
                "fixed_rate_route",
                true,
                format!("Route {} uses a fixed or external-table rate", route),
                route.article(),
            );
            Calculation::new(Assessment::route_only(route), Vec::new())
        }
    }
}

/// 220.1: 2% of gross turnover
fn general(input: &TaxpayerInput, trace: &mut Trace) -> Calculation {
    let Some(turnover) = &input.turnover else {
        return Calculation::needs_input(
            TaxRoute::General,
            "220",
            "Tax calculation requires additional input",
        );
    };

    let tax_base = turnover.gross_turnover_12m;
    let tax_amount = tax_base * GENERAL_RATE;
    log::debug!("general_tax: {} x {} = {}", tax_base, GENERAL_RATE, tax_amount);
    trace.record(
        "general_tax",
        true,
        format!("Turnover: {} × 2% = {}", tax_base, tax_amount),
        "220.1",
    );

    Calculation::new(
        Assessment {
            route: TaxRoute::General,
            tax_amount: Some(tax_amount),
            tax_base: Some(tax_base),
            tax_rate: Some(GENERAL_RATE),
            exemptions_applied: Vec::new(),
        },
        vec![LegalBasis::tax_code(
            "220.1",
            "Sadələşdirilmiş verginin dərəcəsi vergi tutulan əməliyyatların həcminin 2 faizi",
        )],
    )
}

/// 220.1-1: POS turnover at 6%, the rest of gross turnover at 8%. The
/// result has no single rate.
fn trade_catering(input: &TaxpayerInput, trace: &mut Trace) -> Calculation {
    let Some(turnover) = &input.turnover else {
        return Calculation::needs_input(
            TaxRoute::TradeCateringOver200k,
            "220.1-1",
            "Turnover details required for calculation",
        );
    };

    let gross = turnover.gross_turnover_12m;
    let pos = turnover.pos_eligible();
    let mut other = gross - pos;
    if other < Decimal::ZERO {
        log::warn!(
            "POS turnover {} exceeds gross turnover {}, taxing no turnover at the general rate",
            pos,
            gross
        );
        other = Decimal::ZERO;
    }

    let pos_tax = pos * TRADE_CATERING_POS_RATE;
    let other_tax = other * TRADE_CATERING_GENERAL_RATE;
    let total = pos_tax + other_tax;
    log::debug!("trade_catering_tax: {} + {} = {}", pos_tax, other_tax, total);
    trace.record(
        "trade_catering_tax",
        true,
        format!(
            "POS: {} × 6% = {}, Other: {} × 8% = {}, Total: {}",
            pos, pos_tax, other, other_tax, total
        ),
        "220.1-1",
    );

    let mut exemptions_applied = Vec::new();
    if pos > Decimal::ZERO {
        exemptions_applied.push(format!("POS turnover ({} AZN) taxed at 6% rate", pos));
    }

    Calculation::new(
        Assessment {
            route: TaxRoute::TradeCateringOver200k,
            tax_amount: Some(total),
            tax_base: Some(gross),
            tax_rate: None,
            exemptions_applied,
        },
        vec![LegalBasis::tax_code(
            "220.1-1",
            "Ticarət və ictimai iaşə üçün 8% (ümumi) və 6% (POS əməliyyatları, 01.01.2026-dan 3 il müddətinə)",
        )],
    )
}

/// A full property exemption (218-1.1.5.1, 218-1.1.5.1-1, 218-1.1.5.2)
struct FullExemption {
    applies: fn(&PropertyTransferInput) -> bool,
    details: &'static str,
    article: &'static str,
    label: &'static str,
    citations: &'static [(&'static str, &'static str)],
}

/// Checked in order, the first that applies wins
const FULL_EXEMPTIONS: &[FullExemption] = &[
    FullExemption {
        applies: |p| p.is_registered_3yr,
        details: "Exempt: registered at address for ≥3 calendar years",
        article: "218-1.1.5.1",
        label: "3-year registration exemption (218-1.1.5.1)",
        citations: &[(
            "218-1.1.5.1",
            "Həmin yaşayış sahəsinin ünvanında azı 3 təqvim ili qeydiyyatda olduqda vergidən azaddır",
        )],
    },
    FullExemption {
        applies: |p| p.has_proof_3yr_one_home,
        details: "Exempt: 3-year proof with one home ownership",
        article: "218-1.1.5.1-1",
        label: "3-year residence proof + one home exemption (218-1.1.5.1-1)",
        citations: &[(
            "218-1.1.5.1-1",
            "3 il ərzində yaşadığını sübut edən və yalnız bir yaşayış sahəsinə malik olan şəxs vergidən azaddır",
        )],
    },
    FullExemption {
        applies: |p| p.is_family_gift_inheritance,
        details: "Exempt: family gift/inheritance",
        article: "102.1.3.2",
        label: "Family gift/inheritance exemption (102.1.3.2)",
        citations: &[
            (
                "218-1.1.5.2",
                "Ailə üzvündən bağışlama və ya vərəsəlik yolu ilə əldə edilmiş əmlak",
            ),
            (
                "102.1.3.2",
                "Ailə üzvləri arasında əmlakın bağışlanması vergidən azaddır",
            ),
        ],
    },
];

/// 220.8: 15 AZN per taxable m² times the zone coefficient
fn property_transfer(property: &PropertyTransferInput, trace: &mut Trace) -> Calculation {
    if let Some(exemption) = FULL_EXEMPTIONS.iter().find(|e| (e.applies)(property)) {
        log::debug!("property_exemption: {}", exemption.label);
        trace.record("property_exemption", true, exemption.details, exemption.article);
        return Calculation::new(
            Assessment {
                tax_amount: Some(Decimal::ZERO),
                exemptions_applied: vec![exemption.label.to_string()],
                ..Assessment::route_only(TaxRoute::AutoProperty)
            },
            exemption
                .citations
                .iter()
                .map(|(article, description)| LegalBasis::tax_code(article, description))
                .collect(),
        );
    }

    let mut exemptions_applied = Vec::new();
    let mut taxable_area = property.area_m2;
    if property.property_type == PropertyType::Residential {
        taxable_area = (property.area_m2 - PROPERTY_EXEMPT_AREA_M2).max(Decimal::ZERO);
        if taxable_area < property.area_m2 {
            exemptions_applied.push("30 m² exemption applied (218-1.1.5.3)".to_string());
            trace.record(
                "property_30m2_exemption",
                true,
                format!(
                    "Applied 30 m² exemption: {} - 30 = {} taxable",
                    property.area_m2, taxable_area
                ),
                "218-1.1.5.3",
            );
        }
    }

    let coefficient = zone_coefficient(property.location_zone);
    let tax_base = taxable_area * PROPERTY_RATE_PER_M2;
    let tax_amount = tax_base * coefficient;
    log::debug!(
        "property_tax_calc: {} m² in {:?} = {}",
        taxable_area,
        property.location_zone,
        tax_amount
    );
    trace.record(
        "property_tax_calc",
        true,
        format!(
            "Area: {} m², Base rate: {}, Zone coef: {}, Tax: {}",
            taxable_area, PROPERTY_RATE_PER_M2, coefficient, tax_amount
        ),
        "220.8",
    );

    Calculation::new(
        Assessment {
            route: TaxRoute::AutoProperty,
            tax_amount: Some(tax_amount),
            tax_base: Some(tax_base),
            tax_rate: Some(coefficient),
            exemptions_applied,
        },
        vec![
            LegalBasis::tax_code(
                "220.8",
                "Yaşayış sahəsinin özgəninkiləşdirilməsindən sadələşdirilmiş vergi 1 kv.m üçün 15 manat × zona əmsalı",
            ),
            LegalBasis::tax_code(
                "218-1.1.5.3",
                "Mülkiyyətində olan yaşayış sahəsinin ilk 30 kv.m-i vergidən azaddır",
            ),
        ],
    )
}

/// 220.8: twice the 206.1-1 land tax. The land tax table lives outside the
/// engine so no amount is computed here.
fn land(trace: &mut Trace) -> Calculation {
    trace.record(
        "land_tax",
        true,
        format!(
            "Land transfer taxed at {}× the 206.1-1 land tax, computed downstream",
            LAND_TAX_MULTIPLIER
        ),
        "220.8",
    );
    Calculation::new(
        Assessment::route_only(TaxRoute::AutoLand),
        vec![
            LegalBasis::tax_code(
                "220.8",
                "Torpaq sahəsinin özgəninkiləşdirilməsindən sadələşdirilmiş vergi 206.1-1-ci maddəyə əsasən torpaq vergisinin 2 misli",
            ),
            LegalBasis::tax_code("206.1-1", "Kənd təsərrüfatı torpaqlarının vergisi"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LocationZone, TurnoverInput};
    use rust_decimal_macros::dec;

    fn with_turnover(turnover: TurnoverInput) -> TaxpayerInput {
        TaxpayerInput {
            turnover: Some(turnover),
            ..Default::default()
        }
    }

    fn property(
        property_type: PropertyType,
        area: Decimal,
        zone: LocationZone,
    ) -> PropertyTransferInput {
        PropertyTransferInput::new(property_type, area, zone)
    }

    fn property_tax(property: PropertyTransferInput) -> Calculation {
        property_transfer(&property, &mut Trace::Disabled)
    }

    #[test]
    fn general_is_two_percent_of_gross() {
        let calc = calculate(
            TaxRoute::General,
            &with_turnover(TurnoverInput::new(dec!(150000))),
            &mut Trace::Disabled,
        );
        assert_eq!(calc.assessment.tax_amount, Some(dec!(3000.00)));
        assert_eq!(calc.assessment.tax_base, Some(dec!(150000)));
        assert_eq!(calc.assessment.tax_rate, Some(dec!(0.02)));
        assert_eq!(calc.legal_basis[0].article, "220.1");
    }

    #[test]
    fn general_is_exact_for_odd_amounts() {
        for t in [dec!(0.01), dec!(199999.99), dec!(12345.67), dec!(200000)] {
            let calc = calculate(
                TaxRoute::General,
                &with_turnover(TurnoverInput::new(t)),
                &mut Trace::Disabled,
            );
            assert_eq!(calc.assessment.tax_amount, Some(t * dec!(0.02)));
        }
        let calc = calculate(
            TaxRoute::General,
            &with_turnover(TurnoverInput::new(dec!(199999.99))),
            &mut Trace::Disabled,
        );
        assert_eq!(calc.assessment.tax_amount, Some(dec!(3999.9998)));
    }

    #[test]
    fn general_without_turnover_is_partial() {
        let calc = calculate(TaxRoute::General, &TaxpayerInput::default(), &mut Trace::Disabled);
        assert_eq!(calc.assessment, Assessment::route_only(TaxRoute::General));
        assert_eq!(calc.legal_basis[0].article, "220");
    }

    #[test]
    fn trade_catering_split_rate() {
        let turnover = TurnoverInput {
            pos_retail_nonregistered_12m: dec!(100000),
            ..TurnoverInput::new(dec!(300000))
        };
        let calc = calculate(
            TaxRoute::TradeCateringOver200k,
            &with_turnover(turnover),
            &mut Trace::Disabled,
        );
        assert_eq!(calc.assessment.tax_amount, Some(dec!(22000)));
        assert_eq!(calc.assessment.tax_base, Some(dec!(300000)));
        assert_eq!(calc.assessment.tax_rate, None);
        assert_eq!(
            calc.assessment.exemptions_applied,
            vec!["POS turnover (100000 AZN) taxed at 6% rate"]
        );
    }

    #[test]
    fn trade_catering_without_pos_has_no_label() {
        let calc = calculate(
            TaxRoute::TradeCateringOver200k,
            &with_turnover(TurnoverInput::new(dec!(250000))),
            &mut Trace::Disabled,
        );
        assert_eq!(calc.assessment.tax_amount, Some(dec!(20000)));
        assert!(calc.assessment.exemptions_applied.is_empty());
    }

    #[test]
    fn trade_catering_remainder_never_negative() {
        let turnover = TurnoverInput {
            pos_services_nonregistered_12m: dec!(300000),
            ..TurnoverInput::new(dec!(250000))
        };
        let calc = calculate(
            TaxRoute::TradeCateringOver200k,
            &with_turnover(turnover),
            &mut Trace::Disabled,
        );
        assert_eq!(calc.assessment.tax_amount, Some(dec!(18000)));
    }

    #[test]
    fn registration_exemption_wins_over_others() {
        for (proof, gift) in [(false, false), (true, false), (false, true), (true, true)] {
            let calc = property_tax(PropertyTransferInput {
                is_registered_3yr: true,
                has_proof_3yr_one_home: proof,
                is_family_gift_inheritance: gift,
                ..property(PropertyType::Residential, dec!(100), LocationZone::BakuCenter)
            });
            assert_eq!(calc.assessment.tax_amount, Some(dec!(0)));
            assert_eq!(
                calc.assessment.exemptions_applied,
                vec!["3-year registration exemption (218-1.1.5.1)"]
            );
            assert_eq!(calc.legal_basis[0].article, "218-1.1.5.1");
        }
    }

    #[test]
    fn residence_proof_wins_over_family_gift() {
        let mut trace = Trace::new(true);
        let calc = property_transfer(
            &PropertyTransferInput {
                has_proof_3yr_one_home: true,
                is_family_gift_inheritance: true,
                ..property(PropertyType::Residential, dec!(80), LocationZone::BakuOther)
            },
            &mut trace,
        );
        assert_eq!(calc.assessment.tax_amount, Some(dec!(0)));
        assert_eq!(
            calc.assessment.exemptions_applied,
            vec!["3-year residence proof + one home exemption (218-1.1.5.1-1)"]
        );
        let articles: Vec<_> = calc.legal_basis.iter().map(|lb| lb.article.as_str()).collect();
        assert_eq!(articles, ["218-1.1.5.1-1"]);
        assert_eq!(trace.entries().unwrap().len(), 1);
    }

    #[test]
    fn family_gift_cites_both_articles() {
        let calc = property_tax(PropertyTransferInput {
            is_family_gift_inheritance: true,
            ..property(PropertyType::NonResidential, dec!(500), LocationZone::BakuOther)
        });
        assert_eq!(calc.assessment.tax_amount, Some(dec!(0)));
        let articles: Vec<_> = calc.legal_basis.iter().map(|lb| lb.article.as_str()).collect();
        assert_eq!(articles, ["218-1.1.5.2", "102.1.3.2"]);
    }

    #[test]
    fn residential_gets_30m2_allowance() {
        let calc = property_tax(property(PropertyType::Residential, dec!(130), LocationZone::Rural));
        assert_eq!(calc.assessment.tax_amount, Some(dec!(1500)));
        assert_eq!(calc.assessment.tax_base, Some(dec!(1500)));
        assert_eq!(calc.assessment.tax_rate, Some(dec!(1.0)));
        assert_eq!(
            calc.assessment.exemptions_applied,
            vec!["30 m² exemption applied (218-1.1.5.3)"]
        );
    }

    #[test]
    fn small_residential_is_free() {
        for area in [dec!(0.5), dec!(29.99), dec!(30)] {
            let calc = property_tax(property(
                PropertyType::Residential,
                area,
                LocationZone::BakuCenter,
            ));
            assert_eq!(calc.assessment.tax_amount, Some(dec!(0)));
        }
    }

    #[test]
    fn non_residential_has_no_allowance() {
        let calc = property_tax(property(
            PropertyType::NonResidential,
            dec!(20),
            LocationZone::SumgaitGanjaLankaran,
        ));
        // 20 * 15 * 1.5
        assert_eq!(calc.assessment.tax_amount, Some(dec!(450)));
        assert!(calc.assessment.exemptions_applied.is_empty());
    }

    #[test]
    fn zone_coefficient_scales_tax() {
        let calc = property_tax(property(
            PropertyType::Residential,
            dec!(100),
            LocationZone::BakuCenter,
        ));
        // 70 * 15 * 2.5
        assert_eq!(calc.assessment.tax_amount, Some(dec!(2625)));
        assert_eq!(calc.assessment.tax_rate, Some(dec!(2.5)));
    }

    #[test]
    fn property_route_without_details_is_partial() {
        let calc = calculate(
            TaxRoute::AutoProperty,
            &TaxpayerInput::default(),
            &mut Trace::Disabled,
        );
        assert_eq!(calc.assessment.tax_amount, None);
        assert_eq!(calc.legal_basis[0].article, "218.4.3");
    }

    #[test]
    fn land_cites_multiplier_without_amount() {
        let mut trace = Trace::new(true);
        let calc = calculate(TaxRoute::AutoLand, &TaxpayerInput::default(), &mut trace);
        assert_eq!(calc.assessment.tax_amount, None);
        assert_eq!(calc.legal_basis.len(), 2);
        let entry = &trace.entries().unwrap()[0];
        assert_eq!(entry.rule, "land_tax");
        assert!(entry.details.starts_with("Land transfer taxed at 2×"));
    }

    #[test]
    fn fixed_rate_routes_compute_nothing() {
        for route in [
            TaxRoute::AutoTransport,
            TaxRoute::AutoBettingLottery,
            TaxRoute::AutoFixedActivity,
        ] {
            let calc = calculate(
                route,
                &with_turnover(TurnoverInput::new(dec!(50000))),
                &mut Trace::Disabled,
            );
            assert_eq!(calc.assessment, Assessment::route_only(route));
            assert!(calc.legal_basis.is_empty());
        }
    }
}
