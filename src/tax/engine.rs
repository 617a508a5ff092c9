use super::calculators::calculate;
use super::eligibility::{check_eligibility, Eligibility};
use crate::core::{TaxCalculationResult, TaxpayerInput, Trace};

/// Evaluate simplified tax eligibility and, when eligible, the tax due.
///
/// Pure function of its input: ineligibility is a normal result, and
/// routes missing the data they need come back eligible with no amount.
/// With `trace_enabled` every rule evaluated is recorded in order.
pub fn evaluate(input: &TaxpayerInput, trace_enabled: bool) -> TaxCalculationResult {
    let mut trace = Trace::new(trace_enabled);

    let result = match check_eligibility(input, &mut trace) {
        Eligibility::Ineligible(disqualification) => {
            TaxCalculationResult::ineligible(disqualification, trace)
        }
        Eligibility::Eligible {
            route,
            mut legal_basis,
        } => {
            let calculation = calculate(route, input, &mut trace);
            legal_basis.extend(calculation.legal_basis);
            TaxCalculationResult::eligible(calculation.assessment, legal_basis, trace)
        }
    };

    match (result.reason_code(), result.route(), result.tax_amount()) {
        (Some(code), _, _) => log::info!("Not eligible: {}", code),
        (None, Some(route), Some(amount)) => {
            log::info!("Eligible via {}: tax {} AZN", route, amount)
        }
        (None, Some(route), None) => log::info!("Eligible via {}: no amount computed", route),
        (None, None, _) => {}
    }
    result
}
