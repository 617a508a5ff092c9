use super::rates::POS_COEFFICIENT;
use crate::core::TurnoverInput;
use rust_decimal::Decimal;

/// Intermediate figures of the threshold-test turnover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustedTurnover {
    /// Gross turnover less VAT-exempt turnover (218.1.1)
    pub vat_taxable: Decimal,
    /// POS retail + services turnover to unregistered persons
    pub pos_eligible: Decimal,
    /// Figure compared against the threshold
    pub adjusted: Decimal,
}

/// Turnover used for the 200,000 AZN test.
///
/// VAT-exempt turnover is excluded entirely and POS non-cash turnover to
/// unregistered persons counts at `POS_COEFFICIENT` (218.1-1):
/// `adjusted = (gross - exempt) - pos + pos * 0.5`. Never below zero.
pub fn adjust_turnover(turnover: &TurnoverInput) -> AdjustedTurnover {
    let vat_taxable = turnover.gross_turnover_12m - turnover.vat_exempt_turnover_12m;
    let pos_eligible = turnover.pos_eligible();
    let adjusted = vat_taxable - pos_eligible + pos_eligible * POS_COEFFICIENT;

    if adjusted < Decimal::ZERO {
        log::warn!(
            "Adjusted turnover {} is negative (exempt/POS figures exceed gross {}), using zero",
            adjusted,
            turnover.gross_turnover_12m
        );
    }

    AdjustedTurnover {
        vat_taxable,
        pos_eligible,
        adjusted: adjusted.max(Decimal::ZERO),
    }
}
