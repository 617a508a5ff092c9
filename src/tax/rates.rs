//! Statutory thresholds, rates and coefficients of the simplified regime

use crate::core::LocationZone;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 218.1.1: adjusted turnover above this disqualifies (except trade/catering)
pub const TURNOVER_THRESHOLD: Decimal = dec!(200000);

/// 218.1-1: weight of POS non-cash turnover to unregistered persons
pub const POS_COEFFICIENT: Decimal = dec!(0.5);

/// 218.5.6
pub const FIXED_ASSETS_THRESHOLD: Decimal = dec!(1000000);

/// 218.5.8: more than this many average quarterly employees disqualifies
/// production activity
pub const PRODUCTION_EMPLOYEE_THRESHOLD: u32 = 10;

/// 218.6.1, 218.6.2: e-invoiced share of operations allowed for wholesale
/// and B2B works/services
pub const EINVOICE_RATIO_THRESHOLD: Decimal = dec!(0.30);

/// 220.1
pub const GENERAL_RATE: Decimal = dec!(0.02);

/// 220.1-1
pub const TRADE_CATERING_GENERAL_RATE: Decimal = dec!(0.08);
/// 220.1-1: POS turnover through the unified KKM system, effective 2026-01-01
/// for three years
pub const TRADE_CATERING_POS_RATE: Decimal = dec!(0.06);

/// 220.8: AZN per square meter
pub const PROPERTY_RATE_PER_M2: Decimal = dec!(15);

/// 218-1.1.5.3: residential area exempt from the property charge
pub const PROPERTY_EXEMPT_AREA_M2: Decimal = dec!(30);

/// 220.8: land transfer pays this multiple of the 206.1-1 land tax
pub const LAND_TAX_MULTIPLIER: Decimal = dec!(2);

const DEFAULT_ZONE_COEFFICIENT: Decimal = dec!(1.0);

/// 220.8.1-220.8.4
const ZONE_COEFFICIENTS: &[(LocationZone, Decimal)] = &[
    (LocationZone::BakuCenter, dec!(2.5)),
    (LocationZone::BakuOther, dec!(2.0)),
    (LocationZone::SumgaitGanjaLankaran, dec!(1.5)),
    (LocationZone::OtherCities, dec!(1.2)),
    (LocationZone::Rural, dec!(1.0)),
];

/// Property coefficient for a zone, 1.0 when the zone is not in the table
pub fn zone_coefficient(zone: LocationZone) -> Decimal {
    ZONE_COEFFICIENTS
        .iter()
        .find(|(z, _)| *z == zone)
        .map(|(_, coefficient)| *coefficient)
        .unwrap_or(DEFAULT_ZONE_COEFFICIENT)
}
