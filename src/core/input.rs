use super::activities::LicensedActivityCode;
use super::route::TaxRoute;
use azsim_derive::FieldCatalog;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must not be negative: {value}")]
    Negative { field: &'static str, value: Decimal },
    #[error("{field} must be between 0 and 1: {value}")]
    RatioOutOfRange { field: &'static str, value: Decimal },
    #[error("property_transfer.area_m2 must be greater than zero: {0}")]
    NonPositiveArea(Decimal),
    #[error("{field} must not exceed {limit}: {value}")]
    TooLarge {
        field: &'static str,
        value: Decimal,
        limit: Decimal,
    },
}

/// Largest accepted AZN amount. Keeps every rate and coefficient product
/// well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Largest accepted property area in square meters
pub const MAX_AREA_M2: Decimal = dec!(1000000000);

/// One entry of a generated input field catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// VAT-exempt categories under Tax Code Article 164. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VatExemptCategory {
    FinancialServices,
    TextbookPublishing,
    MedicalServices,
    EducationServices,
    InsuranceServices,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    NonResidential,
}

/// Location zone for property transfers (220.8.1-220.8.4), highest value first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocationZone {
    BakuCenter,
    BakuOther,
    SumgaitGanjaLankaran,
    OtherCities,
    Rural,
}

/// Turnover figures for the 200,000 AZN threshold test (218.1.1, 218.1-1)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, FieldCatalog)]
pub struct TurnoverInput {
    /// Total gross turnover for the last 12 consecutive months (AZN)
    #[schemars(with = "f64")]
    pub gross_turnover_12m: Decimal,
    /// VAT-exempt turnover under Article 164 (AZN)
    #[serde(default)]
    #[schemars(with = "f64")]
    pub vat_exempt_turnover_12m: Decimal,
    /// Categories of VAT-exempt operations
    #[serde(default)]
    pub vat_exempt_categories: Vec<VatExemptCategory>,
    /// POS non-cash retail turnover to unregistered persons (AZN)
    #[serde(default)]
    #[schemars(with = "f64")]
    pub pos_retail_nonregistered_12m: Decimal,
    /// POS non-cash services turnover to unregistered persons (AZN)
    #[serde(default)]
    #[schemars(with = "f64")]
    pub pos_services_nonregistered_12m: Decimal,
}

impl TurnoverInput {
    #[cfg(test)]
    pub fn new(gross_turnover_12m: Decimal) -> Self {
        TurnoverInput {
            gross_turnover_12m,
            ..Default::default()
        }
    }

    /// POS turnover eligible for the reduced coefficient and rate
    pub fn pos_eligible(&self) -> Decimal {
        self.pos_retail_nonregistered_12m + self.pos_services_nonregistered_12m
    }

    fn validate(&self) -> Result<(), InputError> {
        amount("turnover.gross_turnover_12m", self.gross_turnover_12m)?;
        amount("turnover.vat_exempt_turnover_12m", self.vat_exempt_turnover_12m)?;
        amount(
            "turnover.pos_retail_nonregistered_12m",
            self.pos_retail_nonregistered_12m,
        )?;
        amount(
            "turnover.pos_services_nonregistered_12m",
            self.pos_services_nonregistered_12m,
        )
    }
}

/// Real estate transfer details for the 218.4.3 route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, FieldCatalog)]
pub struct PropertyTransferInput {
    /// Residential or non-residential
    pub property_type: PropertyType,
    /// Property area in square meters
    #[schemars(with = "f64")]
    pub area_m2: Decimal,
    /// Location zone determining the coefficient
    pub location_zone: LocationZone,
    /// Registered at the property address for at least 3 calendar years (218-1.1.5.1)
    #[serde(default)]
    pub is_registered_3yr: bool,
    /// Proof of 3-year residence and owns only one residential property (218-1.1.5.1-1)
    #[serde(default)]
    pub has_proof_3yr_one_home: bool,
    /// Received as gift or inheritance from a family member (102.1.3.2)
    #[serde(default)]
    pub is_family_gift_inheritance: bool,
}

impl PropertyTransferInput {
    #[cfg(test)]
    pub fn new(property_type: PropertyType, area_m2: Decimal, location_zone: LocationZone) -> Self {
        PropertyTransferInput {
            property_type,
            area_m2,
            location_zone,
            is_registered_3yr: false,
            has_proof_3yr_one_home: false,
            is_family_gift_inheritance: false,
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        if self.area_m2 <= Decimal::ZERO {
            return Err(InputError::NonPositiveArea(self.area_m2));
        }
        at_most("property_transfer.area_m2", self.area_m2, MAX_AREA_M2)
    }
}

/// Taxpayer answers for the simplified tax evaluation.
///
/// Every field has a default so partial input is accepted; the engine only
/// computes what the supplied data allows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema, FieldCatalog)]
#[serde(default)]
pub struct TaxpayerInput {
    /// Registered for VAT (218.1.1)
    pub is_vat_registered: bool,

    /// Passenger transport/taxi activity (218.4.1)
    pub route_auto_transport: bool,
    /// Betting/lottery activity (218.4.2)
    pub route_auto_betting_lottery: bool,
    /// Transfer/sale of own real estate (218.4.3)
    pub route_auto_property: bool,
    /// Sale/transfer of own land (218.4.5)
    pub route_auto_land: bool,
    /// Fixed activity under 220.10 without employees (218.4.4)
    pub route_auto_fixed_220_10: bool,
    /// Property details for the real estate route
    pub property_transfer: Option<PropertyTransferInput>,

    /// Engaged in trade activity
    pub does_trade: bool,
    /// Engaged in public catering activity
    pub does_catering: bool,
    /// Turnover figures for the threshold test
    pub turnover: Option<TurnoverInput>,

    /// Produces excise or mandatory-label goods (218.5.1)
    pub produces_excise_goods: bool,

    /// Credit organization (218.5.2)
    pub is_credit_org: bool,
    /// Insurance market professional participant (218.5.2)
    pub is_insurance_market_participant: bool,
    /// Investment fund or fund manager (218.5.2)
    pub is_investment_fund: bool,
    /// Licensed securities market participant (218.5.2)
    pub is_securities_licensed: bool,
    /// Pawnshop (218.5.2)
    pub is_pawnshop: bool,

    /// Non-state pension fund (218.5.3)
    pub is_non_state_pension_fund: bool,

    /// Has rental income (218.5.4)
    pub has_rental_income: bool,
    /// Has royalty income (218.5.4)
    pub has_royalty_income: bool,

    /// Designated natural monopoly (218.5.5)
    pub is_natural_monopoly: bool,

    /// Fixed assets residual value at start of year in AZN (218.5.6)
    #[schemars(with = "Option<f64>")]
    pub fixed_assets_residual_value: Option<Decimal>,

    /// Licensed activities from the License Law annex (218.5.13)
    pub licensed_activity_codes: Vec<LicensedActivityCode>,
    /// Services rendered only under compulsory insurance contracts
    pub has_compulsory_insurance_carveout: bool,

    /// Conducts production activity (218.5.8)
    pub does_production: bool,
    /// Average quarterly employee count
    pub avg_quarterly_employees: Option<u32>,

    /// Conducts wholesale trade (218.5.9)
    pub does_wholesale: bool,
    /// Share of e-invoiced wholesale operations in quarterly trade operations (218.6.1)
    #[schemars(with = "Option<f64>")]
    pub wholesale_einvoice_ratio: Option<Decimal>,

    /// Works/services for legal entities or registered individuals (218.5.10)
    pub does_b2b_works_services: bool,
    /// Share of e-invoiced B2B operations in quarterly works/services operations (218.6.2)
    #[schemars(with = "Option<f64>")]
    pub b2b_einvoice_ratio: Option<Decimal>,

    /// Sells gold, jewelry or diamonds (218.5.11)
    pub sells_gold_jewelry_diamonds: bool,
    /// Sells fur or leather products (218.5.12)
    pub sells_fur_leather: bool,

    /// Public legal entity (218.5.7)
    pub is_public_legal_entity: bool,
}

impl TaxpayerInput {
    /// Automatic route claimed by the taxpayer, first match in statutory
    /// priority order
    pub fn automatic_route(&self) -> Option<TaxRoute> {
        [
            (self.route_auto_transport, TaxRoute::AutoTransport),
            (self.route_auto_betting_lottery, TaxRoute::AutoBettingLottery),
            (self.route_auto_property, TaxRoute::AutoProperty),
            (self.route_auto_land, TaxRoute::AutoLand),
            (self.route_auto_fixed_220_10, TaxRoute::AutoFixedActivity),
        ]
        .into_iter()
        .find_map(|(claimed, route)| claimed.then_some(route))
    }

    pub fn does_trade_or_catering(&self) -> bool {
        self.does_trade || self.does_catering
    }

    /// First financial sector membership (218.5.2), in statutory order
    pub fn financial_sector_membership(&self) -> Option<&'static str> {
        [
            (self.is_credit_org, "credit organization"),
            (
                self.is_insurance_market_participant,
                "insurance market professional participant",
            ),
            (self.is_investment_fund, "investment fund or manager"),
            (self.is_securities_licensed, "securities market licensed person"),
            (self.is_pawnshop, "pawnshop"),
        ]
        .into_iter()
        .find_map(|(member, desc)| member.then_some(desc))
    }

    /// Reject values the engine must never see: negative amounts, ratios
    /// outside [0, 1], non-positive property area
    pub fn validate(&self) -> Result<(), InputError> {
        if let Some(turnover) = &self.turnover {
            turnover.validate()?;
        }
        if let Some(property) = &self.property_transfer {
            property.validate()?;
        }
        if let Some(value) = self.fixed_assets_residual_value {
            amount("fixed_assets_residual_value", value)?;
        }
        if let Some(ratio) = self.wholesale_einvoice_ratio {
            unit_ratio("wholesale_einvoice_ratio", ratio)?;
        }
        if let Some(ratio) = self.b2b_einvoice_ratio {
            unit_ratio("b2b_einvoice_ratio", ratio)?;
        }
        Ok(())
    }
}

fn amount(field: &'static str, value: Decimal) -> Result<(), InputError> {
    if value < Decimal::ZERO {
        return Err(InputError::Negative { field, value });
    }
    at_most(field, value, MAX_AMOUNT)
}

fn at_most(field: &'static str, value: Decimal, limit: Decimal) -> Result<(), InputError> {
    if value > limit {
        return Err(InputError::TooLarge {
            field,
            value,
            limit,
        });
    }
    Ok(())
}

fn unit_ratio(field: &'static str, value: Decimal) -> Result<(), InputError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(InputError::RatioOutOfRange { field, value });
    }
    Ok(())
}
