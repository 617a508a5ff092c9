use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Simplified tax route (Tax Code Article 218)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TaxRoute {
    /// Standard threshold-based route (218.1.1)
    #[serde(rename = "general")]
    General,
    /// Trade/catering above the turnover threshold (218.1.2)
    #[serde(rename = "trade_catering_over_200k")]
    TradeCateringOver200k,
    /// Passenger transport/taxi (218.4.1)
    #[serde(rename = "auto_transport")]
    AutoTransport,
    /// Betting/lottery (218.4.2)
    #[serde(rename = "auto_betting_lottery")]
    AutoBettingLottery,
    /// Sale of own real estate (218.4.3)
    #[serde(rename = "auto_property")]
    AutoProperty,
    /// Sale of own land (218.4.5)
    #[serde(rename = "auto_land")]
    AutoLand,
    /// Fixed activity under 220.10 without employees (218.4.4)
    #[serde(rename = "auto_fixed_220_10")]
    AutoFixedActivity,
}

impl TaxRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRoute::General => "general",
            TaxRoute::TradeCateringOver200k => "trade_catering_over_200k",
            TaxRoute::AutoTransport => "auto_transport",
            TaxRoute::AutoBettingLottery => "auto_betting_lottery",
            TaxRoute::AutoProperty => "auto_property",
            TaxRoute::AutoLand => "auto_land",
            TaxRoute::AutoFixedActivity => "auto_fixed_220_10",
        }
    }

    /// Article that places a taxpayer on this route
    pub fn article(&self) -> &'static str {
        match self {
            TaxRoute::General => "218.1.1",
            TaxRoute::TradeCateringOver200k => "218.1.2",
            TaxRoute::AutoTransport => "218.4.1",
            TaxRoute::AutoBettingLottery => "218.4.2",
            TaxRoute::AutoProperty => "218.4.3",
            TaxRoute::AutoFixedActivity => "218.4.4",
            TaxRoute::AutoLand => "218.4.5",
        }
    }

    pub fn is_automatic(&self) -> bool {
        !matches!(self, TaxRoute::General | TaxRoute::TradeCateringOver200k)
    }
}

impl std::fmt::Display for TaxRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Machine-readable reason for ineligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    VatRegistered,
    /// Automatic route blocked by the universal (financial sector) check
    Disqualifier,
    TurnoverExceeded,
    ExciseProducer,
    FinancialSector,
    PensionFund,
    RentalRoyalty,
    NaturalMonopoly,
    FixedAssetsExceeded,
    PublicEntity,
    ProductionEmployees,
    WholesaleExceeded,
    /// Wholesale with no e-invoice ratio supplied
    Wholesale,
    #[serde(rename = "B2B_EXCEEDED")]
    B2bExceeded,
    /// B2B works/services with no e-invoice ratio supplied
    #[serde(rename = "B2B_WORKS_SERVICES")]
    B2bWorksServices,
    PreciousGoods,
    FurLeather,
    LicensedActivity,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::VatRegistered => "VAT_REGISTERED",
            ReasonCode::Disqualifier => "DISQUALIFIER",
            ReasonCode::TurnoverExceeded => "TURNOVER_EXCEEDED",
            ReasonCode::ExciseProducer => "EXCISE_PRODUCER",
            ReasonCode::FinancialSector => "FINANCIAL_SECTOR",
            ReasonCode::PensionFund => "PENSION_FUND",
            ReasonCode::RentalRoyalty => "RENTAL_ROYALTY",
            ReasonCode::NaturalMonopoly => "NATURAL_MONOPOLY",
            ReasonCode::FixedAssetsExceeded => "FIXED_ASSETS_EXCEEDED",
            ReasonCode::PublicEntity => "PUBLIC_ENTITY",
            ReasonCode::ProductionEmployees => "PRODUCTION_EMPLOYEES",
            ReasonCode::WholesaleExceeded => "WHOLESALE_EXCEEDED",
            ReasonCode::Wholesale => "WHOLESALE",
            ReasonCode::B2bExceeded => "B2B_EXCEEDED",
            ReasonCode::B2bWorksServices => "B2B_WORKS_SERVICES",
            ReasonCode::PreciousGoods => "PRECIOUS_GOODS",
            ReasonCode::FurLeather => "FUR_LEATHER",
            ReasonCode::LicensedActivity => "LICENSED_ACTIVITY",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_identifiers_match_serde() {
        let routes = [
            TaxRoute::General,
            TaxRoute::TradeCateringOver200k,
            TaxRoute::AutoTransport,
            TaxRoute::AutoBettingLottery,
            TaxRoute::AutoProperty,
            TaxRoute::AutoLand,
            TaxRoute::AutoFixedActivity,
        ];
        for route in routes {
            let json = serde_json::to_string(&route).unwrap();
            assert_eq!(json, format!("\"{}\"", route.as_str()));
            let back: TaxRoute = serde_json::from_str(&json).unwrap();
            assert_eq!(back, route);
        }
    }

    #[test]
    fn reason_codes_match_serde() {
        let codes = [
            ReasonCode::VatRegistered,
            ReasonCode::TurnoverExceeded,
            ReasonCode::FixedAssetsExceeded,
            ReasonCode::B2bExceeded,
            ReasonCode::B2bWorksServices,
            ReasonCode::LicensedActivity,
        ];
        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn only_218_4_routes_are_automatic() {
        assert!(!TaxRoute::General.is_automatic());
        assert!(!TaxRoute::TradeCateringOver200k.is_automatic());
        assert!(TaxRoute::AutoTransport.is_automatic());
        assert!(TaxRoute::AutoLand.is_automatic());
        assert!(TaxRoute::AutoFixedActivity.is_automatic());
    }
}
