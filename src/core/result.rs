use super::legal::LegalBasis;
use super::route::{ReasonCode, TaxRoute};
use super::trace::{Trace, TraceEntry};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;

pub const CURRENCY: &str = "AZN";

/// Why a taxpayer cannot use the simplified regime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Disqualification {
    pub reason_code: ReasonCode,
    pub reason_description: String,
    #[serde(skip)]
    pub legal_basis: Vec<LegalBasis>,
}

impl Disqualification {
    pub fn new(reason_code: ReasonCode, description: impl Into<String>) -> Self {
        Disqualification {
            reason_code,
            reason_description: description.into(),
            legal_basis: Vec::new(),
        }
    }

    pub fn citing(mut self, basis: LegalBasis) -> Self {
        self.legal_basis.push(basis);
        self
    }
}

/// Computed simplified tax for an eligible taxpayer. Amounts are `None`
/// when the input did not carry enough data to compute them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Assessment {
    pub route: TaxRoute,
    #[schemars(with = "Option<f64>")]
    pub tax_amount: Option<Decimal>,
    #[schemars(with = "Option<f64>")]
    pub tax_base: Option<Decimal>,
    /// Rate, or the zone coefficient for property transfers
    #[schemars(with = "Option<f64>")]
    pub tax_rate: Option<Decimal>,
    pub exemptions_applied: Vec<String>,
}

impl Assessment {
    /// Route determined, nothing computed
    pub fn route_only(route: TaxRoute) -> Self {
        Assessment {
            route,
            tax_amount: None,
            tax_base: None,
            tax_rate: None,
            exemptions_applied: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Determination {
    Eligible(Assessment),
    Ineligible(Disqualification),
}

/// Outcome of one evaluation, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TaxCalculationResult {
    eligible: bool,
    currency: &'static str,
    #[serde(flatten)]
    determination: Determination,
    legal_basis: Vec<LegalBasis>,
    #[serde(rename = "debug_trace", skip_serializing_if = "Trace::is_disabled")]
    #[schemars(with = "Option<Vec<TraceEntry>>")]
    trace: Trace,
}

impl TaxCalculationResult {
    pub fn eligible(assessment: Assessment, legal_basis: Vec<LegalBasis>, trace: Trace) -> Self {
        TaxCalculationResult {
            eligible: true,
            currency: CURRENCY,
            determination: Determination::Eligible(assessment),
            legal_basis,
            trace,
        }
    }

    pub fn ineligible(disqualification: Disqualification, trace: Trace) -> Self {
        let legal_basis = disqualification.legal_basis.clone();
        TaxCalculationResult {
            eligible: false,
            currency: CURRENCY,
            determination: Determination::Ineligible(disqualification),
            legal_basis,
            trace,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    pub fn currency(&self) -> &'static str {
        self.currency
    }

    pub fn determination(&self) -> &Determination {
        &self.determination
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        match &self.determination {
            Determination::Eligible(assessment) => Some(assessment),
            Determination::Ineligible(_) => None,
        }
    }

    pub fn disqualification(&self) -> Option<&Disqualification> {
        match &self.determination {
            Determination::Eligible(_) => None,
            Determination::Ineligible(disqualification) => Some(disqualification),
        }
    }

    pub fn route(&self) -> Option<TaxRoute> {
        self.assessment().map(|a| a.route)
    }

    pub fn tax_amount(&self) -> Option<Decimal> {
        self.assessment().and_then(|a| a.tax_amount)
    }

    pub fn reason_code(&self) -> Option<ReasonCode> {
        self.disqualification().map(|d| d.reason_code)
    }

    pub fn legal_basis(&self) -> &[LegalBasis] {
        &self.legal_basis
    }

    #[cfg(test)]
    pub fn cites(&self, article: &str) -> bool {
        self.legal_basis.iter().any(|lb| lb.article == article)
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }
}
