pub mod activities;
pub mod input;
pub mod legal;
pub mod result;
pub mod route;
pub mod trace;

// Flat public surface for domain types and functions.
pub use activities::{find_activities, ActivityCategory, ActivityQuery, LicensedActivity};
#[allow(unused_imports)]
pub use activities::{LicensedActivityCode, COMPULSORY_INSURANCE_CARVEOUT, LICENSED_ACTIVITIES};
#[allow(unused_imports)]
pub use input::{
    InputError, InputField, LocationZone, PropertyTransferInput, PropertyType, TaxpayerInput,
    TurnoverInput, VatExemptCategory,
};
pub use legal::LegalBasis;
#[allow(unused_imports)]
pub use result::{Assessment, Determination, Disqualification, TaxCalculationResult, CURRENCY};
pub use route::{ReasonCode, TaxRoute};
pub use trace::{Trace, TraceEntry};
