pub mod calculators;
pub mod eligibility;
pub mod engine;
pub mod rates;
pub mod turnover;

pub use engine::evaluate;
