//! Storage billing and tax calculation.
//!
//! Pure computation: charges and tax amounts are derived from inputs plus
//! rate rows supplied by the persistence layer. Intermediate values keep
//! full decimal precision; rounding (half-up, 2 decimal places) happens
//! once at the end of each calculation.

pub mod error;
pub mod rates;
pub mod storage;
pub mod tax;
pub mod types;

pub use error::BillingError;
pub use rates::{resolve_billing_rate, validate_rate_row};
pub use storage::{days_stored, round_money, BillingService};
pub use tax::{calculate_tax, resolve_tax_rate};
pub use types::{
    BillingBreakdown, BillingRate, RateType, StorageBillingInput, TaxComputation, TaxRate,
    TaxType, DEFAULT_GST_RATE, DEFAULT_WHT_RATE,
};
