//! Repository modules for database access.

pub mod cost_center;
pub mod fiscal;
pub mod rates;

pub use cost_center::{
    CostCenterError, CostCenterRepository, CreateCostCenterInput, UpdateCostCenterInput,
};
pub use fiscal::{CreateFiscalYearInput, FiscalError, FiscalRepository, FiscalYearWithPeriods};
pub use rates::{
    CreateBillingRateInput, CreateTaxRateInput, RateError, RateRepository, StorageBillingRequest,
};
