//! `SeaORM` entity definitions.

pub mod billing_rates;
pub mod cost_centers;
pub mod fiscal_periods;
pub mod fiscal_years;
pub mod sea_orm_active_enums;
pub mod tax_rates;
