//! Fiscal year and period management.
//!
//! A fiscal year runs July 1 through June 30 and owns exactly 12 monthly
//! periods. Periods close strictly in chronological order and reopen in
//! reverse; the year-closed flag is derived from its periods, never set
//! independently.

pub mod calendar;
pub mod error;
pub mod sequence;
pub mod types;

pub use calendar::{
    fiscal_year_bounds, generate_monthly_periods, validate_year_boundaries, MAX_FISCAL_YEAR,
    MIN_FISCAL_YEAR, PERIODS_PER_YEAR,
};
pub use error::FiscalError;
pub use sequence::{closes_year, validate_close, validate_reopen, year_is_closed, PeriodState};
pub use types::{FiscalPeriod, FiscalYear, PeriodSpec};
