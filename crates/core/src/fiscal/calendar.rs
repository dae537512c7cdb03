//! Fiscal calendar generation for July-June years.

use chrono::{Datelike, NaiveDate};

use super::error::FiscalError;
use super::types::PeriodSpec;

/// Number of monthly periods in a fiscal year.
pub const PERIODS_PER_YEAR: i16 = 12;

/// Earliest starting calendar year a fiscal year may use.
pub const MIN_FISCAL_YEAR: i32 = 1900;

/// Latest starting calendar year a fiscal year may use.
pub const MAX_FISCAL_YEAR: i32 = 9999;

/// Returns the (start, end) boundaries of a fiscal year.
///
/// Fiscal year N spans July 1 of N through June 30 of N+1. The year is
/// range-checked first, so the date constructions below cannot fail;
/// `expect` documents that invariant.
///
/// # Errors
///
/// Returns `YearOutOfRange` when `year` falls outside
/// `MIN_FISCAL_YEAR..=MAX_FISCAL_YEAR`.
pub fn fiscal_year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), FiscalError> {
    if !(MIN_FISCAL_YEAR..=MAX_FISCAL_YEAR).contains(&year) {
        return Err(FiscalError::YearOutOfRange { year });
    }
    let start = NaiveDate::from_ymd_opt(year, 7, 1).expect("July 1 of an in-range year is valid");
    let end =
        NaiveDate::from_ymd_opt(year + 1, 6, 30).expect("June 30 of an in-range year is valid");
    Ok((start, end))
}

/// Validates that the supplied dates are exactly the July 1 / June 30
/// boundaries for the given fiscal year.
///
/// # Errors
///
/// Returns `YearOutOfRange` when the year is outside the supported range,
/// and `InvalidStartDate` or `InvalidEndDate` when a boundary does not
/// match. A matching pair always satisfies `start < end`, so no separate
/// ordering check is needed.
pub fn validate_year_boundaries(
    year: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), FiscalError> {
    let (expected_start, expected_end) = fiscal_year_bounds(year)?;

    if start_date != expected_start {
        return Err(FiscalError::InvalidStartDate {
            year,
            expected: expected_start,
            actual: start_date,
        });
    }

    if end_date != expected_end {
        return Err(FiscalError::InvalidEndDate {
            year,
            expected: expected_end,
            actual: end_date,
        });
    }

    Ok(())
}

/// Generates the 12 monthly periods of a fiscal year.
///
/// Period 1 is July of `year`, period 12 is June of `year + 1`. Each period
/// spans the first through last calendar day of its month and is named
/// `"<MonthName> <calendarYear>"`.
///
/// # Errors
///
/// Returns `YearOutOfRange` when the year is outside the supported range.
pub fn generate_monthly_periods(year: i32) -> Result<Vec<PeriodSpec>, FiscalError> {
    let (start_date, _) = fiscal_year_bounds(year)?;
    let mut periods = Vec::with_capacity(PERIODS_PER_YEAR as usize);
    let mut current = start_date;

    for period_number in 1..=PERIODS_PER_YEAR {
        let end = last_day_of_month(current.year(), current.month());
        let name = format!("{} {}", month_name(current.month()), current.year());

        periods.push(PeriodSpec {
            period_number,
            name,
            start_date: current,
            end_date: end,
        });

        current = first_day_of_next_month(current);
    }

    Ok(periods)
}

/// Returns the first day of the month after the given date's month.
fn first_day_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid")
}

/// Returns the last day of a month.
fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month
        .expect("first of month is always valid")
        .pred_opt()
        .expect("day before a first-of-month always exists")
}

/// Returns month name.
fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
