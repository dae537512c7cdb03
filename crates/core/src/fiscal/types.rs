//! Fiscal year and period domain types.

use chrono::{DateTime, NaiveDate, Utc};
use hesab_shared::types::{FiscalPeriodId, FiscalYearId, UserId};
use serde::{Deserialize, Serialize};

/// Fiscal year definition.
///
/// `year` labels the calendar year the cycle starts in: fiscal year 2025
/// spans July 1, 2025 through June 30, 2026.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Unique identifier.
    pub id: FiscalYearId,
    /// Starting calendar year of the July-June cycle (unique).
    pub year: i32,
    /// Start date (July 1 of `year`).
    pub start_date: NaiveDate,
    /// End date (June 30 of `year + 1`).
    pub end_date: NaiveDate,
    /// Derived flag: true iff all 12 periods are closed.
    pub is_closed: bool,
    /// Actor who closed the year (set by the final period close).
    pub closed_by: Option<UserId>,
    /// When the year was closed.
    pub closed_at: Option<DateTime<Utc>>,
}

/// A fiscal period within a fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Fiscal year this period belongs to.
    pub fiscal_year_id: FiscalYearId,
    /// Period number within the year (1 = July ... 12 = June).
    pub period_number: i16,
    /// Period name (e.g., "July 2025").
    pub name: String,
    /// First calendar day of the month.
    pub start_date: NaiveDate,
    /// Last calendar day of the month.
    pub end_date: NaiveDate,
    /// Whether the period is closed to posting.
    pub is_closed: bool,
    /// Actor who closed the period.
    pub closed_by: Option<UserId>,
    /// When the period was closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl FiscalPeriod {
    /// Returns true if transactions can be posted to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.is_closed
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Generated period data before persistence.
///
/// Produced by [`crate::fiscal::generate_monthly_periods`]; the persistence
/// layer attaches identifiers and audit stamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSpec {
    /// Period number within the year (1-12).
    pub period_number: i16,
    /// Period name (e.g., "July 2025").
    pub name: String,
    /// First calendar day of the month.
    pub start_date: NaiveDate,
    /// Last calendar day of the month.
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_period() -> FiscalPeriod {
        FiscalPeriod {
            id: FiscalPeriodId::new(),
            fiscal_year_id: FiscalYearId::new(),
            period_number: 1,
            name: "July 2025".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
            is_closed: false,
            closed_by: None,
            closed_at: None,
        }
    }

    #[test]
    fn test_contains_date_boundaries() {
        let period = sample_period();
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()));
    }

    #[test]
    fn test_is_open() {
        let mut period = sample_period();
        assert!(period.is_open());
        period.is_closed = true;
        assert!(!period.is_open());
    }
}
