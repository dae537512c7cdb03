//! Fiscal error types for calendar and sequencing violations.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during fiscal calendar operations.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// Year is outside the supported fiscal year range.
    #[error("Fiscal year {year} is outside the supported range")]
    YearOutOfRange {
        /// The rejected starting calendar year.
        year: i32,
    },

    /// Start date is not July 1 of the fiscal year.
    #[error("Fiscal year {year} must start on {expected}, got {actual}")]
    InvalidStartDate {
        /// The fiscal year being created.
        year: i32,
        /// Expected start date (July 1 of `year`).
        expected: NaiveDate,
        /// The start date supplied by the caller.
        actual: NaiveDate,
    },

    /// End date is not June 30 of the following year.
    #[error("Fiscal year {year} must end on {expected}, got {actual}")]
    InvalidEndDate {
        /// The fiscal year being created.
        year: i32,
        /// Expected end date (June 30 of `year + 1`).
        expected: NaiveDate,
        /// The end date supplied by the caller.
        actual: NaiveDate,
    },

    /// Period is already closed.
    #[error("Period {period_number} is already closed")]
    AlreadyClosed {
        /// Number of the period the caller tried to close.
        period_number: i16,
    },

    /// Period is not closed.
    #[error("Period {period_number} is not closed")]
    NotClosed {
        /// Number of the period the caller tried to reopen.
        period_number: i16,
    },

    /// Periods must close strictly in chronological order within a year.
    #[error("Cannot close period {closing}: period {open} is still open")]
    EarlierPeriodOpen {
        /// Number of the period the caller tried to close.
        closing: i16,
        /// Smallest still-open earlier period number.
        open: i16,
    },

    /// Periods must reopen strictly in reverse-chronological order.
    #[error("Cannot reopen period {reopening}: period {closed} is still closed")]
    LaterPeriodClosed {
        /// Number of the period the caller tried to reopen.
        reopening: i16,
        /// Smallest closed later period number.
        closed: i16,
    },

    /// The target period is missing from the year's period set.
    #[error("Period {period_number} not found in fiscal year")]
    PeriodMissing {
        /// The period number that was expected.
        period_number: i16,
    },
}

impl FiscalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::YearOutOfRange { .. } => "YEAR_OUT_OF_RANGE",
            Self::InvalidStartDate { .. } => "INVALID_START_DATE",
            Self::InvalidEndDate { .. } => "INVALID_END_DATE",
            Self::AlreadyClosed { .. } => "PERIOD_ALREADY_CLOSED",
            Self::NotClosed { .. } => "PERIOD_NOT_CLOSED",
            Self::EarlierPeriodOpen { .. } => "EARLIER_PERIOD_OPEN",
            Self::LaterPeriodClosed { .. } => "LATER_PERIOD_CLOSED",
            Self::PeriodMissing { .. } => "PERIOD_MISSING",
        }
    }

    /// Returns true if this is an ordering violation rather than a state error.
    #[must_use]
    pub const fn is_sequence_violation(&self) -> bool {
        matches!(
            self,
            Self::EarlierPeriodOpen { .. } | Self::LaterPeriodClosed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FiscalError::AlreadyClosed { period_number: 3 }.error_code(),
            "PERIOD_ALREADY_CLOSED"
        );
        assert_eq!(
            FiscalError::EarlierPeriodOpen { closing: 3, open: 1 }.error_code(),
            "EARLIER_PERIOD_OPEN"
        );
    }

    #[test]
    fn test_sequence_violation_classification() {
        assert!(FiscalError::EarlierPeriodOpen { closing: 2, open: 1 }.is_sequence_violation());
        assert!(
            FiscalError::LaterPeriodClosed {
                reopening: 5,
                closed: 6
            }
            .is_sequence_violation()
        );
        assert!(!FiscalError::AlreadyClosed { period_number: 1 }.is_sequence_violation());
    }

    #[test]
    fn test_error_display() {
        let err = FiscalError::EarlierPeriodOpen { closing: 4, open: 2 };
        assert_eq!(err.to_string(), "Cannot close period 4: period 2 is still open");
    }
}
