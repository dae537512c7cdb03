//! Sequential close/reopen rules for fiscal periods.
//!
//! Periods close strictly in chronological order: closing period N asserts
//! that every earlier balance is final, so an out-of-order close would
//! silently approve a period whose predecessor can still change. Reopening
//! is the exact mirror, and the year-closed flag is derived from the period
//! states rather than stored independently.

use super::error::FiscalError;

/// Minimal projection of a period used by the sequencing rules.
///
/// The persistence layer builds these from sibling rows read under row
/// locks inside the same transaction that flips the target period, so
/// concurrent close/reopen attempts on a year serialize before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodState {
    /// Period number within the year (1-12).
    pub period_number: i16,
    /// Whether the period is closed.
    pub is_closed: bool,
}

/// Validates that `target` may be closed given its sibling states.
///
/// # Errors
///
/// - `PeriodMissing` if `target` is not among the siblings.
/// - `AlreadyClosed` if the target is already closed.
/// - `EarlierPeriodOpen` if any smaller-numbered period is still open.
pub fn validate_close(target: i16, siblings: &[PeriodState]) -> Result<(), FiscalError> {
    let period = find_period(target, siblings)?;

    if period.is_closed {
        return Err(FiscalError::AlreadyClosed {
            period_number: target,
        });
    }

    let earliest_open = siblings
        .iter()
        .filter(|p| p.period_number < target && !p.is_closed)
        .map(|p| p.period_number)
        .min();

    if let Some(open) = earliest_open {
        return Err(FiscalError::EarlierPeriodOpen {
            closing: target,
            open,
        });
    }

    Ok(())
}

/// Validates that `target` may be reopened given its sibling states.
///
/// # Errors
///
/// - `PeriodMissing` if `target` is not among the siblings.
/// - `NotClosed` if the target is not closed.
/// - `LaterPeriodClosed` if any larger-numbered period is still closed.
pub fn validate_reopen(target: i16, siblings: &[PeriodState]) -> Result<(), FiscalError> {
    let period = find_period(target, siblings)?;

    if !period.is_closed {
        return Err(FiscalError::NotClosed {
            period_number: target,
        });
    }

    let earliest_later_closed = siblings
        .iter()
        .filter(|p| p.period_number > target && p.is_closed)
        .map(|p| p.period_number)
        .min();

    if let Some(closed) = earliest_later_closed {
        return Err(FiscalError::LaterPeriodClosed {
            reopening: target,
            closed,
        });
    }

    Ok(())
}

/// Returns true if closing `target` leaves every period of the year closed.
///
/// Used to derive the cascading year close: the close of the final open
/// period also closes the year, in the same transaction.
#[must_use]
pub fn closes_year(target: i16, siblings: &[PeriodState]) -> bool {
    siblings
        .iter()
        .all(|p| p.is_closed || p.period_number == target)
}

/// Returns true if every period is closed.
///
/// The year-closed invariant: a year is closed iff all 12 periods are.
#[must_use]
pub fn year_is_closed(periods: &[PeriodState]) -> bool {
    !periods.is_empty() && periods.iter().all(|p| p.is_closed)
}

fn find_period(target: i16, siblings: &[PeriodState]) -> Result<PeriodState, FiscalError> {
    siblings
        .iter()
        .copied()
        .find(|p| p.period_number == target)
        .ok_or(FiscalError::PeriodMissing {
            period_number: target,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a year where periods 1..closed_through are closed.
    fn year_closed_through(closed_through: i16) -> Vec<PeriodState> {
        (1..=12)
            .map(|n| PeriodState {
                period_number: n,
                is_closed: n <= closed_through,
            })
            .collect()
    }

    #[test]
    fn test_close_first_period() {
        let periods = year_closed_through(0);
        assert!(validate_close(1, &periods).is_ok());
    }

    #[test]
    fn test_close_next_in_sequence() {
        let periods = year_closed_through(4);
        assert!(validate_close(5, &periods).is_ok());
    }

    #[test]
    fn test_close_out_of_order_rejected() {
        let periods = year_closed_through(2);
        assert!(matches!(
            validate_close(5, &periods),
            Err(FiscalError::EarlierPeriodOpen { closing: 5, open: 3 })
        ));
    }

    #[test]
    fn test_close_already_closed_rejected() {
        let periods = year_closed_through(3);
        assert!(matches!(
            validate_close(2, &periods),
            Err(FiscalError::AlreadyClosed { period_number: 2 })
        ));
    }

    #[test]
    fn test_close_missing_period_rejected() {
        let periods = year_closed_through(0);
        assert!(matches!(
            validate_close(13, &periods),
            Err(FiscalError::PeriodMissing { period_number: 13 })
        ));
    }

    #[test]
    fn test_reopen_last_closed() {
        let periods = year_closed_through(7);
        assert!(validate_reopen(7, &periods).is_ok());
    }

    #[test]
    fn test_reopen_out_of_order_rejected() {
        let periods = year_closed_through(7);
        assert!(matches!(
            validate_reopen(5, &periods),
            Err(FiscalError::LaterPeriodClosed {
                reopening: 5,
                closed: 6
            })
        ));
    }

    #[test]
    fn test_reopen_open_period_rejected() {
        let periods = year_closed_through(3);
        assert!(matches!(
            validate_reopen(8, &periods),
            Err(FiscalError::NotClosed { period_number: 8 })
        ));
    }

    #[test]
    fn test_closes_year_only_on_final_period() {
        let periods = year_closed_through(11);
        assert!(closes_year(12, &periods));

        let periods = year_closed_through(10);
        assert!(!closes_year(12, &periods));
    }

    #[test]
    fn test_year_is_closed() {
        assert!(year_is_closed(&year_closed_through(12)));
        assert!(!year_is_closed(&year_closed_through(11)));
        assert!(!year_is_closed(&[]));
    }
}

/// Property-based tests for close/reopen sequencing.
#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    fn year_closed_through(closed_through: i16) -> Vec<PeriodState> {
        (1..=12)
            .map(|n| PeriodState {
                period_number: n,
                is_closed: n <= closed_through,
            })
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// *For any* prefix-closed year, only the next period in sequence
        /// may close; every later open period is rejected.
        #[test]
        fn prop_only_next_period_may_close(
            closed_through in 0i16..12,
            target in 1i16..=12,
        ) {
            let periods = year_closed_through(closed_through);
            let result = validate_close(target, &periods);

            if target == closed_through + 1 {
                prop_assert!(result.is_ok());
            } else if target <= closed_through {
                let already_closed = matches!(result, Err(FiscalError::AlreadyClosed { .. }));
                prop_assert!(already_closed, "expected AlreadyClosed, got {result:?}");
            } else {
                let earlier_open = matches!(result, Err(FiscalError::EarlierPeriodOpen { .. }));
                prop_assert!(earlier_open, "expected EarlierPeriodOpen, got {result:?}");
            }
        }

        /// *For any* prefix-closed year, only the last closed period may
        /// reopen; every earlier closed period is rejected.
        #[test]
        fn prop_only_last_closed_may_reopen(
            closed_through in 1i16..=12,
            target in 1i16..=12,
        ) {
            let periods = year_closed_through(closed_through);
            let result = validate_reopen(target, &periods);

            if target == closed_through {
                prop_assert!(result.is_ok());
            } else if target > closed_through {
                let not_closed = matches!(result, Err(FiscalError::NotClosed { .. }));
                prop_assert!(not_closed, "expected NotClosed, got {result:?}");
            } else {
                let later_closed = matches!(result, Err(FiscalError::LaterPeriodClosed { .. }));
                prop_assert!(later_closed, "expected LaterPeriodClosed, got {result:?}");
            }
        }

        /// Closing periods 1..=12 in order always succeeds and the twelfth
        /// close also closes the year.
        #[test]
        fn prop_full_close_walk(_seed in 0u8..1) {
            let mut periods = year_closed_through(0);
            for n in 1i16..=12 {
                let states: Vec<PeriodState> = periods.clone();
                prop_assert!(validate_close(n, &states).is_ok());
                prop_assert_eq!(closes_year(n, &states), n == 12);
                periods[usize::try_from(n - 1).unwrap()].is_closed = true;
            }
            prop_assert!(year_is_closed(&periods));
        }

        /// Reopening in strict descending order from a fully closed year
        /// always succeeds, and the first reopen breaks the year-closed state.
        #[test]
        fn prop_full_reopen_walk(_seed in 0u8..1) {
            let mut periods = year_closed_through(12);
            for n in (1i16..=12).rev() {
                let states: Vec<PeriodState> = periods.clone();
                prop_assert!(validate_reopen(n, &states).is_ok());
                periods[usize::try_from(n - 1).unwrap()].is_closed = false;
                prop_assert!(!year_is_closed(&periods));
            }
        }
    }
}
