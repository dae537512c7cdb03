//! Billing rate resolution.

use chrono::NaiveDate;
use hesab_shared::types::{CustomerId, ProductCategoryId};

use super::error::BillingError;
use super::types::{BillingRate, RateType};

/// Resolves the billing rate applicable to a request.
///
/// Candidates must match `rate_type`, be active, have an effective window
/// containing `date`, and be scope-compatible: a row scoped to a customer
/// or category only matches a request for that same customer/category,
/// while an unscoped row matches anything. Tie-breaks, in order:
///
/// 1. More specific scope wins (customer+category > one of them > default).
/// 2. Among equally scoped candidates, the most recent `effective_from`.
///
/// Resolution is a pure lookup over the supplied rows; nothing is cached,
/// since effective windows shift over time and scopes compete.
///
/// # Errors
///
/// Returns `BillingError::RateNotFound` when no candidate matches. Callers
/// must not substitute a guessed value.
pub fn resolve_billing_rate<'a>(
    rates: &'a [BillingRate],
    rate_type: RateType,
    date: NaiveDate,
    customer_id: Option<CustomerId>,
    category_id: Option<ProductCategoryId>,
) -> Result<&'a BillingRate, BillingError> {
    rates
        .iter()
        .filter(|r| r.rate_type == rate_type && r.is_active && r.effective_on(date))
        .filter(|r| scope_matches(r, customer_id, category_id))
        .max_by_key(|r| (specificity(r), r.effective_from))
        .ok_or(BillingError::RateNotFound { rate_type, date })
}

/// A scoped row only matches a request carrying the same scope id.
fn scope_matches(
    rate: &BillingRate,
    customer_id: Option<CustomerId>,
    category_id: Option<ProductCategoryId>,
) -> bool {
    let customer_ok = match rate.customer_id {
        Some(scoped) => customer_id == Some(scoped),
        None => true,
    };
    let category_ok = match rate.product_category_id {
        Some(scoped) => category_id == Some(scoped),
        None => true,
    };
    customer_ok && category_ok
}

/// Scope specificity: one point per populated scope column.
fn specificity(rate: &BillingRate) -> u8 {
    u8::from(rate.customer_id.is_some()) + u8::from(rate.product_category_id.is_some())
}

/// Validates a rate row before it is stored.
///
/// # Errors
///
/// - `NonPositiveRate` if `rate_value <= 0`.
/// - `InvalidEffectiveWindow` if `effective_to` precedes `effective_from`.
pub fn validate_rate_row(rate: &BillingRate) -> Result<(), BillingError> {
    if rate.rate_value <= rust_decimal::Decimal::ZERO {
        return Err(BillingError::NonPositiveRate);
    }
    if let Some(to) = rate.effective_to {
        if to < rate.effective_from {
            return Err(BillingError::InvalidEffectiveWindow {
                from: rate.effective_from,
                to,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hesab_shared::types::BillingRateId;
    use rust_decimal_macros::dec;

    fn rate(
        rate_type: RateType,
        value: rust_decimal::Decimal,
        customer: Option<CustomerId>,
        category: Option<ProductCategoryId>,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> BillingRate {
        BillingRate {
            id: BillingRateId::new(),
            rate_type,
            rate_value: value,
            customer_id: customer,
            product_category_id: category,
            effective_from: from,
            effective_to: to,
            is_active: true,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unscoped_rate_resolves() {
        let rates = vec![rate(
            RateType::Daily,
            dec!(2),
            None,
            None,
            date(2025, 1, 1),
            None,
        )];
        let found =
            resolve_billing_rate(&rates, RateType::Daily, date(2025, 7, 1), None, None).unwrap();
        assert_eq!(found.rate_value, dec!(2));
    }

    #[test]
    fn test_customer_scoped_beats_default() {
        let customer = CustomerId::new();
        let rates = vec![
            rate(RateType::Daily, dec!(2), None, None, date(2025, 1, 1), None),
            rate(
                RateType::Daily,
                dec!(1.5),
                Some(customer),
                None,
                date(2025, 1, 1),
                None,
            ),
        ];

        let found = resolve_billing_rate(
            &rates,
            RateType::Daily,
            date(2025, 7, 1),
            Some(customer),
            None,
        )
        .unwrap();
        assert_eq!(found.rate_value, dec!(1.5));

        // Without the customer, the scoped row is not a candidate.
        let found =
            resolve_billing_rate(&rates, RateType::Daily, date(2025, 7, 1), None, None).unwrap();
        assert_eq!(found.rate_value, dec!(2));
    }

    #[test]
    fn test_other_customers_rate_is_never_a_candidate() {
        let rates = vec![rate(
            RateType::Daily,
            dec!(1.5),
            Some(CustomerId::new()),
            None,
            date(2025, 1, 1),
            None,
        )];

        let result = resolve_billing_rate(
            &rates,
            RateType::Daily,
            date(2025, 7, 1),
            Some(CustomerId::new()),
            None,
        );
        assert!(matches!(result, Err(BillingError::RateNotFound { .. })));
    }

    #[test]
    fn test_latest_effective_from_wins_among_equals() {
        let rates = vec![
            rate(RateType::Daily, dec!(2), None, None, date(2024, 7, 1), None),
            rate(RateType::Daily, dec!(2.5), None, None, date(2025, 7, 1), None),
        ];

        let found =
            resolve_billing_rate(&rates, RateType::Daily, date(2025, 8, 1), None, None).unwrap();
        assert_eq!(found.rate_value, dec!(2.5));
    }

    #[test]
    fn test_expired_window_excluded() {
        let rates = vec![rate(
            RateType::Daily,
            dec!(2),
            None,
            None,
            date(2024, 7, 1),
            Some(date(2025, 6, 30)),
        )];

        assert!(
            resolve_billing_rate(&rates, RateType::Daily, date(2025, 7, 1), None, None).is_err()
        );
        assert!(
            resolve_billing_rate(&rates, RateType::Daily, date(2025, 6, 30), None, None).is_ok()
        );
    }

    #[test]
    fn test_wrong_type_excluded() {
        let rates = vec![rate(
            RateType::Loading,
            dec!(500),
            None,
            None,
            date(2025, 1, 1),
            None,
        )];
        assert!(matches!(
            resolve_billing_rate(&rates, RateType::Daily, date(2025, 7, 1), None, None),
            Err(BillingError::RateNotFound {
                rate_type: RateType::Daily,
                ..
            })
        ));
    }

    #[test]
    fn test_inactive_excluded() {
        let mut inactive = rate(RateType::Daily, dec!(2), None, None, date(2025, 1, 1), None);
        inactive.is_active = false;
        assert!(
            resolve_billing_rate(&[inactive], RateType::Daily, date(2025, 7, 1), None, None)
                .is_err()
        );
    }

    #[test]
    fn test_fully_scoped_beats_singly_scoped() {
        let customer = CustomerId::new();
        let category = ProductCategoryId::new();
        let rates = vec![
            rate(
                RateType::Seasonal,
                dec!(100),
                Some(customer),
                None,
                date(2025, 1, 1),
                None,
            ),
            rate(
                RateType::Seasonal,
                dec!(90),
                Some(customer),
                Some(category),
                date(2025, 1, 1),
                None,
            ),
        ];

        let found = resolve_billing_rate(
            &rates,
            RateType::Seasonal,
            date(2025, 7, 1),
            Some(customer),
            Some(category),
        )
        .unwrap();
        assert_eq!(found.rate_value, dec!(90));
    }

    #[test]
    fn test_validate_rate_row() {
        let good = rate(RateType::Daily, dec!(2), None, None, date(2025, 1, 1), None);
        assert!(validate_rate_row(&good).is_ok());

        let zero = rate(RateType::Daily, dec!(0), None, None, date(2025, 1, 1), None);
        assert!(matches!(
            validate_rate_row(&zero),
            Err(BillingError::NonPositiveRate)
        ));

        let backwards = rate(
            RateType::Daily,
            dec!(2),
            None,
            None,
            date(2025, 6, 1),
            Some(date(2025, 1, 1)),
        );
        assert!(matches!(
            validate_rate_row(&backwards),
            Err(BillingError::InvalidEffectiveWindow { .. })
        ));
    }
}
