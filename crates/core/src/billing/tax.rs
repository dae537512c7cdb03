//! Tax rate resolution and calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::BillingError;
use super::storage::round_money;
use super::types::{TaxComputation, TaxRate, TaxType};

/// Resolves the tax rate for `tax_type` as of `as_of`.
///
/// Picks the active row with the latest `effective_from` not after `as_of`;
/// when no date-scoped row matches, falls back to the row marked
/// `is_default`. Resolution never guesses: a missing rate is an error the
/// caller must handle.
///
/// # Errors
///
/// Returns `BillingError::TaxRateNotFound` when neither a dated nor a
/// default row resolves.
pub fn resolve_tax_rate<'a>(
    rates: &'a [TaxRate],
    tax_type: TaxType,
    as_of: NaiveDate,
) -> Result<&'a TaxRate, BillingError> {
    let active = || rates.iter().filter(|r| r.is_active && r.tax_type == tax_type);

    let dated = active()
        .filter(|r| r.effective_from <= as_of)
        .max_by_key(|r| r.effective_from);

    dated
        .or_else(|| active().find(|r| r.is_default))
        .ok_or(BillingError::TaxRateNotFound { tax_type })
}

/// Computes the tax on `amount` for `tax_type`.
///
/// `tax_amount = amount * rate / 100`, rounded half-up to 2 decimal places.
/// A zero rate or an exempt-flagged row yields `is_exempt = true` with a
/// zero amount.
///
/// # Errors
///
/// Returns `BillingError::TaxRateNotFound` when no rate resolves.
pub fn calculate_tax(
    amount: Decimal,
    tax_type: TaxType,
    rates: &[TaxRate],
    as_of: NaiveDate,
) -> Result<TaxComputation, BillingError> {
    let rate = resolve_tax_rate(rates, tax_type, as_of)?;

    if rate.is_exempt || rate.rate.is_zero() {
        return Ok(TaxComputation {
            tax_type,
            rate: rate.rate,
            tax_amount: Decimal::ZERO,
            is_exempt: true,
        });
    }

    let tax_amount = round_money(amount * rate.rate / Decimal::ONE_HUNDRED);
    Ok(TaxComputation {
        tax_type,
        rate: rate.rate,
        tax_amount,
        is_exempt: false,
    })
}
