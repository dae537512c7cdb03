//! Storage billing calculation.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::BillingError;
use super::types::{BillingBreakdown, StorageBillingInput};

/// Rounds a monetary value half-up to 2 decimal places.
///
/// Half-up means an exact half at the cent boundary rounds away from zero:
/// 2.005 becomes 2.01. This differs from banker's rounding deliberately;
/// billed amounts must match the printed invoice arithmetic.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole days billed between `date_in` and `date_out`, minimum 1.
///
/// Dates are whole calendar days, so the inclusive-exclusive ceiling
/// reduces to the day difference clamped to at least one day. Goods in and
/// out on the same day still pay for one day of storage. Callers reject
/// `date_out < date_in` before billing; here it clamps to one day.
#[must_use]
pub fn days_stored(date_in: chrono::NaiveDate, date_out: chrono::NaiveDate) -> i64 {
    (date_out - date_in).num_days().max(1)
}

/// Storage billing service.
pub struct BillingService;

impl BillingService {
    /// Calculates the full storage billing breakdown.
    ///
    /// Intermediate amounts keep full precision; each output component is
    /// rounded half-up to 2 decimal places only at the end, so rounding
    /// error never compounds.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::NegativeAmount` if any monetary input is
    /// negative, or `BillingError::DateOutBeforeDateIn` if the goods-out
    /// date precedes the goods-in date.
    pub fn calculate_storage_billing(
        input: &StorageBillingInput,
    ) -> Result<BillingBreakdown, BillingError> {
        validate_non_negative(input)?;

        if input.date_out < input.date_in {
            return Err(BillingError::DateOutBeforeDateIn {
                date_in: input.date_in,
                date_out: input.date_out,
            });
        }

        let days = days_stored(input.date_in, input.date_out);
        let days_dec = Decimal::from(days);

        let storage = input.weight_kg * input.rate_per_kg_per_day * days_dec;
        let labour = input.labour_in + input.labour_out;
        let subtotal = storage + labour + input.loading_charges + input.other_charges;

        let hundred = Decimal::ONE_HUNDRED;
        let gst = if input.apply_gst {
            subtotal * input.gst_rate / hundred
        } else {
            Decimal::ZERO
        };
        let wht = if input.apply_wht {
            subtotal * input.wht_rate / hundred
        } else {
            Decimal::ZERO
        };

        // GST is added, WHT is withheld from what the customer pays.
        let total = subtotal + gst - wht;

        let breakdown = BillingBreakdown {
            days_stored: days,
            storage_charges: round_money(storage),
            labour_charges: round_money(labour),
            subtotal: round_money(subtotal),
            gst_amount: round_money(gst),
            wht_amount: round_money(wht),
            total_amount: round_money(total),
            calculations: Vec::new(),
        };

        let calculations = describe(input, &breakdown);
        Ok(BillingBreakdown {
            calculations,
            ..breakdown
        })
    }
}

fn validate_non_negative(input: &StorageBillingInput) -> Result<(), BillingError> {
    let fields = [
        ("weight_kg", input.weight_kg),
        ("rate_per_kg_per_day", input.rate_per_kg_per_day),
        ("labour_in", input.labour_in),
        ("labour_out", input.labour_out),
        ("loading_charges", input.loading_charges),
        ("other_charges", input.other_charges),
        ("gst_rate", input.gst_rate),
        ("wht_rate", input.wht_rate),
    ];

    for (field, value) in fields {
        if value < Decimal::ZERO {
            return Err(BillingError::NegativeAmount { field });
        }
    }
    Ok(())
}

/// Builds the audit-display calculation strings from the rounded figures.
fn describe(input: &StorageBillingInput, b: &BillingBreakdown) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Storage: {} kg x {} x {} days = {}",
            input.weight_kg, input.rate_per_kg_per_day, b.days_stored, b.storage_charges
        ),
        format!(
            "Labour: {} + {} = {}",
            input.labour_in, input.labour_out, b.labour_charges
        ),
        format!(
            "Subtotal: {} + {} + {} + {} = {}",
            b.storage_charges, b.labour_charges, input.loading_charges, input.other_charges,
            b.subtotal
        ),
    ];

    if input.apply_gst {
        lines.push(format!(
            "GST: {} x {}% = {}",
            b.subtotal, input.gst_rate, b.gst_amount
        ));
    }
    if input.apply_wht {
        lines.push(format!(
            "WHT: {} x {}% = -{}",
            b.subtotal, input.wht_rate, b.wht_amount
        ));
    }

    lines.push(format!(
        "Total: {} + {} - {} = {}",
        b.subtotal, b.gst_amount, b.wht_amount, b.total_amount
    ));
    lines
}


/// Property-based tests for billing arithmetic.
#[cfg(test)]
mod props {
    use super::*;
    use crate::billing::types::StorageBillingInput;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// *For any* non-negative inputs, total = subtotal + gst - wht on
        /// the rounded components, within one cent of re-deriving from the
        /// rounded parts.
        #[test]
        fn prop_total_is_subtotal_plus_gst_minus_wht(
            weight in amount_strategy(),
            rate in amount_strategy(),
            labour in amount_strategy(),
            days in 0i64..400,
        ) {
            let date_in = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
            let input = StorageBillingInput {
                weight_kg: weight,
                date_in,
                date_out: date_in + chrono::Duration::days(days),
                rate_per_kg_per_day: rate,
                labour_in: labour,
                labour_out: Decimal::ZERO,
                loading_charges: Decimal::ZERO,
                other_charges: Decimal::ZERO,
                apply_gst: true,
                apply_wht: true,
                gst_rate: dec!(18),
                wht_rate: dec!(1),
            };

            let b = BillingService::calculate_storage_billing(&input).unwrap();

            prop_assert!(b.days_stored >= 1);
            let rederived = b.subtotal + b.gst_amount - b.wht_amount;
            let diff = (b.total_amount - rederived).abs();
            prop_assert!(diff <= dec!(0.02), "total {} vs rederived {}", b.total_amount, rederived);
        }

        /// WHT always reduces the total relative to subtotal + gst.
        #[test]
        fn prop_wht_is_subtractive(
            weight in amount_strategy(),
            rate in amount_strategy(),
        ) {
            let date_in = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
            let base = StorageBillingInput {
                weight_kg: weight,
                date_in,
                date_out: date_in + chrono::Duration::days(10),
                rate_per_kg_per_day: rate,
                labour_in: Decimal::ZERO,
                labour_out: Decimal::ZERO,
                loading_charges: Decimal::ZERO,
                other_charges: Decimal::ZERO,
                apply_gst: false,
                apply_wht: false,
                gst_rate: dec!(18),
                wht_rate: dec!(1),
            };
            let without = BillingService::calculate_storage_billing(&base).unwrap();

            let with = BillingService::calculate_storage_billing(&StorageBillingInput {
                apply_wht: true,
                ..base
            })
            .unwrap();

            prop_assert!(with.total_amount <= without.total_amount);
        }
    }
}
