//! Billing and tax domain types.

use chrono::NaiveDate;
use hesab_shared::types::{BillingRateId, CustomerId, ProductCategoryId, TaxRateId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default GST percentage applied when no configured rate is supplied.
pub const DEFAULT_GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 0);

/// Default withholding tax percentage.
pub const DEFAULT_WHT_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Kind of billing rate configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    /// Per kg per day storage rate.
    Daily,
    /// Flat rate for a storage season.
    Seasonal,
    /// Per calendar month rate.
    Monthly,
    /// Loading/unloading charge rate.
    Loading,
}

impl std::fmt::Display for RateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Seasonal => "seasonal",
            Self::Monthly => "monthly",
            Self::Loading => "loading",
        };
        write!(f, "{s}")
    }
}

/// Kind of tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    /// Goods and services tax, added to the subtotal.
    Gst,
    /// Withholding tax, subtracted from the subtotal.
    Withholding,
}

impl std::fmt::Display for TaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Gst => "GST",
            Self::Withholding => "WHT",
        };
        write!(f, "{s}")
    }
}

/// A billing rate configuration row.
///
/// Multiple rows may exist per type; resolution picks the most specific
/// match effective on the billing date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRate {
    /// Unique identifier.
    pub id: BillingRateId,
    /// Kind of rate.
    pub rate_type: RateType,
    /// The rate value (strictly positive).
    pub rate_value: Decimal,
    /// Customer this rate is scoped to, if any.
    pub customer_id: Option<CustomerId>,
    /// Product category this rate is scoped to, if any.
    pub product_category_id: Option<ProductCategoryId>,
    /// First date the rate applies.
    pub effective_from: NaiveDate,
    /// Last date the rate applies; None means still effective.
    pub effective_to: Option<NaiveDate>,
    /// Whether the row participates in resolution.
    pub is_active: bool,
}

impl BillingRate {
    /// Returns true if the rate's effective window contains `date`.
    #[must_use]
    pub fn effective_on(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date <= to)
    }
}

/// A tax rate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRate {
    /// Unique identifier.
    pub id: TaxRateId,
    /// Kind of tax.
    pub tax_type: TaxType,
    /// Percentage rate.
    pub rate: Decimal,
    /// Free-form applicability note (e.g., "registered suppliers").
    pub applicability: Option<String>,
    /// First date the rate applies.
    pub effective_from: NaiveDate,
    /// Whether the row participates in resolution.
    pub is_active: bool,
    /// Fallback row when no date-scoped rate matches.
    pub is_default: bool,
    /// Flags the resolved tax as exempt regardless of rate.
    pub is_exempt: bool,
}

/// Inputs to a storage billing calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageBillingInput {
    /// Stored weight in kilograms.
    pub weight_kg: Decimal,
    /// Date goods entered storage.
    pub date_in: NaiveDate,
    /// Date goods left storage.
    pub date_out: NaiveDate,
    /// Storage rate per kg per day.
    pub rate_per_kg_per_day: Decimal,
    /// Labour charge on the way in.
    pub labour_in: Decimal,
    /// Labour charge on the way out.
    pub labour_out: Decimal,
    /// Loading/unloading charges.
    pub loading_charges: Decimal,
    /// Any other charges.
    pub other_charges: Decimal,
    /// Whether to add GST on the subtotal.
    pub apply_gst: bool,
    /// Whether to withhold tax from the subtotal.
    pub apply_wht: bool,
    /// GST percentage; callers pass the currently effective rate.
    pub gst_rate: Decimal,
    /// Withholding percentage; callers pass the currently effective rate.
    pub wht_rate: Decimal,
}

/// Breakdown of a storage billing calculation.
///
/// Every monetary field is rounded half-up to 2 decimal places; the
/// `calculations` strings reproduce the arithmetic for audit display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingBreakdown {
    /// Whole days billed (minimum 1).
    pub days_stored: i64,
    /// `weight * rate * days`.
    pub storage_charges: Decimal,
    /// `labour_in + labour_out`.
    pub labour_charges: Decimal,
    /// Storage + labour + loading + other.
    pub subtotal: Decimal,
    /// GST added on the subtotal (zero when not applied).
    pub gst_amount: Decimal,
    /// Withholding tax subtracted from the total (zero when not applied).
    pub wht_amount: Decimal,
    /// `subtotal + gst - wht`.
    pub total_amount: Decimal,
    /// Human-readable calculation strings for audit display.
    pub calculations: Vec<String>,
}

/// Result of a tax calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxComputation {
    /// Kind of tax computed.
    pub tax_type: TaxType,
    /// Percentage rate that was applied.
    pub rate: Decimal,
    /// Computed tax amount, rounded half-up to 2 decimal places.
    pub tax_amount: Decimal,
    /// True when the resolved rate is zero or flagged exempt.
    pub is_exempt: bool,
}
