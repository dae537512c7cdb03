//! Billing and tax error types.

use chrono::NaiveDate;
use thiserror::Error;

use super::types::{RateType, TaxType};

/// Errors that can occur during billing and tax calculation.
#[derive(Debug, Error)]
pub enum BillingError {
    /// A monetary input was negative.
    #[error("{field} cannot be negative")]
    NegativeAmount {
        /// Name of the offending input field.
        field: &'static str,
    },

    /// No billing rate configuration matches the request.
    ///
    /// Resolution must not fall back to a guessed value; the caller decides
    /// whether to block the transaction or prompt rate configuration.
    #[error("No {rate_type} billing rate effective on {date}")]
    RateNotFound {
        /// The requested rate type.
        rate_type: RateType,
        /// The billing date.
        date: NaiveDate,
    },

    /// No tax rate resolves for the requested type.
    #[error("No active {tax_type} tax rate configured")]
    TaxRateNotFound {
        /// The requested tax type.
        tax_type: TaxType,
    },

    /// `effective_to` precedes `effective_from` on a rate row.
    #[error("Rate effective window ends ({to}) before it starts ({from})")]
    InvalidEffectiveWindow {
        /// Window start.
        from: NaiveDate,
        /// Window end.
        to: NaiveDate,
    },

    /// Rate values must be strictly positive.
    #[error("Rate value must be positive")]
    NonPositiveRate,

    /// `date_out` precedes `date_in` on a storage billing request.
    #[error("Goods-out date ({date_out}) is before goods-in date ({date_in})")]
    DateOutBeforeDateIn {
        /// The goods-in date.
        date_in: NaiveDate,
        /// The goods-out date.
        date_out: NaiveDate,
    },
}

impl BillingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::RateNotFound { .. } => "BILLING_RATE_NOT_FOUND",
            Self::TaxRateNotFound { .. } => "TAX_RATE_NOT_FOUND",
            Self::InvalidEffectiveWindow { .. } => "INVALID_EFFECTIVE_WINDOW",
            Self::NonPositiveRate => "NON_POSITIVE_RATE",
            Self::DateOutBeforeDateIn { .. } => "DATE_OUT_BEFORE_DATE_IN",
        }
    }
}
