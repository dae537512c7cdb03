//! Active enums mapped to Postgres enum types.

use hesab_core::billing::{RateType, TaxType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Billing rate kind (`rate_type` Postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "rate_type")]
pub enum DbRateType {
    /// Per kg per day storage rate.
    #[sea_orm(string_value = "daily")]
    Daily,
    /// Flat rate for a storage season.
    #[sea_orm(string_value = "seasonal")]
    Seasonal,
    /// Per calendar month rate.
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Loading/unloading charge rate.
    #[sea_orm(string_value = "loading")]
    Loading,
}

/// Tax kind (`tax_type` Postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "tax_type")]
pub enum DbTaxType {
    /// Goods and services tax.
    #[sea_orm(string_value = "gst")]
    Gst,
    /// Withholding tax.
    #[sea_orm(string_value = "withholding")]
    Withholding,
}

impl From<DbRateType> for RateType {
    fn from(value: DbRateType) -> Self {
        match value {
            DbRateType::Daily => Self::Daily,
            DbRateType::Seasonal => Self::Seasonal,
            DbRateType::Monthly => Self::Monthly,
            DbRateType::Loading => Self::Loading,
        }
    }
}

impl From<RateType> for DbRateType {
    fn from(value: RateType) -> Self {
        match value {
            RateType::Daily => Self::Daily,
            RateType::Seasonal => Self::Seasonal,
            RateType::Monthly => Self::Monthly,
            RateType::Loading => Self::Loading,
        }
    }
}

impl From<DbTaxType> for TaxType {
    fn from(value: DbTaxType) -> Self {
        match value {
            DbTaxType::Gst => Self::Gst,
            DbTaxType::Withholding => Self::Withholding,
        }
    }
}

impl From<TaxType> for DbTaxType {
    fn from(value: TaxType) -> Self {
        match value {
            TaxType::Gst => Self::Gst,
            TaxType::Withholding => Self::Withholding,
        }
    }
}
