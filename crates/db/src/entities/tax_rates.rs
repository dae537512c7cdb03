//! `SeaORM` Entity for the tax_rates table.

use hesab_shared::types::TaxRateId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DbTaxType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tax_type: DbTaxType,
    /// Percentage rate.
    pub rate: Decimal,
    pub applicability: Option<String>,
    pub effective_from: Date,
    pub is_active: bool,
    /// Fallback row when no date-scoped rate matches.
    pub is_default: bool,
    pub is_exempt: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for hesab_core::billing::TaxRate {
    fn from(model: Model) -> Self {
        Self {
            id: TaxRateId::from_uuid(model.id),
            tax_type: model.tax_type.into(),
            rate: model.rate,
            applicability: model.applicability,
            effective_from: model.effective_from,
            is_active: model.is_active,
            is_default: model.is_default,
            is_exempt: model.is_exempt,
        }
    }
}
