//! `SeaORM` Entity for the billing_rates table.

use hesab_shared::types::{BillingRateId, CustomerId, ProductCategoryId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DbRateType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "billing_rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub rate_type: DbRateType,
    pub rate_value: Decimal,
    /// Customer this rate is scoped to; NULL means a default row.
    pub customer_id: Option<Uuid>,
    /// Product category this rate is scoped to; NULL means a default row.
    pub product_category_id: Option<Uuid>,
    pub effective_from: Date,
    pub effective_to: Option<Date>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for hesab_core::billing::BillingRate {
    fn from(model: Model) -> Self {
        Self {
            id: BillingRateId::from_uuid(model.id),
            rate_type: model.rate_type.into(),
            rate_value: model.rate_value,
            customer_id: model.customer_id.map(CustomerId::from_uuid),
            product_category_id: model.product_category_id.map(ProductCategoryId::from_uuid),
            effective_from: model.effective_from,
            effective_to: model.effective_to,
            is_active: model.is_active,
        }
    }
}
