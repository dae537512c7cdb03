//! `SeaORM` Entity for the cost_centers table.

use hesab_shared::types::{CostCenterId, UserId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cost_centers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    /// Self-reference; NULL for root nodes.
    pub parent_id: Option<Uuid>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for hesab_core::costcenter::CostCenter {
    fn from(model: Model) -> Self {
        Self {
            id: CostCenterId::from_uuid(model.id),
            code: model.code,
            name: model.name,
            description: model.description,
            parent_id: model.parent_id.map(CostCenterId::from_uuid),
            is_active: model.is_active,
            created_by: UserId::from_uuid(model.created_by),
            updated_by: model.updated_by.map(UserId::from_uuid),
        }
    }
}
