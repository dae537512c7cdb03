//! `SeaORM` Entity for the fiscal_years table.

use hesab_shared::types::{FiscalYearId, UserId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fiscal_years")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Starting calendar year of the July-June cycle; unique.
    #[sea_orm(unique)]
    pub year: i32,
    pub start_date: Date,
    pub end_date: Date,
    /// Derived from period states; flipped only by close/reopen cascades.
    pub is_closed: bool,
    pub closed_by: Option<Uuid>,
    pub closed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fiscal_periods::Entity")]
    FiscalPeriods,
}

impl Related<super::fiscal_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FiscalPeriods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for hesab_core::fiscal::FiscalYear {
    fn from(model: Model) -> Self {
        Self {
            id: FiscalYearId::from_uuid(model.id),
            year: model.year,
            start_date: model.start_date,
            end_date: model.end_date,
            is_closed: model.is_closed,
            closed_by: model.closed_by.map(UserId::from_uuid),
            closed_at: model.closed_at.map(Into::into),
        }
    }
}
