//! `SeaORM` Entity for the fiscal_periods table.

use hesab_shared::types::{FiscalPeriodId, FiscalYearId, UserId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fiscal_periods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fiscal_year_id: Uuid,
    /// 1 = July ... 12 = June; unique per fiscal year.
    pub period_number: i16,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub is_closed: bool,
    pub closed_by: Option<Uuid>,
    pub closed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fiscal_years::Entity",
        from = "Column::FiscalYearId",
        to = "super::fiscal_years::Column::Id"
    )]
    FiscalYears,
}

impl Related<super::fiscal_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FiscalYears.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for hesab_core::fiscal::FiscalPeriod {
    fn from(model: Model) -> Self {
        Self {
            id: FiscalPeriodId::from_uuid(model.id),
            fiscal_year_id: FiscalYearId::from_uuid(model.fiscal_year_id),
            period_number: model.period_number,
            name: model.name,
            start_date: model.start_date,
            end_date: model.end_date,
            is_closed: model.is_closed,
            closed_by: model.closed_by.map(UserId::from_uuid),
            closed_at: model.closed_at.map(Into::into),
        }
    }
}

impl From<&Model> for hesab_core::fiscal::PeriodState {
    fn from(model: &Model) -> Self {
        Self {
            period_number: model.period_number,
            is_closed: model.is_closed,
        }
    }
}
