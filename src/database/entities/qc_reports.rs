use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "qc_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::template_qc_reports::Entity")]
    TemplateQcReports,
}

impl Related<super::template_qc_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateQcReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
