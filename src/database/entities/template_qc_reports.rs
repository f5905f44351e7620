use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template_qc_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub template_id: i32,
    pub qc_report_id: i32,
    pub created_on: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::templates::Entity",
        from = "Column::TemplateId",
        to = "super::templates::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Templates,
    #[sea_orm(
        belongs_to = "super::qc_reports::Entity",
        from = "Column::QcReportId",
        to = "super::qc_reports::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    QcReports,
}

impl Related<super::templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Templates.def()
    }
}

impl Related<super::qc_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QcReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
