use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "viz_workbooks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub report_id: i32,
    pub name: String,
    pub url: Option<String>,
    pub sequence_no: i32,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::viz_reports::Entity",
        from = "Column::ReportId",
        to = "super::viz_reports::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    VizReports,
    #[sea_orm(has_many = "super::viz_dashboards::Entity")]
    VizDashboards,
}

impl Related<super::viz_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VizReports.def()
    }
}

impl Related<super::viz_dashboards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VizDashboards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
