use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "viz_dashboards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub workbook_id: i32,
    pub name: String,
    pub url: String,
    pub sequence_no: i32,
    /// Optional JSON blob describing filters applied from outside the
    /// dashboard (query-string wiring in the host application).
    pub external_filter_config: Option<String>,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

impl Model {
    pub fn filter_config(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        match &self.external_filter_config {
            Some(raw) => serde_json::from_str(raw).map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::viz_workbooks::Entity",
        from = "Column::WorkbookId",
        to = "super::viz_workbooks::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    VizWorkbooks,
    #[sea_orm(has_many = "super::viz_dashboard_filters::Entity")]
    VizDashboardFilters,
    #[sea_orm(has_many = "super::viz_dashboard_params::Entity")]
    VizDashboardParams,
}

impl Related<super::viz_workbooks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VizWorkbooks.def()
    }
}

impl Related<super::viz_dashboard_filters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VizDashboardFilters.def()
    }
}

impl Related<super::viz_dashboard_params::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VizDashboardParams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
