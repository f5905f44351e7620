use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "viz_dashboard_filters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dashboard_id: i32,
    pub display_name: String,
    /// FilterColumnName choice value
    pub filter_column_name: String,
    /// Name the filter carries inside the published workbook.
    pub internal_filter_name: Option<String>,
    /// FilterType choice value
    pub filter_type: String,
    /// FilterSelectionType choice value
    pub filter_selection_type: String,
    pub sequence_no: i32,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::viz_dashboards::Entity",
        from = "Column::DashboardId",
        to = "super::viz_dashboards::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    VizDashboards,
}

impl Related<super::viz_dashboards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VizDashboards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
