use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "viz_dashboard_params")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dashboard_id: i32,
    pub internal_name: String,
    pub display_name: String,
    /// JSON array of the values the parameter can take.
    pub param_values: String,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

impl Model {
    pub fn values(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.param_values)
    }
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
