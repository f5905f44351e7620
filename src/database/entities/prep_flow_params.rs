use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prep_flow_params")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub prep_flow_id: i32,
    pub name: String,
    /// PrepFlowParamType choice value
    pub param_type: String,
    /// Identifier of the parameter inside the external prep service.
    pub flow_param_id: Option<String>,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::prep_flows::Entity",
        from = "Column::PrepFlowId",
        to = "super::prep_flows::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    PrepFlows,
}

impl Related<super::prep_flows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrepFlows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
