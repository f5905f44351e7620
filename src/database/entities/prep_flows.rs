use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prep_flows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Location of the flow definition in the external prep service.
    pub filepath: Option<String>,
    /// Identifier assigned by the external prep service.
    pub flow_id: Option<String>,
    /// PrepFlowStatus choice value
    pub status: String,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::prep_flow_params::Entity")]
    PrepFlowParams,
    #[sea_orm(has_many = "super::template_prep_flows::Entity")]
    TemplatePrepFlows,
}

impl Related<super::prep_flow_params::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrepFlowParams.def()
    }
}

impl Related<super::template_prep_flows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplatePrepFlows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
