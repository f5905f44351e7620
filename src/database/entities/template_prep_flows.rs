use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template_prep_flows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub template_id: i32,
    pub prep_flow_id: i32,
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
        belongs_to = "super::prep_flows::Entity",
        from = "Column::PrepFlowId",
        to = "super::prep_flows::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    PrepFlows,
}

impl Related<super::templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Templates.def()
    }
}

impl Related<super::prep_flows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PrepFlows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
