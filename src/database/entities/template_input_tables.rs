use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template_input_tables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub template_id: i32,
    pub table_store_id: i32,
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
    // Table stores stay deletable only while no template links them.
    #[sea_orm(
        belongs_to = "super::table_stores::Entity",
        from = "Column::TableStoreId",
        to = "super::table_stores::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    TableStores,
}

impl Related<super::templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Templates.def()
    }
}

impl Related<super::table_stores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TableStores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
