use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "table_stores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// TableType choice value
    pub table_type: String,
    /// DataSourceOrigin choice value
    pub data_source_origin: Option<String>,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::table_schemas::Entity")]
    TableSchemas,
    #[sea_orm(has_many = "super::template_input_tables::Entity")]
    TemplateInputTables,
}

impl Related<super::table_schemas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TableSchemas.def()
    }
}

impl Related<super::template_input_tables::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateInputTables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
