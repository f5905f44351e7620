use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "table_schemas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub table_store_id: i32,
    pub column_name: String,
    /// TableSchemaDataType choice value
    pub data_type: String,
    pub nullable: bool,
    pub is_filter_column: bool,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::table_stores::Entity",
        from = "Column::TableStoreId",
        to = "super::table_stores::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TableStores,
}

impl Related<super::table_stores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TableStores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
