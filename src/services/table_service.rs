use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::error::{CatalogError, Result};
use super::validate;
use crate::choices::{Choices, DataSourceOrigin, TableSchemaDataType, TableType};
use crate::database::entities::{table_schemas, table_stores, template_input_tables};

#[derive(Debug, Clone)]
pub struct CreateTableRequest {
    pub name: String,
    pub description: Option<String>,
    pub table_type: String,
    pub data_source_origin: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTableRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub table_type: Option<String>,
    /// Inner `None` clears the stored origin.
    pub data_source_origin: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateColumnRequest {
    pub column_name: Option<String>,
    pub data_type: Option<String>,
    pub nullable: Option<bool>,
    pub is_filter_column: Option<bool>,
}

pub struct TableService {
    db: DatabaseConnection,
}

impl TableService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_table(&self, request: CreateTableRequest) -> Result<table_stores::Model> {
        let name = validate::required_text("table_stores", "name", &request.name)?;
        let table_type = validate::choice::<TableType>(&request.table_type)?;
        let origin = validate::optional_choice::<DataSourceOrigin>(
            request.data_source_origin.as_deref(),
        )?;

        let now = Utc::now();
        let table = table_stores::ActiveModel {
            name: Set(name),
            description: Set(validate::optional_text(request.description.as_deref())),
            table_type: Set(table_type.value().to_string()),
            data_source_origin: Set(origin.map(|o| o.value().to_string())),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let table = table.insert(&self.db).await?;
        info!("Created table store {} ({})", table.id, table.name);
        Ok(table)
    }

    pub async fn get_table(&self, id: i32) -> Result<table_stores::Model> {
        table_stores::Entity::find_by_id(id)
            .filter(table_stores::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "table_stores",
                id,
            })
    }

    pub async fn list_tables(&self) -> Result<Vec<table_stores::Model>> {
        let rows = table_stores::Entity::find()
            .filter(table_stores::Column::Deleted.eq(false))
            .order_by_asc(table_stores::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_table(
        &self,
        id: i32,
        request: UpdateTableRequest,
    ) -> Result<table_stores::Model> {
        let table = self.get_table(id).await?;

        let mut table: table_stores::ActiveModel = table.into();
        if let Some(name) = request.name.as_deref() {
            table.name = Set(validate::required_text("table_stores", "name", name)?);
        }
        if let Some(description) = request.description.as_deref() {
            table.description = Set(validate::optional_text(Some(description)));
        }
        if let Some(table_type) = request.table_type.as_deref() {
            let table_type = validate::choice::<TableType>(table_type)?;
            table.table_type = Set(table_type.value().to_string());
        }
        if let Some(origin) = request.data_source_origin {
            let origin = validate::optional_choice::<DataSourceOrigin>(origin.as_deref())?;
            table.data_source_origin = Set(origin.map(|o| o.value().to_string()));
        }
        table.updated_at = Set(Utc::now());
        Ok(table.update(&self.db).await?)
    }

    /// Tombstone the table store and its schema columns. Rejected while
    /// any template still links the table as an input.
    pub async fn delete_table(&self, id: i32) -> Result<()> {
        let table = self.get_table(id).await?;

        let links = template_input_tables::Entity::find()
            .filter(template_input_tables::Column::TableStoreId.eq(id))
            .count(&self.db)
            .await?;
        if links > 0 {
            return Err(CatalogError::StillReferenced {
                entity: "table_stores",
                id,
                by: "template_input_tables",
                count: links,
            });
        }

        let now = Utc::now();
        let txn = self.db.begin().await?;

        table_schemas::Entity::update_many()
            .set(table_schemas::ActiveModel {
                deleted: Set(true),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(table_schemas::Column::TableStoreId.eq(id))
            .filter(table_schemas::Column::Deleted.eq(false))
            .exec(&txn)
            .await?;

        let mut table: table_stores::ActiveModel = table.into();
        table.deleted = Set(true);
        table.updated_at = Set(now);
        table.update(&txn).await?;

        txn.commit().await?;
        info!("Deleted table store {}", id);
        Ok(())
    }

    pub async fn add_column(
        &self,
        table_store_id: i32,
        column_name: &str,
        data_type: &str,
        nullable: bool,
        is_filter_column: bool,
    ) -> Result<table_schemas::Model> {
        self.get_table(table_store_id).await.map_err(|err| match err {
            CatalogError::NotFound { .. } => CatalogError::MissingReference {
                entity: "table_schemas",
                field: "table_store_id",
                id: table_store_id,
            },
            other => other,
        })?;
        let column_name = validate::required_text("table_schemas", "column_name", column_name)?;
        let data_type = validate::choice::<TableSchemaDataType>(data_type)?;

        let now = Utc::now();
        let column = table_schemas::ActiveModel {
            table_store_id: Set(table_store_id),
            column_name: Set(column_name),
            data_type: Set(data_type.value().to_string()),
            nullable: Set(nullable),
            is_filter_column: Set(is_filter_column),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(column.insert(&self.db).await?)
    }

    pub async fn get_column(&self, id: i32) -> Result<table_schemas::Model> {
        table_schemas::Entity::find_by_id(id)
            .filter(table_schemas::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "table_schemas",
                id,
            })
    }

    pub async fn list_columns(&self, table_store_id: i32) -> Result<Vec<table_schemas::Model>> {
        let rows = table_schemas::Entity::find()
            .filter(table_schemas::Column::TableStoreId.eq(table_store_id))
            .filter(table_schemas::Column::Deleted.eq(false))
            .order_by_asc(table_schemas::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_column(
        &self,
        id: i32,
        request: UpdateColumnRequest,
    ) -> Result<table_schemas::Model> {
        let column = self.get_column(id).await?;

        let mut column: table_schemas::ActiveModel = column.into();
        if let Some(column_name) = request.column_name.as_deref() {
            column.column_name =
                Set(validate::required_text("table_schemas", "column_name", column_name)?);
        }
        if let Some(data_type) = request.data_type.as_deref() {
            let data_type = validate::choice::<TableSchemaDataType>(data_type)?;
            column.data_type = Set(data_type.value().to_string());
        }
        if let Some(nullable) = request.nullable {
            column.nullable = Set(nullable);
        }
        if let Some(is_filter_column) = request.is_filter_column {
            column.is_filter_column = Set(is_filter_column);
        }
        column.updated_at = Set(Utc::now());
        Ok(column.update(&self.db).await?)
    }

    pub async fn delete_column(&self, id: i32) -> Result<()> {
        let column = self.get_column(id).await?;

        let mut column: table_schemas::ActiveModel = column.into();
        column.deleted = Set(true);
        column.updated_at = Set(Utc::now());
        column.update(&self.db).await?;
        Ok(())
    }
}
