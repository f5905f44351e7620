use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Name).string())
                    .col(
                        ColumnDef::new(Users::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create projects table
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(
                        ColumnDef::new(Projects::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Projects::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(Projects::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_name")
                    .table(Projects::Table)
                    .col(Projects::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create table_stores table
        manager
            .create_table(
                Table::create()
                    .table(TableStores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TableStores::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TableStores::Name).string().not_null())
                    .col(ColumnDef::new(TableStores::Description).string())
                    .col(ColumnDef::new(TableStores::TableType).string().not_null())
                    .col(ColumnDef::new(TableStores::DataSourceOrigin).string())
                    .col(
                        ColumnDef::new(TableStores::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(TableStores::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(TableStores::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create table_schemas table
        manager
            .create_table(
                Table::create()
                    .table(TableSchemas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TableSchemas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TableSchemas::TableStoreId).integer().not_null())
                    .col(ColumnDef::new(TableSchemas::ColumnName).string().not_null())
                    .col(ColumnDef::new(TableSchemas::DataType).string().not_null())
                    .col(
                        ColumnDef::new(TableSchemas::Nullable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TableSchemas::IsFilterColumn)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(TableSchemas::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(TableSchemas::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(TableSchemas::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_table_schemas_table_store_id")
                            .from(TableSchemas::Table, TableSchemas::TableStoreId)
                            .to(TableStores::Table, TableStores::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_table_schemas_table_store_id")
                    .table(TableSchemas::Table)
                    .col(TableSchemas::TableStoreId)
                    .to_owned(),
            )
            .await?;

        // Create prep_flows table
        manager
            .create_table(
                Table::create()
                    .table(PrepFlows::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrepFlows::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrepFlows::Name).string().not_null())
                    .col(ColumnDef::new(PrepFlows::Description).string())
                    .col(ColumnDef::new(PrepFlows::Filepath).string())
                    .col(ColumnDef::new(PrepFlows::FlowId).string())
                    .col(
                        ColumnDef::new(PrepFlows::Status)
                            .string()
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(
                        ColumnDef::new(PrepFlows::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PrepFlows::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(PrepFlows::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create prep_flow_params table
        manager
            .create_table(
                Table::create()
                    .table(PrepFlowParams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrepFlowParams::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrepFlowParams::PrepFlowId).integer().not_null())
                    .col(ColumnDef::new(PrepFlowParams::Name).string().not_null())
                    .col(ColumnDef::new(PrepFlowParams::ParamType).string().not_null())
                    .col(ColumnDef::new(PrepFlowParams::FlowParamId).string())
                    .col(
                        ColumnDef::new(PrepFlowParams::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PrepFlowParams::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(PrepFlowParams::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prep_flow_params_prep_flow_id")
                            .from(PrepFlowParams::Table, PrepFlowParams::PrepFlowId)
                            .to(PrepFlows::Table, PrepFlows::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_prep_flow_params_prep_flow_id")
                    .table(PrepFlowParams::Table)
                    .col(PrepFlowParams::PrepFlowId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrepFlowParams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PrepFlows::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TableSchemas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TableStores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Name,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Name,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum TableStores {
    Table,
    Id,
    Name,
    Description,
    TableType,
    DataSourceOrigin,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum TableSchemas {
    Table,
    Id,
    TableStoreId,
    ColumnName,
    DataType,
    Nullable,
    IsFilterColumn,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum PrepFlows {
    Table,
    Id,
    Name,
    Description,
    Filepath,
    FlowId,
    Status,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum PrepFlowParams {
    Table,
    Id,
    PrepFlowId,
    Name,
    ParamType,
    FlowParamId,
    Deleted,
    CreatedOn,
    UpdatedAt,
}
