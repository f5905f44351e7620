use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create qc_reports table
        manager
            .create_table(
                Table::create()
                    .table(QcReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QcReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QcReports::Name).string().not_null())
                    .col(
                        ColumnDef::new(QcReports::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(QcReports::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(QcReports::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_qc_reports_name")
                    .table(QcReports::Table)
                    .col(QcReports::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create templates table
        manager
            .create_table(
                Table::create()
                    .table(Templates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Templates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Templates::ProjectId).integer())
                    .col(ColumnDef::new(Templates::Name).string().not_null())
                    .col(ColumnDef::new(Templates::TemplateType).string().not_null())
                    .col(ColumnDef::new(Templates::Filepath).string())
                    .col(ColumnDef::new(Templates::Summary).string())
                    .col(
                        ColumnDef::new(Templates::Status)
                            .string()
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(
                        ColumnDef::new(Templates::PreProcessingScripts)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Templates::MasterFlowId).integer())
                    .col(ColumnDef::new(Templates::QcApprovedBy).integer())
                    .col(ColumnDef::new(Templates::LastModifiedBy).integer())
                    .col(
                        ColumnDef::new(Templates::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Templates::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(Templates::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_templates_project_id")
                            .from(Templates::Table, Templates::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_templates_master_flow_id")
                            .from(Templates::Table, Templates::MasterFlowId)
                            .to(PrepFlows::Table, PrepFlows::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_templates_qc_approved_by")
                            .from(Templates::Table, Templates::QcApprovedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_templates_last_modified_by")
                            .from(Templates::Table, Templates::LastModifiedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_templates_project_id")
                    .table(Templates::Table)
                    .col(Templates::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Create template_input_tables join table
        manager
            .create_table(
                Table::create()
                    .table(TemplateInputTables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemplateInputTables::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TemplateInputTables::TemplateId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateInputTables::TableStoreId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateInputTables::CreatedOn)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_input_tables_template_id")
                            .from(TemplateInputTables::Table, TemplateInputTables::TemplateId)
                            .to(Templates::Table, Templates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_input_tables_table_store_id")
                            .from(TemplateInputTables::Table, TemplateInputTables::TableStoreId)
                            .to(TableStores::Table, TableStores::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_template_input_tables_pair")
                    .table(TemplateInputTables::Table)
                    .col(TemplateInputTables::TemplateId)
                    .col(TemplateInputTables::TableStoreId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create template_prep_flows join table
        manager
            .create_table(
                Table::create()
                    .table(TemplatePrepFlows::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemplatePrepFlows::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TemplatePrepFlows::TemplateId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplatePrepFlows::PrepFlowId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplatePrepFlows::CreatedOn)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_prep_flows_template_id")
                            .from(TemplatePrepFlows::Table, TemplatePrepFlows::TemplateId)
                            .to(Templates::Table, Templates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_prep_flows_prep_flow_id")
                            .from(TemplatePrepFlows::Table, TemplatePrepFlows::PrepFlowId)
                            .to(PrepFlows::Table, PrepFlows::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_template_prep_flows_pair")
                    .table(TemplatePrepFlows::Table)
                    .col(TemplatePrepFlows::TemplateId)
                    .col(TemplatePrepFlows::PrepFlowId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create template_qc_reports join table
        manager
            .create_table(
                Table::create()
                    .table(TemplateQcReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemplateQcReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TemplateQcReports::TemplateId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateQcReports::QcReportId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TemplateQcReports::CreatedOn)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_qc_reports_template_id")
                            .from(TemplateQcReports::Table, TemplateQcReports::TemplateId)
                            .to(Templates::Table, Templates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_qc_reports_qc_report_id")
                            .from(TemplateQcReports::Table, TemplateQcReports::QcReportId)
                            .to(QcReports::Table, QcReports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_template_qc_reports_pair")
                    .table(TemplateQcReports::Table)
                    .col(TemplateQcReports::TemplateId)
                    .col(TemplateQcReports::QcReportId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TemplateQcReports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TemplatePrepFlows::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TemplateInputTables::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Templates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QcReports::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum QcReports {
    Table,
    Id,
    Name,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum Templates {
    Table,
    Id,
    ProjectId,
    Name,
    TemplateType,
    Filepath,
    Summary,
    Status,
    PreProcessingScripts,
    MasterFlowId,
    QcApprovedBy,
    LastModifiedBy,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum TemplateInputTables {
    Table,
    Id,
    TemplateId,
    TableStoreId,
    CreatedOn,
}

#[derive(Iden)]
enum TemplatePrepFlows {
    Table,
    Id,
    TemplateId,
    PrepFlowId,
    CreatedOn,
}

#[derive(Iden)]
enum TemplateQcReports {
    Table,
    Id,
    TemplateId,
    QcReportId,
    CreatedOn,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
}

#[derive(Iden)]
enum TableStores {
    Table,
    Id,
}

#[derive(Iden)]
enum PrepFlows {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
