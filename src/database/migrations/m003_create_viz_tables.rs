use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create viz_reports table
        manager
            .create_table(
                Table::create()
                    .table(VizReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VizReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VizReports::ProjectId).integer().not_null())
                    .col(ColumnDef::new(VizReports::Name).string().not_null())
                    .col(ColumnDef::new(VizReports::Url).string())
                    .col(
                        ColumnDef::new(VizReports::SequenceNo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(VizReports::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(VizReports::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(VizReports::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_viz_reports_project_id")
                            .from(VizReports::Table, VizReports::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_viz_reports_project_id")
                    .table(VizReports::Table)
                    .col(VizReports::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Create viz_workbooks table
        manager
            .create_table(
                Table::create()
                    .table(VizWorkbooks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VizWorkbooks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VizWorkbooks::ReportId).integer().not_null())
                    .col(ColumnDef::new(VizWorkbooks::Name).string().not_null())
                    .col(ColumnDef::new(VizWorkbooks::Url).string())
                    .col(
                        ColumnDef::new(VizWorkbooks::SequenceNo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(VizWorkbooks::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(VizWorkbooks::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(VizWorkbooks::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_viz_workbooks_report_id")
                            .from(VizWorkbooks::Table, VizWorkbooks::ReportId)
                            .to(VizReports::Table, VizReports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_viz_workbooks_report_id")
                    .table(VizWorkbooks::Table)
                    .col(VizWorkbooks::ReportId)
                    .to_owned(),
            )
            .await?;

        // Create viz_dashboards table
        manager
            .create_table(
                Table::create()
                    .table(VizDashboards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VizDashboards::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VizDashboards::WorkbookId).integer().not_null())
                    .col(ColumnDef::new(VizDashboards::Name).string().not_null())
                    .col(ColumnDef::new(VizDashboards::Url).string().not_null())
                    .col(
                        ColumnDef::new(VizDashboards::SequenceNo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(VizDashboards::ExternalFilterConfig).text())
                    .col(
                        ColumnDef::new(VizDashboards::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(VizDashboards::CreatedOn).timestamp().not_null())
                    .col(ColumnDef::new(VizDashboards::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_viz_dashboards_workbook_id")
                            .from(VizDashboards::Table, VizDashboards::WorkbookId)
                            .to(VizWorkbooks::Table, VizWorkbooks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_viz_dashboards_workbook_id")
                    .table(VizDashboards::Table)
                    .col(VizDashboards::WorkbookId)
                    .to_owned(),
            )
            .await?;

        // Create viz_dashboard_filters table
        manager
            .create_table(
                Table::create()
                    .table(VizDashboardFilters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VizDashboardFilters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardFilters::DashboardId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardFilters::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardFilters::FilterColumnName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VizDashboardFilters::InternalFilterName).string())
                    .col(
                        ColumnDef::new(VizDashboardFilters::FilterType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardFilters::FilterSelectionType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardFilters::SequenceNo)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(VizDashboardFilters::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(VizDashboardFilters::CreatedOn)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardFilters::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_viz_dashboard_filters_dashboard_id")
                            .from(VizDashboardFilters::Table, VizDashboardFilters::DashboardId)
                            .to(VizDashboards::Table, VizDashboards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_viz_dashboard_filters_dashboard_id")
                    .table(VizDashboardFilters::Table)
                    .col(VizDashboardFilters::DashboardId)
                    .to_owned(),
            )
            .await?;

        // Create viz_dashboard_params table
        manager
            .create_table(
                Table::create()
                    .table(VizDashboardParams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VizDashboardParams::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardParams::DashboardId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardParams::InternalName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardParams::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardParams::ParamValues)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(VizDashboardParams::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(VizDashboardParams::CreatedOn)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VizDashboardParams::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_viz_dashboard_params_dashboard_id")
                            .from(VizDashboardParams::Table, VizDashboardParams::DashboardId)
                            .to(VizDashboards::Table, VizDashboards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_viz_dashboard_params_dashboard_id")
                    .table(VizDashboardParams::Table)
                    .col(VizDashboardParams::DashboardId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VizDashboardParams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VizDashboardFilters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VizDashboards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VizWorkbooks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VizReports::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum VizReports {
    Table,
    Id,
    ProjectId,
    Name,
    Url,
    SequenceNo,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum VizWorkbooks {
    Table,
    Id,
    ReportId,
    Name,
    Url,
    SequenceNo,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum VizDashboards {
    Table,
    Id,
    WorkbookId,
    Name,
    Url,
    SequenceNo,
    ExternalFilterConfig,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum VizDashboardFilters {
    Table,
    Id,
    DashboardId,
    DisplayName,
    FilterColumnName,
    InternalFilterName,
    FilterType,
    FilterSelectionType,
    SequenceNo,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum VizDashboardParams {
    Table,
    Id,
    DashboardId,
    InternalName,
    DisplayName,
    ParamValues,
    Deleted,
    CreatedOn,
    UpdatedAt,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
}
