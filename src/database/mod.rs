pub mod connection;
pub mod entities;
pub mod migrations;
pub mod seed_data;

pub use connection::*;

use clap::Subcommand;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use sea_orm_migration::prelude::*;
use tracing::info;

use crate::database::entities::{
    prep_flow_params, prep_flows, projects, qc_reports, table_schemas, table_stores, templates,
    users, viz_dashboard_filters, viz_dashboard_params, viz_dashboards, viz_reports, viz_workbooks,
};
use crate::database::migrations::Migrator;

#[derive(Subcommand, Debug)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

pub async fn init_database(database_path: &str) -> anyhow::Result<DatabaseConnection> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    Migrator::up(&db, None).await?;
    info!("Database migrations completed");

    Ok(db)
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> anyhow::Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}

/// Live (non-tombstoned) row counts for the principal catalog entities.
#[derive(Debug, Clone)]
pub struct CatalogSummary {
    pub users: u64,
    pub projects: u64,
    pub table_stores: u64,
    pub table_schemas: u64,
    pub prep_flows: u64,
    pub prep_flow_params: u64,
    pub qc_reports: u64,
    pub templates: u64,
    pub viz_reports: u64,
    pub viz_workbooks: u64,
    pub viz_dashboards: u64,
    pub viz_dashboard_filters: u64,
    pub viz_dashboard_params: u64,
}

pub async fn catalog_summary(db: &DatabaseConnection) -> Result<CatalogSummary, DbErr> {
    Ok(CatalogSummary {
        users: users::Entity::find()
            .filter(users::Column::Deleted.eq(false))
            .count(db)
            .await?,
        projects: projects::Entity::find()
            .filter(projects::Column::Deleted.eq(false))
            .count(db)
            .await?,
        table_stores: table_stores::Entity::find()
            .filter(table_stores::Column::Deleted.eq(false))
            .count(db)
            .await?,
        table_schemas: table_schemas::Entity::find()
            .filter(table_schemas::Column::Deleted.eq(false))
            .count(db)
            .await?,
        prep_flows: prep_flows::Entity::find()
            .filter(prep_flows::Column::Deleted.eq(false))
            .count(db)
            .await?,
        prep_flow_params: prep_flow_params::Entity::find()
            .filter(prep_flow_params::Column::Deleted.eq(false))
            .count(db)
            .await?,
        qc_reports: qc_reports::Entity::find()
            .filter(qc_reports::Column::Deleted.eq(false))
            .count(db)
            .await?,
        templates: templates::Entity::find()
            .filter(templates::Column::Deleted.eq(false))
            .count(db)
            .await?,
        viz_reports: viz_reports::Entity::find()
            .filter(viz_reports::Column::Deleted.eq(false))
            .count(db)
            .await?,
        viz_workbooks: viz_workbooks::Entity::find()
            .filter(viz_workbooks::Column::Deleted.eq(false))
            .count(db)
            .await?,
        viz_dashboards: viz_dashboards::Entity::find()
            .filter(viz_dashboards::Column::Deleted.eq(false))
            .count(db)
            .await?,
        viz_dashboard_filters: viz_dashboard_filters::Entity::find()
            .filter(viz_dashboard_filters::Column::Deleted.eq(false))
            .count(db)
            .await?,
        viz_dashboard_params: viz_dashboard_params::Entity::find()
            .filter(viz_dashboard_params::Column::Deleted.eq(false))
            .count(db)
            .await?,
    })
}
