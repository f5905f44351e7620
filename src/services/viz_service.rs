use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::error::{CatalogError, Result};
use super::validate;
use crate::choices::{Choices, FilterColumnName, FilterSelectionType, FilterType};
use crate::database::entities::{
    projects, viz_dashboard_filters, viz_dashboard_params, viz_dashboards, viz_reports,
    viz_workbooks,
};

#[derive(Debug, Clone)]
pub struct CreateReportRequest {
    pub project_id: i32,
    pub name: String,
    pub url: Option<String>,
    pub sequence_no: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReportRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub sequence_no: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateWorkbookRequest {
    pub report_id: i32,
    pub name: String,
    pub url: Option<String>,
    pub sequence_no: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateWorkbookRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub sequence_no: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateDashboardRequest {
    pub workbook_id: i32,
    pub name: String,
    pub url: String,
    pub sequence_no: Option<i32>,
    pub external_filter_config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDashboardRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub sequence_no: Option<i32>,
    /// Inner `None` clears the stored config.
    pub external_filter_config: Option<Option<serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub struct CreateFilterRequest {
    pub dashboard_id: i32,
    pub display_name: String,
    pub filter_column_name: String,
    pub internal_filter_name: Option<String>,
    /// Defaults to DEFAULT when absent.
    pub filter_type: Option<String>,
    pub filter_selection_type: String,
    pub sequence_no: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFilterRequest {
    pub display_name: Option<String>,
    pub filter_column_name: Option<String>,
    pub internal_filter_name: Option<String>,
    pub filter_type: Option<String>,
    pub filter_selection_type: Option<String>,
    pub sequence_no: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateDashboardParamRequest {
    pub dashboard_id: i32,
    pub internal_name: String,
    pub display_name: String,
    pub param_values: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDashboardParamRequest {
    pub internal_name: Option<String>,
    pub display_name: Option<String>,
    pub param_values: Option<Vec<String>>,
}

pub struct VizService {
    db: DatabaseConnection,
}

impl VizService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_report(&self, request: CreateReportRequest) -> Result<viz_reports::Model> {
        let project = projects::Entity::find_by_id(request.project_id)
            .filter(projects::Column::Deleted.eq(false))
            .one(&self.db)
            .await?;
        if project.is_none() {
            return Err(CatalogError::MissingReference {
                entity: "viz_reports",
                field: "project_id",
                id: request.project_id,
            });
        }
        let name = validate::required_text("viz_reports", "name", &request.name)?;
        let url = validate::optional_absolute_url("viz_reports", "url", request.url.as_deref())?;

        let now = Utc::now();
        let report = viz_reports::ActiveModel {
            project_id: Set(request.project_id),
            name: Set(name),
            url: Set(url),
            sequence_no: Set(request.sequence_no.unwrap_or(0)),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let report = report.insert(&self.db).await?;
        info!("Created viz report {} ({})", report.id, report.name);
        Ok(report)
    }

    pub async fn get_report(&self, id: i32) -> Result<viz_reports::Model> {
        viz_reports::Entity::find_by_id(id)
            .filter(viz_reports::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "viz_reports",
                id,
            })
    }

    /// Reports for one project in display order.
    pub async fn list_reports(&self, project_id: i32) -> Result<Vec<viz_reports::Model>> {
        let rows = viz_reports::Entity::find()
            .filter(viz_reports::Column::ProjectId.eq(project_id))
            .filter(viz_reports::Column::Deleted.eq(false))
            .order_by_asc(viz_reports::Column::SequenceNo)
            .order_by_asc(viz_reports::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_report(
        &self,
        id: i32,
        request: UpdateReportRequest,
    ) -> Result<viz_reports::Model> {
        let report = self.get_report(id).await?;

        let mut report: viz_reports::ActiveModel = report.into();
        if let Some(name) = request.name.as_deref() {
            report.name = Set(validate::required_text("viz_reports", "name", name)?);
        }
        if let Some(url) = request.url.as_deref() {
            report.url = Set(validate::optional_absolute_url("viz_reports", "url", Some(url))?);
        }
        if let Some(sequence_no) = request.sequence_no {
            report.sequence_no = Set(sequence_no);
        }
        report.updated_at = Set(Utc::now());
        Ok(report.update(&self.db).await?)
    }

    /// Tombstone the report and everything beneath it.
    pub async fn delete_report(&self, id: i32) -> Result<()> {
        self.get_report(id).await?;
        let now = Utc::now();

        let txn = self.db.begin().await?;
        tombstone_reports(&txn, &[id], now).await?;
        txn.commit().await?;
        info!("Deleted viz report {}", id);
        Ok(())
    }

    pub async fn create_workbook(
        &self,
        request: CreateWorkbookRequest,
    ) -> Result<viz_workbooks::Model> {
        self.get_report(request.report_id).await.map_err(|err| match err {
            CatalogError::NotFound { .. } => CatalogError::MissingReference {
                entity: "viz_workbooks",
                field: "report_id",
                id: request.report_id,
            },
            other => other,
        })?;
        let name = validate::required_text("viz_workbooks", "name", &request.name)?;
        let url = validate::optional_absolute_url("viz_workbooks", "url", request.url.as_deref())?;

        let now = Utc::now();
        let workbook = viz_workbooks::ActiveModel {
            report_id: Set(request.report_id),
            name: Set(name),
            url: Set(url),
            sequence_no: Set(request.sequence_no.unwrap_or(0)),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(workbook.insert(&self.db).await?)
    }

    pub async fn get_workbook(&self, id: i32) -> Result<viz_workbooks::Model> {
        viz_workbooks::Entity::find_by_id(id)
            .filter(viz_workbooks::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "viz_workbooks",
                id,
            })
    }

    pub async fn list_workbooks(&self, report_id: i32) -> Result<Vec<viz_workbooks::Model>> {
        let rows = viz_workbooks::Entity::find()
            .filter(viz_workbooks::Column::ReportId.eq(report_id))
            .filter(viz_workbooks::Column::Deleted.eq(false))
            .order_by_asc(viz_workbooks::Column::SequenceNo)
            .order_by_asc(viz_workbooks::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_workbook(
        &self,
        id: i32,
        request: UpdateWorkbookRequest,
    ) -> Result<viz_workbooks::Model> {
        let workbook = self.get_workbook(id).await?;

        let mut workbook: viz_workbooks::ActiveModel = workbook.into();
        if let Some(name) = request.name.as_deref() {
            workbook.name = Set(validate::required_text("viz_workbooks", "name", name)?);
        }
        if let Some(url) = request.url.as_deref() {
            workbook.url =
                Set(validate::optional_absolute_url("viz_workbooks", "url", Some(url))?);
        }
        if let Some(sequence_no) = request.sequence_no {
            workbook.sequence_no = Set(sequence_no);
        }
        workbook.updated_at = Set(Utc::now());
        Ok(workbook.update(&self.db).await?)
    }

    pub async fn delete_workbook(&self, id: i32) -> Result<()> {
        self.get_workbook(id).await?;
        let now = Utc::now();

        let txn = self.db.begin().await?;
        tombstone_workbooks(&txn, &[id], now).await?;
        txn.commit().await?;
        info!("Deleted viz workbook {}", id);
        Ok(())
    }

    pub async fn create_dashboard(
        &self,
        request: CreateDashboardRequest,
    ) -> Result<viz_dashboards::Model> {
        self.get_workbook(request.workbook_id).await.map_err(|err| match err {
            CatalogError::NotFound { .. } => CatalogError::MissingReference {
                entity: "viz_dashboards",
                field: "workbook_id",
                id: request.workbook_id,
            },
            other => other,
        })?;
        let name = validate::required_text("viz_dashboards", "name", &request.name)?;
        let url = validate::absolute_url("viz_dashboards", "url", &request.url)?;
        let filter_config = match &request.external_filter_config {
            Some(value) => Some(serde_json::to_string(value)?),
            None => None,
        };

        let now = Utc::now();
        let dashboard = viz_dashboards::ActiveModel {
            workbook_id: Set(request.workbook_id),
            name: Set(name),
            url: Set(url),
            sequence_no: Set(request.sequence_no.unwrap_or(0)),
            external_filter_config: Set(filter_config),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(dashboard.insert(&self.db).await?)
    }

    pub async fn get_dashboard(&self, id: i32) -> Result<viz_dashboards::Model> {
        viz_dashboards::Entity::find_by_id(id)
            .filter(viz_dashboards::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "viz_dashboards",
                id,
            })
    }

    pub async fn list_dashboards(&self, workbook_id: i32) -> Result<Vec<viz_dashboards::Model>> {
        let rows = viz_dashboards::Entity::find()
            .filter(viz_dashboards::Column::WorkbookId.eq(workbook_id))
            .filter(viz_dashboards::Column::Deleted.eq(false))
            .order_by_asc(viz_dashboards::Column::SequenceNo)
            .order_by_asc(viz_dashboards::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_dashboard(
        &self,
        id: i32,
        request: UpdateDashboardRequest,
    ) -> Result<viz_dashboards::Model> {
        let dashboard = self.get_dashboard(id).await?;

        let mut dashboard: viz_dashboards::ActiveModel = dashboard.into();
        if let Some(name) = request.name.as_deref() {
            dashboard.name = Set(validate::required_text("viz_dashboards", "name", name)?);
        }
        if let Some(url) = request.url.as_deref() {
            dashboard.url = Set(validate::absolute_url("viz_dashboards", "url", url)?);
        }
        if let Some(sequence_no) = request.sequence_no {
            dashboard.sequence_no = Set(sequence_no);
        }
        if let Some(filter_config) = &request.external_filter_config {
            let stored = match filter_config {
                Some(value) => Some(serde_json::to_string(value)?),
                None => None,
            };
            dashboard.external_filter_config = Set(stored);
        }
        dashboard.updated_at = Set(Utc::now());
        Ok(dashboard.update(&self.db).await?)
    }

    pub async fn delete_dashboard(&self, id: i32) -> Result<()> {
        self.get_dashboard(id).await?;
        let now = Utc::now();

        let txn = self.db.begin().await?;
        tombstone_dashboards(&txn, &[id], now).await?;
        txn.commit().await?;
        info!("Deleted viz dashboard {}", id);
        Ok(())
    }

    pub async fn create_filter(
        &self,
        request: CreateFilterRequest,
    ) -> Result<viz_dashboard_filters::Model> {
        self.get_dashboard(request.dashboard_id).await.map_err(|err| match err {
            CatalogError::NotFound { .. } => CatalogError::MissingReference {
                entity: "viz_dashboard_filters",
                field: "dashboard_id",
                id: request.dashboard_id,
            },
            other => other,
        })?;
        let display_name =
            validate::required_text("viz_dashboard_filters", "display_name", &request.display_name)?;
        let column = validate::choice::<FilterColumnName>(&request.filter_column_name)?;
        let filter_type = match request.filter_type.as_deref() {
            Some(value) => validate::choice::<FilterType>(value)?,
            None => FilterType::Default,
        };
        let selection = validate::choice::<FilterSelectionType>(&request.filter_selection_type)?;

        let now = Utc::now();
        let filter = viz_dashboard_filters::ActiveModel {
            dashboard_id: Set(request.dashboard_id),
            display_name: Set(display_name),
            filter_column_name: Set(column.value().to_string()),
            internal_filter_name: Set(validate::optional_text(
                request.internal_filter_name.as_deref(),
            )),
            filter_type: Set(filter_type.value().to_string()),
            filter_selection_type: Set(selection.value().to_string()),
            sequence_no: Set(request.sequence_no.unwrap_or(0)),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(filter.insert(&self.db).await?)
    }

    pub async fn get_filter(&self, id: i32) -> Result<viz_dashboard_filters::Model> {
        viz_dashboard_filters::Entity::find_by_id(id)
            .filter(viz_dashboard_filters::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "viz_dashboard_filters",
                id,
            })
    }

    pub async fn list_filters(
        &self,
        dashboard_id: i32,
    ) -> Result<Vec<viz_dashboard_filters::Model>> {
        let rows = viz_dashboard_filters::Entity::find()
            .filter(viz_dashboard_filters::Column::DashboardId.eq(dashboard_id))
            .filter(viz_dashboard_filters::Column::Deleted.eq(false))
            .order_by_asc(viz_dashboard_filters::Column::SequenceNo)
            .order_by_asc(viz_dashboard_filters::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_filter(
        &self,
        id: i32,
        request: UpdateFilterRequest,
    ) -> Result<viz_dashboard_filters::Model> {
        let filter = self.get_filter(id).await?;

        let mut filter: viz_dashboard_filters::ActiveModel = filter.into();
        if let Some(display_name) = request.display_name.as_deref() {
            filter.display_name = Set(validate::required_text(
                "viz_dashboard_filters",
                "display_name",
                display_name,
            )?);
        }
        if let Some(column) = request.filter_column_name.as_deref() {
            let column = validate::choice::<FilterColumnName>(column)?;
            filter.filter_column_name = Set(column.value().to_string());
        }
        if let Some(internal) = request.internal_filter_name.as_deref() {
            filter.internal_filter_name = Set(validate::optional_text(Some(internal)));
        }
        if let Some(filter_type) = request.filter_type.as_deref() {
            let filter_type = validate::choice::<FilterType>(filter_type)?;
            filter.filter_type = Set(filter_type.value().to_string());
        }
        if let Some(selection) = request.filter_selection_type.as_deref() {
            let selection = validate::choice::<FilterSelectionType>(selection)?;
            filter.filter_selection_type = Set(selection.value().to_string());
        }
        if let Some(sequence_no) = request.sequence_no {
            filter.sequence_no = Set(sequence_no);
        }
        filter.updated_at = Set(Utc::now());
        Ok(filter.update(&self.db).await?)
    }

    pub async fn delete_filter(&self, id: i32) -> Result<()> {
        let filter = self.get_filter(id).await?;

        let mut filter: viz_dashboard_filters::ActiveModel = filter.into();
        filter.deleted = Set(true);
        filter.updated_at = Set(Utc::now());
        filter.update(&self.db).await?;
        Ok(())
    }

    pub async fn create_param(
        &self,
        request: CreateDashboardParamRequest,
    ) -> Result<viz_dashboard_params::Model> {
        self.get_dashboard(request.dashboard_id).await.map_err(|err| match err {
            CatalogError::NotFound { .. } => CatalogError::MissingReference {
                entity: "viz_dashboard_params",
                field: "dashboard_id",
                id: request.dashboard_id,
            },
            other => other,
        })?;
        let internal_name =
            validate::required_text("viz_dashboard_params", "internal_name", &request.internal_name)?;
        let display_name =
            validate::required_text("viz_dashboard_params", "display_name", &request.display_name)?;
        let values = serde_json::to_string(&request.param_values)?;

        let now = Utc::now();
        let param = viz_dashboard_params::ActiveModel {
            dashboard_id: Set(request.dashboard_id),
            internal_name: Set(internal_name),
            display_name: Set(display_name),
            param_values: Set(values),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(param.insert(&self.db).await?)
    }

    pub async fn get_param(&self, id: i32) -> Result<viz_dashboard_params::Model> {
        viz_dashboard_params::Entity::find_by_id(id)
            .filter(viz_dashboard_params::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "viz_dashboard_params",
                id,
            })
    }

    pub async fn list_params(&self, dashboard_id: i32) -> Result<Vec<viz_dashboard_params::Model>> {
        let rows = viz_dashboard_params::Entity::find()
            .filter(viz_dashboard_params::Column::DashboardId.eq(dashboard_id))
            .filter(viz_dashboard_params::Column::Deleted.eq(false))
            .order_by_asc(viz_dashboard_params::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_param(
        &self,
        id: i32,
        request: UpdateDashboardParamRequest,
    ) -> Result<viz_dashboard_params::Model> {
        let param = self.get_param(id).await?;

        let mut param: viz_dashboard_params::ActiveModel = param.into();
        if let Some(internal_name) = request.internal_name.as_deref() {
            param.internal_name = Set(validate::required_text(
                "viz_dashboard_params",
                "internal_name",
                internal_name,
            )?);
        }
        if let Some(display_name) = request.display_name.as_deref() {
            param.display_name = Set(validate::required_text(
                "viz_dashboard_params",
                "display_name",
                display_name,
            )?);
        }
        if let Some(values) = &request.param_values {
            param.param_values = Set(serde_json::to_string(values)?);
        }
        param.updated_at = Set(Utc::now());
        Ok(param.update(&self.db).await?)
    }

    pub async fn delete_param(&self, id: i32) -> Result<()> {
        let param = self.get_param(id).await?;

        let mut param: viz_dashboard_params::ActiveModel = param.into();
        param.deleted = Set(true);
        param.updated_at = Set(Utc::now());
        param.update(&self.db).await?;
        Ok(())
    }
}

/// Tombstone reports and every workbook, dashboard, filter, and param
/// beneath them. Rows already tombstoned are left untouched.
pub(crate) async fn tombstone_reports(
    txn: &DatabaseTransaction,
    report_ids: &[i32],
    now: DateTime<Utc>,
) -> Result<()> {
    if report_ids.is_empty() {
        return Ok(());
    }

    viz_reports::Entity::update_many()
        .set(viz_reports::ActiveModel {
            deleted: Set(true),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(viz_reports::Column::Id.is_in(report_ids.iter().copied()))
        .filter(viz_reports::Column::Deleted.eq(false))
        .exec(txn)
        .await?;

    let workbook_ids: Vec<i32> = viz_workbooks::Entity::find()
        .filter(viz_workbooks::Column::ReportId.is_in(report_ids.iter().copied()))
        .all(txn)
        .await?
        .into_iter()
        .map(|w| w.id)
        .collect();
    tombstone_workbooks(txn, &workbook_ids, now).await
}

pub(crate) async fn tombstone_workbooks(
    txn: &DatabaseTransaction,
    workbook_ids: &[i32],
    now: DateTime<Utc>,
) -> Result<()> {
    if workbook_ids.is_empty() {
        return Ok(());
    }

    viz_workbooks::Entity::update_many()
        .set(viz_workbooks::ActiveModel {
            deleted: Set(true),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(viz_workbooks::Column::Id.is_in(workbook_ids.iter().copied()))
        .filter(viz_workbooks::Column::Deleted.eq(false))
        .exec(txn)
        .await?;

    let dashboard_ids: Vec<i32> = viz_dashboards::Entity::find()
        .filter(viz_dashboards::Column::WorkbookId.is_in(workbook_ids.iter().copied()))
        .all(txn)
        .await?
        .into_iter()
        .map(|d| d.id)
        .collect();
    tombstone_dashboards(txn, &dashboard_ids, now).await
}

pub(crate) async fn tombstone_dashboards(
    txn: &DatabaseTransaction,
    dashboard_ids: &[i32],
    now: DateTime<Utc>,
) -> Result<()> {
    if dashboard_ids.is_empty() {
        return Ok(());
    }

    viz_dashboards::Entity::update_many()
        .set(viz_dashboards::ActiveModel {
            deleted: Set(true),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(viz_dashboards::Column::Id.is_in(dashboard_ids.iter().copied()))
        .filter(viz_dashboards::Column::Deleted.eq(false))
        .exec(txn)
        .await?;

    viz_dashboard_filters::Entity::update_many()
        .set(viz_dashboard_filters::ActiveModel {
            deleted: Set(true),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(viz_dashboard_filters::Column::DashboardId.is_in(dashboard_ids.iter().copied()))
        .filter(viz_dashboard_filters::Column::Deleted.eq(false))
        .exec(txn)
        .await?;

    viz_dashboard_params::Entity::update_many()
        .set(viz_dashboard_params::ActiveModel {
            deleted: Set(true),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(viz_dashboard_params::Column::DashboardId.is_in(dashboard_ids.iter().copied()))
        .filter(viz_dashboard_params::Column::Deleted.eq(false))
        .exec(txn)
        .await?;

    Ok(())
}
