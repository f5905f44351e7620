use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::error::{CatalogError, Result};
use super::validate;
use crate::choices::{Choices, PreProcessingScript, TemplateStatus, TemplateType};
use crate::database::entities::{
    prep_flows, projects, qc_reports, table_stores, template_input_tables, template_prep_flows,
    template_qc_reports, templates, users,
};

#[derive(Debug, Clone)]
pub struct CreateTemplateRequest {
    pub project_id: Option<i32>,
    pub name: String,
    pub template_type: String,
    pub filepath: Option<String>,
    pub summary: Option<String>,
    /// Defaults to DRAFT when absent.
    pub status: Option<String>,
    pub pre_processing_scripts: Vec<String>,
    pub master_flow_id: Option<i32>,
    pub input_table_ids: Vec<i32>,
    pub prep_flow_ids: Vec<i32>,
    pub last_modified_by: Option<i32>,
}

/// Field-level patch. Outer `None` leaves a field alone; for the nullable
/// references the inner `Option` distinguishes re-pointing from clearing.
#[derive(Debug, Clone, Default)]
pub struct UpdateTemplateRequest {
    pub project_id: Option<Option<i32>>,
    pub name: Option<String>,
    pub template_type: Option<String>,
    pub filepath: Option<String>,
    pub summary: Option<String>,
    pub status: Option<String>,
    pub pre_processing_scripts: Option<Vec<String>>,
    pub master_flow_id: Option<Option<i32>>,
    pub last_modified_by: Option<i32>,
}

/// A template with the ids of its linked rows.
#[derive(Debug, Clone)]
pub struct TemplateDetail {
    pub template: templates::Model,
    pub input_table_ids: Vec<i32>,
    pub prep_flow_ids: Vec<i32>,
    pub qc_report_ids: Vec<i32>,
}

pub struct TemplateService {
    db: DatabaseConnection,
}

impl TemplateService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_template(
        &self,
        request: CreateTemplateRequest,
    ) -> Result<templates::Model> {
        let name = validate::required_text("templates", "name", &request.name)?;
        let template_type = validate::choice::<TemplateType>(&request.template_type)?;
        let status = match request.status.as_deref() {
            Some(value) => validate::choice::<TemplateStatus>(value)?,
            None => TemplateStatus::Draft,
        };
        let filepath =
            validate::optional_absolute_url("templates", "filepath", request.filepath.as_deref())?;
        let scripts = scripts_json(&request.pre_processing_scripts)?;
        let input_table_ids = dedup_ids(&request.input_table_ids);
        let prep_flow_ids = dedup_ids(&request.prep_flow_ids);

        let txn = self.db.begin().await?;

        if let Some(project_id) = request.project_id {
            require_project(&txn, "project_id", project_id).await?;
        }
        if let Some(master_flow_id) = request.master_flow_id {
            require_flow(&txn, "master_flow_id", master_flow_id).await?;
        }
        if let Some(user_id) = request.last_modified_by {
            require_user(&txn, "last_modified_by", user_id).await?;
        }
        for table_store_id in &input_table_ids {
            require_table_store(&txn, *table_store_id).await?;
        }
        for prep_flow_id in &prep_flow_ids {
            require_flow(&txn, "prep_flow_id", *prep_flow_id).await?;
        }

        let now = Utc::now();
        let template = templates::ActiveModel {
            project_id: Set(request.project_id),
            name: Set(name),
            template_type: Set(template_type.value().to_string()),
            filepath: Set(filepath),
            summary: Set(validate::optional_text(request.summary.as_deref())),
            status: Set(status.value().to_string()),
            pre_processing_scripts: Set(scripts),
            master_flow_id: Set(request.master_flow_id),
            qc_approved_by: Set(None),
            last_modified_by: Set(request.last_modified_by),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let template = template.insert(&txn).await?;

        insert_input_links(&txn, template.id, &input_table_ids, now).await?;
        insert_flow_links(&txn, template.id, &prep_flow_ids, now).await?;

        txn.commit().await?;
        info!("Created template {} ({})", template.id, template.name);
        Ok(template)
    }

    pub async fn get_template(&self, id: i32) -> Result<templates::Model> {
        templates::Entity::find_by_id(id)
            .filter(templates::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "templates",
                id,
            })
    }

    pub async fn get_template_detail(&self, id: i32) -> Result<TemplateDetail> {
        let template = self.get_template(id).await?;

        let input_table_ids = template_input_tables::Entity::find()
            .filter(template_input_tables::Column::TemplateId.eq(id))
            .order_by_asc(template_input_tables::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.table_store_id)
            .collect();

        let prep_flow_ids = template_prep_flows::Entity::find()
            .filter(template_prep_flows::Column::TemplateId.eq(id))
            .order_by_asc(template_prep_flows::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.prep_flow_id)
            .collect();

        let qc_report_ids = template_qc_reports::Entity::find()
            .filter(template_qc_reports::Column::TemplateId.eq(id))
            .order_by_asc(template_qc_reports::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.qc_report_id)
            .collect();

        Ok(TemplateDetail {
            template,
            input_table_ids,
            prep_flow_ids,
            qc_report_ids,
        })
    }

    pub async fn list_templates(&self) -> Result<Vec<templates::Model>> {
        let rows = templates::Entity::find()
            .filter(templates::Column::Deleted.eq(false))
            .order_by_asc(templates::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_template(
        &self,
        id: i32,
        request: UpdateTemplateRequest,
    ) -> Result<templates::Model> {
        let template = self.get_template(id).await?;

        let txn = self.db.begin().await?;

        let mut template: templates::ActiveModel = template.into();
        if let Some(project_id) = request.project_id {
            if let Some(project_id) = project_id {
                require_project(&txn, "project_id", project_id).await?;
            }
            template.project_id = Set(project_id);
        }
        if let Some(name) = request.name.as_deref() {
            template.name = Set(validate::required_text("templates", "name", name)?);
        }
        if let Some(template_type) = request.template_type.as_deref() {
            let template_type = validate::choice::<TemplateType>(template_type)?;
            template.template_type = Set(template_type.value().to_string());
        }
        if let Some(filepath) = request.filepath.as_deref() {
            template.filepath =
                Set(validate::optional_absolute_url("templates", "filepath", Some(filepath))?);
        }
        if let Some(summary) = request.summary.as_deref() {
            template.summary = Set(validate::optional_text(Some(summary)));
        }
        if let Some(status) = request.status.as_deref() {
            let status = validate::choice::<TemplateStatus>(status)?;
            template.status = Set(status.value().to_string());
        }
        if let Some(scripts) = request.pre_processing_scripts.as_deref() {
            template.pre_processing_scripts = Set(scripts_json(scripts)?);
        }
        if let Some(master_flow_id) = request.master_flow_id {
            if let Some(master_flow_id) = master_flow_id {
                require_flow(&txn, "master_flow_id", master_flow_id).await?;
            }
            template.master_flow_id = Set(master_flow_id);
        }
        if let Some(user_id) = request.last_modified_by {
            require_user(&txn, "last_modified_by", user_id).await?;
            template.last_modified_by = Set(Some(user_id));
        }
        template.updated_at = Set(Utc::now());
        let template = template.update(&txn).await?;

        txn.commit().await?;
        Ok(template)
    }

    /// Replace the input-table links.
    pub async fn set_input_tables(&self, id: i32, table_store_ids: &[i32]) -> Result<()> {
        let template = self.get_template(id).await?;
        let table_store_ids = dedup_ids(table_store_ids);
        let now = Utc::now();

        let txn = self.db.begin().await?;

        for table_store_id in &table_store_ids {
            require_table_store(&txn, *table_store_id).await?;
        }

        template_input_tables::Entity::delete_many()
            .filter(template_input_tables::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;
        insert_input_links(&txn, id, &table_store_ids, now).await?;

        let mut template: templates::ActiveModel = template.into();
        template.updated_at = Set(now);
        template.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Replace the prep-flow links.
    pub async fn set_prep_flows(&self, id: i32, prep_flow_ids: &[i32]) -> Result<()> {
        let template = self.get_template(id).await?;
        let prep_flow_ids = dedup_ids(prep_flow_ids);
        let now = Utc::now();

        let txn = self.db.begin().await?;

        for prep_flow_id in &prep_flow_ids {
            require_flow(&txn, "prep_flow_id", *prep_flow_id).await?;
        }

        template_prep_flows::Entity::delete_many()
            .filter(template_prep_flows::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;
        insert_flow_links(&txn, id, &prep_flow_ids, now).await?;

        let mut template: templates::ActiveModel = template.into();
        template.updated_at = Set(now);
        template.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Record the approving user and replace the QC-report links.
    pub async fn approve_qc(
        &self,
        id: i32,
        approver_id: i32,
        qc_report_ids: &[i32],
    ) -> Result<templates::Model> {
        let template = self.get_template(id).await?;
        let qc_report_ids = dedup_ids(qc_report_ids);
        let now = Utc::now();

        let txn = self.db.begin().await?;

        require_user(&txn, "qc_approved_by", approver_id).await?;
        for qc_report_id in &qc_report_ids {
            require_qc_report(&txn, *qc_report_id).await?;
        }

        template_qc_reports::Entity::delete_many()
            .filter(template_qc_reports::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;

        let mut links = Vec::new();
        for qc_report_id in &qc_report_ids {
            links.push(template_qc_reports::ActiveModel {
                template_id: Set(id),
                qc_report_id: Set(*qc_report_id),
                created_on: Set(now),
                ..Default::default()
            });
        }
        if !links.is_empty() {
            template_qc_reports::Entity::insert_many(links).exec(&txn).await?;
        }

        let mut template: templates::ActiveModel = template.into();
        template.qc_approved_by = Set(Some(approver_id));
        template.updated_at = Set(now);
        let template = template.update(&txn).await?;

        txn.commit().await?;
        info!("Recorded QC approval on template {} by user {}", id, approver_id);
        Ok(template)
    }

    /// Tombstone the template and remove all of its link rows.
    pub async fn delete_template(&self, id: i32) -> Result<()> {
        let template = self.get_template(id).await?;
        let now = Utc::now();

        let txn = self.db.begin().await?;

        template_input_tables::Entity::delete_many()
            .filter(template_input_tables::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;
        template_prep_flows::Entity::delete_many()
            .filter(template_prep_flows::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;
        template_qc_reports::Entity::delete_many()
            .filter(template_qc_reports::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;

        let mut template: templates::ActiveModel = template.into();
        template.deleted = Set(true);
        template.updated_at = Set(now);
        template.update(&txn).await?;

        txn.commit().await?;
        info!("Deleted template {}", id);
        Ok(())
    }

    pub async fn create_qc_report(&self, name: &str) -> Result<qc_reports::Model> {
        let name = validate::required_text("qc_reports", "name", name)?;
        self.check_duplicate_qc_name(&name, None).await?;

        let now = Utc::now();
        let report = qc_reports::ActiveModel {
            name: Set(name),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let report = report.insert(&self.db).await?;
        info!("Created QC report {} ({})", report.id, report.name);
        Ok(report)
    }

    pub async fn get_qc_report(&self, id: i32) -> Result<qc_reports::Model> {
        qc_reports::Entity::find_by_id(id)
            .filter(qc_reports::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "qc_reports",
                id,
            })
    }

    pub async fn list_qc_reports(&self) -> Result<Vec<qc_reports::Model>> {
        let rows = qc_reports::Entity::find()
            .filter(qc_reports::Column::Deleted.eq(false))
            .order_by_asc(qc_reports::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn rename_qc_report(&self, id: i32, name: &str) -> Result<qc_reports::Model> {
        let report = self.get_qc_report(id).await?;
        let name = validate::required_text("qc_reports", "name", name)?;
        self.check_duplicate_qc_name(&name, Some(id)).await?;

        let mut report: qc_reports::ActiveModel = report.into();
        report.name = Set(name);
        report.updated_at = Set(Utc::now());
        Ok(report.update(&self.db).await?)
    }

    /// Tombstone the QC report and drop its template links.
    pub async fn delete_qc_report(&self, id: i32) -> Result<()> {
        let report = self.get_qc_report(id).await?;
        let now = Utc::now();

        let txn = self.db.begin().await?;

        template_qc_reports::Entity::delete_many()
            .filter(template_qc_reports::Column::QcReportId.eq(id))
            .exec(&txn)
            .await?;

        let mut report: qc_reports::ActiveModel = report.into();
        report.deleted = Set(true);
        report.updated_at = Set(now);
        report.update(&txn).await?;

        txn.commit().await?;
        info!("Deleted QC report {}", id);
        Ok(())
    }

    async fn check_duplicate_qc_name(&self, name: &str, exclude_id: Option<i32>) -> Result<()> {
        let mut query = qc_reports::Entity::find().filter(qc_reports::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(qc_reports::Column::Id.ne(id));
        }
        if query.one(&self.db).await?.is_some() {
            return Err(CatalogError::Duplicate {
                entity: "qc_reports",
                field: "name",
                value: name.to_string(),
            });
        }
        Ok(())
    }
}

fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn scripts_json(values: &[String]) -> Result<String> {
    let scripts = validate::choice_list::<PreProcessingScript>(values)?;
    let canonical: Vec<&str> = scripts.iter().map(|s| s.value()).collect();
    Ok(serde_json::to_string(&canonical)?)
}

async fn insert_input_links<C: ConnectionTrait>(
    conn: &C,
    template_id: i32,
    table_store_ids: &[i32],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<()> {
    let mut links = Vec::new();
    for table_store_id in table_store_ids {
        links.push(template_input_tables::ActiveModel {
            template_id: Set(template_id),
            table_store_id: Set(*table_store_id),
            created_on: Set(now),
            ..Default::default()
        });
    }
    if !links.is_empty() {
        template_input_tables::Entity::insert_many(links).exec(conn).await?;
    }
    Ok(())
}

async fn insert_flow_links<C: ConnectionTrait>(
    conn: &C,
    template_id: i32,
    prep_flow_ids: &[i32],
    now: chrono::DateTime<chrono::Utc>,
) -> Result<()> {
    let mut links = Vec::new();
    for prep_flow_id in prep_flow_ids {
        links.push(template_prep_flows::ActiveModel {
            template_id: Set(template_id),
            prep_flow_id: Set(*prep_flow_id),
            created_on: Set(now),
            ..Default::default()
        });
    }
    if !links.is_empty() {
        template_prep_flows::Entity::insert_many(links).exec(conn).await?;
    }
    Ok(())
}

async fn require_project<C: ConnectionTrait>(
    conn: &C,
    field: &'static str,
    id: i32,
) -> Result<()> {
    let found = projects::Entity::find_by_id(id)
        .filter(projects::Column::Deleted.eq(false))
        .one(conn)
        .await?;
    if found.is_none() {
        return Err(CatalogError::MissingReference {
            entity: "templates",
            field,
            id,
        });
    }
    Ok(())
}

async fn require_flow<C: ConnectionTrait>(conn: &C, field: &'static str, id: i32) -> Result<()> {
    let found = prep_flows::Entity::find_by_id(id)
        .filter(prep_flows::Column::Deleted.eq(false))
        .one(conn)
        .await?;
    if found.is_none() {
        return Err(CatalogError::MissingReference {
            entity: "templates",
            field,
            id,
        });
    }
    Ok(())
}

async fn require_user<C: ConnectionTrait>(conn: &C, field: &'static str, id: i32) -> Result<()> {
    let found = users::Entity::find_by_id(id)
        .filter(users::Column::Deleted.eq(false))
        .one(conn)
        .await?;
    if found.is_none() {
        return Err(CatalogError::MissingReference {
            entity: "templates",
            field,
            id,
        });
    }
    Ok(())
}

async fn require_table_store<C: ConnectionTrait>(conn: &C, id: i32) -> Result<()> {
    let found = table_stores::Entity::find_by_id(id)
        .filter(table_stores::Column::Deleted.eq(false))
        .one(conn)
        .await?;
    if found.is_none() {
        return Err(CatalogError::MissingReference {
            entity: "templates",
            field: "input_table_id",
            id,
        });
    }
    Ok(())
}

async fn require_qc_report<C: ConnectionTrait>(conn: &C, id: i32) -> Result<()> {
    let found = qc_reports::Entity::find_by_id(id)
        .filter(qc_reports::Column::Deleted.eq(false))
        .one(conn)
        .await?;
    if found.is_none() {
        return Err(CatalogError::MissingReference {
            entity: "templates",
            field: "qc_report_id",
            id,
        });
    }
    Ok(())
}
