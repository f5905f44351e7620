use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use super::error::{CatalogError, Result};
use super::validate;
use crate::choices::{Choices, PrepFlowParamType, PrepFlowStatus};
use crate::database::entities::{prep_flow_params, prep_flows, template_prep_flows, templates};

#[derive(Debug, Clone)]
pub struct CreateFlowRequest {
    pub name: String,
    pub description: Option<String>,
    pub filepath: Option<String>,
    pub flow_id: Option<String>,
    /// Defaults to DRAFT when absent.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFlowRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub filepath: Option<String>,
    pub flow_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFlowParamRequest {
    pub name: Option<String>,
    pub param_type: Option<String>,
    pub flow_param_id: Option<String>,
}

pub struct FlowService {
    db: DatabaseConnection,
}

impl FlowService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_flow(&self, request: CreateFlowRequest) -> Result<prep_flows::Model> {
        let name = validate::required_text("prep_flows", "name", &request.name)?;
        let filepath =
            validate::optional_absolute_url("prep_flows", "filepath", request.filepath.as_deref())?;
        let status = match request.status.as_deref() {
            Some(value) => validate::choice::<PrepFlowStatus>(value)?,
            None => PrepFlowStatus::Draft,
        };

        let now = Utc::now();
        let flow = prep_flows::ActiveModel {
            name: Set(name),
            description: Set(validate::optional_text(request.description.as_deref())),
            filepath: Set(filepath),
            flow_id: Set(validate::optional_text(request.flow_id.as_deref())),
            status: Set(status.value().to_string()),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let flow = flow.insert(&self.db).await?;
        info!("Created prep flow {} ({})", flow.id, flow.name);
        Ok(flow)
    }

    pub async fn get_flow(&self, id: i32) -> Result<prep_flows::Model> {
        prep_flows::Entity::find_by_id(id)
            .filter(prep_flows::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "prep_flows",
                id,
            })
    }

    pub async fn list_flows(&self) -> Result<Vec<prep_flows::Model>> {
        let rows = prep_flows::Entity::find()
            .filter(prep_flows::Column::Deleted.eq(false))
            .order_by_asc(prep_flows::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_flow(
        &self,
        id: i32,
        request: UpdateFlowRequest,
    ) -> Result<prep_flows::Model> {
        let flow = self.get_flow(id).await?;

        let mut flow: prep_flows::ActiveModel = flow.into();
        if let Some(name) = request.name.as_deref() {
            flow.name = Set(validate::required_text("prep_flows", "name", name)?);
        }
        if let Some(description) = request.description.as_deref() {
            flow.description = Set(validate::optional_text(Some(description)));
        }
        if let Some(filepath) = request.filepath.as_deref() {
            flow.filepath =
                Set(validate::optional_absolute_url("prep_flows", "filepath", Some(filepath))?);
        }
        if let Some(flow_ref) = request.flow_id.as_deref() {
            flow.flow_id = Set(validate::optional_text(Some(flow_ref)));
        }
        if let Some(status) = request.status.as_deref() {
            let status = validate::choice::<PrepFlowStatus>(status)?;
            flow.status = Set(status.value().to_string());
        }
        flow.updated_at = Set(Utc::now());
        Ok(flow.update(&self.db).await?)
    }

    /// Tombstone the flow and its params, detach templates that use it
    /// as their master flow, and drop its template links.
    pub async fn delete_flow(&self, id: i32) -> Result<()> {
        let flow = self.get_flow(id).await?;
        let now = Utc::now();

        let txn = self.db.begin().await?;

        prep_flow_params::Entity::update_many()
            .set(prep_flow_params::ActiveModel {
                deleted: Set(true),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(prep_flow_params::Column::PrepFlowId.eq(id))
            .filter(prep_flow_params::Column::Deleted.eq(false))
            .exec(&txn)
            .await?;

        templates::Entity::update_many()
            .set(templates::ActiveModel {
                master_flow_id: Set(None),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(templates::Column::MasterFlowId.eq(id))
            .exec(&txn)
            .await?;

        template_prep_flows::Entity::delete_many()
            .filter(template_prep_flows::Column::PrepFlowId.eq(id))
            .exec(&txn)
            .await?;

        let mut flow: prep_flows::ActiveModel = flow.into();
        flow.deleted = Set(true);
        flow.updated_at = Set(now);
        flow.update(&txn).await?;

        txn.commit().await?;
        info!("Deleted prep flow {}", id);
        Ok(())
    }

    pub async fn add_param(
        &self,
        prep_flow_id: i32,
        name: &str,
        param_type: &str,
        flow_param_id: Option<&str>,
    ) -> Result<prep_flow_params::Model> {
        self.get_flow(prep_flow_id).await.map_err(|err| match err {
            CatalogError::NotFound { .. } => CatalogError::MissingReference {
                entity: "prep_flow_params",
                field: "prep_flow_id",
                id: prep_flow_id,
            },
            other => other,
        })?;
        let name = validate::required_text("prep_flow_params", "name", name)?;
        let param_type = validate::choice::<PrepFlowParamType>(param_type)?;

        let now = Utc::now();
        let param = prep_flow_params::ActiveModel {
            prep_flow_id: Set(prep_flow_id),
            name: Set(name),
            param_type: Set(param_type.value().to_string()),
            flow_param_id: Set(validate::optional_text(flow_param_id)),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(param.insert(&self.db).await?)
    }

    pub async fn get_param(&self, id: i32) -> Result<prep_flow_params::Model> {
        prep_flow_params::Entity::find_by_id(id)
            .filter(prep_flow_params::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "prep_flow_params",
                id,
            })
    }

    pub async fn list_params(&self, prep_flow_id: i32) -> Result<Vec<prep_flow_params::Model>> {
        let rows = prep_flow_params::Entity::find()
            .filter(prep_flow_params::Column::PrepFlowId.eq(prep_flow_id))
            .filter(prep_flow_params::Column::Deleted.eq(false))
            .order_by_asc(prep_flow_params::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update_param(
        &self,
        id: i32,
        request: UpdateFlowParamRequest,
    ) -> Result<prep_flow_params::Model> {
        let param = self.get_param(id).await?;

        let mut param: prep_flow_params::ActiveModel = param.into();
        if let Some(name) = request.name.as_deref() {
            param.name = Set(validate::required_text("prep_flow_params", "name", name)?);
        }
        if let Some(param_type) = request.param_type.as_deref() {
            let param_type = validate::choice::<PrepFlowParamType>(param_type)?;
            param.param_type = Set(param_type.value().to_string());
        }
        if let Some(flow_param_id) = request.flow_param_id.as_deref() {
            param.flow_param_id = Set(validate::optional_text(Some(flow_param_id)));
        }
        param.updated_at = Set(Utc::now());
        Ok(param.update(&self.db).await?)
    }

    pub async fn delete_param(&self, id: i32) -> Result<()> {
        let param = self.get_param(id).await?;

        let mut param: prep_flow_params::ActiveModel = param.into();
        param.deleted = Set(true);
        param.updated_at = Set(Utc::now());
        param.update(&self.db).await?;
        Ok(())
    }
}
