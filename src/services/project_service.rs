use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use super::error::{CatalogError, Result};
use super::validate;
use super::viz_service;
use crate::database::entities::{projects, templates, viz_reports};

pub struct ProjectService {
    db: DatabaseConnection,
}

impl ProjectService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_project(&self, name: &str) -> Result<projects::Model> {
        let name = validate::required_text("projects", "name", name)?;
        self.check_duplicate_name(&name, None).await?;

        let now = Utc::now();
        let project = projects::ActiveModel {
            name: Set(name),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let project = project.insert(&self.db).await?;
        info!("Created project {} ({})", project.id, project.name);
        Ok(project)
    }

    pub async fn get_project(&self, id: i32) -> Result<projects::Model> {
        projects::Entity::find_by_id(id)
            .filter(projects::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound {
                entity: "projects",
                id,
            })
    }

    pub async fn list_projects(&self) -> Result<Vec<projects::Model>> {
        let rows = projects::Entity::find()
            .filter(projects::Column::Deleted.eq(false))
            .order_by_asc(projects::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn rename_project(&self, id: i32, name: &str) -> Result<projects::Model> {
        let project = self.get_project(id).await?;
        let name = validate::required_text("projects", "name", name)?;
        self.check_duplicate_name(&name, Some(id)).await?;

        let mut project: projects::ActiveModel = project.into();
        project.name = Set(name);
        project.updated_at = Set(Utc::now());
        Ok(project.update(&self.db).await?)
    }

    /// Tombstone the project, its whole visualization hierarchy, and
    /// detach any template that points at it.
    pub async fn delete_project(&self, id: i32) -> Result<()> {
        let project = self.get_project(id).await?;
        let now = Utc::now();

        let txn = self.db.begin().await?;

        let report_ids: Vec<i32> = viz_reports::Entity::find()
            .filter(viz_reports::Column::ProjectId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        viz_service::tombstone_reports(&txn, &report_ids, now).await?;

        templates::Entity::update_many()
            .set(templates::ActiveModel {
                project_id: Set(None),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(templates::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;

        let mut project: projects::ActiveModel = project.into();
        project.deleted = Set(true);
        project.updated_at = Set(now);
        project.update(&txn).await?;

        txn.commit().await?;
        info!("Deleted project {}", id);
        Ok(())
    }

    async fn check_duplicate_name(&self, name: &str, exclude_id: Option<i32>) -> Result<()> {
        let mut query = projects::Entity::find().filter(projects::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(projects::Column::Id.ne(id));
        }
        if query.one(&self.db).await?.is_some() {
            return Err(CatalogError::Duplicate {
                entity: "projects",
                field: "name",
                value: name.to_string(),
            });
        }
        Ok(())
    }
}
