use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use super::error::{CatalogError, Result};
use super::validate;
use crate::accounts::SignupPolicy;
use crate::database::entities::{templates, users};

pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sign-up entry point: consults the adapter before creating the account.
    pub async fn register(
        &self,
        policy: &dyn SignupPolicy,
        username: &str,
        name: Option<&str>,
    ) -> Result<users::Model> {
        if !policy.is_open_for_signup() {
            return Err(CatalogError::RegistrationClosed);
        }
        self.create_user(username, name).await
    }

    pub async fn create_user(&self, username: &str, name: Option<&str>) -> Result<users::Model> {
        let username = validate::required_text("users", "username", username)?;

        // The unique index spans tombstoned rows, so the duplicate check does too
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(&username))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(CatalogError::Duplicate {
                entity: "users",
                field: "username",
                value: username,
            });
        }

        let now = Utc::now();
        let user = users::ActiveModel {
            username: Set(username),
            name: Set(validate::optional_text(name)),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let user = user.insert(&self.db).await?;
        info!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    pub async fn get_user(&self, id: i32) -> Result<users::Model> {
        users::Entity::find_by_id(id)
            .filter(users::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound { entity: "users", id })
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Deleted.eq(false))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<users::Model>> {
        let rows = users::Entity::find()
            .filter(users::Column::Deleted.eq(false))
            .order_by_asc(users::Column::Username)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Update the display name. Blank input clears it.
    pub async fn update_profile(&self, id: i32, name: Option<&str>) -> Result<users::Model> {
        let user = self.get_user(id).await?;

        let mut user: users::ActiveModel = user.into();
        user.name = Set(validate::optional_text(name));
        user.updated_at = Set(Utc::now());
        Ok(user.update(&self.db).await?)
    }

    /// Tombstone the user and detach them from any template that names
    /// them as approver or last modifier.
    pub async fn delete_user(&self, id: i32) -> Result<()> {
        let user = self.get_user(id).await?;
        let now = Utc::now();

        let txn = self.db.begin().await?;

        templates::Entity::update_many()
            .set(templates::ActiveModel {
                qc_approved_by: Set(None),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(templates::Column::QcApprovedBy.eq(id))
            .exec(&txn)
            .await?;

        templates::Entity::update_many()
            .set(templates::ActiveModel {
                last_modified_by: Set(None),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(templates::Column::LastModifiedBy.eq(id))
            .exec(&txn)
            .await?;

        let mut user: users::ActiveModel = user.into();
        user.deleted = Set(true);
        user.updated_at = Set(now);
        user.update(&txn).await?;

        txn.commit().await?;
        info!("Deleted user {}", id);
        Ok(())
    }
}
