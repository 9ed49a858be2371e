use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::UserId;
use crate::entities::users;
use crate::models::{NewUser, User};

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            username: model.username,
            password_hash: model.password_hash,
            logged_in: model.logged_in,
            created_at: model.created_at,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new user under a freshly generated id
    pub async fn insert(&self, user: NewUser) -> Result<User> {
        let active = users::ActiveModel {
            id: Set(UserId::generate().into_inner()),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            logged_in: Set(user.logged_in),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        Ok(User::from(model))
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &UserId) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id.as_str())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Delete a user by ID, returning the removed row.
    /// Two statements: a concurrent delete between them yields `None`.
    pub async fn delete(&self, id: &UserId) -> Result<Option<User>> {
        let Some(user) = users::Entity::find_by_id(id.as_str())
            .one(&self.conn)
            .await
            .context("Failed to query user for deletion")?
        else {
            return Ok(None);
        };

        let result = users::Entity::delete_by_id(id.as_str())
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(Some(User::from(user)))
    }
}
