//! Persistence contract consumed by the account service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::UserId;
use crate::models::{NewUser, User};

/// Underlying persistence failure. Always surfaced as a server error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Storage of [`User`] records keyed by opaque [`UserId`].
///
/// A missing record is a valid `None` result, not an error. The store does not
/// enforce username uniqueness.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new user and returns it with its assigned id.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Removes the record and returns what was removed.
    async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;
}
