use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::domain::UserId;
use crate::models::{NewUser, User};

pub mod account_store;
pub mod memory;
pub mod migrator;
pub mod repositories;

pub use account_store::{AccountStore, StoreError};
pub use memory::MemoryStore;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    /// Connects with a bounded retry loop, sleeping between failed attempts.
    /// Gives up after `connect_max_attempts` failures.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let max_attempts = config.connect_max_attempts.max(1);
        let delay = Duration::from_millis(config.connect_retry_delay_ms);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match Self::with_pool_options(
                &config.url,
                config.max_connections,
                config.min_connections,
            )
            .await
            {
                Ok(store) => return Ok(store),
                Err(e) if attempt < max_attempts => {
                    warn!(
                        attempt,
                        max_attempts,
                        error = %format!("{e:#}"),
                        "Database connection failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(e.context(format!(
                        "Database unavailable after {max_attempts} attempts"
                    )));
                }
            }
        }
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
            {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        // Every connection to `:memory:` opens its own empty database.
        let (max_connections, min_connections) = if db_url.contains(":memory:") {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .context("Failed to close database connection")?;
        info!("Database connection closed");
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }
}

#[async_trait]
impl AccountStore for Store {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        Ok(self.user_repo().insert(user).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.user_repo().get_by_username(username).await?)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.user_repo().get_by_id(id).await?)
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.user_repo().delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    fn temp_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: crate::constants::TEMP_PASSWORD_SENTINEL.to_string(),
            logged_in: false,
        }
    }

    #[tokio::test]
    async fn insert_and_find_round_trip() {
        let store = memory_store().await;

        let user = store.insert(temp_user("sam")).await.unwrap();
        assert!(!user.logged_in);
        assert!(chrono::Utc::now() - user.created_at < chrono::Duration::minutes(1));

        let by_id = store.find_by_id(&user.id).await.unwrap();
        assert_eq!(by_id.as_ref(), Some(&user));

        let by_name = store.find_by_username("sam").await.unwrap();
        assert_eq!(by_name, Some(user));
    }

    #[tokio::test]
    async fn missing_records_are_none_not_errors() {
        let store = memory_store().await;
        let id = UserId::new("does-not-exist");

        assert!(store.find_by_id(&id).await.unwrap().is_none());
        assert!(store.find_by_username("nobody").await.unwrap().is_none());
        assert!(store.delete_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_returns_removed_record() {
        let store = memory_store().await;
        let user = store.insert(temp_user("gone")).await.unwrap();

        let deleted = store.delete_by_id(&user.id).await.unwrap();
        assert_eq!(deleted, Some(user.clone()));
        assert!(store.find_by_id(&user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn schema_does_not_enforce_unique_usernames() {
        let store = memory_store().await;

        let first = store.insert(temp_user("twin")).await.unwrap();
        let second = store.insert(temp_user("twin")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn file_database_is_created_with_parent_dirs() {
        let root = std::env::temp_dir().join(format!("user-accounts-{}", uuid::Uuid::new_v4()));
        let db_path = root.join("nested").join("users.db");

        let store = Store::new(&format!("sqlite:{}", db_path.display()))
            .await
            .unwrap();
        let user = store.insert(temp_user("sam")).await.unwrap();
        assert_eq!(store.find_by_id(&user.id).await.unwrap(), Some(user));
        store.close().await.unwrap();

        assert!(db_path.exists());
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn unusable_database_directory_is_reported() {
        let blocker = std::env::temp_dir().join(format!("user-accounts-{}", uuid::Uuid::new_v4()));
        std::fs::write(&blocker, b"not a directory").unwrap();
        let url = format!("sqlite:{}", blocker.join("sub").join("users.db").display());

        let result = Store::new(&url).await;
        std::fs::remove_file(&blocker).unwrap();

        let err = result.err().unwrap();
        assert!(
            format!("{err:#}").contains("Failed to create database directory"),
            "{err:#}"
        );
    }

    #[tokio::test]
    async fn connect_gives_up_after_max_attempts() {
        let config = DatabaseConfig {
            url: "postgres://127.0.0.1:1/unreachable".to_string(),
            connect_max_attempts: 2,
            connect_retry_delay_ms: 1,
            ..DatabaseConfig::default()
        };

        let err = Store::connect(&config).await.err().unwrap();
        assert!(format!("{err:#}").contains("after 2 attempts"));
    }
}
