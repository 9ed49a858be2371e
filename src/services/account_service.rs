//! Domain service for user accounts.
//!
//! Handles permanent sign-up, temporary accounts, credential checks and token
//! issuance, and profile lookups. Deletion is only possible for temporary
//! accounts; permanent accounts have no outbound transition.

use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::domain::UserId;
use crate::models::User;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),

    #[error("Could not create user: Username already in use!")]
    DuplicateUsername(String),

    #[error("User not found")]
    NotFound(UserId),

    #[error("Non-temp user could not be deleted")]
    InvalidState(UserId),

    #[error("Invalid username/password combination")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<super::token::TokenError> for AccountError {
    fn from(err: super::token::TokenError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Public projection of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub logged_in: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            logged_in: user.logged_in,
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            logged_in: user.logged_in,
        }
    }
}

/// Successful sign-in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResult {
    pub id: UserId,
    pub username: String,
    pub access_token: String,
}

/// Domain service trait for user accounts.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Duplicate-username pre-check run by the HTTP layer before either create.
    ///
    /// Not atomic with the insert that follows: two concurrent sign-ups for the
    /// same name can both pass.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DuplicateUsername`] if the name is taken.
    async fn ensure_username_available(&self, username: &str) -> Result<(), AccountError>;

    /// Creates a permanent (`logged_in = true`) user with a hashed password.
    async fn create_user(&self, username: &str, password: &str) -> Result<User, AccountError>;

    /// Creates a temporary (`logged_in = false`) user with the sentinel hash.
    async fn create_temp_user(&self, username: &str) -> Result<User, AccountError>;

    /// Deletes a temporary user and returns the removed record.
    ///
    /// # Errors
    ///
    /// - [`AccountError::NotFound`] if no user has this id
    /// - [`AccountError::InvalidState`] if the user is permanent; the record is left intact
    async fn delete_temp_user(&self, id: &UserId) -> Result<User, AccountError>;

    /// Verifies credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] for an unknown username or a
    /// wrong password, without distinguishing the two.
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResult, AccountError>;

    async fn get_user_by_id(&self, id: &UserId) -> Result<UserProfile, AccountError>;
}
