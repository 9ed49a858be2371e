//! Store-backed implementation of the `AccountService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::{SecurityConfig, generate_secret};
use crate::constants::TEMP_PASSWORD_SENTINEL;
use crate::db::AccountStore;
use crate::domain::UserId;
use crate::models::{NewUser, User};
use crate::services::account_service::{AccountError, AccountService, SignInResult, UserProfile};
use crate::services::password::{self, HashParams};
use crate::services::token::TokenIssuer;

pub struct DefaultAccountService {
    store: Arc<dyn AccountStore>,
    tokens: TokenIssuer,
    hash_params: HashParams,
    /// Hash of a random throwaway password, verified against when sign-in has
    /// no usable stored hash.
    dummy_hash: String,
}

impl DefaultAccountService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        tokens: TokenIssuer,
        hash_params: HashParams,
    ) -> Result<Self, AccountError> {
        let dummy_hash = password::hash_password(&generate_secret(), hash_params)?;

        Ok(Self {
            store,
            tokens,
            hash_params,
            dummy_hash,
        })
    }

    pub fn from_config(
        store: Arc<dyn AccountStore>,
        config: &SecurityConfig,
    ) -> Result<Self, AccountError> {
        Self::new(
            store,
            TokenIssuer::from_config(config),
            HashParams::from(config),
        )
    }

    /// Unknown users and temp users verify against the dummy hash, so every
    /// failed sign-in costs one Argon2 run. The flag is `false` in that case.
    fn hash_to_verify<'a>(&'a self, user: Option<&'a User>) -> (&'a str, bool) {
        match user {
            Some(user) if password::is_phc_hash(&user.password_hash) => {
                (user.password_hash.as_str(), true)
            }
            _ => (self.dummy_hash.as_str(), false),
        }
    }
}

fn require(value: &str, message: &str) -> Result<(), AccountError> {
    if value.trim().is_empty() {
        return Err(AccountError::Validation(message.to_string()));
    }
    Ok(())
}

#[async_trait]
impl AccountService for DefaultAccountService {
    async fn ensure_username_available(&self, username: &str) -> Result<(), AccountError> {
        if self.store.find_by_username(username).await?.is_some() {
            return Err(AccountError::DuplicateUsername(username.to_string()));
        }
        Ok(())
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<User, AccountError> {
        require(username, "Username invalid")?;
        require(password, "Password invalid")?;

        let password_hash = password::hash_password_blocking(password, self.hash_params).await?;

        let user = self
            .store
            .insert(NewUser {
                username: username.to_string(),
                password_hash,
                logged_in: true,
            })
            .await?;

        info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    async fn create_temp_user(&self, username: &str) -> Result<User, AccountError> {
        require(username, "Username invalid")?;

        let user = self
            .store
            .insert(NewUser {
                username: username.to_string(),
                password_hash: TEMP_PASSWORD_SENTINEL.to_string(),
                logged_in: false,
            })
            .await?;

        info!(user_id = %user.id, "Created temporary user");
        Ok(user)
    }

    async fn delete_temp_user(&self, id: &UserId) -> Result<User, AccountError> {
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.clone()))?;

        if !user.kind().is_deletable() {
            warn!(user_id = %id, "Refused to delete permanent user");
            return Err(AccountError::InvalidState(id.clone()));
        }

        // A concurrent delete between the read and this call surfaces as NotFound.
        let deleted = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.clone()))?;

        info!(user_id = %id, "Deleted temporary user");
        Ok(deleted)
    }

    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInResult, AccountError> {
        let user = self.store.find_by_username(username).await?;

        let (hash, usable) = self.hash_to_verify(user.as_ref());
        let verified = password::verify_password_blocking(password, hash).await?;

        let Some(user) = user.filter(|_| usable && verified) else {
            debug!("Sign-in rejected");
            return Err(AccountError::InvalidCredentials);
        };

        let access_token = self.tokens.issue(&user.id)?;

        info!(user_id = %user.id, "User signed in");
        Ok(SignInResult {
            id: user.id,
            username: user.username,
            access_token,
        })
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<UserProfile, AccountError> {
        self.store
            .find_by_id(id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AccountError::NotFound(id.clone()))
    }
}
