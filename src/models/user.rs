use chrono::{DateTime, Utc};

use crate::domain::{AccountKind, UserId};

/// A stored user record, including the password hash.
///
/// Only the service layer sees this type; responses use projections that
/// drop `password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub logged_in: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub const fn kind(&self) -> AccountKind {
        AccountKind::from_logged_in(self.logged_in)
    }
}

/// Input for [`AccountStore::insert`](crate::db::AccountStore::insert).
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub logged_in: bool,
}

impl NewUser {
    #[must_use]
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            logged_in: self.logged_in,
            created_at,
        }
    }
}
