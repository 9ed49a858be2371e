//! Domain types for user accounts with strong typing.
//!
//! Identifiers are opaque strings assigned by the store. The newtype keeps them
//! from being mixed up with usernames, which are also plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a user record.
///
/// # Examples
///
/// ```rust
/// use user_accounts::domain::UserId;
///
/// let id = UserId::new("7f6d0c1e");
/// assert_eq!(id.as_str(), "7f6d0c1e");
/// assert_eq!(id.to_string(), "7f6d0c1e");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier. Random v4 UUIDs are never reused.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Account tier, derived from the stored `logged_in` flag.
///
/// Replaces boolean blindness at the call sites that decide deletion eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Credentialed account. Never deletable through the temp-deletion path.
    Permanent,
    /// Ephemeral account with a sentinel credential.
    Temporary,
}

impl AccountKind {
    #[must_use]
    pub const fn from_logged_in(logged_in: bool) -> Self {
        if logged_in {
            Self::Permanent
        } else {
            Self::Temporary
        }
    }

    #[must_use]
    pub const fn logged_in(self) -> bool {
        matches!(self, Self::Permanent)
    }

    #[must_use]
    pub const fn is_deletable(self) -> bool {
        matches!(self, Self::Temporary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = UserId::generate();
        let b = UserId::generate();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn user_id_serializes_as_plain_string() {
        let id = UserId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn only_temporary_accounts_are_deletable() {
        assert!(AccountKind::from_logged_in(false).is_deletable());
        assert!(!AccountKind::from_logged_in(true).is_deletable());
        assert!(AccountKind::Permanent.logged_in());
    }
}
