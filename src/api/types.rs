use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// `{ "message": ... }` body used for confirmations and every error.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Request fields are optional so a missing field becomes a 400 with a
// specific message instead of a generic deserialization rejection.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTempUserRequest {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub id: UserId,
    pub username: String,
}
