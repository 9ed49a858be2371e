use super::ApiError;
use crate::domain::UserId;

/// Trims a required body field, rejecting a missing or blank value with `message`.
pub fn require_field<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, ApiError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::validation(message)),
    }
}

/// Like [`require_field`] but returns the value untrimmed; passwords are
/// compared byte for byte.
pub fn require_password<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::validation(message)),
    }
}

pub fn validate_user_id(id: &str) -> Result<UserId, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Invalid ID"));
    }
    Ok(UserId::new(trimmed))
}
