use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::extract::Body;
use super::observability::record_user;
use super::validation::{require_field, require_password, validate_user_id};
use super::{
    ApiError, AppState, CreateTempUserRequest, CreatedUserResponse, CredentialsRequest,
    MessageResponse,
};
use crate::constants::messages;
use crate::services::{SignInResult, UserProfile};

// ============================================================================
// Handlers
// ============================================================================

/// POST /users/signup
/// Register a permanent user
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Body(payload): Body<CredentialsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let username = require_field(payload.username.as_deref(), "Username invalid")?;
    let password = require_password(payload.password.as_deref(), "Password invalid")?;

    state.accounts().ensure_username_available(username).await?;
    let user = state.accounts().create_user(username, password).await?;
    record_user(&user.id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(messages::USER_REGISTERED)),
    ))
}

/// POST /users/createtemp
/// Create a temporary user with no usable password
pub async fn create_temp_user(
    State(state): State<Arc<AppState>>,
    Body(payload): Body<CreateTempUserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ApiError> {
    let username = require_field(payload.username.as_deref(), "Username invalid")?;

    state.accounts().ensure_username_available(username).await?;
    let user = state.accounts().create_temp_user(username).await?;
    record_user(&user.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}

/// DELETE /users/deletetemp/{id}
/// Delete a temporary user, returning the removed record
pub async fn delete_temp_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let id = validate_user_id(&id)?;
    record_user(&id);

    let deleted = state.accounts().delete_temp_user(&id).await?;

    Ok((StatusCode::ACCEPTED, Json(UserProfile::from(deleted))))
}

/// POST /users/signin
/// Verify credentials and return an access token
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Body(payload): Body<CredentialsRequest>,
) -> Result<Json<SignInResult>, ApiError> {
    let (Ok(username), Ok(password)) = (
        require_field(payload.username.as_deref(), messages::INVALID_CREDENTIALS),
        require_password(payload.password.as_deref(), messages::INVALID_CREDENTIALS),
    ) else {
        return Err(ApiError::validation(messages::INVALID_CREDENTIALS));
    };

    let result = state.accounts().sign_in(username, password).await?;
    record_user(&result.id);

    Ok(Json(result))
}

/// GET /users/getuser/{id}
/// Public profile of a user
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let id = validate_user_id(&id)?;
    record_user(&id);

    let profile = state.accounts().get_user_by_id(&id).await?;

    Ok((StatusCode::ACCEPTED, Json(profile)))
}

/// Fallback for the id-taking routes when the id segment is absent.
pub async fn missing_id() -> ApiError {
    ApiError::validation("Invalid ID")
}
