//! Request body extraction.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use super::ApiError;

/// Request body accepted as JSON or as an urlencoded form.
///
/// Any other or missing content type yields `T::default()`, so absent fields
/// fail handler validation with a 400 instead of a 415. Malformed bodies are
/// rejected as a validation error with a `{"message"}` body.
///
/// ```rust,ignore
/// async fn handler(Body(payload): Body<CredentialsRequest>) { /* ... */ }
/// ```
pub struct Body<T>(pub T);

enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

impl<S, T> FromRequest<S> for Body<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::validation(e.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::validation(e.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Other => Ok(Self(T::default())),
        }
    }
}
