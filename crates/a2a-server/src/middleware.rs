use axum::{
    body::Body,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Bearer token taken from the inbound `Authorization` header.
///
/// Stored in request extensions by [`auth_middleware`] and forwarded to the
/// policy engine unmodified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rejection for requests without a usable bearer token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid authorization header")]
    InvalidHeader,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// A missing header, a non-ASCII value, a different scheme and an empty
/// token are all rejected.
pub fn extract_bearer(headers: &HeaderMap) -> Result<BearerToken, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::InvalidHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(BearerToken(token.to_string())),
        _ => Err(AuthError::InvalidHeader),
    }
}

/// Middleware requiring `Authorization: Bearer <token>`.
///
/// # Security Note
///
/// The token is NOT verified against the identity provider. It is only
/// checked for shape and then passed through to the policy engine, which
/// is expected to make the authorization decision. Any non-empty token
/// reaches the engine.
pub async fn auth_middleware(mut req: Request<Body>, next: Next) -> Result<Response, AuthError> {
    let token = extract_bearer(req.headers()).inspect_err(|_| {
        tracing::warn!(
            path = %req.uri().path(),
            "rejected request with invalid authorization header"
        );
    })?;

    req.extensions_mut().insert(token);

    Ok(next.run(req).await)
}
