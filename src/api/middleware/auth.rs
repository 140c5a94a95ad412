//! Session authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated account extracted from the session token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
    /// The bearer token the request arrived with, for auth-service calls
    /// made on the caller's behalf
    pub access_token: String,
}

/// Session authentication middleware.
///
/// Resolves the bearer token against the auth service on every request,
/// so revoked or expired sessions are rejected immediately, then injects
/// the CurrentUser into the request extensions.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let account = state.auth.session(token).await?;

    let current_user = CurrentUser {
        id: account.id,
        email: account.email,
        access_token: token.to_string(),
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
