//! Authentication and account handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{post, put},
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UpdateProfile;
use crate::errors::AppResult;
use crate::infra::{Credentials, PasswordChange, Session};
use crate::types::MessageResponse;

/// Create public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Create account routes; these require a session
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/password", put(change_password))
        .route("/profile", put(update_profile))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = Credentials,
    responses(
        (status = 200, description = "Session issued", body = Session),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<Credentials>,
) -> AppResult<Json<Session>> {
    let session = state.auth.sign_in(&payload.email, &payload.password).await?;
    Ok(Json(session))
}

/// Change the signed-in account's password
#[utoipa::path(
    put,
    path = "/account/password",
    tag = "Account",
    request_body = PasswordChange,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Session expired")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<PasswordChange>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth
        .update_password(&user.access_token, &payload.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

/// Update the signed-in account's profile
#[utoipa::path(
    put,
    path = "/account/profile",
    tag = "Account",
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 502, description = "The write failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfile>,
) -> AppResult<Json<MessageResponse>> {
    state.customers.update_profile(&user.id, payload).await?;
    Ok(Json(MessageResponse::new("Profile updated")))
}
