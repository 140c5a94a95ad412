//! Session gateway against the hosted auth service.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{Config, BEARER_TOKEN_PREFIX, STORE_API_KEY_HEADER};
use crate::errors::{AppError, AppResult};

/// Credentials for the login form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct Credentials {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PasswordChange {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

/// The account a session token resolves to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
}

/// An authenticated session as issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: SessionUser,
}

/// Auth operations the dashboard needs.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Resolve a bearer token to its account, rejecting stale tokens.
    async fn session(&self, access_token: &str) -> AppResult<SessionUser>;

    async fn update_password(&self, access_token: &str, new_password: &str) -> AppResult<()>;
}

/// HTTP implementation of [`AuthProvider`].
pub struct AuthGateway {
    http: Client,
    endpoint: String,
}

impl AuthGateway {
    pub fn new(config: &Config) -> Self {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(config.store_api_key())
            .expect("store API key contains invalid header characters");
        headers.insert(STORE_API_KEY_HEADER, key);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: config.auth_endpoint(),
        }
    }

    fn bearer(token: &str) -> String {
        format!("{BEARER_TOKEN_PREFIX}{token}")
    }
}

#[async_trait]
impl AuthProvider for AuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let response = self
            .http
            .post(format!("{}/token", self.endpoint))
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::internal(e.to_string()))?;

        match response.status() {
            s if s.is_success() => response
                .json()
                .await
                .map_err(|e| AppError::internal(e.to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized),
            s => Err(AppError::internal(format!("auth service returned {s}"))),
        }
    }

    async fn session(&self, access_token: &str) -> AppResult<SessionUser> {
        let response = self
            .http
            .get(format!("{}/user", self.endpoint))
            .header(AUTHORIZATION, Self::bearer(access_token))
            .send()
            .await
            .map_err(|e| AppError::internal(e.to_string()))?;

        match response.status() {
            s if s.is_success() => response
                .json()
                .await
                .map_err(|e| AppError::internal(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized),
            s => Err(AppError::internal(format!("auth service returned {s}"))),
        }
    }

    async fn update_password(&self, access_token: &str, new_password: &str) -> AppResult<()> {
        let response = self
            .http
            .put(format!("{}/user", self.endpoint))
            .header(AUTHORIZATION, Self::bearer(access_token))
            .json(&serde_json::json!({ "password": new_password }))
            .send()
            .await
            .map_err(|e| AppError::internal(e.to_string()))?;

        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized),
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "password rejected".into());
                Err(AppError::validation(message))
            }
            s => Err(AppError::internal(format!("auth service returned {s}"))),
        }
    }
}
