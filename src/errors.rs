//! Centralized error handling.
//!
//! One error type for the whole application, mapped onto HTTP responses.
//! The taxonomy mirrors how failures surface in the dashboard: a failed
//! collection read, a failed mutation, a rejected input, or a failed call
//! to the hosted chat service. None of them are fatal to the running
//! service; every variant renders as a structured error body and the
//! page stays interactive.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Session / access
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Remote store errors
    #[error("Failed to read {collection}: {message}")]
    Fetch { collection: String, message: String },

    #[error("Failed to write {collection}: {message}")]
    Write { collection: String, message: String },

    // Hosted chat service errors
    #[error("AI service error: {0}")]
    AiService(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for the client
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Fetch { .. } => "FETCH_ERROR",
            AppError::Write { .. } => "WRITE_ERROR",
            AppError::AiService(_) => "AI_SERVICE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Fetch { .. } | AppError::Write { .. } | AppError::AiService(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message.
    ///
    /// Remote-store and chat failures keep their message: the dashboard
    /// shows it as a transient notification. Internal details are logged
    /// and replaced with a generic message.
    fn user_message(&self) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn fetch(collection: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Fetch {
            collection: collection.into(),
            message: message.into(),
        }
    }

    pub fn write(collection: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Write {
            collection: collection.into(),
            message: message.into(),
        }
    }

    pub fn ai(msg: impl Into<String>) -> Self {
        AppError::AiService(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}
