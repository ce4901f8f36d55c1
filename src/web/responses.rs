//! HTTP response types and utilities
//!
//! Every JSON endpoint answers with an [`ApiResponse`] envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AuthError};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful
    pub success: bool,
    /// Response data; admin actions include it on failure too
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Response timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// A failed operation that still reports state back to the caller
    pub fn failure(message: String, data: T) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Success response helpers
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

pub fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(message.to_string())),
    )
        .into_response()
}

/// Convert AppError to an HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = match &error {
        AppError::Auth(AuthError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, "Invalid email or password".to_string())
        }
        AppError::Auth(AuthError::InvalidSession { .. } | AuthError::NotSignedIn) => {
            (StatusCode::UNAUTHORIZED, "Session expired or invalid".to_string())
        }
        AppError::Auth(_) => (
            StatusCode::BAD_GATEWAY,
            "Auth service communication failed".to_string(),
        ),
        AppError::Backend(_) => (
            StatusCode::BAD_GATEWAY,
            "Backend communication failed".to_string(),
        ),
        AppError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        AppError::PermissionDenied { action, resource } => (
            StatusCode::FORBIDDEN,
            format!("Permission denied: {} on {}", action, resource),
        ),
        AppError::Configuration { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Configuration error: {}", message),
        ),
        AppError::Internal { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", message),
        ),
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
