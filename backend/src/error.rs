//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use crate::services::agent::AgentError;
use crate::store::{ProfileUpdateError, StoreError};
use adafit_shared::{ErrorDetail, ErrorResponse, InvalidContextError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

/// Message returned for every route that needs a session
pub const LOGIN_REQUIRED: &str = "Please log in to access this feature.";

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error")]
    Store(#[from] StoreError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn login_required() -> Self {
        ApiError::Unauthorized(LOGIN_REQUIRED.to_string())
    }
}

impl From<InvalidContextError> for ApiError {
    fn from(err: InvalidContextError) -> Self {
        ApiError::Validation {
            message: err.to_string(),
            field: Some(err.field),
        }
    }
}

impl From<ProfileUpdateError> for ApiError {
    fn from(err: ProfileUpdateError) -> Self {
        match err {
            ProfileUpdateError::Patch(e) => ApiError::BadRequest(e.to_string()),
            ProfileUpdateError::Invalid(v) => ApiError::Validation {
                message: v.user_message(),
                field: Some(v.field),
            },
            ProfileUpdateError::Store(e) => ApiError::Store(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match self {
            ApiError::Validation { message, field } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, field)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::Store(err) => {
                error!("Storage error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Failed to persist changes".to_string(),
                    None,
                )
            }
            ApiError::Agent(err) => {
                error!("Agent error: {}", err);
                (StatusCode::BAD_GATEWAY, "AGENT_ERROR", err.to_string(), None)
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
