// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::{page::NavigationError, quiz::QuizError};

/// Global Application Error Enum.
/// Every error ends the current action only; the session itself is left intact.
#[derive(Debug)]
pub enum AppError {
    // 503 Service Unavailable: a required configuration document is absent
    ConfigMissing(String),

    // 500: a database or hashing/signing call failed
    ExternalService(String),

    // 400: rejected before any external call
    Validation(String),

    // 401 Unauthorized
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., answering twice, invalid navigation)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON response with the matching HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ConfigMissing(msg) => {
                tracing::error!("Configuration missing: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
            AppError::ExternalService(msg) => {
                tracing::error!("External service error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The database request failed, please try again".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::ExternalService(err.to_string())
    }
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::NoQuestions => AppError::NotFound(err.to_string()),
            QuizError::NoOptionSelected | QuizError::UnknownOption(_) => {
                AppError::Validation(err.to_string())
            }
            QuizError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
        }
    }
}

impl From<NavigationError> for AppError {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::LoginRequired => AppError::AuthError(err.to_string()),
            NavigationError::Invalid { .. } | NavigationError::QuizInProgress => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}
