use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
}

/// Errors raised while selecting or querying the endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown environment '{0}', expected one of: development, testing, production")]
    UnknownEnvironment(String),

    #[error("unknown API domain '{0}'")]
    UnknownDomain(String),

    #[error("unknown operation '{operation}' for API domain '{domain}'")]
    UnknownOperation { domain: String, operation: String },

    #[error("path template '{0}' requires an identifier")]
    MissingIdentifier(&'static str),

    #[error("path template '{0}' does not take an identifier")]
    UnexpectedIdentifier(&'static str),

    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("identifier '{0}' is not a valid path segment")]
    InvalidIdentifier(String),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("no gateway route matches path '{0}'")]
    NoRoute(String),

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Custom error type for API endpoints
///
/// Wraps a [`ConfigError`] and picks the HTTP status from its kind, so lookups
/// of things that do not exist answer 404 and malformed input answers 400.
#[derive(Debug)]
pub enum ApiError {
    /// Domain, operation or gateway route not present in the catalog
    NotFound(ConfigError),
    /// Identifier missing, empty or not accepted by the template
    BadRequest(ConfigError),
    /// Invalid query parameter
    InvalidQueryParam(String),
    /// Configuration that should always be valid failed to build
    Internal(ConfigError),
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownDomain(_)
            | ConfigError::UnknownOperation { .. }
            | ConfigError::NoRoute(_) => ApiError::NotFound(err),
            ConfigError::MissingIdentifier(_)
            | ConfigError::UnexpectedIdentifier(_)
            | ConfigError::EmptyIdentifier
            | ConfigError::InvalidIdentifier(_) => ApiError::BadRequest(err),
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            ApiError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::InvalidQueryParam(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid query parameter: {}", msg),
            ),
            ApiError::Internal(err) => {
                tracing::error!("Configuration error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}
