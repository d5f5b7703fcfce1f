/// Error types for the artifact service
///
/// Errors are converted to appropriate HTTP responses for API clients.
/// Malformed identifiers are a distinct kind from "not found": a request for
/// a syntactically invalid id is a 400, a well-formed id with no matching row
/// is a 404.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use error_types::{error_codes, ErrorResponse};
use std::fmt;

/// Result type for artifact-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Database operation failed
    DatabaseError(String),

    /// Resource not found
    NotFound(String),

    /// Identifier could not be parsed into the store's native id type
    InvalidIdentifier(String),

    /// Required configuration (API key) is absent
    MissingConfiguration(String),

    /// External API call failed
    ExternalApi(String),

    /// Internal server error
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidIdentifier(msg) => write!(f, "Invalid identifier: {}", msg),
            AppError::MissingConfiguration(msg) => write!(f, "Missing configuration: {}", msg),
            AppError::ExternalApi(msg) => write!(f, "External API error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MissingConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (error_type, code) = match self {
            AppError::DatabaseError(_) => ("server_error", error_codes::DATABASE_ERROR),
            AppError::NotFound(_) => ("not_found_error", error_codes::RESOURCE_NOT_FOUND),
            AppError::InvalidIdentifier(_) => ("validation_error", error_codes::INVALID_IDENTIFIER),
            AppError::MissingConfiguration(_) => {
                ("server_error", error_codes::MISSING_CONFIGURATION)
            }
            AppError::ExternalApi(_) => ("upstream_error", error_codes::EXTERNAL_API_ERROR),
            AppError::Internal(_) => ("server_error", error_codes::INTERNAL_SERVER_ERROR),
        };

        let message = self.to_string();
        let response = ErrorResponse::new(
            match status {
                StatusCode::BAD_REQUEST => "Bad Request",
                StatusCode::NOT_FOUND => "Not Found",
                StatusCode::BAD_GATEWAY => "Bad Gateway",
                StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
                _ => "Error",
            },
            &message,
            status.as_u16(),
            error_type,
            code,
        );

        HttpResponse::build(status).json(response)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MissingConfiguration("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ExternalApi("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn invalid_identifier_is_distinct_from_not_found() {
        let invalid = AppError::InvalidIdentifier("abc".into());
        let missing = AppError::NotFound("abc".into());
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_ne!(invalid.status_code(), missing.status_code());
    }

    #[test]
    fn display_includes_detail() {
        let err = AppError::ExternalApi("timed out".into());
        assert_eq!(err.to_string(), "External API error: timed out");
    }
}
