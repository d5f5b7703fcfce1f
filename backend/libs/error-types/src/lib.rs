//! Shared error wire types for the artifact backend services
//!
//! Services define their own `AppError` enums; this crate provides the JSON
//! body every error response carries, plus the stable machine-readable codes
//! clients switch on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false; clients switch on this field and success responses
    /// never use this envelope
    pub success: bool,
    /// Short human-readable error name ("Not Found", "Bad Request", ...)
    pub error: String,
    /// Detailed message for this occurrence
    pub message: String,
    /// HTTP status code, duplicated in the body for clients that drop headers
    pub status: u16,
    /// Coarse category ("validation_error", "server_error", ...)
    pub error_type: String,
    /// Stable machine-readable code from [`error_codes`]
    pub code: String,
    /// When the error was produced
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, status: u16, error_type: &str, code: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            message: message.to_string(),
            status,
            error_type: error_type.to_string(),
            code: code.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Stable error codes shared across services.
pub mod error_codes {
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const INVALID_IDENTIFIER: &str = "INVALID_IDENTIFIER";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const EXTERNAL_API_ERROR: &str = "EXTERNAL_API_ERROR";
    pub const MISSING_CONFIGURATION: &str = "MISSING_CONFIGURATION";
}
