//! Error codes carried in every error body.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::Conflict;
//! assert_eq!(code.as_str(), "CONFLICT");
//! assert_eq!(code.code(), 1008);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Client errors live in 1000-1999, storage errors in 2000-2999, I/O in 4000-4999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidUuid,
    NotFound,
    Conflict,
    JsonExtraction,
    InvalidQuery,
    InvalidMultipart,
    UnsupportedMediaType,
    MethodNotAllowed,
    InternalError,
    ServiceUnavailable,

    /// Storage failure that was neither a lookup miss nor a uniqueness conflict
    DatabaseError,
    /// Seeding left rows behind after the wipe
    SeedInvariant,

    IoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::InvalidMultipart => "INVALID_MULTIPART",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::SeedInvariant => "SEED_INVARIANT",
            Self::IoError => "IO_ERROR",
        }
    }

    /// Integer code for structured logs and dashboards
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::ServiceUnavailable => 1011,
            Self::InvalidQuery => 1012,
            Self::InvalidMultipart => 1013,
            Self::UnsupportedMediaType => 1014,
            Self::MethodNotAllowed => 1015,

            Self::DatabaseError => 2003,
            Self::SeedInvariant => 2101,

            Self::IoError => 4001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::JsonExtraction => "Failed to parse request body",
            Self::InvalidQuery => "Invalid query string",
            Self::InvalidMultipart => "Invalid multipart body",
            Self::UnsupportedMediaType => "Unsupported media type",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Database error occurred",
            Self::SeedInvariant => "Seeding could not empty the catalog",
            Self::IoError => "I/O error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::Conflict.as_str(), "CONFLICT");
        assert_eq!(ErrorCode::DatabaseError.as_str(), "DATABASE_ERROR");
    }

    #[test]
    fn test_error_code_integer_codes() {
        assert_eq!(ErrorCode::NotFound.code(), 1004);
        assert_eq!(ErrorCode::DatabaseError.code(), 2003);
        assert_eq!(ErrorCode::IoError.code(), 4001);
    }

    #[test]
    fn test_error_code_serde_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::UnsupportedMediaType).unwrap();
        assert_eq!(json, "\"UNSUPPORTED_MEDIA_TYPE\"");

        let code: ErrorCode = serde_json::from_str("\"SEED_INVARIANT\"").unwrap();
        assert_eq!(code, ErrorCode::SeedInvariant);
    }
}
