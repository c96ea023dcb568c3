//! Error types for WikiQuiz services
//!
//! Provides a comprehensive error handling system with:
//! - Distinct error types for each failure mode of the generate pipeline
//! - HTTP status code mapping
//! - Structured `{detail, code}` error responses
//! - Error codes for client handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    RequestTimeout,

    // Resource errors (4xxx)
    QuizNotFound,

    // Conflict errors (5xxx)
    DuplicateQuiz,

    // Database errors (7xxx)
    DatabaseError,
    ConnectionError,

    // External service errors (8xxx)
    FetchError,
    UpstreamStatus,
    ExtractionError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::RequestTimeout => 1002,

            ErrorCode::QuizNotFound => 4001,

            ErrorCode::DuplicateQuiz => 5001,

            ErrorCode::DatabaseError => 7001,
            ErrorCode::ConnectionError => 7002,

            ErrorCode::FetchError => 8001,
            ErrorCode::UpstreamStatus => 8002,
            ErrorCode::ExtractionError => 8003,

            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }

    /// Wire name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::RequestTimeout => "REQUEST_TIMEOUT",
            ErrorCode::QuizNotFound => "QUIZ_NOT_FOUND",
            ErrorCode::DuplicateQuiz => "DUPLICATE_QUIZ",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConnectionError => "CONNECTION_ERROR",
            ErrorCode::FetchError => "FETCH_ERROR",
            ErrorCode::UpstreamStatus => "UPSTREAM_STATUS",
            ErrorCode::ExtractionError => "EXTRACTION_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::SerializationError => "SERIALIZATION_ERROR",
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>
    },

    #[error("Request timed out after {timeout_secs}s")]
    RequestTimeout { timeout_secs: u64 },

    // Resource errors
    #[error("Quiz not found")]
    QuizNotFound { id: i32 },

    // Conflict errors
    #[error("A quiz already exists for {url}")]
    DuplicateQuiz { url: String },

    // Scraping errors
    #[error("Error scraping Wikipedia: {message}")]
    Fetch { url: String, message: String },

    #[error("Error scraping Wikipedia: HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Error scraping Wikipedia: {message}")]
    Extraction { message: String },

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database connection error: {message}")]
    DatabaseConnection { message: String },

    // Internal errors
    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::RequestTimeout { .. } => ErrorCode::RequestTimeout,
            AppError::QuizNotFound { .. } => ErrorCode::QuizNotFound,
            AppError::DuplicateQuiz { .. } => ErrorCode::DuplicateQuiz,
            AppError::Fetch { .. } => ErrorCode::FetchError,
            AppError::UpstreamStatus { .. } => ErrorCode::UpstreamStatus,
            AppError::Extraction { .. } => ErrorCode::ExtractionError,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::DatabaseConnection { .. } => ErrorCode::ConnectionError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 408 Request Timeout
            AppError::RequestTimeout { .. } => StatusCode::REQUEST_TIMEOUT,

            // 404 Not Found
            AppError::QuizNotFound { .. } => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::DuplicateQuiz { .. } => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            AppError::Validation { .. } |
            AppError::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            AppError::Database(_) |
            AppError::DatabaseConnection { .. } |
            AppError::Internal { .. } |
            AppError::Configuration { .. } |
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 502 Bad Gateway
            AppError::Fetch { .. } |
            AppError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: ErrorCode,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let detail = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %detail,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %detail,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        (status, Json(ErrorResponse { detail, code })).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors.field_errors().keys().next().map(|f| f.to_string());
        AppError::Validation {
            message: errors.to_string(),
            field,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detail_is_exact() {
        let err = AppError::QuizNotFound { id: 42 };
        assert_eq!(err.to_string(), "Quiz not found");
        assert_eq!(err.code(), ErrorCode::QuizNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let err = AppError::DuplicateQuiz { url: "https://en.wikipedia.org/wiki/Rust".into() };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_scrape_errors_are_bad_gateway() {
        let err = AppError::UpstreamStatus { status: 404, url: "https://example.org".into() };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().starts_with("Error scraping Wikipedia"));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::Validation {
            message: "url is required".into(),
            field: Some("url".into()),
        };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::DuplicateQuiz).unwrap();
        assert_eq!(json, "\"DUPLICATE_QUIZ\"");
        assert_eq!(ErrorCode::QuizNotFound.as_code(), 4001);
    }

    #[test]
    fn test_as_str_matches_serialized_name() {
        let codes = [
            ErrorCode::ValidationError,
            ErrorCode::RequestTimeout,
            ErrorCode::QuizNotFound,
            ErrorCode::DuplicateQuiz,
            ErrorCode::DatabaseError,
            ErrorCode::ConnectionError,
            ErrorCode::FetchError,
            ErrorCode::UpstreamStatus,
            ErrorCode::ExtractionError,
            ErrorCode::InternalError,
            ErrorCode::ConfigurationError,
            ErrorCode::SerializationError,
        ];
        for code in codes {
            let serialized = serde_json::to_value(code).unwrap();
            assert_eq!(serialized, code.as_str());
        }
    }

    #[test]
    fn test_timeout_is_client_error() {
        let err = AppError::RequestTimeout { timeout_secs: 1 };
        assert_eq!(err.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.code().as_str(), "REQUEST_TIMEOUT");
    }
}
