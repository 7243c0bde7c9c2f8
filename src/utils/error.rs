//! Error handling for the gateway
//!
//! This module defines the crate-wide error type used by configuration
//! loading, the HTTP server, and the upstream forwarder. Pipeline-level
//! rejections have their own structured types (`MappingRejection`,
//! `DispatchError`) because their variants are shown to the operator.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream gateway errors
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an internal server error
    pub fn server(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = match self {
            GatewayError::Validation(_) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            GatewayError::Upstream(_) => {
                (actix_web::http::StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            GatewayError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": self.to_string(),
            },
        }))
    }
}
