//! Error types for cache drivers
//!
//! Provides unified error handling using thiserror. Absence of a key is
//! never an error at the driver level.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache drivers and the HTTP gateway.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store rejected the call (network, protocol, auth)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Value could not be encoded before storing
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key is empty
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Key not found, only raised by the gateway
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid gateway request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Backend(_) => StatusCode::BAD_GATEWAY,
            CacheError::Serialization(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
