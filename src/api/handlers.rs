//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto one driver call.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::driver::CacheDriver;
use crate::error::{CacheError, Result};
use crate::models::{
    CounterResponse, GetResponse, HasResponse, HealthResponse, KeyResponse, MessageResponse,
    SetRequest, SizeResponse,
};

/// Application state shared across all handlers.
///
/// Holds the driver behind a trait object so any backend can be served.
#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<dyn CacheDriver>,
}

impl AppState {
    /// Creates a new AppState serving the given driver.
    pub fn new(driver: impl CacheDriver + 'static) -> Self {
        Self {
            driver: Arc::new(driver),
        }
    }

    /// Creates a new AppState from an already shared driver.
    pub fn from_shared(driver: Arc<dyn CacheDriver>) -> Self {
        Self { driver }
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<KeyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.driver.set(&req.key, &req.value, req.lifetime()).await?;

    Ok(Json(KeyResponse::set(req.key)))
}

/// Handler for GET /get/:key
///
/// Absence is a normal driver result; the gateway renders it as 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.driver.get(&key).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KeyResponse>> {
    state.driver.del(&key).await?;

    Ok(Json(KeyResponse::deleted(key)))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    let exists = state.driver.has(&key).await?;

    Ok(Json(HasResponse { key, exists }))
}

/// Handler for POST /inc/:key
pub async fn inc_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CounterResponse>> {
    let value = state.driver.inc(&key).await?;

    Ok(Json(CounterResponse { key, value }))
}

/// Handler for POST /dec/:key
pub async fn dec_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CounterResponse>> {
    let value = state.driver.dec(&key).await?;

    Ok(Json(CounterResponse { key, value }))
}

/// Handler for GET /size
pub async fn size_handler(State(state): State<AppState>) -> Result<Json<SizeResponse>> {
    let size = state.driver.size().await?;

    Ok(Json(SizeResponse {
        size,
        driver: state.driver.driver_type(),
    }))
}

/// Handler for POST /flush
pub async fn flush_handler(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    state.driver.flush().await?;

    Ok(Json(MessageResponse::new("Cache flushed")))
}

/// Handler for POST /prune
pub async fn prune_handler(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    state.driver.prune().await?;

    Ok(Json(MessageResponse::new("Expired entries pruned")))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.driver.driver_type()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MemoryDriver;
    use serde_json::json;

    fn state() -> AppState {
        AppState::new(MemoryDriver::default())
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = state();

        let req = SetRequest {
            key: "test_key".to_string(),
            value: json!({"x": 1}),
            lifetime_ms: None,
        };
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(state()), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler_is_idempotent() {
        let state = state();

        let result = delete_handler(State(state.clone()), Path("never_set".to_string())).await;
        assert!(result.is_ok());

        let response = has_handler(State(state), Path("never_set".to_string()))
            .await
            .unwrap();
        assert!(!response.exists);
    }

    #[tokio::test]
    async fn test_counter_handlers() {
        let state = state();

        for expected in 1..=3 {
            let response = inc_handler(State(state.clone()), Path("counter".to_string()))
                .await
                .unwrap();
            assert_eq!(response.value, expected);
        }

        let response = dec_handler(State(state), Path("counter".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, 2);
    }

    #[tokio::test]
    async fn test_size_and_flush_handlers() {
        let state = state();
        state.driver.set("a", &json!(1), None).await.unwrap();

        let response = size_handler(State(state.clone())).await.unwrap();
        assert_eq!(response.size, 1);
        assert_eq!(response.driver, "memory");

        flush_handler(State(state.clone())).await.unwrap();
        let response = size_handler(State(state)).await.unwrap();
        assert_eq!(response.size, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(State(state())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.driver, "memory");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let req = SetRequest {
            key: "".to_string(),
            value: json!("value"),
            lifetime_ms: None,
        };
        let result = set_handler(State(state()), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
