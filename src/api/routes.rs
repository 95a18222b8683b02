//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    dec_handler, delete_handler, flush_handler, get_handler, has_handler, health_handler,
    inc_handler, prune_handler, set_handler, size_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a JSON value
/// - `GET /get/:key` - Retrieve a value by key
/// - `DELETE /del/:key` - Delete a key
/// - `GET /has/:key` - Check whether a key exists
/// - `POST /inc/:key`, `POST /dec/:key` - Step a counter
/// - `GET /size` - Count entries in the namespace
/// - `POST /flush` - Remove every entry
/// - `POST /prune` - Drop expired entries
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/has/:key", get(has_handler))
        .route("/inc/:key", post(inc_handler))
        .route("/dec/:key", post(dec_handler))
        .route("/size", get(size_handler))
        .route("/flush", post(flush_handler))
        .route("/prune", post(prune_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
