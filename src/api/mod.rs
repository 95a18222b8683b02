//! API Module
//!
//! HTTP gateway exposing any [`CacheDriver`](crate::driver::CacheDriver) as a REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a JSON value with optional lifetime
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `GET /has/:key` - Existence check
//! - `POST /inc/:key`, `POST /dec/:key` - Atomic counters
//! - `GET /size` - Namespace size
//! - `POST /flush`, `POST /prune` - Namespace maintenance
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
