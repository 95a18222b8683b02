//! Cache Driver - A uniform async cache interface
//!
//! Exposes get/set/del/has/inc/dec/size/flush/prune over interchangeable
//! backends: a remote Redis store or an in-process map.

pub mod api;
pub mod cache;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::{DriverConfig, GatewayConfig};
pub use driver::{CacheDriver, CacheDriverExt, MemoryDriver, RedisDriver};
pub use error::{CacheError, Result};
pub use tasks::spawn_prune_task;
