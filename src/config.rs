//! Configuration Module
//!
//! Driver and gateway configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default redis connection url.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

// == Driver Config ==
/// Configuration consumed by a driver at construction time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverConfig {
    /// Lifetime applied when `set` is called without one.
    /// `Duration::ZERO` means entries never expire.
    pub max_age: Duration,
}

impl DriverConfig {
    /// Creates a config with the given default lifetime.
    pub fn with_max_age(max_age: Duration) -> Self {
        Self { max_age }
    }

    /// Loads the driver config from the environment.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_AGE_MS` - Default lifetime in milliseconds (default: 0, never expires)
    pub fn from_env() -> Self {
        Self {
            max_age: Duration::from_millis(env_or("CACHE_MAX_AGE_MS", 0)),
        }
    }
}

// == Backend Kind ==
/// Backend selected for the gateway binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Redis,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "redis" => Ok(BackendKind::Redis),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

// == Gateway Config ==
/// Gateway server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Driver settings shared by every backend
    pub driver: DriverConfig,
    /// Backend to serve
    pub backend: BackendKind,
    /// Redis connection url, used when `backend` is `Redis`
    pub redis_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Background prune interval in seconds, 0 disables the task
    pub prune_interval: u64,
}

impl GatewayConfig {
    /// Creates a new GatewayConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis url (default: redis://127.0.0.1:6379)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PRUNE_INTERVAL` - Prune frequency in seconds (default: 1)
    pub fn from_env() -> Result<Self, String> {
        let backend = match env::var("CACHE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => BackendKind::Memory,
        };

        Ok(Self {
            driver: DriverConfig::from_env(),
            backend,
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            server_port: env_or("SERVER_PORT", 3000),
            prune_interval: env_or("PRUNE_INTERVAL", 1),
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            driver: DriverConfig::default(),
            backend: BackendKind::Memory,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            server_port: 3000,
            prune_interval: 1,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
