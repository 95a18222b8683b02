//! Driver Module
//!
//! The [`CacheDriver`] contract and its backends.
//!
//! # Backends
//! - [`RedisDriver`]: remote redis store, every call is one round trip
//! - [`MemoryDriver`]: in-process map, also the fake used by tests

mod memory;
mod redis;


use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{CacheError, Result};

pub use self::memory::MemoryDriver;
pub use self::redis::RedisDriver;

// == Cache Driver ==
/// Backend-agnostic asynchronous cache interface.
///
/// Callers always hand over and receive native JSON values; drivers own the
/// encoding to the backend's wire representation. Absence of a key is a
/// successful `None`/`false`, never an error. Every failure reported by the
/// backing store surfaces as [`CacheError::Backend`] without retries.
#[async_trait]
pub trait CacheDriver: Send + Sync {
    /// Short backend name, e.g. `"redis"`.
    fn driver_type(&self) -> &'static str;

    /// Whether the driver encodes values itself.
    ///
    /// A generic consumer pre-serializes values only when this is `false`.
    fn handles_own_serialization(&self) -> bool {
        true
    }

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// `None` applies the driver's configured default lifetime;
    /// a zero lifetime (explicit or default) never expires.
    async fn set(&self, key: &str, value: &Value, lifetime: Option<Duration>) -> Result<()>;

    /// Fetches the value under `key`. Undecodable payloads read as `None`.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn del(&self, key: &str) -> Result<()>;

    /// Whether an unexpired entry exists for `key`.
    async fn has(&self, key: &str) -> Result<bool>;

    /// Atomically adds one to the integer at `key` (absent counts as 0).
    async fn inc(&self, key: &str) -> Result<i64>;

    /// Atomically subtracts one from the integer at `key` (absent counts as 0).
    async fn dec(&self, key: &str) -> Result<i64>;

    /// Number of entries in the driver's namespace.
    ///
    /// For redis this is the whole selected database, not only keys written
    /// through this driver.
    async fn size(&self) -> Result<u64>;

    /// Best-effort removal of expired entries.
    async fn prune(&self) -> Result<()>;

    /// Removes every entry in the namespace.
    async fn flush(&self) -> Result<()>;
}

// == Typed Access ==
/// Typed helpers on top of any [`CacheDriver`].
#[async_trait]
pub trait CacheDriverExt: CacheDriver {
    /// Fetches and decodes `key` as `T`. A value of another shape reads as `None`.
    async fn get_as<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        let value = self.get(key).await?;
        Ok(value.and_then(|value| match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(err) => {
                warn!(key, error = %err, "cached value does not match requested type");
                None
            }
        }))
    }

    /// Encodes `value` and stores it under `key`.
    async fn set_as<T>(&self, key: &str, value: &T, lifetime: Option<Duration>) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(value)?;
        self.set(key, &value, lifetime).await
    }
}

impl<D: CacheDriver + ?Sized> CacheDriverExt for D {}

// == Shared Helpers ==
/// Rejects keys no backend can address meaningfully.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
    }
    Ok(())
}

/// Picks the lifetime for a `set` call. `None` means the entry never expires.
pub(crate) fn resolve_lifetime(lifetime: Option<Duration>, max_age: Duration) -> Option<Duration> {
    let effective = lifetime.unwrap_or(max_age);
    (!effective.is_zero()).then_some(effective)
}

/// Decodes a stored payload, treating corrupt data as absent.
pub(crate) fn decode(key: &str, raw: &[u8]) -> Option<Value> {
    match serde_json::from_slice(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, error = %err, "discarding undecodable cache payload");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("a").is_ok());
        assert!(matches!(validate_key(""), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_resolve_lifetime() {
        let day = Duration::from_secs(86_400);

        assert_eq!(resolve_lifetime(None, Duration::ZERO), None);
        assert_eq!(resolve_lifetime(None, day), Some(day));
        assert_eq!(
            resolve_lifetime(Some(Duration::from_millis(5)), day),
            Some(Duration::from_millis(5))
        );
        // Explicit zero overrides a non-zero default
        assert_eq!(resolve_lifetime(Some(Duration::ZERO), day), None);
    }

    #[test]
    fn test_decode_corrupt_payload() {
        assert_eq!(decode("k", br#"{"x":1}"#), Some(json!({"x": 1})));
        assert_eq!(decode("k", b"{not json"), None);
        assert_eq!(decode("k", b""), None);
        assert_eq!(decode("k", &[0xff, 0xfe]), None);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        visits: u32,
    }

    #[tokio::test]
    async fn test_typed_roundtrip() {
        let driver = MemoryDriver::default();
        let profile = Profile {
            name: "ada".to_string(),
            visits: 3,
        };

        driver.set_as("profile", &profile, None).await.unwrap();
        let cached: Option<Profile> = driver.get_as("profile").await.unwrap();

        assert_eq!(cached, Some(profile));
    }

    #[tokio::test]
    async fn test_typed_mismatch_reads_as_absent() {
        let driver = MemoryDriver::default();
        driver.set("profile", &json!("just a string"), None).await.unwrap();

        let cached: Option<Profile> = driver.get_as("profile").await.unwrap();
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let driver: std::sync::Arc<dyn CacheDriver> = std::sync::Arc::new(MemoryDriver::default());

        driver.set_as("n", &42u32, None).await.unwrap();
        assert_eq!(driver.get_as::<u32>("n").await.unwrap(), Some(42));
        assert_eq!(driver.driver_type(), "memory");
        assert!(driver.handles_own_serialization());
    }
}
