//! In-process cache driver backed by a shared map.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::{decode, resolve_lifetime, validate_key, CacheDriver};
use crate::cache::{current_timestamp_ms, CacheEntry};
use crate::config::DriverConfig;
use crate::error::{CacheError, Result};

// == Memory Driver ==
/// Cache driver over a map living in this process.
///
/// Clones share the same map, so every clone sees one namespace. Expired
/// entries are hidden on access and removed on access or by
/// [`prune`](CacheDriver::prune).
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    max_age: Duration,
}

impl MemoryDriver {
    /// Creates an empty driver using the configured default lifetime.
    pub fn new(config: &DriverConfig) -> Self {
        Self {
            entries: Arc::default(),
            max_age: config.max_age,
        }
    }

    /// Removes expired entries and returns how many were dropped.
    pub async fn prune_expired(&self) -> usize {
        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Read-modify-write of a counter under the write lock.
    async fn step(&self, key: &str, delta: i64) -> Result<i64> {
        let mut entries = self.entries.write().await;

        let live = entries.get(key).filter(|entry| !entry.is_expired());
        let next = match live {
            Some(entry) => {
                let current = parse_counter(&entry.value)?;
                let next = current.checked_add(delta).ok_or_else(overflow)?;
                entry.with_value(next.to_string())
            }
            None => CacheEntry::new(delta.to_string(), None),
        };

        let value = parse_counter(&next.value)?;
        entries.insert(key.to_string(), next);
        Ok(value)
    }
}

fn parse_counter(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| CacheError::Backend("value is not an integer or out of range".to_string()))
}

fn overflow() -> CacheError {
    CacheError::Backend("increment or decrement would overflow".to_string())
}

#[async_trait]
impl CacheDriver for MemoryDriver {
    fn driver_type(&self) -> &'static str {
        "memory"
    }

    async fn set(&self, key: &str, value: &Value, lifetime: Option<Duration>) -> Result<()> {
        validate_key(key)?;
        let encoded = serde_json::to_string(value)?;
        let lifetime = resolve_lifetime(lifetime, self.max_age);
        debug!(key, value = %encoded, ?lifetime, "memory set");

        let entry = CacheEntry::new(encoded, lifetime);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        // Write lock so an expired entry can be dropped on the spot
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(decode(key, entry.value.as_bytes())),
            Some(_) => {}
            None => return Ok(None),
        }

        entries.remove(key);
        debug!(key, "memory get: expired");
        Ok(None)
    }

    async fn del(&self, key: &str) -> Result<()> {
        let removed = self.entries.write().await.remove(key).is_some();
        debug!(key, removed, "memory del");
        Ok(())
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).is_some_and(|entry| !entry.is_expired()))
    }

    async fn inc(&self, key: &str) -> Result<i64> {
        self.step(key, 1).await
    }

    async fn dec(&self, key: &str) -> Result<i64> {
        self.step(key, -1).await
    }

    async fn size(&self) -> Result<u64> {
        let now = current_timestamp_ms();
        let entries = self.entries.read().await;
        let live = entries.values().filter(|entry| !entry.is_expired_at(now)).count();
        Ok(live as u64)
    }

    async fn prune(&self) -> Result<()> {
        let removed = self.prune_expired().await;
        debug!(removed, "memory prune");
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
