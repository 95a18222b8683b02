//! Cache driver over a remote redis store.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::{ConnectionLike, ConnectionManager};
use redis::{Client, Cmd};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{decode, resolve_lifetime, validate_key, CacheDriver};
use crate::cache::lifetime_millis;
use crate::config::DriverConfig;
use crate::error::Result;

// == Redis Driver ==
/// Cache driver issuing one redis command per operation.
///
/// The connection is injected and never opened, pooled or closed here. Any
/// cloneable async connection works; [`ConnectionManager`] is the default
/// since it reconnects on its own.
#[derive(Clone)]
pub struct RedisDriver<C = ConnectionManager> {
    conn: C,
    max_age: Duration,
}

impl RedisDriver<ConnectionManager> {
    /// Opens a [`ConnectionManager`] to `url` and wraps it.
    pub async fn connect(url: &str, config: &DriverConfig) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self::new(conn, config))
    }
}

impl<C> RedisDriver<C>
where
    C: ConnectionLike + Clone + Send + Sync + 'static,
{
    /// Wraps an established connection.
    pub fn new(conn: C, config: &DriverConfig) -> Self {
        Self {
            conn,
            max_age: config.max_age,
        }
    }

    /// The underlying connection handle.
    pub fn connection(&self) -> &C {
        &self.conn
    }

    async fn query<T: redis::FromRedisValue>(&self, cmd: &Cmd) -> Result<T> {
        let start = Instant::now();
        let mut conn = self.conn.clone();
        let res = cmd.query_async(&mut conn).await?;
        debug!(elapsed_us = start.elapsed().as_micros() as u64, "redis round trip");
        Ok(res)
    }
}

/// Builds `SET key value [PX ms]`.
fn set_cmd(key: &str, encoded: &str, lifetime: Option<Duration>) -> Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(encoded);

    if let Some(lifetime) = lifetime {
        cmd.arg("PX").arg(lifetime_millis(lifetime));
    }

    cmd
}

#[async_trait]
impl<C> CacheDriver for RedisDriver<C>
where
    C: ConnectionLike + Clone + Send + Sync + 'static,
{
    fn driver_type(&self) -> &'static str {
        "redis"
    }

    #[instrument(level = "debug", skip(self, value, lifetime))]
    async fn set(&self, key: &str, value: &Value, lifetime: Option<Duration>) -> Result<()> {
        validate_key(key)?;
        let encoded = serde_json::to_string(value)?;
        let lifetime = resolve_lifetime(lifetime, self.max_age);
        debug!(value = %encoded, ?lifetime, "set");

        self.query::<()>(&set_cmd(key, &encoded, lifetime)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        // Raw bytes, so a non-UTF-8 payload is discarded by `decode` instead of failing here
        let raw: Option<Vec<u8>> = self.query(redis::cmd("GET").arg(key)).await?;
        Ok(raw.and_then(|raw| decode(key, &raw)))
    }

    #[instrument(level = "debug", skip(self))]
    async fn del(&self, key: &str) -> Result<()> {
        self.query::<()>(redis::cmd("DEL").arg(key)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn has(&self, key: &str) -> Result<bool> {
        self.query(redis::cmd("EXISTS").arg(key)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn inc(&self, key: &str) -> Result<i64> {
        self.query(redis::cmd("INCR").arg(key)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn dec(&self, key: &str) -> Result<i64> {
        self.query(redis::cmd("DECR").arg(key)).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn size(&self) -> Result<u64> {
        self.query(&redis::cmd("DBSIZE")).await
    }

    async fn prune(&self) -> Result<()> {
        // Redis expires keys natively
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn flush(&self) -> Result<()> {
        self.query::<()>(&redis::cmd("FLUSHDB")).await
    }
}
