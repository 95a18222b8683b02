//! Prune Task
//!
//! Background task that periodically calls [`CacheDriver::prune`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::driver::CacheDriver;

/// Spawns a background task that periodically prunes expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs. A failing prune is logged and retried on the next tick;
/// backends with native expiry make every run a no-op.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let driver: Arc<dyn CacheDriver> = Arc::new(MemoryDriver::default());
/// let prune_handle = spawn_prune_task(driver.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// prune_handle.abort();
/// ```
pub fn spawn_prune_task(driver: Arc<dyn CacheDriver>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            driver = driver.driver_type(),
            "Starting prune task with interval of {:?}", interval
        );

        loop {
            tokio::time::sleep(interval).await;

            match driver.prune().await {
                Ok(()) => debug!("prune run finished"),
                Err(err) => warn!(error = %err, "prune run failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MemoryDriver;
    use serde_json::json;

    #[tokio::test]
    async fn test_prune_task_removes_expired_entries() {
        let memory = MemoryDriver::default();
        memory
            .set("expire_soon", &json!("value"), Some(Duration::from_millis(50)))
            .await
            .unwrap();

        let handle = spawn_prune_task(Arc::new(memory.clone()), Duration::from_millis(100));

        // Wait for entry to expire and prune to run
        tokio::time::sleep(Duration::from_millis(350)).await;

        // Nothing left for a manual prune to do
        assert_eq!(memory.prune_expired().await, 0);
        assert!(!memory.has("expire_soon").await.unwrap());

        handle.abort();
    }

    #[tokio::test]
    async fn test_prune_task_preserves_valid_entries() {
        let memory = MemoryDriver::default();
        memory
            .set("long_lived", &json!("value"), Some(Duration::from_secs(3600)))
            .await
            .unwrap();

        let handle = spawn_prune_task(Arc::new(memory.clone()), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(memory.get("long_lived").await.unwrap(), Some(json!("value")));

        handle.abort();
    }

    #[tokio::test]
    async fn test_prune_task_can_be_aborted() {
        let handle = spawn_prune_task(Arc::new(MemoryDriver::default()), Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
