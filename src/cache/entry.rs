//! Cache Entry Module
//!
//! Defines the record held by the in-memory backend.

use std::time::Duration;

// == Cache Entry ==
/// A stored value with its expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The encoded value (JSON text)
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The encoded value to store
    /// * `lifetime` - Time until expiry, `None` for an entry that never expires
    pub fn new(value: String, lifetime: Option<Duration>) -> Self {
        let expires_at =
            lifetime.map(|ttl| current_timestamp_ms().saturating_add(lifetime_millis(ttl)));

        Self { value, expires_at }
    }

    /// Returns a copy of this entry carrying a new value but the same expiry.
    ///
    /// Counters keep their expiry across `inc`/`dec`, matching how the
    /// remote store treats `INCR` on a key with a TTL.
    pub fn with_value(&self, value: String) -> Self {
        Self {
            value,
            expires_at: self.expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration
    /// time, so a fully elapsed lifetime is never observable.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Same as [`is_expired`](Self::is_expired) against a fixed clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Whole milliseconds of a non-zero lifetime.
///
/// Sub-millisecond lifetimes round up to 1 and lifetimes beyond `u64`
/// milliseconds clamp to `u64::MAX`. Both backends expire on this value.
pub fn lifetime_millis(lifetime: Duration) -> u64 {
    u64::try_from(lifetime.as_millis())
        .unwrap_or(u64::MAX)
        .max(1)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_no_expiry() {
        let entry = CacheEntry::new("\"test_value\"".to_string(), None);

        assert_eq!(entry.value, "\"test_value\"");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_creation_with_lifetime() {
        let entry = CacheEntry::new("1".to_string(), Some(Duration::from_secs(60)));

        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("1".to_string(), Some(Duration::from_millis(50)));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_huge_lifetime_saturates() {
        let entry = CacheEntry::new("1".to_string(), Some(Duration::from_secs(1 << 62)));

        assert_eq!(entry.expires_at, Some(u64::MAX));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_sub_millisecond_lifetime_rounds_up() {
        let before = current_timestamp_ms();
        let entry = CacheEntry::new("1".to_string(), Some(Duration::from_micros(10)));

        let expires_at = entry.expires_at.unwrap();
        assert!(expires_at > before);
        assert!(!entry.is_expired_at(before));
    }

    #[test]
    fn test_lifetime_millis() {
        assert_eq!(lifetime_millis(Duration::from_micros(10)), 1);
        assert_eq!(lifetime_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(lifetime_millis(Duration::from_secs(1 << 62)), u64::MAX);
        assert_eq!(lifetime_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_with_value_keeps_expiry() {
        let entry = CacheEntry::new("1".to_string(), Some(Duration::from_secs(10)));
        let updated = entry.with_value("2".to_string());

        assert_eq!(updated.value, "2");
        assert_eq!(updated.expires_at, entry.expires_at);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            value: "1".to_string(),
            expires_at: Some(now),
        };

        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
        assert!(!entry.is_expired_at(now - 1));
    }
}
