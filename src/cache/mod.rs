//! Cache Module
//!
//! Entry records for the in-process backend.

mod entry;

pub use entry::{current_timestamp_ms, lifetime_millis, CacheEntry};
