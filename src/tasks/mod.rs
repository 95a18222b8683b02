//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the gateway serves.
//!
//! # Tasks
//! - Prune: asks the driver to drop expired entries at a configured interval

mod prune;

pub use prune::spawn_prune_task;
