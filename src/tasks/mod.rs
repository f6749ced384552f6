//! Background Tasks Module
//!
//! - TTL Cleanup: drops expired cache entries at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
