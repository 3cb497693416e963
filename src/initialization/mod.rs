//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - HTTP client (timeouts, user agent, proxy)
//! - Logger
//! - Validation worker semaphore
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes a semaphore for bounding concurrent image probes.
///
/// A zero count is raised to one so a misconfigured pool still makes progress.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_semaphore_permits() {
        assert_eq!(init_semaphore(10).available_permits(), 10);
        assert_eq!(init_semaphore(0).available_permits(), 1);
    }
}
