//! Retrying fetch over a pluggable transport.
//!
//! Both the page fetch and every image probe go through [`fetch_with_retry`],
//! which retries a single-attempt [`Transport`] with a fixed delay and reduces
//! exhaustion to a [`NoResponse`] sentinel rather than a propagated error.

mod request;
mod transport;

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use log::{debug, warn};
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;

use crate::error_handling::FetchError;

pub use transport::{FetchedBody, HttpTransport, Transport};

/// Attempt bound and fixed inter-attempt delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first (at least 1)
    pub attempts: usize,
    /// Delay slept between consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: usize, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Delays between attempts: one fewer than the attempt count.
    fn strategy(&self) -> impl Iterator<Item = Duration> {
        FixedInterval::new(self.delay).take(self.attempts.max(1) - 1)
    }
}

/// Everything a fetch needs besides the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    pub retry: RetryPolicy,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Body size cap
    pub max_bytes: usize,
}

/// Sentinel for a fetch that produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoResponse {
    /// Attempts actually made
    pub attempts: u32,
    /// Error from the final attempt
    pub last_error: FetchError,
}

impl std::fmt::Display for NoResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no response after {} attempt(s): {}",
            self.attempts, self.last_error
        )
    }
}

/// Fetches `url` through `transport`, retrying failed attempts.
///
/// Sleeps `settings.retry.delay` between attempts and gives up after
/// `settings.retry.attempts`. Errors that cannot change between attempts
/// (invalid URL, oversized body) stop retrying immediately.
///
/// # Returns
///
/// The first successful body, or `NoResponse` describing the last failure.
pub async fn fetch_with_retry(
    transport: &dyn Transport,
    url: &str,
    settings: &FetchSettings,
) -> Result<FetchedBody, NoResponse> {
    let attempt_count = AtomicU32::new(0);

    let result = RetryIf::start(
        settings.retry.strategy(),
        || {
            let attempt = attempt_count.fetch_add(1, Ordering::SeqCst) + 1;
            debug!("Fetching {} (attempt {})", url, attempt);
            transport.get(url, settings.timeout, settings.max_bytes)
        },
        |e: &FetchError| {
            let retry = e.is_retriable();
            if retry {
                debug!("Retrying {} after: {}", url, e);
            }
            retry
        },
    )
    .await;

    result.map_err(|last_error| {
        let attempts = attempt_count.load(Ordering::SeqCst);
        warn!(
            "Giving up on {} after {} attempt(s): {}",
            url, attempts, last_error
        );
        NoResponse {
            attempts,
            last_error,
        }
    })
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
