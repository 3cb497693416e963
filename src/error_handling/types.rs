//! Error type definitions.
//!
//! This module defines the error types used throughout the pipeline, plus the
//! tags used for counting per-candidate discards and page-level events.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured proxy URL could not be used.
    #[error("Invalid proxy '{proxy}': {reason}")]
    ProxyError { proxy: String, reason: String },
}

/// Failure of a single fetch attempt.
///
/// Stores messages rather than the underlying `reqwest::Error` so results can
/// be cloned into reports and replayed by test transports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The URL could not be parsed or has an unusable scheme.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// The request did not complete within its timeout.
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// Connection, TLS, or body transfer failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The body exceeded the configured size cap.
    #[error("Body of {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Every status and transport failure is retried. Invalid URLs and
    /// oversized bodies fail the same way on every attempt.
    pub fn is_retriable(&self) -> bool {
        !matches!(
            self,
            FetchError::InvalidUrl { .. } | FetchError::TooLarge { .. }
        )
    }

    /// Categorizes a `reqwest::Error` for the given URL.
    pub fn from_reqwest(url: &str, error: &ReqwestError) -> Self {
        if let Some(status) = error.status() {
            return FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            };
        }
        if error.is_timeout() {
            FetchError::Timeout(url.to_string())
        } else if error.is_builder() {
            FetchError::InvalidUrl {
                url: url.to_string(),
                reason: error.to_string(),
            }
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

/// Failure of the headless rendering fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The browser process could not be started.
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// Navigation to the page failed.
    #[error("Failed to navigate to {url}: {reason}")]
    Navigation { url: String, reason: String },

    /// No `img` element appeared within the wait bound.
    #[error("No image element appeared within {0:?}")]
    WaitTimeout(Duration),

    /// The rendered HTML could not be read back.
    #[error("Failed to capture rendered HTML: {0}")]
    Capture(String),
}

/// Error types for row store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Row store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing CSV could not be parsed or written.
    #[error("Row store CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column reference such as `F:O` could not be parsed.
    #[error("Invalid column range '{0}'")]
    InvalidColumns(String),

    /// Row numbers are 1-based.
    #[error("Invalid row {0}: rows start at 1")]
    InvalidRow(u32),

    /// The number of values does not match the column range width.
    #[error("Expected {expected} values for {range}, got {actual}")]
    WidthMismatch {
        range: String,
        expected: usize,
        actual: usize,
    },
}

/// Error types for operator selection mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A `p`/`l` token that does not name an existing slot.
    #[error("Unknown selection slot '{0}' (expected p1..p5 or l1..l5)")]
    UnknownSlot(String),
}

/// Tags for per-candidate discards, used for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum DiscardKind {
    UnsupportedScheme,
    Unreachable,
    Undecodable,
    TooSmall,
    PayloadTooLarge,
    ExcludedKeyword,
    DisallowedFormat,
    WorkerFailed,
}

/// Page-level events recorded once per pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum PageEvent {
    /// The lightweight fetch produced a usable page
    FetchedDirect,
    /// The lightweight fetch failed and the renderer was invoked
    RenderFallback,
    /// The renderer produced a page
    Rendered,
    /// Neither path produced a page
    Unavailable,
}

impl std::fmt::Display for DiscardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DiscardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscardKind::UnsupportedScheme => "Unsupported scheme",
            DiscardKind::Unreachable => "Unreachable",
            DiscardKind::Undecodable => "Not a decodable image",
            DiscardKind::TooSmall => "Below minimum dimensions",
            DiscardKind::PayloadTooLarge => "Payload too large",
            DiscardKind::ExcludedKeyword => "Excluded keyword",
            DiscardKind::DisallowedFormat => "Disallowed format",
            DiscardKind::WorkerFailed => "Worker failed",
        }
    }
}

impl PageEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageEvent::FetchedDirect => "Fetched directly",
            PageEvent::RenderFallback => "Render fallback",
            PageEvent::Rendered => "Rendered",
            PageEvent::Unavailable => "Unavailable",
        }
    }
}
