//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for fetching, rendering, storage, and selection
//! - Discard and page-event tags
//! - Processing statistics tracking

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{
    DiscardKind, FetchError, InitializationError, PageEvent, RenderError, SelectionError,
    StoreError,
};
