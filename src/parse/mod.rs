//! HTML parsing and image reference extraction.
//!
//! All parsing is done using CSS selectors via the `scraper` crate.

mod images;

// Re-export public API
pub use images::{extract_image_candidates, ResolvedCandidate};
