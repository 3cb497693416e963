//! img_curate library: scrape-and-validate pipeline for image curation
//!
//! Given a product page URL, the pipeline fetches the page (falling back to a
//! headless browser for JavaScript-rendered pages), extracts every `img`
//! reference, and validates the candidates concurrently against minimum
//! dimensions. A [`CurationSession`] drives the pipeline row by row over a
//! [`RowStore`] and writes operator selections back to it.
//!
//! # Example
//!
//! ```no_run
//! use img_curate::{scrape_images, Config, ScrapeContext};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     pool_size: 8,
//!     render_fallback: false,
//!     ..Default::default()
//! };
//! let ctx = ScrapeContext::from_config(&config)?;
//! let report = scrape_images(&ctx, "https://example.com/products/1").await;
//! for url in report.validated_urls() {
//!     println!("{url}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod parse;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod store;
mod utils;
pub mod validate;

#[cfg(test)]
mod testing;

// Re-export public API
pub use config::{Config, FilterPolicy, LogFormat, LogLevel};
pub use error_handling::ProcessingStats;
pub use pipeline::{scrape_images, PageSource, ScrapeContext, ScrapeReport, ScrapeSettings};
pub use session::{CurationSession, Navigation, RowView};
pub use store::{ColumnRange, CsvRowStore, MemoryRowStore, RowStore};
pub use validate::{CandidateOutcome, DiscardReason, Verdict};
