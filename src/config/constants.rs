//! Configuration constants.
//!
//! This module defines the defaults used throughout the scrape-and-validate
//! pipeline, including timeouts, retry bounds, size limits, and the
//! spreadsheet column layout.

use std::time::Duration;

// Concurrency
/// Maximum number of image candidates validated concurrently per page
pub const DEFAULT_POOL_SIZE: usize = 10;

// Network operation timeouts
/// Per-request timeout for the page fetch in seconds
pub const PAGE_FETCH_TIMEOUT_SECS: u64 = 8;
/// Per-request timeout for each image probe in seconds
pub const IMAGE_FETCH_TIMEOUT_SECS: u64 = 5;
/// Upper bound on waiting for an `img` element in the rendered DOM
pub const RENDER_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
/// Interval between DOM polls while waiting for an `img` element
pub const RENDER_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// How long a browser gets to close or exit before it is killed
pub const BROWSER_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

// Retry strategy
/// Total attempts for the page fetch (initial attempt included)
pub const PAGE_FETCH_ATTEMPTS: usize = 3;
/// Total attempts for each image probe (initial attempt included)
pub const IMAGE_FETCH_ATTEMPTS: usize = 2;
/// Fixed delay between attempts in milliseconds.
/// The delay does not grow between attempts.
pub const RETRY_DELAY_MS: u64 = 1000;

// Image thresholds
/// Minimum accepted image width in pixels
pub const MIN_WIDTH: u32 = 200;
/// Minimum accepted image height in pixels
pub const MIN_HEIGHT: u32 = 200;

// Response size limits
/// Maximum page body size in bytes (10MB)
pub const MAX_PAGE_BODY_BYTES: usize = 10 * 1024 * 1024;
/// Maximum image body size in bytes (25MB)
/// Larger payloads are discarded before decoding
pub const MAX_IMAGE_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Default User-Agent string for HTTP requests and the headless browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Candidate filters
// These lists are only consulted when the matching FilterPolicy switch is on.
/// URL substrings that mark an image as decoration rather than product imagery
pub const EXCLUDE_KEYWORDS: &[&str] = &["logo", "banner", "icon", "advert", "placeholder", "blank"];
/// File extensions accepted when format enforcement is enabled
pub const VALID_FORMATS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

// Spreadsheet layout
/// First data row (row 1 holds headers)
pub const FIRST_DATA_ROW: u32 = 2;
/// Column holding the product page URL
pub const URL_COLUMN: &str = "D";
/// Column holding the product label
pub const LABEL_COLUMN: &str = "E";
/// Destination columns for operator selections
pub const SELECTION_COLUMNS: &str = "F:O";
/// Number of destination slots in `SELECTION_COLUMNS`
pub const SELECTION_SLOTS: usize = 10;
/// Primary slots `p1..p5` map to the first half of the destination columns
pub const PRIMARY_SLOTS: usize = 5;
/// Lifestyle slots `l1..l5` map to the second half of the destination columns
pub const LIFESTYLE_SLOTS: usize = 5;
