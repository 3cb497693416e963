//! Configuration types.
//!
//! This module defines the enums and structs used to configure logging and the
//! scrape-and-validate pipeline.

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_POOL_SIZE, DEFAULT_USER_AGENT, IMAGE_FETCH_ATTEMPTS, IMAGE_FETCH_TIMEOUT_SECS,
    MIN_HEIGHT, MIN_WIDTH, PAGE_FETCH_ATTEMPTS, PAGE_FETCH_TIMEOUT_SECS, RENDER_WAIT_TIMEOUT,
    RETRY_DELAY_MS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Optional candidate filters.
///
/// Both filters are off by default: the keyword and format lists in
/// `config::constants` are carried as configuration but only consulted when
/// the operator opts in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Discard candidates whose URL contains one of `EXCLUDE_KEYWORDS`
    pub exclude_keywords: bool,
    /// Discard candidates whose path does not end in one of `VALID_FORMATS`
    pub enforce_formats: bool,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use img_curate::Config;
///
/// let config = Config {
///     pool_size: 16,
///     min_width: 400,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-request timeout for the page fetch in seconds
    pub page_timeout_seconds: u64,

    /// Per-request timeout for each image probe in seconds
    pub image_timeout_seconds: u64,

    /// Total page fetch attempts (at least 1)
    pub page_attempts: usize,

    /// Total attempts per image probe (at least 1)
    pub image_attempts: usize,

    /// Fixed delay between attempts in milliseconds
    pub retry_delay_ms: u64,

    /// Maximum concurrent image probes per page
    pub pool_size: usize,

    /// Minimum accepted image width in pixels
    pub min_width: u32,

    /// Minimum accepted image height in pixels
    pub min_height: u32,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Proxy URL applied to all requests (e.g. `http://127.0.0.1:8080`)
    pub proxy: Option<String>,

    /// Fall back to the headless browser when the page fetch fails
    pub render_fallback: bool,

    /// Upper bound on waiting for an `img` element after navigation, in seconds
    pub render_wait_seconds: u64,

    /// Optional keyword/format filters
    pub filters: FilterPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            page_timeout_seconds: PAGE_FETCH_TIMEOUT_SECS,
            image_timeout_seconds: IMAGE_FETCH_TIMEOUT_SECS,
            page_attempts: PAGE_FETCH_ATTEMPTS,
            image_attempts: IMAGE_FETCH_ATTEMPTS,
            retry_delay_ms: RETRY_DELAY_MS,
            pool_size: DEFAULT_POOL_SIZE,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            render_fallback: true,
            render_wait_seconds: RENDER_WAIT_TIMEOUT.as_secs(),
            filters: FilterPolicy::default(),
        }
    }
}
