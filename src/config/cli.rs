//! Command-line options.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_POOL_SIZE, DEFAULT_USER_AGENT, IMAGE_FETCH_ATTEMPTS, IMAGE_FETCH_TIMEOUT_SECS,
    MIN_HEIGHT, MIN_WIDTH, PAGE_FETCH_ATTEMPTS, PAGE_FETCH_TIMEOUT_SECS, RENDER_WAIT_TIMEOUT,
    RETRY_DELAY_MS,
};
use crate::config::types::{Config, FilterPolicy, LogFormat, LogLevel};

/// Scrape product pages for candidate images and record operator selections.
#[derive(Debug, Parser)]
#[command(name = "img_curate", version, about)]
pub struct Opt {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline and logging options shared by every subcommand.
#[derive(Debug, Args)]
pub struct PipelineArgs {
    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub log_format: LogFormat,

    /// Page fetch timeout in seconds
    #[arg(long, default_value_t = PAGE_FETCH_TIMEOUT_SECS, global = true)]
    pub page_timeout_seconds: u64,

    /// Image probe timeout in seconds
    #[arg(long, default_value_t = IMAGE_FETCH_TIMEOUT_SECS, global = true)]
    pub image_timeout_seconds: u64,

    /// Total page fetch attempts
    #[arg(
        long,
        default_value_t = PAGE_FETCH_ATTEMPTS as u64,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub page_attempts: u64,

    /// Total attempts per image probe
    #[arg(
        long,
        default_value_t = IMAGE_FETCH_ATTEMPTS as u64,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub image_attempts: u64,

    /// Fixed delay between attempts in milliseconds
    #[arg(long, default_value_t = RETRY_DELAY_MS, global = true)]
    pub retry_delay_ms: u64,

    /// Maximum concurrent image probes per page
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE, global = true)]
    pub pool_size: usize,

    /// Minimum image width in pixels
    #[arg(long, default_value_t = MIN_WIDTH, global = true)]
    pub min_width: u32,

    /// Minimum image height in pixels
    #[arg(long, default_value_t = MIN_HEIGHT, global = true)]
    pub min_height: u32,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Proxy URL for all requests
    #[arg(long, env = "IMG_CURATE_PROXY", global = true)]
    pub proxy: Option<String>,

    /// Disable the headless browser fallback
    #[arg(long, global = true)]
    pub no_render: bool,

    /// Maximum wait for an image element after headless navigation, in seconds
    #[arg(long, default_value_t = RENDER_WAIT_TIMEOUT.as_secs(), global = true)]
    pub render_wait_seconds: u64,

    /// Discard images whose URL contains a decoration keyword (logo, banner, ...)
    #[arg(long, global = true)]
    pub exclude_keywords: bool,

    /// Discard images whose path is not .jpg/.jpeg/.png/.webp
    #[arg(long, global = true)]
    pub enforce_formats: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape one page and print the validation report as JSON
    Scrape {
        /// Product page URL
        url: String,
    },
    /// Load a sheet row and print the candidate images as JSON
    Row {
        /// CSV file acting as the sheet
        #[arg(long)]
        sheet: PathBuf,
        /// 1-based row number
        #[arg(long)]
        row: u32,
    },
    /// Write operator selections for a row and print the next row number
    Select {
        /// CSV file acting as the sheet
        #[arg(long)]
        sheet: PathBuf,
        /// 1-based row number
        #[arg(long)]
        row: u32,
        /// Selection as IMAGE_URL=TOKEN (tokens p1..p5, l1..l5)
        #[arg(long = "pick", value_parser = parse_pick)]
        picks: Vec<(String, String)>,
        /// Jump to this row afterwards instead of advancing by one
        #[arg(long)]
        goto: Option<String>,
    },
}

/// Splits `IMAGE_URL=TOKEN` on the last `=` so query strings survive.
fn parse_pick(raw: &str) -> Result<(String, String), String> {
    match raw.rsplit_once('=') {
        Some((url, token)) if !url.is_empty() && !token.is_empty() => {
            Ok((url.to_string(), token.to_string()))
        }
        _ => Err(format!("expected IMAGE_URL=TOKEN, got '{raw}'")),
    }
}

impl From<&PipelineArgs> for Config {
    fn from(args: &PipelineArgs) -> Self {
        Config {
            log_level: args.log_level.clone(),
            log_format: args.log_format.clone(),
            page_timeout_seconds: args.page_timeout_seconds,
            image_timeout_seconds: args.image_timeout_seconds,
            page_attempts: args.page_attempts as usize,
            image_attempts: args.image_attempts as usize,
            retry_delay_ms: args.retry_delay_ms,
            pool_size: args.pool_size.max(1),
            min_width: args.min_width,
            min_height: args.min_height,
            user_agent: args.user_agent.clone(),
            proxy: args.proxy.clone(),
            render_fallback: !args.no_render,
            render_wait_seconds: args.render_wait_seconds,
            filters: FilterPolicy {
                exclude_keywords: args.exclude_keywords,
                enforce_formats: args.enforce_formats,
            },
        }
    }
}
