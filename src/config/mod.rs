//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, retry bounds, thresholds, sheet layout)
//! - HTTP request header constants
//! - Library configuration and CLI option types

mod cli;
mod constants;
mod headers;
mod types;

// Re-export all constants
pub use cli::{Command, Opt, PipelineArgs};
pub use constants::*;
pub use headers::*;
pub use types::{Config, FilterPolicy, LogFormat, LogLevel};
