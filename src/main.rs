//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `img_curate` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - JSON output for the presentation layer
//!
//! All core functionality is implemented in the library crate.

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use img_curate::config::{Command, Opt};
use img_curate::initialization::init_logger_with;
use img_curate::{
    scrape_images, Config, CsvRowStore, CurationSession, Navigation, ScrapeContext,
};

/// Result of a `select` command.
#[derive(Serialize)]
struct SelectionSaved {
    saved_row: u32,
    next_row: u32,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn open_sheet(path: &Path) -> Result<CsvRowStore> {
    CsvRowStore::open(path).with_context(|| format!("Failed to open sheet {}", path.display()))
}

async fn run(opt: Opt, config: Config) -> Result<()> {
    match opt.command {
        Command::Scrape { url } => {
            let ctx = ScrapeContext::from_config(&config)
                .context("Failed to initialize scrape context")?;
            let report = scrape_images(&ctx, &url).await;
            ctx.stats.log_summary();
            print_json(&report)
        }
        Command::Row { sheet, row } => {
            let store = open_sheet(&sheet)?;
            let ctx = ScrapeContext::from_config(&config)
                .context("Failed to initialize scrape context")?;
            let view = CurationSession::at(row).load_row(&store, &ctx).await?;
            ctx.stats.log_summary();
            print_json(&view)
        }
        Command::Select {
            sheet,
            row,
            picks,
            goto,
        } => {
            let store = open_sheet(&sheet)?;
            let mut session = CurationSession::at(row);
            let saved_row = session.current_row();
            let next_row = session
                .apply_selection(&store, &picks, Navigation::parse(goto.as_deref()))
                .with_context(|| {
                    format!(
                        "Failed to save row {} to {}",
                        saved_row,
                        store.path().display()
                    )
                })?;
            print_json(&SelectionSaved {
                saved_row,
                next_row,
            })
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    let config = Config::from(&opt.pipeline);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(opt, config).await {
        eprintln!("img_curate error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
