//! Scrape-and-validate pipeline.
//!
//! Composes the stages for one page:
//!
//! 1. Fetch the page with retry ([`crate::fetch`])
//! 2. If that yields nothing usable, render it once in a headless browser ([`crate::render`])
//! 3. Extract and resolve `img` references ([`crate::parse`])
//! 4. Validate the candidates concurrently ([`crate::validate`])
//!
//! Page-level failures never surface as errors: they produce an empty report
//! whose source is [`PageSource::Unavailable`].

mod report;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{Config, MAX_IMAGE_BODY_BYTES, MAX_PAGE_BODY_BYTES};
use crate::error_handling::{InitializationError, PageEvent, ProcessingStats};
use crate::fetch::{fetch_with_retry, FetchSettings, HttpTransport, RetryPolicy, Transport};
use crate::initialization::init_client;
use crate::parse::extract_image_candidates;
use crate::render::{render_page, Renderer};
use crate::validate::{validate_candidates, ProbeSettings};

pub use report::{PageSource, ScrapeReport};

/// Per-run tunables derived from [`Config`].
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub page_fetch: FetchSettings,
    pub probe: Arc<ProbeSettings>,
    pub pool_size: usize,
    pub render_wait: Duration,
}

impl From<&Config> for ScrapeSettings {
    fn from(config: &Config) -> Self {
        let delay = Duration::from_millis(config.retry_delay_ms);
        ScrapeSettings {
            page_fetch: FetchSettings {
                retry: RetryPolicy::new(config.page_attempts, delay),
                timeout: Duration::from_secs(config.page_timeout_seconds),
                max_bytes: MAX_PAGE_BODY_BYTES,
            },
            probe: Arc::new(ProbeSettings {
                fetch: FetchSettings {
                    retry: RetryPolicy::new(config.image_attempts, delay),
                    timeout: Duration::from_secs(config.image_timeout_seconds),
                    max_bytes: MAX_IMAGE_BODY_BYTES,
                },
                min_width: config.min_width,
                min_height: config.min_height,
                filters: config.filters.clone(),
            }),
            pool_size: config.pool_size,
            render_wait: Duration::from_secs(config.render_wait_seconds),
        }
    }
}

/// Shared resources for scrape runs.
///
/// Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct ScrapeContext {
    pub transport: Arc<dyn Transport>,
    /// `None` disables the headless fallback
    pub renderer: Option<Arc<dyn Renderer>>,
    pub settings: ScrapeSettings,
    pub stats: Arc<ProcessingStats>,
}

impl ScrapeContext {
    pub fn new(
        transport: Arc<dyn Transport>,
        renderer: Option<Arc<dyn Renderer>>,
        settings: ScrapeSettings,
    ) -> Self {
        Self {
            transport,
            renderer,
            settings,
            stats: Arc::new(ProcessingStats::new()),
        }
    }

    /// Builds the production context: a reqwest transport plus, when enabled
    /// and compiled in, the Chromium renderer.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(client));
        Ok(Self::new(
            transport,
            default_renderer(config),
            ScrapeSettings::from(config),
        ))
    }
}

#[cfg(feature = "browser")]
fn default_renderer(config: &Config) -> Option<Arc<dyn Renderer>> {
    if config.render_fallback {
        Some(Arc::new(crate::render::ChromiumRenderer::new(config)))
    } else {
        None
    }
}

#[cfg(not(feature = "browser"))]
fn default_renderer(config: &Config) -> Option<Arc<dyn Renderer>> {
    if config.render_fallback {
        debug!("Render fallback requested but the browser feature is not compiled in");
    }
    None
}

/// Obtains page markup, falling back to the renderer at most once.
async fn acquire_page(ctx: &ScrapeContext, url: &str) -> Result<(PageSource, String), String> {
    let reason = match fetch_with_retry(ctx.transport.as_ref(), url, &ctx.settings.page_fetch).await
    {
        Ok(fetched) => {
            let html = fetched.text();
            if !html.trim().is_empty() {
                ctx.stats.increment_page(PageEvent::FetchedDirect);
                return Ok((PageSource::Direct, html));
            }
            format!("empty body from {}", fetched.final_url)
        }
        Err(no_response) => no_response.to_string(),
    };

    let Some(renderer) = ctx.renderer.as_deref() else {
        ctx.stats.increment_page(PageEvent::Unavailable);
        return Err(reason);
    };

    info!(
        "Falling back to headless rendering for {} ({})",
        url, reason
    );
    ctx.stats.increment_page(PageEvent::RenderFallback);
    match render_page(renderer, url, ctx.settings.render_wait).await {
        Ok(html) => {
            ctx.stats.increment_page(PageEvent::Rendered);
            Ok((PageSource::Rendered, html))
        }
        Err(e) => {
            ctx.stats.increment_page(PageEvent::Unavailable);
            Err(format!("{reason}; rendering failed: {e}"))
        }
    }
}

/// Scrapes `url` for images and validates every candidate.
///
/// Always returns a report. If the page cannot be fetched or rendered, the
/// report is empty and its source says why. A page with no `img` elements
/// yields an empty, available report.
pub async fn scrape_images(ctx: &ScrapeContext, url: &str) -> ScrapeReport {
    let (source, html) = match acquire_page(ctx, url).await {
        Ok(page) => page,
        Err(reason) => {
            warn!("No usable page for {}: {}", url, reason);
            return ScrapeReport::unavailable(url, reason);
        }
    };

    let candidates = extract_image_candidates(&html, url);
    let total = candidates.len();
    debug!("{} candidate(s) on {} ({:?})", total, url, source);

    let outcomes = if candidates.is_empty() {
        Vec::new()
    } else {
        validate_candidates(
            Arc::clone(&ctx.transport),
            candidates,
            Arc::clone(&ctx.settings.probe),
            ctx.settings.pool_size,
            Arc::clone(&ctx.stats),
        )
        .await
    };

    let report = ScrapeReport {
        page_url: url.to_string(),
        source,
        candidates: total,
        outcomes,
    };
    report.log_summary();
    report
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
