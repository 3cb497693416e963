//! Headless rendering fallback.
//!
//! Used when the lightweight fetch cannot produce a usable page. A `Renderer`
//! launches one isolated `RenderSession` per call; [`render_page`] always
//! closes it, whichever way capture ends.

#[cfg(feature = "browser")]
mod chromium;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use crate::error_handling::RenderError;

#[cfg(feature = "browser")]
pub use chromium::ChromiumRenderer;

/// Launches rendering sessions.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Starts a fresh, exclusive session.
    async fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError>;
}

/// One live rendering engine instance.
#[async_trait]
pub trait RenderSession: Send {
    /// Navigates to `url`, waits up to `wait` for an `img` element, and
    /// returns the rendered HTML.
    async fn capture_html(&mut self, url: &str, wait: Duration) -> Result<String, RenderError>;

    /// Tears the session down, terminating the engine process.
    async fn close(self: Box<Self>);
}

/// Renders `url` in a fresh session and closes it on every exit path.
///
/// # Errors
///
/// Returns the launch or capture error. The session, if it was launched,
/// has been closed by the time this returns.
pub async fn render_page(
    renderer: &dyn Renderer,
    url: &str,
    wait: Duration,
) -> Result<String, RenderError> {
    debug!("Rendering {} (wait up to {:?})", url, wait);
    let mut session = renderer.launch().await?;
    let result = session.capture_html(url, wait).await;
    session.close().await;

    if let Err(ref e) = result {
        warn!("Rendering {} failed: {}", url, e);
    }
    result
}
