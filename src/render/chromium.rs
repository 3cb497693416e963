//! Headless Chromium renderer via `chromiumoxide`.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use log::{debug, warn};
use tempfile::TempDir;
use tokio::task::JoinHandle;

use crate::config::{Config, BROWSER_CLOSE_TIMEOUT, RENDER_POLL_INTERVAL};
use crate::error_handling::RenderError;

use super::{RenderSession, Renderer};

/// Launches a throwaway headless Chromium per session.
///
/// Each session gets its own temporary profile directory, so no cookies or
/// cache carry over between pages.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    user_agent: String,
    proxy: Option<String>,
}

impl ChromiumRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            proxy: config.proxy.clone(),
        }
    }

    fn browser_config(&self, profile: &TempDir) -> Result<BrowserConfig, RenderError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .user_data_dir(profile.path())
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--no-first-run")
            .arg(format!("--user-agent={}", self.user_agent));
        if let Some(proxy) = self.proxy.as_deref() {
            builder = builder.arg(format!("--proxy-server={proxy}"));
        }
        builder.build().map_err(RenderError::Launch)
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        let profile = TempDir::new().map_err(|e| RenderError::Launch(e.to_string()))?;
        let config = self.browser_config(&profile)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;
        // The CDP handler must be polled for the browser to make progress
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });
        debug!(
            "Launched headless browser (profile {})",
            profile.path().display()
        );

        Ok(Box::new(ChromiumSession {
            browser: Some(browser),
            handler_task,
            _profile: profile,
        }))
    }
}

/// A live browser process.
///
/// `close` shuts it down gracefully. If the session is dropped without
/// `close` (panic, cancelled future), `Browser`'s own drop kills the child.
struct ChromiumSession {
    browser: Option<Browser>,
    handler_task: JoinHandle<()>,
    _profile: TempDir,
}

/// Polls until the DOM contains an `img` element or `wait` elapses.
async fn wait_for_image(page: &Page, wait: Duration) -> Result<(), RenderError> {
    let poll = async {
        loop {
            if page.find_element("img").await.is_ok() {
                return;
            }
            tokio::time::sleep(RENDER_POLL_INTERVAL).await;
        }
    };
    tokio::time::timeout(wait, poll)
        .await
        .map_err(|_| RenderError::WaitTimeout(wait))
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn capture_html(&mut self, url: &str, wait: Duration) -> Result<String, RenderError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| RenderError::Capture("session already closed".to_string()))?;

        let page = browser
            .new_page(url)
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        wait_for_image(&page, wait).await?;

        page.content()
            .await
            .map_err(|e| RenderError::Capture(e.to_string()))
    }

    async fn close(mut self: Box<Self>) {
        if let Some(mut browser) = self.browser.take() {
            shut_down(&mut browser, BROWSER_CLOSE_TIMEOUT).await;
        }
        self.handler_task.abort();
        debug!("Headless browser session closed");
    }
}

/// Process control used during teardown.
#[async_trait]
trait BrowserProcess: Send {
    /// Asks the browser to exit over CDP.
    async fn request_close(&mut self) -> Result<(), String>;
    /// Waits for the child process to exit.
    async fn wait_exit(&mut self) -> Result<(), String>;
    /// Kills the child process and reaps it.
    async fn force_kill(&mut self) -> Result<(), String>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn request_close(&mut self) -> Result<(), String> {
        self.close().await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn wait_exit(&mut self) -> Result<(), String> {
        self.wait().await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn force_kill(&mut self) -> Result<(), String> {
        match self.kill().await {
            Some(result) => result.map_err(|e| e.to_string()),
            None => Ok(()),
        }
    }
}

/// Closes the browser gracefully, killing it if it refuses or hangs.
///
/// Each graceful step gets `deadline`. A failed or expired close skips the
/// wait, since a browser that never received the close will not exit.
async fn shut_down(process: &mut dyn BrowserProcess, deadline: Duration) {
    let closed = match tokio::time::timeout(deadline, process.request_close()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!("Failed to close browser cleanly: {}", e);
            false
        }
        Err(_) => {
            warn!("Browser did not acknowledge close within {:?}", deadline);
            false
        }
    };

    if closed {
        match tokio::time::timeout(deadline, process.wait_exit()).await {
            Ok(Ok(())) => return,
            Ok(Err(e)) => warn!("Failed to reap browser process: {}", e),
            Err(_) => warn!("Browser did not exit within {:?}", deadline),
        }
    }

    if let Err(e) = process.force_kill().await {
        warn!("Failed to kill browser process: {}", e);
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler_task.abort();
        if self.browser.is_some() {
            warn!("Browser session dropped without close; killing process");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    /// How the fake process reacts to each teardown step.
    #[derive(Clone, Copy)]
    enum Step {
        Ok,
        Fail,
        Hang,
    }

    struct FakeProcess {
        close: Step,
        wait: Step,
        calls: Vec<&'static str>,
    }

    impl FakeProcess {
        fn new(close: Step, wait: Step) -> Self {
            Self {
                close,
                wait,
                calls: Vec::new(),
            }
        }
    }

    async fn act(step: Step) -> Result<(), String> {
        match step {
            Step::Ok => Ok(()),
            Step::Fail => Err("connection closed".to_string()),
            Step::Hang => pending().await,
        }
    }

    #[async_trait]
    impl BrowserProcess for FakeProcess {
        async fn request_close(&mut self) -> Result<(), String> {
            self.calls.push("close");
            act(self.close).await
        }

        async fn wait_exit(&mut self) -> Result<(), String> {
            self.calls.push("wait");
            act(self.wait).await
        }

        async fn force_kill(&mut self) -> Result<(), String> {
            self.calls.push("kill");
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_clean_close_does_not_kill() {
        let mut process = FakeProcess::new(Step::Ok, Step::Ok);
        shut_down(&mut process, Duration::from_secs(5)).await;
        assert_eq!(process.calls, vec!["close", "wait"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_close_kills_without_waiting() {
        let mut process = FakeProcess::new(Step::Fail, Step::Hang);
        shut_down(&mut process, Duration::from_secs(5)).await;
        assert_eq!(process.calls, vec!["close", "kill"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_close_is_killed() {
        let mut process = FakeProcess::new(Step::Hang, Step::Ok);
        shut_down(&mut process, Duration::from_secs(5)).await;
        assert_eq!(process.calls, vec!["close", "kill"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_process_that_never_exits_is_killed() {
        let mut process = FakeProcess::new(Step::Ok, Step::Hang);
        let started = tokio::time::Instant::now();
        shut_down(&mut process, Duration::from_secs(5)).await;
        assert_eq!(process.calls, vec!["close", "wait", "kill"]);
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
