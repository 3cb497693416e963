// Shared test doubles for unit tests.
//
// ScriptedTransport replays per-URL responses and records attempt times and
// concurrency; FakeRenderer counts launches and teardowns.

use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use image::{ImageBuffer, ImageFormat, Rgb};
use tokio::time::Instant;

use crate::error_handling::{FetchError, RenderError};
use crate::fetch::{FetchedBody, Transport};
use crate::render::{RenderSession, Renderer};

/// Encodes a solid PNG of the given size.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(width, height, Rgb([200, 30, 30]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("PNG encoding should not fail in tests");
    buf.into_inner()
}

pub(crate) fn ok_body(
    url: &str,
    content_type: &str,
    body: Vec<u8>,
) -> Result<FetchedBody, FetchError> {
    Ok(FetchedBody {
        final_url: url.to_string(),
        status: 200,
        content_type: Some(content_type.to_string()),
        body,
    })
}

pub(crate) fn html_body(url: &str, html: &str) -> Result<FetchedBody, FetchError> {
    ok_body(url, "text/html", html.as_bytes().to_vec())
}

pub(crate) fn png_body(url: &str, width: u32, height: u32) -> Result<FetchedBody, FetchError> {
    ok_body(url, "image/png", png_bytes(width, height))
}

pub(crate) fn transport_error() -> Result<FetchedBody, FetchError> {
    Err(FetchError::Transport("connection reset".to_string()))
}

/// Replays scripted responses per URL.
///
/// Each URL has a queue; the final entry repeats once the queue drains.
/// Unscripted URLs fail with a transport error.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Result<FetchedBody, FetchError>>>>,
    calls: Mutex<Vec<(String, Instant)>>,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub(crate) fn script(
        &self,
        url: &str,
        responses: Vec<Result<FetchedBody, FetchError>>,
    ) -> &Self {
        self.scripts
            .lock()
            .expect("script lock poisoned")
            .insert(url.to_string(), responses.into());
        self
    }

    pub(crate) fn calls_for(&self, url: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .iter()
            .filter(|(u, _)| u == url)
            .map(|(_, at)| *at)
            .collect()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_response(&self, url: &str) -> Result<FetchedBody, FetchError> {
        let mut scripts = self.scripts.lock().expect("script lock poisoned");
        match scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(transport_error),
            Some(queue) => queue.front().cloned().unwrap_or_else(transport_error),
            None => Err(FetchError::Transport(format!("no route to {url}"))),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(
        &self,
        url: &str,
        _timeout: Duration,
        max_bytes: usize,
    ) -> Result<FetchedBody, FetchError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push((url.to_string(), Instant::now()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let response = self.next_response(url)?;
        if response.body.len() > max_bytes {
            return Err(FetchError::TooLarge {
                size: response.body.len(),
                limit: max_bytes,
            });
        }
        Ok(response)
    }
}

/// What a fake render session does when asked to capture.
#[derive(Clone)]
pub(crate) enum RenderScript {
    Html(String),
    Fail(RenderError),
}

/// Renderer double that counts launches and closes.
pub(crate) struct FakeRenderer {
    script: RenderScript,
    pub(crate) launches: Arc<AtomicUsize>,
    pub(crate) closes: Arc<AtomicUsize>,
    fail_launch: bool,
}

impl FakeRenderer {
    pub(crate) fn new(script: RenderScript) -> Self {
        Self {
            script,
            launches: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
            fail_launch: false,
        }
    }

    pub(crate) fn failing_launch() -> Self {
        Self {
            fail_launch: true,
            ..Self::new(RenderScript::Html(String::new()))
        }
    }
}

struct FakeSession {
    script: RenderScript,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            return Err(RenderError::Launch("no browser binary".to_string()));
        }
        Ok(Box::new(FakeSession {
            script: self.script.clone(),
            closes: Arc::clone(&self.closes),
        }))
    }
}

#[async_trait]
impl RenderSession for FakeSession {
    async fn capture_html(&mut self, _url: &str, _wait: Duration) -> Result<String, RenderError> {
        match &self.script {
            RenderScript::Html(html) => Ok(html.clone()),
            RenderScript::Fail(e) => Err(e.clone()),
        }
    }

    async fn close(self: Box<Self>) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
