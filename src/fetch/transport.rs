//! Single-attempt HTTP transport.
//!
//! The `Transport` trait is the seam between retry logic and the network: one
//! call is one attempt. `HttpTransport` is the reqwest-backed implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::trace;

use crate::error_handling::FetchError;

use super::request::RequestHeaders;

/// A successfully fetched response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    /// URL after redirects
    pub final_url: String,
    /// HTTP status code (always a success code)
    pub status: u16,
    /// Content-Type header, if present
    pub content_type: Option<String>,
    /// Raw body bytes (already decompressed)
    pub body: Vec<u8>,
}

impl FetchedBody {
    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One GET attempt against a URL.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a single GET.
    ///
    /// Non-success statuses, transport failures, timeouts, and bodies larger
    /// than `max_bytes` are all errors.
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
        max_bytes: usize,
    ) -> Result<FetchedBody, FetchError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<reqwest::Client>,
}

impl HttpTransport {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
        max_bytes: usize,
    ) -> Result<FetchedBody, FetchError> {
        let request =
            RequestHeaders::apply_to_request_builder(self.client.get(url)).timeout(timeout);
        let mut response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(length) = response.content_length() {
            let length = usize::try_from(length).unwrap_or(usize::MAX);
            if length > max_bytes {
                return Err(FetchError::TooLarge {
                    size: length,
                    limit: max_bytes,
                });
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Stream the body so a missing or lying Content-Length cannot exceed the cap
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?
        {
            if body.len() + chunk.len() > max_bytes {
                return Err(FetchError::TooLarge {
                    size: body.len() + chunk.len(),
                    limit: max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }
        trace!("Fetched {} bytes from {}", body.len(), final_url);

        Ok(FetchedBody {
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
