//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes the shared HTTP client for page fetches and image probes.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from config
/// - Default timeout from the page fetch timeout (each request sets its own)
/// - Optional proxy applied to all schemes
/// - Transparent gzip/brotli/deflate decoding
///
/// # Errors
///
/// Returns `InitializationError::ProxyError` if the proxy URL is unusable and
/// `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut builder = ClientBuilder::new()
        .timeout(Duration::from_secs(config.page_timeout_seconds))
        .user_agent(config.user_agent.clone());

    if let Some(proxy) = config.proxy.as_deref() {
        let proxy_cfg =
            reqwest::Proxy::all(proxy).map_err(|e| InitializationError::ProxyError {
                proxy: proxy.to_string(),
                reason: e.to_string(),
            })?;
        builder = builder.proxy(proxy_cfg);
    }

    let client = builder.build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_default_config() {
        let client = init_client(&Config::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_init_client_with_proxy() {
        let config = Config {
            proxy: Some("http://127.0.0.1:3128".to_string()),
            ..Default::default()
        };
        assert!(init_client(&config).is_ok());
    }

    #[test]
    fn test_init_client_rejects_bad_proxy() {
        let config = Config {
            proxy: Some("not a proxy url".to_string()),
            ..Default::default()
        };
        match init_client(&config) {
            Err(InitializationError::ProxyError { proxy, .. }) => {
                assert_eq!(proxy, "not a proxy url")
            }
            other => panic!("expected proxy error, got {:?}", other.map(|_| ())),
        }
    }
}
