//! HTTP request building.

use crate::config::REQUEST_HEADERS;

/// Browser-like request headers to reduce trivial bot blocking.
///
/// Applied to every page fetch and image probe so both present the same
/// fingerprint. The User-Agent is set on the client itself.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        REQUEST_HEADERS
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(*name, *value))
    }
}
