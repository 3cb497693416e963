//! HTTP request header constants.
//!
//! The fixed header set sent with every page and image request. The values
//! mimic a desktop Chrome navigation so trivial bot filters let us through.
//! `Accept-Encoding` is left to reqwest so responses are decoded transparently.

/// Accept header for page and image requests
pub const HEADER_ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
/// Accept-Language header value
pub const HEADER_ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
/// Referer header value (simulates arriving from a search engine)
pub const HEADER_REFERER_VALUE: &str = "https://www.google.com/";

/// Header name/value pairs sent in addition to the User-Agent.
///
/// To add/remove headers, modify this array.
pub const REQUEST_HEADERS: &[(&str, &str)] = &[
    ("accept", HEADER_ACCEPT_VALUE),
    ("accept-language", HEADER_ACCEPT_LANGUAGE_VALUE),
    ("referer", HEADER_REFERER_VALUE),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
    ("cache-control", "max-age=0"),
];
