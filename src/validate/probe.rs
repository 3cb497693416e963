//! Single-candidate probe: filter, fetch, decode, measure.

use log::{debug, trace};
use url::Url;

use crate::config::{FilterPolicy, EXCLUDE_KEYWORDS, VALID_FORMATS};
use crate::error_handling::FetchError;
use crate::fetch::{fetch_with_retry, FetchSettings, Transport};

use super::verdict::{CandidateOutcome, DiscardReason};

/// Settings applied to every candidate of a validation pass.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub fetch: FetchSettings,
    pub min_width: u32,
    pub min_height: u32,
    pub filters: FilterPolicy,
}

/// Applies the opt-in keyword and format filters.
fn filter_candidate(url: &Url, filters: &FilterPolicy) -> Option<DiscardReason> {
    if filters.exclude_keywords {
        let lowered = url.as_str().to_lowercase();
        if let Some(keyword) = EXCLUDE_KEYWORDS.iter().find(|k| lowered.contains(*k)) {
            return Some(DiscardReason::ExcludedKeyword {
                keyword: keyword.to_string(),
            });
        }
    }
    if filters.enforce_formats {
        let path = url.path().to_lowercase();
        if !VALID_FORMATS.iter().any(|ext| path.ends_with(ext)) {
            return Some(DiscardReason::DisallowedFormat);
        }
    }
    None
}

/// Decodes `bytes` as an image and returns its dimensions.
///
/// Runs on the blocking pool since a full decode is CPU-bound.
async fn decode_dimensions(bytes: Vec<u8>) -> Result<(u32, u32), String> {
    let decoded = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes).map(|img| (img.width(), img.height()))
    })
    .await
    .map_err(|e| format!("decoder task failed: {e}"))?;
    decoded.map_err(|e| e.to_string())
}

/// Probes one resolved candidate.
///
/// Never fails: every problem becomes a `Discarded` verdict so one bad
/// image cannot affect its siblings.
pub async fn probe_candidate(
    transport: &dyn Transport,
    url: &Url,
    settings: &ProbeSettings,
) -> CandidateOutcome {
    let url_str = url.as_str();

    if !matches!(url.scheme(), "http" | "https") {
        return CandidateOutcome::discarded(
            url_str,
            DiscardReason::UnsupportedScheme {
                scheme: url.scheme().to_string(),
            },
        );
    }

    if let Some(reason) = filter_candidate(url, &settings.filters) {
        trace!("Filtered {}: {:?}", url_str, reason);
        return CandidateOutcome::discarded(url_str, reason);
    }

    let fetched = match fetch_with_retry(transport, url_str, &settings.fetch).await {
        Ok(fetched) => fetched,
        Err(no_response) => {
            let reason = match no_response.last_error {
                FetchError::TooLarge { size, limit } => {
                    DiscardReason::PayloadTooLarge { size, limit }
                }
                other => DiscardReason::Unreachable {
                    attempts: no_response.attempts,
                    last_error: other.to_string(),
                },
            };
            return CandidateOutcome::discarded(url_str, reason);
        }
    };

    let (width, height) = match decode_dimensions(fetched.body).await {
        Ok(dimensions) => dimensions,
        Err(error) => {
            debug!("Not a decodable image {}: {}", url_str, error);
            return CandidateOutcome::discarded(url_str, DiscardReason::Undecodable { error });
        }
    };

    if width < settings.min_width || height < settings.min_height {
        trace!("Too small {}: {}x{}", url_str, width, height);
        return CandidateOutcome::discarded(url_str, DiscardReason::TooSmall { width, height });
    }

    CandidateOutcome::validated(url_str, width, height)
}
