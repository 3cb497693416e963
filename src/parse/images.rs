//! Image reference extraction.
//!
//! Scans a parsed document for `img` elements and resolves each `src` against
//! the page URL.

use std::collections::HashSet;
use std::sync::LazyLock;

use log::debug;
use scraper::{Html, Selector};
use url::Url;

use crate::utils::parse_selector_logged;

const IMG_SELECTOR_STR: &str = "img";

static IMG_SELECTOR: LazyLock<Option<Selector>> =
    LazyLock::new(|| parse_selector_logged(IMG_SELECTOR_STR, "image extraction"));

/// An image reference resolved against its page URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedCandidate {
    /// The `src` attribute exactly as it appeared in the markup
    pub reference: String,
    /// Absolute location
    pub url: Url,
}

/// Extracts and resolves image candidates from page markup.
///
/// Elements without a `src`, or with a blank one, are skipped. Absolute
/// references pass through unchanged and relative ones are joined to
/// `page_url`. References that still fail to resolve are skipped. Repeated
/// absolute URLs are collapsed, keeping document order of first appearance.
///
/// # Returns
///
/// Candidates in document order; empty for an unparsable `page_url` or a page
/// without images.
pub fn extract_image_candidates(html: &str, page_url: &str) -> Vec<ResolvedCandidate> {
    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(e) => {
            log::warn!("Cannot resolve images against '{}': {}", page_url, e);
            return Vec::new();
        }
    };

    let Some(selector) = IMG_SELECTOR.as_ref() else {
        return Vec::new();
    };
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for element in document.select(selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        let reference = src.trim();
        if reference.is_empty() {
            continue;
        }
        match base.join(reference) {
            Ok(url) => {
                if seen.insert(url.clone()) {
                    candidates.push(ResolvedCandidate {
                        reference: reference.to_string(),
                        url,
                    });
                }
            }
            Err(e) => debug!(
                "Skipping unresolvable image reference '{}': {}",
                reference, e
            ),
        }
    }

    debug!(
        "Extracted {} image candidate(s) from {}",
        candidates.len(),
        page_url
    );
    candidates
}
