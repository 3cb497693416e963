//! Pipeline output types.

use std::collections::HashMap;

use log::info;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::error_handling::DiscardKind;
use crate::validate::{CandidateOutcome, DiscardReason};

/// Where the page markup came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageSource {
    /// Plain HTTP fetch
    Direct,
    /// Headless browser fallback
    Rendered,
    /// Neither path produced markup
    Unavailable { reason: String },
}

/// Result of one scrape-and-validate run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeReport {
    pub page_url: String,
    pub source: PageSource,
    /// Number of distinct resolved candidates
    pub candidates: usize,
    /// One outcome per candidate, in completion order
    pub outcomes: Vec<CandidateOutcome>,
}

impl ScrapeReport {
    /// A report for a page that could not be obtained at all.
    pub fn unavailable(page_url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            source: PageSource::Unavailable {
                reason: reason.into(),
            },
            candidates: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn validated_urls(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_validated())
            .map(|o| o.url.as_str())
            .collect()
    }

    pub fn discarded(&self) -> Vec<(&str, &DiscardReason)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.discard_reason().map(|r| (o.url.as_str(), r)))
            .collect()
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.source, PageSource::Unavailable { .. })
    }

    /// Discards in this report, by kind.
    pub fn discard_counts(&self) -> HashMap<DiscardKind, usize> {
        let mut counts = HashMap::new();
        for (_, reason) in self.discarded() {
            *counts.entry(reason.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Logs this run's validated and discarded counts.
    pub fn log_summary(&self) {
        let counts = self.discard_counts();
        info!(
            "{}: validated {} image(s), discarded {}",
            self.page_url,
            self.validated_urls().len(),
            counts.values().sum::<usize>()
        );
        for kind in DiscardKind::iter() {
            if let Some(count) = counts.get(&kind) {
                info!("   {}: {}", kind, count);
            }
        }
    }
}
