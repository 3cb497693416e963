//! Processing statistics tracking.
//!
//! This module provides thread-safe counters for candidate discards, validated
//! images, and page-level events, shared across concurrent validation tasks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{DiscardKind, PageEvent};

/// Thread-safe processing statistics tracker.
///
/// All counters are initialized to zero on creation and incremented with
/// atomics, so the tracker can be shared across tasks using `Arc`.
pub struct ProcessingStats {
    discards: HashMap<DiscardKind, AtomicUsize>,
    pages: HashMap<PageEvent, AtomicUsize>,
    validated: AtomicUsize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut discards = HashMap::new();
        for kind in DiscardKind::iter() {
            discards.insert(kind, AtomicUsize::new(0));
        }

        let mut pages = HashMap::new();
        for event in PageEvent::iter() {
            pages.insert(event, AtomicUsize::new(0));
        }

        ProcessingStats {
            discards,
            pages,
            validated: AtomicUsize::new(0),
        }
    }

    /// Increment a discard counter.
    pub fn increment_discard(&self, kind: DiscardKind) {
        if let Some(counter) = self.discards.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment discard counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                kind
            );
        }
    }

    /// Increment a page event counter.
    pub fn increment_page(&self, event: PageEvent) {
        if let Some(counter) = self.pages.get(&event) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment page counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                event
            );
        }
    }

    pub fn increment_validated(&self) {
        self.validated.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for a discard kind.
    pub fn get_discard_count(&self, kind: DiscardKind) -> usize {
        self.discards
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for a page event.
    pub fn get_page_count(&self, event: PageEvent) -> usize {
        self.pages
            .get(&event)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn validated(&self) -> usize {
        self.validated.load(Ordering::SeqCst)
    }

    pub fn total_discards(&self) -> usize {
        self.discards.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Logs non-zero counters at info level.
    /// Logs the totals accumulated since this tracker was created.
    pub fn log_summary(&self) {
        log::info!(
            "Totals: validated {} image(s), discarded {}",
            self.validated(),
            self.total_discards()
        );
        for kind in DiscardKind::iter() {
            let count = self.get_discard_count(kind);
            if count > 0 {
                log::info!("   {}: {}", kind, count);
            }
        }
        for event in PageEvent::iter() {
            let count = self.get_page_count(event);
            if count > 0 {
                log::debug!("   {}: {}", event.as_str(), count);
            }
        }
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
