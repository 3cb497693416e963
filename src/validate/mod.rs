//! Concurrent image candidate validation.
//!
//! Each candidate is probed in its own Tokio task. A semaphore bounds how many
//! probes run at once, and results are drained from a `FuturesUnordered` in
//! completion order, so callers must treat the output as an unordered set.

mod probe;
mod verdict;

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::debug;

use crate::error_handling::ProcessingStats;
use crate::fetch::Transport;
use crate::initialization::init_semaphore;
use crate::parse::ResolvedCandidate;

pub use probe::{probe_candidate, ProbeSettings};
pub use verdict::{CandidateOutcome, DiscardReason, Verdict};

/// Validates every candidate with at most `pool_size` probes in flight.
///
/// Blocks until all probes finish. A probe task that panics is reported as
/// `DiscardReason::WorkerFailed` for its URL rather than aborting the batch.
///
/// # Returns
///
/// One outcome per candidate, in completion order.
pub async fn validate_candidates(
    transport: Arc<dyn Transport>,
    candidates: Vec<ResolvedCandidate>,
    settings: Arc<ProbeSettings>,
    pool_size: usize,
    stats: Arc<ProcessingStats>,
) -> Vec<CandidateOutcome> {
    let total = candidates.len();
    debug!(
        "Validating {} candidate(s) with pool size {}",
        total, pool_size
    );

    let semaphore = init_semaphore(pool_size);
    let mut tasks = FuturesUnordered::new();

    for candidate in candidates {
        let url = candidate.url.to_string();
        let transport = Arc::clone(&transport);
        let settings = Arc::clone(&settings);
        let semaphore = Arc::clone(&semaphore);

        let handle = tokio::spawn(async move {
            // Hold the permit for the whole probe, retries included
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    return CandidateOutcome::discarded(
                        candidate.url.as_str(),
                        DiscardReason::WorkerFailed {
                            error: e.to_string(),
                        },
                    )
                }
            };
            probe_candidate(transport.as_ref(), &candidate.url, &settings).await
        });
        tasks.push(async move { (url, handle.await) });
    }

    let mut outcomes = Vec::with_capacity(total);
    while let Some((url, joined)) = tasks.next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Validation task for {} failed: {}", url, e);
                CandidateOutcome::discarded(
                    url,
                    DiscardReason::WorkerFailed {
                        error: e.to_string(),
                    },
                )
            }
        };
        match outcome.discard_reason() {
            Some(reason) => stats.increment_discard(reason.kind()),
            None => stats.increment_validated(),
        }
        outcomes.push(outcome);
    }

    debug!(
        "{} of {} candidate(s) validated",
        outcomes.iter().filter(|o| o.is_validated()).count(),
        total
    );
    outcomes
}
