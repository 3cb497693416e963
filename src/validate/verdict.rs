//! Per-candidate validation results.

use serde::Serialize;

use crate::error_handling::DiscardKind;

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DiscardReason {
    /// Not an http(s) URL (e.g. `data:` or `javascript:`)
    UnsupportedScheme { scheme: String },
    /// Every fetch attempt failed
    Unreachable { attempts: u32, last_error: String },
    /// The payload could not be decoded as an image
    Undecodable { error: String },
    /// Decoded, but below the minimum dimensions
    TooSmall { width: u32, height: u32 },
    /// The body exceeded the image size cap
    PayloadTooLarge { size: usize, limit: usize },
    /// The URL contains a decoration keyword
    ExcludedKeyword { keyword: String },
    /// The URL path does not end in an allowed extension
    DisallowedFormat,
    /// The validation task itself failed
    WorkerFailed { error: String },
}

impl DiscardReason {
    pub fn kind(&self) -> DiscardKind {
        match self {
            DiscardReason::UnsupportedScheme { .. } => DiscardKind::UnsupportedScheme,
            DiscardReason::Unreachable { .. } => DiscardKind::Unreachable,
            DiscardReason::Undecodable { .. } => DiscardKind::Undecodable,
            DiscardReason::TooSmall { .. } => DiscardKind::TooSmall,
            DiscardReason::PayloadTooLarge { .. } => DiscardKind::PayloadTooLarge,
            DiscardReason::ExcludedKeyword { .. } => DiscardKind::ExcludedKeyword,
            DiscardReason::DisallowedFormat => DiscardKind::DisallowedFormat,
            DiscardReason::WorkerFailed { .. } => DiscardKind::WorkerFailed,
        }
    }
}

/// Validation result for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Validated { width: u32, height: u32 },
    Discarded(DiscardReason),
}

/// A resolved candidate URL paired with its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateOutcome {
    pub url: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl CandidateOutcome {
    pub fn validated(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            verdict: Verdict::Validated { width, height },
        }
    }

    pub fn discarded(url: impl Into<String>, reason: DiscardReason) -> Self {
        Self {
            url: url.into(),
            verdict: Verdict::Discarded(reason),
        }
    }

    pub fn is_validated(&self) -> bool {
        matches!(self.verdict, Verdict::Validated { .. })
    }

    pub fn discard_reason(&self) -> Option<&DiscardReason> {
        match &self.verdict {
            Verdict::Discarded(reason) => Some(reason),
            Verdict::Validated { .. } => None,
        }
    }
}
