//! Failure categories for the pipeline.
//!
//! Every fallible boundary returns one of these enums so the orchestrator can
//! tell retry-eligible failures apart from permanent skips and fatal aborts.
//! Only [`ArchiveError`] is fatal to a run; everything else leaves the record
//! unprocessed and is picked up again by the next window scan.

use thiserror::Error;

/// A feed could not be fetched or parsed. The source contributes zero
/// entries for this run; other sources are unaffected.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed parse failed: {0}")]
    Parse(String),
}

/// Article content extraction failed after an extractor matched the URL.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("page fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("page fetch returned HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The expected content container was absent from the fetched document,
    /// usually because the publisher changed its page layout.
    #[error("expected content container not found in {url}")]
    StructureMismatch { url: String },
}

/// Summary generation failed. Never fatal: the record keeps its content and
/// `processed` state, only `summary` stays empty.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("no API credential configured")]
    MissingCredentials,

    #[error("summarization request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("summarization service returned HTTP {status}: {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed summarization response: {0}")]
    Malformed(String),
}

/// Archive or snapshot persistence failed. Fatal for the run: the in-memory
/// archive must be discarded rather than assumed persisted.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
