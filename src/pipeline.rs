//! Per-run orchestration: fetch, merge, scan, extract, summarize, persist.
//!
//! One run is a single sequential pass. Services (extractor registry,
//! summarizer) are injected so the orchestration logic can be exercised
//! against stubs; their lifecycle is owned by the top-level invocation.
//!
//! Failure handling follows the category taxonomy: feed, extraction and
//! summarization failures are local and leave the affected record for the
//! next run's window scan; only archive persistence failure aborts the run.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

use crate::archive::{Archive, write_snapshot};
use crate::errors::{ArchiveError, SummarizeError};
use crate::feeds;
use crate::models::{NewsRecord, RecordUpdate, RunReport};
use crate::scrapers::ExtractContent;
use crate::summarizer::{INTER_CALL_DELAY, MIN_CONTENT_CHARS, Summarize};

/// The run orchestrator, generic over its content-extraction and
/// summarization collaborators.
pub struct Pipeline<E, S> {
    data_dir: PathBuf,
    window: Duration,
    summaries_enabled: bool,
    extractors: E,
    summarizer: S,
}

impl<E: ExtractContent, S: Summarize> Pipeline<E, S> {
    pub fn new(
        data_dir: PathBuf,
        window: Duration,
        summaries_enabled: bool,
        extractors: E,
        summarizer: S,
    ) -> Self {
        Self {
            data_dir,
            window,
            summaries_enabled,
            extractors,
            summarizer,
        }
    }

    /// Execute one full run: fetch every configured feed, then merge and
    /// reprocess. Runs must not overlap; callers serialize invocations.
    pub async fn run(&self, feed_client: &Client) -> Result<RunReport, ArchiveError> {
        let batch = feeds::fetch_all(feed_client).await;
        self.run_with_batch(batch, Utc::now()).await
    }

    /// The post-fetch portion of a run, driven by an already-normalized batch.
    #[instrument(level = "info", skip_all, fields(fetched = batch.len()))]
    pub async fn run_with_batch(
        &self,
        batch: Vec<NewsRecord>,
        now: DateTime<Utc>,
    ) -> Result<RunReport, ArchiveError> {
        let mut report = RunReport {
            fetched: batch.len(),
            ..RunReport::default()
        };

        let mut archive = Archive::load(&self.data_dir).await?;

        let merged_batch = !batch.is_empty();
        if merged_batch {
            write_snapshot(&self.data_dir, &batch, now).await?;
            archive.merge(batch);
        } else {
            info!("No entries fetched from any source; nothing to merge");
        }
        report.archived = archive.len();

        let selected = archive.select_window(now, self.window);
        report.selected = selected.len();
        info!(
            selected = selected.len(),
            window_hours = self.window.num_hours(),
            "Scanned reprocessing window"
        );

        let mut updates: HashMap<String, RecordUpdate> = HashMap::new();
        for record in &selected {
            match self.extractors.content_for(&record.link).await {
                None => {
                    debug!(url = %record.link, "No extractor matches; leaving unprocessed");
                }
                Some(Err(e)) => {
                    warn!(url = %record.link, error = %e, "Extraction failed; record stays eligible");
                }
                Some(Ok(content)) => {
                    let summary = self.maybe_summarize(&content).await;
                    if summary.is_some() {
                        report.summarized += 1;
                    }
                    updates.insert(
                        record.identity(),
                        RecordUpdate {
                            content: Some(content),
                            summary,
                            processed: true,
                        },
                    );
                    report.processed.push(record.link.clone());
                }
            }
        }

        if !updates.is_empty() {
            archive.apply_updates(&updates);
        }

        // Persist whenever this run changed the archive. A save failure is
        // fatal: the in-memory state must not be assumed durable.
        if merged_batch || !updates.is_empty() {
            archive.save(&self.data_dir).await?;
        }

        info!(
            fetched = report.fetched,
            archived = report.archived,
            processed = report.processed.len(),
            summarized = report.summarized,
            "Run complete"
        );
        Ok(report)
    }

    /// Best-effort summarization. Content below the minimum length skips the
    /// external call entirely; failures log and yield no summary. Each real
    /// call is followed by the rate-limit pause.
    async fn maybe_summarize(&self, content: &str) -> Option<String> {
        if !self.summaries_enabled {
            return None;
        }
        if content.chars().count() < MIN_CONTENT_CHARS {
            debug!(
                chars = content.chars().count(),
                "Content below summarization threshold; skipping call"
            );
            return None;
        }

        let result = self.summarizer.summarize(content).await;
        // The pause throttles outbound traffic; a credentials failure never
        // reached the service, so there is nothing to pace.
        if !matches!(result, Err(SummarizeError::MissingCredentials)) {
            tokio::time::sleep(INTER_CALL_DELAY).await;
        }

        match result {
            Ok(digest) => Some(digest),
            Err(e) => {
                warn!(error = %e, "Summarization failed; summary left empty");
                None
            }
        }
    }
}
