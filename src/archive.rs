//! The persistent, deduplicated archive of all known news records.
//!
//! The archive owns the three operations the pipeline is built on:
//! last-wins merge of freshly fetched entries, the time-windowed scan for
//! unprocessed records, and the in-place application of extraction results.
//! On disk it is a JSON array of records plus a derived tab-separated export
//! for external inspection; both are written with a write-temp-then-rename
//! discipline so a crash mid-save never corrupts the previous state.

use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::errors::ArchiveError;
use crate::models::{NewsRecord, RecordUpdate};

/// Serialized archive file name inside the data directory.
pub const ARCHIVE_FILE: &str = "news_archive.json";
/// Derived tab-separated export, regenerated on every save.
pub const TSV_FILE: &str = "news_archive.tsv";

/// The full deduplicated record set, held in memory for the duration of a run.
#[derive(Debug, Default)]
pub struct Archive {
    records: Vec<NewsRecord>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[NewsRecord] {
        &self.records
    }

    /// Merge freshly fetched records into the archive.
    ///
    /// Existing records come first, incoming records are appended, and
    /// duplicates by identity are resolved last-wins: the final field values
    /// are exactly those of the newest occurrence. Merging the same batch
    /// twice yields the same archive as merging it once.
    pub fn merge(&mut self, incoming: Vec<NewsRecord>) {
        let before = self.records.len();
        let mut merged: Vec<NewsRecord> = std::mem::take(&mut self.records)
            .into_iter()
            .chain(incoming)
            .rev()
            .unique_by(|r| r.identity())
            .collect();
        merged.reverse();
        debug!(
            before,
            after = merged.len(),
            "Merged incoming batch into archive"
        );
        self.records = merged;
    }

    /// Select the records eligible for reprocessing: published within
    /// `window` of `now` and not yet processed. Records without a publication
    /// timestamp can never satisfy the window and are always excluded.
    pub fn select_window(&self, now: DateTime<Utc>, window: Duration) -> Vec<NewsRecord> {
        let threshold = now - window;
        self.records
            .iter()
            .filter(|r| !r.processed)
            .filter(|r| matches!(r.published_utc, Some(t) if t >= threshold))
            .cloned()
            .collect()
    }

    /// Overwrite `content`, `summary` and `processed` for each updated
    /// identity. All other fields and all non-updated records are untouched.
    pub fn apply_updates(&mut self, updates: &HashMap<String, RecordUpdate>) {
        for record in &mut self.records {
            if let Some(update) = updates.get(&record.identity()) {
                record.content = update.content.clone();
                record.summary = update.summary.clone();
                record.processed = update.processed;
            }
        }
    }

    /// Load the archive from the data directory. A missing file is not an
    /// error: it signals a first run and yields an empty archive.
    #[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display()))]
    pub async fn load(data_dir: &Path) -> Result<Self, ArchiveError> {
        let path = data_dir.join(ARCHIVE_FILE);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No existing archive, starting empty");
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let records: Vec<NewsRecord> = serde_json::from_str(&raw)?;
        info!(count = records.len(), path = %path.display(), "Loaded archive");
        Ok(Self { records })
    }

    /// Persist the archive as JSON plus the derived TSV export. Both writes
    /// go through a temp file and an atomic rename.
    #[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display()))]
    pub async fn save(&self, data_dir: &Path) -> Result<(), ArchiveError> {
        fs::create_dir_all(data_dir).await?;

        let json = serde_json::to_string(&self.records)?;
        write_atomic(&data_dir.join(ARCHIVE_FILE), &json).await?;
        write_atomic(&data_dir.join(TSV_FILE), &self.to_tsv()).await?;

        info!(count = self.records.len(), "Archive persisted");
        Ok(())
    }

    fn to_tsv(&self) -> String {
        let mut out = String::from(
            "source\ttitle\tlink\tguid\tpublished_utc\tpublished_eastern\tdescription\tcontent\tsummary\tprocessed\n",
        );
        for r in &self.records {
            let row = [
                r.source.clone(),
                r.title.clone(),
                r.link.clone(),
                r.guid.clone().unwrap_or_default(),
                r.published_utc.map(|t| t.to_rfc3339()).unwrap_or_default(),
                r.published_eastern()
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                r.description.clone(),
                r.content.clone().unwrap_or_default(),
                r.summary.clone().unwrap_or_default(),
                r.processed.to_string(),
            ]
            .iter()
            .map(|field| tsv_escape(field))
            .join("\t");
            out.push_str(&row);
            out.push('\n');
        }
        out
    }
}

/// Write the freshly fetched batch to a run-stamped snapshot file. Audit
/// artifact only; the pipeline never reads it back.
#[instrument(level = "info", skip_all, fields(count = batch.len()))]
pub async fn write_snapshot(
    data_dir: &Path,
    batch: &[NewsRecord],
    now: DateTime<Utc>,
) -> Result<PathBuf, ArchiveError> {
    fs::create_dir_all(data_dir).await?;
    let path = data_dir.join(format!("news_{}.json", now.format("%Y%m%d_%H%M")));
    let json = serde_json::to_string(batch)?;
    write_atomic(&path, &json).await?;
    info!(path = %path.display(), "Wrote fetch snapshot");
    Ok(path)
}

async fn write_atomic(path: &Path, contents: &str) -> Result<(), ArchiveError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

fn tsv_escape(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}
