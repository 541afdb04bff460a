//! Data models for feed entries and archived news records.
//!
//! The central type is [`NewsRecord`]: one entry from a feed or from the
//! archive. Records carry a stable identity used for deduplication and a
//! `processed` flag so that expensive work (page fetch, summarization) is
//! never repeated for the same record.

use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One news item as fetched from a feed or loaded from the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsRecord {
    /// Publisher name, e.g. "Yahoo Finance".
    pub source: String,
    /// Headline as provided by the feed.
    pub title: String,
    /// Article URL. Drives extractor selection.
    pub link: String,
    /// Feed-provided identity. May be absent or unstable for some sources.
    pub guid: Option<String>,
    /// Publication timestamp normalized to UTC. `None` when the feed omits
    /// one; such records are permanently excluded from the reprocessing window.
    pub published_utc: Option<DateTime<Utc>>,
    /// Feed summary text. Distinct from the generated `summary`.
    pub description: String,
    /// Full article body, empty until extraction succeeds.
    pub content: Option<String>,
    /// Generated bullet-point digest, empty until summarization succeeds.
    pub summary: Option<String>,
    /// Set once the record has been through a successful extraction pass.
    /// Summarization is best-effort and does not gate this flag.
    pub processed: bool,
}

impl NewsRecord {
    /// Deduplication key: the feed-provided `guid` when present, falling back
    /// to the normalized title, then to the link. The link tier keeps two
    /// distinct untitled, guid-less records from collapsing into one.
    pub fn identity(&self) -> String {
        match self.guid.as_deref().map(str::trim) {
            Some(guid) if !guid.is_empty() => guid.to_string(),
            _ => {
                let title = normalize_title(&self.title);
                if title.is_empty() {
                    self.link.clone()
                } else {
                    title
                }
            }
        }
    }

    /// The publication timestamp viewed in US Eastern time, the market's
    /// local zone. Derived, never stored.
    pub fn published_eastern(&self) -> Option<DateTime<Tz>> {
        self.published_utc.map(|t| t.with_timezone(&New_York))
    }
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Per-record outcome of one window pass, applied back onto the archive.
#[derive(Debug, Clone)]
pub struct RecordUpdate {
    pub content: Option<String>,
    pub summary: Option<String>,
    pub processed: bool,
}

/// What one pipeline run accomplished.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Entries fetched across all sources this run.
    pub fetched: usize,
    /// Archive size after the merge.
    pub archived: usize,
    /// Records inside the reprocessing window at scan time.
    pub selected: usize,
    /// Links of records newly marked processed this run.
    pub processed: Vec<String>,
    /// How many of those also received a summary.
    pub summarized: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(title: &str, guid: Option<&str>) -> NewsRecord {
        NewsRecord {
            source: "Yahoo Finance".to_string(),
            title: title.to_string(),
            link: "https://finance.yahoo.com/news/x".to_string(),
            guid: guid.map(str::to_string),
            published_utc: None,
            description: String::new(),
            content: None,
            summary: None,
            processed: false,
        }
    }

    #[test]
    fn identity_prefers_guid() {
        let r = record("Markets Rally", Some("yahoo-123"));
        assert_eq!(r.identity(), "yahoo-123");
    }

    #[test]
    fn identity_falls_back_to_normalized_title() {
        let r = record("  Markets Rally  ", None);
        assert_eq!(r.identity(), "markets rally");

        let blank_guid = record("Markets Rally", Some("   "));
        assert_eq!(blank_guid.identity(), "markets rally");
    }

    #[test]
    fn blank_title_and_guid_fall_back_to_link() {
        let mut a = record("", None);
        a.link = "https://finance.yahoo.com/news/a".to_string();
        let mut b = record("   ", None);
        b.link = "https://finance.yahoo.com/news/b".to_string();

        assert_eq!(a.identity(), "https://finance.yahoo.com/news/a");
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn identity_matches_across_title_case() {
        let a = record("Fed Holds Rates", None);
        let b = record("FED HOLDS RATES", None);
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn eastern_view_derives_from_utc() {
        let mut r = record("t", None);
        // 14:30 UTC on a January day is 09:30 in New York (EST, UTC-5).
        r.published_utc = Some(Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 0).unwrap());
        let eastern = r.published_eastern().unwrap();
        assert_eq!(eastern.format("%H:%M").to_string(), "09:30");
    }

    #[test]
    fn eastern_view_absent_without_timestamp() {
        assert!(record("t", None).published_eastern().is_none());
    }

    #[test]
    fn record_serialization_roundtrip() {
        let mut r = record("Markets Rally", Some("g1"));
        r.content = Some("body".to_string());
        r.processed = true;
        let json = serde_json::to_string(&r).unwrap();
        let back: NewsRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, "Markets Rally");
        assert_eq!(back.content.as_deref(), Some("body"));
        assert!(back.processed);
    }
}
