//! Feed fetching and entry normalization.
//!
//! The pipeline consumes a fixed set of named RSS sources. Each source is
//! fetched independently and sequentially; a failure fetching one source is
//! logged and contributes zero entries without aborting the others.

use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::FeedError;
use crate::models::NewsRecord;

/// A named RSS source.
#[derive(Debug, Clone, Copy)]
pub struct FeedSource {
    pub name: &'static str,
    pub url: &'static str,
}

/// The configured publisher feeds, consumed read-only with no pagination.
pub const RSS_SOURCES: &[FeedSource] = &[
    FeedSource {
        name: "Yahoo Finance",
        url: "http://finance.yahoo.com/rss/topstories",
    },
    FeedSource {
        name: "Business Insider",
        url: "https://www.businessinsider.com/rss",
    },
    FeedSource {
        name: "CNBC",
        url: "https://www.cnbc.com/id/100003114/device/rss/rss.html",
    },
];

/// HTTP client for feed requests.
pub fn feed_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(concat!("finwire/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fetch and normalize every configured source, one at a time.
#[instrument(level = "info", skip_all)]
pub async fn fetch_all(client: &Client) -> Vec<NewsRecord> {
    let mut records = Vec::new();
    for source in RSS_SOURCES {
        match fetch_source(client, source).await {
            Ok(batch) => {
                info!(source = source.name, count = batch.len(), "Fetched feed");
                records.extend(batch);
            }
            Err(e) => {
                error!(source = source.name, error = %e, "Feed fetch failed, skipping source");
            }
        }
    }
    records
}

/// Fetch a single source and normalize its entries.
async fn fetch_source(client: &Client, source: &FeedSource) -> Result<Vec<NewsRecord>, FeedError> {
    let response = client.get(source.url).send().await?.error_for_status()?;
    let body = response.bytes().await?;
    let feed = parser::parse(body.as_ref()).map_err(|e| FeedError::Parse(e.to_string()))?;

    if feed.entries.is_empty() {
        warn!(source = source.name, "Feed contained no entries");
    }

    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| normalize_entry(source.name, entry))
        .collect())
}

/// Normalize one raw feed entry into a [`NewsRecord`].
///
/// Entries without a link cannot be extracted later and are dropped. A
/// missing or unparseable publication date yields a record with no timestamp,
/// not a discarded record.
pub fn normalize_entry(source: &str, entry: Entry) -> Option<NewsRecord> {
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.clone())
        .unwrap_or_default();

    let Some(link) = entry.links.first().map(|l| l.href.clone()) else {
        debug!(%source, %title, "Skipping entry without a link");
        return None;
    };

    let guid = {
        let id = entry.id.trim();
        (!id.is_empty()).then(|| id.to_string())
    };

    Some(NewsRecord {
        source: source.to_string(),
        title,
        link,
        guid,
        published_utc: entry.published,
        description: entry
            .summary
            .map(|s| s.content)
            .unwrap_or_default(),
        content: entry
            .content
            .and_then(|c| c.body)
            .filter(|body| !body.trim().is_empty()),
        summary: None,
        processed: false,
    })
}
