//! # finwire
//!
//! A financial-news aggregation pipeline that pulls entries from a fixed set
//! of RSS feeds, merges them into a persistent deduplicated archive, scrapes
//! full article bodies with publisher-specific extraction rules, and
//! optionally generates a bullet-point summary of each article through the
//! DeepSeek API.
//!
//! ## Usage
//!
//! ```sh
//! finwire --data-dir ./data --window-hours 24
//! ```
//!
//! ## Architecture
//!
//! Each invocation is one sequential run:
//! 1. **Fetch**: pull entries from every configured feed
//! 2. **Merge**: deduplicate the batch into the on-disk archive (last wins)
//! 3. **Scan**: select unprocessed records inside the recency window
//! 4. **Extract**: dispatch each record to its publisher's extractor
//! 5. **Summarize**: best-effort bullet digest for extracted bodies
//! 6. **Persist**: apply updates and atomically rewrite the archive
//!
//! Callers serialize runs externally (e.g. cron); the archive has no
//! concurrent-writer story by design.

use chrono::Duration;
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod archive;
mod cli;
mod errors;
mod feeds;
mod models;
mod pipeline;
mod scrapers;
mod summarizer;
mod utils;

use cli::Cli;
use pipeline::Pipeline;
use scrapers::SiteExtractors;
use summarizer::DeepSeekClient;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("finwire starting up");

    let args = Cli::parse();
    debug!(?args.data_dir, args.window_hours, args.skip_summaries, "Parsed CLI arguments");

    // Early check: the data directory must be writable, since a failed
    // archive save aborts the whole run.
    if let Err(e) = ensure_writable_dir(&args.data_dir).await {
        error!(
            path = %args.data_dir,
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    if args.deepseek_api_key.is_none() && !args.skip_summaries {
        warn!("DEEPSEEK_API_KEY not set; summaries will be skipped for this run");
    }

    let summarizer = DeepSeekClient::new(args.deepseek_api_key)?;
    let extractors = SiteExtractors::new()?;
    let feed_client = feeds::feed_client()?;

    let pipeline = Pipeline::new(
        PathBuf::from(&args.data_dir),
        Duration::hours(args.window_hours),
        !args.skip_summaries,
        extractors,
        summarizer,
    );

    let report = match pipeline.run(&feed_client).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Archive persistence failed; aborting run");
            return Err(e.into());
        }
    };

    for link in &report.processed {
        info!(%link, "Newly processed");
    }

    let elapsed = start_time.elapsed();
    info!(
        fetched = report.fetched,
        archived = report.archived,
        selected = report.selected,
        processed = report.processed.len(),
        summarized = report.summarized,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
