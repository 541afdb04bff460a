//! Command-line interface definitions.
//!
//! All options can be provided via command-line flags; the API credential can
//! also come from the process environment.

use clap::Parser;

/// Command-line arguments for one pipeline run.
///
/// # Examples
///
/// ```sh
/// # Default 24-hour reprocessing window
/// finwire --data-dir ./data
///
/// # Tighter window, no summaries
/// finwire --data-dir ./data --window-hours 4 --skip-summaries
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the archive, TSV export and per-run snapshots
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Reprocessing window in hours: only unprocessed records published
    /// within this many hours are re-evaluated
    #[arg(short, long, default_value_t = 24)]
    pub window_hours: i64,

    /// Skip summary generation entirely (extraction still runs)
    #[arg(long)]
    pub skip_summaries: bool,

    /// DeepSeek API key; when absent, summarization degrades to always-fail
    /// instead of aborting the run
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub deepseek_api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&["finwire"]);
        assert_eq!(cli.data_dir, "data");
        assert_eq!(cli.window_hours, 24);
        assert!(!cli.skip_summaries);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(&[
            "finwire",
            "--data-dir",
            "/tmp/news",
            "--window-hours",
            "4",
            "--skip-summaries",
        ]);
        assert_eq!(cli.data_dir, "/tmp/news");
        assert_eq!(cli.window_hours, 4);
        assert!(cli.skip_summaries);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(&["finwire", "-d", "/tmp/news", "-w", "4"]);
        assert_eq!(cli.data_dir, "/tmp/news");
        assert_eq!(cli.window_hours, 4);
    }
}
