//! Yahoo Finance article extraction.
//!
//! Article bodies live in a `div.body` container (Yahoo appends a hashed
//! `yf-*` class that changes between deployments, so only the stable class is
//! matched); older pages used `div.caas-body`. Syndicated Bloomberg pieces
//! end with a "Most Read from Bloomberg" link block that is stripped.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("div.body").unwrap());
static LEGACY_BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("div.caas-body").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

static BLOOMBERG_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Most Read from Bloomberg Businessweek[\s\S]*$").unwrap());
static BLOOMBERG_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Most Read from Bloomberg(?:\n.*){0,5}").unwrap());

/// Article-path prefixes for Yahoo Finance news stories.
pub fn matches(url: &str) -> bool {
    url.starts_with("https://finance.yahoo.com/news/")
        || url.starts_with("http://finance.yahoo.com/news/")
}

/// Extract the article body, or `None` when the content container is absent.
pub fn parse(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let container = document
        .select(&BODY)
        .next()
        .or_else(|| document.select(&LEGACY_BODY).next())?;

    let body = container
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let cleaned = BLOOMBERG_TAIL.replace(&body, "");
    let cleaned = BLOOMBERG_BLOCK.replace(&cleaned, "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}
