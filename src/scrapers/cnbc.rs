//! CNBC article extraction.
//!
//! Bodies live under `ArticleBody-articleBody` (a `div` on current pages, an
//! `article` on older ones). Many stories carry a "key points" bullet list in
//! a `RenderKeyPoints-list` block; when present it is prepended to the body.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static BODY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.ArticleBody-articleBody, article.ArticleBody-articleBody").unwrap()
});
static KEY_POINTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.RenderKeyPoints-list li").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// CNBC article URLs carry a dated path (`/2025/...`), which distinguishes
/// stories from section pages.
pub fn matches(url: &str) -> bool {
    url.contains("cnbc.com/202")
}

/// Extract the article body, with the key-points list prepended when present.
pub fn parse(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let container = document.select(&BODY).next()?;

    let body = container
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if body.is_empty() {
        return None;
    }

    let key_points = document
        .select(&KEY_POINTS)
        .map(|li| li.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>();

    if key_points.is_empty() {
        Some(body)
    } else {
        Some(format!("Key points:\n{}\n\n{}", key_points.join("\n"), body))
    }
}
