//! Business Insider article extraction.
//!
//! Insider serves the full article text in a JSON-LD `<script>` block as the
//! `articleBody` field, which is far more stable than its rendered markup.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static JSON_LD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

pub fn matches(url: &str) -> bool {
    url.contains("businessinsider.com")
}

/// Extract `articleBody` from the first JSON-LD block that carries one.
pub fn parse(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    for script in document.select(&JSON_LD) {
        let raw = script.text().collect::<String>();
        let Ok(data) = serde_json::from_str::<serde_json::Value>(&raw) else {
            continue;
        };
        if let Some(body) = data.get("articleBody").and_then(|b| b.as_str()) {
            let body = body.trim();
            if !body.is_empty() {
                return Some(body.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_article_body_from_json_ld() {
        let html = r#"
            <html><head>
              <script type="application/ld+json">
                {"@type": "NewsArticle", "articleBody": "Tech stocks slid on Tuesday."}
              </script>
            </head></html>"#;
        assert_eq!(parse(html).as_deref(), Some("Tech stocks slid on Tuesday."));
    }

    #[test]
    fn skips_blocks_without_article_body() {
        let html = r#"
            <script type="application/ld+json">{"@type": "BreadcrumbList"}</script>
            <script type="application/ld+json">{"articleBody": "The real story."}</script>"#;
        assert_eq!(parse(html).as_deref(), Some("The real story."));
    }

    #[test]
    fn malformed_json_is_structural_mismatch() {
        let html = r#"<script type="application/ld+json">{not json</script>"#;
        assert!(parse(html).is_none());
    }

    #[test]
    fn missing_script_is_structural_mismatch() {
        assert!(parse("<div><p>Plain page.</p></div>").is_none());
    }

    #[test]
    fn matches_insider_domain() {
        assert!(matches("https://www.businessinsider.com/story-2025-6"));
        assert!(!matches("https://www.example.com/businessoutsider"));
    }
}
