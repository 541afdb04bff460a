//! Bullet-point summary generation through the DeepSeek chat API.
//!
//! Summarization is strictly best-effort: every failure here leaves the
//! record's `summary` empty and nothing else. A missing API credential
//! degrades the client to always-fail instead of crashing the pipeline.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::errors::SummarizeError;
use crate::utils::truncate_for_log;

/// Articles shorter than this are skipped locally, without ever calling the
/// external service.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Minimum pause between consecutive summarization calls, to respect the
/// service's rate limits.
pub const INTER_CALL_DELAY: Duration = Duration::from_millis(500);

const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";
const MODEL: &str = "deepseek-chat";

const SYSTEM_PROMPT: &str = "You are a financial news editor. Summarize the article \
into three to five short bullet points in English. Output only the bullet points, \
one per line, each starting with \"- \".";

/// Summary generation seam: article text in, bullet-point digest or a
/// categorized failure out.
pub trait Summarize {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

/// DeepSeek-backed summarizer using the OpenAI-compatible chat endpoint.
pub struct DeepSeekClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl DeepSeekClient {
    /// Build a client. `api_key` comes from the environment; `None` yields a
    /// client whose every call reports [`SummarizeError::MissingCredentials`].
    pub fn new(api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            client,
        })
    }

    /// Point the client at a different OpenAI-compatible endpoint.
    #[allow(dead_code)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Summarize for DeepSeekClient {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SummarizeError::MissingCredentials);
        };
        debug!(chars = text.len(), "Requesting summary");

        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            max_tokens: 512,
            temperature: 0.3,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Service {
                status,
                body: truncate_for_log(&body, 300),
            });
        }

        let raw = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| SummarizeError::Malformed(e.to_string()))?;

        let digest = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        let digest = digest.trim();
        if digest.is_empty() {
            return Err(SummarizeError::Malformed("empty completion".to_string()));
        }

        debug!(chars = digest.len(), "Received summary");
        Ok(digest.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credentials_fail_without_network() {
        let client = DeepSeekClient::new(None).unwrap();
        let result = client.summarize("long enough article text").await;
        assert!(matches!(result, Err(SummarizeError::MissingCredentials)));
    }

    #[test]
    fn request_carries_bounded_parameters() {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![Message {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            }],
            max_tokens: 512,
            temperature: 0.3,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""max_tokens":512"#));
        assert!(json.contains(r#""temperature":0.3"#));
        assert!(json.contains(r#""role":"system""#));
    }

    #[test]
    fn response_content_is_extracted() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"- point one\n- point two"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content,
            "- point one\n- point two"
        );
    }

    #[test]
    fn empty_choices_parse_but_yield_nothing() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
