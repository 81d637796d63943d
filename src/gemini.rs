//! Gemini `generateContent` client.
//!
//! One non-streaming request per run:
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! No retries. Transport-level behaviour is whatever reqwest provides.

use std::env;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::GeminiError;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Public Gemini API root.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default request timeout (2 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "PRNOTES_GEMINI_TIMEOUT";

/// Maximum characters of an error body kept in errors and logs.
const SNIPPET_LEN: usize = 500;

/// Get the configured timeout duration.
///
/// Reads from PRNOTES_GEMINI_TIMEOUT if set, otherwise uses the default of
/// 120 seconds. Logs a warning if the variable holds an invalid value.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Token counters reported by Gemini. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u64>,
    #[serde(default)]
    pub candidates_token_count: Option<u64>,
    #[serde(default)]
    pub total_token_count: Option<u64>,
}

/// Generated text plus optional usage counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub usage: Option<UsageMetadata>,
}

/// Trait for turning a prompt into release notes.
///
/// This abstraction allows mocking the model in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation, GeminiError>;
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Thin client for Gemini's REST API.
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    url: String,
}

impl GeminiClient {
    /// Build a client for `model` at the public endpoint.
    pub fn new(api_key: &str, model: &str) -> Result<Self, GeminiError> {
        Self::with_endpoint(api_key, model, DEFAULT_ENDPOINT)
    }

    /// Build a client against a custom API root (proxies, tests).
    pub fn with_endpoint(api_key: &str, model: &str, endpoint: &str) -> Result<Self, GeminiError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        let endpoint = endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(GeminiError::InvalidEndpoint(endpoint.to_string()));
        }

        let mut headers = header::HeaderMap::new();
        let mut key = header::HeaderValue::from_str(api_key)
            .map_err(|_| GeminiError::InvalidApiKey)?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .timeout(get_timeout())
            .default_headers(headers)
            .build()?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            model
        );

        info!(model = %model, "Gemini client initialized");

        Ok(Self {
            client,
            model: model.to_string(),
            url,
        })
    }
}

#[async_trait]
impl NotesGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Generation, GeminiError> {
        let started = Instant::now();
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "POST {}", self.url);

        let resp = self.client.post(&self.url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(SNIPPET_LEN).collect();

            error!(
                %status,
                %snippet,
                model = %self.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(GeminiError::HttpStatus {
                status: status.as_u16(),
                snippet,
            });
        }

        let out: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GeminiError::Decode(e.to_string()))?;

        let text = out.text().ok_or(GeminiError::EmptyResponse)?;

        info!(
            model = %self.model,
            latency_ms = started.elapsed().as_millis(),
            "generation completed"
        );

        Ok(Generation {
            text,
            usage: out.usage_metadata,
        })
    }
}

/// Render the token-usage block printed after generation.
///
/// Missing and zero counters both print as `N/A`.
pub fn format_token_usage(usage: Option<&UsageMetadata>) -> String {
    fn count(v: Option<u64>) -> String {
        v.filter(|n| *n > 0)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    match usage {
        Some(u) => format!(
            "=== Token Usage Information ===\n\
             Prompt tokens: {}\n\
             Completion tokens: {}\n\
             Total tokens: {}\n\
             ===============================",
            count(u.prompt_token_count),
            count(u.candidates_token_count),
            count(u.total_token_count),
        ),
        None => "Token usage information not available".to_string(),
    }
}

/// Print token usage to the job log.
pub fn log_token_usage(usage: Option<&UsageMetadata>) {
    println!("{}", format_token_usage(usage));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_timeout_default() {
        temp_env::with_var_unset(TIMEOUT_ENV_VAR, || {
            assert_eq!(get_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        });
    }

    #[test]
    fn test_get_timeout_custom() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("30"), || {
            assert_eq!(get_timeout(), Duration::from_secs(30));
        });
    }

    #[test]
    fn test_get_timeout_invalid_falls_back() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("soon"), || {
            assert_eq!(get_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        });
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            GeminiClient::new("  ", DEFAULT_MODEL),
            Err(GeminiError::MissingApiKey)
        ));
    }

    #[test]
    fn test_api_key_with_control_characters_rejected() {
        assert!(matches!(
            GeminiClient::new("abc\u{7f}def", DEFAULT_MODEL),
            Err(GeminiError::InvalidApiKey)
        ));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(matches!(
            GeminiClient::with_endpoint("key", DEFAULT_MODEL, "ftp://example.com"),
            Err(GeminiError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_url_includes_model() {
        let client = GeminiClient::with_endpoint("key", "gemini-test", "http://localhost:1/").unwrap();
        assert_eq!(
            client.url,
            "http://localhost:1/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "## 要約\n"}, {"text": "- a"}], "role": "model"}}],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        });
        let resp: GenerateContentResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.text().unwrap(), "## 要約\n- a");
        assert_eq!(resp.usage_metadata.unwrap().total_token_count, Some(15));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(resp.text().is_none());
    }

    #[test]
    fn test_format_token_usage() {
        let usage = UsageMetadata {
            prompt_token_count: Some(120),
            candidates_token_count: None,
            total_token_count: Some(300),
        };
        let text = format_token_usage(Some(&usage));
        assert!(text.contains("Prompt tokens: 120"));
        assert!(text.contains("Completion tokens: N/A"));
        assert!(text.contains("Total tokens: 300"));
        assert_eq!(format_token_usage(None), "Token usage information not available");
    }

    #[test]
    fn test_format_token_usage_zero_is_not_available() {
        let usage = UsageMetadata {
            prompt_token_count: Some(0),
            candidates_token_count: Some(7),
            total_token_count: Some(7),
        };
        let text = format_token_usage(Some(&usage));
        assert!(text.contains("Prompt tokens: N/A"));
        assert!(text.contains("Completion tokens: 7"));
    }
}
