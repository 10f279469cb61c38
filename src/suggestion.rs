//! Client for the generative-text endpoint behind the AI panel.
//!
//! `get_suggestion` never fails: every error is logged and replaced with
//! [`FALLBACK_SUGGESTION`] so the panel always leaves its loading state.

use futures_util::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Settings;
use crate::error::SuggestionError;

pub const FALLBACK_SUGGESTION: &str = "No response from AI.";

/// Number of hostnames mentioned in the wellbeing prompt
pub const WELLBEING_TOP_HOSTNAMES: usize = 3;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

impl GenerateResponse {
    /// Text at `candidates[0].content.parts[0].text`, if non-empty
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

/// Pull the completion out of a raw response body
pub fn parse_completion(body: &str) -> Result<String, SuggestionError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| SuggestionError::Parse(e.to_string()))?;

    response
        .first_text()
        .map(str::to_string)
        .ok_or(SuggestionError::EmptyCompletion)
}

/// Displayable text for a suggestion outcome; errors become the fallback
fn or_fallback(result: Result<String, SuggestionError>) -> String {
    result.unwrap_or_else(|e| {
        log::warn!("Suggestion unavailable: {}", e);
        FALLBACK_SUGGESTION.to_string()
    })
}

/// Endpoint URL carrying the API key as a query parameter
pub fn request_url(endpoint: &str, api_key: &str) -> Result<Url, SuggestionError> {
    Url::parse_with_params(endpoint, &[("key", api_key)])
        .map_err(|e| SuggestionError::Endpoint(e.to_string()))
}

/// Prompt asking for a short wellbeing tip based on the open tabs
pub fn wellbeing_prompt(tab_count: usize, top_hostnames: &[(String, usize)]) -> String {
    let sites = if top_hostnames.is_empty() {
        "none in particular".to_string()
    } else {
        top_hostnames
            .iter()
            .map(|(hostname, count)| format!("{} ({} tabs)", hostname, count))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "I currently have {} browser tabs open. The sites I have open most are: {}. \
         In no more than 2 sentences, suggest one thing I could do right now to stay \
         focused and look after my wellbeing.",
        tab_count, sites
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionClient {
    endpoint: String,
    api_key: Option<String>,
    timeout_ms: u32,
}

impl SuggestionClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout_ms: u32) -> Self {
        SuggestionClient {
            endpoint: endpoint.into(),
            api_key,
            timeout_ms,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        SuggestionClient::new(
            settings.endpoint.clone(),
            settings.api_key.clone(),
            settings.request_timeout_ms,
        )
    }

    /// Send one prompt; always resolves to displayable text
    pub async fn get_suggestion(&self, prompt: &str) -> String {
        or_fallback(self.try_suggestion(prompt).await)
    }

    pub async fn try_suggestion(&self, prompt: &str) -> Result<String, SuggestionError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SuggestionError::MissingApiKey)?;
        let url = request_url(&self.endpoint, api_key.trim())?;

        // json() also sets Content-Type: application/json
        let request = Request::post(url.as_str())
            .json(&GenerateRequest::from_prompt(prompt))
            .map_err(|e| SuggestionError::Transport(e.to_string()))?;

        let exchange = Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| SuggestionError::Transport(e.to_string()))?;
            log::debug!("suggestion endpoint answered {}", response.status());
            response
                .text()
                .await
                .map_err(|e| SuggestionError::Transport(e.to_string()))
        });

        let deadline = Box::pin(TimeoutFuture::new(self.timeout_ms));

        let body = match select(exchange, deadline).await {
            Either::Left((body, _)) => body?,
            Either::Right(((), _)) => return Err(SuggestionError::Timeout(self.timeout_ms)),
        };

        parse_completion(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::from_prompt("hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [{ "text": "Take a short walk." }], "role": "model" } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ],
            "usageMetadata": { "totalTokenCount": 12 }
        }"#;

        assert_eq!(parse_completion(body), Ok("Take a short walk.".to_string()));
        assert_eq!(or_fallback(parse_completion(body)), "Take a short walk.");
    }

    #[test]
    fn test_missing_candidates_falls_back() {
        let body = r#"{ "error": { "code": 400, "message": "API key not valid" } }"#;

        assert_eq!(parse_completion(body), Err(SuggestionError::EmptyCompletion));
        assert_eq!(or_fallback(parse_completion(body)), "No response from AI.");
    }

    #[test]
    fn test_malformed_or_partial_bodies_fall_back() {
        for body in [
            "",
            "<html>502 Bad Gateway</html>",
            r#"{ "candidates": [] }"#,
            r#"{ "candidates": [{}] }"#,
            r#"{ "candidates": [{ "content": { "parts": [] } }] }"#,
            r#"{ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }"#,
        ] {
            assert_eq!(
                or_fallback(parse_completion(body)),
                FALLBACK_SUGGESTION,
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_request_url_embeds_key() {
        let url = request_url(
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent",
            "abc 123",
        )
        .unwrap();

        assert_eq!(url.host_str(), Some("generativelanguage.googleapis.com"));
        assert_eq!(url.query(), Some("key=abc+123"));
    }

    #[test]
    fn test_request_url_rejects_bad_endpoint() {
        assert!(matches!(
            request_url("not an endpoint", "key"),
            Err(SuggestionError::Endpoint(_))
        ));
    }

    #[test]
    fn test_wellbeing_prompt() {
        let prompt = wellbeing_prompt(
            12,
            &[("github.com".to_string(), 5), ("docs.rs".to_string(), 3)],
        );

        assert!(prompt.starts_with("I currently have 12 browser tabs open."));
        assert!(prompt.contains("github.com (5 tabs), docs.rs (3 tabs)"));
        assert!(prompt.contains("no more than 2 sentences"));
    }

    #[test]
    fn test_wellbeing_prompt_without_hostnames() {
        assert!(wellbeing_prompt(0, &[]).contains("none in particular"));
    }

    #[test]
    fn test_client_from_settings() {
        let settings = Settings {
            api_key: Some("secret".to_string()),
            ..Settings::default()
        };
        let client = SuggestionClient::from_settings(&settings);

        assert_eq!(
            client,
            SuggestionClient::new(settings.endpoint.clone(), Some("secret".to_string()), 15_000)
        );
    }

    #[test]
    fn test_missing_api_key_falls_back() {
        let client = SuggestionClient::new(DEFAULT_ENDPOINT, None, 15_000);

        assert_eq!(block_on(client.get_suggestion("hello")), FALLBACK_SUGGESTION);
        assert_eq!(
            block_on(client.try_suggestion("hello")),
            Err(SuggestionError::MissingApiKey)
        );
    }

    #[test]
    fn test_blank_api_key_falls_back() {
        let client = SuggestionClient::new(DEFAULT_ENDPOINT, Some("  ".to_string()), 15_000);

        assert_eq!(block_on(client.get_suggestion("hello")), FALLBACK_SUGGESTION);
        assert_eq!(
            block_on(client.try_suggestion("hello")),
            Err(SuggestionError::MissingApiKey)
        );
    }
}
