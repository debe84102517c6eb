//! Completion endpoint client.
//!
//! The demo talks to a plain text-completion endpoint: prompt in, first
//! choice text out. The request/response contract is fixed — `{model,
//! prompt, max_tokens}` against `POST {base_url}/completions` — and
//! everything else about the endpoint is its own business. Timeout policy
//! lives in the HTTP client, not in the loop.

use async_trait::async_trait;
use seedcall_config::RunConfig;
use seedcall_core::error::ModelError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// The seam the workflow driver calls through. Tests substitute a scripted
/// implementation; production uses [`HttpCompletionBackend`].
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send a rendered prompt, return the model's raw output text.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

/// HTTP client for an OpenAI-style `/completions` endpoint.
pub struct HttpCompletionBackend {
    config: Arc<RunConfig>,
    client: reqwest::Client,
}

impl HttpCompletionBackend {
    pub fn new(config: Arc<RunConfig>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let url = format!(
            "{}/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let body = serde_json::json!({
            "model": self.config.model_name,
            "prompt": prompt,
            "max_tokens": self.config.max_tokens,
        });

        debug!(model = %self.config.model_name, url = %url, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(e.to_string())
                } else {
                    ModelError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ModelError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ModelError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Endpoint returned error");
            return Err(ModelError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ModelError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        // An empty choices array is a valid (empty) answer, not an error.
        let text = api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.text.trim().to_string())
            .unwrap_or_default();

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_takes_first_choice_trimmed() {
        let raw = r#"{"choices": [{"text": "  hello  "}, {"text": "ignored"}]}"#;
        let parsed: ApiResponse = serde_json::from_str(raw).unwrap();
        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text.trim().to_string())
            .unwrap_or_default();
        assert_eq!(text, "hello");
    }

    #[test]
    fn empty_choices_yield_empty_text() {
        let parsed: ApiResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn missing_choices_field_tolerated() {
        let parsed: ApiResponse = serde_json::from_str(r#"{"id": "cmpl-1"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn backend_builds_from_config() {
        let backend = HttpCompletionBackend::new(Arc::new(RunConfig::default()));
        assert_eq!(backend.config.base_url, "http://localhost:8080/v1");
    }
}
