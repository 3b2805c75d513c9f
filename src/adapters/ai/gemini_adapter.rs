//! Gemini adapter for design concept text generation.
//!
//! Talks to the Generative Language `models/{model}:generateContent` endpoint.
//! Returns the model's reply text untouched; fence stripping and JSON parsing
//! happen in the domain layer.

use crate::domain::DomainError;
use crate::ports::TextGenerationPort;
use crate::shared::config::TextBackendSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Gemini text generation adapter.
pub struct GeminiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// # Arguments
    /// * `settings` - API base URL (e.g. "https://generativelanguage.googleapis.com/v1beta"), key, model
    /// * `timeout` - Per-call HTTP timeout
    pub fn new(settings: &TextBackendSettings, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Internal(format!("HTTP client build failed: {}", e)))?;
        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }
}

/// generateContent request structure.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

/// generateContent response structure.
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[async_trait::async_trait]
impl TextGenerationPort for GeminiAdapter {
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError> {
        info!(
            model = %self.model,
            prompt_len = prompt.len(),
            "requesting design concepts from text backend"
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.8 },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::UpstreamText(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "text backend returned error");
            return Err(DomainError::UpstreamText(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            DomainError::UpstreamText(format!("Failed to parse API response: {}", e))
        })?;

        // Replies may be split across parts; join them.
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .ok_or_else(|| DomainError::UpstreamText("No candidates returned".to_string()))?;

        debug!(raw_len = text.len(), "received text backend response");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> GeminiAdapter {
        let settings = TextBackendSettings {
            api_key: "test-key".into(),
            api_url: server.uri(),
            model: "gemini-test".into(),
        };
        GeminiAdapter::new(&settings, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_text_joins_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "make concepts"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"parts": [{"text": "```json\n{\"concepts\":"}, {"text": " []}\n```"}]}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = adapter(&server).generate_text("make concepts").await.unwrap();
        assert_eq!(text, "```json\n{\"concepts\": []}\n```");
    }

    #[tokio::test]
    async fn test_generate_text_maps_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        match adapter(&server).generate_text("x").await {
            Err(DomainError::UpstreamText(msg)) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("quota exceeded"));
            }
            other => panic!("expected UpstreamText, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_text_without_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        assert!(matches!(
            adapter(&server).generate_text("x").await,
            Err(DomainError::UpstreamText(_))
        ));
    }
}
