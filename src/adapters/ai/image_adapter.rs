//! Image generation adapter for Hugging Face style inference endpoints.
//!
//! `POST {url}` with a bearer key and `{"inputs": prompt}`; the reply body is the
//! raw image.

use crate::domain::DomainError;
use crate::ports::ImageGenerationPort;
use crate::shared::config::ImageBackendSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub struct InferenceImageAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl InferenceImageAdapter {
    pub fn new(settings: &ImageBackendSettings, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Internal(format!("HTTP client build failed: {}", e)))?;
        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Error body returned by the inference API, e.g. `{"error": "Model is loading"}`.
#[derive(Deserialize)]
struct InferenceError {
    error: String,
}

/// Prefer the backend's `error` field; fall back to a truncated raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<InferenceError>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.chars().take(200).collect())
}

#[async_trait::async_trait]
impl ImageGenerationPort for InferenceImageAdapter {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, DomainError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("Accept", "image/png")
            .json(&InferenceRequest { inputs: prompt })
            .send()
            .await
            .map_err(|e| DomainError::Image(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let detail = error_detail(&text);
            warn!(status = %status, detail = %detail, "image backend returned error");
            return Err(DomainError::Image(format!("API error {}: {}", status, detail)));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            let text = response.text().await.unwrap_or_default();
            warn!(content_type = %content_type, "image backend returned a non-image body");
            return Err(DomainError::Image(format!(
                "unexpected content type '{}': {}",
                content_type,
                error_detail(&text)
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::Image(format!("Failed to read image body: {}", e)))?;
        if bytes.is_empty() {
            return Err(DomainError::Image("empty image body".to_string()));
        }

        debug!(bytes = bytes.len(), "received image");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> InferenceImageAdapter {
        let settings = ImageBackendSettings {
            api_key: "img-key".into(),
            api_url: format!("{}/models/sdxl", server.uri()),
        };
        InferenceImageAdapter::new(&settings, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_image_returns_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer img-key"))
            .and(body_json(serde_json::json!({"inputs": "a loft"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let bytes = adapter(&server).generate_image("a loft").await.unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_generate_image_surfaces_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": "Model is currently loading",
                "estimated_time": 20.0
            })))
            .mount(&server)
            .await;

        match adapter(&server).generate_image("a loft").await {
            Err(DomainError::Image(msg)) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("Model is currently loading"));
            }
            other => panic!("expected Image error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_image_rejects_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(Vec::<u8>::new(), "image/png"))
            .mount(&server)
            .await;

        assert!(matches!(
            adapter(&server).generate_image("a loft").await,
            Err(DomainError::Image(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_image_rejects_non_image_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": "Model is currently loading"
            })))
            .mount(&server)
            .await;

        match adapter(&server).generate_image("a loft").await {
            Err(DomainError::Image(msg)) => {
                assert!(msg.contains("application/json"));
                assert!(msg.contains("Model is currently loading"));
            }
            other => panic!("expected Image error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_detail_falls_back_to_raw_body() {
        assert_eq!(error_detail("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_detail(r#"{"error": "Invalid token"}"#), "Invalid token");
    }
}
