//! Mock AI adapters for testing without API calls.
//!
//! Return scripted responses and count calls so tests can assert whether the
//! backends were reached at all.

use crate::domain::DomainError;
use crate::ports::{ImageGenerationPort, TextGenerationPort};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Minimal PNG signature used as fake image payload.
pub const MOCK_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Scripted reply of the mock text backend.
#[derive(Debug, Clone)]
enum TextReply {
    Text(String),
    Fail(String),
}

/// Mock text backend.
pub struct MockTextAdapter {
    reply: TextReply,
    delay_ms: u64,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockTextAdapter {
    /// Reply with three well-formed concepts wrapped in a JSON fence.
    pub fn new() -> Self {
        Self::with_response(sample_concepts_json())
    }

    /// Reply with `text` verbatim.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            reply: TextReply::Text(text.into()),
            delay_ms: 0,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with `UpstreamText(reason)`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            reply: TextReply::Fail(reason.into()),
            ..Self::with_response("")
        }
    }

    /// Simulate network latency.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Default for MockTextAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TextGenerationPort for MockTextAdapter {
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        info!(prompt_len = prompt.len(), "[MOCK] Simulating text generation");

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        match &self.reply {
            TextReply::Text(text) => Ok(text.clone()),
            TextReply::Fail(reason) => Err(DomainError::UpstreamText(reason.clone())),
        }
    }
}

/// Mock image backend. Fails for prompts containing any configured marker.
pub struct MockImageAdapter {
    fail_markers: Vec<String>,
    delay_ms: u64,
    calls: AtomicUsize,
}

impl MockImageAdapter {
    pub fn new() -> Self {
        Self {
            fail_markers: Vec::new(),
            delay_ms: 0,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail for every prompt containing `marker`.
    pub fn failing_when_contains(mut self, marker: impl Into<String>) -> Self {
        self.fail_markers.push(marker.into());
        self
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockImageAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ImageGenerationPort for MockImageAdapter {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        info!(prompt_len = prompt.len(), "[MOCK] Simulating image generation");

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        if self.fail_markers.iter().any(|m| prompt.contains(m.as_str())) {
            return Err(DomainError::Image("[MOCK] simulated backend failure".to_string()));
        }
        Ok(MOCK_PNG.to_vec())
    }
}

/// Three distinct interior concepts in the shape the text backend is asked for.
pub fn sample_concepts_json() -> String {
    r#"```json
{
  "concepts": [
    {
      "title": "The Nordic Light Workspace",
      "summary": "A serene Scandinavian-inspired space combining living and working areas with natural materials and abundant light.",
      "highlights": ["Integrated oak desk", "Hidden storage solutions", "Wool and linen textiles", "Natural lighting optimization"],
      "imagePrompt": "Scandinavian living room with an integrated oak desk by a large window"
    },
    {
      "title": "Minimal Zen Office Haven",
      "summary": "Clean lines and neutral tones create a peaceful environment perfect for focus and relaxation.",
      "highlights": ["Built-in shelving", "Japanese-inspired elements", "Sustainable bamboo flooring", "Flexible workspace zones"],
      "imagePrompt": "Japanese minimalist home office with bamboo flooring and built-in shelving"
    },
    {
      "title": "Hygge Home Studio",
      "summary": "Cozy Danish design principles create an inviting space that balances productivity with comfort.",
      "highlights": ["Warm wood accents", "Soft ambient lighting", "Modular furniture", "Indoor plants integration"],
      "imagePrompt": "Cozy Danish studio with warm wood accents, soft lamps and indoor plants"
    }
  ]
}
```"#
        .to_string()
}
