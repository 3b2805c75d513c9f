//! Outbound ports. Application calls into the AI backends.
//!
//! Implemented by adapters.

use crate::domain::DomainError;

/// Text generation backend. One call per design request.
#[async_trait::async_trait]
pub trait TextGenerationPort: Send + Sync {
    /// Send the templated instruction and return the model's raw reply text.
    ///
    /// Transport, auth and non-2xx failures map to `DomainError::UpstreamText`.
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError>;
}

/// Image generation backend. One call per concept.
#[async_trait::async_trait]
pub trait ImageGenerationPort: Send + Sync {
    /// Render `prompt` and return the encoded image bytes (PNG).
    ///
    /// Any failure maps to `DomainError::Image`; callers decide whether it is fatal.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, DomainError>;
}
