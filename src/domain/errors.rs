//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Client input is missing or malformed. The message is safe to show to the caller.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Text generation failed: {0}")]
    UpstreamText(String),

    /// Text backend returned valid JSON without any concepts.
    #[error("Text generation returned no concepts")]
    EmptyGenerationResult,

    /// Local to one concept; never escalated to a request failure.
    #[error("Image generation failed: {0}")]
    Image(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
