//! AI adapter module. Implements the text and image generation ports.
//!
//! Provides the Gemini text adapter, an inference-API image adapter and mock adapters for testing.

pub mod gemini_adapter;
pub mod image_adapter;
pub mod mock_adapter;

pub use gemini_adapter::GeminiAdapter;
pub use image_adapter::InferenceImageAdapter;
pub use mock_adapter::{MockImageAdapter, MockTextAdapter};
