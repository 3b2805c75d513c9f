//! Core domain layer. No external I/O dependencies.
//!
//! Entities, prompt templates and response parsing live here. Dependencies flow inward.

pub mod concept_parser;
pub mod entities;
pub mod errors;
pub mod prompts;

pub use concept_parser::{fallback_concepts, parse_concepts, unwrap_fenced_json};
pub use entities::{
    CONCEPT_COUNT, Concept, DesignRequest, DesignResponse, ImageOutcome, RenderedConcept,
    UseCase, UseCaseInfo,
};
pub use errors::DomainError;
