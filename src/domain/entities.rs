//! Domain entities. Request-scoped data for one design generation.
//!
//! No HTTP/backend types here — adapters map into and out of these.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

/// Number of concepts requested from the text backend.
pub const CONCEPT_COUNT: usize = 3;

/// Design domain selected by the client. Drives prompt templating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    Interior,
    Architecture,
    Construction,
    Event,
}

impl UseCase {
    pub const ALL: [UseCase; 4] = [
        UseCase::Interior,
        UseCase::Architecture,
        UseCase::Construction,
        UseCase::Event,
    ];

    /// Wire identifier (`interior`, `architecture`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            UseCase::Interior => "interior",
            UseCase::Architecture => "architecture",
            UseCase::Construction => "construction",
            UseCase::Event => "event",
        }
    }

    /// Human-readable label shown in the use-case picker.
    pub fn label(self) -> &'static str {
        match self {
            UseCase::Interior => "Interior Design",
            UseCase::Architecture => "Architecture",
            UseCase::Construction => "Construction",
            UseCase::Event => "Event Design",
        }
    }

    /// Short description of what the domain covers.
    pub fn description(self) -> &'static str {
        match self {
            UseCase::Interior => "Layout, style, materials",
            UseCase::Architecture => "Building form, massing, sustainability",
            UseCase::Construction => "Structural systems, phasing",
            UseCase::Event => "Seating, lighting, themes",
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UseCase::ALL
            .into_iter()
            .find(|uc| uc.as_str() == s)
            .ok_or_else(|| DomainError::InvalidRequest(INVALID_USE_CASE_MESSAGE.to_string()))
    }
}

/// Entry of the use-case catalog served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct UseCaseInfo {
    pub id: UseCase,
    pub label: &'static str,
    pub description: &'static str,
}

impl From<UseCase> for UseCaseInfo {
    fn from(uc: UseCase) -> Self {
        Self {
            id: uc,
            label: uc.label(),
            description: uc.description(),
        }
    }
}

pub const MISSING_FIELDS_MESSAGE: &str = "Prompt and use case are required";
pub const INVALID_USE_CASE_MESSAGE: &str =
    "Invalid use case. Expected one of: interior, architecture, construction, event";

/// Validated design brief. Construct via [`DesignRequest::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignRequest {
    pub prompt: String,
    pub use_case: UseCase,
}

impl DesignRequest {
    /// Validate raw client input.
    ///
    /// Whitespace-only prompts count as missing. The trimmed prompt must be at most
    /// `max_prompt_chars` characters.
    pub fn parse(
        prompt: Option<&str>,
        use_case: Option<&str>,
        max_prompt_chars: usize,
    ) -> Result<Self, DomainError> {
        let prompt = prompt.map(str::trim).filter(|p| !p.is_empty());
        let use_case = use_case.map(str::trim).filter(|u| !u.is_empty());
        let (Some(prompt), Some(use_case)) = (prompt, use_case) else {
            return Err(DomainError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string()));
        };

        let use_case: UseCase = use_case.parse()?;

        if prompt.chars().count() > max_prompt_chars {
            return Err(DomainError::InvalidRequest(format!(
                "Prompt must be at most {} characters",
                max_prompt_chars
            )));
        }

        Ok(Self {
            prompt: prompt.to_string(),
            use_case,
        })
    }
}

/// One design idea produced by the text backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_prompt: String,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of one image generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Data URI of the rendered image.
    Rendered(String),
    /// Generation failed; reason is for logs only.
    Failed(String),
}

/// Concept merged with its image outcome. `image_url` absent = image unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedConcept {
    #[serde(flatten)]
    pub concept: Concept,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl RenderedConcept {
    pub fn merge(concept: Concept, outcome: ImageOutcome) -> Self {
        let image_url = match outcome {
            ImageOutcome::Rendered(uri) => Some(uri),
            ImageOutcome::Failed(_) => None,
        };
        Self { concept, image_url }
    }
}

/// Final response of a successful generation. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct DesignResponse {
    pub concepts: Vec<RenderedConcept>,
    /// ISO-8601 generation time.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_case_round_trips_wire_name() {
        for uc in UseCase::ALL {
            assert_eq!(uc.as_str().parse::<UseCase>().unwrap(), uc);
        }
        assert!("garden".parse::<UseCase>().is_err());
        assert!("Interior".parse::<UseCase>().is_err());
    }

    #[test]
    fn test_parse_request_trims_prompt() {
        let req = DesignRequest::parse(Some("  cozy loft  "), Some("interior"), 2000).unwrap();
        assert_eq!(req.prompt, "cozy loft");
        assert_eq!(req.use_case, UseCase::Interior);
    }

    #[test]
    fn test_parse_request_missing_fields() {
        for (prompt, use_case) in [
            (None, Some("interior")),
            (Some("   "), Some("interior")),
            (Some("loft"), None),
            (Some("loft"), Some("")),
        ] {
            match DesignRequest::parse(prompt, use_case, 2000) {
                Err(DomainError::InvalidRequest(msg)) => assert_eq!(msg, MISSING_FIELDS_MESSAGE),
                other => panic!("expected InvalidRequest, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_request_unknown_use_case() {
        match DesignRequest::parse(Some("loft"), Some("garden"), 2000) {
            Err(DomainError::InvalidRequest(msg)) => assert_eq!(msg, INVALID_USE_CASE_MESSAGE),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_request_prompt_too_long() {
        let long = "é".repeat(11);
        assert!(DesignRequest::parse(Some(&long), Some("event"), 10).is_err());
        let exact = "é".repeat(10);
        assert!(DesignRequest::parse(Some(&exact), Some("event"), 10).is_ok());
    }

    #[test]
    fn test_concept_defaults_missing_fields() {
        let c: Concept = serde_json::from_str(r#"{"title": "A", "highlights": null}"#).unwrap();
        assert_eq!(c.title, "A");
        assert!(c.summary.is_empty());
        assert!(c.highlights.is_empty());
        assert!(c.image_prompt.is_empty());
    }

    #[test]
    fn test_concept_null_strings_default() {
        let c: Concept = serde_json::from_str(
            r#"{"title": null, "summary": null, "highlights": ["h"], "imagePrompt": null}"#,
        )
        .unwrap();
        assert!(c.title.is_empty());
        assert!(c.summary.is_empty());
        assert_eq!(c.highlights, vec!["h".to_string()]);
        assert!(c.image_prompt.is_empty());
    }

    #[test]
    fn test_rendered_concept_omits_missing_image() {
        let concept = Concept {
            title: "A".into(),
            summary: "B".into(),
            highlights: vec!["h".into()],
            image_prompt: "p".into(),
        };
        let failed = RenderedConcept::merge(concept.clone(), ImageOutcome::Failed("x".into()));
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["imagePrompt"], "p");
        assert!(json.get("imageUrl").is_none());

        let ok = RenderedConcept::merge(concept, ImageOutcome::Rendered("data:x".into()));
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["imageUrl"], "data:x");
    }
}
