//! Turns free-form text backend output into concepts.
//!
//! Models often wrap JSON in markdown fences or add prose around it. Unparseable
//! output is replaced by a deterministic fallback set; valid JSON without concepts
//! is an error.

use super::entities::{CONCEPT_COUNT, Concept, UseCase};
use super::errors::DomainError;
use serde::Deserialize;
use tracing::warn;

const FENCE: &str = "```";

/// Strip markdown code fences and surrounding prose.
///
/// Handles no fence, a bare fence, a labeled fence (`json`, `JSON`, ...), a missing
/// closing fence, prose around a fenced block, and text before/after a single
/// unfenced JSON object. Only the first fenced block is used.
pub fn unwrap_fenced_json(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(open) = trimmed.find(FENCE) {
        // Skip the language label, if any.
        let body = trimmed[open + FENCE.len()..]
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        let body = match body.find(FENCE) {
            Some(close) => &body[..close],
            None => body,
        };
        return body.trim();
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

#[derive(Deserialize)]
struct GeneratedConcepts {
    #[serde(default)]
    concepts: Option<Vec<Concept>>,
}

/// Parse the text backend reply into concepts.
///
/// Never fails on malformed JSON: logs the raw text and returns [`fallback_concepts`].
/// Fails with `EmptyGenerationResult` when the JSON has no concepts. At most
/// `max_concepts` are kept.
pub fn parse_concepts(
    raw: &str,
    use_case: UseCase,
    user_prompt: &str,
    max_concepts: usize,
) -> Result<Vec<Concept>, DomainError> {
    let json = unwrap_fenced_json(raw);
    let parsed: GeneratedConcepts = match serde_json::from_str(json) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(
                error = %e,
                raw = %raw,
                use_case = %use_case,
                "text backend output is not valid JSON, using fallback concepts"
            );
            return Ok(fallback_concepts(use_case, user_prompt));
        }
    };

    let mut concepts = parsed.concepts.unwrap_or_default();
    if concepts.is_empty() {
        return Err(DomainError::EmptyGenerationResult);
    }
    if concepts.len() != CONCEPT_COUNT {
        warn!(
            count = concepts.len(),
            expected = CONCEPT_COUNT,
            "text backend returned unexpected concept count"
        );
    }
    if concepts.len() > max_concepts {
        concepts.truncate(max_concepts);
    }

    for concept in &mut concepts {
        if concept.image_prompt.trim().is_empty() {
            concept.image_prompt = format!("{}. {}", concept.title, concept.summary)
                .trim_matches(|c: char| c == '.' || c.is_whitespace())
                .to_string();
        }
    }

    Ok(concepts)
}

/// Placeholder concepts used when the text backend reply cannot be parsed.
pub fn fallback_concepts(use_case: UseCase, user_prompt: &str) -> Vec<Concept> {
    (1..=CONCEPT_COUNT)
        .map(|n| Concept {
            title: format!("Design Concept {}", n),
            summary: format!(
                "A {} concept based on your brief. Detailed notes could not be generated for this concept.",
                use_case.label().to_lowercase()
            ),
            highlights: vec![
                "Tailored to your brief".to_string(),
                "Balanced form and function".to_string(),
                "Considered material palette".to_string(),
                "Ready for refinement".to_string(),
            ],
            image_prompt: format!("{} design concept {}: {}", use_case, n, user_prompt),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"concepts": [{"title": "A", "summary": "S", "highlights": ["h1"], "imagePrompt": "p"}]}"#;

    #[test]
    fn test_unwrap_plain() {
        assert_eq!(unwrap_fenced_json(BODY), BODY);
        assert_eq!(unwrap_fenced_json(&format!("\n  {}\n", BODY)), BODY);
    }

    #[test]
    fn test_unwrap_generic_fence() {
        let input = format!("```\n{}\n```", BODY);
        assert_eq!(unwrap_fenced_json(&input), BODY);
    }

    #[test]
    fn test_unwrap_labeled_fence() {
        for label in ["json", "JSON", "json5"] {
            let input = format!("```{}\n{}\n```\n", label, BODY);
            assert_eq!(unwrap_fenced_json(&input), BODY);
        }
        assert_eq!(unwrap_fenced_json(&format!("```json {}```", BODY)), BODY);
    }

    #[test]
    fn test_unwrap_missing_closing_fence() {
        let input = format!("```json\n{}", BODY);
        assert_eq!(unwrap_fenced_json(&input), BODY);
    }

    #[test]
    fn test_unwrap_prose_around_object() {
        let input = format!("Here are your concepts:\n{}\nEnjoy!", BODY);
        assert_eq!(unwrap_fenced_json(&input), BODY);
    }

    #[test]
    fn test_unwrap_fence_inside_prose() {
        let input = format!(
            "Here:\n```json\n{}\n```\nNote: use {{curly}} braces wisely",
            BODY
        );
        assert_eq!(unwrap_fenced_json(&input), BODY);
    }

    #[test]
    fn test_unwrap_lone_fence() {
        assert_eq!(unwrap_fenced_json("```"), "");
    }

    #[test]
    fn test_fenced_and_plain_parse_the_same() {
        let plain = parse_concepts(BODY, UseCase::Interior, "loft", 6).unwrap();
        let fenced = format!("```json\n{}\n```", BODY);
        let fenced = parse_concepts(&fenced, UseCase::Interior, "loft", 6).unwrap();
        assert_eq!(plain, fenced);
        assert_eq!(plain[0].title, "A");
        assert_eq!(plain[0].highlights, vec!["h1".to_string()]);
    }

    #[test]
    fn test_invalid_json_uses_fallback() {
        let raw = "Sorry, I cannot help with that.";
        let concepts = parse_concepts(raw, UseCase::Event, "garden wedding", 6).unwrap();
        assert_eq!(concepts.len(), 3);
        for (i, c) in concepts.iter().enumerate() {
            assert_eq!(c.title, format!("Design Concept {}", i + 1));
            assert!(c.image_prompt.contains("event"));
            assert!(c.image_prompt.contains("garden wedding"));
        }
    }

    #[test]
    fn test_truncated_json_uses_fallback() {
        let concepts = parse_concepts(r#"```json
{"concepts": [{"title": "A""#, UseCase::Interior, "loft", 6).unwrap();
        assert_eq!(concepts[0].title, "Design Concept 1");
    }

    #[test]
    fn test_missing_or_empty_concepts_is_error() {
        for raw in [r#"{}"#, r#"{"concepts": []}"#, r#"{"concepts": null}"#] {
            assert!(matches!(
                parse_concepts(raw, UseCase::Interior, "loft", 6),
                Err(DomainError::EmptyGenerationResult)
            ));
        }
    }

    #[test]
    fn test_extra_concepts_are_truncated() {
        let raw = r#"{"concepts": [{"title": "1"}, {"title": "2"}, {"title": "3"}, {"title": "4"}]}"#;
        assert_eq!(parse_concepts(raw, UseCase::Interior, "loft", 6).unwrap().len(), 4);
        assert_eq!(parse_concepts(raw, UseCase::Interior, "loft", 2).unwrap().len(), 2);
    }

    #[test]
    fn test_null_field_keeps_sibling_concepts() {
        let raw = r#"{"concepts": [
            {"title": "Real A", "summary": "S", "highlights": [], "imagePrompt": "a"},
            {"title": null, "summary": "S", "highlights": [], "imagePrompt": "b"},
            {"title": "Real C", "summary": null, "highlights": null, "imagePrompt": null}
        ]}"#;
        let concepts = parse_concepts(raw, UseCase::Interior, "loft", 6).unwrap();
        let titles: Vec<_> = concepts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Real A", "", "Real C"]);
        assert_eq!(concepts[1].image_prompt, "b");
        assert_eq!(concepts[2].image_prompt, "Real C");
    }

    #[test]
    fn test_empty_image_prompt_derived_from_title() {
        let raw = r#"{"concepts": [{"title": "Nordic Loft", "summary": "Bright and calm."}]}"#;
        let concepts = parse_concepts(raw, UseCase::Interior, "loft", 6).unwrap();
        assert_eq!(concepts[0].image_prompt, "Nordic Loft. Bright and calm");
        assert!(concepts[0].highlights.is_empty());
    }
}
