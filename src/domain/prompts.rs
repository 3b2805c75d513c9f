//! Prompt templates for the text and image backends.
//!
//! Pure functions. Each use case gets its own persona and focus areas; the JSON
//! output directive is identical for all of them.

use super::entities::{CONCEPT_COUNT, UseCase};

/// Appended to every image prompt before it is sent to the image backend.
pub const IMAGE_STYLE_SUFFIX: &str =
    "architectural sketch style, professional rendering, clean lines, detailed illustration";

/// Persona and focus areas for a use case.
fn domain_instruction(use_case: UseCase) -> &'static str {
    match use_case {
        UseCase::Interior => {
            r#"You are an expert interior designer with a strong portfolio of residential and commercial spaces.
Focus on space planning and furniture layout, interior style and mood, materials and finishes,
color palette, natural and artificial lighting, and storage solutions."#
        }
        UseCase::Architecture => {
            r#"You are an award-winning architect known for context-aware, sustainable buildings.
Focus on building form and massing, facade and envelope design, site orientation and context,
sustainability and passive strategies, structural expression, and circulation."#
        }
        UseCase::Construction => {
            r#"You are a senior construction engineer and project planner.
Focus on structural systems, construction phasing and sequencing, material selection and sourcing,
cost efficiency, site logistics and safety, and build quality."#
        }
        UseCase::Event => {
            r#"You are a creative event designer who produces memorable experiences.
Focus on seating and guest flow, stage and focal points, lighting design, theme and decor,
color and floral styling, and atmosphere throughout the event."#
        }
    }
}

/// Output schema directive shared by every template.
fn schema_directive() -> String {
    format!(
        r#"Respond with a single JSON object and nothing else, using exactly this structure:
{{
  "concepts": [
    {{
      "title": "Short evocative concept name",
      "summary": "Two or three sentences describing the concept",
      "highlights": ["Key feature 1", "Key feature 2", "Key feature 3", "Key feature 4"],
      "imagePrompt": "Detailed visual description used to render an image of this concept"
    }}
  ]
}}

Provide exactly {count} concepts. All {count} concepts must be clearly distinct from each other
in style, layout and approach. Give each concept exactly 4 highlights."#,
        count = CONCEPT_COUNT
    )
}

/// Build the full instruction for the text backend.
pub fn design_prompt(use_case: UseCase, user_prompt: &str) -> String {
    format!(
        "{}\n\nCreate {} design concepts for the following {} request:\n\"{}\"\n\n{}",
        domain_instruction(use_case),
        CONCEPT_COUNT,
        use_case.label().to_lowercase(),
        user_prompt,
        schema_directive()
    )
}

/// Image prompt with the fixed style suffix appended.
pub fn styled_image_prompt(image_prompt: &str) -> String {
    let base = image_prompt.trim().trim_end_matches(['.', ',']);
    if base.is_empty() {
        IMAGE_STYLE_SUFFIX.to_string()
    } else {
        format!("{}, {}", base, IMAGE_STYLE_SUFFIX)
    }
}
