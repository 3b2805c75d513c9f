//! Design service. Orchestrates one design generation request.
//!
//! Flow:
//! 1. Template the brief for the selected use case
//! 2. Ask the text backend for concepts (fatal on failure, fallback on garbage)
//! 3. Render one image per concept concurrently, waiting for all of them
//! 4. Merge concepts with image outcomes in order and stamp the response

use crate::domain::prompts::{design_prompt, styled_image_prompt};
use crate::domain::{
    Concept, DesignRequest, DesignResponse, DomainError, ImageOutcome, RenderedConcept,
    parse_concepts,
};
use crate::ports::{ImageGenerationPort, TextGenerationPort};
use crate::shared::config::GenerationLimits;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};
use tracing::{info, warn};

/// Encode PNG bytes as a data URI.
pub fn png_data_uri(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

/// Orchestrator for design generation. Stateless across requests.
pub struct DesignService {
    text: Arc<dyn TextGenerationPort>,
    images: Arc<dyn ImageGenerationPort>,
    limits: GenerationLimits,
}

impl DesignService {
    /// Create a new design service.
    ///
    /// # Arguments
    /// * `text` - Text backend (Gemini, Mock, ...)
    /// * `images` - Image backend
    /// * `limits` - Prompt/concept caps and the per-request deadline
    pub fn new(
        text: Arc<dyn TextGenerationPort>,
        images: Arc<dyn ImageGenerationPort>,
        limits: GenerationLimits,
    ) -> Self {
        Self {
            text,
            images,
            limits,
        }
    }

    /// Validate raw input, then generate. No backend is called for invalid input.
    pub async fn generate_from_raw(
        &self,
        prompt: Option<&str>,
        use_case: Option<&str>,
    ) -> Result<DesignResponse, DomainError> {
        let request = DesignRequest::parse(prompt, use_case, self.limits.max_prompt_chars)?;
        self.generate(&request).await
    }

    /// Run the full generation for a validated request.
    ///
    /// Text failures abort the request. Image failures only drop that concept's image.
    pub async fn generate(&self, request: &DesignRequest) -> Result<DesignResponse, DomainError> {
        let deadline = Instant::now() + self.limits.request_deadline;
        info!(
            use_case = %request.use_case,
            prompt_len = request.prompt.len(),
            "design generation started"
        );

        let concepts = self.generate_concepts(request, deadline).await?;
        let outcomes = self.render_images(&concepts, deadline).await;

        let rendered: Vec<RenderedConcept> = concepts
            .into_iter()
            .zip(outcomes)
            .map(|(concept, outcome)| RenderedConcept::merge(concept, outcome))
            .collect();

        let with_images = rendered.iter().filter(|c| c.image_url.is_some()).count();
        info!(
            use_case = %request.use_case,
            concepts = rendered.len(),
            with_images,
            "design generation complete"
        );

        Ok(DesignResponse {
            concepts: rendered,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// Ask the text backend for concepts and parse them. Single attempt.
    pub async fn generate_concepts(
        &self,
        request: &DesignRequest,
        deadline: Instant,
    ) -> Result<Vec<Concept>, DomainError> {
        let prompt = design_prompt(request.use_case, &request.prompt);

        let raw = timeout_at(deadline, self.text.generate_text(&prompt))
            .await
            .map_err(|_| DomainError::UpstreamText("deadline exceeded".to_string()))??;

        parse_concepts(
            &raw,
            request.use_case,
            &request.prompt,
            self.limits.max_concepts,
        )
    }

    /// Render one image per concept concurrently and wait for every one to settle.
    ///
    /// The returned outcomes are index-aligned with `concepts`. Each task converts its
    /// own failure (error, deadline) into `ImageOutcome::Failed`; a panicked task
    /// leaves its slot `Failed` too. Dropping the future aborts unfinished tasks.
    pub async fn render_images(
        &self,
        concepts: &[Concept],
        deadline: Instant,
    ) -> Vec<ImageOutcome> {
        let mut join_set = JoinSet::new();

        for (index, concept) in concepts.iter().enumerate() {
            let images = Arc::clone(&self.images);
            let prompt = styled_image_prompt(&concept.image_prompt);
            join_set.spawn(async move {
                let outcome = render_one(&*images, &prompt, deadline).await;
                (index, outcome)
            });
        }

        let mut outcomes: Vec<Option<ImageOutcome>> = vec![None; concepts.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(e) => warn!(error = %e, "image task aborted"),
            }
        }

        outcomes
            .into_iter()
            .map(|outcome| {
                outcome.unwrap_or_else(|| ImageOutcome::Failed("image task aborted".to_string()))
            })
            .collect()
    }
}

async fn render_one(
    images: &dyn ImageGenerationPort,
    prompt: &str,
    deadline: Instant,
) -> ImageOutcome {
    match timeout_at(deadline, images.generate_image(prompt)).await {
        Ok(Ok(bytes)) => ImageOutcome::Rendered(png_data_uri(&bytes)),
        Ok(Err(e)) => {
            warn!(error = %e, "image generation failed");
            ImageOutcome::Failed(e.to_string())
        }
        Err(_) => {
            warn!("image generation exceeded request deadline");
            ImageOutcome::Failed("deadline exceeded".to_string())
        }
    }
}
