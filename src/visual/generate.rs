//! Concurrent multi-perspective generation client.

use crate::error::{MuseVizError, Result};
use crate::visual::prompt;
use crate::visual::provider::ImageProvider;
use crate::visual::types::{ImageResult, Style};
use std::sync::Arc;

/// Generates one image per perspective, all perspectives concurrently.
///
/// The call is all-or-nothing: if any perspective fails, the whole gallery
/// is discarded and the error names the first failing perspective in input
/// order.
pub struct VisualGenerator {
    provider: Arc<dyn ImageProvider>,
}

impl VisualGenerator {
    /// Creates a generator backed by the given provider.
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    /// Generates a gallery: one [`ImageResult`] per perspective, in input
    /// order, each with a fresh id.
    pub async fn generate<S: AsRef<str>>(
        &self,
        description: &str,
        style: Style,
        perspectives: &[S],
    ) -> Result<Vec<ImageResult>> {
        if description.trim().is_empty() {
            return Err(MuseVizError::Validation(
                "description must not be blank".into(),
            ));
        }
        if perspectives.is_empty() {
            return Err(MuseVizError::Validation(
                "at least one perspective is required".into(),
            ));
        }

        tracing::debug!(
            perspectives = perspectives.len(),
            style = %style,
            "generating gallery"
        );

        let mut handles = Vec::with_capacity(perspectives.len());
        for perspective in perspectives {
            let perspective = perspective.as_ref().to_string();
            let composed = prompt::compose(description, style, &perspective);
            let provider = Arc::clone(&self.provider);
            let handle = tokio::spawn(async move { provider.generate(&composed).await });
            handles.push((perspective, handle));
        }

        // Settle every request, then let the first failure (input order) win.
        let mut results = Vec::with_capacity(handles.len());
        let mut failure: Option<MuseVizError> = None;

        for (perspective, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(MuseVizError::UnexpectedResponse(format!(
                    "generation task failed: {e}"
                ))),
            };

            match outcome {
                Ok(image) => results.push(ImageResult::from_provider(&perspective, &image)),
                Err(e) => {
                    tracing::warn!(%perspective, "perspective generation failed: {e}");
                    if failure.is_none() {
                        failure = Some(MuseVizError::Generation {
                            perspective,
                            source: Box::new(e),
                        });
                    }
                }
            }
        }

        match failure {
            // Partial results are dropped here, not returned.
            Some(e) => Err(e),
            None => Ok(results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::provider::test_support::{FakeOutcome, FakeProvider};
    use crate::visual::types::DEFAULT_PERSPECTIVES;
    use std::collections::HashSet;

    fn generator(provider: FakeProvider) -> (Arc<FakeProvider>, VisualGenerator) {
        let provider = Arc::new(provider);
        let generator = VisualGenerator::new(Arc::clone(&provider) as Arc<dyn ImageProvider>);
        (provider, generator)
    }

    #[tokio::test]
    async fn test_one_result_per_perspective_in_input_order() {
        let (provider, generator) = generator(FakeProvider::always_ok());

        let results = generator
            .generate(
                "A lone astronaut discovering a glowing forest on a distant moon",
                Style::Cinematic,
                &DEFAULT_PERSPECTIVES,
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 4);
        let labels: Vec<&str> = results.iter().map(|r| r.perspective.as_str()).collect();
        assert_eq!(
            labels,
            ["Front View", "Side Angle View", "Close-up Shot", "Aerial View"]
        );
        for result in &results {
            assert!(result.image.payload_len() > 0);
            assert_eq!(result.mime_type, "image/png");
        }
        assert_eq!(provider.generate_calls(), 4);
    }

    #[tokio::test]
    async fn test_ids_are_distinct_within_one_call() {
        let (_, generator) = generator(FakeProvider::always_ok());

        let results = generator
            .generate("a castle", Style::Fantasy, &DEFAULT_PERSPECTIVES)
            .await
            .unwrap();

        let ids: HashSet<_> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), results.len());
    }

    #[tokio::test]
    async fn test_prompts_embed_each_perspective() {
        let (provider, generator) = generator(FakeProvider::always_ok());

        generator
            .generate("a castle", Style::Surreal, &DEFAULT_PERSPECTIVES)
            .await
            .unwrap();

        let prompts = provider.prompts();
        for perspective in DEFAULT_PERSPECTIVES {
            assert!(
                prompts.iter().any(|p| p.contains(perspective)),
                "no prompt for {perspective}"
            );
        }
    }

    #[tokio::test]
    async fn test_failure_on_one_perspective_discards_everything() {
        let (provider, generator) = generator(FakeProvider::scripted(|prompt| {
            if prompt.contains("Side Angle View") {
                FakeOutcome::NoImageData
            } else {
                FakeOutcome::Image(b"\x89PNG\r\n\x1a\n-pixels".to_vec(), "image/png")
            }
        }));

        let err = generator
            .generate("a castle", Style::Realistic, &DEFAULT_PERSPECTIVES)
            .await
            .unwrap_err();

        match err {
            MuseVizError::Generation { perspective, .. } => {
                assert_eq!(perspective, "Side Angle View");
            }
            other => panic!("expected Generation error, got {other:?}"),
        }
        // All four were attempted; three succeeded and were still dropped.
        assert_eq!(provider.generate_calls(), 4);
    }

    #[tokio::test]
    async fn test_first_failure_in_input_order_wins() {
        let (_, generator) = generator(FakeProvider::scripted(|prompt| {
            if prompt.contains("Close-up Shot") || prompt.contains("Aerial View") {
                FakeOutcome::NoImageData
            } else {
                FakeOutcome::Image(b"\x89PNG\r\n\x1a\n-pixels".to_vec(), "image/png")
            }
        }));

        let err = generator
            .generate("a castle", Style::Realistic, &DEFAULT_PERSPECTIVES)
            .await
            .unwrap_err();

        match err {
            MuseVizError::Generation { perspective, .. } => {
                assert_eq!(perspective, "Close-up Shot");
            }
            other => panic!("expected Generation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_description_never_reaches_provider() {
        let (provider, generator) = generator(FakeProvider::always_ok());

        let err = generator
            .generate("   ", Style::Realistic, &DEFAULT_PERSPECTIVES)
            .await
            .unwrap_err();

        assert!(matches!(err, MuseVizError::Validation(_)));
        assert_eq!(provider.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_perspective_list_is_rejected() {
        let (provider, generator) = generator(FakeProvider::always_ok());

        let perspectives: [&str; 0] = [];
        let err = generator
            .generate("a castle", Style::Realistic, &perspectives)
            .await
            .unwrap_err();

        assert!(matches!(err, MuseVizError::Validation(_)));
        assert_eq!(provider.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_custom_perspective_list_length() {
        let (_, generator) = generator(FakeProvider::always_ok());

        let perspectives = ["Worm's Eye View", "Over-the-Shoulder"];
        let results = generator
            .generate("a castle", Style::LineArt, &perspectives)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].perspective, "Worm's Eye View");
        assert_eq!(results[1].perspective, "Over-the-Shoulder");
    }
}
