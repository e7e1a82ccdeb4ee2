//! Image provider trait and utilities.

use crate::error::Result;
use crate::visual::types::ProviderImage;
use async_trait::async_trait;

/// Trait for generative-image providers.
///
/// The generation and edit clients hold an `Arc<dyn ImageProvider>`, so
/// tests can substitute a scripted fake for the real API.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates an image from a fully composed text prompt.
    async fn generate(&self, prompt: &str) -> Result<ProviderImage>;

    /// Produces a replacement image from an existing one plus a free-text
    /// instruction.
    async fn edit(&self, image: &[u8], mime_type: &str, instruction: &str)
        -> Result<ProviderImage>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;

    /// Checks if the provider is reachable and authenticated.
    async fn health_check(&self) -> Result<()>;
}

/// Extension trait adding opt-in retry logic.
///
/// The session layer never retries on its own (the user re-triggers);
/// embedders that want bounded retries can call this instead.
#[async_trait]
pub trait ImageProviderExt: ImageProvider {
    /// Generates with automatic retries on transient failures.
    async fn generate_with_retries(
        &self,
        prompt: &str,
        max_retries: u32,
    ) -> Result<ProviderImage> {
        let mut last_error = None;

        for attempt in 0..=max_retries {
            match self.generate(prompt).await {
                Ok(image) => return Ok(image),
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    let delay = e.retry_after().unwrap_or(std::time::Duration::from_secs(1));
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries,
                        delay_ms = delay.as_millis(),
                        "retrying after transient error: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.expect("should have error after retries"))
    }
}

impl<T: ImageProvider + ?Sized> ImageProviderExt for T {}

#[cfg(test)]
pub(crate) mod test_support {
    //! Scripted provider fake shared by the client and session tests.

    use super::*;
    use crate::error::MuseVizError;
    use crate::visual::types::GenerationMetadata;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// What the fake should do for one incoming request.
    #[derive(Debug, Clone)]
    pub enum FakeOutcome {
        /// Return an image with these bytes and mime type.
        Image(Vec<u8>, &'static str),
        /// Fail as if the response carried no image data.
        NoImageData,
        /// Fail with an authentication error.
        AuthError,
    }

    /// Scripted [`ImageProvider`] that records every call.
    pub struct FakeProvider {
        generate_calls: AtomicUsize,
        edit_calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        /// Outcome picker keyed on the prompt/instruction text.
        script: Box<dyn Fn(&str) -> FakeOutcome + Send + Sync>,
    }

    impl FakeProvider {
        /// Fake that always returns the same PNG payload.
        pub fn always_ok() -> Self {
            Self::scripted(|_| FakeOutcome::Image(b"\x89PNG\r\n\x1a\n-pixels".to_vec(), "image/png"))
        }

        /// Fake whose outcome depends on the request text.
        pub fn scripted(script: impl Fn(&str) -> FakeOutcome + Send + Sync + 'static) -> Self {
            Self {
                generate_calls: AtomicUsize::new(0),
                edit_calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                script: Box::new(script),
            }
        }

        pub fn generate_calls(&self) -> usize {
            self.generate_calls.load(Ordering::SeqCst)
        }

        pub fn edit_calls(&self) -> usize {
            self.edit_calls.load(Ordering::SeqCst)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        fn run(&self, text: &str) -> Result<ProviderImage> {
            match (self.script)(text) {
                FakeOutcome::Image(data, mime_type) => Ok(ProviderImage {
                    data,
                    mime_type: mime_type.to_string(),
                    metadata: GenerationMetadata {
                        model: Some("fake".into()),
                        duration_ms: Some(1),
                    },
                }),
                FakeOutcome::NoImageData => Err(MuseVizError::UnexpectedResponse(
                    "no image data in response".into(),
                )),
                FakeOutcome::AuthError => Err(MuseVizError::Auth("invalid key".into())),
            }
        }
    }

    #[async_trait]
    impl ImageProvider for FakeProvider {
        async fn generate(&self, prompt: &str) -> Result<ProviderImage> {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.run(prompt)
        }

        async fn edit(
            &self,
            _image: &[u8],
            _mime_type: &str,
            instruction: &str,
        ) -> Result<ProviderImage> {
            self.edit_calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(instruction.to_string());
            self.run(instruction)
        }

        fn name(&self) -> &str {
            "fake"
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }
    }
}
