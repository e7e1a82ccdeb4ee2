//! Single-image edit client.

use crate::error::{MuseVizError, Result};
use crate::visual::provider::ImageProvider;
use crate::visual::types::DataUrl;
use std::sync::Arc;

/// A replacement image produced by an edit.
#[derive(Debug, Clone)]
pub struct EditedImage {
    /// The replacement encoded image token.
    pub image: DataUrl,
    /// MIME type of the replacement (may differ from the original).
    pub mime_type: String,
}

/// Applies free-text edit instructions to an existing image.
pub struct ImageEditor {
    provider: Arc<dyn ImageProvider>,
}

impl ImageEditor {
    /// Creates an editor backed by the given provider.
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    /// Submits one edit request and returns the replacement image.
    ///
    /// The input token is decoded back to raw bytes before the request;
    /// the original is never mutated.
    pub async fn edit(&self, image: &DataUrl, instruction: &str) -> Result<EditedImage> {
        if instruction.trim().is_empty() {
            return Err(MuseVizError::Validation(
                "edit instruction must not be blank".into(),
            ));
        }

        let bytes = image.decode()?;

        tracing::debug!(mime_type = image.mime_type(), "submitting edit request");

        match self
            .provider
            .edit(&bytes, image.mime_type(), instruction)
            .await
        {
            Ok(replacement) => Ok(EditedImage {
                image: replacement.to_data_url(),
                mime_type: replacement.mime_type,
            }),
            Err(e) => Err(MuseVizError::Edit(Box::new(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::provider::test_support::{FakeOutcome, FakeProvider};

    fn editor(provider: FakeProvider) -> (Arc<FakeProvider>, ImageEditor) {
        let provider = Arc::new(provider);
        let editor = ImageEditor::new(Arc::clone(&provider) as Arc<dyn ImageProvider>);
        (provider, editor)
    }

    #[tokio::test]
    async fn test_edit_returns_replacement_token() {
        let (provider, editor) = editor(FakeProvider::scripted(|_| {
            FakeOutcome::Image(b"\xFF\xD8\xFF\xE0-newpixels".to_vec(), "image/jpeg")
        }));

        let original = DataUrl::from_bytes("image/png", b"\x89PNG\r\n\x1a\n-old");
        let edited = editor
            .edit(&original, "Make the sky stormy with dark clouds")
            .await
            .unwrap();

        assert_eq!(edited.mime_type, "image/jpeg");
        assert_eq!(edited.image.mime_type(), "image/jpeg");
        assert!(edited.image.payload_len() > 0);
        assert_eq!(provider.edit_calls(), 1);
        // The input token is untouched.
        assert_eq!(original.mime_type(), "image/png");
    }

    #[tokio::test]
    async fn test_missing_image_data_is_an_edit_failure() {
        let (_, editor) = editor(FakeProvider::scripted(|_| FakeOutcome::NoImageData));

        let original = DataUrl::from_bytes("image/png", b"\x89PNG\r\n\x1a\n-old");
        let err = editor.edit(&original, "add a moon").await.unwrap_err();

        match err {
            MuseVizError::Edit(source) => {
                assert!(matches!(*source, MuseVizError::UnexpectedResponse(_)));
            }
            other => panic!("expected Edit error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_instruction_never_reaches_provider() {
        let (provider, editor) = editor(FakeProvider::always_ok());

        let original = DataUrl::from_bytes("image/png", b"\x89PNG\r\n\x1a\n-old");
        let err = editor.edit(&original, "  \n ").await.unwrap_err();

        assert!(matches!(err, MuseVizError::Validation(_)));
        assert_eq!(provider.edit_calls(), 0);
    }
}
