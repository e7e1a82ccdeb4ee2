//! Orchestration layer: drives the clients and owns the gallery.

use crate::error::{MuseVizError, Result};
use crate::gallery::Gallery;
use crate::visual::{
    ImageEditor, ImageProvider, ImageResult, Style, VisualGenerator, DEFAULT_PERSPECTIVES,
};
use std::sync::Arc;
use uuid::Uuid;

/// User-facing message when a blank description is submitted.
pub const EMPTY_DESCRIPTION_MESSAGE: &str = "Please enter a concept description.";

/// User-facing message when a generation call fails.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate visualizations. Please check your API key and try again.";

/// User-facing message when an edit fails, scoped to the open selection.
pub const EDIT_FAILED_MESSAGE: &str = "Failed to apply edit. Please try again.";

/// Top-level lifecycle of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No generation has been requested yet.
    Idle,
    /// A gallery generation is in flight.
    Generating,
    /// The gallery holds a complete result set.
    Populated,
    /// The last generation failed; the gallery is empty.
    Failed {
        /// User-facing failure message.
        message: String,
    },
}

/// Edit context scoped to one selected gallery entry.
///
/// Orthogonal to the top-level phase: selecting and editing never change
/// [`SessionPhase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    id: Uuid,
    busy: bool,
    error: Option<String>,
}

impl Selection {
    /// Id of the selected entry.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// True while an edit request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Failure message from the last edit attempt, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Drives generation and editing against one provider and owns the
/// resulting gallery.
pub struct Session {
    generator: VisualGenerator,
    editor: ImageEditor,
    gallery: Gallery,
    phase: SessionPhase,
    selection: Option<Selection>,
}

impl Session {
    /// Creates a session whose clients share the given provider.
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self {
            generator: VisualGenerator::new(Arc::clone(&provider)),
            editor: ImageEditor::new(provider),
            gallery: Gallery::new(),
            phase: SessionPhase::Idle,
            selection: None,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Current gallery entries, in perspective order.
    pub fn results(&self) -> &[ImageResult] {
        self.gallery.results()
    }

    /// The open edit context, if a result is selected.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The currently selected entry, if any.
    pub fn selected_result(&self) -> Option<&ImageResult> {
        self.selection
            .as_ref()
            .and_then(|s| self.gallery.get(s.id))
    }

    /// Generates a gallery for the default perspectives.
    pub async fn generate(&mut self, description: &str, style: Style) -> Result<()> {
        self.generate_with_perspectives(description, style, &DEFAULT_PERSPECTIVES)
            .await
    }

    /// Generates a gallery for a custom perspective list.
    ///
    /// A blank description is rejected before the generation client is
    /// invoked; the phase and any existing gallery are left untouched.
    /// On failure the gallery is empty and the phase carries a generic
    /// message; partial results are never stored.
    pub async fn generate_with_perspectives<S: AsRef<str>>(
        &mut self,
        description: &str,
        style: Style,
        perspectives: &[S],
    ) -> Result<()> {
        if description.trim().is_empty() {
            return Err(MuseVizError::Validation(EMPTY_DESCRIPTION_MESSAGE.into()));
        }

        self.phase = SessionPhase::Generating;
        self.selection = None;
        self.gallery.clear();

        match self
            .generator
            .generate(description, style, perspectives)
            .await
        {
            Ok(results) => {
                self.gallery.replace_all(results);
                self.phase = SessionPhase::Populated;
                Ok(())
            }
            Err(e) => {
                self.phase = SessionPhase::Failed {
                    message: GENERATION_FAILED_MESSAGE.into(),
                };
                Err(e)
            }
        }
    }

    /// Opens an edit context for the entry with the given id.
    pub fn select(&mut self, id: Uuid) -> Result<&ImageResult> {
        let result = self.gallery.get(id).ok_or_else(|| {
            MuseVizError::Validation(format!("no gallery entry with id {id}"))
        })?;
        self.selection = Some(Selection {
            id,
            busy: false,
            error: None,
        });
        Ok(result)
    }

    /// Closes the open edit context, if any.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Applies an edit instruction to the selected entry.
    ///
    /// On success exactly that entry is replaced in place, identified by
    /// id. On failure the gallery and selection are unchanged and the
    /// context carries a scoped error message. One edit per selection may
    /// be in flight at a time.
    pub async fn edit_selected(&mut self, instruction: &str) -> Result<()> {
        let id = match &self.selection {
            Some(s) if s.busy => {
                return Err(MuseVizError::Validation(
                    "an edit is already being applied".into(),
                ))
            }
            Some(s) => s.id,
            None => {
                return Err(MuseVizError::Validation("no image selected".into()));
            }
        };

        if instruction.trim().is_empty() {
            return Err(MuseVizError::Validation(
                "edit instruction must not be blank".into(),
            ));
        }

        let image = self
            .gallery
            .get(id)
            .ok_or_else(|| MuseVizError::Validation("selected image no longer exists".into()))?
            .image
            .clone();

        if let Some(sel) = self.selection.as_mut() {
            sel.busy = true;
            sel.error = None;
        }

        let outcome = self.editor.edit(&image, instruction).await;

        if let Some(sel) = self.selection.as_mut() {
            sel.busy = false;
        }

        match outcome {
            Ok(edited) => {
                self.gallery.update_image(id, edited.image);
                Ok(())
            }
            Err(e) => {
                if let Some(sel) = self.selection.as_mut() {
                    sel.error = Some(EDIT_FAILED_MESSAGE.into());
                }
                Err(e)
            }
        }
    }
}
