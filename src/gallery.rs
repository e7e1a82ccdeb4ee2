//! In-memory store for generated gallery entries.

use crate::visual::{DataUrl, ImageResult};
use uuid::Uuid;

/// Ordered collection of [`ImageResult`]s, keyed by id for edits.
///
/// Pure data: only the session mutates it, and only in direct response to
/// a completed request.
#[derive(Debug, Default)]
pub struct Gallery {
    results: Vec<ImageResult>,
}

impl Gallery {
    /// Creates an empty gallery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire gallery with the given results.
    pub fn replace_all(&mut self, results: Vec<ImageResult>) {
        self.results = results;
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: Uuid) -> Option<&ImageResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Replaces the image payload of the entry with the given id, keeping
    /// its position, perspective, and identity. Returns false if no entry
    /// matches.
    pub fn update_image(&mut self, id: Uuid, image: DataUrl) -> bool {
        match self.results.iter_mut().find(|r| r.id == id) {
            Some(result) => {
                result.apply_edit(image);
                true
            }
            None => false,
        }
    }

    /// Returns the entries in perspective order.
    pub fn results(&self) -> &[ImageResult] {
        &self.results
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if the gallery holds no entries.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::{GenerationMetadata, ProviderImage};

    fn sample(perspective: &str) -> ImageResult {
        let image = ProviderImage {
            data: format!("bytes-{perspective}").into_bytes(),
            mime_type: "image/png".into(),
            metadata: GenerationMetadata::default(),
        };
        ImageResult::from_provider(perspective, &image)
    }

    #[test]
    fn test_replace_all_preserves_order() {
        let mut gallery = Gallery::new();
        gallery.replace_all(vec![sample("Front View"), sample("Aerial View")]);

        let labels: Vec<&str> = gallery
            .results()
            .iter()
            .map(|r| r.perspective.as_str())
            .collect();
        assert_eq!(labels, ["Front View", "Aerial View"]);
        assert_eq!(gallery.len(), 2);
    }

    #[test]
    fn test_update_image_touches_only_matching_entry() {
        let mut gallery = Gallery::new();
        gallery.replace_all(vec![
            sample("Front View"),
            sample("Side Angle View"),
            sample("Close-up Shot"),
            sample("Aerial View"),
        ]);

        let target = gallery.results()[1].id;
        let before: Vec<ImageResult> = gallery.results().to_vec();

        let updated = gallery.update_image(target, DataUrl::from_bytes("image/jpeg", b"edited"));
        assert!(updated);

        for (i, (old, new)) in before.iter().zip(gallery.results()).enumerate() {
            if i == 1 {
                assert_eq!(new.id, target);
                assert_eq!(new.mime_type, "image/jpeg");
                assert_ne!(new.image, old.image);
            } else {
                assert_eq!(new, old, "sibling entry {i} changed");
            }
        }
    }

    #[test]
    fn test_update_image_unknown_id() {
        let mut gallery = Gallery::new();
        gallery.replace_all(vec![sample("Front View")]);

        let updated = gallery.update_image(Uuid::new_v4(), DataUrl::from_bytes("image/png", b"x"));
        assert!(!updated);
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut gallery = Gallery::new();
        gallery.replace_all(vec![sample("Front View")]);
        gallery.clear();
        assert!(gallery.is_empty());
    }
}
