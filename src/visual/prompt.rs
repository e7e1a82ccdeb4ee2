//! Prompt composition for perspective-tagged generation requests.

use crate::visual::types::Style;

/// Fixed artistic-direction guidance appended to every generation prompt.
///
/// Keeps the subject and environment consistent across the perspectives of
/// one gallery so the four angles read as views of the same scene.
const ARTISTIC_DIRECTION: &str = "Maintain a consistent subject character and environment. \
     Use soft, dramatic lighting and balanced composition. \
     Ensure clean detail edges with no distortions. \
     The image should feel like a piece of concept art.";

/// Composes the full generation prompt for one perspective.
pub fn compose(description: &str, style: Style, perspective: &str) -> String {
    format!(
        "A highly detailed, artist-quality visualization of: \"{}\".\n\
         Style: {}.\n\
         Perspective: {}.\n\
         Artistic Direction: {}",
        description.trim(),
        style,
        perspective,
        ARTISTIC_DIRECTION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_embeds_all_inputs() {
        let prompt = compose("a glowing forest", Style::Cinematic, "Aerial View");
        assert!(prompt.contains("\"a glowing forest\""));
        assert!(prompt.contains("Style: Cinematic."));
        assert!(prompt.contains("Perspective: Aerial View."));
        assert!(prompt.contains("concept art"));
    }

    #[test]
    fn test_compose_trims_description() {
        let prompt = compose("  padded  ", Style::Sketch, "Front View");
        assert!(prompt.contains("\"padded\""));
    }

    #[test]
    fn test_compose_varies_only_by_perspective() {
        let a = compose("castle", Style::Fantasy, "Front View");
        let b = compose("castle", Style::Fantasy, "Close-up Shot");
        assert_ne!(a, b);
        assert_eq!(
            a.replace("Front View", "Close-up Shot"),
            b,
            "prompts differ only in the perspective slot"
        );
    }
}
