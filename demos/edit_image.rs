//! Image editing example - modifies an existing image with a text prompt.
//!
//! Run with: `cargo run --example edit_image -- <input_image.png>`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use museviz::{DataUrl, GeminiProvider, ImageEditor, ImageFormat};
use std::sync::Arc;

#[tokio::main]
async fn main() -> museviz::Result<()> {
    let input_path = std::env::args()
        .nth(1)
        .expect("Usage: edit_image <input_image.png>");

    let input_bytes = std::fs::read(&input_path)?;
    let mime_type = ImageFormat::from_magic_bytes(&input_bytes)
        .map(|f| f.mime_type())
        .unwrap_or("image/png");

    let provider = Arc::new(GeminiProvider::builder().build()?);
    let editor = ImageEditor::new(provider);

    let original = DataUrl::from_bytes(mime_type, &input_bytes);
    let edited = editor
        .edit(&original, "Make the colors more vibrant and add a warm sunset glow")
        .await?;

    std::fs::write("edited.png", edited.image.decode()?)?;
    println!("Edited image saved to edited.png ({})", edited.mime_type);

    Ok(())
}
