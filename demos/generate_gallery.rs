//! Gallery generation example - one image per perspective.
//!
//! Run with: `cargo run --example generate_gallery`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use museviz::{GeminiProvider, Session, Style};
use std::sync::Arc;

#[tokio::main]
async fn main() -> museviz::Result<()> {
    let provider = Arc::new(GeminiProvider::builder().build()?);
    let mut session = Session::new(provider);

    session
        .generate(
            "A lone astronaut discovering a glowing forest on a distant moon",
            Style::Cinematic,
        )
        .await?;

    for (i, result) in session.results().iter().enumerate() {
        let path = format!("gallery_{}.png", i + 1);
        std::fs::write(&path, result.image.decode()?)?;
        println!("{} saved to {}", result.perspective, path);
    }

    Ok(())
}
