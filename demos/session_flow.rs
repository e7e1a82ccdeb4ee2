//! Full session lifecycle: generate a gallery, then edit one entry.
//!
//! Run with: `cargo run --example session_flow`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use museviz::{GeminiProvider, Session, SessionPhase, Style};
use std::sync::Arc;

#[tokio::main]
async fn main() -> museviz::Result<()> {
    let provider = Arc::new(GeminiProvider::builder().build()?);
    let mut session = Session::new(provider);

    if let Err(e) = session.generate("A floating market at dusk", Style::Fantasy).await {
        if let SessionPhase::Failed { message } = session.phase() {
            eprintln!("{message}");
        }
        return Err(e);
    }

    println!("Gallery populated with {} images", session.results().len());

    // Edit the close-up
    let id = session.results()[2].id;
    session.select(id)?;
    session
        .edit_selected("Make the sky stormy with dark clouds")
        .await?;

    let edited = session.selected_result().expect("selection open");
    std::fs::write("closeup_stormy.png", edited.image.decode()?)?;
    println!("Edited {} saved to closeup_stormy.png", edited.perspective);

    Ok(())
}
