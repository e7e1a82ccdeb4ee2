#![warn(missing_docs)]
//! MuseViz - multi-perspective concept visualization.
//!
//! Turns a text description and an art-direction style into a gallery of
//! AI-generated images, one per camera perspective, and applies free-text
//! edit instructions to individual gallery entries.
//!
//! # Quick Start - Gallery
//!
//! ```no_run
//! use museviz::{GeminiProvider, Session, Style};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> museviz::Result<()> {
//!     let provider = Arc::new(GeminiProvider::builder().build()?);
//!     let mut session = Session::new(provider);
//!
//!     session
//!         .generate("A lighthouse on a stormy cliff", Style::Cinematic)
//!         .await?;
//!
//!     for result in session.results() {
//!         println!("{}: {} bytes", result.perspective, result.image.payload_len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Editing
//!
//! ```no_run
//! use museviz::{GeminiProvider, Session, Style};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> museviz::Result<()> {
//!     let provider = Arc::new(GeminiProvider::builder().build()?);
//!     let mut session = Session::new(provider);
//!     session.generate("A lighthouse", Style::Realistic).await?;
//!
//!     let id = session.results()[0].id;
//!     session.select(id)?;
//!     session
//!         .edit_selected("Make the sky stormy with dark clouds")
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`visual`]: the provider seam ([`ImageProvider`]), the concurrent
//!   fan-out generation client, the edit client, and the core types.
//! - [`gallery`]: the ordered, id-keyed result store.
//! - [`session`]: the orchestration state machine a frontend renders.

mod error;
pub mod gallery;
pub mod session;
pub mod visual;

// Re-export error types at crate root
pub use error::{MuseVizError, Result};

// Re-export the surface most embedders need
pub use gallery::Gallery;
pub use session::{Selection, Session, SessionPhase};
pub use visual::providers::{GeminiModel, GeminiProvider, GeminiProviderBuilder};
pub use visual::{
    DataUrl, EditedImage, GenerationMetadata, ImageEditor, ImageFormat, ImageProvider,
    ImageProviderExt, ImageResult, ProviderImage, Style, VisualGenerator, DEFAULT_PERSPECTIVES,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{MuseVizError, Result};
    pub use crate::gallery::Gallery;
    pub use crate::session::{Session, SessionPhase};
    pub use crate::visual::providers::GeminiProvider;
    pub use crate::visual::{
        DataUrl, ImageEditor, ImageProvider, ImageProviderExt, ImageResult, Style,
        VisualGenerator, DEFAULT_PERSPECTIVES,
    };
}
