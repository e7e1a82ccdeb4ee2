//! Visual generation module: clients, provider seam, and core types.

mod edit;
mod generate;
pub mod prompt;
mod provider;
pub mod providers;
mod types;

#[cfg(test)]
pub(crate) use provider::test_support;

pub use edit::{EditedImage, ImageEditor};
pub use generate::VisualGenerator;
pub use provider::{ImageProvider, ImageProviderExt};
pub use types::{
    DataUrl, GenerationMetadata, ImageFormat, ImageResult, ProviderImage, Style,
    DEFAULT_PERSPECTIVES,
};
