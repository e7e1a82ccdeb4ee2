//! Core types for visual generation and editing.

use crate::error::{MuseVizError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Attempts to map a MIME type to a known format.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Art-direction style applied uniformly across all perspectives of one
/// generation call. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Style {
    /// Photorealistic rendering.
    #[default]
    Realistic,
    /// Pencil-sketch look.
    Sketch,
    /// Dreamlike, surrealist imagery.
    Surreal,
    /// Film-still framing and lighting.
    Cinematic,
    /// Fantasy illustration.
    Fantasy,
    /// Clean monochrome line art.
    LineArt,
}

impl Style {
    /// All style options, in display order.
    pub const ALL: [Style; 6] = [
        Style::Realistic,
        Style::Sketch,
        Style::Surreal,
        Style::Cinematic,
        Style::Fantasy,
        Style::LineArt,
    ];

    /// Returns the display label used in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Realistic => "Realistic",
            Self::Sketch => "Sketch",
            Self::Surreal => "Surreal",
            Self::Cinematic => "Cinematic",
            Self::Fantasy => "Fantasy",
            Self::LineArt => "Line Art",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Style {
    type Err = MuseVizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "realistic" => Ok(Self::Realistic),
            "sketch" => Ok(Self::Sketch),
            "surreal" => Ok(Self::Surreal),
            "cinematic" => Ok(Self::Cinematic),
            "fantasy" => Ok(Self::Fantasy),
            "line art" | "line-art" | "lineart" => Ok(Self::LineArt),
            other => Err(MuseVizError::InvalidRequest(format!(
                "unknown style '{other}'"
            ))),
        }
    }
}

/// Camera-angle labels generated for every concept, in gallery order.
pub const DEFAULT_PERSPECTIVES: [&str; 4] = [
    "Front View",
    "Side Angle View",
    "Close-up Shot",
    "Aerial View",
];

/// A self-describing encoded image: `data:<mime>;base64,<payload>`.
///
/// Renderable as-is, and decodable back to the original bytes before an
/// edit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DataUrl {
    mime_type: String,
    payload: String,
}

impl DataUrl {
    /// Encodes raw bytes into a data URL token.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        use base64::Engine;
        Self {
            mime_type: mime_type.into(),
            payload: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Parses a `data:<mime>;base64,<payload>` string.
    pub fn parse(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix("data:")
            .ok_or_else(|| MuseVizError::Decode("missing 'data:' prefix".into()))?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| MuseVizError::Decode("missing ';base64,' separator".into()))?;
        if mime_type.is_empty() {
            return Err(MuseVizError::Decode("empty mime type".into()));
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Returns the MIME type carried by the token.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the base64 payload without the prefix.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Decodes the payload back to raw bytes.
    ///
    /// Lenient: tolerates embedded whitespace and missing `=` padding,
    /// which upstream tooling frequently produces.
    pub fn decode(&self) -> Result<Vec<u8>> {
        use base64::Engine;

        let cleaned: String = self
            .payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        if let Ok(data) = base64::engine::general_purpose::STANDARD.decode(&cleaned) {
            return Ok(data);
        }

        base64::engine::general_purpose::STANDARD_NO_PAD
            .decode(&cleaned)
            .map_err(|e| MuseVizError::Decode(e.to_string()))
    }

    /// Returns the size of the encoded payload in bytes.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

impl std::fmt::Display for DataUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.payload)
    }
}

impl From<DataUrl> for String {
    fn from(url: DataUrl) -> Self {
        url.to_string()
    }
}

impl TryFrom<String> for DataUrl {
    type Error = MuseVizError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

/// Metadata about the generation process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Generation duration in milliseconds.
    pub duration_ms: Option<u64>,
}

/// Raw image payload returned by a provider, before it is wrapped into a
/// gallery entry.
#[derive(Debug, Clone)]
#[must_use = "provider image should be wrapped into a result or saved"]
pub struct ProviderImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// MIME type reported by the provider.
    pub mime_type: String,
    /// Generation metadata.
    pub metadata: GenerationMetadata,
}

impl ProviderImage {
    /// Wraps the raw bytes into a renderable data URL token.
    pub fn to_data_url(&self) -> DataUrl {
        DataUrl::from_bytes(self.mime_type.clone(), &self.data)
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the format detected from magic bytes, if recognized.
    pub fn detected_format(&self) -> Option<ImageFormat> {
        ImageFormat::from_magic_bytes(&self.data)
    }
}

/// One generated gallery entry: a perspective-tagged encoded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Unique identifier, stable across in-place edits.
    pub id: Uuid,
    /// Renderable encoded image token.
    pub image: DataUrl,
    /// Camera-angle label this entry was generated for.
    pub perspective: String,
    /// MIME type of the current image payload.
    pub mime_type: String,
}

impl ImageResult {
    /// Builds a gallery entry from a provider payload, minting a fresh id.
    pub fn from_provider(perspective: impl Into<String>, image: &ProviderImage) -> Self {
        Self {
            id: Uuid::new_v4(),
            image: image.to_data_url(),
            perspective: perspective.into(),
            mime_type: image.mime_type.clone(),
        }
    }

    /// Replaces the image payload in place, keeping the id and perspective.
    pub fn apply_edit(&mut self, image: DataUrl) {
        self.mime_type = image.mime_type().to_string();
        self.image = image;
    }
}
