//! Error types for visualization generation and editing.

use std::time::Duration;

/// Errors that can occur while generating or editing visuals.
#[derive(Debug, thiserror::Error)]
pub enum MuseVizError {
    /// Caller-side input rejected before any network traffic.
    #[error("{0}")]
    Validation(String),

    /// A perspective in a gallery generation failed; the whole call is
    /// discarded, no partial gallery survives.
    #[error("generation failed for perspective '{perspective}': {source}")]
    Generation {
        /// Label of the first perspective (in input order) that failed.
        perspective: String,
        /// Underlying provider or transport failure.
        #[source]
        source: Box<MuseVizError>,
    },

    /// An edit request failed; the original image is untouched.
    #[error("edit failed: {0}")]
    Edit(#[source] Box<MuseVizError>),

    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Account or quota problem on the provider side.
    #[error("billing issue: {0}")]
    Billing(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Delay suggested by the provider, if any.
        retry_after: Option<Duration>,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider returned a well-formed response without usable image data.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 or a data URL.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., saving a file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MuseVizError {
    /// Returns true if this error is likely transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Network(_) => true,
            Self::Generation { source, .. } | Self::Edit(source) => source.is_retryable(),
            _ => false,
        }
    }

    /// Returns the suggested retry delay, if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            Self::Network(_) => Some(Duration::from_secs(2)),
            Self::Generation { source, .. } | Self::Edit(source) => source.retry_after(),
            _ => None,
        }
    }
}

/// Result type alias for visualization operations.
pub type Result<T> = std::result::Result<T, MuseVizError>;

/// Maximum length of a provider error body kept in an error message.
const MAX_ERROR_BODY: usize = 600;

/// Trims a raw provider error body so it is safe to surface or log.
///
/// Scrubs `key=`-style query credentials and truncates oversized bodies.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let mut out = String::with_capacity(text.len().min(MAX_ERROR_BODY));
    for token in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        if let Some(pos) = token.find("key=") {
            out.push_str(&token[..pos + 4]);
            out.push_str("[redacted]");
        } else {
            out.push_str(token);
        }
        if out.len() >= MAX_ERROR_BODY {
            out.truncate(MAX_ERROR_BODY);
            out.push_str("...");
            break;
        }
    }
    out
}

/// Parses a `Retry-After` header value in seconds, if present.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}
