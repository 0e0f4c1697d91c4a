//! Type definitions for blob image inlining

use base64::Engine;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Media type of SVG resources, inlined as markup rather than data URIs
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Resource type for error tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Image,
    Svg,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Image => write!(f, "Image"),
            ResourceType::Svg => write!(f, "SVG"),
        }
    }
}

/// Payload of a fetched resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceBody {
    /// UTF-8 text (SVG markup)
    Text(String),
    /// Raw bytes (raster images)
    Bytes(Vec<u8>),
}

/// A resource fetched through a `ResourceFetcher`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    /// Declared media type, e.g. `image/png`; may be empty
    pub media_type: String,
    pub body: ResourceBody,
}

impl FetchedResource {
    #[must_use]
    pub fn is_svg(&self) -> bool {
        self.media_type == SVG_MEDIA_TYPE
    }

    /// Encode the body as a `data:` URI
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        let bytes = match &self.body {
            ResourceBody::Text(text) => text.as_bytes(),
            ResourceBody::Bytes(bytes) => bytes.as_slice(),
        };

        let encoded_capacity = base64::encoded_len(bytes.len(), true).unwrap_or(0);
        let mut encoded = String::with_capacity(encoded_capacity + 30 + self.media_type.len());

        encoded.push_str("data:");
        encoded.push_str(&self.media_type);
        encoded.push_str(";base64,");
        base64::engine::general_purpose::STANDARD.encode_string(bytes, &mut encoded);

        encoded
    }
}

/// Failure to fetch a resource through the browser session
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlobFetchError {
    /// The page script reported a failure (revoked blob, network error)
    #[error("Blob fetch failed for {url}: {message}")]
    Script { url: String, message: String },

    /// The script result could not be decoded
    #[error("Invalid blob payload for {url}: {message}")]
    InvalidPayload { url: String, message: String },

    /// The browser could not run the script
    #[error("Browser error while fetching {url}: {message}")]
    Browser { url: String, message: String },
}

/// Future returned by `ResourceFetcher::fetch_resource`
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FetchedResource, BlobFetchError>> + Send + 'a>>;

/// Capability to fetch a resource by URL
///
/// Blob URLs only resolve inside the page that minted them, so the
/// production implementation runs in the live browser session. Tests
/// substitute an in-memory fetcher.
pub trait ResourceFetcher: Send + Sync {
    fn fetch_resource<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// Error information for a failed resource
#[derive(Debug, Clone)]
pub struct InliningError {
    pub url: String,
    pub resource_type: ResourceType,
    pub error: String,
}

/// Result of resource inlining with success and failure tracking
#[derive(Debug, Clone)]
pub struct InliningResult {
    pub html: String,
    pub successes: usize,
    pub failures: Vec<InliningError>,
}

impl InliningResult {
    /// Total number of resources processed
    #[must_use]
    pub fn total(&self) -> usize {
        self.successes + self.failures.len()
    }
}
