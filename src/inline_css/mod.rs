//! Resource inlining functionality
//!
//! This module resolves the external resources a captured design depends on
//! into embedded content: blob-backed images become inline `<svg>` markup or
//! `data:` URIs, and the site stylesheet is downloaded for reduction.

// Sub-modules
pub mod blob_fetcher;
pub mod orchestrator;
pub mod processors;
pub mod stylesheet_fetch;
pub mod types;
pub mod utils;

// Re-exports for public API
pub use blob_fetcher::{BlobPayload, BrowserBlobFetcher};
pub use orchestrator::inline_blob_images;
pub use processors::extract_blob_images;
pub use stylesheet_fetch::{StylesheetLimits, download_stylesheet};
pub use types::{
    BlobFetchError, FetchFuture, FetchedResource, InliningError, InliningResult, ResourceBody,
    ResourceFetcher, ResourceType, SVG_MEDIA_TYPE,
};
