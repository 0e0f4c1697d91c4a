//! Blob resolution through the live browser page
//!
//! Blob URLs are scoped to the document that created them, so they are
//! fetched by evaluating a script in that document rather than over HTTP.

use base64::Engine;
use chromiumoxide::Page;
use serde::Deserialize;

use super::types::{BlobFetchError, FetchFuture, FetchedResource, ResourceBody, ResourceFetcher};
use crate::page_extractor::js_scripts::blob_fetch_script;

/// Value resolved by the blob fetch script
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobPayload {
    #[serde(default)]
    pub media_type: String,
    pub text: Option<String>,
    pub base64: Option<String>,
    pub error: Option<String>,
}

impl BlobPayload {
    /// Convert the script result into a resource, surfacing script failures
    pub fn into_resource(self, url: &str) -> Result<FetchedResource, BlobFetchError> {
        if let Some(message) = self.error {
            return Err(BlobFetchError::Script {
                url: url.to_string(),
                message,
            });
        }

        let body = match (self.text, self.base64) {
            (Some(text), _) => ResourceBody::Text(text),
            (None, Some(encoded)) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| BlobFetchError::InvalidPayload {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?;
                ResourceBody::Bytes(bytes)
            }
            (None, None) => {
                return Err(BlobFetchError::InvalidPayload {
                    url: url.to_string(),
                    message: "script returned neither text nor base64 content".to_string(),
                });
            }
        };

        Ok(FetchedResource {
            media_type: self.media_type,
            body,
        })
    }
}

/// `ResourceFetcher` backed by a page of the browser session
#[derive(Clone)]
pub struct BrowserBlobFetcher {
    page: Page,
}

impl BrowserBlobFetcher {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

impl ResourceFetcher for BrowserBlobFetcher {
    fn fetch_resource<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            log::debug!("Fetching blob through page: {url}");

            let result = self
                .page
                .evaluate(blob_fetch_script(url))
                .await
                .map_err(|e| BlobFetchError::Browser {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

            let payload: BlobPayload =
                result
                    .into_value()
                    .map_err(|e| BlobFetchError::InvalidPayload {
                        url: url.to_string(),
                        message: e.to_string(),
                    })?;

            payload.into_resource(url)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "blob:https://www.canva.com/abc";

    #[test]
    fn test_svg_payload() {
        let payload: BlobPayload = serde_json::from_str(
            r#"{"mediaType": "image/svg+xml", "text": "<svg></svg>"}"#,
        )
        .unwrap();

        let resource = payload.into_resource(URL).unwrap();
        assert!(resource.is_svg());
        assert_eq!(resource.body, ResourceBody::Text("<svg></svg>".to_string()));
    }

    #[test]
    fn test_binary_payload_is_decoded() {
        let payload: BlobPayload =
            serde_json::from_str(r#"{"mediaType": "image/png", "base64": "iVBORw=="}"#).unwrap();

        let resource = payload.into_resource(URL).unwrap();
        assert_eq!(resource.body, ResourceBody::Bytes(vec![0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_script_error_is_surfaced() {
        let payload: BlobPayload =
            serde_json::from_str(r#"{"error": "Failed to fetch"}"#).unwrap();

        let err = payload.into_resource(URL).unwrap_err();
        assert_eq!(
            err,
            BlobFetchError::Script {
                url: URL.to_string(),
                message: "Failed to fetch".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_base64_is_rejected() {
        let payload: BlobPayload =
            serde_json::from_str(r#"{"mediaType": "image/png", "base64": "***"}"#).unwrap();

        assert!(matches!(
            payload.into_resource(URL),
            Err(BlobFetchError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        assert!(BlobPayload::default().into_resource(URL).is_err());
    }
}
