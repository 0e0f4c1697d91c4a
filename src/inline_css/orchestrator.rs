//! Blob image inlining orchestration
//!
//! Fetches every blob image of a fragment through a `ResourceFetcher`, one
//! at a time, then rewrites the fragment in one pass.

use anyhow::Result;

use super::processors::extract_blob_images;
use super::types::{InliningError, InliningResult, ResourceBody, ResourceFetcher, ResourceType};
use super::utils::apply_blob_replacements;

/// Inline the blob-backed images of `fragment`
///
/// SVG blobs replace their `<img>` element with the `<svg>` markup; other
/// media types become `data:` URIs in `src`. A blob that cannot be fetched
/// leaves its `<img>` untouched and is reported in `failures`.
///
/// Returns `InliningResult` containing the rewritten fragment along with
/// success/failure metrics.
pub async fn inline_blob_images<F>(
    fragment: String,
    blob_prefix: &str,
    fetcher: &F,
) -> Result<InliningResult>
where
    F: ResourceFetcher + ?Sized,
{
    let blob_urls = extract_blob_images(&fragment, blob_prefix);
    if blob_urls.is_empty() {
        return Ok(InliningResult {
            html: fragment,
            successes: 0,
            failures: Vec::new(),
        });
    }

    let mut svg_replacements = Vec::new();
    let mut image_replacements = Vec::new();
    let mut failures = Vec::new();

    for url in blob_urls {
        match fetcher.fetch_resource(&url).await {
            Ok(resource) if resource.is_svg() => {
                let markup = match resource.body {
                    ResourceBody::Text(text) => text,
                    ResourceBody::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                };
                svg_replacements.push((url, markup));
            }
            Ok(resource) => {
                let data_uri = resource.to_data_uri();
                image_replacements.push((url, data_uri));
            }
            Err(e) => {
                let error_msg = e.to_string();
                log::warn!("Failed to fetch blob image {url}: {error_msg}");
                failures.push(InliningError {
                    url,
                    resource_type: ResourceType::Image,
                    error: error_msg,
                });
            }
        }
    }

    let fetched = svg_replacements.len() + image_replacements.len();
    let outcome = apply_blob_replacements(fragment, svg_replacements, image_replacements)?;

    let successes = fetched - outcome.unusable_svgs.len();
    for url in outcome.unusable_svgs {
        let failure = InliningError {
            url,
            resource_type: ResourceType::Svg,
            error: "SVG content has no <svg> element".to_string(),
        };
        log::warn!("{} {} left unresolved: {}", failure.resource_type, failure.url, failure.error);
        failures.push(failure);
    }

    let result = InliningResult {
        html: outcome.html,
        successes,
        failures,
    };
    log::info!(
        "Inlined {} of {} blob images",
        result.successes,
        result.total()
    );
    Ok(result)
}
