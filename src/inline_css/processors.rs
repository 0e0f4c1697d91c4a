//! Blob image discovery
//!
//! Finds the `<img>` elements of a fragment whose source is a blob URL
//! minted by the design editor.

use lazy_static::lazy_static;
use scraper::{Html, Selector};

lazy_static! {
    // These selectors are hardcoded and syntactically valid CSS selectors.
    // If they fail to parse, it indicates a compile-time bug in the selector strings.
    static ref IMG_SELECTOR: Selector =
        Selector::parse("img[src]")
            .expect("BUG: hardcoded CSS selector 'img[src]' is invalid - this is a compile-time bug");
}

/// Extract the distinct blob URLs used as `<img src>` in `fragment`
///
/// A source qualifies when it contains `blob_prefix`. URLs are returned in
/// document order, each once.
#[must_use]
pub fn extract_blob_images(fragment: &str, blob_prefix: &str) -> Vec<String> {
    let document = Html::parse_fragment(fragment);
    let mut urls: Vec<String> = Vec::new();

    for element in document.select(&IMG_SELECTOR) {
        if let Some(src) = element.value().attr("src")
            && src.contains(blob_prefix)
            && !urls.iter().any(|known| known == src)
        {
            urls.push(src.to_string());
        }
    }

    log::debug!("Found {} blob images in fragment", urls.len());
    urls
}
