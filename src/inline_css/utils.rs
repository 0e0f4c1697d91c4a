//! DOM rewriting for resolved blob images
//!
//! Replacements are applied in a single kuchiki parse/serialize cycle.

use anyhow::{Context, Result};
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use std::collections::HashMap;

/// Outcome of applying blob replacements to a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementOutcome {
    pub html: String,
    /// Sources whose SVG markup held no `<svg>` element; their images are untouched
    pub unusable_svgs: Vec<String>,
}

/// Parse SVG markup and return its first `<svg>` element, serialized
///
/// Drops whatever surrounds the element (XML declaration, DOCTYPE).
fn extract_svg_root(svg_markup: &str) -> Option<String> {
    let document = kuchiki::parse_html().one(svg_markup);
    document
        .select_first("svg")
        .ok()
        .map(|svg| svg.as_node().to_string())
}

/// Serialize the children of the `<body>` the parser wrapped the fragment in
fn serialize_body_children(document: &NodeRef) -> Result<String> {
    let body = document
        .select_first("body")
        .map_err(|()| anyhow::anyhow!("Parsed fragment has no body element"))?;

    let mut html_output = Vec::new();
    for child in body.as_node().children() {
        child
            .serialize(&mut html_output)
            .context("Failed to serialize HTML after applying blob replacements")?;
    }

    String::from_utf8(html_output).context("Failed to convert HTML bytes to UTF-8 string")
}

/// Replace blob `<img>` elements of `fragment`
///
/// # Arguments
/// * `fragment` - The captured HTML fragment
/// * `svg_replacements` - (src, `svg_markup`) pairs; the `<img>` is replaced by the `<svg>` element
/// * `image_replacements` - (src, `data_uri`) pairs; the `src` attribute is rewritten
///
/// # Returns
/// Rewritten fragment, plus the SVG sources that could not be used
pub fn apply_blob_replacements(
    fragment: String,
    svg_replacements: Vec<(String, String)>,
    image_replacements: Vec<(String, String)>,
) -> Result<ReplacementOutcome> {
    if svg_replacements.is_empty() && image_replacements.is_empty() {
        return Ok(ReplacementOutcome {
            html: fragment,
            unusable_svgs: Vec::new(),
        });
    }

    let document = kuchiki::parse_html().one(fragment);

    let mut unusable_svgs = Vec::new();
    let mut svg_map: HashMap<String, String> = HashMap::new();
    for (src, markup) in svg_replacements {
        match extract_svg_root(&markup) {
            Some(svg) => {
                svg_map.insert(src, svg);
            }
            None => {
                log::warn!("SVG blob has no <svg> element, keeping image: {src}");
                unusable_svgs.push(src);
            }
        }
    }
    let img_map: HashMap<String, String> = image_replacements.into_iter().collect();

    // Must collect nodes before iteration because SVG replacement calls node.detach(),
    // which invalidates the iterator.
    let matches: Vec<_> = document
        .select("img[src]")
        .map_err(|()| anyhow::anyhow!("Invalid img selector"))?
        .collect();

    for node_ref in matches {
        let node = node_ref.as_node();

        let src_value = {
            let attrs = node_ref.attributes.borrow();
            attrs.get("src").map(std::string::ToString::to_string)
        };
        let Some(src) = src_value else {
            continue;
        };

        if let Some(svg) = svg_map.get(&src) {
            // Fresh parse per use so a blob shared by several images is inlined at each
            let svg_fragment = kuchiki::parse_html().one(svg.as_str());
            if let Ok(copy) = svg_fragment.select_first("svg") {
                node.insert_before(copy.as_node().clone());
                node.detach();
                log::debug!("Replaced img tag with inline SVG: {src}");
            }
        } else if let Some(data_uri) = img_map.get(&src) {
            let mut attrs = node_ref.attributes.borrow_mut();
            attrs.insert("src", data_uri.clone());
            log::debug!("Replaced image src with data URI: {src}");
        }
    }

    Ok(ReplacementOutcome {
        html: serialize_body_children(&document)?,
        unusable_svgs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG_SRC: &str = "blob:https://www.canva.com/svg";
    const PNG_SRC: &str = "blob:https://www.canva.com/png";

    #[test]
    fn test_no_replacements_returns_fragment_unchanged() {
        let fragment = r#"<div class="x"><img src="a.png"></div>"#.to_string();

        let outcome = apply_blob_replacements(fragment.clone(), vec![], vec![]).unwrap();
        assert_eq!(outcome.html, fragment);
    }

    #[test]
    fn test_svg_replaces_img_element() {
        let fragment = format!(r#"<div><img src="{SVG_SRC}" alt="logo"></div>"#);
        let svg = concat!(
            r#"<?xml version="1.0"?>"#,
            r#"<svg viewBox="0 0 1 1"><rect width="1" height="1"></rect></svg>"#,
        );

        let outcome = apply_blob_replacements(
            fragment,
            vec![(SVG_SRC.to_string(), svg.to_string())],
            vec![],
        )
        .unwrap();

        assert!(!outcome.html.contains("<img"));
        assert!(outcome.html.contains("<svg"));
        assert!(outcome.html.contains("<rect"));
        assert!(outcome.html.starts_with("<div>"));
        assert!(outcome.unusable_svgs.is_empty());
    }

    #[test]
    fn test_data_uri_replaces_src() {
        let fragment = format!(r#"<div><img src="{PNG_SRC}"></div>"#);

        let outcome = apply_blob_replacements(
            fragment,
            vec![],
            vec![(PNG_SRC.to_string(), "data:image/png;base64,AAAA".to_string())],
        )
        .unwrap();

        assert_eq!(outcome.html, r#"<div><img src="data:image/png;base64,AAAA"></div>"#);
    }

    #[test]
    fn test_svg_without_svg_element_is_reported() {
        let fragment = format!(r#"<img src="{SVG_SRC}">"#);

        let outcome = apply_blob_replacements(
            fragment,
            vec![(SVG_SRC.to_string(), "<p>not an svg</p>".to_string())],
            vec![],
        )
        .unwrap();

        assert_eq!(outcome.unusable_svgs, vec![SVG_SRC.to_string()]);
        assert!(outcome.html.contains(SVG_SRC));
    }

    #[test]
    fn test_same_svg_blob_inlined_at_every_use() {
        let fragment = format!(r#"<img src="{SVG_SRC}"><img src="{SVG_SRC}">"#);

        let outcome = apply_blob_replacements(
            fragment,
            vec![(SVG_SRC.to_string(), "<svg></svg>".to_string())],
            vec![],
        )
        .unwrap();

        assert_eq!(outcome.html.matches("<svg").count(), 2);
        assert!(!outcome.html.contains("<img"));
    }
}
