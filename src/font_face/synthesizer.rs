//! `@font-face` synthesis from page markup
//!
//! Designs reference their fonts by family name in inline `style`
//! attributes while the font files themselves are only mentioned somewhere
//! in the page as hosted URLs. The synthesizer joins the two by naming
//! convention: family `Acme Sans` lives under `{base}Acme/Sans/`.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;

use super::types::{FontFaceRule, FontFormat, FontReference};

lazy_static! {
    static ref STYLED_ELEMENT_SELECTOR: Selector =
        Selector::parse("[style]")
            .expect("BUG: hardcoded CSS selector '[style]' is invalid - this is a compile-time bug");

    static ref FONT_FAMILY_PATTERN: Regex =
        Regex::new(r#"font-family:\s*"([^"]+)""#)
            .expect("BUG: hardcoded font-family pattern is invalid - this is a compile-time bug");
}

/// Extract the double-quoted `font-family` value of an inline style
#[must_use]
pub fn extract_font_family(style: &str) -> Option<&str> {
    FONT_FAMILY_PATTERN
        .captures(style)
        .and_then(|captures| captures.get(1))
        .map(|family| family.as_str())
}

/// Builds `@font-face` rules for the families used by styled elements
#[derive(Debug, Clone)]
pub struct FontFaceSynthesizer {
    font_base_url: String,
    dedupe_families: bool,
}

impl FontFaceSynthesizer {
    #[must_use]
    pub fn new(font_base_url: impl Into<String>) -> Self {
        Self {
            font_base_url: font_base_url.into(),
            dedupe_families: false,
        }
    }

    /// Emit each family's rules once instead of once per styled element
    #[must_use]
    pub fn dedupe_families(mut self, dedupe: bool) -> Self {
        self.dedupe_families = dedupe;
        self
    }

    /// Synthesize rules for every styled element of `markup`, in document order
    ///
    /// A family used by several styled elements has its font files emitted
    /// once per element unless deduplication is enabled. Font URLs are looked
    /// up across the whole markup, not near the element that named the
    /// family; the lookup runs once per family.
    #[must_use]
    pub fn synthesize(&self, markup: &str) -> Vec<FontFaceRule> {
        let families: Vec<String> = {
            let document = Html::parse_document(markup);
            document
                .select(&STYLED_ELEMENT_SELECTOR)
                .filter_map(|element| element.value().attr("style"))
                .filter_map(extract_font_family)
                .map(str::to_string)
                .collect()
        };

        let mut references: HashMap<String, Vec<FontReference>> = HashMap::new();
        let mut rules = Vec::new();

        for family in families {
            if self.dedupe_families && references.contains_key(&family) {
                continue;
            }
            log::info!("Found font family: {family}");

            let found = references
                .entry(family.clone())
                .or_insert_with(|| self.find_font_references(&family, markup));

            for reference in found.iter() {
                log::info!(
                    "{family} {} {} {}",
                    reference.weight,
                    reference.style,
                    reference.format
                );
                rules.push(FontFaceRule {
                    family: family.clone(),
                    reference: reference.clone(),
                });
            }
        }

        log::debug!(
            "Synthesized {} @font-face rules for {} families",
            rules.len(),
            references.len()
        );
        rules
    }

    /// Find every hosted font file of `family` mentioned anywhere in `markup`
    #[must_use]
    pub fn find_font_references(&self, family: &str, markup: &str) -> Vec<FontReference> {
        let Some(pattern) = self.family_url_pattern(family) else {
            return Vec::new();
        };

        pattern
            .captures_iter(markup)
            .filter_map(|captures| {
                let url = captures.get(0)?.as_str();
                let format = FontFormat::from_extension(captures.get(1)?.as_str())?;
                Some(FontReference::from_url(url, format))
            })
            .collect()
    }

    fn family_url_pattern(&self, family: &str) -> Option<Regex> {
        let family_path = family.replace(' ', "/");
        let extensions = FontFormat::ALL
            .iter()
            .map(|format| format.extension())
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"{}/[^\s/]+\.({extensions})",
            regex::escape(&format!("{}{family_path}", self.font_base_url))
        );

        match Regex::new(&pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                log::warn!("Skipping font family {family:?}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_face::types::{FontStyle, FontWeight};

    const BASE: &str = "https://font-public.canva.com/";

    fn page(body: &str) -> String {
        format!("<html><head></head><body>{body}</body></html>")
    }

    #[test]
    fn test_extract_font_family() {
        assert_eq!(
            extract_font_family(r#"color: red; font-family: "Acme Sans"; font-size: 12px"#),
            Some("Acme Sans")
        );
        assert_eq!(extract_font_family("font-family: Arial"), None);
        assert_eq!(extract_font_family("color: red"), None);
    }

    #[test]
    fn test_single_family_single_file() {
        let markup = page(
            r#"<p style='font-family: "Acme Sans"'>Hi</p>
               <link rel="preload" href="https://font-public.canva.com/Acme/Sans/AcmeSans-Bold.woff2">"#,
        );

        let rules = FontFaceSynthesizer::new(BASE).synthesize(&markup);

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].family, "Acme Sans");
        assert_eq!(rules[0].reference.weight, FontWeight::Numeric(700));
        assert_eq!(rules[0].reference.style, FontStyle::Normal);
        assert_eq!(rules[0].reference.format, FontFormat::Woff2);
    }

    #[test]
    fn test_files_found_anywhere_in_markup() {
        let markup = page(
            r#"<style>@font-face { src: url(https://font-public.canva.com/Acme/Sans/AcmeSans-Italic.ttf) }</style>
               <div><span style='font-family: "Acme Sans"'>x</span></div>
               <script>var f = "https://font-public.canva.com/Acme/Sans/AcmeSans-Light.woff";</script>"#,
        );

        let rules = FontFaceSynthesizer::new(BASE).synthesize(&markup);

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].reference.style, FontStyle::Italic);
        assert_eq!(rules[0].reference.format, FontFormat::Ttf);
        assert_eq!(rules[1].reference.weight, FontWeight::Numeric(300));
        assert_eq!(rules[1].reference.format, FontFormat::Woff);
    }

    #[test]
    fn test_family_used_twice_is_emitted_twice() {
        let markup = page(
            r#"<p style='font-family: "Acme Sans"'>a</p>
               <p style='font-family: "Acme Sans"'>b</p>
               https://font-public.canva.com/Acme/Sans/AcmeSans-Regular.woff2"#,
        );

        let rules = FontFaceSynthesizer::new(BASE).synthesize(&markup);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], rules[1]);

        let deduped = FontFaceSynthesizer::new(BASE)
            .dedupe_families(true)
            .synthesize(&markup);
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn test_other_families_do_not_match() {
        let markup = page(
            r#"<p style='font-family: "Acme Sans"'>a</p>
               https://font-public.canva.com/Acme/Serif/AcmeSerif-Bold.woff2
               https://font-public.canva.com/Acme/Sans/Nested/AcmeSans-Bold.woff2"#,
        );

        assert!(FontFaceSynthesizer::new(BASE).synthesize(&markup).is_empty());
    }

    #[test]
    fn test_family_with_regex_metacharacters_is_escaped() {
        let markup = page(
            r#"<p style='font-family: "A+B (Pro)"'>a</p>
               https://font-public.canva.com/A+B/(Pro)/AB-Medium.woff2
               https://font-public.canva.com/AAB/(Pro)/AB-Medium.woff2"#,
        );

        let rules = FontFaceSynthesizer::new(BASE).synthesize(&markup);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].reference.weight, FontWeight::Numeric(500));
    }

    #[test]
    fn test_unstyled_markup_yields_nothing() {
        let markup = page("<p>no styles</p> https://font-public.canva.com/Acme/Sans/A.woff2");
        assert!(FontFaceSynthesizer::new(BASE).synthesize(&markup).is_empty());
    }
}
