//! Selector token extraction from captured markup
//!
//! Collects every tag name, `.class` and `#id` present in an HTML fragment.
//! The resulting set is the vocabulary a stylesheet rule must mention to
//! survive reduction.

use scraper::{ElementRef, Html};
use std::collections::HashSet;

/// Set of selector tokens found in a fragment
///
/// Each token is a bare tag name, a `.`-prefixed class or a `#`-prefixed id.
/// Values are kept exactly as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorSet(HashSet<String>);

impl SelectorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.0.insert(token.into())
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any token occurs as a substring of `text`
    ///
    /// `.btn` also matches a prelude mentioning `.btn-primary`.
    #[must_use]
    pub fn any_within(&self, text: &str) -> bool {
        self.0.iter().any(|token| text.contains(token.as_str()))
    }
}

impl<S: Into<String>> FromIterator<S> for SelectorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Extract the selector tokens of every element in `fragment`
///
/// The fragment is parsed in body context. The synthetic `<html>` root the
/// parser wraps fragments in is not part of the captured markup and is
/// skipped. Elements the HTML parser refuses in body context (`<html>`,
/// `<head>`, `<body>`, table parts outside a `<table>`) are dropped along
/// with their tokens; their children are still collected.
#[must_use]
pub fn extract_selectors(fragment: &str) -> SelectorSet {
    let mut selectors = SelectorSet::new();
    if fragment.trim().is_empty() {
        return selectors;
    }

    let document = Html::parse_fragment(fragment);
    for node in document.root_element().descendants().skip(1) {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        let value = element.value();

        selectors.insert(value.name());
        for class in value.classes() {
            selectors.insert(format!(".{class}"));
        }
        if let Some(id) = value.id() {
            selectors.insert(format!("#{id}"));
        }
    }

    log::debug!("Extracted {} selector tokens from fragment", selectors.len());
    selectors
}
