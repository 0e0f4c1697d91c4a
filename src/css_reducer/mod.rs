//! Stylesheet reduction
//!
//! Shrinks a site-wide stylesheet to the qualified rules whose selector
//! prelude mentions at least one tag, class or id present in the captured
//! markup.

// Sub-modules
pub mod selectors;
pub mod stylesheet;

// Re-exports for public API
pub use selectors::{SelectorSet, extract_selectors};
pub use stylesheet::{CssRule, StylesheetError, parse_stylesheet};

/// Outcome of reducing a stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReducedStylesheet {
    /// Kept rules in original stylesheet order
    pub rules: Vec<CssRule>,
    /// Number of qualified rules seen before filtering
    pub total_rules: usize,
}

impl ReducedStylesheet {
    /// Kept rules as `selector {declarations}`, one per line
    #[must_use]
    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .map(CssRule::to_css)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of rules kept
    #[must_use]
    pub fn kept(&self) -> usize {
        self.rules.len()
    }
}

/// Keep only the rules of `css` whose prelude contains a token of `selectors`
///
/// # Errors
///
/// Propagates `StylesheetError` when the stylesheet cannot be parsed; there
/// is no partial result.
pub fn reduce_stylesheet(
    css: &str,
    selectors: &SelectorSet,
) -> Result<ReducedStylesheet, StylesheetError> {
    let parsed = parse_stylesheet(css)?;
    let total_rules = parsed.len();

    let rules: Vec<CssRule> = parsed
        .into_iter()
        .filter(|rule| selectors.any_within(&rule.prelude))
        .collect();

    log::info!(
        "Reduced stylesheet from {} to {} rules using {} selector tokens",
        total_rules,
        rules.len(),
        selectors.len()
    );

    Ok(ReducedStylesheet { rules, total_rules })
}

/// Reduce `css` against the selectors found in `fragment`
///
/// # Errors
///
/// Propagates `StylesheetError` from parsing.
pub fn reduce_for_fragment(
    css: &str,
    fragment: &str,
) -> Result<ReducedStylesheet, StylesheetError> {
    reduce_stylesheet(css, &extract_selectors(fragment))
}
