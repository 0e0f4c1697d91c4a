//! Core configuration type for a design capture run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::inline_css::StylesheetLimits;

/// Main configuration struct for a design capture run
///
/// Built through [`DesignConfig::builder`]; every site-specific location
/// defaults to the values in `utils::constants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignConfig {
    /// JSON cookie export of a logged-in session
    pub(crate) cookies_file: PathBuf,

    /// Design page to capture.
    ///
    /// **INVARIANT:** Absolute http(s) URL (validated in builder).
    pub(crate) design_url: String,

    /// Origin visited before cookies are injected
    pub(crate) site_origin: String,
    pub(crate) stylesheet_url: String,
    pub(crate) template_selector: String,
    pub(crate) font_base_url: String,
    pub(crate) blob_url_prefix: String,
    pub(crate) output_path: PathBuf,
    pub(crate) headless: bool,
    pub(crate) page_load_timeout_secs: u64,
    pub(crate) navigation_timeout_secs: u64,

    /// Emit one `@font-face` block per family instead of one per styled element
    pub(crate) dedupe_font_faces: bool,

    /// Stylesheet download limits
    pub(crate) stylesheet_limits: StylesheetLimits,
}
