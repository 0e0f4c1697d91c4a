//! Getter methods for `DesignConfig`

use std::path::Path;

use super::types::DesignConfig;
use crate::inline_css::StylesheetLimits;

impl DesignConfig {
    #[must_use]
    pub fn cookies_file(&self) -> &Path {
        &self.cookies_file
    }

    #[must_use]
    pub fn design_url(&self) -> &str {
        &self.design_url
    }

    #[must_use]
    pub fn site_origin(&self) -> &str {
        &self.site_origin
    }

    #[must_use]
    pub fn stylesheet_url(&self) -> &str {
        &self.stylesheet_url
    }

    #[must_use]
    pub fn template_selector(&self) -> &str {
        &self.template_selector
    }

    #[must_use]
    pub fn font_base_url(&self) -> &str {
        &self.font_base_url
    }

    #[must_use]
    pub fn blob_url_prefix(&self) -> &str {
        &self.blob_url_prefix
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    /// Budget for the readyState polling after each navigation
    #[must_use]
    pub fn page_load_timeout_secs(&self) -> u64 {
        self.page_load_timeout_secs
    }

    #[must_use]
    pub fn navigation_timeout_secs(&self) -> u64 {
        self.navigation_timeout_secs
    }

    #[must_use]
    pub fn dedupe_font_faces(&self) -> bool {
        self.dedupe_font_faces
    }

    #[must_use]
    pub fn stylesheet_limits(&self) -> StylesheetLimits {
        self.stylesheet_limits
    }
}
