//! Type-safe builder for `DesignConfig` using the typestate pattern
//!
//! The cookie file and the design URL must both be supplied before `build()`
//! becomes available.

use scraper::Selector;
use std::marker::PhantomData;
use std::path::PathBuf;
use url::Url;

use super::types::DesignConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::inline_css::StylesheetLimits;
use crate::utils::{
    BLOB_URL_PREFIX, DEFAULT_NAVIGATION_TIMEOUT_SECS, DEFAULT_OUTPUT_PATH,
    DEFAULT_PAGE_LOAD_TIMEOUT_SECS, FONT_BASE_URL, SITE_ORIGIN, STYLESHEET_URL, TEMPLATE_SELECTOR,
};

// Type states for the builder
pub struct WithCookies;
pub struct WithDesignUrl;

pub struct DesignConfigBuilder<State = ()> {
    pub(crate) cookies_file: Option<PathBuf>,
    pub(crate) design_url: Option<String>,
    pub(crate) site_origin: String,
    pub(crate) stylesheet_url: String,
    pub(crate) template_selector: String,
    pub(crate) font_base_url: String,
    pub(crate) blob_url_prefix: String,
    pub(crate) output_path: PathBuf,
    pub(crate) headless: bool,
    pub(crate) page_load_timeout_secs: u64,
    pub(crate) navigation_timeout_secs: u64,
    pub(crate) dedupe_font_faces: bool,
    pub(crate) stylesheet_limits: StylesheetLimits,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for DesignConfigBuilder<()> {
    fn default() -> Self {
        Self {
            cookies_file: None,
            design_url: None,
            site_origin: SITE_ORIGIN.to_string(),
            stylesheet_url: STYLESHEET_URL.to_string(),
            template_selector: TEMPLATE_SELECTOR.to_string(),
            font_base_url: FONT_BASE_URL.to_string(),
            blob_url_prefix: BLOB_URL_PREFIX.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            headless: false,
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            dedupe_font_faces: false,
            stylesheet_limits: StylesheetLimits::default(),
            _phantom: PhantomData,
        }
    }
}

impl DesignConfig {
    /// Create a builder for configuring a `DesignConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> DesignConfigBuilder<()> {
        DesignConfigBuilder::default()
    }
}

impl<State> DesignConfigBuilder<State> {
    fn into_state<Next>(self) -> DesignConfigBuilder<Next> {
        DesignConfigBuilder {
            cookies_file: self.cookies_file,
            design_url: self.design_url,
            site_origin: self.site_origin,
            stylesheet_url: self.stylesheet_url,
            template_selector: self.template_selector,
            font_base_url: self.font_base_url,
            blob_url_prefix: self.blob_url_prefix,
            output_path: self.output_path,
            headless: self.headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            navigation_timeout_secs: self.navigation_timeout_secs,
            dedupe_font_faces: self.dedupe_font_faces,
            stylesheet_limits: self.stylesheet_limits,
            _phantom: PhantomData,
        }
    }
}

impl DesignConfigBuilder<()> {
    pub fn cookies_file(mut self, path: impl Into<PathBuf>) -> DesignConfigBuilder<WithCookies> {
        self.cookies_file = Some(path.into());
        self.into_state()
    }
}

impl DesignConfigBuilder<WithCookies> {
    pub fn design_url(mut self, url: impl Into<String>) -> DesignConfigBuilder<WithDesignUrl> {
        self.design_url = Some(url.into());
        self.into_state()
    }
}

fn parse_http_url(field: &str, value: &str) -> ConvertResult<Url> {
    let url = Url::parse(value)
        .map_err(|e| ConvertError::Config(format!("Invalid {field} '{value}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConvertError::Config(format!(
            "Invalid {field} '{value}': unsupported scheme '{scheme}'"
        ))),
    }
}

// Build method only available when all required fields are set
impl DesignConfigBuilder<WithDesignUrl> {
    /// Validate and build the configuration
    ///
    /// # Errors
    /// `ConvertError::Config` when a URL is not absolute http(s) or the
    /// template selector does not parse.
    pub fn build(self) -> ConvertResult<DesignConfig> {
        let cookies_file = self
            .cookies_file
            .ok_or_else(|| ConvertError::Config("cookies_file is required".to_string()))?;
        let design_url = self
            .design_url
            .ok_or_else(|| ConvertError::Config("design_url is required".to_string()))?;

        parse_http_url("design URL", &design_url)?;
        parse_http_url("site origin", &self.site_origin)?;
        parse_http_url("stylesheet URL", &self.stylesheet_url)?;
        parse_http_url("font base URL", &self.font_base_url)?;

        Selector::parse(&self.template_selector).map_err(|e| {
            ConvertError::Config(format!(
                "Invalid template selector '{}': {e}",
                self.template_selector
            ))
        })?;

        if self.blob_url_prefix.is_empty() {
            return Err(ConvertError::Config(
                "blob_url_prefix must not be empty".to_string(),
            ));
        }

        Ok(DesignConfig {
            cookies_file,
            design_url,
            site_origin: self.site_origin,
            stylesheet_url: self.stylesheet_url,
            template_selector: self.template_selector,
            font_base_url: self.font_base_url,
            blob_url_prefix: self.blob_url_prefix,
            output_path: self.output_path,
            headless: self.headless,
            page_load_timeout_secs: self.page_load_timeout_secs,
            navigation_timeout_secs: self.navigation_timeout_secs,
            dedupe_font_faces: self.dedupe_font_faces,
            stylesheet_limits: self.stylesheet_limits,
        })
    }
}

// Builder methods available at any state
impl<State> DesignConfigBuilder<State> {
    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Run the browser without a window (default: headed)
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn site_origin(mut self, origin: impl Into<String>) -> Self {
        self.site_origin = origin.into();
        self
    }

    #[must_use]
    pub fn stylesheet_url(mut self, url: impl Into<String>) -> Self {
        self.stylesheet_url = url.into();
        self
    }

    #[must_use]
    pub fn template_selector(mut self, selector: impl Into<String>) -> Self {
        self.template_selector = selector.into();
        self
    }

    /// Host the synthesized `@font-face` sources point at
    ///
    /// Must end with `/`; family paths are appended directly.
    #[must_use]
    pub fn font_base_url(mut self, url: impl Into<String>) -> Self {
        self.font_base_url = url.into();
        self
    }

    #[must_use]
    pub fn blob_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.blob_url_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.navigation_timeout_secs = secs;
        self
    }

    /// Collapse repeated families into a single `@font-face` block
    ///
    /// Off by default, which emits one block per styled element.
    #[must_use]
    pub fn dedupe_font_faces(mut self, dedupe: bool) -> Self {
        self.dedupe_font_faces = dedupe;
        self
    }

    #[must_use]
    pub fn stylesheet_limits(mut self, limits: StylesheetLimits) -> Self {
        self.stylesheet_limits = limits;
        self
    }
}
