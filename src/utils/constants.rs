//! Shared configuration constants for design capture
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Site origin visited before session cookies are injected
///
/// Cookies are bound to this origin when a record carries no domain.
pub const SITE_ORIGIN: &str = "https://www.canva.com/";

/// Site-wide stylesheet downloaded once per run and reduced to the rules
/// relevant to the captured template.
pub const STYLESHEET_URL: &str = "https://static.canva.com/web/36b99f3659b2c9ed.ltr.css";

/// Selector of the element wrapping a rendered design page
pub const TEMPLATE_SELECTOR: &str = ".uPeMFQ";

/// Host serving the font files referenced by designs
///
/// Font files live under `{FONT_BASE_URL}{Family/With/Slashes}/{file}.{ext}`.
pub const FONT_BASE_URL: &str = "https://font-public.canva.com/";

/// Prefix of blob URLs minted by the design editor for rendered images
pub const BLOB_URL_PREFIX: &str = "blob:https://www.canva.com/";

/// Default location of the assembled document, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "new_page.html";

/// Page load budget: 20 seconds
///
/// Design pages render client-side; the budget covers navigation plus the
/// readyState polling that follows it.
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 20;

/// Navigation timeout for `page.goto()` and `wait_for_navigation()`: 30 seconds
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Chrome user agent string for stealth mode
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
