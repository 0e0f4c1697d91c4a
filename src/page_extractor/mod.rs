//! Page capture functions.
//!
//! This module provides functions for reading the rendered design out of
//! the browser page.

// Sub-modules
pub mod extractors;
pub mod js_scripts;

// Re-exports for public API
pub use extractors::{
    PageReadiness, capture_page_markup, select_template_fragment, wait_for_page_load,
};
