//! Web-font resolution
//!
//! Turns the font families named by a design's inline styles into
//! embeddable `@font-face` rules pointing at the hosted font files.

// Sub-modules
pub mod synthesizer;
pub mod types;

// Re-exports for public API
pub use synthesizer::{FontFaceSynthesizer, extract_font_family};
pub use types::{FontFaceRule, FontFormat, FontReference, FontStyle, FontWeight};
