pub mod browser_setup;
pub mod cli;
pub mod config;
pub mod converter;
pub mod css_reducer;
pub mod document;
pub mod error;
pub mod font_face;
pub mod inline_css;
pub mod page_extractor;
pub mod session;
pub mod utils;

pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use cli::{Cli, CliError, ResolvedArgs};
pub use config::DesignConfig;
pub use converter::{ConversionReport, RenderedDocument, convert_design, render_document};
pub use css_reducer::{
    ReducedStylesheet, SelectorSet, StylesheetError, extract_selectors, reduce_stylesheet,
};
pub use document::{assemble_document, save_document};
pub use error::{ConvertError, ConvertResult};
pub use font_face::{FontFaceRule, FontFaceSynthesizer, FontReference, FontStyle, FontWeight};
pub use inline_css::{
    BlobFetchError, BrowserBlobFetcher, FetchFuture, FetchedResource, InliningResult,
    ResourceBody, ResourceFetcher,
};
pub use session::{DesignSession, SessionCookie};

pub async fn convert(config: DesignConfig) -> ConvertResult<ConversionReport> {
    convert_design(&config).await
}
