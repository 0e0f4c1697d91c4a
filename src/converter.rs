//! Design capture pipeline
//!
//! `convert_design` drives the browser and the filesystem; `render_document`
//! is everything in between and runs without a browser.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::DesignConfig;
use crate::css_reducer::reduce_for_fragment;
use crate::document::{assemble_document, save_document};
use crate::error::{ConvertError, ConvertResult};
use crate::font_face::FontFaceSynthesizer;
use crate::inline_css::{
    BrowserBlobFetcher, InliningError, ResourceFetcher, download_stylesheet, inline_blob_images,
};
use crate::page_extractor::select_template_fragment;
use crate::session::{DesignSession, load_cookie_file};

/// Assembled document plus what went into it
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub html: String,
    pub font_faces: usize,
    pub rules_kept: usize,
    pub rules_total: usize,
    pub images_inlined: usize,
    pub image_failures: Vec<InliningError>,
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub output_path: PathBuf,
    pub font_faces: usize,
    pub rules_kept: usize,
    pub images_inlined: usize,
    /// `src` of every blob image left unresolved
    pub image_failures: Vec<String>,
}

/// Turn captured page markup and the site stylesheet into one document
///
/// Fonts are discovered across the whole page, while the stylesheet is
/// reduced against the template fragment as captured, before its images
/// are rewritten.
///
/// # Errors
/// * `ConvertError::Config` - template selector does not parse
/// * `ConvertError::Stylesheet` - stylesheet is malformed
/// * `ConvertError::Markup` - fragment could not be rewritten
pub async fn render_document<F>(
    page_markup: &str,
    stylesheet: &str,
    fetcher: &F,
    config: &DesignConfig,
) -> ConvertResult<RenderedDocument>
where
    F: ResourceFetcher + ?Sized,
{
    let fragment = select_template_fragment(page_markup, config.template_selector())
        .map_err(|e| ConvertError::Config(format!("{e:#}")))?;

    let font_faces = FontFaceSynthesizer::new(config.font_base_url())
        .dedupe_families(config.dedupe_font_faces())
        .synthesize(page_markup);

    let inlined = inline_blob_images(fragment.clone(), config.blob_url_prefix(), fetcher)
        .await
        .map_err(|e| ConvertError::Markup(format!("{e:#}")))?;

    let reduced = reduce_for_fragment(stylesheet, &fragment)?;

    let html = assemble_document(&font_faces, &reduced.to_css(), &inlined.html);

    Ok(RenderedDocument {
        html,
        font_faces: font_faces.len(),
        rules_kept: reduced.kept(),
        rules_total: reduced.total_rules,
        images_inlined: inlined.successes,
        image_failures: inlined.failures,
    })
}

/// Capture the configured design page and write it as a standalone document
///
/// The browser is closed before returning, whether or not the capture
/// succeeded. The output file is only written once every step has passed.
pub async fn convert_design(config: &DesignConfig) -> ConvertResult<ConversionReport> {
    let cookies = load_cookie_file(config.cookies_file()).await?;

    let session = DesignSession::launch(config)
        .await
        .map_err(ConvertError::browser)?;

    let captured = capture_with_session(&session, &cookies, config).await;

    if let Err(e) = session.close().await {
        warn!("Failed to close browser session: {e:#}");
    }

    let rendered = captured?;

    save_document(config.output_path(), &rendered.html)
        .await
        .map_err(|e| ConvertError::Output(format!("{e:#}")))?;
    info!(
        "Saved design to {} ({} font faces, {}/{} rules, {} images inlined)",
        config.output_path().display(),
        rendered.font_faces,
        rendered.rules_kept,
        rendered.rules_total,
        rendered.images_inlined
    );

    Ok(ConversionReport {
        output_path: config.output_path().to_path_buf(),
        font_faces: rendered.font_faces,
        rules_kept: rendered.rules_kept,
        images_inlined: rendered.images_inlined,
        image_failures: rendered.image_failures.into_iter().map(|f| f.url).collect(),
    })
}

async fn capture_with_session(
    session: &DesignSession,
    cookies: &[crate::session::SessionCookie],
    config: &DesignConfig,
) -> ConvertResult<RenderedDocument> {
    session
        .navigate(config.site_origin(), None)
        .await
        .map_err(ConvertError::browser)?;
    session
        .inject_cookies(cookies, config.site_origin())
        .await
        .map_err(ConvertError::browser)?;
    session
        .navigate(config.design_url(), Some(config.template_selector()))
        .await
        .map_err(ConvertError::browser)?;

    let page_markup = session.page_markup().await.map_err(ConvertError::browser)?;

    let client = Client::builder()
        .build()
        .map_err(|e| ConvertError::Network(e.to_string()))?;
    let stylesheet = download_stylesheet(&client, config).await?;

    let fetcher = BrowserBlobFetcher::new(session.page().clone());
    render_document(&page_markup, &stylesheet, &fetcher, config).await
}
