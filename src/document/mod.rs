//! Assembly of the self-contained output document

use anyhow::{Context, Result};
use std::path::Path;

use crate::font_face::FontFaceRule;

/// Concatenate font rules, reduced CSS and the fragment into one document
///
/// Font rules come first in discovery order, then the reduced stylesheet,
/// all inside a single `<style>` element.
#[must_use]
pub fn assemble_document(font_faces: &[FontFaceRule], reduced_css: &str, fragment: &str) -> String {
    let mut styles = String::new();
    for rule in font_faces {
        styles.push_str(&rule.to_string());
    }
    styles.push_str(reduced_css);

    format!("<html><head><style>{styles}</style></head><body>{fragment}</body></html>")
}

/// Write the assembled document to `path`, replacing any previous content
pub async fn save_document(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    tokio::fs::write(path, document)
        .await
        .with_context(|| format!("Failed to write document to {}", path.display()))?;

    log::info!("Wrote {} bytes to {}", document.len(), path.display());
    Ok(())
}
