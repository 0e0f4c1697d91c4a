//! Error types for the design capture pipeline
//!
//! Every step of a run is fatal on failure: nothing is retried and no
//! partial document is written. Per-image inlining failures are the one
//! exception and are reported through `InliningResult` instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::css_reducer::StylesheetError;

/// Result type alias for pipeline operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error types for a design capture run
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Session cookie file does not exist
    #[error("The file '{}' was not found.", .0.display())]
    CookieFileNotFound(PathBuf),

    /// Session cookie file exists but is not a cookie list
    #[error("Invalid cookie file '{}': {source}", path.display())]
    InvalidCookieFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration rejected by the builder
    #[error("Configuration error: {0}")]
    Config(String),

    /// Browser launch, navigation or scripting failed
    #[error("Browser error: {0}")]
    Browser(String),

    /// Stylesheet download failed
    #[error("Network error: {0}")]
    Network(String),

    /// Site stylesheet could not be parsed
    #[error(transparent)]
    Stylesheet(#[from] StylesheetError),

    /// Markup could not be rewritten
    #[error("Markup error: {0}")]
    Markup(String),

    /// Assembled document could not be written
    #[error("Failed to write output: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Wrap an anyhow chain from browser glue code, keeping its context
    pub(crate) fn browser(err: anyhow::Error) -> Self {
        Self::Browser(format!("{err:#}"))
    }
}
