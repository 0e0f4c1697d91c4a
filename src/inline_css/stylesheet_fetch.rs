//! Site stylesheet download
//!
//! The stylesheet is fetched once per run over plain HTTP, outside the
//! browser session, and must fit in `StylesheetLimits::max_bytes`.

use futures::StreamExt;
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::DesignConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::utils::constants::CHROME_USER_AGENT;

/// Timeout and size cap for the stylesheet download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesheetLimits {
    pub timeout: Duration,

    /// Site-wide bundles are a few megabytes
    pub max_bytes: usize,
}

impl Default for StylesheetLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Download the stylesheet named by `config.stylesheet_url()`
///
/// # Errors
/// `ConvertError::Network` on transport failure, a non-success status, a
/// body over the size cap (declared or streamed) or a body that is not UTF-8.
pub async fn download_stylesheet(client: &Client, config: &DesignConfig) -> ConvertResult<String> {
    let url = config.stylesheet_url();
    let limits = config.stylesheet_limits();
    let fail = |reason: String| ConvertError::Network(format!("stylesheet {url}: {reason}"));

    let response = client
        .get(url)
        .timeout(limits.timeout)
        .header(header::USER_AGENT, CHROME_USER_AGENT)
        .header(header::ACCEPT, "text/css,*/*;q=0.1")
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| fail(e.to_string()))?;

    if let Some(declared) = response.content_length() {
        if declared > limits.max_bytes as u64 {
            return Err(fail(format!(
                "declares {declared} bytes, over the {} byte limit",
                limits.max_bytes
            )));
        }
    }

    let mut body = Vec::new();
    let mut chunks = response.bytes_stream();
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(|e| fail(e.to_string()))?;
        if body.len() + chunk.len() > limits.max_bytes {
            return Err(fail(format!("body exceeds the {} byte limit", limits.max_bytes)));
        }
        body.extend_from_slice(&chunk);
    }

    let css = String::from_utf8(body).map_err(|e| fail(format!("not UTF-8: {e}")))?;
    log::info!("Downloaded stylesheet: {} bytes", css.len());
    Ok(css)
}
