//! Page capture functions
//!
//! Waits for a client-rendered design page to settle and pulls the template
//! markup out of the serialized DOM.

use super::js_scripts::ready_state_script;
use anyhow::{Context, Result};
use chromiumoxide::Page;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::time::Duration;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Snapshot returned by the readiness script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReadiness {
    pub ready_state: String,
    pub template_present: bool,
}

impl PageReadiness {
    /// Document loaded and, when one was asked for, the template rendered
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready_state == "complete" && self.template_present
    }
}

async fn probe_readiness(page: &Page, script: &str) -> Result<PageReadiness> {
    page.evaluate(script)
        .await
        .context("Readiness script failed")?
        .into_value()
        .context("Unexpected readiness payload")
}

/// Wait until the page has loaded and the design template is in the DOM
///
/// Design pages render client-side, so a finished navigation says nothing
/// about whether the template exists yet. With `template_selector` unset
/// only `document.readyState` is checked. After `max_wait` the capture goes
/// ahead with whatever has rendered.
pub async fn wait_for_page_load(
    page: &Page,
    template_selector: Option<&str>,
    max_wait: Duration,
) -> Result<()> {
    let script = ready_state_script(template_selector);

    let poll = async {
        loop {
            match probe_readiness(page, &script).await {
                Ok(readiness) if readiness.is_ready() => return,
                Ok(readiness) => log::trace!("Page not ready yet: {readiness:?}"),
                Err(e) => log::debug!("{e:#}, retrying"),
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    };

    match tokio::time::timeout(max_wait, poll).await {
        Ok(()) => log::debug!("Page ready"),
        Err(_) => match template_selector {
            Some(selector) => log::warn!(
                "'{selector}' did not appear within {}s, capturing the page as is",
                max_wait.as_secs()
            ),
            None => log::warn!(
                "Page still loading after {}s, capturing it as is",
                max_wait.as_secs()
            ),
        },
    }
    Ok(())
}

/// Serialized DOM of the page as currently rendered
pub async fn capture_page_markup(page: &Page) -> Result<String> {
    let markup = page
        .content()
        .await
        .context("Failed to read page content")?;
    log::debug!("Captured {} bytes of page markup", markup.len());
    Ok(markup)
}

/// Outer HTML of the first element matching `selector`
///
/// Returns an empty string when nothing matches, so a missing template
/// yields an empty document body rather than an error.
pub fn select_template_fragment(page_markup: &str, selector: &str) -> Result<String> {
    let selector = Selector::parse(selector)
        .map_err(|e| anyhow::anyhow!("Invalid template selector '{selector}': {e}"))?;

    let document = Html::parse_document(page_markup);
    match document.select(&selector).next() {
        Some(element) => Ok(element.html()),
        None => {
            log::warn!("No element matches the template selector, capturing an empty fragment");
            Ok(String::new())
        }
    }
}
