//! Browser session for a single design capture
//!
//! Owns the chromiumoxide browser, its event handler task, the one page the
//! capture runs on, and the throwaway profile directory.

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::cookies::SessionCookie;
use crate::browser_setup::launch_browser;
use crate::config::DesignConfig;
use crate::page_extractor::{capture_page_markup, wait_for_page_load};

/// Wrap an async page operation with a timeout
///
/// Distinguishes between the operation failing and the timeout expiring in
/// the returned error.
pub(crate) async fn with_page_timeout<F, T>(
    operation: F,
    timeout_secs: u64,
    operation_name: &str,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "{operation_name} timeout after {timeout_secs} seconds"
        )),
    }
}

/// Browser, handler and page for one capture
///
/// The handler MUST be aborted once the browser is gone or it keeps polling
/// a dead connection; `Drop` takes care of that when `close()` is skipped.
pub struct DesignSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    user_data_dir: Option<PathBuf>,
    navigation_timeout_secs: u64,
    page_load_timeout_secs: u64,
}

impl DesignSession {
    /// Launch a browser and open a blank page
    pub async fn launch(config: &DesignConfig) -> Result<Self> {
        let (browser, handler, user_data_dir) = launch_browser(config.headless(), None).await?;

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(anyhow::Error::new(e).context("Failed to create blank page"));
            }
        };
        info!("Browser session ready");

        Ok(Self {
            browser,
            handler,
            page,
            user_data_dir: Some(user_data_dir),
            navigation_timeout_secs: config.navigation_timeout_secs(),
            page_load_timeout_secs: config.page_load_timeout_secs(),
        })
    }

    /// The page the capture runs on
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Load `url` and wait for client-side rendering to settle
    ///
    /// With `template_selector` set, the wait also covers that element
    /// appearing in the DOM.
    pub async fn navigate(&self, url: &str, template_selector: Option<&str>) -> Result<()> {
        info!("Navigating to {url}");

        with_page_timeout(
            async {
                self.page
                    .goto(url)
                    .await
                    .with_context(|| format!("Failed to navigate to {url}"))?;
                self.page
                    .wait_for_navigation()
                    .await
                    .context("Failed to wait for navigation")?;
                Ok(())
            },
            self.navigation_timeout_secs,
            "Navigation",
        )
        .await?;

        wait_for_page_load(
            &self.page,
            template_selector,
            Duration::from_secs(self.page_load_timeout_secs),
        )
        .await
    }

    /// Install session cookies into the browser
    ///
    /// Domain-less cookies are scoped to `origin`.
    pub async fn inject_cookies(&self, cookies: &[SessionCookie], origin: &str) -> Result<()> {
        if cookies.is_empty() {
            warn!("Cookie file is empty, continuing without a session");
            return Ok(());
        }

        let params = cookies
            .iter()
            .map(|cookie| cookie.to_cookie_param(origin))
            .collect::<Vec<_>>();

        self.page
            .set_cookies(params)
            .await
            .context("Failed to set session cookies")?;
        info!("Injected {} session cookies", cookies.len());
        Ok(())
    }

    /// Serialized DOM of the current page
    pub async fn page_markup(&self) -> Result<String> {
        capture_page_markup(&self.page).await
    }

    /// Shut the browser down and remove its profile directory
    ///
    /// The profile is removed only after `wait()` returns so the browser has
    /// released its file handles.
    pub async fn close(mut self) -> Result<()> {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }
        self.handler.abort();
        self.cleanup_profile_dir();
        Ok(())
    }

    fn cleanup_profile_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            info!("Cleaning up profile directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up profile directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for DesignSession {
    fn drop(&mut self) {
        self.handler.abort();
        if self.user_data_dir.is_some() {
            warn!("DesignSession dropped without close() - removing profile dir in Drop");
            self.cleanup_profile_dir();
        }
    }
}
