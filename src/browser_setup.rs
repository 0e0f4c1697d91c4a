use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{error, info, trace, warn};

use crate::utils::constants::CHROME_USER_AGENT;

/// Flags passed to every launched browser.
///
/// The design editor refuses obviously automated sessions, so the automation
/// banner and blink flag are suppressed alongside the usual first-run noise.
const LAUNCH_ARGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-infobars",
    "--disable-notifications",
    "--disable-print-preview",
    "--disable-popup-blocking",
    "--disable-extensions",
    "--disable-breakpad",
    "--disable-hang-monitor",
    "--disable-prompt-on-repost",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-features=TranslateUI",
    "--disable-setuid-sandbox",
    "--no-first-run",
    "--no-default-browser-check",
    "--no-sandbox",
    "--password-store=basic",
    "--use-mock-keychain",
    "--mute-audio",
];

/// Find Chrome/Chromium executable on the system with platform-specific search paths.
///
/// `CHROMIUM_PATH` overrides every other lookup.
pub async fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!(
                "Using browser from CHROMIUM_PATH environment variable: {}",
                path.display()
            );
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH environment variable points to non-existent file: {}",
            path.display()
        );
    }

    for candidate in platform_candidates() {
        let path = if let Some(rest) = candidate.strip_prefix("~/") {
            let Some(home) = dirs::home_dir() else {
                continue;
            };
            home.join(rest)
        } else if candidate.contains('%') && cfg!(target_os = "windows") {
            PathBuf::from(expand_windows_env_vars(candidate))
        } else {
            PathBuf::from(candidate)
        };

        if path.exists() {
            info!("Found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in &["chromium", "chromium-browser", "google-chrome", "chrome"] {
            if let Ok(output) = Command::new("which").arg(cmd).output()
                && output.status.success()
            {
                let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !found.is_empty() {
                    let path = PathBuf::from(found);
                    info!("Found browser using 'which' command: {}", path.display());
                    return Ok(path);
                }
            }
        }
    }

    warn!("No Chrome/Chromium executable found. Will download and use fetcher.");
    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

fn platform_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"%LOCALAPPDATA%\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "~/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
        ]
    }
}

/// Expand `%VAR%` tokens in a Windows path.
///
/// Unknown variables keep their `%VAR%` token, `%%` collapses to `%`, and an
/// unterminated token is copied through as is.
fn expand_windows_env_vars(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            result.push(ch);
            continue;
        }

        let mut var_name = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == '%' {
                closed = true;
                break;
            }
            var_name.push(c);
        }

        match (closed, var_name.is_empty()) {
            (true, true) => result.push('%'),
            (true, false) => match std::env::var(&var_name) {
                Ok(value) => result.push_str(&value),
                Err(_) => {
                    result.push('%');
                    result.push_str(&var_name);
                    result.push('%');
                }
            },
            (false, _) => {
                result.push('%');
                result.push_str(&var_name);
            }
        }
    }

    result
}

/// Downloads a managed Chromium into the user cache directory.
/// Returns a path to the downloaded executable.
pub async fn download_managed_browser() -> Result<PathBuf> {
    info!("Downloading managed Chromium browser...");

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| {
            let fallback = std::env::temp_dir();
            warn!(
                "Could not determine user cache directory, using temp directory fallback: {}",
                fallback.display()
            );
            fallback
        })
        .join("kodegen_design_capture")
        .join("chromium");

    std::fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .context("Failed to build fetcher options")?,
    );

    let revision_info = fetcher.fetch().await.context("Failed to fetch browser")?;

    info!(
        "Downloaded Chromium to: {}",
        revision_info.folder_path.display()
    );

    Ok(revision_info.executable_path)
}

/// Launch a browser, downloading one first when none is installed.
///
/// # Arguments
/// * `headless` - Run without a visible window
/// * `chrome_data_dir` - Profile directory; defaults to a per-process temp directory
///
/// Returns the browser, the task driving its CDP handler, and the profile
/// directory the caller should remove once the browser has exited.
pub async fn launch_browser(
    headless: bool,
    chrome_data_dir: Option<PathBuf>,
) -> Result<(Browser, JoinHandle<()>, PathBuf)> {
    let chrome_path = match find_browser_executable().await {
        Ok(path) => path,
        Err(_) => download_managed_browser().await?,
    };

    let user_data_dir = chrome_data_dir.unwrap_or_else(|| {
        std::env::temp_dir().join(format!("kodegen_design_capture_{}", std::process::id()))
    });

    std::fs::create_dir_all(&user_data_dir).context("Failed to create user data directory")?;

    let mut config_builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(1920, 1080)
        .user_data_dir(user_data_dir.clone())
        .chrome_executable(chrome_path)
        .arg(format!("--user-agent={CHROME_USER_AGENT}"));

    config_builder = if headless {
        config_builder.headless_mode(HeadlessMode::default())
    } else {
        config_builder.with_head()
    };

    for arg in LAUNCH_ARGS {
        config_builder = config_builder.arg(*arg);
    }

    let browser_config = config_builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    info!("Launching browser (headless: {headless})");
    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch browser")?;

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                let error_msg = e.to_string();
                if is_benign_handler_error(&error_msg) {
                    trace!("Suppressed benign CDP serialization error: {error_msg}");
                } else {
                    error!("Browser handler error: {e:?}");
                }
            }
        }
        info!("Browser handler task completed");
    });

    Ok((browser, handler_task, user_data_dir))
}

/// CDP events chromiumoxide does not model surface as deserialization errors.
/// See <https://github.com/mattsse/chromiumoxide/issues/167>.
fn is_benign_handler_error(message: &str) -> bool {
    message.contains("data did not match any variant of untagged enum Message")
        || message.contains("Failed to deserialize WS response")
}
