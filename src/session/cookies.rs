//! Session cookie file loading
//!
//! Reads the JSON cookie export of a logged-in browser session and turns
//! each record into a CDP `CookieParam`.

use chromiumoxide::cdp::browser_protocol::network::{CookieParam, CookieSameSite, TimeSinceEpoch};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};

/// One record of a browser cookie export
///
/// Unknown fields are ignored; only `name` and `value` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: Option<bool>,
    #[serde(default)]
    pub http_only: Option<bool>,
    #[serde(default)]
    pub same_site: Option<String>,
    /// Seconds since the Unix epoch; absent for session cookies
    #[serde(default, alias = "expiry")]
    pub expiration_date: Option<f64>,
}

/// Map an export's `sameSite` spelling onto the CDP enum
///
/// Exports write `no_restriction` where CDP expects `None`. Values CDP has
/// no counterpart for (`unspecified`) drop the attribute.
pub fn normalize_same_site(value: &str) -> Option<CookieSameSite> {
    match value.to_ascii_lowercase().as_str() {
        "no_restriction" | "none" => Some(CookieSameSite::None),
        "lax" => Some(CookieSameSite::Lax),
        "strict" => Some(CookieSameSite::Strict),
        _ => None,
    }
}

impl SessionCookie {
    /// Convert to a CDP cookie
    ///
    /// A cookie without a domain is bound to `fallback_url` so the browser
    /// can still scope it.
    pub fn to_cookie_param(&self, fallback_url: &str) -> CookieParam {
        let mut param = CookieParam::new(self.name.clone(), self.value.clone());

        match self.domain.as_deref().filter(|d| !d.is_empty()) {
            Some(domain) => param.domain = Some(domain.to_string()),
            None => param.url = Some(fallback_url.to_string()),
        }
        param.path.clone_from(&self.path);
        param.secure = self.secure;
        param.http_only = self.http_only;
        param.same_site = self.same_site.as_deref().and_then(normalize_same_site);
        param.expires = self.expiration_date.map(TimeSinceEpoch::new);

        param
    }
}

/// Read and parse a cookie file
///
/// # Errors
/// * `ConvertError::CookieFileNotFound` - no file at `path`
/// * `ConvertError::InvalidCookieFile` - content is not a JSON array of cookies
/// * `ConvertError::Io` - any other read failure
pub async fn load_cookie_file(path: &Path) -> ConvertResult<Vec<SessionCookie>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConvertError::CookieFileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let cookies: Vec<SessionCookie> =
        serde_json::from_str(&content).map_err(|source| ConvertError::InvalidCookieFile {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!("Loaded {} cookies from {}", cookies.len(), path.display());
    Ok(cookies)
}
