//! Authenticated browser session
//!
//! Cookie loading and the browser lifecycle used to reach a design page.

pub mod browser;
pub mod cookies;

pub use browser::DesignSession;
pub use cookies::{SessionCookie, load_cookie_file, normalize_same_site};
