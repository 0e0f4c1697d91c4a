//! Test utilities and helper functions for the design capture test suite

use kodegen_tools_design_capture::{
    BlobFetchError, DesignConfig, FetchFuture, FetchedResource, ResourceBody, ResourceFetcher,
};
use mockito::{Mock, ServerGuard};
use std::collections::HashMap;
use std::sync::Mutex;

#[allow(dead_code)]
pub const BLOB_PREFIX: &str = "blob:https://www.canva.com/";
#[allow(dead_code)]
pub const FONT_BASE: &str = "https://font-public.canva.com/";

/// In-memory stand-in for the browser blob fetcher
///
/// Unknown URLs fail the way a revoked blob does in the page.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockFetcher {
    resources: HashMap<String, Result<FetchedResource, BlobFetchError>>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_svg(mut self, url: &str, markup: &str) -> Self {
        self.resources.insert(
            url.to_string(),
            Ok(FetchedResource {
                media_type: "image/svg+xml".to_string(),
                body: ResourceBody::Text(markup.to_string()),
            }),
        );
        self
    }

    pub fn with_bytes(mut self, url: &str, media_type: &str, bytes: &[u8]) -> Self {
        self.resources.insert(
            url.to_string(),
            Ok(FetchedResource {
                media_type: media_type.to_string(),
                body: ResourceBody::Bytes(bytes.to_vec()),
            }),
        );
        self
    }

    /// URLs fetched so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ResourceFetcher for MockFetcher {
    fn fetch_resource<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        self.requests.lock().unwrap().push(url.to_string());
        let result = self.resources.get(url).cloned().unwrap_or_else(|| {
            Err(BlobFetchError::Script {
                url: url.to_string(),
                message: "TypeError: Failed to fetch".to_string(),
            })
        });
        Box::pin(async move { result })
    }
}

/// Config with site defaults, suitable for `render_document`
#[allow(dead_code)]
pub fn test_config() -> DesignConfig {
    DesignConfig::builder()
        .cookies_file("cookies.json")
        .design_url("https://www.canva.com/design/DAFtest/view")
        .build()
        .unwrap()
}

/// Page markup wrapping `template` in the editor chrome around a design
#[allow(dead_code)]
pub fn design_page(head: &str, template: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>{head}</head>
<body>
    <nav class="toolbar"><button class="btn">Share</button></nav>
    <main>{template}</main>
</body>
</html>"#
    )
}

/// Creates a mock endpoint that serves a stylesheet
#[allow(dead_code)]
pub async fn create_css_mock(server: &mut ServerGuard, path: &str, css: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/css; charset=utf-8")
        .with_body(css)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut ServerGuard, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Helper to create test URLs
#[allow(dead_code)]
pub fn test_url(server: &ServerGuard, path: &str) -> String {
    format!("{}{}", server.url(), path)
}
