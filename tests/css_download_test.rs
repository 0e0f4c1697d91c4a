//! Stylesheet download tests against a local mock server

use kodegen_tools_design_capture::inline_css::{StylesheetLimits, download_stylesheet};
use kodegen_tools_design_capture::{
    ConvertError, DesignConfig, extract_selectors, reduce_stylesheet,
};
use mockito::ServerGuard;
use reqwest::Client;
use std::time::Duration;

mod common;
use common::{create_css_mock, create_error_mock, test_url};

fn config_for(server: &ServerGuard, path: &str, limits: StylesheetLimits) -> DesignConfig {
    DesignConfig::builder()
        .cookies_file("cookies.json")
        .design_url("https://www.canva.com/design/DAFtest/view")
        .stylesheet_url(test_url(server, path))
        .stylesheet_limits(limits)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_downloads_stylesheet() {
    let mut server = mockito::Server::new_async().await;
    let css = ".uPeMFQ { position: relative }\n.other { color: red }";
    let mock = create_css_mock(&mut server, "/web/site.ltr.css", css).await;
    let config = config_for(&server, "/web/site.ltr.css", StylesheetLimits::default());

    let body = download_stylesheet(&Client::new(), &config).await.unwrap();

    mock.assert_async().await;
    assert_eq!(body, css);

    let reduced =
        reduce_stylesheet(&body, &extract_selectors(r#"<div class="uPeMFQ"></div>"#)).unwrap();
    assert_eq!(reduced.kept(), 1);
}

#[tokio::test]
async fn test_error_status_is_network_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = create_error_mock(&mut server, "/missing.css", 404).await;
    let config = config_for(&server, "/missing.css", StylesheetLimits::default());

    let err = download_stylesheet(&Client::new(), &config).await.unwrap_err();

    assert!(matches!(err, ConvertError::Network(_)), "unexpected error: {err:?}");
    assert!(err.to_string().contains("404"));
    assert!(err.to_string().contains("/missing.css"));
}

#[tokio::test]
async fn test_size_limit_enforced() {
    let mut server = mockito::Server::new_async().await;
    let css = ".a { color: red }\n".repeat(100);
    let _mock = create_css_mock(&mut server, "/big.css", &css).await;
    let limits = StylesheetLimits {
        timeout: Duration::from_secs(5),
        max_bytes: 64,
    };
    let config = config_for(&server, "/big.css", limits);

    let err = download_stylesheet(&Client::new(), &config).await.unwrap_err();

    assert!(matches!(err, ConvertError::Network(_)));
    assert!(err.to_string().contains("64 byte limit"), "unexpected error: {err}");
}

#[tokio::test]
async fn test_invalid_utf8_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/latin1.css")
        .with_status(200)
        .with_body(vec![b'a', 0xff, 0xfe, b'{', b'}'])
        .create_async()
        .await;
    let config = config_for(&server, "/latin1.css", StylesheetLimits::default());

    let err = download_stylesheet(&Client::new(), &config).await.unwrap_err();

    assert!(err.to_string().contains("not UTF-8"), "unexpected error: {err}");
}
