//! Tests for the type-safe configuration builder pattern

use kodegen_tools_design_capture::config::DesignConfig;
use kodegen_tools_design_capture::inline_css::StylesheetLimits;
use kodegen_tools_design_capture::{ConvertError, utils};
use std::path::Path;
use std::time::Duration;

mod common;

#[test]
fn test_builder_requires_cookies_and_design_url() {
    // This should not compile if uncommented - testing compile-time guarantees
    // let config = DesignConfig::builder().build();

    // This should also not compile - design URL missing
    // let config = DesignConfig::builder().cookies_file("c.json").build();

    let config = DesignConfig::builder()
        .cookies_file("c.json")
        .design_url("https://www.canva.com/design/DAF/view")
        .build()
        .unwrap();

    assert_eq!(config.cookies_file(), Path::new("c.json"));
    assert_eq!(config.design_url(), "https://www.canva.com/design/DAF/view");
}

#[test]
fn test_builder_defaults() {
    let config = common::test_config();

    assert_eq!(config.site_origin(), utils::SITE_ORIGIN);
    assert_eq!(config.stylesheet_url(), utils::STYLESHEET_URL);
    assert_eq!(config.template_selector(), ".uPeMFQ");
    assert_eq!(config.font_base_url(), "https://font-public.canva.com/");
    assert_eq!(config.blob_url_prefix(), "blob:https://www.canva.com/");
    assert_eq!(config.output_path(), Path::new("new_page.html"));
    assert!(!config.headless());
    assert!(!config.dedupe_font_faces());
    assert_eq!(config.page_load_timeout_secs(), 20);
    assert_eq!(config.navigation_timeout_secs(), 30);
}

#[test]
fn test_builder_with_all_optional_fields() {
    let config = DesignConfig::builder()
        .cookies_file("c.json")
        .output_path("out/design.html")
        .headless(true)
        .design_url("https://example.com/design")
        .site_origin("https://example.com/")
        .stylesheet_url("https://cdn.example.com/site.css")
        .template_selector("#design")
        .font_base_url("https://fonts.example.com/")
        .blob_url_prefix("blob:https://example.com/")
        .page_load_timeout_secs(5)
        .navigation_timeout_secs(7)
        .dedupe_font_faces(true)
        .stylesheet_limits(StylesheetLimits {
            timeout: Duration::from_secs(3),
            max_bytes: 1024,
        })
        .build()
        .unwrap();

    assert_eq!(config.output_path(), Path::new("out/design.html"));
    assert!(config.headless());
    assert_eq!(config.template_selector(), "#design");
    assert_eq!(config.page_load_timeout_secs(), 5);
    assert_eq!(config.navigation_timeout_secs(), 7);
    assert!(config.dedupe_font_faces());
    assert_eq!(config.stylesheet_limits().max_bytes, 1024);
}

#[test]
fn test_builder_rejects_relative_design_url() {
    let result = DesignConfig::builder()
        .cookies_file("c.json")
        .design_url("design/DAF/view")
        .build();

    assert!(matches!(result, Err(ConvertError::Config(_))));
}

#[test]
fn test_builder_rejects_non_http_scheme() {
    let result = DesignConfig::builder()
        .cookies_file("c.json")
        .design_url("file:///etc/passwd")
        .build();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn test_builder_rejects_invalid_selector() {
    let result = DesignConfig::builder()
        .cookies_file("c.json")
        .design_url("https://www.canva.com/design/DAF/view")
        .template_selector("div[")
        .build();

    assert!(matches!(result, Err(ConvertError::Config(_))));
}

#[test]
fn test_config_serializes() {
    let config = common::test_config();

    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["template_selector"], ".uPeMFQ");
    assert_eq!(json["headless"], false);
}
