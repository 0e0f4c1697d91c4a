//! JavaScript evaluation scripts
//!
//! This module contains the JavaScript code evaluated inside the design
//! page.

/// JavaScript template reporting page readiness
///
/// `__TEMPLATE_SELECTOR__` is a JSON string literal or `null`. An invalid
/// selector reports the template as missing rather than throwing.
const READY_STATE_SCRIPT: &str = r#"
    (() => {
        const selector = __TEMPLATE_SELECTOR__;
        let templatePresent = true;
        if (selector !== null) {
            try {
                templatePresent = document.querySelector(selector) !== null;
            } catch (_) {
                templatePresent = false;
            }
        }
        return { readyState: document.readyState, templatePresent };
    })()
"#;

/// Build the readiness script, optionally waiting on `template_selector`
#[must_use]
pub fn ready_state_script(template_selector: Option<&str>) -> String {
    let literal = match template_selector {
        Some(selector) => serde_json::Value::String(selector.to_string()).to_string(),
        None => "null".to_string(),
    };
    READY_STATE_SCRIPT.replace("__TEMPLATE_SELECTOR__", &literal)
}

/// JavaScript template fetching a blob URL from inside the page
///
/// `__BLOB_URL__` is replaced with a JSON string literal. SVG blobs come
/// back as text, everything else as base64. Failures resolve to
/// `{ error }` instead of rejecting.
const BLOB_FETCH_TEMPLATE: &str = r#"
    (async () => {
        try {
            const response = await fetch(__BLOB_URL__);
            const blob = await response.blob();
            if (blob.type === 'image/svg+xml') {
                return { mediaType: blob.type, text: await blob.text() };
            }
            const dataUrl = await new Promise((resolve, reject) => {
                const reader = new FileReader();
                reader.onloadend = () => resolve(reader.result);
                reader.onerror = () => reject(reader.error);
                reader.readAsDataURL(blob);
            });
            return { mediaType: blob.type, base64: String(dataUrl).split(',', 2)[1] || '' };
        } catch (error) {
            return { error: String((error && error.message) || error) };
        }
    })()
"#;

/// Build the blob fetch script for `url`
#[must_use]
pub fn blob_fetch_script(url: &str) -> String {
    // A JSON string is a valid JS string literal
    let literal = serde_json::Value::String(url.to_string()).to_string();
    BLOB_FETCH_TEMPLATE.replace("__BLOB_URL__", &literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_state_script_without_template() {
        let script = ready_state_script(None);
        assert!(script.contains("const selector = null;"));
    }

    #[test]
    fn test_ready_state_script_quotes_selector() {
        let script = ready_state_script(Some(r#"div[data-x="1"]"#));
        assert!(script.contains(r#"const selector = "div[data-x=\"1\"]";"#));
    }

    #[test]
    fn test_blob_url_is_quoted() {
        let script = blob_fetch_script("blob:https://www.canva.com/1234-abcd");
        assert!(script.contains(r#"fetch("blob:https://www.canva.com/1234-abcd")"#));
    }

    #[test]
    fn test_quotes_in_url_are_escaped() {
        let script = blob_fetch_script(r#"blob:x");alert("y"#);
        assert!(script.contains(r#"fetch("blob:x\");alert(\"y")"#));
    }
}
