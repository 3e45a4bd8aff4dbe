//! ReDoc viewer page.
//!
//! The page loads ReDoc from a CDN and points it at the served document by
//! URL, so the document itself is never embedded in the HTML.
//!
//! ## Usage
//!
//! ```
//! use pinax_docs::ReDoc;
//!
//! let redoc = ReDoc::new("Pet Store - API Documentation");
//! let html = redoc.html("http://localhost:1337/swagger/doc");
//!
//! assert!(html.contains(r#"spec-url="http://localhost:1337/swagger/doc""#));
//! ```

use pinax_config::UiConfig;

use crate::swagger::Info;

/// ReDoc release loaded when none is configured.
pub const DEFAULT_REDOC_VERSION: &str = "2.1.5";

/// Responses expanded initially when none are configured.
pub const DEFAULT_EXPAND_RESPONSES: &str = "200,201";

/// ReDoc configuration and HTML generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReDoc {
    /// Title for the HTML page.
    title: String,
    /// Value of the `expand-responses` attribute.
    expand_responses: String,
    /// Whether to hide download button.
    hide_download_button: bool,
    /// Whether to hide hostname in server URL.
    hide_hostname: bool,
    /// Whether to disable search.
    disable_search: bool,
    /// ReDoc version to use from CDN.
    redoc_version: String,
}

impl ReDoc {
    /// Create a new ReDoc page with the given title and default settings.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            expand_responses: DEFAULT_EXPAND_RESPONSES.to_string(),
            hide_download_button: false,
            hide_hostname: false,
            disable_search: false,
            redoc_version: DEFAULT_REDOC_VERSION.to_string(),
        }
    }

    /// Create the page described by the viewer settings.
    ///
    /// The title defaults to `"<info.title> - API Documentation"`.
    #[must_use]
    pub fn from_ui(ui: &UiConfig, info: &Info) -> Self {
        let title = ui
            .title
            .clone()
            .unwrap_or_else(|| format!("{} - API Documentation", info.title));

        Self {
            expand_responses: ui
                .expand_responses
                .clone()
                .unwrap_or_else(|| DEFAULT_EXPAND_RESPONSES.to_string()),
            hide_download_button: ui.hide_download_button,
            hide_hostname: ui.hide_hostname,
            disable_search: ui.disable_search,
            redoc_version: ui
                .redoc_version
                .clone()
                .unwrap_or_else(|| DEFAULT_REDOC_VERSION.to_string()),
            ..Self::new(title)
        }
    }

    /// Generate the HTML page viewing the document at `spec_url`.
    #[must_use]
    pub fn html(&self, spec_url: &str) -> String {
        let mut flags = String::new();
        for (enabled, attr) in [
            (self.hide_download_button, "hide-download-button"),
            (self.hide_hostname, "hide-hostname"),
            (self.disable_search, "disable-search"),
        ] {
            if enabled {
                flags.push(' ');
                flags.push_str(attr);
            }
        }

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link href="https://fonts.googleapis.com/css?family=Montserrat:300,400,700|Roboto:300,400,700" rel="stylesheet">
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
    <redoc spec-url="{spec_url}" expand-responses="{expand_responses}"{flags}></redoc>
    <script src="https://cdn.redoc.ly/redoc/v{version}/bundles/redoc.standalone.js"></script>
</body>
</html>"##,
            title = html_escape(&self.title),
            spec_url = html_escape(spec_url),
            expand_responses = html_escape(&self.expand_responses),
            flags = flags,
            version = html_escape(self.redoc_version.trim_start_matches('v')),
        )
    }

    /// Generate the HTML as bytes for use in HTTP responses.
    #[must_use]
    pub fn html_bytes(&self, spec_url: &str) -> bytes::Bytes {
        bytes::Bytes::from(self.html(spec_url))
    }
}

/// Simple HTML escape for XSS prevention.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
