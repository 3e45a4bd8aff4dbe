//! Documentation endpoint handlers.
//!
//! The document is serialized once when the handler is created and served
//! from memory afterwards. The viewer endpoint either renders the bundled
//! ReDoc page or redirects to an external viewer, in both cases pointing at
//! the document URL as seen by the client.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST, LOCATION};
use http::{HeaderMap, Response, StatusCode};
use http_body_util::Full;
use pinax_config::UiConfig;
use pinax_docs::{DocsResult, ReDoc, Swagger};

use crate::server::HttpResponse;

/// Path of the document endpoint.
pub const DOC_PATH: &str = "/swagger/doc";

/// Path of the viewer endpoint.
pub const UI_PATH: &str = "/swagger/ui";

/// Header carrying the client-facing scheme behind a proxy.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// How the viewer endpoint answers.
#[derive(Debug, Clone)]
enum Viewer {
    /// Redirect to an external viewer.
    Redirect(String),
    /// Render the bundled ReDoc page.
    Page(ReDoc),
}

/// Serves the cached document and the viewer.
#[derive(Debug, Clone)]
pub struct DocsHandler {
    document: Bytes,
    doc_path: String,
    viewer: Viewer,
}

impl DocsHandler {
    /// Creates a handler serving `doc`.
    ///
    /// `mount_prefix` is the prefix the routes are served under; together with
    /// the document's `basePath` it forms the document URL handed to viewers.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn new(doc: &Swagger, ui: &UiConfig, mount_prefix: &str) -> DocsResult<Self> {
        let document = Bytes::from(pinax_docs::to_json(doc)?);

        let base_path = doc.base_path.as_deref().unwrap_or("").trim_end_matches('/');
        let doc_path = format!("{base_path}{mount_prefix}{DOC_PATH}");

        let viewer = match &ui.url {
            Some(url) => Viewer::Redirect(url.clone()),
            None => Viewer::Page(ReDoc::from_ui(ui, &doc.info)),
        };

        Ok(Self {
            document,
            doc_path,
            viewer,
        })
    }

    /// Returns the serialized document.
    #[must_use]
    pub fn document(&self) -> &Bytes {
        &self.document
    }

    /// Answers `GET /swagger/doc`.
    #[must_use]
    pub fn doc_response(&self) -> HttpResponse {
        Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(self.document.clone()))
            .unwrap_or_else(|_| Response::new(Full::new(self.document.clone())))
    }

    /// Answers `GET /swagger/ui`.
    ///
    /// `fallback_host` is used when the request carries no `Host` header.
    #[must_use]
    pub fn ui_response(&self, headers: &HeaderMap, fallback_host: &str) -> HttpResponse {
        let document_url = self.document_url(headers, fallback_host);

        match &self.viewer {
            Viewer::Redirect(viewer_url) => {
                let location = redirect_location(viewer_url, &document_url);
                tracing::debug!(location = %location, "Redirecting to external viewer");

                Response::builder()
                    .status(StatusCode::FOUND)
                    .header(LOCATION, location.as_str())
                    .body(Full::new(Bytes::new()))
                    .unwrap_or_else(|e| {
                        tracing::error!(error = %e, "Invalid viewer redirect location");
                        json_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            &serde_json::json!({ "error": "Invalid viewer URL" }),
                        )
                    })
            }
            Viewer::Page(redoc) => Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, "text/html; charset=utf-8")
                .body(Full::new(redoc.html_bytes(&document_url)))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::new()))),
        }
    }

    /// Builds the absolute document URL as seen by the client.
    ///
    /// The scheme comes from `X-Forwarded-Proto` (default `http`), the host
    /// from the `Host` header.
    #[must_use]
    pub fn document_url(&self, headers: &HeaderMap, fallback_host: &str) -> String {
        let scheme = header_str(headers, FORWARDED_PROTO)
            .and_then(|proto| proto.split(',').next())
            .map(str::trim)
            .filter(|proto| !proto.is_empty())
            .unwrap_or("http");
        let host = header_str(headers, HOST.as_str()).unwrap_or(fallback_host);

        format!("{scheme}://{host}{}", self.doc_path)
    }
}

/// Appends the percent-encoded document URL to an external viewer URL as the
/// `url` query parameter.
///
/// ```
/// use pinax_server::redirect_location;
///
/// assert_eq!(
///     redirect_location("https://viewer.example/", "http://api/swagger/doc"),
///     "https://viewer.example/?url=http%3A%2F%2Fapi%2Fswagger%2Fdoc"
/// );
/// ```
#[must_use]
pub fn redirect_location(viewer_url: &str, document_url: &str) -> String {
    let separator = if viewer_url.ends_with('?') || viewer_url.ends_with('&') {
        ""
    } else if viewer_url.contains('?') {
        "&"
    } else {
        "?"
    };

    format!(
        "{viewer_url}{separator}url={}",
        urlencoding::encode(document_url)
    )
}

/// Creates a JSON response.
pub(crate) fn json_response(status: StatusCode, body: &serde_json::Value) -> HttpResponse {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
