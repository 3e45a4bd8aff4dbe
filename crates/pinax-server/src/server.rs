//! HTTP server implementation.
//!
//! Built on Hyper and Tokio. Each accepted connection is served on its own
//! task; requests are answered synchronously from the pre-serialized document.
//!
//! # Example
//!
//! ```rust,no_run
//! use pinax_config::PinaxConfig;
//! use pinax_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PinaxConfig::development();
//!     Server::from_config(&config)?.run().await?;
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{ALLOW, CONTENT_LENGTH};
use http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use pinax_config::PinaxConfig;
use pinax_docs::DocumentBuilder;
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handler::{json_response, DocsHandler, DOC_PATH, UI_PATH};
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Type alias for HTTP response body.
pub type ResponseBody = Full<Bytes>;

/// Type alias for the HTTP response.
pub type HttpResponse = Response<ResponseBody>;

/// Methods accepted on the documentation routes.
const ALLOWED_METHODS: &str = "GET, HEAD";

/// Documentation route matched by a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Doc,
    Ui,
}

/// The documentation server.
#[derive(Debug)]
pub struct Server {
    /// Server configuration
    config: ServerConfig,

    /// Document and viewer handlers
    docs: DocsHandler,
}

impl Server {
    /// Creates a server from its parts.
    #[must_use]
    pub fn new(config: ServerConfig, docs: DocsHandler) -> Self {
        Self { config, docs }
    }

    /// Builds the document described by `config` and a server serving it.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn from_config(config: &PinaxConfig) -> Result<Self, ServerError> {
        let doc = DocumentBuilder::from_config(config).build();
        let server_config = ServerConfig::from(&config.server);
        let docs = DocsHandler::new(&doc, &config.swagger.ui, server_config.mount_prefix())?;

        tracing::info!(
            title = %doc.info.title,
            version = %doc.info.version,
            paths = doc.paths.len(),
            definitions = doc.definitions.len(),
            "Swagger document ready"
        );

        Ok(Self::new(server_config, docs))
    }

    /// Returns a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns a reference to the documentation handlers.
    #[must_use]
    pub fn docs(&self) -> &DocsHandler {
        &self.docs
    }

    /// Runs the server until SIGTERM or SIGINT is received.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind to the configured address.
    pub async fn run(self) -> Result<(), ServerError> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Binds the configured address and runs until `shutdown` is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind to the configured address.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr = self.config.socket_addr().map_err(|e| {
            ServerError::BindError(format!("Invalid address '{}': {}", self.config.http_addr(), e))
        })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(format!("Failed to bind to {addr}: {e}")))?;

        self.serve(listener, shutdown).await
    }

    /// Serves connections from an already bound listener until `shutdown` is
    /// triggered, then waits up to the shutdown timeout for open connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener's local address cannot be read.
    pub async fn serve(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            addr = %local_addr,
            doc = %format!("{}{DOC_PATH}", self.config.mount_prefix()),
            ui = %format!("{}{UI_PATH}", self.config.mount_prefix()),
            "Server listening"
        );

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let server = Arc::clone(&server);
                            let token = tracker.acquire();
                            let shutdown = shutdown.clone();

                            tokio::spawn(async move {
                                if let Err(e) = server.handle_connection(stream, local_addr, shutdown).await {
                                    tracing::debug!(remote = %remote_addr, error = %e, "Connection error");
                                }
                                drop(token);
                            });
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to accept connection");
                        }
                    }
                }

                () = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, stopping server");
                    break;
                }
            }
        }

        let shutdown_timeout = server.config.shutdown_timeout();
        tracing::info!(
            timeout = ?shutdown_timeout,
            connections = tracker.active_connections(),
            "Waiting for connections to close"
        );

        tokio::select! {
            () = tracker.wait_idle() => {
                tracing::info!("All connections closed");
            }
            () = tokio::time::sleep(shutdown_timeout) => {
                tracing::warn!(
                    connections = tracker.active_connections(),
                    "Shutdown timeout reached with connections still open"
                );
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Serves a single connection, finishing the in-flight request on shutdown.
    async fn handle_connection(
        self: Arc<Self>,
        stream: TcpStream,
        local_addr: SocketAddr,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let io = TokioIo::new(stream);
        let server = self;

        let service = service_fn(move |req: Request<Incoming>| {
            let response = server.handle(req.method(), req.uri().path(), req.headers(), local_addr);
            std::future::ready(Ok::<_, Infallible>(response))
        });

        let conn = http1::Builder::new().serve_connection(io, service);
        tokio::pin!(conn);

        tokio::select! {
            result = conn.as_mut() => return result,
            () = shutdown.recv() => {
                conn.as_mut().graceful_shutdown();
            }
        }

        conn.await
    }

    /// Answers a request.
    ///
    /// `local_addr` stands in for the host when the request has no `Host`
    /// header.
    #[must_use]
    pub fn handle(
        &self,
        method: &Method,
        path: &str,
        headers: &HeaderMap,
        local_addr: SocketAddr,
    ) -> HttpResponse {
        tracing::debug!(http.method = %method, http.path = %path, "Request");

        let Some(route) = self.route(path) else {
            return json_response(
                StatusCode::NOT_FOUND,
                &serde_json::json!({ "error": "Not Found", "path": path }),
            );
        };

        if method != Method::GET && method != Method::HEAD {
            let mut response = json_response(
                StatusCode::METHOD_NOT_ALLOWED,
                &serde_json::json!({ "error": "Method Not Allowed", "method": method.as_str() }),
            );
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
            return response;
        }

        let response = match route {
            Route::Doc => self.docs.doc_response(),
            Route::Ui => self.docs.ui_response(headers, &local_addr.to_string()),
        };

        if method == Method::HEAD {
            without_body(response)
        } else {
            response
        }
    }

    fn route(&self, path: &str) -> Option<Route> {
        match path.strip_prefix(self.config.mount_prefix())? {
            DOC_PATH => Some(Route::Doc),
            UI_PATH => Some(Route::Ui),
            _ => None,
        }
    }
}

/// Drops the body of a response, keeping its length.
fn without_body(response: HttpResponse) -> HttpResponse {
    let (mut parts, body) = response.into_parts();
    if let Some(length) = body.size_hint().exact() {
        parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    }
    Response::from_parts(parts, Full::new(Bytes::new()))
}
