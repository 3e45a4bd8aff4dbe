//! # Pinax Server
//!
//! HTTP server for the Pinax documentation endpoints.
//!
//! - `GET /swagger/doc` returns the Swagger 2.0 document as JSON
//! - `GET /swagger/ui` renders the ReDoc viewer, or redirects to an external
//!   viewer with the document URL in its `url` query parameter
//!
//! Both routes answer `HEAD` as well and can be mounted under a prefix. The
//! server shuts down gracefully on SIGTERM/SIGINT or a [`ShutdownSignal`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use pinax_config::ConfigLoader;
//! use pinax_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new()
//!         .with_defaults()
//!         .with_file("pinax.toml")?
//!         .load()?;
//!
//!     Server::from_config(&config)?.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod handler;
mod server;
mod shutdown;

pub use config::{
    ServerConfig, ServerConfigBuilder, DEFAULT_HTTP_ADDR, DEFAULT_SHUTDOWN_TIMEOUT_SECS,
};
pub use error::ServerError;
pub use handler::{redirect_location, DocsHandler, DOC_PATH, UI_PATH};
pub use server::{HttpResponse, ResponseBody, Server};
pub use shutdown::{ConnectionToken, ConnectionTracker, ShutdownSignal};
