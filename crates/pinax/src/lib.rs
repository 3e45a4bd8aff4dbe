//! # Pinax
//!
//! **Swagger 2.0 documentation for route-configured HTTP APIs**
//!
//! Pinax reads an application's route table, turns the `swagger`
//! annotations attached to its routes into a Swagger 2.0 document and serves
//! that document together with a viewer:
//!
//! - `GET /swagger/doc` - the document as JSON
//! - `GET /swagger/ui` - a ReDoc page, or a redirect to an external viewer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pinax::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::new()
//!         .with_defaults()
//!         .with_file("pinax.toml")?
//!         .with_env_prefix("PINAX")
//!         .load()?;
//!
//!     init_telemetry(&config.logging)?;
//!     Server::from_config(&config)?.run().await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/pinax/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export configuration types
pub use pinax_config as config;

// Re-export document types and the builder
pub use pinax_docs as docs;

// Re-export server types
pub use pinax_server as server;

// Re-export logging setup
pub use pinax_telemetry as telemetry;

/// Version of the Pinax crates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use pinax::prelude::*;
///
/// let config = PinaxConfig::default();
/// let doc = DocumentBuilder::from_config(&config).build();
/// assert_eq!(doc.swagger, "2.0");
/// ```
pub mod prelude {
    pub use pinax_config::{ConfigError, ConfigLoader, PinaxConfig, Routes, SwaggerSection};
    pub use pinax_docs::{DocsError, DocumentBuilder, ReDoc, Swagger};
    pub use pinax_server::{Server, ServerError, ShutdownSignal};
    pub use pinax_telemetry::{init_telemetry, TelemetryError};
}
