//! Typed configuration for Pinax.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! The configuration is built around the [`PinaxConfig`] struct:
//!
//! - [`ServerConfig`] - HTTP server settings (address, shutdown, mount prefix)
//! - [`LoggingConfig`] - Log level and format
//! - [`SwaggerSection`] - Package metadata, viewer settings, definitions and
//!   top-level document fields
//! - [`Routes`] - The route table whose `swagger` annotations become paths
//!
//! # Example
//!
//! ```no_run
//! use pinax_config::ConfigLoader;
//!
//! # fn main() -> Result<(), pinax_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("pinax.toml")?
//!     .with_env_prefix("PINAX")
//!     .load()?;
//!
//! println!("Serving docs on: {}", config.server.http_addr);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! http_addr = "0.0.0.0:1337"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [swagger]
//! basePath = "/api"
//!
//! [swagger.pkg]
//! name = "petstore"
//! version = "1.0.0"
//!
//! [swagger.ui]
//! url = "https://petstore.swagger.io/"
//!
//! [routes."GET /pets/:id".swagger]
//! summary = "Find a pet"
//! responses."200" = { description = "The pet", schema = "Pet" }
//! ```
//!
//! # Environment Variable Overrides
//!
//! Selected values can be overridden with `PREFIX__SECTION__KEY` variables:
//!
//! - `PINAX__SERVER__HTTP_ADDR=0.0.0.0:9000`
//! - `PINAX__LOGGING__LEVEL=debug`
//! - `PINAX__SWAGGER__UI__URL=https://petstore.swagger.io/`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;
mod swagger;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use swagger::*;
