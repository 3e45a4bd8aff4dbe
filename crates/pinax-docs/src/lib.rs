//! # Pinax Docs
//!
//! Swagger 2.0 document generation from route annotations.
//!
//! This crate provides:
//! - **Swagger 2.0 types** for the served document
//! - **Document builder** turning the `swagger` and `routes` configuration
//!   sections into a document
//! - **ReDoc** viewer page pointing at the served document
//!
//! ## Quick Start
//!
//! ```no_run
//! use pinax_config::ConfigLoader;
//! use pinax_docs::{DocumentBuilder, ReDoc};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("pinax.toml")?
//!     .load()?;
//!
//! let doc = DocumentBuilder::from_config(&config).build();
//! let redoc = ReDoc::from_ui(&config.swagger.ui, &doc.info);
//!
//! println!("{}", pinax_docs::to_json_pretty(&doc)?);
//! println!("{}", redoc.html("http://localhost:1337/swagger/doc"));
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod merge;
mod redoc;
mod swagger;

pub use builder::{
    build_definitions, build_info, build_paths, convert_path_params, definition_ref,
    split_route_key, to_json, to_json_pretty, DocumentBuilder, DEFINITIONS_PREFIX,
};
pub use error::{DocsError, DocsResult};
pub use merge::{deep_merge, merged};
pub use redoc::{ReDoc, DEFAULT_EXPAND_RESPONSES, DEFAULT_REDOC_VERSION};
pub use swagger::{
    Contact, ExternalDocs, Info, License, Operation, Parameter, ParameterIn, PathItem, RefOr,
    Reference, Required, Response, Schema, SchemaItems, Swagger, Tag, METHODS, SWAGGER_VERSION,
};
