//! Logging for Pinax.
//!
//! Pinax logs through `tracing`. This crate installs the global subscriber
//! described by the `[logging]` configuration section:
//!
//! - **JSON** output for production, one object per line
//! - **Pretty** output for development, optionally with colors and locations
//! - Filtering through [`tracing_subscriber::EnvFilter`] directives
//!
//! # Example
//!
//! ```no_run
//! use pinax_config::PinaxConfig;
//! use pinax_telemetry::init_telemetry;
//!
//! # fn main() -> Result<(), pinax_telemetry::TelemetryError> {
//! let config = PinaxConfig::development();
//! init_telemetry(&config.logging)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

use pinax_config::LoggingConfig;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Initializes telemetry from the `[logging]` configuration section.
///
/// # Errors
///
/// Returns `TelemetryError` if the subscriber cannot be installed.
pub fn init_telemetry(config: &LoggingConfig) -> TelemetryResult<()> {
    init_logging(&LogConfig::from(config))
}
