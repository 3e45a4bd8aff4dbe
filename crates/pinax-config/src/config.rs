//! Main configuration types.
//!
//! This module provides the top-level [`PinaxConfig`] struct and its builder.

use serde::{Deserialize, Serialize};

use crate::{LoggingConfig, Routes, ServerConfig, SwaggerSection};

/// Complete Pinax configuration.
///
/// This is the root configuration type that contains all configuration sections.
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use pinax_config::PinaxConfig;
///
/// let config = PinaxConfig::default();
/// assert_eq!(config.server.http_addr, "0.0.0.0:1337");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PinaxConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Swagger document configuration.
    #[serde(default)]
    pub swagger: SwaggerSection,

    /// Route table the document paths are derived from.
    #[serde(default)]
    pub routes: Routes,
}

impl PinaxConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use pinax_config::{PinaxConfig, ServerConfig};
    ///
    /// let config = PinaxConfig::builder()
    ///     .server(ServerConfig {
    ///         http_addr: "127.0.0.1:3000".to_string(),
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.server.http_addr, "127.0.0.1:3000");
    /// ```
    #[must_use]
    pub fn builder() -> PinaxConfigBuilder {
        PinaxConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - Server address is not a socket address
    /// - Mount prefix is not empty and does not start with `/` or ends with `/`
    /// - Base path does not start with `/`
    /// - Viewer URL is not an absolute http(s) URL
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        if self
            .server
            .http_addr
            .parse::<std::net::SocketAddr>()
            .is_err()
        {
            return Err(crate::ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.server.http_addr),
            ));
        }

        let prefix = &self.server.mount_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(crate::ConfigError::invalid_value(
                "server.mount_prefix",
                "must start with '/' and must not end with '/'",
            ));
        }

        if let Some(base_path) = &self.swagger.base_path {
            if !base_path.starts_with('/') {
                return Err(crate::ConfigError::invalid_value(
                    "swagger.base_path",
                    format!("must start with '/': {base_path}"),
                ));
            }
        }

        if let Some(url) = &self.swagger.ui.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(crate::ConfigError::invalid_value(
                    "swagger.ui.url",
                    format!("must be an absolute http(s) URL: {url}"),
                ));
            }
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, colored debug logs with source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use pinax_config::PinaxConfig;
    ///
    /// let config = PinaxConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.server.http_addr = "127.0.0.1:1337".to_string();
        config.logging.level = "debug".to_string();
        config.logging.format = crate::LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs at info level without ANSI codes.
    ///
    /// # Example
    ///
    /// ```
    /// use pinax_config::PinaxConfig;
    ///
    /// let config = PinaxConfig::production();
    /// assert_eq!(config.logging.format, pinax_config::LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = crate::LogFormat::Json;
        config.logging.ansi_enabled = false;

        config
    }
}

/// Builder for [`PinaxConfig`].
#[derive(Debug, Default)]
pub struct PinaxConfigBuilder {
    server: Option<ServerConfig>,
    logging: Option<LoggingConfig>,
    swagger: Option<SwaggerSection>,
    routes: Option<Routes>,
}

impl PinaxConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server configuration.
    #[must_use]
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.server = Some(server);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Set the swagger section.
    #[must_use]
    pub fn swagger(mut self, swagger: SwaggerSection) -> Self {
        self.swagger = Some(swagger);
        self
    }

    /// Set the route table.
    #[must_use]
    pub fn routes(mut self, routes: Routes) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> PinaxConfig {
        PinaxConfig {
            server: self.server.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
            swagger: self.swagger.unwrap_or_default(),
            routes: self.routes.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<PinaxConfig, crate::ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
