//! Client configuration
//!
//! Holds the API key, the content language and where the service lives.

use crate::paths::Endpoint;
use std::time::Duration;
use thiserror::Error;

/// Host serving the XML interface
pub const DEFAULT_HOST: &str = "thetvdb.com";

/// Plain HTTP port of the XML interface
pub const DEFAULT_PORT: u16 = 80;

/// Language used for series data until changed with `Client::set_language`
pub const DEFAULT_LANGUAGE: &str = "en";

/// Connection timeout handed to the HTTP client
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors caused by an incomplete or inconsistent configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key, or one consisting only of whitespace
    #[error("You have to provide an API key")]
    MissingApiKey,

    /// A path template references a value nobody supplied
    #[error("No value for placeholder '#{{{placeholder}}}' in the {endpoint} path")]
    UnresolvedPlaceholder {
        endpoint: Endpoint,
        placeholder: String,
    },
}

/// Configuration of a [`crate::Client`]
///
/// Only `api_key` is mandatory. Start from [`ClientConfig::new`] and override
/// fields with struct update syntax:
///
/// ```
/// use tvdb_xml::ClientConfig;
///
/// let config = ClientConfig {
///     language: "fr".to_string(),
///     port: 8080,
///     ..ClientConfig::new("1234abc")
/// };
/// assert_eq!(config.host, "thetvdb.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key embedded in most request paths
    pub api_key: String,
    /// Abbreviation of the content language (e.g. "en", "fr")
    pub language: String,
    /// Host name of the service
    pub host: String,
    /// TCP port of the service
    pub port: u16,
    /// User agent sent with every request
    pub user_agent: String,
    /// Timeout for establishing connections
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user_agent: format!("tvdb-xml/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Checks that the configuration can be used to talk to the service
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingApiKey` if the API key is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}
