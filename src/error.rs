//! Error types for the content loader and page host

use thiserror::Error;

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a page or its content configuration
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration document answered with a non-success status
    #[error("Failed to load config: {status} ({location})")]
    ConfigLoad { location: String, status: u16 },

    /// The configuration body is not valid JSON or does not match the schema
    #[error("Failed to parse config {location}: {source}")]
    ConfigParse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Transport-level failure while fetching the configuration
    #[error("Network error: {0}")]
    Network(String),

    /// Failed to load the page itself
    #[error("Failed to load page: {0}")]
    LoadError(String),

    /// A CSS selector could not be parsed
    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// Invalid options (bad URL, missing site root, ...)
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to build the HTTP client
    #[error("Initialization failed: {0}")]
    InitializationError(String),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error terminates the content load sequence
    /// (as opposed to a page-level or usage failure).
    pub fn is_config_failure(&self) -> bool {
        matches!(
            self,
            Error::ConfigLoad { .. } | Error::ConfigParse { .. } | Error::Network(_)
        )
    }
}
