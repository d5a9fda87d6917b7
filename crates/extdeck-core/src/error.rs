//! Error types for extdeck-core

use thiserror::Error;

/// Result type alias using extdeck-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for extdeck
#[derive(Error, Debug)]
pub enum Error {
    /// One of the catalog sources reported a failure
    #[error("Catalog source '{source_name}' failed: {message}")]
    SourceFailed {
        source_name: String,
        message: String,
    },

    /// A catalog source ended before producing its first snapshot
    #[error("Catalog source '{source_name}' closed before emitting a snapshot")]
    SourceClosed { source_name: String },

    /// An operation was requested against a record in the wrong state
    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a source failure error
    pub fn source_failed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceFailed {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a source closed error
    pub fn source_closed(source_name: impl Into<String>) -> Self {
        Self::SourceClosed {
            source_name: source_name.into(),
        }
    }

    /// Create an invalid operation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error came from one of the catalog sources
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::SourceFailed { .. } | Self::SourceClosed { .. })
    }
}
