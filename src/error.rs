//! Error types for the birthday sync tools.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Everything here is fatal for the operation that returns it; per-row problems are
//! reported through the outcome types in [`crate::services`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when interacting with the Immich people API.
#[derive(Error, Debug)]
pub enum ImmichApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed (check the Immich API key): {0}")]
    Unauthorized(String),
}

impl ImmichApiError {
    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    /// Response body for status errors, the display text otherwise.
    pub fn detail(&self) -> String {
        match self {
            Self::ApiError { message, .. } | Self::NotFound(message) | Self::Unauthorized(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Errors that can occur when talking to a CardDAV server.
#[derive(Error, Debug)]
pub enum CardDavError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Server returned an error status code
    #[error("CardDAV error (status {status}) for {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Multistatus body was not well-formed XML
    #[error("Malformed multistatus response: {0}")]
    XmlError(#[from] roxmltree::Error),

    /// A URL could not be built or joined
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist
    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The configuration file exists but could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required setting is absent from file, environment and command line
    #[error("{key} not set. Use immich.toml or the {env} environment variable")]
    MissingValue { key: String, env: String },

    /// A setting has an invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur reading or writing the interchange table.
#[derive(Error, Debug)]
pub enum TableError {
    /// Underlying delimited-text error
    #[error("Table error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with ImmichApiError
pub type ImmichApiResult<T> = Result<T, ImmichApiError>;

/// Convenience type alias for Results with CardDavError
pub type CardDavResult<T> = Result<T, CardDavError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with TableError
pub type TableResult<T> = Result<T, TableError>;
