//! Error model for the parsing edges of the crate.
//!
//! Logging itself never fails: calls made outside a trace are silent no-ops
//! or fall back to immediate dispatch. Only parsing ids and loading
//! configuration can go wrong.

use thiserror::Error;

/// Result type used when loading configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A severity name or rank could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown severity: {0:?}")]
pub struct SeverityParseError(pub String);

/// A trace or entry id could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {reason}")]
pub struct IdParseError {
    /// Which id type was being parsed (`"TraceId"`, `"EntryId"`).
    pub kind: &'static str,
    pub reason: String,
}

/// Configuration could not be loaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration key held an unparsable severity.
    #[error("invalid severity for {key}: {source}")]
    InvalidSeverity {
        key: String,
        #[source]
        source: SeverityParseError,
    },

    /// The configuration document could not be decoded.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}

impl ConfigError {
    pub fn invalid_severity(key: impl Into<String>, source: SeverityParseError) -> Self {
        Self::InvalidSeverity {
            key: key.into(),
            source,
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::malformed(value.to_string())
    }
}
