//! Unified error types for the client.
//!
//! Resolution failures carry the offending field, the offered value, and
//! the accepted set or range, so callers can report them without digging
//! through the configuration themselves.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for configuration resolution and request composition.
#[derive(Debug, Error)]
pub enum Error {
    /// An enum-valued configuration field holds a value outside its
    /// accepted set, or a numeric field is out of range.
    #[error("invalid configuration: {field} = {value:?} (accepted: {accepted})")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        accepted: String,
    },

    /// A query-settings field is outside the domain the server accepts.
    #[error("invalid settings: {field} = {value} ({reason})")]
    InvalidSettings {
        field: &'static str,
        value: u64,
        reason: &'static str,
    },

    /// A configuration source could not be read or deserialized.
    #[error("configuration load error: {0}")]
    Load(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error naming the field and its accepted set.
    pub fn configuration(
        field: &'static str,
        value: impl Into<String>,
        accepted: impl Into<String>,
    ) -> Self {
        Self::InvalidConfiguration {
            field,
            value: value.into(),
            accepted: accepted.into(),
        }
    }

    /// Create a settings error for a field outside the server's domain.
    pub fn settings(field: &'static str, value: u64, reason: &'static str) -> Self {
        Self::InvalidSettings {
            field,
            value,
            reason,
        }
    }

    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// The configuration field this error names, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfiguration { field, .. } => Some(field),
            Self::InvalidSettings { field, .. } => Some(field),
            _ => None,
        }
    }
}
