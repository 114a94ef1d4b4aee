//! Error types for the KFDB application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire KFDB application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// Validation rejections (empty text, out-of-range reorder indices) are
/// deliberately *not* represented here: they are silently absorbed by the
/// domain operations and never become errors.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum KfdbError {
    /// The AI service could not be reached or returned an HTTP failure
    #[error("AI request failed: {0}")]
    Transport(String),

    /// The AI service responded, but the payload could not be parsed or did
    /// not match the expected shape
    #[error("AI response was not in the expected format: {0}")]
    Format(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Data access error (storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl KfdbError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a Format error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Returns true for errors a user-visible system message should carry
    /// (AI transport and format failures). Persistence errors are logged
    /// instead and never surfaced.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Format(_))
    }
}

impl From<std::io::Error> for KfdbError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for KfdbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for KfdbError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for KfdbError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for KfdbError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, KfdbError>`.
pub type Result<T> = std::result::Result<T, KfdbError>;
