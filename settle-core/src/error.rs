// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the settle utilities
//!
//! A single root [`SettleError`] covers every failure the debounce and storage
//! utilities can report. Variants carry their context as owned strings so the
//! error is `Clone`: a storage handle keeps its last error around and hands out
//! copies of it.
//!
//! # Examples
//!
//! ```
//! use settle_core::{Result, SettleError};
//!
//! fn read_theme() -> Result<String> {
//!     Err(SettleError::storage_error("localStorage is disabled"))
//! }
//!
//! assert!(read_theme().is_err());
//! ```

use core::fmt::Display;

/// Root error type for all settle operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettleError {
    /// The storage facility rejected a read or write
    #[error("Storage error: {context}")]
    Storage {
        /// Description of what the storage facility reported
        context: String,
    },

    /// A value could not be encoded for storage
    #[error("Failed to serialize value for key \"{key}\": {context}")]
    Serialization {
        /// Storage key the value was written under
        key: String,
        /// Description of the encoding failure
        context: String,
    },

    /// A stored string could not be decoded back into a value
    #[error("Failed to deserialize value for key \"{key}\": {context}")]
    Deserialization {
        /// Storage key the raw string was read from
        key: String,
        /// Description of the decoding failure
        context: String,
    },

    /// A change listener reported a failure
    #[error("Listener error: {context}")]
    Listener {
        /// Description of the listener failure
        context: String,
    },

    /// Reading or writing a persisted storage file failed
    #[error("I/O error: {context}")]
    Io {
        /// Description of the I/O failure
        context: String,
    },

    /// The broadcast subject was closed
    #[error("Subject is closed")]
    Closed,
}

impl SettleError {
    /// Create a storage error with the given context
    pub fn storage_error(context: impl Into<String>) -> Self {
        Self::Storage {
            context: context.into(),
        }
    }

    /// Create a serialization error for `key`
    pub fn serialization_error(key: impl Into<String>, context: impl Display) -> Self {
        Self::Serialization {
            key: key.into(),
            context: context.to_string(),
        }
    }

    /// Create a deserialization error for `key`
    pub fn deserialization_error(key: impl Into<String>, context: impl Display) -> Self {
        Self::Deserialization {
            key: key.into(),
            context: context.to_string(),
        }
    }

    /// Create a listener error with the given context
    pub fn listener_error(context: impl Display) -> Self {
        Self::Listener {
            context: context.to_string(),
        }
    }

    /// Storage key the error relates to, if any
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Serialization { key, .. } | Self::Deserialization { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether the error came from encoding or decoding a value rather than
    /// from the storage facility itself
    #[must_use]
    pub const fn is_codec_error(&self) -> bool {
        matches!(
            self,
            Self::Serialization { .. } | Self::Deserialization { .. }
        )
    }
}

impl From<std::io::Error> for SettleError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            context: error.to_string(),
        }
    }
}

/// Specialized Result type for settle operations
pub type Result<T> = std::result::Result<T, SettleError>;

/// Helper trait for turning foreign errors into [`SettleError::Storage`]
/// with context attached.
pub trait ResultExt<T> {
    /// Map the error into a storage error prefixed with `context`
    ///
    /// # Errors
    /// Returns `Err(SettleError::Storage)` if the underlying result is `Err`.
    fn storage_context(self, context: impl Into<String>) -> Result<T>;

    /// Like [`ResultExt::storage_context`], building the context lazily
    ///
    /// # Errors
    /// Returns `Err(SettleError::Storage)` if the underlying result is `Err`.
    fn with_storage_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Display,
{
    fn storage_context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| SettleError::Storage {
            context: format!("{}: {e}", context.into()),
        })
    }

    fn with_storage_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| SettleError::Storage {
            context: format!("{}: {e}", f()),
        })
    }
}
