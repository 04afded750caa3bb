//! Error types for CartDB
//!
//! This module defines the error taxonomy shared by every layer.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Undecodable document content is deliberately absent here: the durable
//! store replaces it with the empty document instead of reporting it.

use crate::types::{Field, ItemId};
use std::io;
use thiserror::Error;

/// Result type alias for CartDB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for CartDB
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing upsert field
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument {
        /// Field that failed validation
        field: Field,
        /// What was wrong with it
        reason: String,
    },

    /// Lookup or delete against an id that is not in the cart
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// The storage medium could not be read or written
    #[error("Storage unavailable: {reason}")]
    StorageUnavailable {
        /// Description of the failed operation
        reason: String,
        /// Underlying I/O error, when there is one
        #[source]
        source: Option<io::Error>,
    },
}

impl Error {
    /// Build an `InvalidArgument` for the given field
    pub fn invalid_argument(field: Field, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Build a `StorageUnavailable` without an I/O cause
    pub fn storage(reason: impl Into<String>) -> Self {
        Error::StorageUnavailable {
            reason: reason.into(),
            source: None,
        }
    }

    /// Build a `StorageUnavailable` wrapping an I/O error with context
    pub fn storage_io(context: impl Into<String>, source: io::Error) -> Self {
        let context = context.into();
        Error::StorageUnavailable {
            reason: format!("{}: {}", context, source),
            source: Some(source),
        }
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True for `InvalidArgument`
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    /// True for `StorageUnavailable`
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Error::StorageUnavailable { .. })
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::StorageUnavailable {
            reason: e.to_string(),
            source: Some(e),
        }
    }
}
