//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! Unlike the core error, these carry only plain data, so they can be cloned,
//! compared and sent over any transport as JSON.

use cartdb_core::{Field, ItemId};
use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `InvalidArgument` | An upsert field is missing or out of range |
/// | `NotFound` | No item with the requested id |
/// | `StorageUnavailable` | The document could not be read or written |
/// | `Internal` | A command produced an output of the wrong shape |
///
/// # Example
///
/// ```ignore
/// use cartdb_executor::{Command, Error, Executor};
///
/// match executor.execute(Command::Get { id: ItemId::new(7) }) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::NotFound { id }) => println!("no item {}", id),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Malformed or missing upsert field
    #[error("invalid argument '{field}': {reason}")]
    InvalidArgument {
        /// Rejected field
        field: Field,
        /// What was wrong with it
        reason: String,
    },

    /// No item with this id
    #[error("item not found: {id}")]
    NotFound {
        /// Requested id
        id: ItemId,
    },

    /// Storage medium could not be read or written
    #[error("storage unavailable: {reason}")]
    StorageUnavailable {
        /// Description of the failure
        reason: String,
    },

    /// Bug: unexpected output shape or similar
    #[error("internal error: {reason}")]
    Internal {
        /// Description
        reason: String,
    },
}

impl Error {
    /// Short category name, for logging and transports
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::NotFound { .. } => "not_found",
            Error::StorageUnavailable { .. } => "storage_unavailable",
            Error::Internal { .. } => "internal",
        }
    }

    /// True when the caller sent something wrong, as opposed to a server fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. } | Error::NotFound { .. })
    }
}
