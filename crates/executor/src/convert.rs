//! Error conversion from internal error types.
//!
//! This module provides conversions from [`cartdb_core::Error`] to the
//! executor's [`Error`] type.

use crate::Error;

/// Convert a core error to an executor Error.
///
/// The I/O source of `StorageUnavailable` is folded into its reason; the
/// rest maps one to one.
impl From<cartdb_core::Error> for Error {
    fn from(err: cartdb_core::Error) -> Self {
        match err {
            cartdb_core::Error::InvalidArgument { field, reason } => {
                Error::InvalidArgument { field, reason }
            }
            cartdb_core::Error::NotFound(id) => Error::NotFound { id },
            cartdb_core::Error::StorageUnavailable { reason, .. } => {
                Error::StorageUnavailable { reason }
            }
        }
    }
}
