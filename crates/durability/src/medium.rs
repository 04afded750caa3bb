//! Storage medium abstraction
//!
//! A medium stores exactly one opaque byte payload: the encoded cart
//! document. It knows nothing about JSON or totals; that policy lives in
//! [`DocumentStore`](crate::DocumentStore).

use parking_lot::Mutex;
use std::io;

/// Byte-level storage for a single document
///
/// # Thread Safety
///
/// Media must be `Send + Sync`. A `write` must be all-or-nothing from the
/// point of view of a concurrent `read`: readers see either the previous
/// payload or the new one, never a mix.
pub trait Medium: Send + Sync {
    /// Read the whole payload
    ///
    /// Returns `Ok(None)` when no payload has ever been written.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the whole payload
    fn write(&self, bytes: &[u8]) -> io::Result<()>;

    /// Short description for logs and error messages
    fn describe(&self) -> String;
}

/// In-memory medium for `Cache` durability and tests
#[derive(Debug, Default)]
pub struct MemoryMedium {
    bytes: Mutex<Option<Vec<u8>>>,
}

impl MemoryMedium {
    /// Create an empty medium (no payload yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a medium pre-seeded with a payload
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes.into())),
        }
    }

    /// Copy of the current payload
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.bytes.lock().clone()
    }
}

impl Medium for MemoryMedium {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.bytes.lock().clone())
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        *self.bytes.lock() = Some(bytes.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

impl<M: Medium + ?Sized> Medium for Box<M> {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<M: Medium + ?Sized> Medium for std::sync::Arc<M> {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
