//! Testing utilities for the durable store
//!
//! - **FaultyMedium**: wraps a medium and injects I/O failures on demand, so
//!   `StorageUnavailable` paths can be exercised without touching file
//!   permissions.
//!
//! # Example
//!
//! ```ignore
//! use cartdb_durability::testing::FaultyMedium;
//! use cartdb_durability::MemoryMedium;
//!
//! let medium = FaultyMedium::new(MemoryMedium::new());
//! medium.fail_writes(true);
//! ```

use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::medium::Medium;

#[derive(Debug, Default)]
struct Faults {
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicU64,
}

/// Medium wrapper with switchable read/write failures
///
/// Clones share the same fault switches and counters, so a test can keep a
/// handle after moving the medium into a store.
#[derive(Debug)]
pub struct FaultyMedium<M> {
    inner: Arc<M>,
    faults: Arc<Faults>,
}

impl<M> Clone for FaultyMedium<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            faults: Arc::clone(&self.faults),
        }
    }
}

impl<M: Medium> FaultyMedium<M> {
    /// Wrap a medium with all faults disabled
    pub fn new(inner: M) -> Self {
        Self {
            inner: Arc::new(inner),
            faults: Arc::new(Faults::default()),
        }
    }

    /// Make subsequent reads fail (or succeed again)
    pub fn fail_reads(&self, fail: bool) {
        self.faults.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn fail_writes(&self, fail: bool) {
        self.faults.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes
    pub fn writes(&self) -> u64 {
        self.faults.writes.load(Ordering::SeqCst)
    }

    /// The wrapped medium
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Medium> Medium for FaultyMedium<M> {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        if self.faults.fail_reads.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected read failure"));
        }
        self.inner.read()
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if self.faults.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "injected write failure",
            ));
        }
        self.inner.write(bytes)?;
        self.faults.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("faulty({})", self.inner.describe())
    }
}
