//! Durable document store
//!
//! `DocumentStore` is the load/save contract the cart engine builds on:
//!
//! - `load` returns the persisted document. If nothing was ever persisted it
//!   first writes the canonical empty document, so a loadable document
//!   always exists afterwards.
//! - `save` recomputes the derived total, then replaces the whole payload.
//!   A caller-supplied total is never trusted.
//!
//! ## Self-healing
//!
//! A payload that cannot be decoded is treated as absent: it is replaced by
//! the empty document and the load succeeds. This branch is logged at `warn`
//! and counted in [`StoreStats::recoveries`], separately from real I/O
//! failures, which surface as `StorageUnavailable`.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use cartdb_core::{CartDocument, Error, Result};
use tracing::{debug, warn};

use crate::codec::{Decoded, JsonCodec};
use crate::file::FileMedium;
use crate::medium::{Medium, MemoryMedium};
use crate::mode::DurabilityMode;

/// Counters for store activity since open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Completed `load` calls
    pub loads: u64,
    /// Completed `save` calls, including lazy initialization and healing
    pub saves: u64,
    /// Undecodable payloads replaced by the empty document
    pub recoveries: u64,
}

/// Whole-document store over a [`Medium`]
pub struct DocumentStore {
    medium: Box<dyn Medium>,
    codec: JsonCodec,
    loads: AtomicU64,
    saves: AtomicU64,
    recoveries: AtomicU64,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("medium", &self.medium.describe())
            .field("codec", &self.codec)
            .field("stats", &self.stats())
            .finish()
    }
}

impl DocumentStore {
    /// Create a store over any medium
    pub fn new(medium: impl Medium + 'static, codec: JsonCodec) -> Self {
        Self {
            medium: Box::new(medium),
            codec,
            loads: AtomicU64::new(0),
            saves: AtomicU64::new(0),
            recoveries: AtomicU64::new(0),
        }
    }

    /// Create a store over a fresh in-memory medium
    pub fn in_memory() -> Self {
        Self::new(MemoryMedium::new(), JsonCodec::default())
    }

    /// Open a store for the document at `path`
    ///
    /// `DurabilityMode::Cache` ignores the path and keeps the document in
    /// memory.
    pub fn open(path: impl AsRef<Path>, mode: DurabilityMode, codec: JsonCodec) -> Result<Self> {
        if !mode.requires_file() {
            return Ok(Self::new(MemoryMedium::new(), codec));
        }
        let path = path.as_ref();
        let medium = FileMedium::open(path, mode).map_err(|e| {
            Error::storage_io(format!("failed to open '{}'", path.display()), e)
        })?;
        Ok(Self::new(medium, codec))
    }

    /// Description of the underlying medium
    pub fn describe(&self) -> String {
        self.medium.describe()
    }

    /// Codec used for encoding
    pub fn codec(&self) -> JsonCodec {
        self.codec
    }

    /// Activity counters
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            loads: self.loads.load(Ordering::Relaxed),
            saves: self.saves.load(Ordering::Relaxed),
            recoveries: self.recoveries.load(Ordering::Relaxed),
        }
    }

    /// Load the persisted document, initializing or healing it if needed
    pub fn load(&self) -> Result<CartDocument> {
        let bytes = self.medium.read().map_err(|e| {
            Error::storage_io(format!("failed to read '{}'", self.medium.describe()), e)
        })?;

        let doc = match bytes {
            None => {
                debug!(
                    target: "cartdb::store",
                    medium = %self.medium.describe(),
                    "No document persisted yet, writing empty document"
                );
                self.write_empty()?
            }
            Some(bytes) => match self.codec.decode(&bytes) {
                Decoded::Document(mut doc) => {
                    let persisted = doc.total();
                    let derived = doc.recompute_total();
                    if persisted != derived {
                        debug!(
                            target: "cartdb::store",
                            persisted,
                            derived,
                            "Persisted total disagrees with items, using derived total"
                        );
                    }
                    doc
                }
                Decoded::Corrupt(reason) => {
                    warn!(
                        target: "cartdb::store",
                        medium = %self.medium.describe(),
                        error = %reason,
                        bytes = bytes.len(),
                        "Persisted document is undecodable, replacing with empty document"
                    );
                    self.recoveries.fetch_add(1, Ordering::Relaxed);
                    self.write_empty()?
                }
            },
        };

        self.loads.fetch_add(1, Ordering::Relaxed);
        Ok(doc)
    }

    /// Recompute the total and persist the whole document
    pub fn save(&self, doc: &mut CartDocument) -> Result<()> {
        // serde_json writes a non-finite number as null, which would not load back
        if !doc.recompute_total().is_finite() {
            return Err(Error::storage(format!(
                "refusing to persist non-finite total ({} items)",
                doc.len()
            )));
        }
        let bytes = self
            .codec
            .encode(doc)
            .map_err(|e| Error::storage(format!("failed to encode document: {}", e)))?;
        self.medium.write(&bytes).map_err(|e| {
            Error::storage_io(format!("failed to write '{}'", self.medium.describe()), e)
        })?;
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Overwrite the persisted document with the empty document
    pub fn reset(&self) -> Result<CartDocument> {
        self.write_empty()
    }

    fn write_empty(&self) -> Result<CartDocument> {
        let mut doc = CartDocument::empty();
        self.save(&mut doc)?;
        Ok(doc)
    }
}
