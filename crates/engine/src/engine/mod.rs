//! Cart engine: serialized load→mutate→save over one shared document
//!
//! Every mutating operation runs inside [`CartEngine::transaction`], which
//! holds the write gate from load until the save completes. Two concurrent
//! upserts therefore cannot both load the same snapshot and overwrite each
//! other's change. Reads hold the read gate and may run in parallel.
//!
//! A failed mutation (validation, not found, overflow) never reaches the
//! medium: the closure's error aborts the cycle before `save`.

mod config;
mod registry;

pub use config::{CartConfig, ConfigError, CONFIG_FILE_NAME, DEFAULT_DOCUMENT_NAME};
pub use registry::OPEN_ENGINES;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use cartdb_core::{CartDocument, Error, ItemId, LineItem, Result, UpsertRequest};
use cartdb_durability::{DocumentStore, StoreStats};
use parking_lot::RwLock;
use tracing::{debug, info};

/// Attempts to take a busy document lock before giving up
const LOCK_RETRIES: u32 = 20;
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(5);

/// Engine activity since open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Counters from the underlying store
    pub store: StoreStats,
    /// Mutations whose document was persisted, resets included
    pub committed: u64,
    /// Mutations rejected or failed before or during save
    pub aborted: u64,
}

impl EngineStats {
    /// Committed plus aborted
    pub fn transactions(&self) -> u64 {
        self.committed + self.aborted
    }
}

/// The cart engine
///
/// Obtain one with [`CartEngine::open`] (file-backed, shared per directory)
/// or [`CartEngine::ephemeral`] (in memory).
#[derive(Debug)]
pub struct CartEngine {
    store: DocumentStore,
    gate: RwLock<()>,
    /// Canonical data directory; `None` when not registered
    data_dir: Option<PathBuf>,
    config: Option<CartConfig>,
    committed: AtomicU64,
    aborted: AtomicU64,
}

impl CartEngine {
    /// Open the engine for a data directory.
    ///
    /// Creates the directory and a default `cart.toml` if needed, then reads
    /// the config. If the directory is already open in this process, the
    /// existing engine is returned.
    ///
    /// The document itself is created lazily by the first operation.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        let data_dir = path.as_ref();
        create_data_dir(data_dir)?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        if CartConfig::write_default_if_missing(&config_path)? {
            info!(target: "cartdb::engine", path = ?config_path, "Wrote default config");
        }
        let cfg = CartConfig::from_file(&config_path)?;

        Self::open_registered(data_dir, cfg, false)
    }

    /// Open the engine with an explicit configuration.
    ///
    /// The config is validated and, once the document store has opened,
    /// written to `cart.toml` so that later [`CartEngine::open`] calls pick
    /// up the same settings. A failed open leaves `cart.toml` untouched.
    pub fn open_with_config<P: AsRef<Path>>(path: P, cfg: CartConfig) -> Result<Arc<Self>> {
        cfg.validate()?;

        let data_dir = path.as_ref();
        create_data_dir(data_dir)?;

        Self::open_registered(data_dir, cfg, true)
    }

    /// In-memory engine, not registered and not persisted
    pub fn ephemeral() -> Arc<Self> {
        Arc::new(Self::with_store(DocumentStore::in_memory()))
    }

    /// Engine over an existing store
    ///
    /// The engine is not registered; callers sharing a medium must share the
    /// engine too.
    pub fn with_store(store: DocumentStore) -> Self {
        Self {
            store,
            gate: RwLock::new(()),
            data_dir: None,
            config: None,
            committed: AtomicU64::new(0),
            aborted: AtomicU64::new(0),
        }
    }

    fn open_registered(data_dir: &Path, cfg: CartConfig, persist_config: bool) -> Result<Arc<Self>> {
        let canonical = data_dir.canonicalize().map_err(|e| {
            Error::storage_io(format!("failed to resolve '{}'", data_dir.display()), e)
        })?;
        let config_path = canonical.join(CONFIG_FILE_NAME);
        let mode = cfg.durability_mode()?;

        let mut attempt = 0;
        loop {
            let mut registry = OPEN_ENGINES.lock();
            if let Some(existing) = registry.get(&canonical).and_then(Weak::upgrade) {
                if persist_config {
                    cfg.write_to_file(&config_path)?;
                }
                info!(target: "cartdb::engine", path = ?canonical, "Returning existing engine instance");
                return Ok(existing);
            }

            let store = match DocumentStore::open(cfg.document_path(&canonical), mode, cfg.codec()) {
                Ok(store) => store,
                // The last engine for this directory may still be dropping its file lock
                Err(e) if is_lock_busy(&e) && attempt < LOCK_RETRIES => {
                    drop(registry);
                    attempt += 1;
                    debug!(target: "cartdb::engine", path = ?canonical, attempt, "Document lock busy, retrying");
                    std::thread::sleep(LOCK_RETRY_DELAY);
                    continue;
                }
                Err(e) => return Err(e),
            };
            if persist_config {
                cfg.write_to_file(&config_path)?;
            }
            info!(
                target: "cartdb::engine",
                path = ?canonical,
                durability = %mode,
                document = %cfg.document,
                "Opened cart engine"
            );

            let engine = Arc::new(Self {
                store,
                gate: RwLock::new(()),
                data_dir: Some(canonical.clone()),
                config: Some(cfg),
                committed: AtomicU64::new(0),
                aborted: AtomicU64::new(0),
            });
            registry.insert(canonical, Arc::downgrade(&engine));
            return Ok(engine);
        }
    }

    /// Canonical data directory, for engines opened from disk
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Configuration the engine was opened with
    pub fn config(&self) -> Option<&CartConfig> {
        self.config.as_ref()
    }

    /// Description of the storage medium
    pub fn describe(&self) -> String {
        self.store.describe()
    }

    /// Activity counters
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            store: self.store.stats(),
            committed: self.committed.load(Ordering::Relaxed),
            aborted: self.aborted.load(Ordering::Relaxed),
        }
    }

    /// Current items and total
    pub fn list_items(&self) -> Result<CartDocument> {
        let _guard = self.gate.read();
        let doc = self.store.load()?;
        debug!(target: "cartdb::engine", items = doc.len(), total = doc.total(), "list");
        Ok(doc)
    }

    /// First item with the given id
    pub fn get_item(&self, id: ItemId) -> Result<LineItem> {
        let _guard = self.gate.read();
        let doc = self.store.load()?;
        let item = doc.get(id).cloned().ok_or(Error::NotFound(id));
        debug!(target: "cartdb::engine", %id, found = item.is_ok(), "get");
        item
    }

    /// Insert a new item, or add to the quantity of an existing one.
    ///
    /// On merge the existing name and price are kept. Returns the stored
    /// item after the change.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` naming the first bad field, before anything is
    /// loaded; `InvalidArgument` on `quantity` if the merged quantity would
    /// overflow, and on `price` (insert) or `quantity` (merge) if the total
    /// would stop being a finite number.
    pub fn upsert_item(&self, request: UpsertRequest) -> Result<LineItem> {
        let item = request.validate()?;
        let outcome = self.transaction("upsert", |doc| doc.upsert(item))?;
        debug!(
            target: "cartdb::engine",
            id = %outcome.item().id,
            quantity = outcome.item().quantity,
            merged = outcome.is_merged(),
            "upsert"
        );
        Ok(outcome.into_item())
    }

    /// Remove the item with the given id, returning it
    ///
    /// Nothing is written when the id is absent.
    pub fn delete_item(&self, id: ItemId) -> Result<LineItem> {
        self.transaction("delete", |doc| doc.remove(id).ok_or(Error::NotFound(id)))
    }

    /// Overwrite the document with the empty cart
    ///
    /// Does not read the current document, so it also succeeds over
    /// undecodable content.
    pub fn reset_cart(&self) -> Result<()> {
        let _guard = self.gate.write();
        match self.store.reset() {
            Ok(_) => {
                self.committed.fetch_add(1, Ordering::Relaxed);
                info!(target: "cartdb::engine", medium = %self.store.describe(), "Cart reset");
                Ok(())
            }
            Err(e) => {
                self.aborted.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    /// Run one load→mutate→save cycle under the write gate.
    ///
    /// The document is saved only if `f` returns `Ok`; the total is
    /// recomputed on save regardless of what `f` did to it.
    pub fn transaction<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut CartDocument) -> Result<T>,
    {
        let _guard = self.gate.write();

        let result = self.store.load().and_then(|mut doc| {
            let value = f(&mut doc)?;
            self.store.save(&mut doc)?;
            Ok(value)
        });

        match &result {
            Ok(_) => {
                self.committed.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.aborted.fetch_add(1, Ordering::Relaxed);
                debug!(target: "cartdb::engine", op, error = %e, "Transaction aborted, nothing persisted");
            }
        }
        result
    }
}

impl Drop for CartEngine {
    fn drop(&mut self) {
        if let Some(dir) = &self.data_dir {
            registry::release(dir);
            debug!(target: "cartdb::engine", path = ?dir, "Closed cart engine");
        }
    }
}

fn is_lock_busy(e: &Error) -> bool {
    matches!(
        e,
        Error::StorageUnavailable { source: Some(io), .. } if io.kind() == std::io::ErrorKind::WouldBlock
    )
}

fn create_data_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::storage_io(format!("failed to create data directory '{}'", dir.display()), e)
    })
}
