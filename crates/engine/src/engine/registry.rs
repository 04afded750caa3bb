//! Process-wide registry of open engines
//!
//! Opening the same data directory twice returns the same `CartEngine`, so
//! every caller in the process shares one gate per document and the
//! cross-process file lock is only taken once.
//!
//! Entries are weak references; an engine removes its own entry on drop.
//! `parking_lot::Mutex` avoids lock poisoning.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Weak;

use super::CartEngine;

/// Global registry of open engines (canonical data dir -> weak reference)
pub static OPEN_ENGINES: Lazy<Mutex<HashMap<PathBuf, Weak<CartEngine>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Remove the entry for `path` unless it already points at a live engine
pub(crate) fn release(path: &Path) {
    let mut registry = OPEN_ENGINES.lock();
    let stale = registry
        .get(path)
        .map_or(false, |weak| weak.strong_count() == 0);
    if stale {
        registry.remove(path);
    }
}
