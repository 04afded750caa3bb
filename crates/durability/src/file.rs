//! Crash-safe single-file medium
//!
//! Uses write-rename for atomic document replacement.
//!
//! # Crash Safety
//!
//! Each write follows this pattern:
//! 1. Write the payload to a hidden temporary file (`.<name>.tmp`)
//! 2. fsync the temporary file (Always mode)
//! 3. Atomic rename over the document path
//! 4. fsync the parent directory (Always mode)
//!
//! A reader therefore sees either the complete old document or the complete
//! new one. A crash between steps leaves at most a stale temporary file,
//! which is removed the next time the medium is opened.
//!
//! Writes are serialized internally, so concurrent writers never share the
//! temporary file.
//!
//! # Process Exclusivity
//!
//! Opening takes an exclusive advisory lock on `<name>.lock`. A second
//! process opening the same document fails instead of interleaving its
//! read-modify-write cycles with ours. The lock is released on drop.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;
use tracing::info;

use crate::medium::Medium;
use crate::mode::DurabilityMode;

/// File-backed medium holding one JSON document
#[derive(Debug)]
pub struct FileMedium {
    path: PathBuf,
    temp_path: PathBuf,
    fsync: bool,
    write_lock: Mutex<()>,
    // Held for the lifetime of the medium; dropping it releases the lock.
    _lock: File,
}

impl FileMedium {
    /// Open the medium for the document at `path`
    ///
    /// The parent directory must already exist. Nothing is written to the
    /// document itself; an absent document reads as `None`.
    ///
    /// # Errors
    ///
    /// Fails if the directory is missing or unwritable, or if another
    /// process already holds the document's lock.
    pub fn open(path: impl AsRef<Path>, mode: DurabilityMode) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{}' does not name a file", path.display()),
                )
            })?;

        let lock_path = path.with_file_name(format!("{}.lock", file_name));
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)?;
        lock.try_lock_exclusive().map_err(|_| {
            io::Error::new(
                io::ErrorKind::WouldBlock,
                format!(
                    "document '{}' is already in use by another process",
                    path.display()
                ),
            )
        })?;

        let temp_path = path.with_file_name(format!(".{}.tmp", file_name));
        let medium = FileMedium {
            path,
            temp_path,
            fsync: mode.requires_fsync(),
            write_lock: Mutex::new(()),
            _lock: lock,
        };
        medium.cleanup_temp_file()?;
        Ok(medium)
    }

    /// Path of the document file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove a temporary file left behind by an interrupted write
    ///
    /// Returns true if one was removed.
    pub fn cleanup_temp_file(&self) -> io::Result<bool> {
        match fs::remove_file(&self.temp_path) {
            Ok(()) => {
                info!(
                    target: "cartdb::store",
                    path = ?self.temp_path,
                    "Removed stale temporary document from interrupted write"
                );
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn sync_parent_dir(&self) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        File::open(dir)?.sync_all()
    }
}

impl Medium for FileMedium {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let _serialized = self.write_lock.lock();

        // Step 1: Write to temporary file
        {
            let mut file = File::create(&self.temp_path)?;
            file.write_all(bytes)?;

            // Step 2: fsync the file
            if self.fsync {
                file.sync_all()?;
            }
        }

        // Step 3: Atomic rename
        if let Err(e) = fs::rename(&self.temp_path, &self.path) {
            let _ = fs::remove_file(&self.temp_path);
            return Err(e);
        }

        // Step 4: fsync parent directory
        if self.fsync {
            self.sync_parent_dir()?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
