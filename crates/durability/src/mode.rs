//! Durability mode configuration
//!
//! Controls where the cart document lives and how hard each save pushes it
//! toward stable storage.

use std::fmt;
use std::str::FromStr;

/// Durability mode for document saves
///
/// # Modes
///
/// | Mode | Medium | fsync | Data Loss Window |
/// |------|--------|-------|-----------------|
/// | Cache | Memory | Never | Everything on exit |
/// | Standard | File | Never (rename only) | Last save on power loss |
/// | Always | File | File + directory, every save | Zero |
///
/// Every file-backed mode replaces the document with temp-then-rename, so
/// readers never see a partially written file regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// In-memory only, nothing touches disk
    ///
    /// Use case: tests, ephemeral carts, development.
    Cache,

    /// Atomic rename without fsync (the default)
    ///
    /// Survives process crashes; an OS crash may lose the last save.
    #[default]
    Standard,

    /// fsync the document and its directory on every save
    ///
    /// Use when losing a single write is unacceptable.
    Always,
}

impl DurabilityMode {
    /// Check if this mode needs a file on disk
    ///
    /// Returns false for Cache mode, true for all others.
    pub fn requires_file(&self) -> bool {
        !matches!(self, DurabilityMode::Cache)
    }

    /// Check if this mode fsyncs on every save
    ///
    /// Returns true only for Always mode.
    pub fn requires_fsync(&self) -> bool {
        matches!(self, DurabilityMode::Always)
    }

    /// Name used in `cart.toml`
    pub fn as_str(&self) -> &'static str {
        match self {
            DurabilityMode::Cache => "cache",
            DurabilityMode::Standard => "standard",
            DurabilityMode::Always => "always",
        }
    }

    /// Human-readable description of the mode
    pub fn description(&self) -> &'static str {
        match self {
            DurabilityMode::Cache => "Cache (in-memory, lost on exit)",
            DurabilityMode::Standard => "Standard (atomic rename, no fsync)",
            DurabilityMode::Always => "Always sync (safest, slowest)",
        }
    }
}

impl fmt::Display for DurabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized durability mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown durability mode '{0}', expected \"cache\", \"standard\" or \"always\"")]
pub struct UnknownDurabilityMode(pub String);

impl FromStr for DurabilityMode {
    type Err = UnknownDurabilityMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cache" => Ok(DurabilityMode::Cache),
            "standard" => Ok(DurabilityMode::Standard),
            "always" => Ok(DurabilityMode::Always),
            other => Err(UnknownDurabilityMode(other.to_string())),
        }
    }
}
