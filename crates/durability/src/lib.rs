//! Durability layer for CartDB
//!
//! This crate handles everything that touches the storage medium:
//!
//! - DocumentStore: whole-document load/save with lazy initialization,
//!   derived-total recomputation and self-healing of undecodable payloads
//! - Media: crash-safe single-file medium (temp + rename, process lock) and
//!   an in-memory medium
//! - Durability modes: Cache, Standard (default), Always
//! - JSON codec for the persisted document
//! - Fault-injection helpers for tests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod file;
pub mod medium;
pub mod mode;
pub mod store;
pub mod testing;

pub use codec::{Decoded, JsonCodec};
pub use file::FileMedium;
pub use medium::{Medium, MemoryMedium};
pub use mode::{DurabilityMode, UnknownDurabilityMode};
pub use store::{DocumentStore, StoreStats};
