//! # CartDB Executor
//!
//! The public API for CartDB, a persistent single-document line-item store
//! for shopping carts.
//!
//! This is the only crate users need to import. It provides:
//! - [`Cart`] - Typed interface: list, get, upsert, delete, reset
//! - [`Command`]/[`Output`] - Low-level command interface (for transports)
//! - [`Error`] - Serializable error taxonomy
//!
//! ## Quick Start
//!
//! ```text
//! use cartdb_executor::Cart;
//!
//! let cart = Cart::open("/path/to/data")?;
//!
//! cart.upsert(1, "Pen", 2.5, 3)?;
//! cart.upsert(1, "Pen", 2.5, 1)?;      // merges: quantity 4
//! assert_eq!(cart.list()?.total(), 10.0);
//!
//! cart.delete(1)?;
//! cart.reset()?;
//! ```
//!
//! ## Persisted Document
//!
//! ```text
//! {
//!   "items": [{ "id": 1, "name": "Pen", "price": 2.5, "quantity": 4 }],
//!   "total": 10.0
//! }
//! ```
//!
//! `total` is always recomputed from the items on save.

#![warn(missing_docs)]

mod api;
mod command;
mod convert;
mod error;
mod executor;
mod output;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::Cart;
pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;

// Re-export data types so users don't need cartdb-core directly
pub use cartdb_core::{CartDocument, Field, ItemId, LineItem, UpsertRequest};

// Re-export configuration types so users don't need cartdb-engine directly
pub use cartdb_engine::{CartConfig, CartEngine, EngineStats};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
