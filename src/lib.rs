//! CartDB - persistent single-document line-item store for shopping carts
//!
//! One JSON document holds every line item and their derived total. Each
//! operation loads the document, mutates it in memory and saves it back;
//! mutations on the same document are serialized.
//!
//! # Quick Start
//!
//! ```ignore
//! use cartdb::Cart;
//!
//! let cart = Cart::open("/path/to/data")?;
//! cart.upsert(1, "Pen", 2.5, 3)?;
//! assert_eq!(cart.list()?.total(), 7.5);
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`] which provides a command-based API.
//! The [`Cart`] struct provides a convenient high-level interface.
//!
//! Internal implementation details (durability, engine) are not exposed -
//! only the executor API is public.

// Re-export the public API from cartdb-executor
pub use cartdb_executor::*;
