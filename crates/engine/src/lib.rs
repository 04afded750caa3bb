//! Cart engine for CartDB
//!
//! This crate orchestrates the lower layers:
//! - CartEngine: open/ephemeral, list/get/upsert/delete/reset
//! - Serialized load→mutate→save transactions over the durable store
//! - `cart.toml` configuration in the data directory
//! - Process-wide registry so one directory maps to one engine
//!
//! The engine is the only component that knows about:
//! - Where the document lives and how it is configured
//! - Which operations may run concurrently

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;

pub use engine::{
    CartConfig, CartEngine, ConfigError, EngineStats, CONFIG_FILE_NAME, DEFAULT_DOCUMENT_NAME,
    OPEN_ENGINES,
};
