//! High-level typed wrapper for the Executor.
//!
//! The [`Cart`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```text
//! use cartdb_executor::Cart;
//!
//! let cart = Cart::open("/var/data/cart")?;
//! cart.upsert(1, "Pen", 2.5, 3)?;
//! assert_eq!(cart.list()?.total(), 7.5);
//! ```

mod items;

use std::path::Path;

use cartdb_engine::{CartConfig, CartEngine};

use crate::{Command, Error, Executor, Output, Result};

/// High-level typed wrapper for cart operations.
///
/// Cloning a `Cart` yields another handle to the same engine.
#[derive(Debug, Clone)]
pub struct Cart {
    executor: Executor,
}

impl Cart {
    /// Open the cart stored in a data directory.
    ///
    /// The directory and its `cart.toml` are created if missing. Opening the
    /// same directory twice in one process shares a single engine.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let engine = CartEngine::open(path)?;
        Ok(Self::from_executor(Executor::new(engine)))
    }

    /// Open with an explicit configuration, persisting it to `cart.toml`.
    pub fn open_with_config<P: AsRef<Path>>(path: P, cfg: CartConfig) -> Result<Self> {
        let engine = CartEngine::open_with_config(path, cfg)?;
        Ok(Self::from_executor(Executor::new(engine)))
    }

    /// Create an ephemeral in-memory cart.
    ///
    /// Useful for testing. No disk files are created.
    pub fn ephemeral() -> Self {
        Self::from_executor(Executor::new(CartEngine::ephemeral()))
    }

    /// Wrap an existing executor
    pub fn from_executor(executor: Executor) -> Self {
        Self { executor }
    }

    /// The underlying executor, for command-level access
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Check the service is reachable; returns the crate version.
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Ping".into(),
            }),
        }
    }
}
