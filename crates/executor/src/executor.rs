//! The Executor - single entry point to the cart engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! engine operations and converts results to outputs.

use std::sync::Arc;

use cartdb_core::UpsertRequest;
use cartdb_engine::CartEngine;
use tracing::{debug, warn};

use crate::handlers::cart;
use crate::{Command, Output, Result};

/// The command executor - single entry point to the cart engine.
///
/// The Executor is **stateless**: it holds a reference to the engine but
/// maintains no state of its own.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use cartdb_executor::{Command, Executor};
/// use cartdb_engine::CartEngine;
///
/// let executor = Executor::new(CartEngine::ephemeral());
///
/// executor.execute(Command::Upsert {
///     id: Some(1),
///     name: Some("Pen".into()),
///     price: Some(2.5),
///     quantity: Some(3),
/// })?;
///
/// let results = executor.execute_many(vec![Command::List, Command::Reset]);
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    engine: Arc<CartEngine>,
}

impl Executor {
    /// Create a new executor over an engine.
    pub fn new(engine: Arc<CartEngine>) -> Self {
        Self { engine }
    }

    /// The engine this executor dispatches to
    pub fn engine(&self) -> &Arc<CartEngine> {
        &self.engine
    }

    /// Execute a single command.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        let result = self.dispatch(cmd);
        match &result {
            Ok(_) => debug!(target: "cartdb::executor", command = name, "ok"),
            Err(e) if e.is_client_error() => {
                debug!(target: "cartdb::executor", command = name, error = %e, "rejected")
            }
            Err(e) => warn!(target: "cartdb::executor", command = name, error = %e, "failed"),
        }
        result
    }

    /// Execute commands in order, one result per command.
    ///
    /// A failing command does not stop the batch. Commands are not atomic as
    /// a group: each one is its own load→mutate→save cycle.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    fn dispatch(&self, cmd: Command) -> Result<Output> {
        match cmd {
            Command::Ping => Ok(Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
            Command::List => cart::list(&self.engine),
            Command::Get { id } => cart::get(&self.engine, id),
            Command::Upsert {
                id,
                name,
                price,
                quantity,
            } => cart::upsert(
                &self.engine,
                UpsertRequest {
                    id,
                    name,
                    price,
                    quantity,
                },
            ),
            Command::Delete { id } => cart::delete(&self.engine, id),
            Command::Reset => cart::reset(&self.engine),
        }
    }
}
