//! Command enum: every operation the cart supports.
//!
//! Commands are plain data so any transport can carry them. They serialize
//! as externally tagged JSON:
//!
//! ```text
//! "List"
//! {"Get": {"id": 1}}
//! {"Upsert": {"id": 1, "name": "Pen", "price": 2.5, "quantity": 3}}
//! ```
//!
//! Upsert fields are optional on the wire; missing ones are reported as
//! `InvalidArgument` by the executor, not as a decoding error.

use cartdb_core::{ItemId, UpsertRequest};
use serde::{Deserialize, Serialize};

/// A single cart operation.
///
/// | Command | Output |
/// |---------|--------|
/// | `Ping` | `Pong` |
/// | `List` | `Document` |
/// | `Get` | `Item` |
/// | `Upsert` | `Item` |
/// | `Delete` | `Unit` |
/// | `Reset` | `Unit` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Liveness check
    Ping,

    /// All items and the total
    List,

    /// One item by id
    Get {
        /// Item id
        id: ItemId,
    },

    /// Insert an item or add to its quantity
    Upsert {
        /// Item id
        #[serde(default)]
        id: Option<i64>,
        /// Display name (ignored when merging)
        #[serde(default)]
        name: Option<String>,
        /// Unit price (ignored when merging)
        #[serde(default)]
        price: Option<f64>,
        /// Quantity to add
        #[serde(default)]
        quantity: Option<i64>,
    },

    /// Remove one item by id
    Delete {
        /// Item id
        id: ItemId,
    },

    /// Empty the cart
    Reset,
}

impl Command {
    /// Variant name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "Ping",
            Command::List => "List",
            Command::Get { .. } => "Get",
            Command::Upsert { .. } => "Upsert",
            Command::Delete { .. } => "Delete",
            Command::Reset => "Reset",
        }
    }

    /// True for commands that write the document
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::Upsert { .. } | Command::Delete { .. } | Command::Reset
        )
    }
}

impl From<UpsertRequest> for Command {
    fn from(req: UpsertRequest) -> Self {
        Command::Upsert {
            id: req.id,
            name: req.name,
            price: req.price,
            quantity: req.quantity,
        }
    }
}
