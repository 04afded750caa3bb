//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant; see the table on
//! [`Command`](crate::Command).

use cartdb_core::{CartDocument, LineItem};
use serde::{Deserialize, Serialize};

/// Successful command execution results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (delete, reset)
    Unit,

    /// Ping response
    Pong {
        /// Crate version
        version: String,
    },

    /// Whole cart: items in insertion order and their total
    Document(CartDocument),

    /// A single line item
    Item(LineItem),
}
