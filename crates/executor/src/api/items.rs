//! Line item operations.

use cartdb_core::{CartDocument, ItemId, LineItem, UpsertRequest};

use super::Cart;
use crate::{Command, Error, Output, Result};

impl Cart {
    /// All items in insertion order, with the total.
    pub fn list(&self) -> Result<CartDocument> {
        match self.executor.execute(Command::List)? {
            Output::Document(doc) => Ok(doc),
            _ => Err(Error::Internal {
                reason: "Unexpected output for List".into(),
            }),
        }
    }

    /// Get one item by id.
    ///
    /// Returns `Error::NotFound` if no item has this id.
    pub fn get(&self, id: i64) -> Result<LineItem> {
        match self.executor.execute(Command::Get { id: ItemId::new(id) })? {
            Output::Item(item) => Ok(item),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Get".into(),
            }),
        }
    }

    /// Add an item, or add `quantity` to the item already under `id`.
    ///
    /// When the id exists, `name` and `price` are ignored and the stored
    /// values kept. Returns the item as stored after the change.
    pub fn upsert(
        &self,
        id: i64,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Result<LineItem> {
        self.upsert_request(UpsertRequest::new(id, name, price, quantity))
    }

    /// Upsert from raw, possibly incomplete fields.
    pub fn upsert_request(&self, request: UpsertRequest) -> Result<LineItem> {
        match self.executor.execute(Command::from(request))? {
            Output::Item(item) => Ok(item),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Upsert".into(),
            }),
        }
    }

    /// Remove one item by id.
    ///
    /// Returns `Error::NotFound` (and writes nothing) if no item has this id.
    pub fn delete(&self, id: i64) -> Result<()> {
        match self.executor.execute(Command::Delete { id: ItemId::new(id) })? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Delete".into(),
            }),
        }
    }

    /// Empty the cart.
    pub fn reset(&self) -> Result<()> {
        match self.executor.execute(Command::Reset)? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Reset".into(),
            }),
        }
    }
}
