//! Cart command handlers.
//!
//! Each handler calls one engine operation and wraps the result in the
//! matching [`Output`] variant. Core errors convert through `?`.

use std::sync::Arc;

use cartdb_core::{ItemId, UpsertRequest};
use cartdb_engine::CartEngine;

use crate::{Output, Result};

/// Handle List command.
pub fn list(engine: &Arc<CartEngine>) -> Result<Output> {
    Ok(Output::Document(engine.list_items()?))
}

/// Handle Get command.
pub fn get(engine: &Arc<CartEngine>, id: ItemId) -> Result<Output> {
    Ok(Output::Item(engine.get_item(id)?))
}

/// Handle Upsert command.
pub fn upsert(engine: &Arc<CartEngine>, request: UpsertRequest) -> Result<Output> {
    Ok(Output::Item(engine.upsert_item(request)?))
}

/// Handle Delete command.
pub fn delete(engine: &Arc<CartEngine>, id: ItemId) -> Result<Output> {
    engine.delete_item(id)?;
    Ok(Output::Unit)
}

/// Handle Reset command.
pub fn reset(engine: &Arc<CartEngine>) -> Result<Output> {
    engine.reset_cart()?;
    Ok(Output::Unit)
}
