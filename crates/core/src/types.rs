//! Core types for CartDB
//!
//! This module defines the identifier types shared by every layer:
//! - ItemId: Natural key of a line item within the cart document
//! - Field: Names the upsert input fields for validation errors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Natural key of a [`LineItem`](crate::LineItem)
///
/// The cart has no surrogate keys: the caller-supplied integer id is the
/// identity of a line item, and at most one item per id exists in a document.
/// Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Create an ItemId from a raw integer
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Zero is never a valid item id
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for i64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    /// Parse a decimal id, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input field of an upsert request
///
/// Carried by [`Error::InvalidArgument`](crate::Error::InvalidArgument) so
/// callers can tell which field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Line item id
    Id,
    /// Display name
    Name,
    /// Unit price
    Price,
    /// Quantity to add
    Quantity,
}

impl Field {
    /// Field name as it appears in the persisted document
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Price => "price",
            Field::Quantity => "quantity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
