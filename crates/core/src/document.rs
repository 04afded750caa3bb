//! The cart document and its line items
//!
//! `CartDocument` is the only persisted aggregate. Its `total` is derived:
//! every mutator recomputes it from `items`, and nothing outside this module
//! can assign it directly.
//!
//! On disk the document is a JSON object with exactly two fields:
//!
//! ```json
//! {
//!   "items": [{ "id": 1, "name": "Pen", "price": 2.5, "quantity": 3 }],
//!   "total": 7.5
//! }
//! ```

use crate::error::{Error, Result};
use crate::types::{Field, ItemId};
use serde::{Deserialize, Serialize};

/// One product entry in the cart, keyed by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Natural key, unique within a document
    pub id: ItemId,
    /// Display name, non-empty
    pub name: String,
    /// Unit price, non-negative
    pub price: f64,
    /// Quantity, positive
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item without validation
    ///
    /// Use [`UpsertRequest::validate`](crate::UpsertRequest::validate) for
    /// untrusted input.
    pub fn new(id: i64, name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            price,
            quantity,
        }
    }

    /// `price * quantity`
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Result of [`CartDocument::upsert`]
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    /// A new item was appended
    Inserted(LineItem),
    /// The quantity of an existing item was increased
    Merged(LineItem),
}

impl UpsertOutcome {
    /// The item as it now stands in the document
    pub fn item(&self) -> &LineItem {
        match self {
            UpsertOutcome::Inserted(item) | UpsertOutcome::Merged(item) => item,
        }
    }

    /// Consume the outcome, returning the item
    pub fn into_item(self) -> LineItem {
        match self {
            UpsertOutcome::Inserted(item) | UpsertOutcome::Merged(item) => item,
        }
    }

    /// True when an existing item absorbed the quantity
    pub fn is_merged(&self) -> bool {
        matches!(self, UpsertOutcome::Merged(_))
    }
}

/// The single persisted cart aggregate
///
/// Items keep insertion order. Missing fields deserialize to their empty
/// values, so `{}` reads as the empty document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartDocument {
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    total: f64,
}

impl Default for CartDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl CartDocument {
    /// The canonical empty document: no items, total 0
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0.0,
        }
    }

    /// Build a document from items, computing the total
    ///
    /// Does not check id uniqueness; callers assembling documents from
    /// untrusted sources should go through [`upsert`](Self::upsert).
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut doc = Self { items, total: 0.0 };
        doc.recompute_total();
        doc
    }

    /// Items in insertion order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Derived total as of the last mutation or recomputation
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the cart holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the document, returning its items
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// First item with the given id
    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Σ(price × quantity) over the current items
    ///
    /// Always `+0.0` for an empty cart.
    pub fn computed_total(&self) -> f64 {
        self.items
            .iter()
            .fold(0.0, |total, item| total + item.subtotal())
    }

    /// Total as it would be with the item at `index` priced at `subtotal`
    fn total_replacing(&self, index: usize, subtotal: f64) -> f64 {
        self.items
            .iter()
            .enumerate()
            .fold(0.0, |total, (i, item)| {
                total + if i == index { subtotal } else { item.subtotal() }
            })
    }

    /// Recompute `total` from `items`, returning the new value
    pub fn recompute_total(&mut self) -> f64 {
        self.total = self.computed_total();
        self.total
    }

    /// Insert a validated item, or merge its quantity into an existing one
    ///
    /// When an item with the same id exists only its quantity changes; the
    /// existing name and price are kept. Fails with `InvalidArgument`, leaving
    /// the document untouched, if the merged quantity would overflow or the
    /// resulting subtotal or total is not a finite number (on `quantity` for
    /// a merge, on `price` for an insert).
    pub fn upsert(&mut self, item: LineItem) -> Result<UpsertOutcome> {
        let outcome = match self.items.iter().position(|i| i.id == item.id) {
            Some(index) => {
                let existing = &self.items[index];
                let quantity = existing
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or_else(|| {
                        Error::invalid_argument(
                            Field::Quantity,
                            format!(
                                "merged quantity for item {} exceeds {}",
                                item.id,
                                u32::MAX
                            ),
                        )
                    })?;
                let subtotal = existing.price * f64::from(quantity);
                if !subtotal.is_finite() || !self.total_replacing(index, subtotal).is_finite() {
                    return Err(Error::invalid_argument(
                        Field::Quantity,
                        format!("merged quantity for item {} overflows the cart total", item.id),
                    ));
                }
                self.items[index].quantity = quantity;
                UpsertOutcome::Merged(self.items[index].clone())
            }
            None => {
                let subtotal = item.subtotal();
                if !subtotal.is_finite() || !(self.computed_total() + subtotal).is_finite() {
                    return Err(Error::invalid_argument(
                        Field::Price,
                        format!("price * quantity for item {} overflows the cart total", item.id),
                    ));
                }
                self.items.push(item.clone());
                UpsertOutcome::Inserted(item)
            }
        };
        self.recompute_total();
        Ok(outcome)
    }

    /// Remove the first item with the given id
    ///
    /// Relative order of the remaining items is preserved.
    pub fn remove(&mut self, id: ItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        self.recompute_total();
        Some(removed)
    }

    /// Drop every item, resetting to the canonical empty state
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = 0.0;
    }

    /// First item that no validated write could have produced, described
    ///
    /// Catches hand edits such as a zero quantity, a negative or non-finite
    /// price, an empty name or a non-finite total. Duplicate ids are not
    /// reported here.
    pub fn find_invalid_item(&self) -> Option<String> {
        for item in &self.items {
            if item.id.get() == 0 {
                return Some("item with id 0".to_string());
            }
            if item.name.trim().is_empty() {
                return Some(format!("item {} has an empty name", item.id));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Some(format!("item {} has price {}", item.id, item.price));
            }
            if item.quantity == 0 {
                return Some(format!("item {} has quantity 0", item.id));
            }
        }
        if !self.computed_total().is_finite() {
            return Some("total is not a finite number".to_string());
        }
        None
    }

    /// True when no id appears twice
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.items.len());
        self.items.iter().all(|item| seen.insert(item.id))
    }
}
