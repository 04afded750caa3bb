//! Upsert input validation
//!
//! Callers hand over raw, possibly incomplete fields. Each field is checked
//! for presence and range in a fixed order (id, name, price, quantity) and
//! the first failure is reported as a single `InvalidArgument` naming it.
//!
//! A price of exactly zero is accepted.

use crate::document::LineItem;
use crate::error::{Error, Result};
use crate::types::{Field, ItemId};
use serde::{Deserialize, Serialize};

/// Raw upsert input, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpsertRequest {
    /// Item id; required, nonzero
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name; required, not blank
    #[serde(default)]
    pub name: Option<String>,
    /// Unit price; required, finite, non-negative
    #[serde(default)]
    pub price: Option<f64>,
    /// Quantity to add; required, positive
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl UpsertRequest {
    /// Request with every field present
    pub fn new(id: i64, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            price: Some(price),
            quantity: Some(quantity),
        }
    }

    /// Check every field and produce the line item to upsert
    pub fn validate(self) -> Result<LineItem> {
        let id = match self.id {
            None | Some(0) => {
                return Err(Error::invalid_argument(
                    Field::Id,
                    "is required and must be nonzero",
                ))
            }
            Some(id) => ItemId::new(id),
        };

        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(Error::invalid_argument(
                    Field::Name,
                    "is required and must not be empty",
                ))
            }
        };

        let price = match self.price {
            None => return Err(Error::invalid_argument(Field::Price, "is required")),
            Some(p) if !p.is_finite() => {
                return Err(Error::invalid_argument(
                    Field::Price,
                    "must be a finite number",
                ))
            }
            Some(p) if p < 0.0 => {
                return Err(Error::invalid_argument(
                    Field::Price,
                    format!("must not be negative, got {}", p),
                ))
            }
            // Normalizes -0.0
            Some(p) => p + 0.0,
        };

        let quantity = match self.quantity {
            None | Some(0) => {
                return Err(Error::invalid_argument(
                    Field::Quantity,
                    "is required and must be nonzero",
                ))
            }
            Some(q) if q < 0 => {
                return Err(Error::invalid_argument(
                    Field::Quantity,
                    format!("must be positive, got {}", q),
                ))
            }
            Some(q) => u32::try_from(q).map_err(|_| {
                Error::invalid_argument(
                    Field::Quantity,
                    format!("must not exceed {}, got {}", u32::MAX, q),
                )
            })?,
        };

        Ok(LineItem {
            id,
            name,
            price,
            quantity,
        })
    }
}
