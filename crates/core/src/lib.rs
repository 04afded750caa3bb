//! Core types for CartDB
//!
//! This crate defines the foundational types used throughout the system:
//! - ItemId: Natural key of a line item
//! - LineItem / CartDocument: The persisted cart aggregate with its derived total
//! - UpsertRequest: Raw upsert input and its per-field validation
//! - Error: Error taxonomy (InvalidArgument, NotFound, StorageUnavailable)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod types;
pub mod validation;

pub use document::{CartDocument, LineItem, UpsertOutcome};
pub use error::{Error, Result};
pub use types::{Field, ItemId};
pub use validation::UpsertRequest;
