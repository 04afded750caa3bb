//! Command handlers.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `cart` | List, Get, Upsert, Delete, Reset |

pub mod cart;
