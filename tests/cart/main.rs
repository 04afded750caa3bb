//! Cart integration tests: the public `Cart` API over a real data directory.

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod errors;
mod invariants;
mod persistence;
