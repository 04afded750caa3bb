//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::{Path, PathBuf};
use std::sync::Once;

pub use cartdb::{Cart, CartConfig, CartDocument, Error, Field, ItemId, LineItem};
pub use cartdb_engine::{CartEngine, CONFIG_FILE_NAME, DEFAULT_DOCUMENT_NAME};
use tempfile::TempDir;

static INIT_TRACING: Once = Once::new();

/// Install a test subscriber once; output shows with `--nocapture`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cartdb=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A cart opened in a fresh temporary directory.
pub struct TestCart {
    pub cart: Cart,
    pub dir: TempDir,
}

impl TestCart {
    /// Open with the default `cart.toml`.
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let cart = Cart::open(dir.path()).expect("Failed to open test cart");
        TestCart { cart, dir }
    }

    /// Open with fsync on every write.
    pub fn new_strict() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let cfg = CartConfig {
            durability: "always".to_string(),
            ..CartConfig::default()
        };
        let cart = Cart::open_with_config(dir.path(), cfg).expect("Failed to open test cart");
        TestCart { cart, dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the persisted document.
    pub fn document_path(&self) -> PathBuf {
        self.dir.path().join(DEFAULT_DOCUMENT_NAME)
    }

    /// Persisted document as raw JSON.
    pub fn read_json(&self) -> serde_json::Value {
        read_json(&self.document_path())
    }

    /// Persisted document exactly as written.
    pub fn read_text(&self) -> String {
        std::fs::read_to_string(self.document_path()).expect("document should exist")
    }

    /// Drop the handle and open the same directory again.
    pub fn reopen(self) -> Self {
        let TestCart { cart, dir } = self;
        drop(cart);
        let cart = Cart::open(dir.path()).expect("Failed to reopen test cart");
        TestCart { cart, dir }
    }
}

/// Parse a file as JSON.
pub fn read_json(path: &Path) -> serde_json::Value {
    let bytes = std::fs::read(path).expect("Failed to read document");
    serde_json::from_slice(&bytes).expect("Document is not JSON")
}

/// The canonical empty document as the default pretty codec writes it.
pub const EMPTY_DOCUMENT_TEXT: &str = "{\n  \"items\": [],\n  \"total\": 0.0\n}";

/// Assert the stored total equals the sum of price × quantity.
pub fn assert_total_consistent(doc: &CartDocument) {
    let expected: f64 = doc
        .items()
        .iter()
        .fold(0.0, |t, i| t + i.price * f64::from(i.quantity));
    assert!(
        (doc.total() - expected).abs() < 1e-9,
        "total {} != sum of items {}",
        doc.total(),
        expected
    );
}
