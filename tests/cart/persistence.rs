//! What lands on disk, and what comes back after reopening.

use crate::common::*;

#[test]
fn document_is_created_lazily_on_first_access() {
    let t = TestCart::new();
    assert!(t.path().join(CONFIG_FILE_NAME).exists());
    assert!(!t.document_path().exists());

    t.cart.list().unwrap();
    assert_eq!(t.read_json(), serde_json::json!({ "items": [], "total": 0.0 }));
}

#[test]
fn persisted_shape_is_items_and_total() {
    let t = TestCart::new();
    t.cart.upsert(1, "Pen", 2.5, 3).unwrap();
    t.cart.upsert(2, "Ink", 4.0, 1).unwrap();

    assert_eq!(
        t.read_json(),
        serde_json::json!({
            "items": [
                { "id": 1, "name": "Pen", "price": 2.5, "quantity": 3 },
                { "id": 2, "name": "Ink", "price": 4.0, "quantity": 1 }
            ],
            "total": 11.5
        })
    );
}

#[test]
fn default_document_is_pretty_printed() {
    let t = TestCart::new();
    t.cart.upsert(1, "Pen", 2.5, 3).unwrap();
    let text = std::fs::read_to_string(t.document_path()).unwrap();
    assert!(text.contains("\n  \"items\""));
}

#[test]
fn reopen_sees_persisted_state() {
    let t = TestCart::new_strict();
    t.cart.upsert(1, "Pen", 2.5, 3).unwrap();
    t.cart.upsert(7, "Mug", 8.0, 1).unwrap();
    t.cart.delete(1).unwrap();

    let t = t.reopen();
    let doc = t.cart.list().unwrap();
    assert_eq!(doc.items(), &[LineItem::new(7, "Mug", 8.0, 1)]);
    assert_eq!(doc.total(), 8.0);
}

#[test]
fn same_directory_shares_one_engine() {
    let t = TestCart::new();
    let other = Cart::open(t.path()).unwrap();

    t.cart.upsert(1, "Pen", 2.5, 1).unwrap();
    other.upsert(1, "Pen", 2.5, 1).unwrap();

    assert!(std::sync::Arc::ptr_eq(
        t.cart.executor().engine(),
        other.executor().engine()
    ));
    assert_eq!(t.cart.get(1).unwrap().quantity, 2);
}

#[test]
fn corrupt_document_self_heals() {
    let t = TestCart::new();
    t.cart.upsert(1, "Pen", 2.5, 3).unwrap();
    std::fs::write(t.document_path(), b"{\"items\": [{\"id\": 1,").unwrap();

    assert_eq!(t.cart.list().unwrap(), CartDocument::empty());
    assert_eq!(t.read_json(), serde_json::json!({ "items": [], "total": 0.0 }));
    assert_eq!(t.cart.executor().engine().stats().store.recoveries, 1);

    t.cart.upsert(2, "Ink", 4.0, 1).unwrap();
    assert_eq!(t.cart.list().unwrap().total(), 4.0);
}

#[test]
fn wrong_shape_document_self_heals() {
    let t = TestCart::new();
    std::fs::write(
        t.document_path(),
        br#"{"items":[{"id":1,"name":"Pen","price":2.5,"quantity":-3}],"total":0}"#,
    )
    .unwrap();

    assert!(t.cart.list().unwrap().is_empty());
}

#[test]
fn hand_edited_total_is_recomputed() {
    let t = TestCart::new();
    std::fs::write(
        t.document_path(),
        br#"{"items":[{"id":1,"name":"Pen","price":2.5,"quantity":4}],"total":999}"#,
    )
    .unwrap();

    assert_eq!(t.cart.list().unwrap().total(), 10.0);
    t.cart.upsert(2, "Ink", 1.0, 1).unwrap();
    assert_eq!(t.read_json()["total"], serde_json::json!(11.0));
}

#[test]
fn custom_document_name_and_compact_output() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = CartConfig {
        durability: "standard".into(),
        document: "orders.json".into(),
        pretty: false,
    };
    let cart = Cart::open_with_config(dir.path(), cfg).unwrap();
    cart.upsert(1, "Pen", 2.5, 2).unwrap();

    let text = std::fs::read_to_string(dir.path().join("orders.json")).unwrap();
    assert_eq!(
        text,
        r#"{"items":[{"id":1,"name":"Pen","price":2.5,"quantity":2}],"total":5.0}"#
    );
    assert!(!dir.path().join(DEFAULT_DOCUMENT_NAME).exists());
}

#[test]
fn no_temporary_files_left_behind() {
    let t = TestCart::new();
    for i in 1..=20 {
        t.cart.upsert(i, "x", 1.0, 1).unwrap();
    }
    let stray: Vec<_> = std::fs::read_dir(t.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(stray.is_empty(), "stray temp files: {:?}", stray);
}

#[test]
fn empty_document_bytes_after_lazy_init() {
    let t = TestCart::new();
    t.cart.list().unwrap();
    assert_eq!(t.read_text(), EMPTY_DOCUMENT_TEXT);
}

#[test]
fn empty_document_bytes_after_reset() {
    let t = TestCart::new();
    t.cart.upsert(1, "Pen", 2.5, 3).unwrap();
    t.cart.reset().unwrap();
    assert_eq!(t.read_text(), EMPTY_DOCUMENT_TEXT);
}

#[test]
fn empty_document_bytes_after_deleting_last_item() {
    let t = TestCart::new();
    t.cart.upsert(1, "Pen", 2.5, 3).unwrap();
    t.cart.delete(1).unwrap();
    assert_eq!(t.read_text(), EMPTY_DOCUMENT_TEXT);
}

#[test]
fn empty_document_bytes_after_self_heal() {
    let t = TestCart::new();
    std::fs::write(t.document_path(), b"garbage").unwrap();
    t.cart.list().unwrap();
    assert_eq!(t.read_text(), EMPTY_DOCUMENT_TEXT);
}

#[test]
fn overflowing_subtotal_is_rejected_and_cart_survives() {
    let t = TestCart::new();
    t.cart.upsert(1, "Pen", 2.5, 3).unwrap();
    let before = t.read_text();

    match t.cart.upsert(2, "Yacht", 1e308, 2) {
        Err(Error::InvalidArgument { field, .. }) => assert_eq!(field, Field::Price),
        other => panic!("expected InvalidArgument on price, got {:?}", other),
    }
    assert_eq!(t.read_text(), before);

    let doc = t.cart.list().unwrap();
    assert_eq!(doc.items(), &[LineItem::new(1, "Pen", 2.5, 3)]);
    assert_eq!(doc.total(), 7.5);
    assert_eq!(t.cart.executor().engine().stats().store.recoveries, 0);
}

#[test]
fn overflowing_merge_is_rejected_and_cart_survives() {
    let t = TestCart::new();
    t.cart.upsert(1, "Yacht", 1e308, 1).unwrap();

    match t.cart.upsert(1, "Yacht", 1e308, 1) {
        Err(Error::InvalidArgument { field, .. }) => assert_eq!(field, Field::Quantity),
        other => panic!("expected InvalidArgument on quantity, got {:?}", other),
    }
    let t = t.reopen();
    assert_eq!(t.cart.get(1).unwrap().quantity, 1);
}

#[test]
fn hand_edited_invalid_item_self_heals() {
    let t = TestCart::new();
    std::fs::write(
        t.document_path(),
        r#"{"items":[{"id":1,"name":"Pen","price":2.5,"quantity":0}],"total":0}"#,
    )
    .unwrap();

    assert_eq!(t.cart.list().unwrap(), CartDocument::empty());
    assert_eq!(t.read_text(), EMPTY_DOCUMENT_TEXT);
    assert_eq!(t.cart.executor().engine().stats().store.recoveries, 1);
}
