//! Failure paths: validation, missing ids, unusable storage.

use crate::common::*;

fn saves(t: &TestCart) -> u64 {
    t.cart.executor().engine().stats().store.saves
}

#[test]
fn delete_missing_is_not_found_and_writes_nothing() {
    let t = TestCart::new();
    t.cart.list().unwrap();
    let before = std::fs::read(t.document_path()).unwrap();
    let saves_before = saves(&t);

    assert_eq!(
        t.cart.delete(999),
        Err(Error::NotFound { id: ItemId::new(999) })
    );

    assert_eq!(saves(&t), saves_before);
    assert_eq!(std::fs::read(t.document_path()).unwrap(), before);
}

#[test]
fn get_missing_is_not_found() {
    let t = TestCart::new();
    t.cart.upsert(1, "Pen", 2.5, 1).unwrap();
    assert_eq!(t.cart.get(2), Err(Error::NotFound { id: ItemId::new(2) }));
}

#[test]
fn invalid_upserts_name_the_field_and_write_nothing() {
    let t = TestCart::new();
    t.cart.upsert(1, "Pen", 2.5, 1).unwrap();
    let saves_before = saves(&t);

    let cases = [
        (0, "Pen", 1.0, 1, Field::Id),
        (2, "", 1.0, 1, Field::Name),
        (2, "   ", 1.0, 1, Field::Name),
        (2, "Ink", -1.0, 1, Field::Price),
        (2, "Ink", f64::INFINITY, 1, Field::Price),
        (2, "Ink", 1.0, 0, Field::Quantity),
        (2, "Ink", 1.0, -4, Field::Quantity),
    ];
    for (id, name, price, quantity, field) in cases {
        match t.cart.upsert(id, name, price, quantity) {
            Err(Error::InvalidArgument { field: got, .. }) => assert_eq!(got, field),
            other => panic!("expected InvalidArgument on {}, got {:?}", field, other),
        }
    }

    assert_eq!(saves(&t), saves_before);
    assert_eq!(t.cart.list().unwrap().len(), 1);
}

#[test]
fn unreadable_document_is_storage_unavailable() {
    let t = TestCart::new();
    // A directory where the document should be: reads and renames both fail.
    std::fs::create_dir(t.document_path()).unwrap();

    assert!(matches!(t.cart.list(), Err(Error::StorageUnavailable { .. })));
    assert!(matches!(
        t.cart.upsert(1, "Pen", 2.5, 1),
        Err(Error::StorageUnavailable { .. })
    ));
}

#[test]
fn reset_over_unwritable_location_is_storage_unavailable() {
    let t = TestCart::new();
    std::fs::create_dir(t.document_path()).unwrap();
    std::fs::write(t.document_path().join("occupied"), b"x").unwrap();

    assert!(matches!(t.cart.reset(), Err(Error::StorageUnavailable { .. })));
}

#[test]
fn data_dir_under_a_file_is_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain-file");
    std::fs::write(&file, b"x").unwrap();

    assert!(matches!(
        Cart::open(file.join("cart")),
        Err(Error::StorageUnavailable { .. })
    ));
}
