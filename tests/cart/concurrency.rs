//! Concurrent callers on one cart.

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_distinct_upserts_all_persist() {
    let t = TestCart::new();
    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let cart = t.cart.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let id = i as i64 + 1;
                cart.upsert(id, format!("item-{}", id), 2.0, 1).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let doc = t.cart.list().unwrap();
    assert_eq!(doc.len(), threads);
    assert_eq!(doc.total(), 2.0 * threads as f64);

    let on_disk = t.read_json();
    assert_eq!(on_disk["items"].as_array().unwrap().len(), threads);
}

#[test]
fn concurrent_merges_on_one_id_lose_nothing() {
    let t = TestCart::new();
    let threads = 8;
    let per_thread = 20;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            // Separate handles to the same directory share one engine.
            let cart = Cart::open(t.path()).unwrap();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..per_thread {
                    cart.upsert(1, "Pen", 0.5, 1).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let item = t.cart.get(1).unwrap();
    assert_eq!(item.quantity as usize, threads * per_thread);
    assert_total_consistent(&t.cart.list().unwrap());
}

#[test]
fn readers_never_see_a_torn_document() {
    let t = TestCart::new();
    t.cart.list().unwrap();
    let writers = 4;
    let readers = 4;
    let barrier = Arc::new(Barrier::new(writers + readers));

    let mut handles = Vec::new();
    for w in 0..writers {
        let cart = t.cart.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..25 {
                let id = (w * 100 + i) as i64 + 1;
                cart.upsert(id, "x", 1.25, 2).unwrap();
                if i % 5 == 0 {
                    cart.delete(id).unwrap();
                }
            }
        }));
    }
    for _ in 0..readers {
        let cart = t.cart.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..50 {
                let doc = cart.list().unwrap();
                assert_total_consistent(&doc);
                assert!(doc.has_unique_ids());
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(t.cart.list().unwrap().len(), writers * 20);
}
