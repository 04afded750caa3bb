//! Property tests: the total and id uniqueness hold after any sequence.

use crate::common::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Upsert { id: i64, cents: u32, qty: i64 },
    Delete(i64),
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (1i64..6, 0u32..1000, 1i64..5).prop_map(|(id, cents, qty)| Step::Upsert { id, cents, qty }),
        3 => (1i64..6).prop_map(Step::Delete),
        1 => Just(Step::Reset),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn total_and_uniqueness_hold(steps in prop::collection::vec(step(), 1..30)) {
        let t = TestCart::new();
        for s in steps {
            match s {
                Step::Upsert { id, cents, qty } => {
                    t.cart.upsert(id, format!("item-{}", id), f64::from(cents) / 100.0, qty).unwrap();
                }
                Step::Delete(id) => match t.cart.delete(id) {
                    Ok(()) | Err(Error::NotFound { .. }) => {}
                    Err(e) => panic!("unexpected error: {}", e),
                },
                Step::Reset => t.cart.reset().unwrap(),
            }

            let doc = t.cart.list().unwrap();
            assert_total_consistent(&doc);
            prop_assert!(doc.has_unique_ids());

            let on_disk = t.read_json();
            prop_assert_eq!(on_disk["items"].as_array().map(|a| a.len()), Some(doc.len()));
        }
    }
}
