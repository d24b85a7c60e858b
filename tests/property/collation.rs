//! Display-key collation properties.
//!
//! Listing files must come out in the same order whatever order the loader
//! produced, and items with equal keys keep their load order.

use metadist::collate::{compare, sort_by_display_key};
use proptest::prelude::*;
use std::cmp::Ordering;

fn display_key() -> impl Strategy<Value = String> {
    "[a-cA-CéÉ0-9 ]{0,6}"
}

proptest! {
    #[test]
    fn compare_is_antisymmetric(a in display_key(), b in display_key()) {
        prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
    }

    #[test]
    fn compare_is_reflexive(a in display_key()) {
        prop_assert_eq!(compare(&a, &a), Ordering::Equal);
    }

    #[test]
    fn compare_is_transitive(a in display_key(), b in display_key(), c in display_key()) {
        if compare(&a, &b) != Ordering::Greater && compare(&b, &c) != Ordering::Greater {
            prop_assert_ne!(compare(&a, &c), Ordering::Greater);
        }
    }

    #[test]
    fn sort_result_independent_of_input_order(
        (keys, shuffled) in prop::collection::vec(display_key(), 0..24)
            .prop_flat_map(|keys| (Just(keys.clone()), Just(keys).prop_shuffle()))
    ) {
        let mut first = keys;
        let mut second = shuffled;
        sort_by_display_key(&mut first, |s| s.as_str());
        sort_by_display_key(&mut second, |s| s.as_str());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sort_keeps_load_order_for_equal_keys(keys in prop::collection::vec("[ab]{0,2}", 0..32)) {
        let mut items: Vec<(String, usize)> =
            keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect();
        sort_by_display_key(&mut items, |item| item.0.as_str());

        for pair in items.windows(2) {
            prop_assert_ne!(compare(&pair[0].0, &pair[1].0), Ordering::Greater);
            if pair[0].0 == pair[1].0 {
                prop_assert!(pair[0].1 < pair[1].1);
            }
        }
    }

    #[test]
    fn accent_and_case_never_outrank_letters(base in "[a-y]{1,4}") {
        let next: String = base
            .chars()
            .map(|c| char::from_u32(c as u32 + 1).unwrap())
            .collect();
        let upper = base.to_uppercase();
        prop_assert_eq!(compare(&upper, &next), Ordering::Less);
        prop_assert_eq!(compare(&base, &upper), Ordering::Less);
    }
}
