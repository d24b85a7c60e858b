//! Event bundle counting: shared events plus every address-specific event.

use metadist::aggregate::events::EventBundle;
use proptest::prelude::*;
use serde_json::{Map, Value};

fn event_map(size: usize) -> Map<String, Value> {
    (0..size)
        .map(|i| (format!("Event{}", i), Value::Object(Map::new())))
        .collect()
}

proptest! {
    #[test]
    fn count_is_common_plus_per_address(
        common in 0usize..16,
        per_address in prop::collection::vec(0usize..16, 0..8)
    ) {
        let bundle = EventBundle {
            common: event_map(common),
            addresses: per_address
                .iter()
                .enumerate()
                .map(|(i, size)| (format!("0x{:040x}", i), Value::Object(event_map(*size))))
                .collect(),
        };

        prop_assert_eq!(bundle.count(), common + per_address.iter().sum::<usize>());
    }
}
