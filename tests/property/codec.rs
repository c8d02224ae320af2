use attrform::{SelectionSet, parse, serialize};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

/// Selections over id-safe attribute names and printable ASCII values.
/// Values are never empty; the codec normalizes empties away by contract.
fn selection_strategy() -> impl Strategy<Value = SelectionSet> {
    btree_map(
        "[A-Za-z][A-Za-z0-9_-]{0,11}",
        vec("[ -~]{1,16}", 1..4),
        0..5,
    )
    .prop_map(|entries| {
        let mut selection = SelectionSet::new();
        for (id, values) in entries {
            for value in values {
                selection.add_value(&id, value);
            }
        }
        selection
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Stored blobs must decode back to exactly what was captured,
    // including markup characters and interior/edge whitespace.
    #[test]
    fn encode_decode_round_trips(selection in selection_strategy()) {
        let encoded = serialize(&selection).unwrap();
        let decoded = parse(&encoded).unwrap();
        prop_assert_eq!(decoded, selection);
    }

    // Same selection, same bytes: storage comparisons rely on it.
    #[test]
    fn encoding_is_deterministic(selection in selection_strategy()) {
        let first = serialize(&selection).unwrap();
        let second = serialize(&selection).unwrap();
        prop_assert_eq!(first, second);
    }

    // Arbitrary garbage must never panic the decoder.
    #[test]
    fn decoding_never_panics(raw in "[ -~]{0,64}") {
        let _ = parse(&raw);
    }
}
