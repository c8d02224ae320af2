use crate::helpers::{attribute, condition_blob};
use attrform::evaluate::evaluate_conditions;
use attrform::{ControlType, SelectionSet};
use proptest::collection::btree_map;
use proptest::collection::vec;
use proptest::prelude::*;

fn arbitrary_selection() -> impl Strategy<Value = SelectionSet> {
    btree_map("[a-e]", vec("[a-z]{1,6}", 1..3), 0..5).prop_map(|entries| {
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

    // Attributes without a condition never toggle, whatever is selected.
    #[test]
    fn unconditioned_attributes_never_toggle(selection in arbitrary_selection()) {
        let attributes = vec![
            attribute("a", "A", ControlType::RadioList),
            attribute("b", "B", ControlType::TextBox),
            attribute("c", "C", ControlType::Checkboxes),
        ];

        let result = evaluate_conditions(&attributes, &selection);
        prop_assert!(result.enabled.is_empty());
        prop_assert!(result.disabled.is_empty());
    }

    // A conditional attribute lands in at most one of the two sets, and
    // only conditional attribute ids ever appear.
    #[test]
    fn output_sets_are_disjoint_and_scoped(selection in arbitrary_selection()) {
        let mut dependent = attribute("b", "B", ControlType::TextBox);
        dependent.condition = Some(condition_blob("a", &["yes"]));
        let attributes = vec![attribute("a", "A", ControlType::RadioList), dependent];

        let result = evaluate_conditions(&attributes, &selection);
        prop_assert!(result.enabled.is_disjoint(&result.disabled));
        for id in result.enabled.iter().chain(result.disabled.iter()) {
            prop_assert_eq!(id, "b");
        }
    }

    // With no selection for the depended-on attribute the outcome is
    // always indeterminate.
    #[test]
    fn no_target_selection_means_no_toggle(values in vec("[a-z]{1,6}", 1..3)) {
        let mut dependent = attribute("b", "B", ControlType::TextBox);
        dependent.condition = Some(condition_blob("a", &["yes"]));
        let attributes = vec![attribute("a", "A", ControlType::RadioList), dependent];

        // Selection only for the dependent attribute itself.
        let mut selection = SelectionSet::new();
        for value in values {
            selection.add_value("b", value);
        }

        let result = evaluate_conditions(&attributes, &selection);
        prop_assert!(result.enabled.is_empty());
        prop_assert!(result.disabled.is_empty());
    }
}
