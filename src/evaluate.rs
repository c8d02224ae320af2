//! Conditional-enablement evaluation.
//!
//! An attribute may carry a condition: an encoded selection naming one other
//! attribute and the values that must currently be chosen for it. Evaluation
//! is three-valued; attributes whose condition cannot be decided are left
//! alone rather than toggled, so the UI stays stable under catalog drift.

use crate::enums::ConditionOutcome;
use crate::parse;
use crate::types::{AttributeDefinition, EnablementResult, SelectionSet};

/// Classify every conditional attribute against the current selection.
///
/// Attributes without a condition appear in neither output set. For the
/// rest: met → `enabled`, unmet → `disabled`, indeterminate → omitted.
/// Pure function over its inputs; iterates in catalog order.
pub fn evaluate_conditions(
    attributes: &[AttributeDefinition],
    selection: &SelectionSet,
) -> EnablementResult {
    let mut result = EnablementResult::default();

    for attribute in attributes {
        if attribute.condition.is_none() {
            continue;
        }
        match condition_outcome(attribute, attributes, selection) {
            ConditionOutcome::Met => {
                result.enabled.insert(attribute.id.clone());
            }
            ConditionOutcome::Unmet => {
                result.disabled.insert(attribute.id.clone());
            }
            ConditionOutcome::Indeterminate => {}
        }
    }

    result
}

/// Evaluate one attribute's condition against the current selection.
///
/// Indeterminate when the attribute has no condition, the condition blob
/// does not parse or is empty, the referenced attribute is not in the
/// catalog (fails closed rather than raising), or the referenced attribute
/// has no current selection. Met requires the selection to equal the
/// expected value set exactly.
pub fn condition_outcome(
    attribute: &AttributeDefinition,
    catalog: &[AttributeDefinition],
    selection: &SelectionSet,
) -> ConditionOutcome {
    let Some(raw) = &attribute.condition else {
        return ConditionOutcome::Indeterminate;
    };
    let Ok(condition) = parse::parse(raw) else {
        return ConditionOutcome::Indeterminate;
    };
    let Some(target) = condition.entries().first() else {
        return ConditionOutcome::Indeterminate;
    };
    if !catalog.iter().any(|a| a.id == target.attribute_id) {
        return ConditionOutcome::Indeterminate;
    }

    let selected = selection.values_for(&target.attribute_id);
    if selected.is_empty() {
        return ConditionOutcome::Indeterminate;
    }

    let expected = &target.values;
    let met = selected.len() == expected.len()
        && expected.iter().all(|value| selected.contains(value));
    if met {
        ConditionOutcome::Met
    } else {
        ConditionOutcome::Unmet
    }
}

/// Drop selected values of attributes whose condition is currently unmet.
///
/// A disabled attribute's stale values must not reach validation, storage,
/// or the notification summary. Only a definite unmet prunes; indeterminate
/// attributes keep their values.
pub fn prune_unmet(
    attributes: &[AttributeDefinition],
    selection: &SelectionSet,
) -> SelectionSet {
    let mut pruned = selection.clone();
    for attribute in attributes {
        if attribute.condition.is_some()
            && condition_outcome(attribute, attributes, selection) == ConditionOutcome::Unmet
        {
            pruned.remove(&attribute.id);
        }
    }
    pruned
}
