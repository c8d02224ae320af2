#![allow(dead_code)]

use attrform::{
    AttributeDefinition, AttributeValue, ControlType, FieldDefinition, SelectionSet,
};

/// Minimal attribute definition; tests override what they exercise.
pub fn attribute(id: &str, name: &str, control_type: ControlType) -> AttributeDefinition {
    AttributeDefinition {
        id: id.to_string(),
        name: name.to_string(),
        control_type,
        is_required: false,
        condition: None,
        min_length: None,
        max_length: None,
        max_file_size_kb: None,
        allowed_file_extensions: Vec::new(),
        default_value: None,
        values: Vec::new(),
    }
}

pub fn value(id: &str, name: &str) -> AttributeValue {
    AttributeValue {
        id: id.to_string(),
        name: name.to_string(),
        is_pre_selected: false,
    }
}

pub fn pre_selected(id: &str, name: &str) -> AttributeValue {
    AttributeValue {
        is_pre_selected: true,
        ..value(id, name)
    }
}

/// Minimal free-text field definition.
pub fn text_field(name: &str, system_name: &str) -> FieldDefinition {
    FieldDefinition {
        name: name.to_string(),
        system_name: system_name.to_string(),
        control_type: ControlType::TextBox,
        is_required: false,
        regex: None,
        min_length: None,
        max_length: None,
    }
}

/// Encode a condition: `target_id` must have exactly `values` selected.
pub fn condition_blob(target_id: &str, values: &[&str]) -> String {
    let mut selection = SelectionSet::new();
    for v in values {
        selection.add_value(target_id, *v);
    }
    attrform::serialize(&selection).expect("condition blob serializes")
}

/// A selection built from (attribute id, values) pairs.
pub fn selection(entries: &[(&str, &[&str])]) -> SelectionSet {
    let mut selection = SelectionSet::new();
    for (id, values) in entries {
        for v in *values {
            selection.add_value(id, *v);
        }
    }
    selection
}
