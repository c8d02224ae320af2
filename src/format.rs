//! Plain-text summaries of validated submissions, composed for downstream
//! notification bodies. One line per field or selected value, catalog order.

use crate::types::{AttributeDefinition, FieldDefinition, FormData, SelectionSet};

/// Summarize an interactive form submission: `Name: value` per field, in
/// catalog order, including fields the customer left empty.
pub fn format_fields(fields: &[FieldDefinition], submitted: &FormData) -> String {
    fields
        .iter()
        .map(|field| format!("{}: {}", field.name, submitted.value(&field.system_name)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summarize a captured attribute selection.
///
/// Value-bearing controls resolve value ids to their display names; ids the
/// catalog no longer defines are skipped. Text controls print the text as
/// entered, file uploads the download id.
pub fn format_selection(attributes: &[AttributeDefinition], selection: &SelectionSet) -> String {
    let mut lines = Vec::new();

    for attribute in attributes {
        for value in selection.values_for(&attribute.id) {
            if attribute.control_type.has_predefined_values() {
                if let Some(defined) = attribute.value_by_id(value) {
                    lines.push(format!("{}: {}", attribute.name, defined.name));
                }
            } else {
                lines.push(format!("{}: {}", attribute.name, value));
            }
        }
    }

    lines.join("\n")
}
