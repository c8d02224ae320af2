mod helpers;

use attrform::format::{format_fields, format_selection};
use attrform::{capture, evaluate_conditions, ControlType, FormData};
use helpers::{attribute, condition_blob, selection, text_field, value};
use serde_json::json;

// ─── Crate-level capture entry point ────────────────────────────────────────

#[test]
fn capture_composes_the_whole_contact_form_path() {
    let mut topic = attribute("a1", "Topic", ControlType::DropdownList);
    topic.is_required = true;
    topic.values = vec![value("v1", "Sales"), value("v2", "Support")];
    let phone = attribute("a2", "Phone", ControlType::TextBox);
    let attributes = vec![topic, phone];

    let form = FormData::from_pairs([("attribute_a1", "v2"), ("attribute_a2", "555-0100")]);
    let result = capture(&attributes, &form).unwrap();

    assert!(result.warnings.is_valid());
    assert_eq!(result.summary, "Topic: Support\nPhone: 555-0100");
    assert_eq!(attrform::parse(&result.encoded).unwrap(), result.selection);
}

#[test]
fn capture_reports_missing_required_attributes() {
    let mut topic = attribute("a1", "Topic", ControlType::DropdownList);
    topic.is_required = true;
    topic.values = vec![value("v1", "Sales")];

    let result = capture(&[topic], &FormData::new()).unwrap();
    assert_eq!(result.warnings.messages(), ["Topic: required"]);
    assert_eq!(result.encoded, "");
}

// ─── Re-screening stored blobs ──────────────────────────────────────────────

#[test]
fn stored_blobs_revalidate_against_the_current_catalog() {
    let mut topic = attribute("a1", "Topic", ControlType::DropdownList);
    topic.values = vec![value("v1", "Sales")];
    let attributes = vec![topic.clone()];

    let form = FormData::from_pairs([("attribute_a1", "v1")]);
    let stored = capture(&attributes, &form).unwrap().encoded;

    // Unchanged catalog: still clean.
    assert!(attrform::revalidate(&attributes, &stored).unwrap().is_valid());

    // The catalog has since grown a required attribute the stored
    // selection cannot know about.
    let mut phone = attribute("a2", "Phone", ControlType::TextBox);
    phone.is_required = true;
    let grown = vec![topic, phone];
    let result = attrform::revalidate(&grown, &stored).unwrap();
    assert_eq!(result.messages(), ["Phone: required"]);
}

#[test]
fn corrupt_stored_blobs_surface_a_parse_error() {
    let attributes = vec![attribute("a1", "Topic", ControlType::DropdownList)];

    let err = attrform::revalidate(&attributes, "<Attributes><Broken").unwrap_err();
    assert!(matches!(err, attrform::EngineError::Parse(_)));
}

// ─── Summaries ──────────────────────────────────────────────────────────────

#[test]
fn field_summary_lists_every_field_in_catalog_order() {
    let fields = vec![text_field("Name", "name"), text_field("Email", "email")];
    let submitted = FormData::from_pairs([("email", "a@b.com")]);

    // Fields the customer left empty still get their line.
    assert_eq!(format_fields(&fields, &submitted), "Name: \nEmail: a@b.com");
}

#[test]
fn selection_summary_resolves_value_ids_to_names() {
    let mut interests = attribute("a1", "Interests", ControlType::Checkboxes);
    interests.values = vec![value("v1", "News"), value("v2", "Offers")];
    let attributes = vec![interests];

    let summary = format_selection(&attributes, &selection(&[("a1", &["v1", "v2"])]));
    assert_eq!(summary, "Interests: News\nInterests: Offers");
}

#[test]
fn selection_summary_skips_value_ids_the_catalog_dropped() {
    let mut interests = attribute("a1", "Interests", ControlType::Checkboxes);
    interests.values = vec![value("v1", "News")];
    let attributes = vec![interests];

    let summary = format_selection(&attributes, &selection(&[("a1", &["v1", "gone"])]));
    assert_eq!(summary, "Interests: News");
}

#[test]
fn selection_summary_prints_text_values_verbatim() {
    let attributes = vec![attribute("a1", "Notes", ControlType::MultilineTextbox)];
    let summary = format_selection(&attributes, &selection(&[("a1", &["ring twice"])]));
    assert_eq!(summary, "Notes: ring twice");
}

// ─── Wire shapes ────────────────────────────────────────────────────────────

#[test]
fn enablement_result_serializes_as_two_id_arrays() {
    let mut wrap_message = attribute("b", "Wrap message", ControlType::TextBox);
    wrap_message.condition = Some(condition_blob("a", &["yes"]));
    let attributes = vec![attribute("a", "Gift wrap", ControlType::RadioList), wrap_message];

    let result = evaluate_conditions(&attributes, &selection(&[("a", &["yes"])]));
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "enabled": ["b"], "disabled": [] })
    );
}

#[test]
fn attribute_catalogs_load_from_json() {
    let raw = r#"[{
        "id": "a1",
        "name": "Gift wrap",
        "control_type": "dropdown_list",
        "is_required": true,
        "values": [
            { "id": "v1", "name": "Yes", "is_pre_selected": true },
            { "id": "v2", "name": "No" }
        ]
    }]"#;

    let catalog = attrform::parse_catalog(raw).unwrap();
    assert_eq!(catalog.len(), 1);
    let definition = &catalog[0];
    assert_eq!(definition.control_type, ControlType::DropdownList);
    assert!(definition.is_required);
    assert!(definition.values[0].is_pre_selected);
    assert!(!definition.values[1].is_pre_selected);
    assert!(definition.condition.is_none());
}

#[test]
fn unknown_control_types_are_rejected_at_load() {
    let raw = r#"[{ "id": "a1", "name": "X", "control_type": "hologram" }]"#;

    let err = attrform::parse_catalog(raw).unwrap_err();
    assert_eq!(err.kind, attrform::error::ParseErrorKind::UnknownVariant);
}

#[test]
fn form_definitions_load_from_json() {
    let raw = r#"{
        "id": "f1",
        "name": "Newsletter",
        "fields": [{
            "name": "Email",
            "system_name": "email",
            "control_type": "text_box",
            "is_required": true,
            "regex": "^.+@.+$"
        }]
    }"#;

    let form = attrform::parse_form_definition(raw).unwrap();
    assert_eq!(form.name, "Newsletter");
    assert!(form.notification_account_id.is_none());
    assert_eq!(form.fields[0].system_name, "email");
}
