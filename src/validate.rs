//! Submission validation and catalog auditing.
//!
//! Validation returns **all** errors, not just the first, in the order the
//! checks ran. It never modifies its inputs and never aborts a request;
//! callers surface the error list to the customer.

use crate::enums::ConditionOutcome;
use crate::error::*;
use crate::evaluate::condition_outcome;
use crate::parse;
use crate::types::{AttributeDefinition, FieldDefinition, FormData, SelectionSet};
use regex::Regex;

// ─── Localization boundary ──────────────────────────────────────────────────

/// Maps an error kind plus its parameters to a customer-facing string.
///
/// The engine decides *which* facts appear in a message (field name,
/// violated rule, limit value); a localization store decides the wording.
/// [`EnglishMessages`] is the shipped default.
pub trait MessageCatalog {
    fn validation_message(
        &self,
        kind: ValidationErrorKind,
        field: &str,
        limit: Option<u32>,
    ) -> String;

    fn upload_message(&self, kind: UploadErrorKind, limit_kb: Option<u64>) -> String;

    fn enquiry_subject(&self, form_name: &str) -> String;
}

/// Default English renderer.
pub struct EnglishMessages;

impl MessageCatalog for EnglishMessages {
    fn validation_message(
        &self,
        kind: ValidationErrorKind,
        field: &str,
        limit: Option<u32>,
    ) -> String {
        match kind {
            ValidationErrorKind::InvalidFormat => format!("{}: invalid format", field),
            ValidationErrorKind::Required => format!("{}: required", field),
            ValidationErrorKind::TooShort => format!(
                "{}: must be at least {} characters",
                field,
                limit.unwrap_or(0)
            ),
            ValidationErrorKind::TooLong => format!(
                "{}: must be at most {} characters",
                field,
                limit.unwrap_or(0)
            ),
        }
    }

    fn upload_message(&self, kind: UploadErrorKind, limit_kb: Option<u64>) -> String {
        match kind {
            UploadErrorKind::WrongControlType => {
                "this attribute does not accept file uploads".to_string()
            }
            UploadErrorKind::NoFile => "no file uploaded".to_string(),
            UploadErrorKind::TooLarge => format!(
                "the maximum allowed file size is {} KB",
                limit_kb.unwrap_or(0)
            ),
            UploadErrorKind::ExtensionNotAllowed => {
                "files of this type are not allowed".to_string()
            }
        }
    }

    fn enquiry_subject(&self, form_name: &str) -> String {
        format!("Enquiry from form {}", form_name)
    }
}

// ─── Dynamic form validation ────────────────────────────────────────────────

/// Validate submitted values against a form's field definitions, rendering
/// messages with the default English catalog.
pub fn validate_fields(fields: &[FieldDefinition], submitted: &FormData) -> ValidationResult {
    validate_fields_with(fields, submitted, &EnglishMessages)
}

/// Validate submitted values against a form's field definitions.
///
/// For each field, in catalog order, the applicable checks run in a fixed
/// sequence (regex, required, min length, max length) and every failure
/// accumulates; a field can produce several errors. An absent field is an
/// empty string for every rule; the regex check only judges non-empty
/// values. Length rules apply only to free-text controls and count
/// characters, not bytes.
///
/// A catalog regex that does not compile is skipped here; the audit reports
/// it (A/F rules) so the catalog owner finds out.
pub fn validate_fields_with(
    fields: &[FieldDefinition],
    submitted: &FormData,
    messages: &dyn MessageCatalog,
) -> ValidationResult {
    let mut errors = Vec::new();

    for field in fields {
        let value = submitted.value(&field.system_name);

        // Pattern checks judge what the customer typed; absence is the
        // required rule's concern.
        if let Some(pattern) = &field.regex
            && !value.is_empty()
            && let Ok(re) = Regex::new(pattern)
            && !re.is_match(value)
        {
            errors.push(error(
                messages,
                ValidationErrorKind::InvalidFormat,
                &field.name,
                None,
            ));
        }

        if field.is_required && value.is_empty() {
            errors.push(error(
                messages,
                ValidationErrorKind::Required,
                &field.name,
                None,
            ));
        }

        if field.control_type.is_free_text() {
            let length = value.chars().count() as u32;
            if let Some(min) = field.min_length
                && length < min
            {
                errors.push(error(
                    messages,
                    ValidationErrorKind::TooShort,
                    &field.name,
                    Some(min),
                ));
            }
            if let Some(max) = field.max_length
                && length > max
            {
                errors.push(error(
                    messages,
                    ValidationErrorKind::TooLong,
                    &field.name,
                    Some(max),
                ));
            }
        }
    }

    ValidationResult { errors }
}

fn error(
    messages: &dyn MessageCatalog,
    kind: ValidationErrorKind,
    field: &str,
    limit: Option<u32>,
) -> ValidationError {
    ValidationError {
        kind,
        field: field.to_string(),
        limit,
        message: messages.validation_message(kind, field, limit),
    }
}

// ─── Attribute screening ────────────────────────────────────────────────────

/// Required-attribute screening for a captured selection, with the default
/// English catalog.
pub fn attribute_warnings(
    attributes: &[AttributeDefinition],
    selection: &SelectionSet,
) -> ValidationResult {
    attribute_warnings_with(attributes, selection, &EnglishMessages)
}

/// Check that every required attribute has a selection.
///
/// An attribute whose enablement condition is definitely unmet is exempt;
/// the customer never saw it. Indeterminate conditions do not lift the
/// requirement.
pub fn attribute_warnings_with(
    attributes: &[AttributeDefinition],
    selection: &SelectionSet,
    messages: &dyn MessageCatalog,
) -> ValidationResult {
    let mut errors = Vec::new();

    for attribute in attributes {
        if !attribute.is_required {
            continue;
        }
        if condition_outcome(attribute, attributes, selection) == ConditionOutcome::Unmet {
            continue;
        }
        if selection.values_for(&attribute.id).is_empty() {
            errors.push(error(
                messages,
                ValidationErrorKind::Required,
                &attribute.name,
                None,
            ));
        }
    }

    ValidationResult { errors }
}

// ─── Catalog audit (A-001..A-008, F-001..F-004) ─────────────────────────────

/// Audit attribute definitions for catalog defects.
///
/// Advisory only: runtime evaluation silently skips what it cannot decide
/// (a malformed condition never blocks a customer), so this is the channel
/// through which a catalog owner learns about it. Returns all findings.
pub fn audit_attributes(attributes: &[AttributeDefinition]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    a001_duplicate_ids(attributes, &mut diagnostics);
    a002_a005_conditions(attributes, &mut diagnostics);
    a006_length_bounds(attributes, &mut diagnostics);
    a007_values_present(attributes, &mut diagnostics);
    a008_default_value_known(attributes, &mut diagnostics);

    diagnostics
}

/// Audit form field definitions for catalog defects.
pub fn audit_fields(fields: &[FieldDefinition]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    f001_duplicate_system_names(fields, &mut diagnostics);
    f002_regex_compiles(fields, &mut diagnostics);
    f003_length_bounds(fields, &mut diagnostics);
    f004_length_on_non_text(fields, &mut diagnostics);

    diagnostics
}

fn push_error(diagnostics: &mut Vec<Diagnostic>, code: &str, path: String, message: String) {
    diagnostics.push(Diagnostic {
        severity: DiagnosticSeverity::Error,
        code: code.to_string(),
        path: Some(path),
        message,
    });
}

fn push_warning(diagnostics: &mut Vec<Diagnostic>, code: &str, path: String, message: String) {
    diagnostics.push(Diagnostic {
        severity: DiagnosticSeverity::Warning,
        code: code.to_string(),
        path: Some(path),
        message,
    });
}

fn a001_duplicate_ids(attributes: &[AttributeDefinition], diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = std::collections::HashSet::new();
    for (i, attribute) in attributes.iter().enumerate() {
        if !seen.insert(attribute.id.clone()) {
            push_error(
                diagnostics,
                "A-001",
                format!("attributes[{}].id", i),
                format!("duplicate attribute id: {}", attribute.id),
            );
        }
    }
}

fn a002_a005_conditions(attributes: &[AttributeDefinition], diagnostics: &mut Vec<Diagnostic>) {
    for (i, attribute) in attributes.iter().enumerate() {
        let Some(raw) = &attribute.condition else {
            continue;
        };
        let path = format!("attributes[{}].condition", i);

        let condition = match parse::parse(raw) {
            Ok(c) => c,
            Err(e) => {
                push_error(
                    diagnostics,
                    "A-002",
                    path,
                    format!("condition does not parse: {}", e),
                );
                continue;
            }
        };
        let Some(target) = condition.entries().first() else {
            push_error(
                diagnostics,
                "A-002",
                path,
                "condition names no attribute".to_string(),
            );
            continue;
        };

        if target.attribute_id == attribute.id {
            push_error(
                diagnostics,
                "A-004",
                path,
                format!("attribute '{}' depends on itself", attribute.id),
            );
            continue;
        }

        let Some(depend_on) = attributes.iter().find(|a| a.id == target.attribute_id) else {
            push_error(
                diagnostics,
                "A-003",
                path,
                format!(
                    "condition references unknown attribute id: {}",
                    target.attribute_id
                ),
            );
            continue;
        };

        if depend_on.control_type.has_predefined_values() {
            for value in &target.values {
                if depend_on.value_by_id(value).is_none() {
                    push_error(
                        diagnostics,
                        "A-005",
                        path.clone(),
                        format!(
                            "condition expects value id '{}' which attribute '{}' does not define",
                            value, depend_on.id
                        ),
                    );
                }
            }
        }
    }
}

fn a006_length_bounds(attributes: &[AttributeDefinition], diagnostics: &mut Vec<Diagnostic>) {
    for (i, attribute) in attributes.iter().enumerate() {
        if let (Some(min), Some(max)) = (attribute.min_length, attribute.max_length)
            && min > max
        {
            push_error(
                diagnostics,
                "A-006",
                format!("attributes[{}]", i),
                format!("min length {} exceeds max length {}", min, max),
            );
        }
    }
}

fn a007_values_present(attributes: &[AttributeDefinition], diagnostics: &mut Vec<Diagnostic>) {
    for (i, attribute) in attributes.iter().enumerate() {
        if attribute.control_type.has_predefined_values() && attribute.values.is_empty() {
            push_warning(
                diagnostics,
                "A-007",
                format!("attributes[{}].values", i),
                format!(
                    "attribute '{}' needs predefined values but defines none",
                    attribute.id
                ),
            );
        }
    }
}

fn a008_default_value_known(
    attributes: &[AttributeDefinition],
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (i, attribute) in attributes.iter().enumerate() {
        if let Some(default) = &attribute.default_value
            && attribute.control_type.has_predefined_values()
            && attribute.value_by_id(default).is_none()
        {
            push_warning(
                diagnostics,
                "A-008",
                format!("attributes[{}].default_value", i),
                format!(
                    "default value '{}' is not a defined value id of attribute '{}'",
                    default, attribute.id
                ),
            );
        }
    }
}

fn f001_duplicate_system_names(fields: &[FieldDefinition], diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = std::collections::HashSet::new();
    for (i, field) in fields.iter().enumerate() {
        if !seen.insert(field.system_name.clone()) {
            push_error(
                diagnostics,
                "F-001",
                format!("fields[{}].system_name", i),
                format!("duplicate field system name: {}", field.system_name),
            );
        }
    }
}

fn f002_regex_compiles(fields: &[FieldDefinition], diagnostics: &mut Vec<Diagnostic>) {
    for (i, field) in fields.iter().enumerate() {
        if let Some(pattern) = &field.regex
            && let Err(e) = Regex::new(pattern)
        {
            push_error(
                diagnostics,
                "F-002",
                format!("fields[{}].regex", i),
                format!("invalid regex: {}", e),
            );
        }
    }
}

fn f003_length_bounds(fields: &[FieldDefinition], diagnostics: &mut Vec<Diagnostic>) {
    for (i, field) in fields.iter().enumerate() {
        if let (Some(min), Some(max)) = (field.min_length, field.max_length)
            && min > max
        {
            push_error(
                diagnostics,
                "F-003",
                format!("fields[{}]", i),
                format!("min length {} exceeds max length {}", min, max),
            );
        }
    }
}

fn f004_length_on_non_text(fields: &[FieldDefinition], diagnostics: &mut Vec<Diagnostic>) {
    for (i, field) in fields.iter().enumerate() {
        if !field.control_type.is_free_text()
            && (field.min_length.is_some() || field.max_length.is_some())
        {
            push_warning(
                diagnostics,
                "F-004",
                format!("fields[{}]", i),
                format!(
                    "length limits on field '{}' have no effect for its control type",
                    field.system_name
                ),
            );
        }
    }
}
