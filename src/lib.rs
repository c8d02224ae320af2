//! Attribute condition evaluation, dynamic form validation, and upload
//! screening for storefront customer forms.
//!
//! A storefront defines *attributes* (customer-fillable fields with
//! optional validation rules and optional conditional enablement) and
//! *interactive forms* (field lists with a required flag, regex, and length
//! rules). This crate is the engine behind both: pure functions over
//! catalog metadata and submitted values.
//!
//! ```text
//! parse_form(catalog, form) → SelectionSet → evaluate_conditions → EnablementResult
//!                                          → attribute_warnings  → ValidationResult
//!          parse(blob) ⇄ serialize(selection)        (storage codec boundary)
//!
//! validate_fields(fields, form) → ValidationResult
//! check_upload(attribute, file) → AcceptedFile | UploadError
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use attrform::{ControlType, FieldDefinition, FormData};
//!
//! let fields = vec![FieldDefinition {
//!     name: "Email".to_string(),
//!     system_name: "email".to_string(),
//!     control_type: ControlType::TextBox,
//!     is_required: true,
//!     regex: Some("^.+@.+$".to_string()),
//!     min_length: None,
//!     max_length: None,
//! }];
//!
//! let submitted = FormData::from_pairs([("email", "a@b.com")]);
//! let result = attrform::validate_fields(&fields, &submitted);
//! assert!(result.is_valid());
//! ```
//!
//! Everything here runs once per inbound request over read-only catalog
//! snapshots; there is no shared state, caching, or I/O in the core. The
//! [`pipeline`] module wires the pure functions to a hosting environment
//! through injected collaborator traits.

pub mod enums;
pub mod error;
pub mod evaluate;
pub mod format;
pub mod parse;
pub mod pipeline;
pub mod serialize;
pub mod types;
pub mod upload;
pub mod validate;

pub use enums::*;
pub use error::*;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use evaluate::{evaluate_conditions, prune_unmet};
pub use parse::{parse, parse_catalog, parse_form, parse_form_definition};
pub use serialize::serialize;
pub use upload::check_upload;
pub use validate::{attribute_warnings, validate_fields};

/// Convenience entry point for the contact-form capture path: parse the
/// submitted fields, drop values of condition-disabled attributes, screen
/// required attributes, and encode the result for storage alongside a
/// plain-text summary.
///
/// Messages render through the default English catalog; use
/// [`pipeline::FormProcessor`] to supply a localization store instead.
///
/// # Errors
///
/// Returns [`SerializeError`] if the captured selection cannot be encoded.
pub fn capture(
    attributes: &[AttributeDefinition],
    form: &FormData,
) -> Result<Capture, SerializeError> {
    let selection = parse::parse_form(attributes, form);
    let selection = evaluate::prune_unmet(attributes, &selection);
    let warnings = validate::attribute_warnings(attributes, &selection);
    let encoded = serialize::serialize(&selection)?;
    let summary = format::format_selection(attributes, &selection);

    Ok(Capture {
        selection,
        encoded,
        summary,
        warnings,
    })
}

/// Re-screen a previously stored selection blob against the current
/// catalog, e.g. before reusing a saved submission. Stored selections
/// outlive catalog edits: attributes may have become required, conditional,
/// or disappeared since the blob was written.
///
/// # Errors
///
/// Returns [`EngineError::Parse`] if the stored blob no longer decodes.
pub fn revalidate(
    attributes: &[AttributeDefinition],
    encoded: &str,
) -> Result<ValidationResult, EngineError> {
    let selection = parse::parse(encoded)?;
    let selection = evaluate::prune_unmet(attributes, &selection);
    Ok(validate::attribute_warnings(attributes, &selection))
}
