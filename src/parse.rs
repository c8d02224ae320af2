//! Selection decoding: the persisted blob format and raw submitted form
//! fields both enter the engine here. The core never touches encoded
//! strings anywhere else.

use crate::enums::ControlType;
use crate::error::{ParseError, ParseErrorKind};
use crate::types::{AttributeDefinition, FormData, FormDefinition, SelectionSet};
use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::Event;
use uuid::Uuid;

/// Element names of the persisted blob grammar. The storefront has years of
/// encoded values on disk in this shape; both directions of the codec must
/// stay byte-compatible with them.
pub(crate) const ROOT_ELEMENT: &str = "Attributes";
pub(crate) const ATTRIBUTE_ELEMENT: &str = "ContactAttribute";
pub(crate) const VALUE_WRAPPER_ELEMENT: &str = "ContactAttributeValue";
pub(crate) const VALUE_ELEMENT: &str = "Value";

/// The form-data key carrying an attribute's submitted value(s).
pub fn form_key(attribute_id: &str) -> String {
    format!("attribute_{}", attribute_id)
}

/// Decode a selection blob.
///
/// Empty or whitespace-only input is the empty selection. Attribute entries
/// that carry no values are normalized away, as are empty value strings;
/// repeated entries for the same attribute id are merged in document order.
pub fn parse(raw: &str) -> Result<SelectionSet, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(SelectionSet::new());
    }

    // No text trimming: whitespace inside <Value> is customer data. Text
    // between elements never lands anywhere because only <Value> content
    // accumulates.
    let mut reader = Reader::from_str(trimmed);

    let mut selection = SelectionSet::new();
    let mut current_id: Option<String> = None;
    let mut in_value = false;
    let mut value_buf = String::new();
    let mut depth: u32 = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"Attributes" => depth += 1,
                b"ContactAttribute" => {
                    current_id = Some(read_id_attribute(&e)?);
                    depth += 1;
                }
                b"ContactAttributeValue" => {
                    if current_id.is_none() {
                        return Err(stray_element(VALUE_WRAPPER_ELEMENT));
                    }
                    depth += 1;
                }
                b"Value" => {
                    if current_id.is_none() {
                        return Err(stray_element(VALUE_ELEMENT));
                    }
                    in_value = true;
                    value_buf.clear();
                    depth += 1;
                }
                other => return Err(unexpected_element(other)),
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                // Self-closing elements contribute nothing: an attribute
                // with no values is normalized away, an empty <Value/> is
                // an empty string and dropped.
                b"Attributes" | b"ContactAttributeValue" | b"Value" => {}
                b"ContactAttribute" => {
                    read_id_attribute(&e)?;
                }
                other => return Err(unexpected_element(other)),
            },
            Ok(Event::Text(t)) => {
                if in_value {
                    let text = t.unescape().map_err(syntax_error)?;
                    value_buf.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if in_value {
                    let bytes = t.into_inner();
                    let text = std::str::from_utf8(&bytes).map_err(syntax_error)?;
                    value_buf.push_str(text);
                }
            }
            Ok(Event::End(e)) => {
                match e.name().as_ref() {
                    b"Value" => {
                        in_value = false;
                        if let Some(id) = &current_id {
                            selection.add_value(id, value_buf.as_str());
                        }
                        value_buf.clear();
                    }
                    b"ContactAttribute" => current_id = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => {
                // The reader itself does not insist on balanced elements.
                if depth != 0 {
                    return Err(ParseError {
                        kind: ParseErrorKind::Syntax,
                        message: "unexpected end of selection blob".to_string(),
                    });
                }
                break;
            }
            // Declarations, comments, and processing instructions carry no
            // selection data.
            Ok(_) => {}
            Err(e) => return Err(syntax_error(e)),
        }
    }

    Ok(selection)
}

fn read_id_attribute(e: &quick_xml::events::BytesStart<'_>) -> Result<String, ParseError> {
    for attr in e.attributes() {
        let attr = attr.map_err(syntax_error)?;
        if attr.key.as_ref() == b"ID" {
            let value = attr.unescape_value().map_err(syntax_error)?;
            if value.is_empty() {
                break;
            }
            return Ok(value.into_owned());
        }
    }
    Err(ParseError {
        kind: ParseErrorKind::Syntax,
        message: format!("{} element without an ID attribute", ATTRIBUTE_ELEMENT),
    })
}

fn syntax_error(e: impl std::fmt::Display) -> ParseError {
    ParseError {
        kind: ParseErrorKind::Syntax,
        message: e.to_string(),
    }
}

fn unexpected_element(name: &[u8]) -> ParseError {
    ParseError {
        kind: ParseErrorKind::UnexpectedElement,
        message: format!(
            "unexpected element: '{}'",
            String::from_utf8_lossy(name)
        ),
    }
}

fn stray_element(name: &str) -> ParseError {
    ParseError {
        kind: ParseErrorKind::UnexpectedElement,
        message: format!("{} element outside {}", name, ATTRIBUTE_ELEMENT),
    }
}

// ─── Catalog documents ──────────────────────────────────────────────────────

/// Load attribute definitions from a catalog JSON document (an array of
/// definitions, as the catalog service serves them).
pub fn parse_catalog(input: &str) -> Result<Vec<AttributeDefinition>, ParseError> {
    serde_json::from_str(input).map_err(|e| ParseError {
        kind: classify_json_error(&e.to_string()),
        message: e.to_string(),
    })
}

/// Load an interactive form definition from a catalog JSON document.
pub fn parse_form_definition(input: &str) -> Result<FormDefinition, ParseError> {
    serde_json::from_str(input).map_err(|e| ParseError {
        kind: classify_json_error(&e.to_string()),
        message: e.to_string(),
    })
}

fn classify_json_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown variant") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("missing field") || lower.contains("invalid type") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}

// ─── Submitted form fields → SelectionSet ───────────────────────────────────

/// Rebuild a [`SelectionSet`] from raw submitted form fields.
///
/// Each attribute reads its own key (`attribute_{id}`), interpreted by
/// control type: single-select controls post one value id, checkbox
/// controls post a comma-separated id list, readonly checkboxes ignore the
/// post and take the catalog's pre-selected values, free-text controls post
/// the text itself, the datepicker posts `_day`/`_month`/`_year` parts, and
/// file uploads post the download id of an already-stored upload.
pub fn parse_form(attributes: &[AttributeDefinition], form: &FormData) -> SelectionSet {
    let mut selection = SelectionSet::new();

    for attribute in attributes {
        let key = form_key(&attribute.id);
        match attribute.control_type {
            ControlType::DropdownList
            | ControlType::RadioList
            | ControlType::ColorSquares
            | ControlType::ImageSquares => {
                let value = form.value(&key).trim();
                if !value.is_empty() {
                    selection.add_value(&attribute.id, value);
                }
            }
            ControlType::Checkboxes => {
                for part in form.value(&key).split(',') {
                    let part = part.trim();
                    if !part.is_empty() {
                        selection.add_value(&attribute.id, part);
                    }
                }
            }
            ControlType::ReadonlyCheckboxes => {
                // Client input is ignored; the catalog decides.
                for value in attribute.values.iter().filter(|v| v.is_pre_selected) {
                    selection.add_value(&attribute.id, value.id.as_str());
                }
            }
            ControlType::TextBox | ControlType::MultilineTextbox => {
                let text = form.value(&key).trim();
                if !text.is_empty() {
                    selection.add_value(&attribute.id, text);
                }
            }
            ControlType::Datepicker => {
                if let Some(date) = read_date_parts(form, &key) {
                    selection.add_value(&attribute.id, date.format("%Y-%m-%d").to_string());
                }
            }
            ControlType::FileUpload => {
                let raw = form.value(&key).trim();
                if let Ok(download_id) = Uuid::parse_str(raw) {
                    selection.add_value(&attribute.id, download_id.to_string());
                }
            }
        }
    }

    selection
}

/// Assemble a date from the three datepicker sub-fields. Missing or
/// impossible combinations contribute no selection.
fn read_date_parts(form: &FormData, key: &str) -> Option<NaiveDate> {
    let day: u32 = form.value(&format!("{}_day", key)).trim().parse().ok()?;
    let month: u32 = form.value(&format!("{}_month", key)).trim().parse().ok()?;
    let year: i32 = form.value(&format!("{}_year", key)).trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
