//! Closed enumerations used throughout the attribute type system.
//!
//! Control types are "closed": only the defined variants are valid, and the
//! parser and validator match on them exhaustively, so adding a widget kind
//! is a compile-time-checked change.

use serde::{Deserialize, Serialize};

/// The UI widget kind of an attribute or form field. Governs how submitted
/// form data is read and which validation rules apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlType {
    DropdownList,
    RadioList,
    Checkboxes,
    ReadonlyCheckboxes,
    TextBox,
    MultilineTextbox,
    Datepicker,
    FileUpload,
    ColorSquares,
    ImageSquares,
}

impl ControlType {
    /// Whether selections for this control are ids of predefined
    /// [`AttributeValue`](crate::types::AttributeValue) entries rather than
    /// free-form text.
    pub fn has_predefined_values(&self) -> bool {
        match self {
            ControlType::DropdownList
            | ControlType::RadioList
            | ControlType::Checkboxes
            | ControlType::ReadonlyCheckboxes
            | ControlType::ColorSquares
            | ControlType::ImageSquares => true,
            ControlType::TextBox
            | ControlType::MultilineTextbox
            | ControlType::Datepicker
            | ControlType::FileUpload => false,
        }
    }

    /// Whether the control accepts free-form text. Only these controls are
    /// subject to min/max length validation.
    pub fn is_free_text(&self) -> bool {
        matches!(self, ControlType::TextBox | ControlType::MultilineTextbox)
    }

    /// Whether submissions for this control arrive as stored uploads.
    pub fn is_file_upload(&self) -> bool {
        matches!(self, ControlType::FileUpload)
    }

    /// Whether the control can select more than one value at once.
    pub fn is_multi_select(&self) -> bool {
        matches!(
            self,
            ControlType::Checkboxes | ControlType::ReadonlyCheckboxes
        )
    }
}

/// Per-attribute result of evaluating an enablement condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOutcome {
    /// The depended-on attribute currently has exactly the expected values.
    Met,
    /// The depended-on attribute has a selection, but not the expected one.
    Unmet,
    /// No basis to decide: the attribute has no condition, the condition
    /// does not parse, it references an unknown attribute, or the target
    /// has no selection yet.
    Indeterminate,
}

/// Delivery priority of a queued notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    Low,
    High,
}
