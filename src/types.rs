use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::enums::*;
use crate::error::ValidationResult;

// ─── Catalog definitions ────────────────────────────────────────────────────

/// A predefined choice of a value-bearing attribute (dropdown option,
/// checkbox entry, color square, …).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_pre_selected: bool,
}

/// A store-defined customer-fillable attribute with optional validation
/// rules and optional conditional enablement.
///
/// Immutable once loaded; owned by the external catalog and supplied to the
/// engine as a read-only snapshot per invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub id: String,
    /// Display name, used in validation messages and summaries.
    pub name: String,
    pub control_type: ControlType,
    #[serde(default)]
    pub is_required: bool,
    /// Enablement condition, encoded as a selection blob naming the
    /// depended-on attribute and the values that must be selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Upload size ceiling. Stored in kilobytes by the catalog; the guard
    /// compares in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size_kb: Option<u64>,
    /// Permitted upload extensions, lower-cased with leading dot
    /// (e.g. ".pdf"). Empty means no restriction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_file_extensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<AttributeValue>,
}

impl AttributeDefinition {
    /// Look up a predefined value by id.
    pub fn value_by_id(&self, value_id: &str) -> Option<&AttributeValue> {
        self.values.iter().find(|v| v.id == value_id)
    }
}

/// A field of an interactive marketing form: display name, submission key,
/// widget kind, and the validation rule set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    /// Key under which the value arrives in the submitted form data.
    pub system_name: String,
    pub control_type: ControlType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// An interactive form: identity, notification routing, and fields in
/// catalog order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_account_id: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

// ─── Submitted data ─────────────────────────────────────────────────────────

/// Raw submitted form data: one value per key, as delivered by the host
/// framework's form binding. Multi-select controls arrive as a single
/// comma-separated value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// The submitted value for `key`, or the empty string when absent.
    /// Absent and empty submissions are equivalent for every validation rule.
    pub fn value(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

/// The customer's current choices for a set of attributes: ordered entries
/// of attribute id → selected values. Transient, rebuilt per request, and
/// round-tripped through the blob codec for storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    entries: Vec<SelectionEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub attribute_id: String,
    pub values: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// Append a value for an attribute, creating its entry on first use.
    /// Empty values are dropped; stored selections never contain them.
    pub fn add_value(&mut self, attribute_id: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        match self
            .entries
            .iter_mut()
            .find(|e| e.attribute_id == attribute_id)
        {
            Some(entry) => entry.values.push(value),
            None => self.entries.push(SelectionEntry {
                attribute_id: attribute_id.to_string(),
                values: vec![value],
            }),
        }
    }

    /// The selected values for an attribute; empty when none.
    pub fn values_for(&self, attribute_id: &str) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.attribute_id == attribute_id)
            .map(|e| e.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn remove(&mut self, attribute_id: &str) {
        self.entries.retain(|e| e.attribute_id != attribute_id);
    }
}

// ─── Results ────────────────────────────────────────────────────────────────

/// Which conditionally-enabled attributes are currently on or off.
///
/// Attributes with no condition appear in neither set; their enablement is
/// not dynamic. Attributes whose condition cannot be decided are omitted
/// from both sets as well.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnablementResult {
    pub enabled: BTreeSet<String>,
    pub disabled: BTreeSet<String>,
}

// ─── Uploads ────────────────────────────────────────────────────────────────

/// An inbound file as received from the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Client-supplied name; may carry a path prefix from legacy browsers.
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// A screened upload, ready to hand to blob storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedFile {
    /// Opaque retrieval id, freshly generated per upload.
    pub download_id: Uuid,
    /// Final path component of the client name, without extension.
    pub file_stem: String,
    /// Lower-cased extension including the leading dot; empty when the
    /// client name had none.
    pub extension: String,
    pub content_type: String,
    pub size_bytes: u64,
}

// ─── Notifications ──────────────────────────────────────────────────────────

/// A configured sender identity for outbound notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAccount {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// A composed message handed to the queueing collaborator for asynchronous
/// delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub from: String,
    pub from_name: String,
    pub to: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
    pub priority: NotificationPriority,
}

/// Result of an interactive form submission, in the shape the storefront
/// endpoint returns to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOutcome {
    pub success: bool,
    pub errors: Vec<String>,
}

/// A captured attribute submission: the parsed selection, its encoded blob,
/// a human-readable summary, and any validation warnings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub selection: SelectionSet,
    pub encoded: String,
    pub summary: String,
    pub warnings: ValidationResult,
}
