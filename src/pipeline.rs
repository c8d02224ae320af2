//! Submission orchestration over injected collaborators.
//!
//! The engine's pure functions do the deciding; this module wires them to
//! the environment: a localization store, a notification queue, and blob
//! storage. Collaborators arrive as constructor parameters, never resolved
//! ad hoc.

use crate::enums::NotificationPriority;
use crate::error::{ConfigError, SerializeError, UploadError};
use crate::evaluate::prune_unmet;
use crate::format::{format_fields, format_selection};
use crate::parse::parse_form;
use crate::serialize::serialize;
use crate::types::*;
use crate::upload::check_upload_with;
use crate::validate::{MessageCatalog, attribute_warnings_with, validate_fields_with};

/// Resolves configured sender accounts and accepts composed messages for
/// asynchronous delivery. Implemented by the hosting environment.
pub trait NotificationGateway {
    /// The account to send from: by id when the form names one, otherwise
    /// any configured account. `None` means the store has none at all.
    fn account(&self, id: Option<&str>) -> Option<NotificationAccount>;

    /// Hand a composed message to the delivery queue.
    fn enqueue(&self, message: NotificationMessage);
}

/// Accepts screened upload payloads and makes them retrievable by their
/// download id. Implemented by the hosting environment.
pub trait BlobStore {
    fn put(&self, file: &AcceptedFile);
}

/// Orchestrates form submissions end to end: validate, summarize, notify,
/// store. One instance serves any number of concurrent requests; it holds
/// no mutable state.
pub struct FormProcessor<'a> {
    messages: &'a dyn MessageCatalog,
    notifications: &'a dyn NotificationGateway,
    blobs: &'a dyn BlobStore,
}

impl<'a> FormProcessor<'a> {
    pub fn new(
        messages: &'a dyn MessageCatalog,
        notifications: &'a dyn NotificationGateway,
        blobs: &'a dyn BlobStore,
    ) -> Self {
        Self {
            messages,
            notifications,
            blobs,
        }
    }

    /// Handle an interactive form submission.
    ///
    /// Validation failure is a normal outcome: the rendered error list goes
    /// back to the client and nothing is queued. On success the submission
    /// is summarized field-by-field and queued for delivery to the form's
    /// notification account.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when no notification account is configured. That is
    /// a store misconfiguration, surfaced to the caller rather than retried.
    pub fn submit_form(
        &self,
        form: &FormDefinition,
        submitted: &FormData,
    ) -> Result<FormOutcome, ConfigError> {
        let result = validate_fields_with(&form.fields, submitted, self.messages);
        if !result.is_valid() {
            tracing::debug!(
                form_id = %form.id,
                errors = result.errors.len(),
                "form submission rejected"
            );
            return Ok(FormOutcome {
                success: false,
                errors: result.messages(),
            });
        }

        let account = self
            .notifications
            .account(form.notification_account_id.as_deref())
            .ok_or_else(|| ConfigError {
                message: "no notification account could be loaded".to_string(),
            })?;

        let message = NotificationMessage {
            from: account.email.clone(),
            from_name: account.display_name.clone(),
            to: account.email,
            to_name: account.display_name,
            subject: self.messages.enquiry_subject(&form.name),
            body: format_fields(&form.fields, submitted),
            priority: NotificationPriority::High,
        };
        self.notifications.enqueue(message);
        tracing::info!(form_id = %form.id, "form enquiry queued");

        Ok(FormOutcome {
            success: true,
            errors: Vec::new(),
        })
    }

    /// Capture a contact-form attribute submission: parse the raw fields,
    /// drop values of condition-disabled attributes, screen required
    /// attributes, and produce the storable blob plus a summary.
    pub fn capture_attributes(
        &self,
        attributes: &[AttributeDefinition],
        form: &FormData,
    ) -> Result<Capture, SerializeError> {
        let selection = parse_form(attributes, form);
        let selection = prune_unmet(attributes, &selection);
        let warnings = attribute_warnings_with(attributes, &selection, self.messages);
        let encoded = serialize(&selection)?;
        let summary = format_selection(attributes, &selection);

        Ok(Capture {
            selection,
            encoded,
            summary,
            warnings,
        })
    }

    /// Screen an upload for a file-upload attribute and hand it to blob
    /// storage when accepted.
    pub fn store_upload(
        &self,
        attribute: &AttributeDefinition,
        file: Option<&UploadedFile>,
    ) -> Result<AcceptedFile, UploadError> {
        match check_upload_with(attribute, file, self.messages) {
            Ok(accepted) => {
                self.blobs.put(&accepted);
                tracing::info!(
                    attribute_id = %attribute.id,
                    download_id = %accepted.download_id,
                    "upload accepted"
                );
                Ok(accepted)
            }
            Err(e) => {
                tracing::warn!(
                    attribute_id = %attribute.id,
                    kind = ?e.kind,
                    "upload refused"
                );
                Err(e)
            }
        }
    }
}
