//! Upload screening for file-upload attributes.
//!
//! Pure except for id generation: the guard validates and prepares the
//! payload; persisting it is the caller's handoff to blob storage.

use crate::error::{UploadError, UploadErrorKind};
use crate::types::{AcceptedFile, AttributeDefinition, UploadedFile};
use crate::validate::{EnglishMessages, MessageCatalog};
use uuid::Uuid;

/// Screen an upload with the default English messages.
pub fn check_upload(
    attribute: &AttributeDefinition,
    file: Option<&UploadedFile>,
) -> Result<AcceptedFile, UploadError> {
    check_upload_with(attribute, file, &EnglishMessages)
}

/// Screen an upload against a file-upload attribute's rules.
///
/// Rejects when the attribute is not a file-upload control, when no file
/// was posted, when the size exceeds the attribute's ceiling (stored in
/// kilobytes; exactly `max * 1024` bytes still passes), or when the
/// attribute restricts extensions and the file's is not listed.
///
/// On acceptance the client-supplied name is reduced to its final path
/// component (legacy browsers post full paths), split into stem and
/// lower-cased extension, and paired with a fresh opaque download id.
pub fn check_upload_with(
    attribute: &AttributeDefinition,
    file: Option<&UploadedFile>,
    messages: &dyn MessageCatalog,
) -> Result<AcceptedFile, UploadError> {
    if !attribute.control_type.is_file_upload() {
        return Err(UploadError {
            kind: UploadErrorKind::WrongControlType,
            message: messages.upload_message(UploadErrorKind::WrongControlType, None),
        });
    }

    let Some(file) = file else {
        return Err(UploadError {
            kind: UploadErrorKind::NoFile,
            message: messages.upload_message(UploadErrorKind::NoFile, None),
        });
    };

    if let Some(max_kb) = attribute.max_file_size_kb
        && file.size_bytes > max_kb * 1024
    {
        return Err(UploadError {
            kind: UploadErrorKind::TooLarge,
            message: messages.upload_message(UploadErrorKind::TooLarge, Some(max_kb)),
        });
    }

    let (stem, extension) = split_client_name(&file.file_name);

    if !attribute.allowed_file_extensions.is_empty()
        && !attribute
            .allowed_file_extensions
            .iter()
            .any(|allowed| allowed == &extension)
    {
        return Err(UploadError {
            kind: UploadErrorKind::ExtensionNotAllowed,
            message: messages.upload_message(UploadErrorKind::ExtensionNotAllowed, None),
        });
    }

    Ok(AcceptedFile {
        download_id: Uuid::new_v4(),
        file_stem: stem,
        extension,
        content_type: file.content_type.clone(),
        size_bytes: file.size_bytes,
    })
}

/// Strip any path prefix from a client-supplied file name and split it into
/// stem and lower-cased extension (with leading dot; empty when absent).
fn split_client_name(client_name: &str) -> (String, String) {
    let name = client_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(client_name);

    match name.rfind('.') {
        Some(pos) if pos + 1 < name.len() => {
            (name[..pos].to_string(), name[pos..].to_lowercase())
        }
        _ => (name.trim_end_matches('.').to_string(), String::new()),
    }
}
