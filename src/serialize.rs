//! [`SelectionSet`] → selection blob serialization.

use crate::error::SerializeError;
use crate::parse::{ATTRIBUTE_ELEMENT, ROOT_ELEMENT, VALUE_ELEMENT, VALUE_WRAPPER_ELEMENT};
use crate::types::SelectionSet;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Encode a selection for storage.
///
/// The empty selection encodes to the empty string, matching what the
/// storefront has always persisted for "nothing selected". Entries without
/// values are skipped; text content is escaped by the writer.
pub fn serialize(selection: &SelectionSet) -> Result<String, SerializeError> {
    if selection.is_empty() {
        return Ok(String::new());
    }

    let mut writer = Writer::new(Vec::new());
    write(&mut writer, Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    for entry in selection.entries() {
        if entry.values.is_empty() {
            continue;
        }
        let mut attr_el = BytesStart::new(ATTRIBUTE_ELEMENT);
        attr_el.push_attribute(("ID", entry.attribute_id.as_str()));
        write(&mut writer, Event::Start(attr_el))?;

        for value in &entry.values {
            write(&mut writer, Event::Start(BytesStart::new(VALUE_WRAPPER_ELEMENT)))?;
            write(&mut writer, Event::Start(BytesStart::new(VALUE_ELEMENT)))?;
            write(&mut writer, Event::Text(BytesText::new(value)))?;
            write(&mut writer, Event::End(BytesEnd::new(VALUE_ELEMENT)))?;
            write(&mut writer, Event::End(BytesEnd::new(VALUE_WRAPPER_ELEMENT)))?;
        }

        write(&mut writer, Event::End(BytesEnd::new(ATTRIBUTE_ELEMENT)))?;
    }

    write(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    String::from_utf8(writer.into_inner()).map_err(|e| SerializeError {
        message: format!("selection blob is not valid UTF-8: {}", e),
    })
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SerializeError> {
    writer.write_event(event).map_err(|e| SerializeError {
        message: format!("failed to write selection blob: {}", e),
    })
}
