//! # Status Message Codec
//!
//! Status messages have an open, evolving field set, so they are written by
//! walking their field maps and read back through the generic decode kernel
//! rather than a fixed schema.

use chrono::{DateTime, Utc};

use super::document::{decode_document, decode_kernel, encode_document, record_element, record_timestamp};
use super::element::Element;
use super::scalar::encode_scalar;
use super::HEADER_TIMESTAMP;
use crate::error::{Result, TelemetryXmlError};
use crate::observer::{CodecEvent, CodecObserver};
use crate::records::{FieldMap, RecordKind, StatusMessage, Value};

/// Encode one status message as a `<status>` element
///
/// # Errors
///
/// Returns `InvalidField` if the field map holds a top-level
/// `header_timestamp` entry. That tag is reserved for the record attribute
/// and its child element is skipped on read.
pub fn encode_status_message(message: &StatusMessage) -> Result<Element> {
    let mut element = record_element(RecordKind::Status, message.header_timestamp)?;
    for (name, value) in &message.fields {
        if name == HEADER_TIMESTAMP {
            return Err(TelemetryXmlError::invalid_field(
                HEADER_TIMESTAMP,
                "reserved for the record attribute; set StatusMessage::header_timestamp instead",
            ));
        }
        if let Some(child) = encode_field(name, value) {
            element.push(child);
        }
    }
    Ok(element)
}

/// Encode a field; nested maps recurse, empty maps produce nothing
fn encode_field(name: &str, value: &Value) -> Option<Element> {
    match value {
        Value::Map(map) => encode_map(name, map),
        leaf => encode_scalar(leaf).map(|text| Element::new(name).with_text(text)),
    }
}

fn encode_map(name: &str, map: &FieldMap) -> Option<Element> {
    let mut element = Element::new(name);
    for (key, value) in map {
        if let Some(child) = encode_field(key, value) {
            element.push(child);
        }
    }
    element.has_children().then_some(element)
}

/// Decode one `<status>` element
///
/// The header timestamp comes from the element's attribute. A
/// `header_timestamp` child, as written by older tools, is ignored.
pub fn decode_status_message(element: &Element) -> Result<StatusMessage> {
    let header_timestamp = record_timestamp(element)?;

    let mut fields = FieldMap::with_capacity(element.children.len());
    for child in element.children.iter().filter(|c| c.name != HEADER_TIMESTAMP) {
        fields.insert(child.name.clone(), decode_kernel(child)?);
    }

    Ok(StatusMessage {
        header_timestamp,
        fields,
    })
}

/// Encode a full `status_messages` document
pub fn encode_status_document(
    messages: &[StatusMessage],
    created: DateTime<Utc>,
    observer: &dyn CodecObserver,
) -> Result<String> {
    let xml = encode_document(RecordKind::Status, messages, created, encode_status_message)?;
    observer.on_event(&CodecEvent::DocumentEncoded {
        kind: RecordKind::Status,
        records: messages.len(),
    });
    Ok(xml)
}

/// Decode every `<status>` element of a `status_messages` document
pub fn decode_status_document(xml: &str, observer: &dyn CodecObserver) -> Result<Vec<StatusMessage>> {
    let messages = decode_document(RecordKind::Status, xml, |_, element| decode_status_message(element))?;
    observer.on_event(&CodecEvent::DocumentDecoded {
        kind: RecordKind::Status,
        records: messages.len(),
    });
    Ok(messages)
}
