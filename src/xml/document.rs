//! # Document Assembler
//!
//! Shared plumbing for all three document kinds:
//! - Sorting records by header timestamp before writing
//! - Building the root element with its `file_creation_date` stamp
//! - Walking record elements on read, tagging failures with the record index
//! - The generic recursive decode kernel used for status messages

use chrono::{DateTime, Utc};

use super::element::{parse_document, to_pretty_string, Element};
use super::scalar::decode_scalar;
use super::timestamp::{format_datetime, format_timestamp, parse_datetime, parse_timestamp};
use super::{FILE_CREATION_DATE, HEADER_TIMESTAMP};
use crate::error::{Result, TelemetryXmlError};
use crate::records::{FieldMap, RecordKind, Timestamped, Value};

/// Records in non-decreasing header-timestamp order; ties keep input order
pub fn sorted_by_timestamp<T: Timestamped>(records: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by(|a, b| a.header_timestamp().total_cmp(&b.header_timestamp()));
    sorted
}

/// Sort, encode each record and serialize the whole document
pub fn encode_document<T, F>(
    kind: RecordKind,
    records: &[T],
    created: DateTime<Utc>,
    mut encode_record: F,
) -> Result<String>
where
    T: Timestamped,
    F: FnMut(&T) -> Result<Element>,
{
    let mut root = Element::new(kind.root_tag())
        .with_attribute(FILE_CREATION_DATE, format_datetime(&created));

    for (index, record) in sorted_by_timestamp(records).into_iter().enumerate() {
        let element = encode_record(record).map_err(|e| TelemetryXmlError::Record {
            kind: kind.record_tag(),
            index,
            source: Box::new(e),
        })?;
        root.push(element);
    }

    to_pretty_string(&root)
}

/// Parse a document of the given kind and decode every record element
///
/// Decoding stops at the first failing record; the error carries the
/// record's position among the record elements.
pub fn decode_document<T, F>(kind: RecordKind, xml: &str, mut decode_record: F) -> Result<Vec<T>>
where
    F: FnMut(usize, &Element) -> Result<T>,
{
    let root = parse_document(xml)?;
    check_root(kind, &root)?;

    root.children_named(kind.record_tag())
        .enumerate()
        .map(|(index, element)| {
            decode_record(index, element).map_err(|e| TelemetryXmlError::Record {
                kind: kind.record_tag(),
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

fn check_root(kind: RecordKind, root: &Element) -> Result<()> {
    if root.name != kind.root_tag() {
        return Err(TelemetryXmlError::MalformedDocument(format!(
            "expected root <{}>, found <{}>",
            kind.root_tag(),
            root.name
        )));
    }
    Ok(())
}

/// Create a record element stamped with its header timestamp
pub fn record_element(kind: RecordKind, header_timestamp: f64) -> Result<Element> {
    Ok(Element::new(kind.record_tag())
        .with_attribute(HEADER_TIMESTAMP, format_timestamp(header_timestamp)?))
}

/// Read the `header_timestamp` attribute of a record element
pub fn record_timestamp(element: &Element) -> Result<f64> {
    parse_timestamp(element.require_attribute(HEADER_TIMESTAMP)?)
}

/// Generic recursive decode kernel
///
/// An element with children becomes a `Value::Map` keyed by child tag
/// (recursing to any depth); a childless element becomes a scalar decoded
/// under its own tag name. When a tag repeats, the last occurrence wins.
pub fn decode_kernel(element: &Element) -> Result<Value> {
    if element.has_children() {
        decode_children(element).map(Value::Map)
    } else {
        decode_scalar(&element.name, &element.text)
    }
}

/// Decode every child of `element` with the kernel
pub fn decode_children(element: &Element) -> Result<FieldMap> {
    let mut fields = FieldMap::with_capacity(element.children.len());
    for child in &element.children {
        fields.insert(child.name.clone(), decode_kernel(child)?);
    }
    Ok(fields)
}

/// Summary of a document, read without decoding record contents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub kind: Option<RecordKind>,
    pub root_tag: String,
    pub created: Option<DateTime<Utc>>,
    pub records: usize,
    pub first_timestamp: Option<f64>,
    pub last_timestamp: Option<f64>,
}

/// Describe a document: its kind, creation date, record count and time span
///
/// Records are the root's children carrying a `header_timestamp` attribute.
pub fn inspect_document(xml: &str) -> Result<DocumentInfo> {
    let root = parse_document(xml)?;
    let kind = RecordKind::from_root_tag(&root.name);
    let created = root.attribute(FILE_CREATION_DATE).map(parse_datetime).transpose()?;

    let mut info = DocumentInfo {
        kind,
        root_tag: root.name.clone(),
        created,
        records: 0,
        first_timestamp: None,
        last_timestamp: None,
    };

    for child in root.children.iter().filter(|c| c.attribute(HEADER_TIMESTAMP).is_some()) {
        let t = record_timestamp(child)?;
        info.records += 1;
        info.first_timestamp = Some(info.first_timestamp.map_or(t, |f: f64| f.min(t)));
        info.last_timestamp = Some(info.last_timestamp.map_or(t, |l: f64| l.max(t)));
    }

    Ok(info)
}
