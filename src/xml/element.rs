//! # Element Tree
//!
//! Minimal owned XML element tree on top of `quick-xml`'s event reader and
//! writer. Documents handled by the codec are small enough to be held whole.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Result, TelemetryXmlError};

/// Indentation character for pretty-printed output
const INDENT_CHAR: u8 = b'\t';

/// Indentation depth per nesting level
const INDENT_SIZE: usize = 1;

/// An XML element with its attributes, text content and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Empty element with the given tag
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute; replaces an existing attribute of the same name
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style text content, stored verbatim
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder-style child, appended after existing children
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Append a child element
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn require_attribute(&self, name: &str) -> Result<&str> {
        self.attribute(name)
            .ok_or_else(|| TelemetryXmlError::MissingAttribute {
                attribute: name.to_string(),
                element: self.name.clone(),
            })
    }

    /// First child with the given tag, if any
    ///
    /// Later children with the same tag are not considered.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child with the given tag, or a structural error naming it
    pub fn require_child(&self, name: &str) -> Result<&Element> {
        self.child(name)
            .ok_or_else(|| TelemetryXmlError::missing_element(name, &self.name))
    }

    /// All children with the given tag, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Parse a complete XML document and return its root element
///
/// Leaf text is kept exactly as written, including leading and trailing
/// whitespace. An element with children drops its text when that text is only
/// the indentation between those children. Comments, processing instructions
/// and the declaration are skipped.
///
/// # Errors
///
/// Returns error if the text is not well-formed XML or has no (or more than
/// one) root element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let mut element = stack.pop().ok_or_else(|| {
                    TelemetryXmlError::MalformedDocument("unbalanced end tag".to_string())
                })?;
                if element.has_children() && element.text.trim().is_empty() {
                    element.text.clear();
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(TelemetryXmlError::MalformedDocument(format!(
            "unclosed element <{}>",
            stack[stack.len() - 1].name
        )));
    }

    root.ok_or_else(|| TelemetryXmlError::MalformedDocument("document has no root element".to_string()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(TelemetryXmlError::MalformedDocument(format!(
            "second root element <{}>",
            element.name
        ))),
    }
}

/// Serialize a tree as an indented UTF-8 document with an XML declaration
///
/// Text content is written inline with its element and never wrapped, so long
/// sample arrays stay on one line.
pub fn to_pretty_string(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), INDENT_CHAR, INDENT_SIZE);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;

    let mut out = String::from_utf8(writer.into_inner())
        .map_err(|e| TelemetryXmlError::MalformedDocument(format!("non UTF-8 output: {}", e)))?;
    out.push('\n');
    Ok(out)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
