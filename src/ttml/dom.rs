/*!
 * Minimal owned XML tree.
 *
 * Documents are read with the quick-xml pull reader into `XmlElement`
 * trees, edited in memory and written back with the quick-xml writer.
 * Element and attribute names are kept as written (qualified); lookups
 * by TTML element go through the local part of the name.
 */

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

use crate::errors::{ImscError, ImscResult};

/// Elements whose content is structure only; they are pretty-printed,
/// everything else is written inline so mixed content is untouched
const BLOCK_ELEMENTS: [&str; 7] = ["tt", "head", "body", "div", "styling", "layout", "metadata"];

const INDENT: &str = "  ";

/// Child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified name (`p`, `ttm:title`)
    pub name: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

/// Part of a qualified name after the prefix
pub fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// XML whitespace: space, tab, CR and LF. Other Unicode spaces such as
/// NBSP are content.
pub fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_blank(text: &str) -> bool {
    text.chars().all(is_xml_whitespace)
}

/// Checks the XML `Name` production closely enough to keep output
/// well-formed
pub fn is_valid_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');

    first_ok
        && !name.ends_with(':')
        && name.matches(':').count() <= 1
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sets an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(pos).1)
    }

    pub fn append_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Element children
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First element child with the given local name
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.local_name() == local)
    }

    /// Returns the child named like `name`, appending it when missing
    pub fn ensure_child(&mut self, name: &str) -> &mut XmlElement {
        let local = local_part(name);
        let idx = match self
            .children
            .iter()
            .position(|c| matches!(c, XmlNode::Element(e) if e.local_name() == local))
        {
            Some(idx) => idx,
            None => {
                self.children.push(XmlNode::Element(XmlElement::new(name)));
                self.children.len() - 1
            }
        };

        match &mut self.children[idx] {
            XmlNode::Element(e) => e,
            XmlNode::Text(_) => unreachable!("index was taken from an element child"),
        }
    }

    /// Every descendant element with the given local name, depth first
    pub fn descendants(&self, local: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        for child in self.elements() {
            if child.local_name() == local {
                found.push(child);
            }
            found.extend(child.descendants(local));
        }
        found
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                XmlNode::Text(t) => text.push_str(t),
                XmlNode::Element(e) => text.push_str(&e.text_content()),
            }
        }
        text
    }

    /// Drops element children with the given local name
    pub fn remove_children(&mut self, local: &str) {
        self.children
            .retain(|c| !matches!(c, XmlNode::Element(e) if e.local_name() == local));
    }

    fn is_block(&self) -> bool {
        BLOCK_ELEMENTS.contains(&self.local_name())
            && self.children.iter().all(|c| match c {
                XmlNode::Text(t) => is_blank(t),
                XmlNode::Element(_) => true,
            })
    }
}

/// A parsed or generated document; the declaration is always
/// `version="1.0" encoding="utf-8"` on output
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        XmlDocument { root }
    }

    /// Parses a complete document
    pub fn parse(xml: &str) -> ImscResult<Self> {
        Ok(XmlDocument { root: parse_element_tree(xml)? })
    }

    /// Serializes with an XML declaration
    pub fn to_xml_string(&self) -> ImscResult<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Text(BytesText::new("\n")))?;
        write_element(&mut writer, &self.root, 0)?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }
}

/// Parses a single-rooted XML string into an element tree. Text is kept
/// verbatim (no trimming); comments, processing instructions and the
/// declaration are skipped.
pub fn parse_element_tree(xml: &str) -> ImscResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if root.is_some() && stack.is_empty() {
                    return Err(ImscError::MalformedDocument(
                        "more than one root element".to_string(),
                    ));
                }
                stack.push(element_from_start(&e, &reader)?);
            }
            Event::Empty(e) => {
                let element = element_from_start(&e, &reader)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let element = stack.pop().ok_or_else(|| {
                    ImscError::MalformedDocument(format!("unexpected closing tag </{}>", name))
                })?;
                if element.name != name {
                    return Err(ImscError::MalformedDocument(format!(
                        "expected </{}> but found </{}>",
                        element.name, name
                    )));
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                push_text(&mut stack, text)?;
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut stack, text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ImscError::MalformedDocument(format!(
            "element <{}> is never closed",
            open.name
        )));
    }

    root.ok_or_else(|| ImscError::MalformedDocument("no root element".to_string()))
}

fn element_from_start(e: &BytesStart, reader: &Reader<&[u8]>) -> ImscResult<XmlElement> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    if !is_valid_xml_name(&name) {
        return Err(ImscError::MalformedDocument(format!(
            "invalid element name '{}'",
            name
        )));
    }

    let mut element = XmlElement::new(name);
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.decode_and_unescape_value(reader.decoder())?;
        element.set_attribute(&key, &value);
    }

    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> ImscResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.append_child(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(ImscError::MalformedDocument(
            "more than one root element".to_string(),
        ));
    }
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: String) -> ImscResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.append_text(text),
        None if is_blank(&text) => {}
        None => {
            return Err(ImscError::MalformedDocument(
                "text outside the root element".to_string(),
            ));
        }
    }
    Ok(())
}

fn write_indent(writer: &mut Writer<Cursor<Vec<u8>>>, depth: usize) -> ImscResult<()> {
    let indent = format!("\n{}", INDENT.repeat(depth));
    writer.write_event(Event::Text(BytesText::new(&indent)))?;
    Ok(())
}

fn write_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    element: &XmlElement,
    depth: usize,
) -> ImscResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in element.attributes() {
        start.push_attribute((key, value));
    }

    let block = element.is_block();
    let has_content = if block {
        element.elements().next().is_some()
    } else {
        !element.children.is_empty()
    };

    if !has_content {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(child) => {
                if block {
                    write_indent(writer, depth + 1)?;
                }
                write_element(writer, child, depth + 1)?;
            }
            XmlNode::Text(text) => {
                if block {
                    continue;
                }
                // Quotes stay literal in text content
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
            }
        }
    }
    if block {
        write_indent(writer, depth)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;

    Ok(())
}
