/*!
 * Paragraph markup to TTML inline content.
 *
 * Paragraph text is a loose HTML-like dialect (`<i>`, `<b>`, `<u>`,
 * `<font>`) with plain line breaks. It is parsed as an XML fragment; when
 * that fails the paragraph degrades to plain text instead of failing
 * the whole conversion.
 */

use log::debug;

use crate::subtitle::split_to_lines;
use crate::ttml::dom::{parse_element_tree, XmlElement, XmlNode};
use crate::ttml::namespaces::is_known_attribute_name;
use crate::ttml::{FONT_ATTRIBUTES, INLINE_STYLE_TAGS};

/// Outcome of converting paragraph markup
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupParse {
    /// Well-formed markup, converted to TTML inline nodes
    Nodes(Vec<XmlNode>),
    /// Markup could not be parsed; plain text with angle brackets removed
    Fallback(String),
}

impl MarkupParse {
    pub fn is_fallback(&self) -> bool {
        matches!(self, MarkupParse::Fallback(_))
    }

    /// Children to attach to the `p` element
    pub fn into_nodes(self) -> Vec<XmlNode> {
        match self {
            MarkupParse::Nodes(nodes) => nodes,
            MarkupParse::Fallback(text) => vec![XmlNode::Text(text)],
        }
    }
}

/// Converts paragraph text (region tag already removed) to inline nodes
pub fn parse_markup(text: &str) -> MarkupParse {
    let fragment = format!("<root>{}</root>", split_to_lines(text).join("<br/>"));

    match parse_element_tree(&fragment) {
        Ok(root) => MarkupParse::Nodes(convert_children(&root)),
        Err(e) => {
            debug!("Markup is not well-formed ({}), writing plain text", e);
            MarkupParse::Fallback(strip_angle_brackets(text))
        }
    }
}

/// Removes every `<` and `>` so the text is safe as a single text node
pub fn strip_angle_brackets(text: &str) -> String {
    text.replace(['<', '>'], "")
}

fn convert_children(source: &XmlElement) -> Vec<XmlNode> {
    let mut nodes = Vec::new();

    for child in &source.children {
        match child {
            XmlNode::Text(text) => nodes.push(XmlNode::Text(text.clone())),
            XmlNode::Element(element) => convert_element(element, &mut nodes),
        }
    }

    nodes
}

fn convert_element(element: &XmlElement, nodes: &mut Vec<XmlNode>) {
    let tag = element.local_name().to_ascii_lowercase();

    if tag == "br" {
        nodes.push(XmlNode::Element(XmlElement::new("br")));
        return;
    }

    let mut span = XmlElement::new("span");

    if let Some((_, attribute, value)) = INLINE_STYLE_TAGS.iter().find(|(t, _, _)| *t == tag) {
        span.set_attribute(attribute, value);
    } else if tag == "font" {
        for (name, attribute) in FONT_ATTRIBUTES {
            if let Some(value) = element.attribute(name) {
                span.set_attribute(attribute, value);
            }
        }
    } else if tag == "span" {
        for (name, value) in element.attributes() {
            if is_known_attribute_name(name) {
                span.set_attribute(name, value);
            }
        }
    }

    // Unknown tags and attribute-less wrappers only keep their content
    if span.attributes().next().is_none() {
        nodes.extend(convert_children(element));
        return;
    }

    span.children = convert_children(element);
    nodes.push(XmlNode::Element(span));
}
