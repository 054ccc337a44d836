/*!
 * Generic TTML reader shared by TTML-family formats.
 *
 * Profiles only add their delta on top of `TtmlBase`: turning a document
 * into paragraphs and rendering time expressions.
 */

use log::{debug, warn};

use crate::app_config::ImscConfig;
use crate::errors::{ImscError, ImscResult};
use crate::subtitle::Paragraph;
use crate::ttml::dom::{is_xml_whitespace, XmlDocument, XmlElement, XmlNode};
use crate::ttml::namespaces::is_namespace_declaration;
use crate::ttml::time::{self, TimeBase, TimeCodeFormat};
use crate::ttml::{FONT_ATTRIBUTES, INLINE_STYLE_TAGS};

/// Attributes the reader turns into paragraph fields instead of effects
const CONSUMED_ATTRIBUTES: [&str; 6] = ["begin", "end", "dur", "xml:id", "style", "xml:lang"];

/// The narrow capability a TTML profile relies on
pub trait TtmlBase {
    /// Turns every `p` of the document body into a paragraph
    fn parse_paragraphs(&self, document: &XmlDocument) -> ImscResult<Vec<Paragraph>>;

    /// Renders milliseconds as a TTML time expression
    fn format_time(&self, ms: u64) -> String;
}

/// Default TTML 1.0 reader
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenericTtml {
    pub time_code_format: TimeCodeFormat,
    pub time_base: TimeBase,
}

impl GenericTtml {
    pub fn from_config(config: &ImscConfig) -> Self {
        GenericTtml {
            time_code_format: config.time_code_format,
            time_base: TimeBase {
                frame_rate: config.frame_rate,
                tick_rate: config.tick_rate,
            },
        }
    }

    /// Frame and tick rates declared on the root win over configuration
    fn document_time_base(&self, root: &XmlElement) -> TimeBase {
        let frame_rate = root
            .attribute("ttp:frameRate")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|r| *r > 0)
            .unwrap_or(self.time_base.frame_rate);
        let tick_rate = root
            .attribute("ttp:tickRate")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|r| *r > 0)
            .unwrap_or(self.time_base.tick_rate);

        TimeBase {
            frame_rate,
            tick_rate,
        }
    }

    fn parse_paragraph(&self, p: &XmlElement, base: TimeBase) -> ImscResult<Paragraph> {
        let begin = p
            .attribute("begin")
            .ok_or_else(|| ImscError::InvalidTime("missing begin attribute".to_string()))?;
        let start_time_ms = time::parse_time(begin, base)?;

        let end_time_ms = match (p.attribute("end"), p.attribute("dur")) {
            (Some(end), _) => time::parse_time(end, base)?,
            (None, Some(dur)) => start_time_ms
                .checked_add(time::parse_time(dur, base)?)
                .ok_or_else(|| ImscError::InvalidTime(format!("begin {} plus dur {} is out of range", begin, dur)))?,
            (None, None) => {
                warn!("Paragraph at {} has neither end nor dur", begin);
                start_time_ms
            }
        };

        let mut paragraph = Paragraph::new(start_time_ms, end_time_ms, inline_markup(p));
        paragraph.style = p.attribute("style").map(str::to_string);
        paragraph.language = p.attribute("xml:lang").map(str::to_string);

        for (key, value) in p.attributes() {
            if !CONSUMED_ATTRIBUTES.contains(&key) && !is_namespace_declaration(key) {
                paragraph.set_effect(key, value);
            }
        }

        Ok(paragraph)
    }
}

impl TtmlBase for GenericTtml {
    fn parse_paragraphs(&self, document: &XmlDocument) -> ImscResult<Vec<Paragraph>> {
        let root = &document.root;
        if root.local_name() != "tt" {
            return Err(ImscError::HeaderImport(format!(
                "root element is <{}>, expected <tt>",
                root.name
            )));
        }

        let Some(body) = root.child("body") else {
            warn!("Document has no body, no paragraphs loaded");
            return Ok(Vec::new());
        };

        let base = self.document_time_base(root);
        let mut paragraphs = Vec::new();
        for (index, p) in body.descendants("p").into_iter().enumerate() {
            match self.parse_paragraph(p, base) {
                Ok(paragraph) => paragraphs.push(paragraph),
                Err(e) => warn!("Skipping paragraph {}: {}", index, e),
            }
        }

        debug!("Parsed {} paragraphs", paragraphs.len());
        Ok(paragraphs)
    }

    fn format_time(&self, ms: u64) -> String {
        time::format_time(ms, self.time_code_format, self.time_base)
    }
}

/// Converts the content of a `p` back into the paragraph markup dialect
fn inline_markup(p: &XmlElement) -> String {
    let mut raw = String::new();
    collect_markup(p, &mut raw);

    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.trim_matches(is_xml_whitespace))
        .collect();
    lines.join("\n").trim_matches(is_xml_whitespace).to_string()
}


fn collect_markup(element: &XmlElement, out: &mut String) {
    for child in &element.children {
        match child {
            XmlNode::Text(text) => out.push_str(&collapse_whitespace(text)),
            XmlNode::Element(e) => match e.local_name() {
                "br" => out.push('\n'),
                "span" => {
                    let (open, close) = span_markup(e);
                    out.push_str(&open);
                    collect_markup(e, out);
                    out.push_str(&close);
                }
                _ => collect_markup(e, out),
            },
        }
    }
}

/// Opening and closing inline tags for a styled span
fn span_markup(span: &XmlElement) -> (String, String) {
    let mut open = String::new();
    let mut close = String::new();

    for (tag, attribute, value) in INLINE_STYLE_TAGS {
        if span.attribute(attribute) == Some(value) {
            open.push_str(&format!("<{}>", tag));
            close.insert_str(0, &format!("</{}>", tag));
        }
    }

    let font_attributes: Vec<String> = FONT_ATTRIBUTES
        .iter()
        .filter_map(|(name, attribute)| {
            span.attribute(attribute)
                .map(|v| format!(" {}=\"{}\"", name, v))
        })
        .collect();
    if !font_attributes.is_empty() {
        open.push_str(&format!("<font{}>", font_attributes.concat()));
        close.insert_str(0, "</font>");
    }

    (open, close)
}

/// XML default whitespace handling: runs collapse to one space
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if is_xml_whitespace(c) {
            if !in_space {
                result.push(' ');
            }
            in_space = true;
        } else {
            result.push(c);
            in_space = false;
        }
    }
    result
}
