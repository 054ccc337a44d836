/*!
 * Legacy `{\anN}` alignment tags and the regions they stand for.
 *
 * The tag numbering follows the numeric keypad: 1-3 bottom row, 4-6
 * middle row, 7-9 top row, left to right.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use crate::ttml::dom::XmlElement;

// @const: Alignment tag at the very start of the text
static REGION_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\\an[1-9]\}").expect("Invalid region tag regex"));

/// Region names indexed by keypad number minus one
pub const REGION_NAMES: [&str; 9] = [
    "bottomLeft",
    "bottomCenter",
    "bottomRight",
    "centerLeft",
    "centerCenter",
    "centerRight",
    "topLeft",
    "topCenter",
    "topRight",
];

const DISPLAY_ALIGN: [&str; 3] = ["after", "center", "before"];
const TEXT_ALIGN: [&str; 3] = ["left", "center", "right"];

pub fn has_legacy_region_tag(text: &str) -> bool {
    REGION_TAG_REGEX.is_match(text)
}

/// The leading tag, or an empty string when there is none
pub fn extract_legacy_region_tag(text: &str) -> &str {
    REGION_TAG_REGEX.find(text).map_or("", |m| m.as_str())
}

pub fn strip_legacy_region_tag(text: &str) -> Cow<'_, str> {
    REGION_TAG_REGEX.replace(text, "")
}

/// Maps an exact `{\anN}` tag to its region name; anything else maps to
/// an empty string
pub fn map_tag_to_region_name(tag: &str) -> &'static str {
    tag.strip_prefix("{\\an")
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|digit| digit.len() == 1)
        .and_then(|digit| digit.parse::<usize>().ok())
        .filter(|n| (1..=9).contains(n))
        .map_or("", |n| REGION_NAMES[n - 1])
}

pub fn is_default_region(name: &str) -> bool {
    REGION_NAMES.contains(&name)
}

/// Layout definition for one of the nine legacy regions
pub fn default_region_element(name: &str) -> Option<XmlElement> {
    let index = REGION_NAMES.iter().position(|r| *r == name)?;

    Some(
        XmlElement::new("region")
            .with_attribute("xml:id", name)
            .with_attribute("tts:origin", "10% 10%")
            .with_attribute("tts:extent", "80% 80%")
            .with_attribute("tts:displayAlign", DISPLAY_ALIGN[index / 3])
            .with_attribute("tts:textAlign", TEXT_ALIGN[index % 3]),
    )
}
