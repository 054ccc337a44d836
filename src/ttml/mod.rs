/*!
 * Generic TTML building blocks.
 *
 * - `namespaces`: the immutable prefix table
 * - `dom`: owned XML tree backed by quick-xml
 * - `time`: time expression formatting and parsing
 * - `base`: the generic TTML reader the IMSC profile builds on
 */

pub mod base;
pub mod dom;
pub mod namespaces;
pub mod time;

pub use base::{GenericTtml, TtmlBase};
pub use dom::{XmlDocument, XmlElement, XmlNode};
pub use time::{TimeBase, TimeCodeFormat};

/// Inline markup tags and the TTML styling attribute each one maps to
pub const INLINE_STYLE_TAGS: [(&str, &str, &str); 3] = [
    ("i", "tts:fontStyle", "italic"),
    ("b", "tts:fontWeight", "bold"),
    ("u", "tts:textDecoration", "underline"),
];

/// `<font>` attributes and their TTML styling attribute
pub const FONT_ATTRIBUTES: [(&str, &str); 2] = [("color", "tts:color"), ("face", "tts:fontFamily")];
