/*!
 * Namespace table shared by every conversion.
 *
 * Built once on first use and never mutated afterwards.
 */

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const TTML_NAMESPACE: &str = "http://www.w3.org/ns/ttml";
pub const TTML_STYLING_NAMESPACE: &str = "http://www.w3.org/ns/ttml#styling";
pub const TTML_PARAMETER_NAMESPACE: &str = "http://www.w3.org/ns/ttml#parameter";
pub const TTML_METADATA_NAMESPACE: &str = "http://www.w3.org/ns/ttml#metadata";

pub const IMSC_STYLING_NAMESPACE: &str = "http://www.w3.org/ns/ttml/profile/imsc1#styling";
pub const IMSC_PARAMETER_NAMESPACE: &str = "http://www.w3.org/ns/ttml/profile/imsc1#parameter";
pub const IMSC_METADATA_NAMESPACE: &str = "http://www.w3.org/ns/ttml/profile/imsc1#metadata";

/// Prefixes declared on the root element, in declaration order
pub const DECLARED_PREFIXES: [(&str, &str); 6] = [
    ("ttm", TTML_METADATA_NAMESPACE),
    ("tts", TTML_STYLING_NAMESPACE),
    ("ttp", TTML_PARAMETER_NAMESPACE),
    ("ittm", IMSC_METADATA_NAMESPACE),
    ("itts", IMSC_STYLING_NAMESPACE),
    ("ittp", IMSC_PARAMETER_NAMESPACE),
];

/// Prefix to namespace URI. `ttml` names the default (unprefixed)
/// namespace and `xml` is always bound.
pub static NAMESPACES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, &'static str> = DECLARED_PREFIXES.iter().copied().collect();
    table.insert("ttml", TTML_NAMESPACE);
    table.insert("xml", "http://www.w3.org/XML/1998/namespace");
    table
});

/// Whether a qualified attribute name can be written without declaring
/// a new prefix
pub fn is_known_attribute_name(name: &str) -> bool {
    if is_namespace_declaration(name) {
        return false;
    }
    match name.split_once(':') {
        Some((prefix, _)) => prefix != "ttml" && NAMESPACES.contains_key(prefix),
        None => true,
    }
}

/// `xmlns` or `xmlns:*`
pub fn is_namespace_declaration(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}
