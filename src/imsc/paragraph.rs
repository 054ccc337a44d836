/*!
 * Builds one IMSC `p` element from a paragraph.
 *
 * Attribute precedence: identity, timing and forced display first, then
 * style and region from the paragraph, then whatever effect entries are
 * left. Effect entries never override an attribute already set.
 */

use log::{debug, warn};

use crate::imsc::header::HeaderCatalog;
use crate::imsc::markup::{self, MarkupParse};
use crate::imsc::{regions, FORCED_DISPLAY_ATTRIBUTE};
use crate::subtitle::Paragraph;
use crate::ttml::base::TtmlBase;
use crate::ttml::dom::{is_valid_xml_name, XmlDocument, XmlElement};
use crate::ttml::namespaces::is_known_attribute_name;

/// Effect keys that are never copied onto the element
pub const RESERVED_EFFECT_KEYS: [&str; 2] = ["id", FORCED_DISPLAY_ATTRIBUTE];

// @struct: Per-document paragraph builder
pub struct ParagraphBuilder<'a> {
    // @field: Time expression renderer
    base: &'a dyn TtmlBase,

    // @field: Add legacy default regions to the layout when referenced
    inject_default_regions: bool,
}

impl<'a> ParagraphBuilder<'a> {
    pub fn new(base: &'a dyn TtmlBase, inject_default_regions: bool) -> Self {
        ParagraphBuilder {
            base,
            inject_default_regions,
        }
    }

    /// Builds the `p` element with id `id`. Regions referenced by the
    /// paragraph may be added to the document layout.
    pub fn build(
        &self,
        paragraph: &Paragraph,
        id: &str,
        document: &mut XmlDocument,
        catalog: &mut HeaderCatalog,
    ) -> XmlElement {
        let mut effects = paragraph.effects();
        let mut region = effects.get("region").unwrap_or_default().to_string();

        let text = if regions::has_legacy_region_tag(&paragraph.text) {
            let tag = regions::extract_legacy_region_tag(&paragraph.text);
            region = regions::map_tag_to_region_name(tag).to_string();
            effects.remove("region");
            regions::strip_legacy_region_tag(&paragraph.text)
        } else {
            paragraph.text.as_str().into()
        };

        let mut element = XmlElement::new("p");
        let content = markup::parse_markup(&text);
        if let MarkupParse::Fallback(_) = &content {
            debug!("Paragraph {} written as plain text", id);
        }
        element.children = content.into_nodes();

        element.set_attribute("xml:id", id);
        element.set_attribute("begin", &self.base.format_time(paragraph.start_time_ms));
        element.set_attribute("end", &self.base.format_time(paragraph.end_time_ms));

        if paragraph.forced {
            element.set_attribute(FORCED_DISPLAY_ATTRIBUTE, "true");
        }

        if let Some(style) = paragraph.style.as_deref().filter(|s| !s.is_empty()) {
            if !catalog.has_style(style) && catalog.first_style_report(style) {
                warn!("Style '{}' is not declared in the document head", style);
            }
            element.set_attribute("style", style);
        }

        if !region.is_empty() {
            let declared = catalog.ensure_region(document, &region, self.inject_default_regions);
            if !declared && catalog.first_region_report(&region) {
                warn!("Region '{}' is not declared in the document layout", region);
            }
            element.set_attribute("region", &region);
        }

        for (key, value) in effects.iter() {
            if value.is_empty() || element.has_attribute(key) || RESERVED_EFFECT_KEYS.contains(&key) {
                continue;
            }
            if !is_valid_xml_name(key) || !is_known_attribute_name(key) {
                debug!("Dropping effect '{}' on {}: not a writable attribute name", key, id);
                continue;
            }
            element.set_attribute(key, value);
        }

        element
    }
}
