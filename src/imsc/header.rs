/*!
 * Document template handling.
 *
 * Output is built into a header document: either the default IMSC
 * template or a previously loaded document whose body is emptied. The
 * styles and regions declared in its head are tracked by `HeaderCatalog`
 * so paragraphs can be checked against them.
 */

use log::debug;
use std::collections::HashSet;

use crate::errors::{ImscError, ImscResult};
use crate::imsc::regions;
use crate::ttml::dom::{parse_element_tree, XmlDocument, XmlElement};
use crate::ttml::namespaces::{DECLARED_PREFIXES, TTML_NAMESPACE};

/// Builds the default template: namespaces, language, title, empty
/// styling and layout, and one empty `div`
pub fn generate_default_header(title: &str, language: &str) -> XmlDocument {
    let mut root = XmlElement::new("tt").with_attribute("xmlns", TTML_NAMESPACE);
    for (prefix, uri) in DECLARED_PREFIXES {
        root.set_attribute(&format!("xmlns:{}", prefix), uri);
    }
    root.set_attribute("xml:lang", language);

    let mut metadata = XmlElement::new("metadata");
    metadata.append_child(title_element(title));

    let mut head = XmlElement::new("head");
    head.append_child(metadata);
    head.append_child(XmlElement::new("styling"));
    head.append_child(XmlElement::new("layout"));

    let mut body = XmlElement::new("body");
    body.append_child(XmlElement::new("div"));

    root.append_child(head);
    root.append_child(body);

    XmlDocument::new(root)
}

/// Loads a TTML document used as header. The root must be `tt`; a bare
/// `lang` attribute is renamed to `xml:lang` and a missing one is added
/// empty.
pub fn import_header(header: &str) -> ImscResult<XmlDocument> {
    let mut root = parse_element_tree(header)
        .map_err(|e| ImscError::HeaderImport(format!("header is not well-formed: {}", e)))?;

    if root.local_name() != "tt" {
        return Err(ImscError::HeaderImport(format!(
            "root element is <{}>, expected <tt>",
            root.name
        )));
    }

    if let Some(lang) = root.remove_attribute("lang") {
        if !root.has_attribute("xml:lang") {
            root.set_attribute("xml:lang", &lang);
        }
    }
    if !root.has_attribute("xml:lang") {
        root.set_attribute("xml:lang", "");
    }

    Ok(XmlDocument::new(root))
}

/// Turns an imported document into an output template: every namespace
/// the writer emits is declared, head parts exist, a title is present
/// and the body holds exactly one empty `div`.
///
/// Elements the writer adds are unprefixed, so the default namespace
/// must be TTML. It is bound on the root when the header leaves it
/// unbound (e.g. `<tt:tt xmlns:tt=...>`); a header that binds it to
/// anything else is rejected.
pub fn prepare_template(document: &mut XmlDocument, title: &str) -> ImscResult<()> {
    let root = &mut document.root;

    match root.attribute("xmlns").filter(|ns| !ns.is_empty()) {
        None => root.set_attribute("xmlns", TTML_NAMESPACE),
        Some(TTML_NAMESPACE) => {}
        Some(other) => {
            return Err(ImscError::HeaderImport(format!(
                "default namespace is '{}', expected {}",
                other, TTML_NAMESPACE
            )));
        }
    }
    for (prefix, uri) in DECLARED_PREFIXES {
        let attribute = format!("xmlns:{}", prefix);
        if !root.has_attribute(&attribute) {
            root.set_attribute(&attribute, uri);
        }
    }

    let head = root.ensure_child("head");
    if head.descendants("title").is_empty() {
        head.ensure_child("metadata").append_child(title_element(title));
    }
    head.ensure_child("styling");
    head.ensure_child("layout");

    let body = root.ensure_child("body");
    let mut div = body.child("div").cloned().unwrap_or_else(|| XmlElement::new("div"));
    let dropped = div.elements().count();
    div.children.clear();
    body.remove_children("div");
    body.append_child(div);

    debug!("Cleared {} elements from the header body", dropped);
    Ok(())
}

/// The `div` paragraphs are appended to
pub fn body_div_mut(document: &mut XmlDocument) -> &mut XmlElement {
    document.root.ensure_child("body").ensure_child("div")
}

/// `xml:id` values of the `style` elements in the head
pub fn declared_styles(document: &XmlDocument) -> HashSet<String> {
    declared_ids(document, "style")
}

/// `xml:id` values of the `region` elements in the head
pub fn declared_regions(document: &XmlDocument) -> HashSet<String> {
    declared_ids(document, "region")
}

fn declared_ids(document: &XmlDocument, local: &str) -> HashSet<String> {
    document
        .root
        .child("head")
        .map(|head| {
            head.descendants(local)
                .into_iter()
                .filter_map(|e| e.attribute("xml:id"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn title_element(title: &str) -> XmlElement {
    let mut element = XmlElement::new("ttm:title");
    if !title.is_empty() {
        element.append_text(title);
    }
    element
}

// @struct: Styles and regions available in the document being built
#[derive(Debug, Clone, Default)]
pub struct HeaderCatalog {
    // @field: Declared style ids
    styles: HashSet<String>,

    // @field: Declared region ids, including injected defaults
    regions: HashSet<String>,

    // @field: Undeclared style references already reported
    reported_styles: HashSet<String>,

    // @field: Undeclared region references already reported
    reported_regions: HashSet<String>,
}

impl HeaderCatalog {
    pub fn from_document(document: &XmlDocument) -> Self {
        HeaderCatalog {
            styles: declared_styles(document),
            regions: declared_regions(document),
            reported_styles: HashSet::new(),
            reported_regions: HashSet::new(),
        }
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.styles.contains(style)
    }

    /// Makes sure `region` is declared, injecting one of the legacy
    /// default regions into `head/layout` when allowed. Returns whether
    /// the region is declared afterwards.
    pub fn ensure_region(&mut self, document: &mut XmlDocument, region: &str, inject: bool) -> bool {
        if self.regions.contains(region) {
            return true;
        }
        if !inject {
            return false;
        }

        let Some(element) = regions::default_region_element(region) else {
            return false;
        };
        document
            .root
            .ensure_child("head")
            .ensure_child("layout")
            .append_child(element);
        self.regions.insert(region.to_string());

        debug!("Injected default region '{}'", region);
        true
    }

    /// True the first time an undeclared style is seen
    pub fn first_style_report(&mut self, style: &str) -> bool {
        self.reported_styles.insert(style.to_string())
    }

    /// True the first time an undeclared region is seen
    pub fn first_region_report(&mut self, region: &str) -> bool {
        self.reported_regions.insert(region.to_string())
    }
}
