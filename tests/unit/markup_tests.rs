/*!
 * Tests for paragraph markup conversion
 */

use imsc_convert::imsc::markup::{parse_markup, strip_angle_brackets, MarkupParse};
use imsc_convert::ttml::dom::XmlNode;

fn element_names(nodes: &[XmlNode]) -> Vec<String> {
    nodes
        .iter()
        .map(|n| match n {
            XmlNode::Element(e) => e.name.clone(),
            XmlNode::Text(t) => format!("#{}", t),
        })
        .collect()
}

#[test]
fn test_parseMarkup_withUnbalancedAngleBracket_shouldFallBackWithoutBrackets() {
    match parse_markup("a < b") {
        MarkupParse::Fallback(text) => assert_eq!(text, "a  b"),
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[test]
fn test_parseMarkup_withMultipleLines_shouldSeparateWithBr() {
    let MarkupParse::Nodes(nodes) = parse_markup("one\ntwo\nthree") else {
        panic!("plain text should parse");
    };

    assert_eq!(element_names(&nodes), vec!["#one", "br", "#two", "br", "#three"]);
}

#[test]
fn test_parseMarkup_withNestedTags_shouldNestSpans() {
    let MarkupParse::Nodes(nodes) = parse_markup("<b><i>both</i></b>") else {
        panic!("balanced markup should parse");
    };

    let XmlNode::Element(outer) = &nodes[0] else {
        panic!("expected a span");
    };
    assert_eq!(outer.attribute("tts:fontWeight"), Some("bold"));
    let inner = outer.child("span").expect("nested span");
    assert_eq!(inner.attribute("tts:fontStyle"), Some("italic"));
    assert_eq!(inner.text_content(), "both");
}

#[test]
fn test_parseMarkup_withUppercaseTags_shouldStillMap() {
    let MarkupParse::Nodes(nodes) = parse_markup("<I>x</I>") else {
        panic!("balanced markup should parse");
    };

    assert!(matches!(&nodes[0], XmlNode::Element(e) if e.attribute("tts:fontStyle") == Some("italic")));
}

#[test]
fn test_stripAngleBrackets_shouldRemoveEveryBracket() {
    assert_eq!(strip_angle_brackets("<<a>> <b"), "a b");
}
