/*!
 * Tests for `p` element construction through the public writer
 */

use imsc_convert::{ImscConfig, Imsc10, Subtitle};
use crate::common;

#[test]
fn test_toText_withSeveralParagraphs_shouldEmitOneElementEachWithSequentialIds() {
    let imsc = Imsc10::new(ImscConfig::default());
    let subtitle = Subtitle::new(
        (0..5)
            .map(|i| common::paragraph(i * 1000, i * 1000 + 900, &format!("Line {}", i), None, None))
            .collect(),
    );

    let document = common::parse_output(&imsc.to_text(&subtitle, "ids").unwrap());
    let elements = common::paragraph_elements(&document);

    assert_eq!(elements.len(), 5);
    for (i, element) in elements.iter().enumerate() {
        assert_eq!(element.attribute("xml:id"), Some(format!("p{}", i).as_str()));
        assert_eq!(element.text_content(), format!("Line {}", i));
    }
}

#[test]
fn test_toText_withEffectOverlap_shouldRespectAttributePrecedence() {
    let imsc = Imsc10::new(ImscConfig::default());
    let subtitle = Subtitle::new(vec![common::paragraph(
        0,
        1000,
        "x",
        Some("custom"),
        Some("style=custom|region=topLeft|id=zzz"),
    )]);

    let document = common::parse_output(&imsc.to_text(&subtitle, "").unwrap());
    let p = common::paragraph_elements(&document)[0];

    assert_eq!(p.attribute("style"), Some("custom"));
    assert_eq!(p.attribute("region"), Some("topLeft"));
    assert_eq!(p.attribute("xml:id"), Some("p0"));
    assert!(!p.has_attribute("id"));
}

#[test]
fn test_toText_withEmptyStyle_shouldOmitStyleAttribute() {
    let imsc = Imsc10::new(ImscConfig::default());
    let subtitle = Subtitle::new(vec![common::paragraph(0, 1000, "x", Some(""), None)]);

    let document = common::parse_output(&imsc.to_text(&subtitle, "").unwrap());

    assert!(!common::paragraph_elements(&document)[0].has_attribute("style"));
}

#[test]
fn test_toText_withRegionTag_shouldInjectRegionIntoLayoutOnce() {
    let imsc = Imsc10::new(ImscConfig::default());
    let subtitle = Subtitle::new(vec![
        common::paragraph(0, 1000, "{\\an8}one", None, None),
        common::paragraph(1000, 2000, "{\\an8}two", None, None),
    ]);

    let document = common::parse_output(&imsc.to_text(&subtitle, "").unwrap());
    let regions = document.root.descendants("region");

    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].attribute("xml:id"), Some("topCenter"));
    for p in common::paragraph_elements(&document) {
        assert_eq!(p.attribute("region"), Some("topCenter"));
        assert!(!p.text_content().contains("\\an"));
    }
}

#[test]
fn test_toText_withInjectionDisabled_shouldStillEmitRegionAttribute() {
    let config = ImscConfig {
        inject_default_regions: false,
        ..ImscConfig::default()
    };
    let imsc = Imsc10::new(config);
    let subtitle = Subtitle::new(vec![common::paragraph(0, 1000, "{\\an1}x", None, None)]);

    let document = common::parse_output(&imsc.to_text(&subtitle, "").unwrap());

    assert!(document.root.descendants("region").is_empty());
    assert_eq!(common::paragraph_elements(&document)[0].attribute("region"), Some("bottomLeft"));
}

#[test]
fn test_toText_withBrokenMarkup_shouldNotAbortOtherParagraphs() {
    let imsc = Imsc10::new(ImscConfig::default());
    let subtitle = Subtitle::new(vec![
        common::paragraph(0, 1000, "a < b", None, None),
        common::paragraph(1000, 2000, "<i>fine</i>", None, None),
    ]);

    let document = common::parse_output(&imsc.to_text(&subtitle, "").unwrap());
    let elements = common::paragraph_elements(&document);

    assert_eq!(elements[0].text_content(), "a  b");
    assert_eq!(
        elements[1].child("span").and_then(|s| s.attribute("tts:fontStyle")),
        Some("italic")
    );
}
