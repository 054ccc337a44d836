/*!
 * Integration tests for writing IMSC documents and loading them back
 */

use imsc_convert::ttml::namespaces::{IMSC_METADATA_NAMESPACE, IMSC_PARAMETER_NAMESPACE, IMSC_STYLING_NAMESPACE};
use imsc_convert::{ImscConfig, ImscError, Imsc10, Paragraph, Subtitle, TimeCodeFormat};
use crate::common;

fn write_and_load(imsc: &Imsc10, subtitle: &Subtitle) -> Subtitle {
    let xml = imsc.to_text(subtitle, "Round trip").unwrap();
    imsc.load_subtitle(&xml, "roundtrip.xml").unwrap()
}

#[test]
fn test_roundTrip_withPlainParagraph_shouldReproduceTextAndFlag() {
    let imsc = Imsc10::new(ImscConfig::default());
    let subtitle = Subtitle::new(vec![Paragraph::new(0, 1000, "Hello")]);

    let loaded = write_and_load(&imsc, &subtitle);

    assert_eq!(loaded.paragraphs.len(), 1);
    let p = &loaded.paragraphs[0];
    assert_eq!(p.text, "Hello");
    assert_eq!(p.start_time_ms, 0);
    assert_eq!(p.end_time_ms, 1000);
    assert!(!p.forced);
}

#[test]
fn test_roundTrip_withForcedFlag_shouldSurvive() {
    let imsc = Imsc10::new(ImscConfig::default());
    let mut forced = Paragraph::new(0, 1000, "Forced");
    forced.forced = true;
    let normal = Paragraph::new(1000, 2000, "Normal");

    let xml = imsc.to_text(&Subtitle::new(vec![forced, normal]), "").unwrap();
    let document = common::parse_output(&xml);
    let elements = common::paragraph_elements(&document);
    assert_eq!(elements[0].attribute("itts:forcedDisplay"), Some("true"));
    assert!(!elements[1].has_attribute("itts:forcedDisplay"));

    let loaded = imsc.load_subtitle(&xml, "forced.xml").unwrap();
    assert!(loaded.paragraphs[0].forced);
    assert!(!loaded.paragraphs[1].forced);
}

#[test]
fn test_roundTrip_withMarkupAndLines_shouldRestoreDialect() {
    let imsc = Imsc10::new(ImscConfig::default());
    let subtitle = Subtitle::new(vec![Paragraph::new(0, 1000, "<i>Hello</i>\n<b>World</b>")]);

    let loaded = write_and_load(&imsc, &subtitle);

    assert_eq!(loaded.paragraphs[0].text, "<i>Hello</i>\n<b>World</b>");
}

#[test]
fn test_roundTrip_withEffects_shouldKeepRegionAndStyling() {
    let imsc = Imsc10::new(ImscConfig::default());
    let subtitle = Subtitle::new(vec![common::paragraph(
        0,
        1000,
        "x",
        Some("s1"),
        Some("region=bottomCenter|tts:color=yellow"),
    )]);

    let loaded = write_and_load(&imsc, &subtitle);
    let p = &loaded.paragraphs[0];

    assert_eq!(p.style.as_deref(), Some("s1"));
    assert_eq!(p.get_effect("region").as_deref(), Some("bottomCenter"));
    assert_eq!(p.get_effect("tts:color").as_deref(), Some("yellow"));
}

#[test]
fn test_roundTrip_withEachTimeCodeFormat_shouldKeepTiming() {
    for format in [
        TimeCodeFormat::Clock,
        TimeCodeFormat::Seconds,
        TimeCodeFormat::Milliseconds,
        TimeCodeFormat::Ticks,
    ] {
        let config = ImscConfig {
            time_code_format: format,
            ..ImscConfig::default()
        };
        let imsc = Imsc10::new(config);
        let subtitle = Subtitle::new(vec![Paragraph::new(3_723_456, 3_725_000, "t")]);

        let loaded = write_and_load(&imsc, &subtitle);

        assert_eq!(loaded.paragraphs[0].start_time_ms, 3_723_456, "format {:?}", format);
        assert_eq!(loaded.paragraphs[0].end_time_ms, 3_725_000, "format {:?}", format);
    }
}

#[test]
fn test_toText_shouldDeclareProfileNamespaces() {
    let imsc = Imsc10::new(ImscConfig::default());

    let xml = imsc.to_text(&Subtitle::default(), "").unwrap();
    let root = common::parse_output(&xml).root;

    assert_eq!(root.name, "tt");
    assert_eq!(root.attribute("xmlns"), Some("http://www.w3.org/ns/ttml"));
    assert_eq!(root.attribute("xmlns:ttm"), Some("http://www.w3.org/ns/ttml#metadata"));
    assert_eq!(root.attribute("xmlns:tts"), Some("http://www.w3.org/ns/ttml#styling"));
    assert_eq!(root.attribute("xmlns:ttp"), Some("http://www.w3.org/ns/ttml#parameter"));
    assert_eq!(root.attribute("xmlns:itts"), Some(IMSC_STYLING_NAMESPACE));
    assert_eq!(root.attribute("xmlns:ittp"), Some(IMSC_PARAMETER_NAMESPACE));
    assert_eq!(root.attribute("xmlns:ittm"), Some(IMSC_METADATA_NAMESPACE));
    assert_eq!(root.attribute("xml:lang"), Some("en"));
}

#[test]
fn test_loadSubtitle_withNonTtRoot_shouldFailWithHeaderImport() {
    let imsc = Imsc10::new(ImscConfig::default());

    let result = imsc.load_subtitle("<html><body><p>x</p></body></html>", "page.html");

    assert!(matches!(result, Err(ImscError::HeaderImport(_))));
}

#[test]
fn test_loadSubtitle_withThirdPartyDocument_shouldReadDurAndFrames() {
    let imsc = Imsc10::new(ImscConfig::default());
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<tt xmlns="http://www.w3.org/ns/ttml" xmlns:ttp="http://www.w3.org/ns/ttml#parameter"
    xmlns:itts="http://www.w3.org/ns/ttml/profile/imsc1#styling" ttp:frameRate="24" xml:lang="fr">
  <body>
    <div>
      <p begin="00:00:01:12" dur="2s" itts:forcedDisplay="true">Bonjour
        le monde</p>
    </div>
  </body>
</tt>"#;

    let subtitle = imsc.load_subtitle(xml, "third_party.xml").unwrap();
    let p = &subtitle.paragraphs[0];

    assert_eq!(p.start_time_ms, 1_500);
    assert_eq!(p.end_time_ms, 3_500);
    assert_eq!(p.text, "Bonjour le monde");
    assert!(p.forced);
    assert_eq!(imsc.extra_summary(p), "- / - / y");
}

#[test]
fn test_roundTrip_withNonBreakingSpaces_shouldKeepThem() {
    let imsc = Imsc10::new(ImscConfig::default());
    let subtitle = Subtitle::new(vec![Paragraph::new(0, 1000, "Quoi\u{00A0}?\n\u{00A0}<i>Oui\u{00A0}!</i>")]);

    let loaded = write_and_load(&imsc, &subtitle);

    assert_eq!(loaded.paragraphs[0].text, "Quoi\u{00A0}?\n\u{00A0}<i>Oui\u{00A0}!</i>");
}

#[test]
fn test_loadSubtitle_withOutOfRangeTimes_shouldSkipThoseParagraphs() {
    common::init_logging();
    let imsc = Imsc10::new(ImscConfig::default());
    let xml = r#"<tt xmlns="http://www.w3.org/ns/ttml"><body><div>
  <p begin="9999999999999:00:00.000" end="9999999999999:00:01.000">clock</p>
  <p begin="1s" dur="99999999999999999999999s">dur</p>
  <p begin="2s" end="3s">kept</p>
</div></body></tt>"#;

    let subtitle = imsc.load_subtitle(xml, "huge.xml").unwrap();

    assert_eq!(subtitle.paragraphs.len(), 1);
    assert_eq!(subtitle.paragraphs[0].text, "kept");
}
