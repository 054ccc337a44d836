/*!
 * Tests for the effect string codec
 */

use imsc_convert::imsc::effects::{decode, encode, EffectMap};
use imsc_convert::Paragraph;

#[test]
fn test_decode_withEncodedMap_shouldRoundTrip() {
    let map: EffectMap = vec![
        ("region", "topLeft"),
        ("tts:color", "#ffffff"),
        ("itts:forcedDisplay", "true"),
        ("tts:fontSize", "120%"),
    ]
    .into_iter()
    .collect();

    assert_eq!(decode(&encode(&map)), map);
}

#[test]
fn test_decode_withMalformedEntries_shouldDropOnlyThoseEntries() {
    let map = decode("a=b=c|noequals|=value|key=|good=1");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get("good"), Some("1"));
}

#[test]
fn test_decode_withEmptyString_shouldBeEmpty() {
    assert!(decode("").is_empty());
    assert!(decode("|||").is_empty());
}

#[test]
fn test_decode_withDuplicateKey_shouldKeepLastValueAtFirstPosition() {
    let map = decode("a=1|b=2|a=3");

    let entries: Vec<(&str, &str)> = map.iter().collect();
    assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
}

#[test]
fn test_paragraphEffects_withSetAndRemove_shouldReencode() {
    let mut paragraph = Paragraph::new(0, 1000, "x");

    paragraph.set_effect("region", "topLeft");
    paragraph.set_effect("tts:color", "red");
    assert_eq!(paragraph.effect.as_deref(), Some("region=topLeft|tts:color=red"));

    paragraph.set_effect("region", "");
    paragraph.set_effect("tts:color", "");
    assert_eq!(paragraph.effect, None);
}
