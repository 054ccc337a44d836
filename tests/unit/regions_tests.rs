/*!
 * Tests for legacy region tags
 */

use imsc_convert::imsc::regions::{
    extract_legacy_region_tag, has_legacy_region_tag, map_tag_to_region_name, strip_legacy_region_tag,
    REGION_NAMES,
};

#[test]
fn test_mapTagToRegionName_withKnownTags_shouldReturnFixedNames() {
    assert_eq!(map_tag_to_region_name("{\\an5}"), "centerCenter");
    assert_eq!(map_tag_to_region_name("{\\an1}"), "bottomLeft");
    assert_eq!(map_tag_to_region_name("{\\an3}"), "bottomRight");
}

#[test]
fn test_mapTagToRegionName_withUnmatchedInput_shouldReturnEmpty() {
    assert_eq!(map_tag_to_region_name("{\\pos(10,10)}"), "");
    assert_eq!(map_tag_to_region_name("hello"), "");
}

#[test]
fn test_mapTagToRegionName_shouldCoverAllNineRegions() {
    for (i, name) in REGION_NAMES.iter().enumerate() {
        let tag = format!("{{\\an{}}}", i + 1);
        assert_eq!(map_tag_to_region_name(&tag), *name);
    }
}

#[test]
fn test_stripLegacyRegionTag_withMarkupAfterTag_shouldKeepMarkup() {
    let text = "{\\an7}<i>Top left</i>";

    assert!(has_legacy_region_tag(text));
    assert_eq!(extract_legacy_region_tag(text), "{\\an7}");
    assert_eq!(strip_legacy_region_tag(text), "<i>Top left</i>");
}

#[test]
fn test_extractLegacyRegionTag_withoutTag_shouldReturnEmpty() {
    assert!(!has_legacy_region_tag("plain"));
    assert_eq!(extract_legacy_region_tag("plain"), "");
}
