/*!
 * Tests for language code utilities
 */

use imsc_convert::language_utils::{
    get_language_name, normalize_to_part1_or_part2t, primary_subtag, validate_language_code, LanguageCodeType,
};

#[test]
fn test_primarySubtag_withRegionSubtag_shouldReturnLowercasePrimary() {
    assert_eq!(primary_subtag("pt-BR"), "pt");
    assert_eq!(primary_subtag("EN_us"), "en");
    assert_eq!(primary_subtag("fr"), "fr");
}

#[test]
fn test_validateLanguageCode_withValidCodes_shouldReturnType() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("fra").unwrap(), LanguageCodeType::Part2T);
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("xx").is_err());
}

#[test]
fn test_normalize_withThreeLetterCode_shouldPreferTwoLetters() {
    assert_eq!(normalize_to_part1_or_part2t("deu").unwrap(), "de");
    assert_eq!(normalize_to_part1_or_part2t("en").unwrap(), "en");
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fr-CA").unwrap(), "French");
}
