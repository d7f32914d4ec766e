/*!
 * Tests for language utility functions
 */

use anyhow::Result;

use localesync::language_utils::{
    LanguageCodeType, display_name_or_tag, get_language_name, normalize_to_part2t, primary_subtag,
    validate_language_code, validate_locale_tag,
};

#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() -> Result<()> {
    assert!(matches!(validate_language_code("en")?, LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("FR")?, LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("jpn")?, LanguageCodeType::Part2T));
    assert!(matches!(validate_language_code("fre")?, LanguageCodeType::Part2B));

    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("english").is_err());
    Ok(())
}

#[test]
fn test_normalize_to_part2t_withValidCodes_shouldNormalizeCorrectly() -> Result<()> {
    assert_eq!(normalize_to_part2t("ja")?, "jpn");
    assert_eq!(normalize_to_part2t("deu")?, "deu");
    assert_eq!(normalize_to_part2t("ger")?, "deu");
    assert!(normalize_to_part2t("").is_err());
    Ok(())
}

#[test]
fn test_validate_locale_tag_withRegionTags_shouldAcceptThem() {
    assert!(validate_locale_tag("ja").is_ok());
    assert!(validate_locale_tag("zh-CN").is_ok());
    assert!(validate_locale_tag("pt_BR").is_ok());
    assert!(validate_locale_tag("es-419").is_ok());

    assert!(validate_locale_tag("").is_err());
    assert!(validate_locale_tag("zz-CN").is_err());
    assert!(validate_locale_tag("zh-").is_err());
    assert!(validate_locale_tag("zh-C!").is_err());
}

#[test]
fn test_primary_subtag_shouldStripRegion() {
    assert_eq!(primary_subtag("zh-TW"), "zh");
    assert_eq!(primary_subtag("pt_BR"), "pt");
    assert_eq!(primary_subtag("ko"), "ko");
}

#[test]
fn test_get_language_name_withValidCodes_shouldReturnCorrectName() -> Result<()> {
    assert_eq!(get_language_name("ja")?, "Japanese");
    assert_eq!(get_language_name("fr")?, "French");
    assert_eq!(get_language_name("zh-CN")?, "Chinese Simplified");
    assert_eq!(get_language_name("zh_tw")?, "Chinese Traditional");
    assert_eq!(get_language_name("pt-BR")?, "Brazilian Portuguese");
    // Unlisted regions fall back to the language
    assert_eq!(get_language_name("fr-CA")?, "French");
    Ok(())
}

#[test]
fn test_display_name_or_tag_withUnknownTag_shouldReturnTag() {
    assert_eq!(display_name_or_tag("ko"), "Korean");
    assert_eq!(display_name_or_tag("qq-XX"), "qq-XX");
}
