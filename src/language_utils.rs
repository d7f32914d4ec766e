use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for locale tags
///
/// Locale directories are named by a primary ISO 639 code, optionally
/// followed by a region (`zh-CN`, `pt-BR`). This module validates such tags
/// and turns them into the display names used in translation prompts.
/// Language code type
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// ISO 639-2/B codes that differ from their 639-2/T form
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Names that read better in prompts than the ISO reference names.
/// Region-qualified tags are looked up first, then the primary code.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("zh-cn", "Chinese Simplified"),
    ("zh-hans", "Chinese Simplified"),
    ("zh-tw", "Chinese Traditional"),
    ("zh-hk", "Chinese Traditional"),
    ("zh-hant", "Chinese Traditional"),
    ("pt-br", "Brazilian Portuguese"),
    ("pt-pt", "European Portuguese"),
    ("es-419", "Latin American Spanish"),
    ("ms", "Malay"),
    ("ar", "Arabic"),
];

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    // Check for ISO 639-1 (2-letter) code
    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    }
    // Check for ISO 639-2 (3-letter) code
    else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }
        if PART2B_TO_PART2T.iter().any(|(b, _)| *b == normalized_code) {
            return Ok(LanguageCodeType::Part2B);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    // If it's a 2-letter code, convert to 3-letter
    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    }
    // If it's already a 3-letter code, ensure it's ISO 639-2/T
    else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some((_, t)) = PART2B_TO_PART2T.iter().find(|(b, _)| *b == normalized_code) {
            return Ok(t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Primary language subtag of a locale tag: `zh` for `zh-CN`
pub fn primary_subtag(tag: &str) -> &str {
    tag.trim().split(['-', '_']).next().unwrap_or_default()
}

/// Validate a locale tag such as `fr`, `zh-CN` or `pt_BR`.
///
/// The primary subtag must be an ISO 639 code; the remaining subtags must be
/// 2 to 8 ASCII alphanumerics.
pub fn validate_locale_tag(tag: &str) -> Result<()> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(anyhow!("Locale tag cannot be empty"));
    }

    validate_language_code(primary_subtag(tag)).map_err(|_| anyhow!("Invalid locale tag: {}", tag))?;

    let valid_subtags = tag
        .split(['-', '_'])
        .skip(1)
        .all(|s| (2..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()));
    if !valid_subtags {
        return Err(anyhow!("Invalid locale tag: {}", tag));
    }

    Ok(())
}

/// Get the display name of a locale tag
pub fn get_language_name(tag: &str) -> Result<String> {
    let lowered = tag.trim().to_lowercase().replace('_', "-");
    if let Some((_, name)) = DISPLAY_NAMES.iter().find(|(t, _)| *t == lowered) {
        return Ok(name.to_string());
    }

    let primary = primary_subtag(&lowered);
    if let Some((_, name)) = DISPLAY_NAMES.iter().find(|(t, _)| *t == primary) {
        return Ok(name.to_string());
    }

    let normalized = normalize_to_part2t(primary)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Display name of a locale tag, or the tag itself when it is unknown
pub fn display_name_or_tag(tag: &str) -> String {
    get_language_name(tag).unwrap_or_else(|_| tag.to_string())
}
