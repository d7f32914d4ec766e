/*!
 * Provider response extraction.
 *
 * LLM output is rarely clean JSON. It may be wrapped in a fenced code block,
 * surrounded by prose, or contain raw line breaks inside string literals.
 * This module turns such text into a `serde_json::Value`.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::TranslationError;

// Lazy match so the first closing fence ends the block
static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?i:json)\s*(.*?)\s*```").expect("fenced block regex is valid"));

/// Parse the JSON document carried by a provider response.
///
/// Candidates are tried in order: the interior of a ```` ```json ```` block,
/// the span from the first `{` to the last `}`, then the whole response.
/// Each one is sanitized with [`clean_json_string`]; the first that parses
/// wins.
pub fn extract_json_from_response(response: &str) -> Result<Value, TranslationError> {
    let mut reason = String::from("no JSON candidate found");

    for (label, candidate) in json_candidates(response) {
        let cleaned = clean_json_string(candidate);
        if cleaned.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(&cleaned) {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!("Candidate '{}' did not parse: {}", label, e);
                reason = format!("{}: {}", label, e);
            }
        }
    }

    Err(TranslationError::MalformedProviderResponse {
        raw: response.to_string(),
        reason,
    })
}

fn json_candidates(response: &str) -> Vec<(&'static str, &str)> {
    let mut candidates = Vec::with_capacity(3);

    if let Some(inner) = FENCED_JSON.captures(response).and_then(|c| c.get(1)) {
        candidates.push(("fenced block", inner.as_str()));
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if start < end {
            candidates.push(("brace span", &response[start..=end]));
        }
    }

    candidates.push(("whole response", response));
    candidates
}

fn is_stripped_control(c: char) -> bool {
    matches!(
        c,
        '\u{0000}'..='\u{0008}' | '\u{000B}' | '\u{000C}' | '\u{000E}'..='\u{001F}' | '\u{007F}'..='\u{009F}'
    )
}

/// Make a JSON-ish candidate strictly parseable.
///
/// Control characters other than tab, line feed and carriage return are
/// dropped and the text is trimmed. Then a scan over the text escapes raw
/// `\n`, `\r` and `\t` that appear inside string literals. A raw line break
/// right after a backslash becomes the escape letter, so `\` followed by a
/// newline reads as `\n`.
pub fn clean_json_string(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| !is_stripped_control(*c)).collect();
    let trimmed = stripped.trim();

    let mut result = String::with_capacity(trimmed.len() + 16);
    let mut in_string = false;
    let mut escaped = false;

    for ch in trimmed.chars() {
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            result.push(ch);
            continue;
        }

        if escaped {
            escaped = false;
            match ch {
                '\n' => result.push('n'),
                '\r' => result.push('r'),
                '\t' => result.push('t'),
                other => result.push(other),
            }
            continue;
        }

        match ch {
            '\\' => {
                escaped = true;
                result.push(ch);
            }
            '"' => {
                in_string = false;
                result.push(ch);
            }
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            other => result.push(other),
        }
    }

    result
}
