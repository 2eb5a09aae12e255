//! Best-effort JSON recovery from model output.
//!
//! Models wrap their JSON in prose, code fences, and the occasional
//! trailing comma. The repair pass runs once per response: locate the
//! object, strip fences and trailing commas, and re-attempt the parse.
//! A response that still does not parse is malformed output.

use serde::de::DeserializeOwned;

use crate::ports::ProviderError;

/// Parses a model response into `T`, repairing the text when the direct
/// parse fails.
pub fn repair_and_parse<T: DeserializeOwned>(response: &str) -> Result<T, ProviderError> {
    if let Ok(parsed) = serde_json::from_str::<T>(response.trim()) {
        return Ok(parsed);
    }

    let candidate = extract_json(response)
        .ok_or_else(|| ProviderError::Malformed("no JSON object found in response".to_string()))?;

    serde_json::from_str::<T>(&candidate)
        .or_else(|_| serde_json::from_str::<T>(&strip_trailing_commas(&candidate)))
        .map_err(|e| ProviderError::Malformed(e.to_string()))
}

/// Locates the JSON object in a response: fenced block first, then the
/// first balanced `{…}` span.
fn extract_json(response: &str) -> Option<String> {
    let trimmed = response.trim();

    if let Some(fenced) = extract_from_code_block(trimmed) {
        return Some(fenced);
    }

    let start = trimmed.find('{')?;
    extract_balanced_object(trimmed, start)
}

/// Pulls the content of a ```json … ``` or ``` … ``` block.
fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let json_start = start + pattern.len();
            if let Some(end) = s[json_start..].find("```") {
                return Some(s[json_start..json_start + end].trim().to_string());
            }
        }
    }
    None
}

/// Scans for the balanced object starting at `start`, respecting strings
/// and escapes.
fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Removes commas directly preceding a closing brace or bracket.
fn strip_trailing_commas(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escape_next = false;
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if escape_next {
            escape_next = false;
            result.push(c);
            continue;
        }
        match c {
            '\\' if in_string => {
                escape_next = true;
                result.push(c);
            }
            '"' => {
                in_string = !in_string;
                result.push(c);
            }
            ',' if !in_string => {
                // drop the comma when the next non-whitespace closes a scope
                let closes_next = chars[i + 1..]
                    .iter()
                    .find(|ch| !ch.is_whitespace())
                    .map(|ch| *ch == '}' || *ch == ']')
                    .unwrap_or(false);
                if !closes_next {
                    result.push(c);
                }
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AuditPayload;

    #[test]
    fn parses_clean_json_directly() {
        let payload: AuditPayload =
            repair_and_parse(r#"{"summary": "Litige salarial"}"#).unwrap();
        assert_eq!(payload.summary.as_deref(), Some("Litige salarial"));
    }

    #[test]
    fn parses_json_inside_code_fence() {
        let response = "Voici l'analyse :\n\n```json\n{\"summary\": \"ok\"}\n```\n\nBonne journée.";
        let payload: AuditPayload = repair_and_parse(response).unwrap();
        assert_eq!(payload.summary.as_deref(), Some("ok"));
    }

    #[test]
    fn parses_json_surrounded_by_prose() {
        let response = "D'après les éléments fournis {\"summary\": \"ok\", \"category\": \"Droit du travail\"} comme demandé.";
        let payload: AuditPayload = repair_and_parse(response).unwrap();
        assert_eq!(payload.category.as_deref(), Some("Droit du travail"));
    }

    #[test]
    fn repairs_trailing_commas() {
        let response = r#"{"summary": "ok", "actions": ["a", "b",],}"#;
        let payload: AuditPayload = repair_and_parse(response).unwrap();
        assert_eq!(payload.summary.as_deref(), Some("ok"));
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_the_scan() {
        let response = r#"note: {"summary": "utilise {placeholders} avec soin"} fin"#;
        let payload: AuditPayload = repair_and_parse(response).unwrap();
        assert_eq!(
            payload.summary.as_deref(),
            Some("utilise {placeholders} avec soin")
        );
    }

    #[test]
    fn pure_prose_is_malformed() {
        let err = repair_and_parse::<AuditPayload>("Je ne peux pas répondre en JSON.").unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn unbalanced_object_is_malformed() {
        let err = repair_and_parse::<AuditPayload>(r#"{"summary": "tronqué"#).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }
}
