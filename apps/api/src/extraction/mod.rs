//! Pulls a single JSON object out of model output and repairs the handful of
//! syntax slips the model is known to make. Anything beyond those repairs is a
//! hard failure; values are never guessed.

pub mod repair;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// A decoded model response. The assembler reads it through `document::record::CvRecord`.
pub type StructuredRecord = Value;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The text was never meant to be structured data.
    #[error("response is not a JSON object")]
    NotJsonShaped,

    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

impl ExtractError {
    /// Both failures come from model output the caller can regenerate or edit, so
    /// neither is reported as a server fault.
    pub fn is_client_correctable(&self) -> bool {
        match self {
            ExtractError::NotJsonShaped | ExtractError::MalformedJson(_) => true,
        }
    }
}

/// Extracts the JSON object that makes up the whole of `text`, after trimming
/// and removing a surrounding code fence.
pub fn extract(text: &str) -> Result<StructuredRecord, ExtractError> {
    let body = strip_code_fence(text);
    if !(body.starts_with('{') && body.ends_with('}')) {
        return Err(ExtractError::NotJsonShaped);
    }

    let repaired = repair::repair(body);
    if repaired != body {
        debug!("Applied syntactic repairs to model JSON");
    }

    Ok(serde_json::from_str(&repaired)?)
}

/// Like `extract`, but first cuts the outermost `{ ... }` out of surrounding prose.
pub fn extract_embedded(text: &str) -> Result<StructuredRecord, ExtractError> {
    let body = strip_code_fence(text);
    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => extract(&body[start..=end]),
        _ => Err(ExtractError::NotJsonShaped),
    }
}

/// Strips a ```lang ... ``` fence. The closing fence is optional.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let rest = rest.trim();
    rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trailing_comma_record_parses() {
        let record = extract(r#"{"full_name":"A B","skills":["x","y"],}"#).unwrap();
        assert_eq!(record, json!({"full_name": "A B", "skills": ["x", "y"]}));
    }

    #[test]
    fn test_fenced_json_with_language_tag() {
        let record = extract("```json\n{\"a\": 1}\n```").unwrap();
        assert_eq!(record, json!({"a": 1}));
    }

    #[test]
    fn test_fence_without_tag_or_closing() {
        let record = extract("  ```\n{\"a\": [1, 2,]}  ").unwrap();
        assert_eq!(record, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_plain_prose_is_not_json_shaped() {
        assert!(matches!(
            extract("Not json at all"),
            Err(ExtractError::NotJsonShaped)
        ));
    }

    #[test]
    fn test_array_is_not_json_shaped() {
        assert!(matches!(extract("[1, 2]"), Err(ExtractError::NotJsonShaped)));
    }

    #[test]
    fn test_unrepairable_json_is_malformed() {
        let err = extract(r#"{"a": 1 "b": 2}"#).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedJson(_)));
        assert!(err.to_string().starts_with("malformed JSON"));
    }

    #[test]
    fn test_every_extract_failure_is_client_correctable() {
        for raw in ["Not json at all", "[1, 2]", r#"{"a": 1 "b": 2}"#] {
            let err = extract(raw).unwrap_err();
            assert!(err.is_client_correctable(), "{raw:?} -> {err}");
        }
    }

    #[test]
    fn test_string_content_survives_repair() {
        let record = extract(r#"{"note": "a, ]", "links": [https://x.io/a,]}"#).unwrap();
        assert_eq!(record["note"], "a, ]");
        assert_eq!(record["links"], json!(["https://x.io/a"]));
    }

    #[test]
    fn test_extract_embedded_skips_surrounding_prose() {
        let record =
            extract_embedded("Here you go:\n{\"scholarships\": []}\nHope this helps!").unwrap();
        assert_eq!(record, json!({"scholarships": []}));
        assert!(matches!(
            extract_embedded("no braces here"),
            Err(ExtractError::NotJsonShaped)
        ));
    }
}
