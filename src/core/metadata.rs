//! core/metadata.rs
//!
//! The JSON blob that lives inside an mp3 comment frame.
//!
//! A comment may carry free text before the JSON (`"archived 2024 {...}"`).
//! We keep that prefix so a save writes it back unchanged.

use serde_json::{Map, Value};
use tracing::debug;

use super::error::{Error, Result};

/// A comment split into its leading text and the JSON it carried.
#[derive(Debug)]
pub struct CommentBlob {
    pub prefix: String,
    pub parsed: Result<Map<String, Value>>,
}

/// Find the `{ ... }` span in a comment (first `{` to last `}`).
/// Returns None when the comment has no braces at all.
pub fn extract_from_comment(text: &str) -> Option<CommentBlob> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    let prefix = text[..start].to_string();
    let parsed = parse_object(&text[start..=end]);
    Some(CommentBlob { prefix, parsed })
}

/// Parse text as a JSON object.
///
/// Comments written by older tools sometimes use single quotes; if strict
/// parsing fails we retry once with `'` replaced by `"` and report the
/// first error when that fails too.
pub fn parse_object(text: &str) -> Result<Map<String, Value>> {
    let strict = serde_json::from_str::<Value>(text);
    let value = match strict {
        Ok(v) => v,
        Err(e) => match serde_json::from_str::<Value>(&text.replace('\'', "\"")) {
            Ok(v) => {
                debug!("comment JSON parsed after quote repair");
                v
            }
            Err(_) => return Err(Error::Json(e)),
        },
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::NotAnObject(kind_name(&other))),
    }
}

/// Validate editor text and build the full comment to store.
///
/// Returns `(comment_text, parsed_object)`. The comment is compact JSON with
/// non-ASCII kept as-is, preceded by `prefix`.
pub fn prepare_for_save(editor_text: &str, prefix: &str) -> Result<(String, Map<String, Value>)> {
    let map = parse_object(editor_text.trim())?;
    let json = serde_json::to_string(&map)?;
    Ok((format!("{prefix}{json}"), map))
}

/// Pretty form shown in the JSON editor.
pub fn to_pretty(map: &Map<String, Value>) -> String {
    serde_json::to_string_pretty(map).unwrap_or_else(|_| "{}".to_string())
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_after_prefix() {
        let blob = extract_from_comment(r#"ved archive {"Title": "A", "Version": 2}"#).unwrap();
        assert_eq!(blob.prefix, "ved archive ");
        let map = blob.parsed.unwrap();
        assert_eq!(map["Title"], "A");
        assert_eq!(map["Version"], 2);
    }

    #[test]
    fn plain_comment_has_no_blob() {
        assert!(extract_from_comment("just a comment").is_none());
        assert!(extract_from_comment("} backwards {").is_none());
    }

    #[test]
    fn single_quotes_are_repaired() {
        let map = parse_object("{'Title': 'B'}").unwrap();
        assert_eq!(map["Title"], "B");
    }

    #[test]
    fn malformed_json_reports_error() {
        let blob = extract_from_comment(r#"{"Title": "A",}"#).unwrap();
        assert!(matches!(blob.parsed, Err(Error::Json(_))));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(parse_object("[1, 2]"), Err(Error::NotAnObject("an array"))));
    }

    #[test]
    fn prepare_keeps_prefix_and_unicode() {
        let (comment, map) = prepare_for_save("{\n  \"Title\": \"Ünïcode\"\n}", "pre ").unwrap();
        assert_eq!(comment, "pre {\"Title\":\"Ünïcode\"}");
        assert_eq!(map.len(), 1);
    }
}
