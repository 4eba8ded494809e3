//! Lenient JSON extraction from model output
//!
//! Models asked for JSON still wrap it in markdown fences now and then, or
//! ignore the instruction entirely. Callers only ever want an array, so
//! anything unparseable becomes `[]`.

use serde_json::Value;

/// Remove a leading (optionally language-tagged) code fence and a trailing
/// fence, if present. Text without fences is only trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        // Drop the info string (e.g. `json`) up to the end of the fence line
        body = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

/// Parse a model response into JSON, falling back to an empty array.
pub fn parse_json(text: &str) -> Value {
    serde_json::from_str(strip_code_fences(text)).unwrap_or_else(|_| Value::Array(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use serde_json::json;

    #[test]
    fn test_plain_array() {
        assert_eq!(parse_json(r#"["a", "b"]"#), json!(["a", "b"]));
    }

    #[test]
    fn test_fenced_with_language_tag() {
        let text = "```json\n[\"Section 1\", \"Section 2\"]\n```";
        assert_eq!(parse_json(text), json!(["Section 1", "Section 2"]));
    }

    #[test]
    fn test_fenced_without_language_tag() {
        let text = "```\n[1, 2, 3]\n```\n";
        assert_eq!(parse_json(text), json!([1, 2, 3]));
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(parse_json("```json[\"x\"]```"), json!(["x"]));
    }

    #[test]
    fn test_garbage_becomes_empty_array() {
        assert_eq!(parse_json("Sure! Here are the sections:"), json!([]));
        assert_eq!(parse_json(""), json!([]));
        assert_eq!(parse_json("```json\n[\"unterminated\"\n```"), json!([]));
    }

    #[test]
    fn test_non_array_json_is_returned_as_is() {
        assert_eq!(parse_json(r#"{"sections": []}"#), json!({"sections": []}));
    }

    #[quickcheck]
    fn prop_string_arrays_round_trip(items: Vec<String>) -> bool {
        let text = serde_json::to_string(&items).unwrap();
        parse_json(&text) == json!(items)
    }

    #[quickcheck]
    fn prop_fenced_equals_unfenced(items: Vec<i64>) -> bool {
        let text = serde_json::to_string(&items).unwrap();
        let fenced = format!("```json\n{}\n```", text);
        parse_json(&fenced) == parse_json(&text)
    }

    #[quickcheck]
    fn prop_never_panics(text: String) -> bool {
        let value = parse_json(&text);
        // Either something parsed or the empty-array fallback
        value.is_array() || serde_json::from_str::<Value>(strip_code_fences(&text)).is_ok()
    }
}
