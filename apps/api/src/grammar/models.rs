use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One flagged span returned by the grammar checker.
///
/// Offsets are UTF-16 code unit indices into the checked text, `end`
/// exclusive. They come from the model and are not trusted: they may be
/// missing, fractional, negative, reversed, overlapping or past the end of the
/// text. Unusable offsets deserialize to `None` and the highlighter skips them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarError {
    #[serde(default, deserialize_with = "lenient_text")]
    pub word: String,
    #[serde(default, deserialize_with = "lenient_offset")]
    pub start_index: Option<i64>,
    #[serde(default, deserialize_with = "lenient_offset")]
    pub end_index: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub suggestion: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reason: String,
}

/// Wire shape of a grammar check: `{"errors": [...]}`.
///
/// Entries that are not objects are dropped; one malformed entry never
/// discards the rest of the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarCheckResult {
    #[serde(default, deserialize_with = "lenient_errors")]
    pub errors: Vec<GrammarError>,
}

fn lenient_offset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let offset = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(offset)
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_errors<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<GrammarError>, D::Error> {
    let entries = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(entries)) => entries,
        _ => return Ok(Vec::new()),
    };
    Ok(entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case_offsets() {
        let json = r#"{"errors": [{"word": "teh", "startIndex": 4, "endIndex": 7, "suggestion": "the", "reason": "Spelling"}]}"#;
        let result: GrammarCheckResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].start_index, Some(4));
        assert_eq!(result.errors[0].end_index, Some(7));
        assert_eq!(result.errors[0].suggestion, "the");
    }

    #[test]
    fn test_missing_errors_field_means_none() {
        let result: GrammarCheckResult = serde_json::from_str("{}").unwrap();
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_optional_text_fields_default() {
        let json = r#"{"errors": [{"startIndex": 0, "endIndex": 2}]}"#;
        let result: GrammarCheckResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.errors[0].suggestion, "");
        assert_eq!(result.errors[0].reason, "");
    }

    #[test]
    fn test_unusable_offsets_become_none() {
        let json = r#"{"errors": [
            {"word": "teh", "startIndex": null, "endIndex": 3},
            {"word": "cat", "startIndex": 4.5, "endIndex": "7"},
            {"word": "mat", "startIndex": 8.0},
            {"word": null, "suggestion": 7}
        ]}"#;
        let result: GrammarCheckResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.errors.len(), 4);
        assert_eq!(result.errors[0].start_index, None);
        assert_eq!(result.errors[0].end_index, Some(3));
        assert_eq!(result.errors[1].start_index, None);
        assert_eq!(result.errors[1].end_index, Some(7));
        assert_eq!(result.errors[2].start_index, Some(8));
        assert_eq!(result.errors[2].end_index, None);
        assert_eq!(result.errors[3].word, "");
        assert_eq!(result.errors[3].suggestion, "7");
    }

    #[test]
    fn test_non_object_entries_dropped() {
        let json = r#"{"errors": ["teh", 4, {"word": "teh", "startIndex": 0, "endIndex": 3}]}"#;
        let result: GrammarCheckResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].word, "teh");

        let result: GrammarCheckResult = serde_json::from_str(r#"{"errors": null}"#).unwrap();
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let err = GrammarError {
            word: "a".into(),
            start_index: Some(1),
            end_index: Some(2),
            suggestion: "an".into(),
            reason: "Article".into(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["startIndex"], 1);
        assert_eq!(json["endIndex"], 2);
    }
}
