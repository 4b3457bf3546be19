use serde_json::Value;

use crate::errors::AppError;

/// Returns the field as a string when it is a non-blank JSON string.
///
/// Missing fields, non-string values and whitespace-only strings are all
/// rejected with `message` as a 400, before any upstream call is made.
pub fn require_text<'a>(value: Option<&'a Value>, message: &str) -> Result<&'a str, AppError> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}
