// File: crates/plotish-core/src/document.rs
// Summary: JSON document access with the default-on-missing policy and load-time options.

use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

/// A raw JSON object (dataset, figure or line).
pub type Object = Map<String, JsonValue>;

/// Switches that relax or tighten how documents are interpreted.
/// `Default` reproduces the historical document semantics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Also enable `zlabel` when `second_axe` is a JSON `true`, not only the string `"true"`.
    pub accept_bool_second_axe: bool,
    /// Reject lines whose non-empty `xdata` differs in length from `ydata` at load time.
    pub require_matching_lengths: bool,
}

/// Read and parse the document at `path` into its top-level object.
pub fn read_document(path: &Path) -> Result<Object> {
    if !path.exists() {
        return Err(Error::NotFound { path: path.to_path_buf() });
    }
    let text = std::fs::read_to_string(path)?;
    // Non-object documents fail here too, keeping the path.
    serde_json::from_str::<Object>(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse document text into its top-level object.
pub fn parse_document(text: &str) -> Result<Object> {
    let root: JsonValue =
        serde_json::from_str(text).map_err(|e| Error::ParseStr(e.to_string()))?;
    into_object(root)
}

fn into_object(root: JsonValue) -> Result<Object> {
    match root {
        JsonValue::Object(obj) => Ok(obj),
        other => Err(Error::ParseStr(format!(
            "top-level document must be an object, found {}",
            kind(&other)
        ))),
    }
}

/// Look up `key`, treating an explicit `null` the same as a missing key.
pub(crate) fn get<'a>(obj: &'a Object, key: &str) -> Option<&'a JsonValue> {
    obj.get(key).filter(|v| !v.is_null())
}

pub(crate) fn string_or(obj: &Object, key: &str, default: &str) -> Result<String> {
    Ok(opt_string(obj, key)?.unwrap_or_else(|| default.to_string()))
}

pub(crate) fn opt_string(obj: &Object, key: &str) -> Result<Option<String>> {
    match get(obj, key) {
        None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::validation(format!(
            "field '{key}' must be a string, found {}",
            kind(other)
        ))),
    }
}

pub(crate) fn opt_array<'a>(obj: &'a Object, key: &str) -> Result<Option<&'a Vec<JsonValue>>> {
    match get(obj, key) {
        None => Ok(None),
        Some(JsonValue::Array(items)) => Ok(Some(items)),
        Some(other) => Err(Error::validation(format!(
            "field '{key}' must be an array, found {}",
            kind(other)
        ))),
    }
}

pub(crate) fn as_object<'a>(value: &'a JsonValue, what: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| Error::validation(format!("{what} must be an object, found {}", kind(value))))
}

/// Coerce a JSON array into numbers. `null` elements become NaN (a gap when drawn).
pub(crate) fn numbers(items: &[JsonValue], key: &str) -> Result<Vec<f64>> {
    items
        .iter()
        .enumerate()
        .map(|(j, v)| match v {
            JsonValue::Null => Ok(f64::NAN),
            JsonValue::Number(n) => n
                .as_f64()
                .ok_or_else(|| Error::validation(format!("{key}[{j}] is out of range"))),
            other => Err(Error::validation(format!(
                "{key}[{j}] is not a number (found {})",
                kind(other)
            ))),
        })
        .collect()
}

fn kind(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_counts_as_missing() {
        let obj = parse_document(r#"{"title": null}"#).unwrap();
        assert_eq!(string_or(&obj, "title", "dflt").unwrap(), "dflt");
    }

    #[test]
    fn wrong_type_is_a_validation_error() {
        let obj = parse_document(r#"{"title": 3}"#).unwrap();
        assert!(matches!(opt_string(&obj, "title"), Err(Error::Validation(_))));
    }

    #[test]
    fn numbers_map_nulls_to_nan() {
        let v: Vec<JsonValue> = serde_json::from_str("[1, null, 2.5]").unwrap();
        let out = numbers(&v, "ydata").unwrap();
        assert_eq!(out[0], 1.0);
        assert!(out[1].is_nan());
        assert_eq!(out[2], 2.5);
    }

    #[test]
    fn top_level_array_is_a_parse_error() {
        assert!(matches!(parse_document("[1, 2]"), Err(Error::ParseStr(_))));
        assert!(matches!(parse_document("{"), Err(Error::ParseStr(_))));
    }
}
