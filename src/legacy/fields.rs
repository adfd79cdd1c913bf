//! Field helpers shared by the legacy schemas
//!
//! Attribute paths use `.` as separator, so `custom_fields.journal:journal.title`
//! resolves `custom_fields` -> `journal:journal` -> `title`.

use serde_json::{Map, Value};

/// Resolve a dotted attribute path
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
        .filter(|v| !v.is_null())
}

/// Remove control characters (except tab, newline and carriage return) and
/// trim surrounding whitespace
pub fn sanitize_unicode(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// String form of a scalar JSON value
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Sanitized string at `path`, if present
pub fn sanitized(value: &Value, path: &str) -> Option<String> {
    get_path(value, path)
        .and_then(scalar_string)
        .map(|s| sanitize_unicode(&s))
}

/// Plain string at `path`, if present
pub fn string(value: &Value, path: &str) -> Option<String> {
    get_path(value, path).and_then(scalar_string)
}

/// Integer at `path`, accepting numeric strings
pub fn integer(value: &Value, path: &str) -> Option<i64> {
    match get_path(value, path)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Array at `path`, empty when absent
pub fn array<'a>(value: &'a Value, path: &str) -> &'a [Value] {
    get_path(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Insert `key` only when a value is present
pub fn insert_opt<V: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_path_with_namespaced_keys() {
        let record = json!({
            "custom_fields": {"journal:journal": {"title": "Nature", "issue": null}}
        });
        assert_eq!(
            get_path(&record, "custom_fields.journal:journal.title"),
            Some(&json!("Nature"))
        );
        assert_eq!(get_path(&record, "custom_fields.journal:journal.issue"), None);
        assert_eq!(get_path(&record, "custom_fields.meeting:meeting.title"), None);
    }

    #[test]
    fn test_sanitize_unicode() {
        assert_eq!(sanitize_unicode("  a\u{0}b\u{7}c\n d \t"), "abc\n d");
        assert_eq!(sanitize_unicode("\u{1b}[0m"), "[0m");
    }

    #[test]
    fn test_integer_from_string() {
        let record = json!({"id": "1234", "bad": "12a"});
        assert_eq!(integer(&record, "id"), Some(1234));
        assert_eq!(integer(&record, "bad"), None);
    }

    #[test]
    fn test_insert_opt_skips_none() {
        let mut map = Map::new();
        insert_opt(&mut map, "a", Some("x"));
        insert_opt::<String>(&mut map, "b", None);
        assert_eq!(Value::Object(map), json!({"a": "x"}));
    }
}
