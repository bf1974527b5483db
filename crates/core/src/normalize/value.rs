#![forbid(unsafe_code)]

//! Tolerant accessors over `serde_json::Value`.
//!
//! Every accessor is total: wrong type, missing key, or empty string all
//! degrade to `None` / empty, never to an error. Alias arrays are tried in
//! priority order and the first present key wins.

use serde_json::{Map, Value};

pub(crate) fn as_obj(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// First value present under any of `keys`, in order.
pub(crate) fn first_present<'a>(
    obj: &'a Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

pub(crate) fn value_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn value_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub(crate) fn str_at(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(obj, keys).and_then(value_str)
}

pub(crate) fn f64_at(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    first_present(obj, keys).and_then(value_f64)
}

pub(crate) fn obj_at<'a>(
    obj: &'a Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Map<String, Value>> {
    first_present(obj, keys).and_then(Value::as_object)
}

pub(crate) fn list_at<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Vec<Value>> {
    first_present(obj, keys).and_then(Value::as_array)
}

/// String list under any of `keys`; non-string entries are dropped, entries
/// that are objects contribute their "text"/"value" field when present.
pub(crate) fn string_list_at(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    let Some(items) = list_at(obj, keys) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(inner) => str_at(inner, &["text", "value"]),
            other => value_str(other),
        })
        .collect()
}

/// Same as [`string_list_at`] but preserves the present/absent distinction:
/// `None` when none of the keys exist at all.
pub(crate) fn optional_string_list_at(
    obj: &Map<String, Value>,
    keys: &[&str],
) -> Option<Vec<String>> {
    if first_present(obj, keys).is_none() {
        return None;
    }
    Some(string_list_at(obj, keys))
}

/// String -> string map; non-string values are rendered through
/// [`value_str`] and dropped when unrepresentable.
pub(crate) fn string_map_at(
    obj: &Map<String, Value>,
    keys: &[&str],
) -> std::collections::BTreeMap<String, String> {
    let mut out = std::collections::BTreeMap::new();
    let Some(inner) = obj_at(obj, keys) else {
        return out;
    };
    for (key, value) in inner {
        if let Some(rendered) = value_str(value) {
            out.insert(key.clone(), rendered);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_present_respects_priority_order() {
        let raw = json!({"snake_case": "new", "TitleCase": "old"});
        let obj = raw.as_object().unwrap();
        assert_eq!(
            str_at(obj, &["snake_case", "TitleCase"]),
            Some("new".to_string())
        );
        assert_eq!(
            str_at(obj, &["missing", "TitleCase"]),
            Some("old".to_string())
        );
        assert_eq!(str_at(obj, &["missing", "also_missing"]), None);
    }

    #[test]
    fn strings_are_trimmed_and_empty_rejected() {
        let raw = json!({"a": "  padded  ", "b": "   ", "c": 7});
        let obj = raw.as_object().unwrap();
        assert_eq!(str_at(obj, &["a"]), Some("padded".to_string()));
        assert_eq!(str_at(obj, &["b"]), None);
        assert_eq!(str_at(obj, &["c"]), Some("7".to_string()));
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let raw = json!({"a": 80, "b": "72.5", "c": "not a number"});
        let obj = raw.as_object().unwrap();
        assert_eq!(f64_at(obj, &["a"]), Some(80.0));
        assert_eq!(f64_at(obj, &["b"]), Some(72.5));
        assert_eq!(f64_at(obj, &["c"]), None);
    }

    #[test]
    fn string_lists_drop_junk_entries() {
        let raw = json!({"items": ["a", 3, null, {"text": "b"}, {"other": true}]});
        let obj = raw.as_object().unwrap();
        assert_eq!(string_list_at(obj, &["items"]), vec!["a", "3", "b"]);
    }

    #[test]
    fn optional_list_distinguishes_absent_from_empty() {
        let raw = json!({"present": []});
        let obj = raw.as_object().unwrap();
        assert_eq!(optional_string_list_at(obj, &["present"]), Some(vec![]));
        assert_eq!(optional_string_list_at(obj, &["absent"]), None);
    }
}
