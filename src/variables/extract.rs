//! Response value extraction.
//!
//! This module evaluates response bindings against a JSON response body and
//! writes the captured values into the environment store.
//!
//! # Path syntax
//!
//! - `id`, `user.name`: object field access
//! - `items[0].id`, `items.0.id`: array indexing
//! - `items.#`: array length
//! - `items.#.id`: the `id` of every element, as a JSON array
//! - `["a.b"]` or `a\.b`: a key that contains a dot
//! - an optional leading `$` or `$.` is ignored
//!
//! Extraction is permissive: a path that matches nothing, or a body that is
//! not JSON, yields the empty string.
//!
//! # Examples
//!
//! ```
//! use runflow::environment::EnvironmentStore;
//! use runflow::variables::{extract_bindings, ResponseBinding};
//!
//! let mut store = EnvironmentStore::new();
//! let bindings = vec![ResponseBinding::new("ID", "id")];
//!
//! extract_bindings(r#"{"id": "abc123"}"#, &bindings, &mut store);
//! assert_eq!(store.get("ID"), Some("abc123"));
//! ```

use super::capture::ResponseBinding;
use crate::environment::EnvironmentStore;
use serde_json::Value as JsonValue;

/// Represents a segment in a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    /// Object field access (e.g., "user", "name"), or a dotted index on arrays
    Field(String),

    /// Bracketed array index (e.g., [0], [5])
    ArrayIndex(usize),

    /// `#`: array length, or a fan-out over elements when more segments follow
    Count,
}

/// Parses a path into segments.
///
/// - "user.name" -> [Field("user"), Field("name")]
/// - "items[0].id" -> [Field("items"), ArrayIndex(0), Field("id")]
/// - "items.#" -> [Field("items"), Count]
fn parse_path_segments(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    let mut chars = path.chars().peekable();

    fn flush(current: &mut String, escaped: &mut bool, segments: &mut Vec<PathSegment>) {
        if !current.is_empty() {
            if current == "#" && !*escaped {
                segments.push(PathSegment::Count);
            } else {
                segments.push(PathSegment::Field(std::mem::take(current)));
            }
            current.clear();
        }
        *escaped = false;
    }

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    escaped = true;
                }
            }
            '.' => flush(&mut current, &mut escaped, &mut segments),
            '[' => {
                flush(&mut current, &mut escaped, &mut segments);

                let mut inner = String::new();
                for next in chars.by_ref() {
                    if next == ']' {
                        break;
                    }
                    inner.push(next);
                }

                let inner = inner.trim();
                if let Ok(index) = inner.parse::<usize>() {
                    segments.push(PathSegment::ArrayIndex(index));
                } else {
                    let key = inner.trim_matches(|c| c == '"' || c == '\'');
                    if !key.is_empty() {
                        segments.push(PathSegment::Field(key.to_string()));
                    }
                }
            }
            _ => current.push(ch),
        }
    }

    flush(&mut current, &mut escaped, &mut segments);
    segments
}

/// Walks `segments` down from `value`.
fn walk(value: &JsonValue, segments: &[PathSegment]) -> Option<JsonValue> {
    let Some((segment, rest)) = segments.split_first() else {
        return Some(value.clone());
    };

    match segment {
        PathSegment::Field(name) => match value {
            JsonValue::Object(map) => map.get(name).and_then(|v| walk(v, rest)),
            JsonValue::Array(items) => {
                let index = name.parse::<usize>().ok()?;
                items.get(index).and_then(|v| walk(v, rest))
            }
            _ => None,
        },
        PathSegment::ArrayIndex(index) => value
            .as_array()
            .and_then(|items| items.get(*index))
            .and_then(|v| walk(v, rest)),
        PathSegment::Count => {
            let items = value.as_array()?;
            if rest.is_empty() {
                Some(JsonValue::from(items.len()))
            } else {
                Some(JsonValue::Array(
                    items.iter().filter_map(|item| walk(item, rest)).collect(),
                ))
            }
        }
    }
}

/// Evaluates a path expression against a JSON value.
///
/// # Returns
///
/// The matched value, or `None` when the path matches nothing. An empty
/// path matches nothing; `$` on its own is the whole document.
pub fn evaluate_path(json: &JsonValue, path: &str) -> Option<JsonValue> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);

    if path.is_empty() {
        return Some(json.clone());
    }

    walk(json, &parse_path_segments(path))
}

/// Converts a JSON value to the text stored in the environment.
///
/// - Strings: returned as-is (without quotes)
/// - Numbers, booleans: their JSON text
/// - Null: empty string
/// - Objects, arrays: compact JSON
pub fn json_value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Array(_) | JsonValue::Object(_) => value.to_string(),
    }
}

/// Extracts the value at `path` from an already parsed body.
fn extract_from_json(json: Option<&JsonValue>, path: &str) -> String {
    json.and_then(|json| evaluate_path(json, path))
        .map(|value| json_value_to_string(&value).trim().to_string())
        .unwrap_or_default()
}

/// Extracts the value at `path` from a raw response body.
///
/// Returns the empty string when the body is not JSON or the path matches
/// nothing.
pub fn extract_value(body: &str, path: &str) -> String {
    let json = serde_json::from_str::<JsonValue>(body).ok();
    extract_from_json(json.as_ref(), path)
}

/// Evaluates every binding against `body` and stores the results.
///
/// Bindings are applied in declaration order, so a later binding with the
/// same name overwrites an earlier one. Bindings with an empty name are
/// skipped.
///
/// # Returns
///
/// The number of variables written to the store.
pub fn extract_bindings(
    body: &str,
    bindings: &[ResponseBinding],
    store: &mut EnvironmentStore,
) -> usize {
    let json = match serde_json::from_str::<JsonValue>(body) {
        Ok(json) => Some(json),
        Err(e) => {
            log::debug!("response body is not JSON ({}), bindings resolve to empty", e);
            None
        }
    };

    let mut written = 0;
    for binding in bindings {
        let value = extract_from_json(json.as_ref(), &binding.json_path);

        if store.set(binding.variable_name(), value.clone()) {
            log::debug!("captured {} = {:?}", binding.variable_name(), value);
            written += 1;
        } else {
            log::warn!(
                "skipping response binding with empty name (path {:?})",
                binding.json_path
            );
        }
    }

    written
}
