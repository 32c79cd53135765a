//! Response bindings: rules that capture values from a step's response.
//!
//! A binding names a variable and the JSON path whose value it receives:
//!
//! ```json
//! { "name": "deviceId", "jsonPath": "data.devices[0].id", "apiType": "string" }
//! ```
//!
//! `apiType` is carried through from the template document but plays no part
//! in extraction; every captured value is stored as text.

use serde::{Deserialize, Serialize};

/// A declared rule extracting one named variable from a JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseBinding {
    /// Name of the variable that receives the captured value.
    ///
    /// Trimmed before it is written to the store.
    #[serde(default)]
    pub name: String,

    /// Path query evaluated against the response body.
    #[serde(rename = "jsonPath", default)]
    pub json_path: String,

    /// Declared value type. Informational only.
    #[serde(rename = "apiType", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

impl ResponseBinding {
    /// Creates a new binding without a declared value type.
    pub fn new(name: impl Into<String>, json_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            json_path: json_path.into(),
            value_type: None,
        }
    }

    /// The variable name the captured value is stored under.
    pub fn variable_name(&self) -> &str {
        self.name.trim()
    }
}

/// Validates a path expression for syntax correctness.
///
/// This only checks that brackets are balanced and properly ordered; whether
/// the path matches anything is decided against the actual response.
pub fn validate_path(path: &str) -> bool {
    if path.trim().is_empty() {
        return false;
    }

    let mut depth = 0;
    for ch in path.chars() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0
}
