//! Placeholder substitution engine
//!
//! Placeholders have the form `$*name$`. Substitution is a plain text rewrite,
//! so it works the same on URLs and on serialized JSON payloads, including
//! placeholders that sit inside string values or keys.
//!
//! Values are inserted verbatim. A value containing `"` or `\` will produce
//! invalid JSON when substituted inside a JSON string; callers that need
//! structural safety must escape values before storing them.

use crate::environment::EnvironmentStore;
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening marker of a placeholder.
pub const PLACEHOLDER_OPEN: &str = "$*";

/// Closing marker of a placeholder.
pub const PLACEHOLDER_CLOSE: &str = "$";

/// Cached regex pattern for matching `$*name$`.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\*([^$]+)\$").expect("Failed to compile placeholder regex"));

/// Builds the placeholder text referencing `name`.
///
/// ```
/// use runflow::variables::placeholder;
///
/// assert_eq!(placeholder("host"), "$*host$");
/// ```
pub fn placeholder(name: &str) -> String {
    format!("{}{}{}", PLACEHOLDER_OPEN, name, PLACEHOLDER_CLOSE)
}

/// Replaces every `$*name$` in `text` with the store's value for `name`.
///
/// Names without a store entry are left as literal placeholder text. The
/// result is not re-scanned, so placeholders that appear inside substituted
/// values stay as they are.
///
/// # Examples
///
/// ```
/// use runflow::environment::EnvironmentStore;
/// use runflow::variables::substitute;
///
/// let mut store = EnvironmentStore::new();
/// store.set("host", "10.0.0.1");
///
/// assert_eq!(substitute("ping/$*host$", &store), "ping/10.0.0.1");
/// assert_eq!(substitute("ping/$*port$", &store), "ping/$*port$");
/// ```
pub fn substitute(text: &str, store: &EnvironmentStore) -> String {
    if !text.contains(PLACEHOLDER_OPEN) {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(caps) = PLACEHOLDER_REGEX.captures_at(text, cursor) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        match store.get(name.as_str()) {
            Some(value) => {
                result.push_str(&text[cursor..whole.start()]);
                result.push_str(value);
                cursor = whole.end();
            }
            None => {
                // The closing `$` may open the next placeholder.
                let resume = whole.end() - PLACEHOLDER_CLOSE.len();
                result.push_str(&text[cursor..resume]);
                cursor = resume;
            }
        }
    }

    result.push_str(&text[cursor..]);
    result
}

/// Lists the placeholder names referenced by `text`, in order of appearance.
///
/// Duplicates are kept.
pub fn find_placeholders(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = PLACEHOLDER_REGEX.captures_at(text, cursor) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        names.push(name.as_str().to_string());
        cursor = whole.end() - PLACEHOLDER_CLOSE.len();
    }

    names
}

/// Placeholder names in `text` that have no entry in `store`.
pub fn unresolved_placeholders(text: &str, store: &EnvironmentStore) -> Vec<String> {
    find_placeholders(text)
        .into_iter()
        .filter(|name| !store.contains(name))
        .collect()
}
