//! Environment store data model
//!
//! The store is the single piece of state shared between workflow steps. It is
//! seeded from the environment file before the first step runs and grows as
//! response bindings capture values from step responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Run-scoped mapping of variable names to string values.
///
/// Names are trimmed on insert and must be non-empty. Values are plain text;
/// numbers and booleans are stored in their textual form. The last write for
/// a name wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EnvironmentStore {
    variables: BTreeMap<String, String>,
}

impl EnvironmentStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, overwriting any prior value for the same name.
    ///
    /// The name is trimmed first. Returns `false` and leaves the store
    /// untouched when the trimmed name is empty.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> bool {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return false;
        }
        self.variables.insert(name.to_string(), value.into());
        true
    }

    /// Gets a variable value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Checks if a variable exists
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Removes a variable, returning its last value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.variables.remove(name)
    }

    /// Seeds the store from `key: value` text.
    ///
    /// See [`parse_env_source`](super::loader::parse_env_source) for the line
    /// rules. Returns the number of variables read from the source.
    pub fn load_initial(&mut self, source: &str) -> usize {
        let pairs = super::loader::parse_env_source(source);
        let count = pairs.len();
        self.extend(pairs);
        count
    }

    /// Iterates over variables sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Checks if the store has no variables
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for EnvironmentStore {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for EnvironmentStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
