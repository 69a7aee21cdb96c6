//! Environment Overrides Value Object
//!
//! An explicit, enumerated set of changes applied to a child process
//! environment. A `None` value removes the variable; `Some` sets it.

use std::collections::BTreeMap;

/// Ordered map of environment changes for one external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides(BTreeMap<String, Option<String>>);

impl EnvOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value` in the child environment
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), Some(value.into()));
        self
    }

    /// Remove `key` from the child environment
    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), None);
        self
    }

    /// Iterate over all overrides in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Look up the override for `key` (outer `None` = untouched)
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.0.get(key).map(|v| v.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
