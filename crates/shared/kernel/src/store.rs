//! Flat, mutable configuration store owned by the host application.
//!
//! Keys are upper-cased on every access, so `administration_appname` from a config file,
//! an environment override, and `ADMINISTRATION_APPNAME` set in code address the same
//! entry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

#[admin_derive::admin_error]
pub enum ConfigStoreError {
    #[error("Missing configuration key{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Invalid configuration value{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Host configuration: option name to JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, Value>")]
pub struct ConfigStore {
    values: BTreeMap<String, Value>,
}

fn normalize(key: &str) -> Cow<'_, str> {
    if key.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(key.to_ascii_uppercase())
    } else {
        Cow::Borrowed(key)
    }
}

impl ConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(normalize(key).as_ref())
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(normalize(key).as_ref())
    }

    /// Sets a value, returning the previous one.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(normalize(key.as_ref()).into_owned(), value.into())
    }

    /// Sets a value only if the key is absent. Returns `true` when the value was stored.
    pub fn set_if_absent(&mut self, key: impl AsRef<str>, value: impl Into<Value>) -> bool {
        let key = normalize(key.as_ref()).into_owned();
        if self.values.contains_key(&key) {
            return false;
        }
        self.values.insert(key, value.into());
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(normalize(key).as_ref())
    }

    /// Returns a required string option.
    ///
    /// # Errors
    /// [`ConfigStoreError::Missing`] if the key is absent, [`ConfigStoreError::Invalid`]
    /// if the value is not a string.
    pub fn require_str(&self, key: &str) -> Result<&str, ConfigStoreError> {
        let value = self.get(key).ok_or_else(|| ConfigStoreError::Missing {
            message: normalize(key).into_owned().into(),
            context: None,
        })?;

        value.as_str().ok_or_else(|| ConfigStoreError::Invalid {
            message: format!("{} must be a string, got {value}", normalize(key)).into(),
            context: None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for ConfigStore {
    fn from(values: BTreeMap<String, Value>) -> Self {
        values.into_iter().collect()
    }
}

impl From<ConfigStore> for BTreeMap<String, Value> {
    fn from(store: ConfigStore) -> Self {
        store.values
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for ConfigStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            store.set(key, value);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_case_insensitive() {
        let mut store = ConfigStore::new();
        store.set("administration_appname", "Admin");
        assert_eq!(store.get_str("ADMINISTRATION_APPNAME"), Some("Admin"));
        assert!(store.contains("Administration_AppName"));
    }

    #[test]
    fn set_if_absent_never_overwrites() {
        let mut store = ConfigStore::new();
        assert!(store.set_if_absent("KEY", 1));
        assert!(!store.set_if_absent("KEY", 2));
        assert_eq!(store.get("KEY"), Some(&json!(1)));
    }

    #[test]
    fn set_if_absent_keeps_explicit_null() {
        let mut store = ConfigStore::new();
        store.set("KEY", Value::Null);
        assert!(!store.set_if_absent("KEY", "default"));
        assert_eq!(store.get("KEY"), Some(&Value::Null));
    }

    #[test]
    fn require_str_reports_missing_and_invalid() {
        let mut store = ConfigStore::new();
        assert!(matches!(store.require_str("NAME"), Err(ConfigStoreError::Missing { .. })));

        store.set("NAME", 42);
        assert!(matches!(store.require_str("NAME"), Err(ConfigStoreError::Invalid { .. })));

        store.set("NAME", "ok");
        assert_eq!(store.require_str("NAME").ok(), Some("ok"));
    }

    #[test]
    fn deserializes_with_uppercased_keys() {
        let store: ConfigStore =
            serde_json::from_value(json!({ "administration_appname": "Loaded" })).unwrap();
        assert_eq!(store.get_str("ADMINISTRATION_APPNAME"), Some("Loaded"));
        assert_eq!(store.len(), 1);
    }
}
