//! Named container for state published by extensions during startup.
//!
//! The host owns one [`Extensions`] and hands it out by reference; extensions register
//! themselves under a well-known key and other components look them up by that key.

use admin_domain::registry::{Extension, RegisteredExtension};
use fxhash::FxHashMap;
use std::borrow::Cow;

#[admin_derive::admin_error]
pub enum ExtensionError {
    #[error("Extension not registered{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Extension type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug, Default)]
pub struct Extensions {
    entries: FxHashMap<Cow<'static, str>, RegisteredExtension>,
}

impl Extensions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `state` under `key`, replacing and returning any previous entry.
    pub fn insert<T: Extension>(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        state: T,
    ) -> Option<RegisteredExtension> {
        let entry = RegisteredExtension::new(key, state);
        if let Some(previous) = self.entries.get(&entry.key) {
            tracing::warn!(key = %previous.key, "Replacing registered extension");
        }
        self.entries.insert(entry.key.clone(), entry)
    }

    #[must_use]
    pub fn get<T: Extension>(&self, key: &str) -> Option<&T> {
        self.entries.get(key).and_then(RegisteredExtension::downcast_ref::<T>)
    }

    /// Looks up `key` and downcasts it to `T`.
    ///
    /// # Errors
    /// [`ExtensionError::Missing`] if nothing is registered under `key`,
    /// [`ExtensionError::TypeMismatch`] if the entry holds another type.
    pub fn try_get<T: Extension>(&self, key: &str) -> Result<&T, ExtensionError> {
        let entry = self.entries.get(key).ok_or_else(|| ExtensionError::Missing {
            message: key.to_owned().into(),
            context: None,
        })?;

        entry.downcast_ref::<T>().ok_or_else(|| ExtensionError::TypeMismatch {
            message: format!("'{key}' is not a {}", std::any::type_name::<T>()).into(),
            context: None,
        })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(&'static str);

    #[test]
    fn insert_then_get_by_key() {
        let mut extensions = Extensions::new();
        assert!(extensions.insert("marker", Marker("a")).is_none());

        assert_eq!(extensions.get::<Marker>("marker"), Some(&Marker("a")));
        assert!(extensions.get::<Marker>("other").is_none());
        assert!(extensions.contains("marker"));
    }

    #[test]
    fn insert_replaces_previous_entry() {
        let mut extensions = Extensions::new();
        extensions.insert("marker", Marker("a"));
        let previous = extensions.insert("marker", Marker("b"));

        assert!(previous.is_some());
        assert_eq!(extensions.get::<Marker>("marker"), Some(&Marker("b")));
        assert_eq!(extensions.len(), 1);
    }

    #[test]
    fn try_get_distinguishes_missing_from_mismatch() {
        let mut extensions = Extensions::new();
        extensions.insert("marker", Marker("a"));

        assert!(matches!(extensions.try_get::<Marker>("nope"), Err(ExtensionError::Missing { .. })));
        assert!(matches!(
            extensions.try_get::<String>("marker"),
            Err(ExtensionError::TypeMismatch { .. })
        ));
    }
}
