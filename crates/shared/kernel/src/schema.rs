//! Serialization schema registry.
//!
//! Resource extensions publish their (de)serialization schemas here, usually after the
//! administration panel is wired; views resolve them right before the host starts serving.

use fxhash::FxHashMap;
use serde_json::Value;
use std::borrow::Cow;

/// Named JSON schema definitions.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: FxHashMap<Cow<'static, str>, Value>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema, returning the one it replaced.
    pub fn register(&mut self, name: impl Into<Cow<'static, str>>, schema: Value) -> Option<Value> {
        let name = name.into();
        tracing::debug!(schema = %name, "Registering schema");
        self.schemas.insert(name, schema)
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }
}

impl<K: Into<Cow<'static, str>>> FromIterator<(K, Value)> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, schema) in iter {
            registry.register(name, schema);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_and_resolve() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.register("users", json!({ "type": "object" })).is_none());

        assert_eq!(registry.resolve("users"), Some(&json!({ "type": "object" })));
        assert!(registry.resolve("groups").is_none());
    }

    #[test]
    fn register_replaces_existing_schema() {
        let mut registry: SchemaRegistry = [("users", json!(1))].into_iter().collect();
        let previous = registry.register("users", json!(2));

        assert_eq!(previous, Some(json!(1)));
        assert_eq!(registry.len(), 1);
    }
}
