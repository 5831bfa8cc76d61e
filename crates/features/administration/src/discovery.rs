//! Entry-point catalog for view plugins.
//!
//! Entry points are declared explicitly, in code or from a static manifest, and point at
//! a factory provided under the same `value`. Selecting a group yields the distinct
//! entries in sorted order.

use crate::error::AdminError;
use crate::view::ViewFactory;
use fxhash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Group name to (entry name to factory value), as read from `[entry_points.<group>]`.
pub type EntryPointManifest = BTreeMap<String, BTreeMap<String, String>>;

/// One declared plugin entry. Identity covers all three fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryPoint {
    pub group: String,
    pub name: String,
    /// Key of the factory that implements the entry.
    pub value: String,
}

impl EntryPoint {
    pub fn new(group: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { group: group.into(), name: name.into(), value: value.into() }
    }

    /// The entry name with underscores turned into hyphens.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_entry_point_name(&self.name)
    }
}

/// Replaces every `_` with `-`.
///
/// ```
/// # use admin_panel::discovery::normalize_entry_point_name;
/// assert_eq!(normalize_entry_point_name("foo_bar"), "foo-bar");
/// assert_eq!(normalize_entry_point_name("already-hyphenated"), "already-hyphenated");
/// ```
#[must_use]
pub fn normalize_entry_point_name(name: &str) -> String {
    name.replace('_', "-")
}

#[derive(Default, Clone)]
pub struct EntryPoints {
    entries: Vec<EntryPoint>,
    factories: FxHashMap<String, Arc<dyn ViewFactory>>,
}

impl Debug for EntryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut factories = self.factories.keys().collect::<Vec<_>>();
        factories.sort();
        f.debug_struct("EntryPoints")
            .field("entries", &self.entries)
            .field("factories", &factories)
            .finish()
    }
}

impl EntryPoints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an entry without providing its factory.
    #[must_use]
    pub fn declare(
        mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.entries.push(EntryPoint::new(group, name, value));
        self
    }

    /// Provides the factory entries with this `value` resolve to.
    #[must_use]
    pub fn provide(mut self, value: impl Into<String>, factory: impl ViewFactory + 'static) -> Self {
        let value = value.into();
        if self.factories.insert(value.clone(), Arc::new(factory)).is_some() {
            tracing::warn!(%value, "Replacing view factory");
        }
        self
    }

    /// Declares an entry and provides its factory, keyed by the factory name.
    #[must_use]
    pub fn register(
        self,
        group: impl Into<String>,
        name: impl Into<String>,
        factory: impl ViewFactory + 'static,
    ) -> Self {
        let value = factory.name().to_owned();
        self.declare(group, name, value.clone()).provide(value, factory)
    }

    /// Declares every entry of a manifest.
    #[must_use]
    pub fn declare_manifest(self, manifest: &EntryPointManifest) -> Self {
        manifest.iter().fold(self, |catalog, (group, entries)| {
            entries.iter().fold(catalog, |catalog, (name, value)| catalog.declare(group, name, value))
        })
    }

    /// Distinct entries of `group`; identical declarations collapse into one.
    #[must_use]
    pub fn select(&self, group: &str) -> BTreeSet<&EntryPoint> {
        self.entries.iter().filter(|entry| entry.group == group).collect()
    }

    /// Resolves the factory behind an entry.
    ///
    /// # Errors
    /// [`AdminError::PluginLoad`] if no factory was provided under the entry's value.
    pub fn load(&self, entry: &EntryPoint) -> Result<Arc<dyn ViewFactory>, AdminError> {
        self.factories.get(&entry.value).cloned().ok_or_else(|| AdminError::PluginLoad {
            message: format!("no factory provided for '{}'", entry.value).into(),
            context: Some(format!("{}:{}", entry.group, entry.name).into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{ResourceViewConfig, ResourceViewFactory};

    const GROUP: &str = "invenio_administration.views";

    fn factory(name: &str) -> ResourceViewFactory {
        ResourceViewFactory::new(ResourceViewConfig::builder().name(name).build())
    }

    #[test]
    fn select_collapses_identical_entries_and_sorts() {
        let catalog = EntryPoints::new()
            .declare(GROUP, "zeta", "pkg:Zeta")
            .declare(GROUP, "alpha", "pkg:Alpha")
            .declare(GROUP, "alpha", "pkg:Alpha")
            .declare("other.group", "alpha", "pkg:Alpha");

        let names = catalog.select(GROUP).into_iter().map(|e| e.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["alpha", "zeta"]);
    }

    #[test]
    fn same_name_with_different_value_is_distinct() {
        let catalog =
            EntryPoints::new().declare(GROUP, "users", "pkg:A").declare(GROUP, "users", "pkg:B");
        assert_eq!(catalog.select(GROUP).len(), 2);
    }

    #[test]
    fn load_requires_provided_factory() {
        let catalog = EntryPoints::new().register(GROUP, "users", factory("users")).declare(
            GROUP,
            "broken",
            "pkg:Missing",
        );

        let entries = catalog.select(GROUP);
        let mut entries = entries.into_iter();
        let broken = entries.next().unwrap();
        let users = entries.next().unwrap();

        assert_eq!(catalog.load(users).unwrap().name(), "users");
        let err = catalog.load(broken).unwrap_err();
        assert!(matches!(err, AdminError::PluginLoad { .. }));
        assert!(err.to_string().contains("pkg:Missing"));
    }

    #[test]
    fn manifest_entries_are_declared() {
        let mut manifest = EntryPointManifest::new();
        manifest
            .entry(GROUP.to_owned())
            .or_default()
            .insert("records_ui".to_owned(), "records".to_owned());

        let catalog = EntryPoints::new().declare_manifest(&manifest).provide("records", factory("records"));
        let entry = catalog.select(GROUP).into_iter().next().unwrap();
        assert_eq!(entry.normalized_name(), "records-ui");
        assert!(catalog.load(entry).is_ok());
    }
}
