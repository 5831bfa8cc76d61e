//! Default configuration of the administration panel.
//!
//! Defaults are merged into the host configuration once, at `init_app`, and never
//! override a value the host already set.

use admin_domain::constants::{
    APPNAME_KEY, BASE_TEMPLATE_KEY, CONFIG_PREFIX, DASHBOARD_TEMPLATE_KEY, DISPLAY_VERSIONS_KEY,
    URL_PREFIX_KEY,
};
use admin_kernel::store::ConfigStore;
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

/// Display name of the panel.
pub const ADMINISTRATION_APPNAME: &str = "Administration";
/// Template every panel page extends.
pub const ADMINISTRATION_BASE_TEMPLATE: &str = "invenio_administration/base.html";
/// Mount point of the panel on the host dispatcher.
pub const ADMINISTRATION_URL_PREFIX: &str = "/administration";
/// Template of the built-in dashboard.
pub const ADMINISTRATION_DASHBOARD_TEMPLATE: &str = "invenio_administration/index.html";
/// Whether the dashboard lists the extensions that contributed views.
pub const ADMINISTRATION_DISPLAY_VERSIONS: bool = true;

/// Ordered option name to default value table.
#[derive(Debug, Clone)]
pub struct ConfigDefaults {
    entries: Vec<(Cow<'static, str>, Value)>,
}

impl Default for ConfigDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ConfigDefaults {
    /// The panel's shipped defaults.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with(APPNAME_KEY, ADMINISTRATION_APPNAME)
            .with(BASE_TEMPLATE_KEY, ADMINISTRATION_BASE_TEMPLATE)
            .with(URL_PREFIX_KEY, ADMINISTRATION_URL_PREFIX)
            .with(DASHBOARD_TEMPLATE_KEY, ADMINISTRATION_DASHBOARD_TEMPLATE)
            .with(DISPLAY_VERSIONS_KEY, ADMINISTRATION_DISPLAY_VERSIONS)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds or replaces a default.
    #[must_use]
    pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_ref(), value))
    }

    /// Merges every prefixed default into `store` with set-if-absent semantics.
    ///
    /// Names outside the `ADMINISTRATION_` namespace are ignored. Returns how many
    /// values were written.
    pub fn apply(&self, store: &mut ConfigStore) -> usize {
        self.iter()
            .filter(|(key, _)| key.starts_with(CONFIG_PREFIX))
            .filter(|(key, value)| {
                let applied = store.set_if_absent(key, (*value).clone());
                if applied {
                    debug!(key, "Applied configuration default");
                }
                applied
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_defaults_cover_required_keys() {
        let defaults = ConfigDefaults::builtin();
        assert_eq!(defaults.get(APPNAME_KEY), Some(&json!(ADMINISTRATION_APPNAME)));
        assert_eq!(defaults.get(BASE_TEMPLATE_KEY), Some(&json!(ADMINISTRATION_BASE_TEMPLATE)));
        assert!(defaults.iter().all(|(key, _)| key.starts_with(CONFIG_PREFIX)));
    }

    #[test]
    fn apply_skips_present_and_unprefixed_keys() {
        let defaults = ConfigDefaults::empty()
            .with("ADMINISTRATION_APPNAME", "Admin")
            .with("ADMINISTRATION_BASE_TEMPLATE", "base.html")
            .with("THEME_SITENAME", "Ignored");

        let mut store = ConfigStore::new();
        store.set("ADMINISTRATION_BASE_TEMPLATE", "custom.html");

        assert_eq!(defaults.apply(&mut store), 1);
        assert_eq!(store.get_str("ADMINISTRATION_APPNAME"), Some("Admin"));
        assert_eq!(store.get_str("ADMINISTRATION_BASE_TEMPLATE"), Some("custom.html"));
        assert!(!store.contains("THEME_SITENAME"));
    }

    #[test]
    fn with_replaces_existing_default() {
        let defaults = ConfigDefaults::empty().with("ADMINISTRATION_APPNAME", "A").with(
            "ADMINISTRATION_APPNAME",
            "B",
        );
        assert_eq!(defaults.iter().count(), 1);
        assert_eq!(defaults.get("ADMINISTRATION_APPNAME"), Some(&json!("B")));
    }
}
