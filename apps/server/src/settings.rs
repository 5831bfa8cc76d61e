use admin_domain::config::{LogConfig, ServerConfig};
use admin_kernel::store::ConfigStore;
use admin_panel::{EntryPointManifest, ResourceViewConfig};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Everything the server reads from its configuration file.
///
/// ```toml
/// [server]
/// port = 5000
///
/// [app]
/// ADMINISTRATION_APPNAME = "Acme Admin"
///
/// [entry_points."invenio_administration.views"]
/// users_ui = "users"
///
/// [[views]]
/// name = "users"
/// schema = "user-v1"
///
/// [schemas.user-v1]
/// type = "object"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub server: ServerConfig,
    pub logging: LogConfig,
    /// Host configuration store; the panel reads its `ADMINISTRATION_*` keys from here.
    pub app: ConfigStore,
    /// Discovery group to entry name to factory value.
    pub entry_points: EntryPointManifest,
    /// View factories declared in configuration, provided under their `name`.
    pub views: Vec<ResourceViewConfig>,
    /// Schema registry contents published before the host is finalized.
    pub schemas: BTreeMap<String, Value>,
}
