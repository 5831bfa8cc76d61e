//! Well-known names shared between the host, the administration extension and plugins.

/// Key under which the administration registrar is published in the host extensions.
pub const EXTENSION_KEY: &str = "invenio-administration";

/// Key under which the serialization schema registry is published in the host extensions.
pub const SCHEMA_REGISTRY_KEY: &str = "schema-registry";

/// Every administration configuration option starts with this prefix.
pub const CONFIG_PREFIX: &str = "ADMINISTRATION_";

/// Discovery group scanned for administration views unless configured otherwise.
pub const DEFAULT_ENTRY_POINT_GROUP: &str = "invenio_administration.views";

/// Name of the route collection the administration panel publishes.
pub const BLUEPRINT_NAME: &str = "administration";

/// Route of the built-in dashboard, relative to the panel prefix.
pub const DASHBOARD_ROUTE: &str = "/";

pub const APPNAME_KEY: &str = "ADMINISTRATION_APPNAME";
pub const BASE_TEMPLATE_KEY: &str = "ADMINISTRATION_BASE_TEMPLATE";
pub const URL_PREFIX_KEY: &str = "ADMINISTRATION_URL_PREFIX";
pub const DASHBOARD_TEMPLATE_KEY: &str = "ADMINISTRATION_DASHBOARD_TEMPLATE";
pub const DISPLAY_VERSIONS_KEY: &str = "ADMINISTRATION_DISPLAY_VERSIONS";
