//! The panel registry: identity of the panel, its blueprint, and the navigation menu.

use crate::config::{
    ADMINISTRATION_DASHBOARD_TEMPLATE, ADMINISTRATION_DISPLAY_VERSIONS, ADMINISTRATION_URL_PREFIX,
};
use crate::error::AdminError;
use crate::view::{AdminView, as_view, menu_entry};
use crate::views::DashboardView;
use admin_domain::constants::{
    APPNAME_KEY, BASE_TEMPLATE_KEY, BLUEPRINT_NAME, DASHBOARD_TEMPLATE_KEY, DISPLAY_VERSIONS_KEY,
    URL_PREFIX_KEY,
};
use admin_domain::menu::{MenuEntry, PanelInfo};
use admin_kernel::server::{Blueprint, HostError};
use admin_kernel::store::ConfigStore;
use axum::routing::MethodRouter;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Panel data shared with every view instance.
#[derive(Debug)]
pub struct PanelState {
    info: PanelInfo,
    dashboard_template: String,
    display_versions: bool,
    menu: RwLock<Vec<MenuEntry>>,
    extensions: RwLock<Vec<String>>,
}

impl PanelState {
    #[must_use]
    pub const fn info(&self) -> &PanelInfo {
        &self.info
    }

    #[must_use]
    pub fn dashboard_template(&self) -> &str {
        &self.dashboard_template
    }

    #[must_use]
    pub const fn display_versions(&self) -> bool {
        self.display_versions
    }

    /// Snapshot of the navigation menu, in registration order.
    #[must_use]
    pub fn menu(&self) -> Vec<MenuEntry> {
        self.menu.read().clone()
    }

    /// Distinct labels of the extensions that contributed views, in first-seen order.
    #[must_use]
    pub fn extension_names(&self) -> Vec<String> {
        self.extensions.read().clone()
    }

    fn record(&self, view: &dyn AdminView) {
        if view.menu_visible() {
            self.menu.write().push(menu_entry(&self.info, view));
        }
        let mut extensions = self.extensions.write();
        if !extensions.iter().any(|name| name == view.extension_name()) {
            extensions.push(view.extension_name().to_owned());
        }
    }
}

/// Central registry of the administration panel.
///
/// Collects view routes into a blueprint until it is handed to the host, and keeps
/// the menu every page renders.
#[derive(Debug)]
pub struct Administration {
    state: Arc<PanelState>,
    blueprint: Option<Blueprint>,
    routes: Vec<String>,
}

impl Administration {
    /// Creates the registry and mounts the dashboard at the panel index.
    ///
    /// # Errors
    /// Fails only if the dashboard route cannot be registered.
    pub fn new(
        name: impl Into<String>,
        base_template: impl Into<String>,
        url_prefix: &str,
    ) -> Result<Self, AdminError> {
        Self::with_options(
            name.into(),
            base_template.into(),
            url_prefix,
            ADMINISTRATION_DASHBOARD_TEMPLATE.to_owned(),
            ADMINISTRATION_DISPLAY_VERSIONS,
        )
    }

    /// Reads the panel settings from the host configuration.
    ///
    /// `ADMINISTRATION_APPNAME` and `ADMINISTRATION_BASE_TEMPLATE` are required; the other
    /// settings fall back to their defaults.
    ///
    /// # Errors
    /// [`AdminError::Config`] if a required key is missing or a value has the wrong type.
    pub fn from_config(config: &ConfigStore) -> Result<Self, AdminError> {
        let name = config.require_str(APPNAME_KEY)?;
        let base_template = config.require_str(BASE_TEMPLATE_KEY)?;
        let url_prefix = optional_str(config, URL_PREFIX_KEY)?.unwrap_or(ADMINISTRATION_URL_PREFIX);
        let dashboard_template = optional_str(config, DASHBOARD_TEMPLATE_KEY)?
            .unwrap_or(ADMINISTRATION_DASHBOARD_TEMPLATE);
        let display_versions = match config.get(DISPLAY_VERSIONS_KEY) {
            None => ADMINISTRATION_DISPLAY_VERSIONS,
            Some(value) => value.as_bool().ok_or_else(|| AdminError::Config {
                message: format!("{DISPLAY_VERSIONS_KEY} must be a boolean, got {value}").into(),
                context: None,
            })?,
        };

        Self::with_options(
            name.to_owned(),
            base_template.to_owned(),
            url_prefix,
            dashboard_template.to_owned(),
            display_versions,
        )
    }

    fn with_options(
        name: String,
        base_template: String,
        url_prefix: &str,
        dashboard_template: String,
        display_versions: bool,
    ) -> Result<Self, AdminError> {
        let blueprint = Blueprint::new(BLUEPRINT_NAME, url_prefix);
        let info = PanelInfo { name, base_template, url_prefix: blueprint.url_prefix().to_owned() };
        info!(panel = %info.name, prefix = %info.url_prefix, "Creating administration panel");

        let state = Arc::new(PanelState {
            info,
            dashboard_template,
            display_versions,
            menu: RwLock::new(Vec::new()),
            extensions: RwLock::new(Vec::new()),
        });

        let mut admin = Self { state, blueprint: Some(blueprint), routes: Vec::new() };
        let dashboard: Arc<dyn AdminView> = Arc::new(DashboardView::new(admin.handle()));
        admin.add_view(as_view(Arc::clone(&dashboard)), dashboard.as_ref())?;
        Ok(admin)
    }

    /// Adds a view route to the blueprint and its entry to the menu.
    ///
    /// # Errors
    /// [`AdminError::Registration`] if the blueprint was already published, or the route
    /// is taken or not a static path.
    pub fn add_view(&mut self, handler: MethodRouter, view: &dyn AdminView) -> Result<(), AdminError> {
        let Some(blueprint) = self.blueprint.as_mut() else {
            return Err(AdminError::Registration {
                message: "administration blueprint is already published".into(),
                context: Some(view.name().to_owned().into()),
            });
        };

        let route = view.route();
        blueprint.route(&route, handler).map_err(|err| match err {
            HostError::DuplicateRoute { message, .. } => AdminError::Registration {
                message: format!("route '{message}' is already taken").into(),
                context: Some(view.name().to_owned().into()),
            },
            HostError::InvalidRoute { message, .. } => AdminError::Registration {
                message: format!("invalid route: {message}").into(),
                context: Some(view.name().to_owned().into()),
            },
            other => other.into(),
        })?;

        self.state.record(view);
        debug!(view = view.name(), extension = view.extension_name(), %route, "Added view");
        self.routes.push(route);
        Ok(())
    }

    /// Hands out the blueprint for publishing. Returns `None` once taken.
    pub const fn take_blueprint(&mut self) -> Option<Blueprint> {
        self.blueprint.take()
    }

    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.blueprint.is_none()
    }

    /// Shared panel state for view construction.
    #[must_use]
    pub fn handle(&self) -> Arc<PanelState> {
        Arc::clone(&self.state)
    }

    #[must_use]
    pub fn info(&self) -> &PanelInfo {
        self.state.info()
    }

    #[must_use]
    pub fn menu(&self) -> Vec<MenuEntry> {
        self.state.menu()
    }

    /// Registered routes relative to the prefix, dashboard first.
    #[must_use]
    pub fn routes(&self) -> &[String] {
        &self.routes
    }
}

fn optional_str<'a>(config: &'a ConfigStore, key: &str) -> Result<Option<&'a str>, AdminError> {
    config.get(key).map_or(Ok(None), |value| {
        value.as_str().map(Some).ok_or_else(|| AdminError::Config {
            message: format!("{key} must be a string, got {value}").into(),
            context: None,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigDefaults;
    use serde_json::json;

    fn configured() -> ConfigStore {
        let mut store = ConfigStore::new();
        ConfigDefaults::builtin().apply(&mut store);
        store
    }

    #[test]
    fn from_config_reads_panel_identity() {
        let mut store = configured();
        store.set(APPNAME_KEY, "Admin");
        store.set(URL_PREFIX_KEY, "/admin/");

        let admin = Administration::from_config(&store).unwrap();
        assert_eq!(admin.info().name, "Admin");
        assert_eq!(admin.info().url_prefix, "/admin");
        assert_eq!(admin.routes(), ["/"]);
        assert!(admin.menu().is_empty());
    }

    #[test]
    fn missing_required_key_is_a_config_error() {
        let mut store = configured();
        store.remove(BASE_TEMPLATE_KEY);

        let err = Administration::from_config(&store).unwrap_err();
        assert!(matches!(err, AdminError::Config { .. }));
        assert!(err.to_string().contains(BASE_TEMPLATE_KEY));
    }

    #[test]
    fn wrong_types_are_config_errors() {
        let mut store = configured();
        store.set(DISPLAY_VERSIONS_KEY, "yes");
        assert!(matches!(Administration::from_config(&store), Err(AdminError::Config { .. })));

        let mut store = configured();
        store.set(APPNAME_KEY, json!(42));
        assert!(matches!(Administration::from_config(&store), Err(AdminError::Config { .. })));
    }

    #[test]
    fn views_are_rejected_after_publishing() {
        let mut admin = Administration::new("Admin", "base.html", "/administration").unwrap();
        assert!(admin.take_blueprint().is_some());
        assert!(admin.is_published());
        assert!(admin.take_blueprint().is_none());

        let dashboard = DashboardView::new(admin.handle());
        let err = admin.add_view(as_view(Arc::new(DashboardView::new(admin.handle()))), &dashboard);
        assert!(matches!(err, Err(AdminError::Registration { .. })));
    }

    #[test]
    fn duplicate_route_is_a_registration_error() {
        let mut admin = Administration::new("Admin", "base.html", "/administration").unwrap();
        let dashboard = DashboardView::new(admin.handle());

        let err = admin
            .add_view(as_view(Arc::new(DashboardView::new(admin.handle()))), &dashboard)
            .unwrap_err();
        assert!(matches!(err, AdminError::Registration { .. }));
        assert_eq!(admin.routes(), ["/"]);
    }
}
