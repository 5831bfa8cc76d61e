//! The administration extension: wires the panel into a [`HostApp`].

use crate::config::ConfigDefaults;
use crate::discovery::{EntryPoints, normalize_entry_point_name};
use crate::error::AdminError;
use crate::panel::Administration;
use crate::view::{AdminView, ViewArgs, ViewContext, ViewFactory, as_view};
use admin_domain::constants::{DEFAULT_ENTRY_POINT_GROUP, EXTENSION_KEY, SCHEMA_REGISTRY_KEY};
use admin_domain::menu::{MenuEntry, PanelInfo};
use admin_kernel::extensions::ExtensionError;
use admin_kernel::schema::SchemaRegistry;
use admin_kernel::server::{BeforeServing, HostApp, HostError};
use admin_kernel::store::ConfigStore;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Registrar of the administration panel.
///
/// Cheap to clone; every clone shares the same panel and view list. After
/// [`AdminExtension::init_app`] a clone is published on the host under
/// `"invenio-administration"`.
#[derive(Debug, Clone)]
pub struct AdminExtension {
    inner: Arc<AdminExtensionInner>,
}

#[derive(Debug)]
struct AdminExtensionInner {
    entry_point_group: Option<String>,
    entry_points: EntryPoints,
    defaults: ConfigDefaults,
    administration: RwLock<Option<Administration>>,
    views: RwLock<Vec<Arc<dyn AdminView>>>,
    schemas_bound: AtomicBool,
}

/// Configures an [`AdminExtension`].
#[derive(Debug)]
#[must_use = "builders do nothing unless you call .build() or .init()"]
pub struct AdminExtensionBuilder {
    entry_point_group: Option<String>,
    entry_points: EntryPoints,
    defaults: ConfigDefaults,
}

impl Default for AdminExtensionBuilder {
    fn default() -> Self {
        Self {
            entry_point_group: Some(DEFAULT_ENTRY_POINT_GROUP.to_owned()),
            entry_points: EntryPoints::new(),
            defaults: ConfigDefaults::builtin(),
        }
    }
}

impl AdminExtensionBuilder {
    pub fn entry_point_group(mut self, group: impl Into<String>) -> Self {
        self.entry_point_group = Some(group.into());
        self
    }

    /// Skips discovery and publishing during `init_app`.
    pub fn without_discovery(mut self) -> Self {
        self.entry_point_group = None;
        self
    }

    pub fn entry_points(mut self, entry_points: EntryPoints) -> Self {
        self.entry_points = entry_points;
        self
    }

    pub fn defaults(mut self, defaults: ConfigDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn build(self) -> AdminExtension {
        AdminExtension {
            inner: Arc::new(AdminExtensionInner {
                entry_point_group: self.entry_point_group,
                entry_points: self.entry_points,
                defaults: self.defaults,
                administration: RwLock::new(None),
                views: RwLock::new(Vec::new()),
                schemas_bound: AtomicBool::new(false),
            }),
        }
    }

    /// Builds the extension and initializes it on `app`.
    ///
    /// # Errors
    /// See [`AdminExtension::init_app`].
    pub fn init(self, app: &mut HostApp) -> Result<AdminExtension, AdminError> {
        let extension = self.build();
        extension.init_app(app)?;
        Ok(extension)
    }
}

impl AdminExtension {
    pub fn builder() -> AdminExtensionBuilder {
        AdminExtensionBuilder::default()
    }

    /// Lazy construction; call [`AdminExtension::init_app`] later.
    #[must_use]
    pub fn new(entry_point_group: impl Into<String>) -> Self {
        Self::builder().entry_point_group(entry_point_group).build()
    }

    /// Constructs the extension and, when `app` is given, initializes it right away.
    ///
    /// # Errors
    /// See [`AdminExtension::init_app`].
    pub fn init(
        app: Option<&mut HostApp>,
        entry_point_group: impl Into<String>,
    ) -> Result<Self, AdminError> {
        let extension = Self::new(entry_point_group);
        if let Some(app) = app {
            extension.init_app(app)?;
        }
        Ok(extension)
    }

    /// Wires the panel into `app`.
    ///
    /// Merges the configuration defaults, creates the panel from the resulting config,
    /// registers the discovered views and publishes the blueprint (when a discovery group
    /// is set), stores the extension under `"invenio-administration"`, and installs the
    /// schema binding hook.
    ///
    /// # Errors
    /// [`AdminError::Config`], [`AdminError::PluginLoad`], [`AdminError::Registration`]
    /// or [`AdminError::Host`] from the respective step. Views registered before a failure
    /// stay registered.
    pub fn init_app(&self, app: &mut HostApp) -> Result<(), AdminError> {
        if self.inner.administration.read().is_some() {
            return Err(AdminError::Internal {
                message: "administration extension is already initialized".into(),
                context: Some(app.name().to_owned().into()),
            });
        }

        self.init_config(app.config_mut());
        let administration = Administration::from_config(app.config())?;
        *self.inner.administration.write() = Some(administration);

        if let Some(group) = self.inner.entry_point_group.as_deref() {
            self.load_entry_point_group(group)?;
            self.publish(app)?;
        }

        app.extensions_mut().insert(EXTENSION_KEY, self.clone());
        app.before_serving(SchemaBindingHook { extension: self.clone() });

        info!(app = %app.name(), views = self.inner.views.read().len(), "Administration initialized");
        Ok(())
    }

    /// Applies the prefixed defaults without overriding existing values.
    pub fn init_config(&self, config: &mut ConfigStore) -> usize {
        let applied = self.inner.defaults.apply(config);
        debug!(applied, "Merged administration defaults");
        applied
    }

    /// Registers one view per distinct entry of `group`, labeled with the entry's
    /// normalized name. Returns the number of views registered.
    ///
    /// # Errors
    /// [`AdminError::PluginLoad`] for an entry without a factory, or any registration error.
    pub fn load_entry_point_group(&self, group: &str) -> Result<usize, AdminError> {
        let entries = self.inner.entry_points.select(group);
        if entries.is_empty() {
            warn!(%group, "No administration views declared");
        }

        for entry in &entries {
            let factory = self.inner.entry_points.load(entry)?;
            let extension_name = normalize_entry_point_name(&entry.name);
            debug!(%group, entry = %entry.name, factory = factory.name(), "Loading view plugin");
            self.register_view(factory.as_ref(), &extension_name, ViewArgs::new())?;
        }
        Ok(entries.len())
    }

    /// Instantiates `factory` once and adds the view to the panel.
    ///
    /// # Errors
    /// [`AdminError::Internal`] before `init_app`, factory errors, or
    /// [`AdminError::Registration`] if the panel rejects the view.
    pub fn register_view(
        &self,
        factory: &dyn ViewFactory,
        extension_name: &str,
        args: ViewArgs,
    ) -> Result<Arc<dyn AdminView>, AdminError> {
        let not_initialized = || AdminError::Internal {
            message: "administration extension is not initialized".into(),
            context: Some(extension_name.to_owned().into()),
        };

        // Factories are plugin code and may call back into the registrar.
        let panel = self
            .inner
            .administration
            .read()
            .as_ref()
            .map(Administration::handle)
            .ok_or_else(not_initialized)?;
        let ctx = ViewContext { extension_name: extension_name.to_owned(), panel, args };
        let view = factory.create(ctx)?;

        self.inner
            .administration
            .write()
            .as_mut()
            .ok_or_else(not_initialized)?
            .add_view(as_view(Arc::clone(&view)), view.as_ref())?;

        info!(view = view.name(), extension = %extension_name, "Registered administration view");
        self.inner.views.write().push(Arc::clone(&view));
        Ok(view)
    }

    /// Mounts the panel blueprint on `app`. Returns `false` if it was already published.
    ///
    /// # Errors
    /// [`AdminError::Internal`] before `init_app`, [`AdminError::Host`] if the host
    /// rejects the blueprint.
    pub fn publish(&self, app: &mut HostApp) -> Result<bool, AdminError> {
        let blueprint = self
            .inner
            .administration
            .write()
            .as_mut()
            .ok_or("administration extension is not initialized")?
            .take_blueprint();

        match blueprint {
            Some(blueprint) => {
                app.register_blueprint(blueprint)?;
                Ok(true)
            },
            None => {
                debug!("Administration blueprint already published");
                Ok(false)
            },
        }
    }

    /// Binds the declared schema of every registered view, in registration order.
    ///
    /// Runs once; later calls bind nothing and return `0`. Views without a schema are
    /// skipped.
    ///
    /// # Errors
    /// [`AdminError::Schema`] for the first schema that cannot be resolved.
    pub fn bind_schemas(&self, schemas: &SchemaRegistry) -> Result<usize, AdminError> {
        if self.inner.schemas_bound.swap(true, Ordering::AcqRel) {
            return Ok(0);
        }

        let mut bound = 0;
        for view in self.views().iter().filter(|view| view.schema().is_some()) {
            view.set_schema(schemas)?;
            debug!(view = view.name(), schema = view.schema(), "Bound view schema");
            bound += 1;
        }
        Ok(bound)
    }

    /// Binds schemas against the registry published on `app`, or an empty one.
    ///
    /// # Errors
    /// See [`AdminExtension::bind_schemas`]; [`AdminError::Schema`] also when something
    /// other than a [`SchemaRegistry`] is published under `"schema-registry"`.
    pub fn finalize_before_serving(&self, app: &HostApp) -> Result<usize, AdminError> {
        let bound = match app.extensions().try_get::<SchemaRegistry>(SCHEMA_REGISTRY_KEY) {
            Ok(schemas) => self.bind_schemas(schemas)?,
            Err(ExtensionError::Missing { .. }) => {
                debug!("No schema registry published, binding against an empty one");
                self.bind_schemas(&SchemaRegistry::new())?
            },
            Err(err) => {
                return Err(AdminError::Schema { message: err.to_string().into(), context: None });
            },
        };
        info!(bound, "Administration schemas bound");
        Ok(bound)
    }

    #[must_use]
    pub fn entry_point_group(&self) -> Option<&str> {
        self.inner.entry_point_group.as_deref()
    }

    /// Registered views, in registration order.
    #[must_use]
    pub fn views(&self) -> Vec<Arc<dyn AdminView>> {
        self.inner.views.read().clone()
    }

    /// Extension labels of the registered views, in registration order.
    #[must_use]
    pub fn extension_names(&self) -> Vec<String> {
        self.inner.views.read().iter().map(|view| view.extension_name().to_owned()).collect()
    }

    #[must_use]
    pub fn menu(&self) -> Vec<MenuEntry> {
        self.inner.administration.read().as_ref().map(Administration::menu).unwrap_or_default()
    }

    #[must_use]
    pub fn panel_info(&self) -> Option<PanelInfo> {
        self.inner.administration.read().as_ref().map(|admin| admin.info().clone())
    }

    /// Panel routes relative to the prefix, dashboard included.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.inner.administration.read().as_ref().map(|admin| admin.routes().to_vec()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.inner.administration.read().as_ref().is_some_and(Administration::is_published)
    }

    #[must_use]
    pub fn schemas_bound(&self) -> bool {
        self.inner.schemas_bound.load(Ordering::Acquire)
    }
}

/// Binds view schemas right before the host starts serving.
#[derive(Debug)]
pub struct SchemaBindingHook {
    extension: AdminExtension,
}

impl BeforeServing for SchemaBindingHook {
    fn name(&self) -> &str {
        "administration-schemas"
    }

    fn run(&self, app: &HostApp) -> Result<(), HostError> {
        self.extension
            .finalize_before_serving(app)
            .map(drop)
            .map_err(|err| HostError::Hook { source: Box::new(err), context: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{ResourceViewConfig, ResourceViewFactory};

    fn users() -> ResourceViewFactory {
        ResourceViewFactory::new(ResourceViewConfig::builder().name("users").build())
    }

    #[test]
    fn register_view_before_init_is_rejected() {
        let extension = AdminExtension::new(DEFAULT_ENTRY_POINT_GROUP);
        let err = extension.register_view(&users(), "users-ui", ViewArgs::new()).unwrap_err();
        assert!(matches!(err, AdminError::Internal { .. }));
        assert!(extension.views().is_empty());
    }

    #[test]
    fn init_app_runs_once() {
        let mut app = HostApp::new("test");
        let extension = AdminExtension::builder().without_discovery().init(&mut app).unwrap();

        let err = extension.init_app(&mut app).unwrap_err();
        assert!(matches!(err, AdminError::Internal { .. }));
    }

    #[test]
    fn bind_schemas_is_single_shot() {
        let mut app = HostApp::new("test");
        let extension = AdminExtension::builder().without_discovery().init(&mut app).unwrap();
        let factory =
            ResourceViewFactory::new(ResourceViewConfig::builder().name("users").schema("user").build());
        extension.register_view(&factory, "users-ui", ViewArgs::new()).unwrap();

        let schemas: SchemaRegistry = [("user", serde_json::json!({}))].into_iter().collect();
        assert_eq!(extension.bind_schemas(&schemas).unwrap(), 1);
        assert_eq!(extension.bind_schemas(&schemas).unwrap(), 0);
        assert!(extension.schemas_bound());
    }
}
