use super::blueprint::Blueprint;
use super::error::HostError;
use super::router::{SYSTEM_PATHS, system_router};
use crate::extensions::Extensions;
use crate::store::ConfigStore;
use axum::Router;
use fxhash::FxHashSet;
use std::borrow::Cow;
use std::fmt::Debug;
use tracing::{debug, info};

/// Work deferred until the host is about to accept traffic.
///
/// Hooks run once, in installation order, from [`HostApp::finalize_before_serving`].
pub trait BeforeServing: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// # Errors
    /// Any error aborts startup; remaining hooks are not run.
    fn run(&self, app: &HostApp) -> Result<(), HostError>;
}

/// The application that extensions attach to.
///
/// Owns the configuration store, the extension container, and the dispatcher. Startup is
/// two-phase: extensions wire themselves through `&mut HostApp`, then the orchestration
/// layer calls [`HostApp::finalize_before_serving`] (or [`HostApp::into_router`]) once.
#[derive(Debug)]
pub struct HostApp {
    name: String,
    config: ConfigStore,
    extensions: Extensions,
    router: Router,
    mounted: FxHashSet<String>,
    blueprints: Vec<Cow<'static, str>>,
    hooks: Vec<Box<dyn BeforeServing>>,
    finalized: bool,
}

impl HostApp {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, ConfigStore::new())
    }

    pub fn with_config(name: impl Into<String>, config: ConfigStore) -> Self {
        Self {
            name: name.into(),
            config,
            extensions: Extensions::new(),
            router: system_router(),
            mounted: SYSTEM_PATHS.iter().map(|path| (*path).to_owned()).collect(),
            blueprints: Vec::new(),
            hooks: Vec::new(),
            finalized: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub const fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    #[must_use]
    pub const fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub const fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    /// Mounts a blueprint on the dispatcher.
    ///
    /// # Errors
    /// [`HostError::DuplicateBlueprint`] if a blueprint with the same name is already mounted,
    /// [`HostError::InvalidRoute`] for a prefix with parameter syntax,
    /// [`HostError::DuplicateRoute`] if any of its paths is already served.
    pub fn register_blueprint(&mut self, blueprint: Blueprint) -> Result<(), HostError> {
        if self.blueprints.iter().any(|name| name == blueprint.name()) {
            return Err(HostError::DuplicateBlueprint {
                message: blueprint.name().to_owned().into(),
                context: None,
            });
        }
        let prefix = blueprint.url_prefix();
        if prefix.contains(['{', '}', '*']) {
            return Err(HostError::InvalidRoute {
                message: format!("prefix '{prefix}' must not contain '{{', '}}' or '*'").into(),
                context: Some(blueprint.name().to_owned().into()),
            });
        }

        let paths = blueprint.absolute_paths().collect::<Vec<_>>();
        if let Some(taken) = paths.iter().find(|path| self.mounted.contains(*path)) {
            return Err(HostError::DuplicateRoute {
                message: taken.clone().into(),
                context: Some(blueprint.name().to_owned().into()),
            });
        }

        let routes = paths.len();
        self.mounted.extend(paths);
        let (name, url_prefix, router) = blueprint.into_parts();
        info!(blueprint = %name, prefix = %url_prefix, routes, "Registering blueprint");

        let current = std::mem::take(&mut self.router);
        self.router =
            if url_prefix.is_empty() { current.merge(router) } else { current.nest(&url_prefix, router) };
        self.blueprints.push(name);
        Ok(())
    }

    /// Names of the mounted blueprints, in registration order.
    pub fn blueprints(&self) -> impl Iterator<Item = &str> {
        self.blueprints.iter().map(AsRef::as_ref)
    }

    /// Installs a hook to run right before the host starts serving.
    pub fn before_serving(&mut self, hook: impl BeforeServing + 'static) {
        debug!(hook = hook.name(), "Installing before-serving hook");
        self.hooks.push(Box::new(hook));
    }

    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Runs the installed hooks exactly once. Later calls are no-ops.
    ///
    /// The gate closes before the first hook runs, so a failed finalization is not retried.
    ///
    /// # Errors
    /// The first hook error, with the hook name as context.
    pub fn finalize_before_serving(&mut self) -> Result<(), HostError> {
        if self.finalized {
            return Ok(());
        }
        self.finalized = true;

        let hooks = std::mem::take(&mut self.hooks);
        for hook in &hooks {
            debug!(hook = hook.name(), "Running before-serving hook");
            hook.run(self).map_err(|mut err| {
                if let HostError::Hook { context: context @ None, .. } = &mut err {
                    *context = Some(hook.name().to_owned().into());
                }
                err
            })?;
        }

        info!(app = %self.name, hooks = hooks.len(), "Application finalized");
        Ok(())
    }

    /// Finalizes the host and hands out the dispatcher.
    ///
    /// # Errors
    /// See [`HostApp::finalize_before_serving`].
    pub fn into_router(mut self) -> Result<Router, HostError> {
        self.finalize_before_serving()?;
        Ok(self.router)
    }
}
