//! View contract of the administration panel.
//!
//! A plugin contributes a [`ViewFactory`]; the registrar instantiates it once per
//! registration with a [`ViewContext`] and turns the instance into a route handler with
//! [`as_view`].

use crate::error::AdminError;
use crate::panel::PanelState;
use admin_domain::menu::{MenuEntry, PanelInfo};
use admin_kernel::schema::SchemaRegistry;
use axum::Json;
use axum::routing::{MethodRouter, get};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Extra construction arguments passed to a factory at registration.
pub type ViewArgs = Map<String, Value>;

/// A page of the administration panel.
pub trait AdminView: Debug + Send + Sync {
    /// Unique name within the panel; also the default route segment.
    fn name(&self) -> &str;

    /// Label of the extension that contributed the view.
    fn extension_name(&self) -> &str;

    fn title(&self) -> &str {
        self.name()
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn icon(&self) -> Option<&str> {
        None
    }

    /// Route relative to the panel prefix.
    fn route(&self) -> String {
        format!("/{}", self.name())
    }

    fn menu_visible(&self) -> bool {
        true
    }

    /// Name of the serialization schema the view needs, if any.
    fn schema(&self) -> Option<&str> {
        None
    }

    /// Resolves the declared schema. Called at most once, right before serving.
    ///
    /// # Errors
    /// [`AdminError::Schema`] if the declared schema is not registered.
    fn set_schema(&self, _schemas: &SchemaRegistry) -> Result<(), AdminError> {
        Ok(())
    }

    /// # Errors
    /// Any error is turned into an HTTP error response by the route handler.
    fn render(&self) -> Result<ViewPage, AdminError>;
}

/// Instantiates views for one entry point.
pub trait ViewFactory: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// # Errors
    /// Construction errors abort startup.
    fn create(&self, ctx: ViewContext) -> Result<Arc<dyn AdminView>, AdminError>;
}

/// Everything a factory receives to build a view.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub extension_name: String,
    pub panel: Arc<PanelState>,
    pub args: ViewArgs,
}

impl ViewContext {
    /// String argument by key, ignoring non-string values.
    #[must_use]
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}

/// A [`ViewFactory`] backed by a closure.
pub struct FnViewFactory<F> {
    name: String,
    create: F,
}

impl<F> Debug for FnViewFactory<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnViewFactory").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<F> ViewFactory for FnViewFactory<F>
where
    F: Fn(ViewContext) -> Result<Arc<dyn AdminView>, AdminError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, ctx: ViewContext) -> Result<Arc<dyn AdminView>, AdminError> {
        (self.create)(ctx)
    }
}

/// Wraps a closure as a named view factory.
///
/// ```
/// # use admin_panel::view::{factory_fn, ViewFactory};
/// # use admin_panel::ResourceView;
/// # use admin_panel::ResourceViewConfig;
/// let factory = factory_fn("users", |ctx| {
///     let config = ResourceViewConfig::builder().name("users").build();
///     Ok(ResourceView::new(config, ctx).into_view())
/// });
/// assert_eq!(factory.name(), "users");
/// ```
pub fn factory_fn<F>(name: impl Into<String>, create: F) -> FnViewFactory<F>
where
    F: Fn(ViewContext) -> Result<Arc<dyn AdminView>, AdminError> + Send + Sync,
{
    FnViewFactory { name: name.into(), create }
}

/// Page model returned by every view route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPage {
    pub panel: PanelInfo,
    pub name: String,
    pub title: String,
    pub template: String,
    pub extension: String,
    pub menu: Vec<MenuEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    pub data: Value,
}

impl ViewPage {
    /// Starts a page for `view` rendered into `panel`, with the current menu.
    #[must_use]
    pub fn new(panel: &PanelState, view: &dyn AdminView, template: impl Into<String>) -> Self {
        Self {
            panel: panel.info().clone(),
            name: view.name().to_owned(),
            title: view.title().to_owned(),
            template: template.into(),
            extension: view.extension_name().to_owned(),
            menu: panel.menu(),
            schema: None,
            data: Value::Object(Map::new()),
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: Option<Value>) -> Self {
        self.schema = schema;
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

/// Builds the navigation entry of a view mounted on `panel`.
#[must_use]
pub fn menu_entry(panel: &PanelInfo, view: &dyn AdminView) -> MenuEntry {
    MenuEntry {
        name: view.name().to_owned(),
        title: view.title().to_owned(),
        url: panel.url_for(&view.route()),
        category: view.category().map(ToOwned::to_owned),
        icon: view.icon().map(ToOwned::to_owned),
        extension: view.extension_name().to_owned(),
    }
}

/// Turns a view instance into a `GET` handler rendering its page as JSON.
pub fn as_view(view: Arc<dyn AdminView>) -> MethodRouter {
    get(move || {
        let view = Arc::clone(&view);
        async move { view.render().map(Json) }
    })
}
