use crate::error::AdminError;
use crate::panel::PanelState;
use crate::view::{AdminView, ViewContext, ViewFactory, ViewPage};
use admin_kernel::schema::SchemaRegistry;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::{Arc, OnceLock};
use typed_builder::TypedBuilder;

/// Declaration of a resource view, in code or as a `[[views]]` config entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TypedBuilder)]
pub struct ResourceViewConfig {
    #[builder(setter(into))]
    pub name: String,
    #[serde(default)]
    #[builder(default, setter(into, strip_option))]
    pub title: Option<String>,
    #[serde(default)]
    #[builder(default, setter(into, strip_option))]
    pub category: Option<String>,
    #[serde(default)]
    #[builder(default, setter(into, strip_option))]
    pub icon: Option<String>,
    /// Defaults to the panel's base template.
    #[serde(default)]
    #[builder(default, setter(into, strip_option))]
    pub template: Option<String>,
    /// Name of the schema resolved from the schema registry before serving.
    #[serde(default)]
    #[builder(default, setter(into, strip_option))]
    pub schema: Option<String>,
}

/// Generic list/detail page over one resource.
#[derive(Debug)]
pub struct ResourceView {
    config: ResourceViewConfig,
    extension_name: String,
    panel: Arc<PanelState>,
    bound_schema: OnceLock<Value>,
}

impl ResourceView {
    /// Builds the view; `title`, `category` and `icon` arguments override the config.
    #[must_use]
    pub fn new(mut config: ResourceViewConfig, ctx: ViewContext) -> Self {
        for (key, slot) in [
            ("title", &mut config.title),
            ("category", &mut config.category),
            ("icon", &mut config.icon),
        ] {
            if let Some(value) = ctx.arg_str(key) {
                *slot = Some(value.to_owned());
            }
        }

        Self {
            config,
            extension_name: ctx.extension_name,
            panel: ctx.panel,
            bound_schema: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn into_view(self) -> Arc<dyn AdminView> {
        Arc::new(self)
    }

    /// The resolved schema, once bound.
    #[must_use]
    pub fn bound_schema(&self) -> Option<&Value> {
        self.bound_schema.get()
    }
}

impl AdminView for ResourceView {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn extension_name(&self) -> &str {
        &self.extension_name
    }

    fn title(&self) -> &str {
        self.config.title.as_deref().unwrap_or(&self.config.name)
    }

    fn category(&self) -> Option<&str> {
        self.config.category.as_deref()
    }

    fn icon(&self) -> Option<&str> {
        self.config.icon.as_deref()
    }

    fn schema(&self) -> Option<&str> {
        self.config.schema.as_deref()
    }

    fn set_schema(&self, schemas: &SchemaRegistry) -> Result<(), AdminError> {
        let Some(name) = self.schema() else {
            return Ok(());
        };
        let schema = schemas.resolve(name).ok_or_else(|| AdminError::Schema {
            message: format!("schema '{name}' is not registered").into(),
            context: Some(self.config.name.clone().into()),
        })?;

        if self.bound_schema.set(schema.clone()).is_err() {
            tracing::debug!(view = %self.config.name, "Schema already bound");
        }
        Ok(())
    }

    fn render(&self) -> Result<ViewPage, AdminError> {
        let schema = match (self.schema(), self.bound_schema.get()) {
            (Some(name), None) => {
                return Err(AdminError::Schema {
                    message: format!("schema '{name}' is not bound yet").into(),
                    context: Some(self.config.name.clone().into()),
                });
            },
            (_, bound) => bound.cloned(),
        };

        let base_template = self.panel.info().base_template.as_str();
        let template = self.config.template.as_deref().unwrap_or(base_template).to_owned();
        Ok(ViewPage::new(&self.panel, self, template)
            .with_schema(schema)
            .with_data(json!({ "resource": self.config.name })))
    }
}

/// Factory producing [`ResourceView`]s from a fixed declaration.
#[derive(Debug, Clone)]
pub struct ResourceViewFactory {
    config: ResourceViewConfig,
}

impl ResourceViewFactory {
    #[must_use]
    pub const fn new(config: ResourceViewConfig) -> Self {
        Self { config }
    }
}

impl From<ResourceViewConfig> for ResourceViewFactory {
    fn from(config: ResourceViewConfig) -> Self {
        Self::new(config)
    }
}

impl ViewFactory for ResourceViewFactory {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn create(&self, ctx: ViewContext) -> Result<Arc<dyn AdminView>, AdminError> {
        Ok(ResourceView::new(self.config.clone(), ctx).into_view())
    }
}
