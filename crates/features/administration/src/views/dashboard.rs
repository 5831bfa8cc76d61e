use crate::error::AdminError;
use crate::panel::PanelState;
use crate::view::{AdminView, ViewPage};
use admin_domain::constants::{DASHBOARD_ROUTE, EXTENSION_KEY};
use serde_json::json;
use std::sync::Arc;

/// Index page of the panel: the menu plus, optionally, the contributing extensions.
#[derive(Debug)]
pub struct DashboardView {
    panel: Arc<PanelState>,
}

impl DashboardView {
    pub const NAME: &'static str = "dashboard";

    #[must_use]
    pub const fn new(panel: Arc<PanelState>) -> Self {
        Self { panel }
    }
}

impl AdminView for DashboardView {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn extension_name(&self) -> &str {
        EXTENSION_KEY
    }

    fn title(&self) -> &str {
        &self.panel.info().name
    }

    fn route(&self) -> String {
        DASHBOARD_ROUTE.to_owned()
    }

    fn menu_visible(&self) -> bool {
        false
    }

    fn render(&self) -> Result<ViewPage, AdminError> {
        let data = if self.panel.display_versions() {
            json!({ "extensions": self.panel.extension_names() })
        } else {
            json!({})
        };
        Ok(ViewPage::new(&self.panel, self, self.panel.dashboard_template()).with_data(data))
    }
}
