//! Navigation and page models rendered by the administration panel.

use serde::{Deserialize, Serialize};

/// One navigation item of the administration panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// View name, unique within the panel.
    pub name: String,
    pub title: String,
    /// Absolute URL including the panel prefix.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Label of the extension that registered the view.
    pub extension: String,
}

/// Identity of the panel a view renders into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelInfo {
    pub name: String,
    pub base_template: String,
    pub url_prefix: String,
}

impl PanelInfo {
    /// Joins a view route onto the panel prefix.
    ///
    /// ```
    /// # use admin_domain::menu::PanelInfo;
    /// let panel = PanelInfo {
    ///     name: "Admin".to_owned(),
    ///     base_template: "base.html".to_owned(),
    ///     url_prefix: "/administration".to_owned(),
    /// };
    /// assert_eq!(panel.url_for("/users"), "/administration/users");
    /// assert_eq!(panel.url_for("/"), "/administration");
    /// ```
    #[must_use]
    pub fn url_for(&self, route: &str) -> String {
        let prefix = self.url_prefix.trim_end_matches('/');
        match route.trim_start_matches('/') {
            "" if prefix.is_empty() => "/".to_owned(),
            "" => prefix.to_owned(),
            rest => format!("{prefix}/{rest}"),
        }
    }
}
