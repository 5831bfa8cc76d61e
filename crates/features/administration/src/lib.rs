//! # Administration panel
//!
//! Bootstraps the administration panel on a [`HostApp`](admin_kernel::server::HostApp):
//! merges the `ADMINISTRATION_*` defaults into the host configuration, discovers view
//! plugins from an entry-point group, registers their routes on the panel blueprint,
//! publishes it once, and binds view schemas right before the host starts serving.
//!
//! ```rust
//! use admin_kernel::server::HostApp;
//! use admin_panel::{AdminExtension, EntryPoints, ResourceViewConfig, ResourceViewFactory};
//!
//! let users = ResourceViewFactory::new(ResourceViewConfig::builder().name("users").build());
//! let entry_points =
//!     EntryPoints::new().register("invenio_administration.views", "users_ui", users);
//!
//! let mut app = HostApp::new("demo");
//! let admin = AdminExtension::builder().entry_points(entry_points).init(&mut app)?;
//!
//! assert_eq!(admin.extension_names(), ["users-ui"]);
//! let router = app.into_router()?;
//! # let _ = router;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod discovery;
mod error;
mod ext;
pub mod panel;
pub mod view;
pub mod views;

pub use config::ConfigDefaults;
pub use discovery::{EntryPoint, EntryPointManifest, EntryPoints};
pub use error::{AdminError, AdminErrorExt};
pub use ext::{AdminExtension, AdminExtensionBuilder, SchemaBindingHook};
pub use panel::{Administration, PanelState};
pub use view::{AdminView, ViewArgs, ViewContext, ViewFactory, ViewPage};
pub use views::{DashboardView, ResourceView, ResourceViewConfig, ResourceViewFactory};
