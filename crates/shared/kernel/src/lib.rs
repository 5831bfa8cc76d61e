//! Kernel abstractions shared by the host application and its extensions.
//! Keep this crate lightweight; it provides the configuration store, the extension
//! container, the schema registry, and (behind the `server` feature) the host application.
//!
//! ## Config store
//! ```rust
//! use admin_kernel::store::ConfigStore;
//!
//! let mut store = ConfigStore::new();
//! store.set("ADMINISTRATION_APPNAME", "Custom");
//! assert!(!store.set_if_absent("ADMINISTRATION_APPNAME", "Default"));
//! assert_eq!(store.get_str("ADMINISTRATION_APPNAME"), Some("Custom"));
//! ```
//!
//! ## Config loading (non-wasm)
//! ```rust,ignore
//! use admin_kernel::config::load_config;
//! let cfg: serde_json::Value = load_config(Some("admin")).unwrap();
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod extensions;
pub mod prelude;
pub mod schema;
#[cfg(feature = "server")]
pub mod server;
pub mod store;

pub use admin_domain as domain;
