pub use crate::extensions::Extensions;
pub use crate::schema::SchemaRegistry;
#[cfg(feature = "server")]
pub use crate::server::{BeforeServing, Blueprint, HostApp, HostError, HostErrorExt};
pub use crate::store::{ConfigStore, ConfigStoreError};
