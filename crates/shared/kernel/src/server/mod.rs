//! Host application: configuration, extensions, routing, and the before-serving gate.

mod app;
mod blueprint;
mod error;
mod health;
pub mod router;

pub use app::{BeforeServing, HostApp};
pub use blueprint::Blueprint;
pub use error::{HostError, HostErrorExt};
