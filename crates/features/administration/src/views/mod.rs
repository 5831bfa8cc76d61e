//! Built-in views.

mod dashboard;
mod resource;

pub use dashboard::DashboardView;
pub use resource::{ResourceView, ResourceViewConfig, ResourceViewFactory};
