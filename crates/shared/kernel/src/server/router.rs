use super::health;
use axum::Router;
use axum::routing::get;

pub const HEALTH_PATH: &str = "/health";

/// Paths served by [`system_router`].
pub const SYSTEM_PATHS: &[&str] = &[HEALTH_PATH];

/// Routes every host serves regardless of installed extensions.
pub fn system_router() -> Router {
    Router::new().route(HEALTH_PATH, get(health::health_handler))
}
