use axum::Router;
use tower_http::trace::TraceLayer;

/// Layers request tracing over the finalized host dispatcher.
pub(crate) fn init(router: Router) -> Router {
    router.layer(TraceLayer::new_for_http())
}
